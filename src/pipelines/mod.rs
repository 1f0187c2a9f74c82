//! Render pipelines and their uniforms.
//!
//! - `basic` builds the fill and outline pipelines from the scene shader
//! - `light` holds the point light uniform and its bind group

pub mod basic;
pub mod light;
