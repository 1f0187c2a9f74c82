//! living-room
//!
//! Renders a fixed living-room scene (couch, side tables, lamps, a bowl) that is
//! assembled from a handful of primitive meshes. Every object is a declarative
//! descriptor (shape, transform, colour, texture and material tags) and the scene
//! is drawn in descriptor order every frame.
//!
//! High-level modules
//! - `camera`: fly camera, controller and uniforms for view/projection
//! - `config`: runtime configuration (window, assets, outlines)
//! - `context`: central GPU and window context that owns device/queue/renderer
//! - `data_structures`: transforms, meshes, shapes, textures and materials
//! - `flow`: the winit event loop
//! - `pipelines`: render pipelines and the light uniform
//! - `resources`: helpers to load textures from the asset directory
//! - `render`: the scene renderer issuing the ordered draw calls
//! - `scene`: scene descriptors, the scene manager and the living room itself
//!

pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod scene;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
