//! Engine data structures: transforms, meshes, shapes, textures and materials.
//!
//! - `instance` holds the per-object transformation and the raw per-draw GPU record
//! - `model` contains the vertex type and GPU meshes
//! - `shapes` generates the primitive meshes (plane, box, cylinder, spheres)
//! - `texture` contains the GPU texture wrapper and creation utilities
//! - `material` holds the tagged material table

pub mod instance;
pub mod material;
pub mod model;
pub mod shapes;
pub mod texture;
