//! Primitive shape generation.
//!
//! All shapes are generated with unit normals, texture coordinates and an extra
//! set of line indices used for the outline overlay.
//!
//! | shape       | extent                                    |
//! |-------------|-------------------------------------------|
//! | plane       | XZ square from -1 to 1, facing +Y         |
//! | box         | unit cube from -0.5 to 0.5                |
//! | cylinder    | radius 1, from y = 0 to y = 1, capped     |
//! | sphere      | radius 1 around the origin                |
//! | half sphere | upper dome of the sphere (y >= 0), open   |

use std::f32::consts::PI;

use crate::data_structures::model::ModelVertex;

const CYLINDER_SEGMENTS: u32 = 36;
const SPHERE_LONGITUDE_SEGMENTS: u32 = 36;
const SPHERE_LATITUDE_SEGMENTS: u32 = 18;
// vertical lines drawn on round shapes
const OUTLINE_MERIDIANS: u32 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Plane,
    Box,
    Cylinder,
    Sphere,
    HalfSphere,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Plane,
        ShapeKind::Box,
        ShapeKind::Cylinder,
        ShapeKind::Sphere,
        ShapeKind::HalfSphere,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Plane => "plane",
            ShapeKind::Box => "box",
            ShapeKind::Cylinder => "cylinder",
            ShapeKind::Sphere => "sphere",
            ShapeKind::HalfSphere => "half sphere",
        }
    }

    pub fn mesh_data(&self) -> MeshData {
        match self {
            ShapeKind::Plane => generate_plane(),
            ShapeKind::Box => generate_box(),
            ShapeKind::Cylinder => generate_cylinder(CYLINDER_SEGMENTS),
            ShapeKind::Sphere => {
                generate_sphere(SPHERE_LONGITUDE_SEGMENTS, SPHERE_LATITUDE_SEGMENTS, false)
            }
            ShapeKind::HalfSphere => {
                generate_sphere(SPHERE_LONGITUDE_SEGMENTS, SPHERE_LATITUDE_SEGMENTS / 2, true)
            }
        }
    }
}

/// CPU side geometry of a shape, ready for upload.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<ModelVertex>,
    /// Triangle list.
    pub indices: Vec<u32>,
    /// Line list for the outline overlay.
    pub line_indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn push(&mut self, position: [f32; 3], tex_coords: [f32; 2], normal: [f32; 3]) -> u32 {
        self.vertices.push(ModelVertex {
            position,
            tex_coords,
            normal,
        });
        self.vertices.len() as u32 - 1
    }
}

pub fn generate_plane() -> MeshData {
    let mut data = MeshData::default();
    let up = [0.0, 1.0, 0.0];
    data.push([-1.0, 0.0, -1.0], [0.0, 1.0], up);
    data.push([1.0, 0.0, -1.0], [1.0, 1.0], up);
    data.push([1.0, 0.0, 1.0], [1.0, 0.0], up);
    data.push([-1.0, 0.0, 1.0], [0.0, 0.0], up);
    data.indices = vec![3, 2, 1, 3, 1, 0];
    data.line_indices = vec![0, 1, 1, 2, 2, 3, 3, 0];
    data
}

pub fn generate_box() -> MeshData {
    let mut data = MeshData::default();
    #[rustfmt::skip]
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        // front
        ([0.0, 0.0, 1.0], [[-0.5, -0.5, 0.5], [0.5, -0.5, 0.5], [0.5, 0.5, 0.5], [-0.5, 0.5, 0.5]]),
        // back
        ([0.0, 0.0, -1.0], [[0.5, -0.5, -0.5], [-0.5, -0.5, -0.5], [-0.5, 0.5, -0.5], [0.5, 0.5, -0.5]]),
        // left
        ([-1.0, 0.0, 0.0], [[-0.5, -0.5, -0.5], [-0.5, -0.5, 0.5], [-0.5, 0.5, 0.5], [-0.5, 0.5, -0.5]]),
        // right
        ([1.0, 0.0, 0.0], [[0.5, -0.5, 0.5], [0.5, -0.5, -0.5], [0.5, 0.5, -0.5], [0.5, 0.5, 0.5]]),
        // top
        ([0.0, 1.0, 0.0], [[-0.5, 0.5, 0.5], [0.5, 0.5, 0.5], [0.5, 0.5, -0.5], [-0.5, 0.5, -0.5]]),
        // bottom
        ([0.0, -1.0, 0.0], [[-0.5, -0.5, -0.5], [0.5, -0.5, -0.5], [0.5, -0.5, 0.5], [-0.5, -0.5, 0.5]]),
    ];
    let tex_coords = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

    for (normal, corners) in faces {
        let first = data.vertices.len() as u32;
        for (corner, uv) in corners.iter().zip(tex_coords) {
            data.push(*corner, uv, normal);
        }
        // two counter-clockwise triangles per face
        data.indices
            .extend_from_slice(&[first, first + 1, first + 2, first + 2, first + 3, first]);
        for edge in 0..4 {
            data.line_indices.push(first + edge);
            data.line_indices.push(first + (edge + 1) % 4);
        }
    }
    data
}

pub fn generate_cylinder(segments: u32) -> MeshData {
    let segments = segments.max(3);
    let mut data = MeshData::default();

    // side wall, the seam column is duplicated so u can run from 0 to 1
    for i in 0..=segments {
        let u = i as f32 / segments as f32;
        let angle = u * 2.0 * PI;
        let (x, z) = (angle.cos(), angle.sin());
        data.push([x, 0.0, z], [u, 0.0], [x, 0.0, z]);
        data.push([x, 1.0, z], [u, 1.0], [x, 0.0, z]);
    }
    for i in 0..segments {
        let bottom = 2 * i;
        let top = bottom + 1;
        let next_bottom = bottom + 2;
        let next_top = bottom + 3;
        data.indices
            .extend_from_slice(&[bottom, top, next_top, bottom, next_top, next_bottom]);
        data.line_indices
            .extend_from_slice(&[bottom, next_bottom, top, next_top]);
        if i % (segments / OUTLINE_MERIDIANS).max(1) == 0 {
            data.line_indices.extend_from_slice(&[bottom, top]);
        }
    }

    for (y, normal_y) in [(1.0, 1.0), (0.0, -1.0)] {
        let normal = [0.0, normal_y, 0.0];
        let center = data.push([0.0, y, 0.0], [0.5, 0.5], normal);
        let ring = center + 1;
        for i in 0..segments {
            let angle = i as f32 / segments as f32 * 2.0 * PI;
            let (x, z) = (angle.cos(), angle.sin());
            data.push([x, y, z], [0.5 + 0.5 * x, 0.5 + 0.5 * z], normal);
        }
        for i in 0..segments {
            let current = ring + i;
            let next = ring + (i + 1) % segments;
            if normal_y > 0.0 {
                data.indices.extend_from_slice(&[center, next, current]);
            } else {
                data.indices.extend_from_slice(&[center, current, next]);
            }
        }
    }
    data
}

/// UV sphere of radius 1. With `hemisphere` only the latitudes from the north pole
/// down to the equator are generated, in `latitude_segments` steps.
pub fn generate_sphere(longitude_segments: u32, latitude_segments: u32, hemisphere: bool) -> MeshData {
    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);
    let theta_max = if hemisphere { PI / 2.0 } else { PI };
    let mut data = MeshData::default();

    for lat in 0..=lat_segs {
        let theta = lat as f32 * theta_max / lat_segs as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();
        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();
            let position = [sin_theta * cos_phi, cos_theta, sin_theta * sin_phi];
            let uv = [
                long as f32 / long_segs as f32,
                1.0 - lat as f32 / lat_segs as f32,
            ];
            data.push(position, uv, position);
        }
    }

    let row = long_segs + 1;
    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * row + long;
            let second = first + row;
            data.indices
                .extend_from_slice(&[first, first + 1, second, second, first + 1, second + 1]);
        }
    }

    // latitude rings, the poles collapse to a point and are skipped
    let last_ring = if hemisphere { lat_segs } else { lat_segs - 1 };
    for lat in 1..=last_ring {
        for long in 0..long_segs {
            let first = lat * row + long;
            data.line_indices.extend_from_slice(&[first, first + 1]);
        }
    }
    let step = (long_segs / OUTLINE_MERIDIANS).max(1) as usize;
    for long in (0..long_segs).step_by(step) {
        for lat in 0..lat_segs {
            let first = lat * row + long;
            data.line_indices.extend_from_slice(&[first, first + row]);
        }
    }
    data
}
