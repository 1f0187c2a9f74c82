//! Object transformation data for GPU rendering.
//!
//! Every scene object is placed with a [`Transform`] (scale, X/Y/Z rotation in
//! degrees, translation). The resolved per-draw values are packed into an
//! [`InstanceRaw`] and read by the vertex shader from an instance buffer.

use cgmath::{Deg, Matrix, Matrix3, Matrix4, SquareMatrix, Vector3};

use crate::data_structures::{material::Material, model};

/// Placement of a single object: scale, rotation around X, Y and Z (in degrees) and position.
#[derive(Clone, Debug, PartialEq)]
pub struct Transform {
    pub scale: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub position: Vector3<f32>,
}

impl Transform {
    pub fn new(scale: [f32; 3], rotation_degrees: [f32; 3], position: [f32; 3]) -> Self {
        Self {
            scale: scale.into(),
            rotation: rotation_degrees.into(),
            position: position.into(),
        }
    }

    /// No scale, rotation or translation.
    pub fn identity() -> Self {
        Self::new([1.0; 3], [0.0; 3], [0.0; 3])
    }

    /// Rotation part only: X is applied first, then Y, then Z.
    pub fn rotation_matrix(&self) -> Matrix3<f32> {
        Matrix3::from_angle_z(Deg(self.rotation.z))
            * Matrix3::from_angle_y(Deg(self.rotation.y))
            * Matrix3::from_angle_x(Deg(self.rotation.x))
    }

    /// Model matrix `T * Rz * Ry * Rx * S`.
    pub fn to_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from_angle_z(Deg(self.rotation.z))
            * Matrix4::from_angle_y(Deg(self.rotation.y))
            * Matrix4::from_angle_x(Deg(self.rotation.x))
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }

    /// Inverse-transpose of the linear part so non-uniform scales keep normals perpendicular.
    ///
    /// A zero scale component has no inverse; the rotation alone is used then.
    pub fn normal_matrix(&self) -> Matrix3<f32> {
        let rotation = self.rotation_matrix();
        let linear = rotation * Matrix3::from_diagonal(self.scale);
        match linear.invert() {
            Some(inverse) => inverse.transpose(),
            None => rotation,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/**
 * The raw instance is the actual data stored on the GPU for a single draw.
 */
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 3]; 3],
    pub color: [f32; 4],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub shininess: f32,
    pub uv_scale: [f32; 2],
    pub use_texture: u32,
}

impl InstanceRaw {
    pub fn new(
        transform: &Transform,
        color: [f32; 4],
        material: &Material,
        uv_scale: [f32; 2],
        textured: bool,
    ) -> Self {
        Self {
            model: transform.to_matrix().into(),
            normal: transform.normal_matrix().into(),
            color,
            diffuse: material.diffuse.into(),
            specular: material.specular.into(),
            shininess: material.shininess,
            uv_scale,
            use_texture: textured as u32,
        }
    }
}

/**
 * As we store the per-draw data directly in GPU memory we need to tell what the bytes refer to.
 *
 * Locations 0-2 belong to the mesh vertex, so the instance starts at 3. The model matrix takes
 * four slots (one per column), the normal matrix three.
 */
impl model::Vertex for InstanceRaw {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        const ATTRIBUTES: [wgpu::VertexAttribute; 13] = wgpu::vertex_attr_array![
            3 => Float32x4,
            4 => Float32x4,
            5 => Float32x4,
            6 => Float32x4,
            7 => Float32x3,
            8 => Float32x3,
            9 => Float32x3,
            10 => Float32x4,
            11 => Float32x3,
            12 => Float32x3,
            13 => Float32,
            14 => Float32x2,
            15 => Uint32,
        ];
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<InstanceRaw>() as wgpu::BufferAddress,
            // The shader moves to the next record per instance, not per vertex
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &ATTRIBUTES,
        }
    }
}
