//! Tagged surface materials.
//!
//! A [`Material`] only carries the Phong parameters the shader needs. Materials
//! are defined once when the scene is prepared and looked up by tag when the draw
//! list is built.

use anyhow::bail;
use cgmath::Vector3;

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub tag: String,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
    pub shininess: f32,
}

impl Material {
    pub fn new(tag: &str, diffuse: [f32; 3], specular: [f32; 3], shininess: f32) -> Self {
        Self {
            tag: tag.to_string(),
            diffuse: diffuse.into(),
            specular: specular.into(),
            shininess,
        }
    }

    /// Used for objects without a material tag or with a tag nobody defined.
    pub fn untagged() -> Self {
        Self::new("untagged", [0.6, 0.6, 0.6], [0.1, 0.1, 0.1], 1.0)
    }
}

/// Materials in definition order, looked up linearly by tag.
#[derive(Clone, Debug, Default)]
pub struct MaterialLibrary {
    materials: Vec<Material>,
}

impl MaterialLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, material: Material) -> anyhow::Result<()> {
        if self.find(&material.tag).is_some() {
            bail!("material '{}' is already defined", material.tag);
        }
        if !(material.shininess >= 0.0) {
            bail!(
                "material '{}' has an invalid shininess of {}",
                material.tag,
                material.shininess
            );
        }
        self.materials.push(material);
        Ok(())
    }

    pub fn find(&self, tag: &str) -> Option<&Material> {
        self.materials.iter().find(|material| material.tag == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}
