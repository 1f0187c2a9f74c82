//! Declarative scene descriptions and the [`SceneManager`] resolving them.
//!
//! A scene is a list of [`SceneObject`]s. Each object names a primitive shape,
//! its [`Transform`] and a [`Surface`] (flat colour, optional texture tag and
//! optional material tag). Nothing carries over from one object to the next:
//! tags are resolved per object when the draw list is built.

use anyhow::bail;

use crate::{
    data_structures::{
        instance::{InstanceRaw, Transform},
        material::{Material, MaterialLibrary},
        shapes::ShapeKind,
    },
    pipelines::light::{LightUniform, PointLight},
    resources::texture::{MAX_TEXTURE_SLOTS, TextureRegistry},
};

pub mod living_room;

/// A texture file under the asset root and the tag objects refer to it by.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureSource {
    pub tag: String,
    pub file: String,
}

impl TextureSource {
    pub fn new(tag: &str, file: &str) -> Self {
        Self {
            tag: tag.to_string(),
            file: file.to_string(),
        }
    }
}

/// Decode an sRGB colour to linear values for an sRGB render target. Alpha is kept.
pub fn srgb_to_linear(color: [f32; 4]) -> [f32; 4] {
    let decode = |c: f32| {
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    [decode(color[0]), decode(color[1]), decode(color[2]), color[3]]
}

/// How an object is coloured and lit.
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    /// sRGB encoded, converted to linear when the object is resolved.
    pub color: [f32; 4],
    pub texture: Option<String>,
    pub material: Option<String>,
    pub uv_scale: [f32; 2],
}

impl Surface {
    pub fn color(color: [f32; 4]) -> Self {
        Self {
            color,
            texture: None,
            material: None,
            uv_scale: [1.0, 1.0],
        }
    }

    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::color([r, g, b, 1.0])
    }

    pub fn grey(value: f32) -> Self {
        Self::rgb(value, value, value)
    }

    pub fn textured(mut self, tag: &str) -> Self {
        self.texture = Some(tag.to_string());
        self
    }

    pub fn with_material(mut self, tag: &str) -> Self {
        self.material = Some(tag.to_string());
        self
    }

    pub fn with_uv_scale(mut self, u: f32, v: f32) -> Self {
        self.uv_scale = [u, v];
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneObject {
    pub name: String,
    pub shape: ShapeKind,
    pub transform: Transform,
    pub surface: Surface,
    /// Draw the shape's wireframe on top of the filled mesh.
    pub outlined: bool,
}

impl SceneObject {
    /// An outlined object.
    pub fn new(name: &str, shape: ShapeKind, transform: Transform, surface: Surface) -> Self {
        Self {
            name: name.to_string(),
            shape,
            transform,
            surface,
            outlined: true,
        }
    }

    pub fn without_outline(mut self) -> Self {
        self.outlined = false;
        self
    }
}

/// Everything needed to prepare and draw a scene.
#[derive(Clone, Debug, Default)]
pub struct SceneDescription {
    pub textures: Vec<TextureSource>,
    pub materials: Vec<Material>,
    pub lights: Vec<PointLight>,
    pub use_lighting: bool,
    pub objects: Vec<SceneObject>,
}

/// A fully resolved object, ready to be written to the instance buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawCommand {
    pub name: String,
    pub shape: ShapeKind,
    pub instance: InstanceRaw,
    /// Texture slot to bind, `None` draws the flat colour.
    pub texture_slot: Option<usize>,
    pub outlined: bool,
}

/**
 * Owns the texture slots, material table, lights and object list of one scene.
 *
 * `H` is the loaded texture. The renderer uses [`crate::data_structures::texture::Texture`];
 * tests can use any placeholder since resolution never touches the GPU.
 */
#[derive(Debug)]
pub struct SceneManager<H> {
    texture_sources: Vec<TextureSource>,
    textures: TextureRegistry<H>,
    materials: MaterialLibrary,
    lights: Vec<PointLight>,
    light_uniform: LightUniform,
    objects: Vec<SceneObject>,
}

impl<H> SceneManager<H> {
    /// Define the materials and lights of `description`. Textures are registered later,
    /// once they are loaded.
    pub fn new(description: SceneDescription) -> anyhow::Result<Self> {
        let SceneDescription {
            textures,
            materials,
            lights,
            use_lighting,
            objects,
        } = description;

        if textures.len() > MAX_TEXTURE_SLOTS {
            bail!(
                "{} textures requested but only {MAX_TEXTURE_SLOTS} slots are available",
                textures.len()
            );
        }
        for (i, source) in textures.iter().enumerate() {
            if textures[..i].iter().any(|other| other.tag == source.tag) {
                bail!("texture tag '{}' is used more than once", source.tag);
            }
        }

        let mut library = MaterialLibrary::new();
        for material in materials {
            library.define(material)?;
        }
        let light_uniform = LightUniform::new(&lights, use_lighting)?;

        log::info!(
            "Prepared scene with {} objects, {} materials and {} lights",
            objects.len(),
            library.len(),
            lights.len()
        );
        Ok(Self {
            texture_sources: textures,
            textures: TextureRegistry::new(),
            materials: library,
            lights,
            light_uniform,
            objects,
        })
    }

    pub fn texture_sources(&self) -> &[TextureSource] {
        &self.texture_sources
    }

    pub fn register_texture(&mut self, tag: &str, handle: H) -> anyhow::Result<usize> {
        self.textures.register(tag, handle)
    }

    /// Register the outcome of a texture load. Failures are logged and the scene
    /// carries on without that texture.
    pub fn register_loaded(&mut self, tag: &str, loaded: anyhow::Result<H>) -> bool {
        let handle = match loaded {
            Ok(handle) => handle,
            Err(e) => {
                log::error!("Could not load texture '{tag}': {e:#}");
                return false;
            }
        };
        match self.textures.register(tag, handle) {
            Ok(slot) => {
                log::debug!("Texture '{tag}' bound to slot {slot}");
                true
            }
            Err(e) => {
                log::error!("{e:#}");
                false
            }
        }
    }

    pub fn textures(&self) -> &TextureRegistry<H> {
        &self.textures
    }

    pub fn materials(&self) -> &MaterialLibrary {
        &self.materials
    }

    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    pub fn light_uniform(&self) -> LightUniform {
        self.light_uniform
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Resolve a single object against the registered textures and materials.
    pub fn resolve(&self, object: &SceneObject) -> DrawCommand {
        let surface = &object.surface;
        let texture_slot = surface.texture.as_deref().and_then(|tag| {
            let slot = self.textures.find_slot(tag);
            if slot.is_none() {
                log::warn!(
                    "'{}' uses texture '{tag}' which is not loaded, drawing its flat colour",
                    object.name
                );
            }
            slot
        });

        let untagged = Material::untagged();
        let material = match surface.material.as_deref() {
            Some(tag) => self.materials.find(tag).unwrap_or_else(|| {
                log::warn!(
                    "'{}' uses undefined material '{tag}', falling back to '{}'",
                    object.name,
                    untagged.tag
                );
                &untagged
            }),
            None => &untagged,
        };

        DrawCommand {
            name: object.name.clone(),
            shape: object.shape,
            instance: InstanceRaw::new(
                &object.transform,
                srgb_to_linear(surface.color),
                material,
                surface.uv_scale,
                texture_slot.is_some(),
            ),
            texture_slot,
            outlined: object.outlined,
        }
    }

    /// One command per object, in declaration order.
    pub fn draw_list(&self) -> Vec<DrawCommand> {
        self.objects
            .iter()
            .map(|object| self.resolve(object))
            .collect()
    }
}
