use std::path::Path;

use anyhow::{Context, bail};
use image::RgbaImage;

use crate::{data_structures::texture, resources::load_binary, scene::SceneManager};

/// The number of texture slots a scene may fill.
pub const MAX_TEXTURE_SLOTS: usize = 16;

pub fn texture_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some("Scene texture_bind_group_layout"),
    })
}

/// A loaded texture and the tag it is looked up by.
#[derive(Clone, Debug)]
pub struct TextureEntry<H> {
    pub handle: H,
    pub tag: String,
}

/**
 * Tagged texture slots in registration order.
 *
 * The slot of a texture is its index here. `H` is the GPU texture at runtime; the registry
 * itself never touches the GPU.
 */
#[derive(Clone, Debug)]
pub struct TextureRegistry<H> {
    entries: Vec<TextureEntry<H>>,
}

impl<H> TextureRegistry<H> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Store `handle` in the next free slot and return that slot.
    pub fn register(&mut self, tag: &str, handle: H) -> anyhow::Result<usize> {
        if self.entries.len() >= MAX_TEXTURE_SLOTS {
            bail!("all {MAX_TEXTURE_SLOTS} texture slots are in use, cannot register '{tag}'");
        }
        if self.find_slot(tag).is_some() {
            bail!("a texture tagged '{tag}' is already registered");
        }
        self.entries.push(TextureEntry {
            handle,
            tag: tag.to_string(),
        });
        Ok(self.entries.len() - 1)
    }

    pub fn find_slot(&self, tag: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.tag == tag)
    }

    pub fn find(&self, tag: &str) -> Option<&H> {
        self.entries
            .iter()
            .find(|entry| entry.tag == tag)
            .map(|entry| &entry.handle)
    }

    pub fn get(&self, slot: usize) -> Option<&TextureEntry<H>> {
        self.entries.get(slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TextureEntry<H>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every texture and free all slots.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<H> Default for TextureRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
pub struct DecodedImage {
    pub pixels: RgbaImage,
    /// Channel count of the source file.
    pub channels: u8,
}

/// Decode an image file, keeping only RGB and RGBA sources.
///
/// Rows are flipped so the first row is the bottom of the picture, which is what
/// the shape texture coordinates expect.
pub fn decode_texture_image(bytes: &[u8], label: &str) -> anyhow::Result<DecodedImage> {
    let img = image::load_from_memory(bytes)
        .with_context(|| format!("Could not load image: {label}"))?;
    let channels = img.color().channel_count();
    if channels != 3 && channels != 4 {
        bail!("Not implemented to handle image {label} with {channels} channels");
    }
    Ok(DecodedImage {
        pixels: img.flipv().to_rgba8(),
        channels,
    })
}

pub async fn load_texture(
    asset_root: &Path,
    file_name: &str,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> anyhow::Result<texture::Texture> {
    let data = load_binary(asset_root, file_name).await?;
    let decoded = decode_texture_image(&data, file_name)?;
    let texture = texture::Texture::from_rgba(device, queue, &decoded.pixels, file_name)?;
    log::info!(
        "Successfully loaded image: {}, width: {}, height: {}, channels: {}",
        file_name,
        texture.size.0,
        texture.size.1,
        decoded.channels
    );
    Ok(texture)
}

/// Load every texture the scene asks for and bind it to the next slot.
///
/// Files are read concurrently but registered in declaration order so slots stay
/// stable. Returns how many textures were registered.
pub async fn load_scene_textures(
    scene: &mut SceneManager<texture::Texture>,
    asset_root: &Path,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> usize {
    let sources = scene.texture_sources().to_vec();
    let loads = sources
        .iter()
        .map(|source| load_texture(asset_root, &source.file, device, queue));
    let results = futures::future::join_all(loads).await;

    sources
        .iter()
        .zip(results)
        .map(|(source, result)| scene.register_loaded(&source.tag, result))
        .filter(|loaded| *loaded)
        .count()
}
