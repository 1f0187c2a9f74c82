//! Scene rendering.
//!
//! [`SceneRenderer`] uploads one mesh per [`ShapeKind`] and a single instance
//! buffer holding the resolved [`DrawCommand`]s. Every frame it records one render
//! pass that walks the commands in order: draw command `i` is instance `i`, filled
//! first and then outlined when outlines are enabled.
//!
//! The draw list is static, so the instance buffer is written once when the
//! renderer is created.

use std::collections::HashMap;

use anyhow::Context as _;
use bytemuck::Zeroable;
use cgmath::Deg;
use image::RgbaImage;
use instant::Duration;
use wgpu::util::DeviceExt;

use crate::{
    camera::{Camera, CameraController, CameraResources, Projection},
    config::RoomConfig,
    data_structures::{
        instance::InstanceRaw,
        model::{DrawMesh, Mesh},
        shapes::ShapeKind,
        texture::Texture,
    },
    pipelines::{
        basic::{ScenePipelines, mk_scene_pipelines},
        light::LightResources,
    },
    resources::texture::texture_layout,
    scene::{DrawCommand, SceneManager},
};

/// Starting viewpoint: in front of the couch, slightly above the table tops.
pub fn initial_camera() -> Camera {
    Camera::new((0.0, 9.0, 22.0), Deg(-90.0), Deg(-15.0))
}

pub struct SceneRenderer {
    meshes: HashMap<ShapeKind, Mesh>,
    /// Indexed by texture slot.
    texture_bind_groups: Vec<wgpu::BindGroup>,
    fallback_bind_group: wgpu::BindGroup,
    commands: Vec<DrawCommand>,
    instance_buffer: wgpu::Buffer,
    pipelines: ScenePipelines,
    pub camera: CameraResources,
    pub light: LightResources,
    depth_texture: Texture,
    color_format: wgpu::TextureFormat,
    size: (u32, u32),
    pub draw_outlines: bool,
    pub clear_colour: wgpu::Color,
}

impl SceneRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        color_format: wgpu::TextureFormat,
        size: (u32, u32),
        scene: &SceneManager<Texture>,
        config: &RoomConfig,
    ) -> anyhow::Result<Self> {
        let (width, height) = (size.0.max(1), size.1.max(1));

        let meshes: HashMap<_, _> = ShapeKind::ALL
            .iter()
            .map(|shape| (*shape, Mesh::from_data(device, shape.name(), &shape.mesh_data())))
            .collect();

        let texture_bind_group_layout = texture_layout(device);
        let texture_bind_groups = scene
            .textures()
            .iter()
            .map(|entry| {
                entry.handle.bind_group(
                    device,
                    &texture_bind_group_layout,
                    &format!("{} texture_bind_group", entry.tag),
                )
            })
            .collect();
        let fallback = Texture::solid_colour(device, queue, [255; 4], "untextured");
        let fallback_bind_group =
            fallback.bind_group(device, &texture_bind_group_layout, "untextured_bind_group");

        let commands = scene.draw_list();
        let mut instances: Vec<InstanceRaw> = commands.iter().map(|cmd| cmd.instance).collect();
        if instances.is_empty() {
            // zero sized vertex buffers cannot be bound
            instances.push(InstanceRaw::zeroed());
        }
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Scene Instance Buffer"),
            contents: bytemuck::cast_slice(&instances),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let camera = CameraResources::new(
            device,
            initial_camera(),
            Projection::new(width, height, Deg(45.0), 0.1, 100.0),
            CameraController::new(config.camera_speed, config.camera_sensitivity),
        );
        let light = LightResources::new(device, scene.light_uniform());

        let pipelines = mk_scene_pipelines(
            device,
            color_format,
            &texture_bind_group_layout,
            &camera.bind_group_layout,
            &light.bind_group_layout,
        );
        let depth_texture = Texture::create_depth_texture(device, [width, height], "depth_texture");

        log::info!(
            "Renderer ready: {} draw commands, {} textures, {} active lights",
            commands.len(),
            scene.textures().len(),
            light.uniform.active_lights()
        );

        Ok(Self {
            meshes,
            texture_bind_groups,
            fallback_bind_group,
            commands,
            instance_buffer,
            pipelines,
            camera,
            light,
            depth_texture,
            color_format,
            size: (width, height),
            draw_outlines: config.draw_outlines,
            clear_colour: config.clear_colour,
        })
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn color_format(&self) -> wgpu::TextureFormat {
        self.color_format
    }

    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth_texture.view
    }

    pub fn resize(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.size = (width, height);
        self.camera.resize(queue, width, height);
        self.depth_texture = Texture::create_depth_texture(device, [width, height], "depth_texture");
    }

    pub fn update_camera(&mut self, queue: &wgpu::Queue, dt: Duration) {
        self.camera.update(queue, dt);
    }

    fn texture_bind_group(&self, command: &DrawCommand) -> &wgpu::BindGroup {
        command
            .texture_slot
            .and_then(|slot| self.texture_bind_groups.get(slot))
            .unwrap_or(&self.fallback_bind_group)
    }

    /// Record the scene into `color_view`. Clears colour and depth first.
    pub fn draw(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        color_view: &wgpu::TextureView,
        depth_view: &wgpu::TextureView,
    ) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_view,
                resolve_target: None,
                depth_slice: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_colour),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        if self.commands.is_empty() {
            return;
        }
        render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));

        for (i, command) in self.commands.iter().enumerate() {
            let Some(mesh) = self.meshes.get(&command.shape) else {
                log::warn!("no mesh uploaded for {:?}, skipping '{}'", command.shape, command.name);
                continue;
            };
            let instance = i as u32..i as u32 + 1;
            let texture_bind_group = self.texture_bind_group(command);

            render_pass.set_pipeline(&self.pipelines.fill);
            render_pass.draw_mesh_instanced(
                mesh,
                instance.clone(),
                texture_bind_group,
                &self.camera.bind_group,
                &self.light.bind_group,
            );

            if self.draw_outlines && command.outlined {
                render_pass.set_pipeline(&self.pipelines.outline);
                render_pass.draw_mesh_outline(
                    mesh,
                    instance,
                    texture_bind_group,
                    &self.camera.bind_group,
                    &self.light.bind_group,
                );
            }
        }
    }

    /// Render one frame offscreen at the current size and read it back.
    pub async fn render_to_image(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
    ) -> anyhow::Result<RgbaImage> {
        let (width, height) = self.size;
        let extent = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let target = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Offscreen Target"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: self.color_format,
            usage: wgpu::TextureUsages::COPY_SRC | wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let target_view = target.create_view(&wgpu::TextureViewDescriptor::default());

        // Buffer rows have to be a multiple of 256 bytes
        let unpadded_bytes_per_row = 4 * width;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let padded_bytes_per_row = unpadded_bytes_per_row.div_ceil(align) * align;
        let output_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Offscreen Readback Buffer"),
            size: (padded_bytes_per_row * height) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Offscreen Encoder"),
        });
        self.draw(&mut encoder, &target_view, self.depth_view());
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture: &target,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &output_buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_bytes_per_row),
                    rows_per_image: Some(height),
                },
            },
            extent,
        );
        queue.submit(std::iter::once(encoder.finish()));

        let (tx, rx) = futures_intrusive::channel::shared::oneshot_channel();
        let buffer_slice = output_buffer.slice(..);
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            // the receiver only disappears if the caller gave up waiting
            let _ = tx.send(result);
        });
        device
            .poll(wgpu::PollType::Wait {
                submission_index: None,
                timeout: Some(Duration::from_secs(3)),
            })
            .context("Device poll failed while reading back the frame")?;
        rx.receive()
            .await
            .context("Buffer mapping was cancelled")?
            .context("Could not map the readback buffer")?;

        let swap_red_blue = matches!(
            self.color_format,
            wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb
        );
        let mut pixels = Vec::with_capacity((unpadded_bytes_per_row * height) as usize);
        {
            let data = buffer_slice.get_mapped_range();
            for row in data.chunks(padded_bytes_per_row as usize) {
                pixels.extend_from_slice(&row[..unpadded_bytes_per_row as usize]);
            }
        }
        output_buffer.unmap();

        if swap_red_blue {
            for pixel in pixels.chunks_exact_mut(4) {
                pixel.swap(0, 2);
            }
        }
        RgbaImage::from_raw(width, height, pixels)
            .context("Readback buffer does not match the frame size")
    }
}
