use std::sync::Arc;

use anyhow::Context as _;
use winit::window::Window;

use crate::{
    config::RoomConfig,
    data_structures::texture::Texture,
    render::SceneRenderer,
    resources::texture::load_scene_textures,
    scene::{SceneManager, living_room::living_room},
};

/// Central GPU and window state: surface, device, queue, the prepared scene and its renderer.
pub struct Context {
    pub(crate) window: Arc<Window>,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub scene: SceneManager<Texture>,
    pub renderer: SceneRenderer,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.config)
            .field("objects", &self.scene.objects().len())
            .field("textures", &self.scene.textures().len())
            .finish()
    }
}

pub fn mk_instance() -> wgpu::Instance {
    wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::PRIMARY,
        ..Default::default()
    })
}

/// Request an adapter (compatible with `surface` if given) and open a device on it.
pub async fn request_device(
    instance: &wgpu::Instance,
    surface: Option<&wgpu::Surface<'_>>,
) -> anyhow::Result<(wgpu::Adapter, wgpu::Device, wgpu::Queue)> {
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: surface,
            force_fallback_adapter: false,
        })
        .await
        .context("No suitable graphics adapter found")?;
    log::info!("Using adapter {:?}", adapter.get_info().name);

    let (device, queue) = adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: Default::default(),
            trace: wgpu::Trace::Off,
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
        })
        .await
        .context("Could not open the graphics device")?;
    Ok((adapter, device, queue))
}

impl Context {
    pub async fn new(window: Arc<Window>, room: &RoomConfig) -> anyhow::Result<Self> {
        let size = window.inner_size();

        log::debug!("WGPU setup");
        let instance = mk_instance();
        let surface = instance
            .create_surface(window.clone())
            .context("Could not create a surface for the window")?;
        let (adapter, device, queue) = request_device(&instance, Some(&surface)).await?;

        let surface_caps = surface.get_capabilities(&adapter);
        // The shader writes linear colours and relies on an sRGB surface for the conversion.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("The surface reports no supported formats")?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps
                .present_modes
                .first()
                .copied()
                .unwrap_or(wgpu::PresentMode::Fifo),
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        let mut scene = SceneManager::new(living_room())?;
        let loaded = load_scene_textures(&mut scene, &room.asset_root, &device, &queue).await;
        if loaded < scene.texture_sources().len() {
            log::warn!(
                "Only {loaded} of {} textures were loaded from {}",
                scene.texture_sources().len(),
                room.asset_root.display()
            );
        }

        let renderer = SceneRenderer::new(
            &device,
            &queue,
            config.format,
            (config.width, config.height),
            &scene,
            room,
        )?;

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            scene,
            renderer,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.renderer.resize(&self.device, &self.queue, width, height);
    }
}
