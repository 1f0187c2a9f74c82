//! Application event loop.
//!
//! The [`App`] owns the tokio runtime used to drive the async GPU setup and the
//! [`Context`] once a window exists. Each redraw it applies the camera input
//! gathered since the last frame and draws the scene in descriptor order.
//!
//! Controls: WASD/arrow keys move, Q/E (or Shift/Space) move down/up, dragging
//! with the right mouse button looks around, Escape closes the window.

use std::iter;

use instant::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use crate::{config::RoomConfig, context::Context};

pub struct App {
    async_runtime: tokio::runtime::Runtime,
    room: RoomConfig,
    ctx: Option<Context>,
    is_surface_configured: bool,
    look_around: bool,
    last_time: Instant,
    error: Option<anyhow::Error>,
}

impl App {
    pub fn new(room: RoomConfig) -> anyhow::Result<Self> {
        let async_runtime = tokio::runtime::Runtime::new()?;
        Ok(Self {
            async_runtime,
            room,
            ctx: None,
            is_surface_configured: false,
            look_around: false,
            last_time: Instant::now(),
            error: None,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.error = Some(error);
        event_loop.exit();
    }

    fn resize(&mut self, width: u32, height: u32) {
        if let Some(ctx) = &mut self.ctx {
            if width > 0 && height > 0 {
                ctx.resize(width, height);
                self.is_surface_configured = true;
            }
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let Some(ctx) = &mut self.ctx else {
            return Ok(());
        };
        // keep the render loop going
        ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        let dt = self.last_time.elapsed();
        self.last_time = Instant::now();
        ctx.renderer.update_camera(&ctx.queue, dt);

        let output = ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        ctx.renderer
            .draw(&mut encoder, &view, ctx.renderer.depth_view());
        ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

impl ApplicationHandler<()> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.ctx.is_some() {
            return;
        }
        let window_attributes = Window::default_attributes()
            .with_title(self.room.window_title.clone())
            .with_inner_size(PhysicalSize::new(self.room.width, self.room.height));
        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => std::sync::Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };

        let ctx = self
            .async_runtime
            .block_on(Context::new(window, &self.room));
        match ctx {
            Ok(ctx) => {
                let size = ctx.window.inner_size();
                self.ctx = Some(ctx);
                self.resize(size.width, size.height);
                self.last_time = Instant::now();
                if let Some(ctx) = &self.ctx {
                    ctx.window.request_redraw();
                }
            }
            Err(e) => self.fail(event_loop, e.context("App initialization failed")),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let Some(ctx) = &mut self.ctx else {
            return;
        };
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            if self.look_around {
                ctx.renderer.camera.controller.handle_mouse(dx, dy);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(ctx) = &mut self.ctx else {
            return;
        };
        ctx.renderer.camera.controller.handle_window_events(&event);

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => self.resize(size.width, size.height),
            WindowEvent::MouseInput {
                state: button_state,
                button: MouseButton::Right,
                ..
            } => self.look_around = button_state.is_pressed(),
            WindowEvent::RedrawRequested => match self.render() {
                Ok(()) => {}
                // Reconfigure the surface if it's lost or outdated
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    if let Some(ctx) = &self.ctx {
                        let size = ctx.window.inner_size();
                        self.resize(size.width, size.height);
                    }
                }
                Err(e) => {
                    log::error!("Unable to render {}", e);
                }
            },
            _ => {}
        }
    }
}

/// Start logging at `warn` unless `RUST_LOG` says otherwise.
///
/// Call this before reading the configuration so its warnings are printed.
pub fn init_logger() {
    let env = env_logger::Env::default().default_filter_or("warn");
    if let Err(e) = env_logger::Builder::from_env(env).try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };
}

/// Open the window and run the living room until it is closed.
pub fn run(room: RoomConfig) -> anyhow::Result<()> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new(room)?;
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
