mod scene;

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use prism_render_wgpu::ShadingRenderer;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::scene::Scene;

/// Smallest 2D texture limit requested from the device.
const BASE_TEXTURE_LIMIT: u32 = 2048;

#[derive(Parser)]
#[command(name = "prism-desktop", about = "Prism shading demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Start with lighting enabled
    #[arg(short, long)]
    lighting: bool,
}

/// Device, surface and everything created against them.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: ShadingRenderer,
    scene: Scene,
}

impl Gpu {
    fn new(window: Arc<Window>, lighting: bool) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("creating surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no compatible adapter")?;

        let size = window.inner_size();
        let adapter_limits = adapter.limits();
        let texture_limit = texture_limit_for(
            size.width,
            size.height,
            adapter_limits.max_texture_dimension_2d,
        );
        let required_limits = wgpu::Limits {
            max_texture_dimension_2d: texture_limit,
            ..wgpu::Limits::downlevel_defaults()
        };

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("prism_device"),
                required_features: wgpu::Features::empty(),
                required_limits,
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("creating device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.clamp(1, texture_limit),
            height: size.height.clamp(1, texture_limit),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let mut renderer = ShadingRenderer::new(&device, &queue, surface_format)?;
        renderer.set_lighting(lighting);
        let scene = Scene::new(&device, &queue, &mut renderer)?;

        tracing::info!(
            backend = adapter.get_info().backend.to_str(),
            texture_limit,
            ?surface_format,
            "GPU initialized"
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            scene,
        })
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        let limit = self.device.limits().max_texture_dimension_2d;
        self.config.width = size.width.clamp(1, limit);
        self.config.height = size.height.clamp(1, limit);
        self.surface.configure(&self.device, &self.config);
    }

    fn aspect(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }

    fn redraw(&mut self, dt: f32) {
        self.scene.update(dt);

        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let aspect = self.aspect();
        if let Err(e) = self
            .scene
            .render(&self.device, &self.queue, &mut self.renderer, &view, aspect)
        {
            tracing::error!("render failed: {e:#}");
        }

        output.present();
    }
}

/// Doubles the 2D texture limit from [`BASE_TEXTURE_LIMIT`] until both window
/// dimensions fit, capped at what the adapter supports.
fn texture_limit_for(width: u32, height: u32, adapter_max: u32) -> u32 {
    let needed = width.max(height);
    let mut limit = BASE_TEXTURE_LIMIT;
    while limit < needed && limit < adapter_max {
        limit = limit.saturating_mul(2);
    }
    limit.min(adapter_max.max(BASE_TEXTURE_LIMIT))
}

struct App {
    lighting: bool,
    gpu: Option<Gpu>,
    last_frame: Instant,
}

impl App {
    fn new(lighting: bool) -> Self {
        Self {
            lighting,
            gpu: None,
            last_frame: Instant::now(),
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, key: KeyCode) {
        match key {
            KeyCode::KeyL => {
                self.lighting = !self.lighting;
                if let Some(gpu) = &mut self.gpu {
                    gpu.renderer.set_lighting(self.lighting);
                }
                tracing::info!(lighting = self.lighting, "lighting toggled");
            }
            KeyCode::Escape => event_loop.exit(),
            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Prism")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        match Gpu::new(window, self.lighting) {
            Ok(gpu) => self.gpu = Some(gpu),
            Err(e) => {
                tracing::error!("GPU bring-up failed: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                self.handle_key(event_loop, key);
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = (now - self.last_frame).as_secs_f32().min(0.1);
                self.last_frame = now;

                if let Some(gpu) = &mut self.gpu {
                    gpu.redraw(dt);
                    gpu.window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("prism-desktop starting (L: toggle lighting, Esc: quit)");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(cli.lighting);
    event_loop.run_app(&mut app)?;

    Ok(())
}
