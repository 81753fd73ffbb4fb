mod state;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use egui::Context as EguiContext;
use miplab_assets::AssetCatalog;
use miplab_input::StepMode;
use miplab_kernel::{DEFAULT_BACKGROUND, Lifecycle, Phase, Teardown};
use miplab_render_wgpu::{GpuContext, LabRenderer};
use state::AppState;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

const WINDOW_TITLE: &str = "Mipmapping Lab";

#[derive(Parser)]
#[command(name = "miplab-desktop", about = "Interactive mipmapping and texture filtering lab")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Directory holding the OBJ meshes and PNG textures
    #[arg(long, default_value = "./assets")]
    assets_dir: PathBuf,

    /// Window width in pixels
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Window height in pixels
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Scale camera steps by frame time instead of moving once per frame
    #[arg(long)]
    time_scaled_input: bool,
}

/// GPU-side resources, released in lifecycle order.
#[derive(Default)]
struct Resources {
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    renderer: Option<LabRenderer>,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
}

impl Teardown for Resources {
    fn release_shader(&mut self) {
        if let Some(renderer) = self.renderer.take() {
            renderer.release();
        }
    }

    fn shutdown_gui(&mut self) {
        self.egui_renderer = None;
        self.egui_winit = None;
        tracing::debug!("GUI shut down");
    }

    fn terminate_context(&mut self) {
        self.gpu = None;
        self.window = None;
        tracing::debug!("graphics context terminated");
    }
}

struct GpuApp {
    cli: Cli,
    state: Option<AppState>,
    resources: Resources,
    lifecycle: Lifecycle,
    egui_ctx: EguiContext,
    startup_error: Option<anyhow::Error>,
}

impl GpuApp {
    fn new(cli: Cli) -> Self {
        Self {
            cli,
            state: None,
            resources: Resources::default(),
            lifecycle: Lifecycle::new(),
            egui_ctx: EguiContext::default(),
            startup_error: None,
        }
    }

    fn step_mode(&self) -> StepMode {
        if self.cli.time_scaled_input {
            StepMode::TimeScaled
        } else {
            StepMode::PerFrame
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(self.cli.width, self.cli.height));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );
        self.resources.window = Some(window.clone());

        let size = window.inner_size();
        let gpu = GpuContext::new(window.clone(), size.width, size.height)
            .context("failed to initialize graphics")?;

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&gpu.device, gpu.format(), None, 1, false);

        let catalog = AssetCatalog::load(&self.cli.assets_dir).with_context(|| {
            format!("failed to load assets from {}", self.cli.assets_dir.display())
        })?;
        let (meshes, textures) = catalog.into_parts();

        let renderer = LabRenderer::new(
            &gpu.device,
            &gpu.queue,
            gpu.format(),
            gpu.size(),
            &meshes,
            &textures,
        );

        self.state = Some(AppState::new(meshes, self.step_mode()));
        self.resources.gpu = Some(gpu);
        self.resources.renderer = Some(renderer);
        self.resources.egui_winit = Some(egui_winit);
        self.resources.egui_renderer = Some(egui_renderer);
        self.lifecycle.start()?;
        Ok(())
    }

    fn shutdown(&mut self) {
        if self.lifecycle.shutdown(&mut self.resources) {
            tracing::info!("shut down");
        }
    }

    fn redraw(&mut self) {
        let Self {
            state: Some(state),
            resources:
                Resources {
                    window: Some(window),
                    gpu: Some(gpu),
                    renderer: Some(renderer),
                    egui_winit: Some(egui_winit),
                    egui_renderer: Some(egui_renderer),
                },
            egui_ctx,
            ..
        } = self
        else {
            return;
        };

        let params = state.update(gpu.size());

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.reconfigure();
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

        if let Err(e) = renderer.render(&gpu.device, &gpu.queue, &view, &params, DEFAULT_BACKGROUND)
        {
            tracing::error!("render failed: {e}");
        }

        let raw_input = egui_winit.take_egui_input(window);
        let full_output = egui_ctx.run(raw_input, |ctx| state.draw_ui(ctx));
        egui_winit.handle_platform_output(window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let (width, height) = gpu.size();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            egui_renderer.update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        gpu.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            egui_renderer.free_texture(id);
        }

        output.present();
        window.request_redraw();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.lifecycle.phase() != Phase::Uninitialized {
            return;
        }

        if let Err(e) = self.init(event_loop) {
            tracing::error!("startup failed: {e:#}");
            self.startup_error = Some(e);
            self.shutdown();
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let (Some(egui_winit), Some(window)) =
            (&mut self.resources.egui_winit, &self.resources.window)
        {
            let response = egui_winit.on_window_event(window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("close requested");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.resources.gpu {
                    gpu.resize(new_size.width, new_size.height);
                    let (width, height) = gpu.size();
                    if let Some(renderer) = &mut self.resources.renderer {
                        renderer.resize(&gpu.device, width, height);
                    }
                }
            }
            WindowEvent::Focused(false) => {
                if let Some(state) = &mut self.state {
                    state.release_keys();
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                if let Some(state) = &mut self.state {
                    state.handle_key(key, key_state == ElementState::Pressed);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.resources.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!(assets = %cli.assets_dir.display(), "miplab-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(cli);
    event_loop.run_app(&mut app)?;

    match app.startup_error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
