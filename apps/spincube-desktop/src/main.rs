mod settings;

use anyhow::{Context, Result};
use clap::Parser;
use egui::Context as EguiContext;
use glam::Vec2;
use spincube_core::{RenderLoop, RendererConfig};
use spincube_input::{Gesture, GestureSensitivity, PanRecognizer};
use spincube_render_wgpu::{CubeRenderer, GpuContext, SurfaceTarget, Viewport};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton, Touch, TouchPhase, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

/// Share of the window height used by the cube; the settings panel fills the rest.
const CUBE_VIEW_FRACTION: f32 = 0.65;

#[derive(Parser)]
#[command(name = "spincube-desktop", about = "Spinning textured cube with drag control")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Renderer configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Texture image, overrides the configured path
    #[arg(long)]
    texture: Option<PathBuf>,
}

/// Pixel rectangle of the cube view for a surface of `width` x `height`.
fn cube_viewport(width: u32, height: u32) -> Viewport {
    Viewport {
        width: width.max(1),
        height: ((height as f32 * CUBE_VIEW_FRACTION) as u32).max(1),
    }
}

/// Input stream that owns the active pan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PanSource {
    Mouse,
    Touch(u64),
}

struct AppState {
    config: RendererConfig,
    render_loop: RenderLoop,
    pan: PanRecognizer,
    pan_source: Option<PanSource>,
    /// Last cursor position in logical points.
    cursor: Vec2,
    scale_factor: f64,
    started: Instant,
}

impl AppState {
    fn new(config: RendererConfig) -> Self {
        Self {
            render_loop: RenderLoop::new(&config),
            pan: PanRecognizer::new(GestureSensitivity::default()),
            pan_source: None,
            cursor: Vec2::ZERO,
            scale_factor: 1.0,
            started: Instant::now(),
            config,
        }
    }

    fn now(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    fn to_points(&self, position: PhysicalPosition<f64>) -> Vec2 {
        Vec2::new(
            (position.x / self.scale_factor) as f32,
            (position.y / self.scale_factor) as f32,
        )
    }

    fn apply(&mut self, gesture: Option<Gesture>) {
        match gesture {
            Some(Gesture::Drag { dx, dy }) => self.render_loop.apply_drag(dx, dy),
            Some(Gesture::Fling { vx, vy }) => {
                tracing::debug!(vx, vy, "fling");
                self.render_loop.apply_fling(vx, vy);
            }
            None => {}
        }
    }

    fn pointer_pressed(&mut self, source: PanSource, location: Vec2) {
        if self.pan_source.is_some() {
            return;
        }
        self.pan_source = Some(source);
        let now = self.now();
        self.pan.begin(location, now);
    }

    fn pointer_moved(&mut self, source: PanSource, location: Vec2) {
        if self.pan_source != Some(source) {
            return;
        }
        let now = self.now();
        let gesture = self.pan.update(location, now);
        self.apply(gesture);
    }

    fn pointer_released(&mut self, source: PanSource, location: Vec2) {
        if self.pan_source != Some(source) {
            return;
        }
        self.pan_source = None;
        let now = self.now();
        let gesture = self.pan.end(location, now);
        self.apply(gesture);
    }

    fn pointer_cancelled(&mut self) {
        self.pan_source = None;
        self.pan.cancel();
    }
}

struct GpuApp {
    state: AppState,
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    renderer: Option<CubeRenderer>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
    /// Startup failure, reported from `main` once the loop exits.
    error: Option<anyhow::Error>,
}

impl GpuApp {
    fn new(config: RendererConfig) -> Self {
        Self {
            state: AppState::new(config),
            window: None,
            gpu: None,
            renderer: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title("Spinning Cube")
            .with_inner_size(PhysicalSize::new(720u32, 1080));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let size = window.inner_size();
        let gpu = GpuContext::new(window.clone(), size.width, size.height)
            .context("failed to initialize GPU")?;
        let renderer = CubeRenderer::new(
            &gpu.device,
            gpu.surface_format(),
            size.width,
            size.height,
            &self.state.config,
        );

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer =
            egui_wgpu::Renderer::new(&gpu.device, gpu.surface_format(), None, 1, false);

        self.state.scale_factor = window.scale_factor();
        let viewport = cube_viewport(size.width, size.height);
        self.state.render_loop.resize(viewport.width, viewport.height);

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.renderer = Some(renderer);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);
        Ok(())
    }

    /// Whether a point (logical) lies inside the cube view.
    fn in_cube_view(&self, location: Vec2) -> bool {
        let Some(gpu) = &self.gpu else {
            return false;
        };
        let (width, height) = gpu.size();
        let viewport = cube_viewport(width, height);
        let physical = location * self.state.scale_factor as f32;
        physical.x >= 0.0
            && physical.y >= 0.0
            && physical.x < viewport.width as f32
            && physical.y < viewport.height as f32
    }

    fn redraw(&mut self) {
        let (Some(window), Some(gpu), Some(renderer), Some(egui_winit), Some(egui_renderer)) = (
            self.window.as_ref(),
            self.gpu.as_ref(),
            self.renderer.as_mut(),
            self.egui_winit.as_mut(),
            self.egui_renderer.as_mut(),
        ) else {
            return;
        };

        let (width, height) = gpu.size();
        let viewport = cube_viewport(width, height);
        let now = self.state.now();

        let mut target = SurfaceTarget::new(gpu, renderer, viewport);
        let Some(frame) = self.state.render_loop.render_frame(
            now,
            viewport.width,
            viewport.height,
            &mut target,
        ) else {
            window.request_redraw();
            return;
        };

        let panel_height = (height - viewport.height) as f32;
        let raw_input = egui_winit.take_egui_input(window);
        let state = &mut self.state;
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            let panel_points = panel_height / ctx.pixels_per_point();
            settings::show(
                ctx,
                state.pan.sensitivity_mut(),
                &state.render_loop,
                panel_points,
            );
        });
        egui_winit.handle_platform_output(window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let device = &gpu.device;
        let queue = &gpu.queue;
        for (id, image_delta) in &full_output.textures_delta.set {
            egui_renderer.update_texture(device, queue, *id, image_delta);
        }
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("egui_encoder"),
        });
        egui_renderer.update_buffers(device, queue, &mut encoder, &paint_jobs, &screen_descriptor);
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: frame.view(),
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
        queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            egui_renderer.free_texture(id);
        }

        frame.present();
        window.request_redraw();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            tracing::error!("startup failed: {e:#}");
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        self.state.render_loop.suspend();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // A pan in progress keeps its events even when the pointer is over the panel.
        if let (Some(egui_winit), Some(window)) = (&mut self.egui_winit, &self.window) {
            let response = egui_winit.on_window_event(window, &event);
            if response.consumed && self.state.pan_source.is_none() {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let (Some(gpu), Some(renderer)) = (&mut self.gpu, &mut self.renderer) {
                    gpu.resize(new_size.width, new_size.height);
                    let (width, height) = gpu.size();
                    renderer.resize(&gpu.device, width, height);
                    renderer.mark_texture_dirty();
                    let viewport = cube_viewport(width, height);
                    self.state.render_loop.resize(viewport.width, viewport.height);
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.state.scale_factor = scale_factor;
            }
            WindowEvent::Focused(false) => {
                self.state.pointer_cancelled();
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.state.cursor = self.state.to_points(position);
                let cursor = self.state.cursor;
                self.state.pointer_moved(PanSource::Mouse, cursor);
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: button_state,
                ..
            } => {
                let cursor = self.state.cursor;
                match button_state {
                    ElementState::Pressed if self.in_cube_view(cursor) => {
                        self.state.pointer_pressed(PanSource::Mouse, cursor);
                    }
                    ElementState::Pressed => {}
                    ElementState::Released => {
                        self.state.pointer_released(PanSource::Mouse, cursor);
                    }
                }
            }
            WindowEvent::Touch(Touch {
                phase, location, id, ..
            }) => {
                let point = self.state.to_points(location);
                let source = PanSource::Touch(id);
                match phase {
                    TouchPhase::Started if self.in_cube_view(point) => {
                        self.state.pointer_pressed(source, point);
                    }
                    TouchPhase::Started => {}
                    TouchPhase::Moved => self.state.pointer_moved(source, point),
                    TouchPhase::Ended => self.state.pointer_released(source, point),
                    TouchPhase::Cancelled => {
                        if self.state.pan_source == Some(source) {
                            self.state.pointer_cancelled();
                        }
                    }
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    let mut config = match &cli.config {
        Some(path) => RendererConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => RendererConfig::default(),
    };
    if let Some(texture) = cli.texture {
        config.resources.texture_path = texture;
    }
    config.validate()?;

    tracing::info!(
        texture = %config.resources.texture_path.display(),
        "spincube-desktop starting"
    );

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(config);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
