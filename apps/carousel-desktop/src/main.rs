use anyhow::{Context, Result};
use carousel_assets::{ImageId, ImageStore, Manifest};
use carousel_input::{Action, PointerTracker, TouchPhase, WheelDelta, normalize_wheel};
use carousel_kernel::{DEFAULT_RESIZE_DEBOUNCE, Debouncer, Slider, SliderConfig, WrapTrigger};
use carousel_render::{
    PlaneBackend, RenderView, push_image_size, push_layout_uniforms, push_transforms,
};
use carousel_render_wgpu::{FrameTarget, PerspectiveCamera, WgpuRenderer};
use carousel_tools::SliderInspector;
use clap::{Parser, ValueEnum};
use egui::Context as EguiContext;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

const INITIAL_SIZE: PhysicalSize<u32> = PhysicalSize::new(1280, 720);

#[derive(Parser)]
#[command(name = "carousel-desktop", about = "Infinite image carousel")]
struct Cli {
    /// Slide manifest (.json, .yaml or .yml)
    #[arg(short, long)]
    manifest: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Override the easing factor
    #[arg(long)]
    ease: Option<f64>,

    /// Override the background drift per frame
    #[arg(long)]
    drift_step: Option<f64>,

    /// Override the wrap trigger
    #[arg(long, value_enum)]
    wrap: Option<WrapArg>,

    /// Resize debounce in milliseconds
    #[arg(long, default_value_t = DEFAULT_RESIZE_DEBOUNCE.as_millis() as u64)]
    resize_debounce_ms: u64,
}

#[derive(Clone, Copy, ValueEnum)]
enum WrapArg {
    Boundary,
    Threshold,
}

impl From<WrapArg> for WrapTrigger {
    fn from(arg: WrapArg) -> Self {
        match arg {
            WrapArg::Boundary => WrapTrigger::Boundary,
            WrapArg::Threshold => WrapTrigger::Threshold,
        }
    }
}

impl Cli {
    fn slider_config(&self, mut config: SliderConfig) -> SliderConfig {
        if let Some(ease) = self.ease {
            config.ease = ease;
        }
        if let Some(drift_step) = self.drift_step {
            config.drift_step = drift_step;
        }
        if let Some(wrap) = self.wrap {
            config.wrap = wrap.into();
        }
        config
    }
}

/// Application state.
struct AppState {
    slider: Slider,
    images: ImageStore,
    slide_images: Vec<ImageId>,
    view: RenderView,
    camera: PerspectiveCamera,
    pointer: PointerTracker,
    resize: Debouncer<PhysicalSize<u32>>,
    show_inspector: bool,
}

impl AppState {
    fn new(
        slider: Slider,
        images: ImageStore,
        slide_images: Vec<ImageId>,
        resize_debounce: Duration,
    ) -> Self {
        let view = RenderView::default();
        let mut camera = PerspectiveCamera::from_view(&view);
        camera.set_aspect(INITIAL_SIZE.width, INITIAL_SIZE.height);
        Self {
            slider,
            images,
            slide_images,
            view,
            camera,
            pointer: PointerTracker::new(),
            resize: Debouncer::new(resize_debounce),
            show_inspector: false,
        }
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if !pressed {
            return;
        }
        if key == KeyCode::F1 {
            self.show_inspector = !self.show_inspector;
        }
    }

    fn apply(&mut self, action: Action) {
        if !action.is_noop() {
            self.slider.apply(&action);
        }
    }

    /// Recompute layout for a settled surface size. A degenerate size keeps
    /// the previous layout.
    fn relayout<B: PlaneBackend>(&mut self, size: PhysicalSize<u32>, backend: &mut B) {
        let Some(viewport) = self.view.viewport_for_surface(size.width, size.height) else {
            tracing::debug!(
                width = size.width,
                height = size.height,
                "zero-sized surface, layout kept"
            );
            push_layout_uniforms(&self.slider, backend);
            return;
        };
        match self.slider.resize(viewport) {
            Ok(()) => {
                self.camera.set_aspect(size.width, size.height);
                tracing::info!(
                    width = size.width,
                    height = size.height,
                    viewport_width = viewport.width,
                    "layout recomputed"
                );
            }
            Err(e) => tracing::warn!("resize ignored: {e}"),
        }
        push_layout_uniforms(&self.slider, backend);
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        if !self.show_inspector {
            return;
        }

        let summary = SliderInspector::summary(&self.slider);

        egui::SidePanel::left("inspector")
            .default_width(280.0)
            .show(ctx, |ui| {
                ui.heading("Carousel");
                ui.separator();
                ui.label(format!("Frame: {}  Slides: {}", summary.frame, summary.slides));
                ui.label(format!(
                    "Current: {:.3}  Target: {:.3}",
                    summary.current, summary.target
                ));
                ui.label(format!(
                    "Direction: {:?}{}",
                    summary.direction,
                    if summary.dragging { "  (dragging)" } else { "" }
                ));
                ui.label(format!(
                    "Item: {:.3}  Track: {:.3}",
                    summary.item_width, summary.track_width
                ));
                ui.label(format!(
                    "Viewport: {:.2} x {:.2}",
                    summary.viewport[0], summary.viewport[1]
                ));
                ui.label(format!("Wrap: {:?}", summary.wrap));
                ui.separator();

                ui.heading("Motion");
                let mut ease = self.slider.scroll().ease;
                if ui
                    .add(egui::Slider::new(&mut ease, 0.005..=1.0).text("ease"))
                    .changed()
                {
                    if let Err(e) = self.slider.set_ease(ease) {
                        tracing::warn!("{e}");
                    }
                }
                let mut drift = self.slider.scroll().drift_step;
                if ui
                    .add(egui::Slider::new(&mut drift, 0.0..=0.2).text("drift"))
                    .changed()
                {
                    if let Err(e) = self.slider.set_drift_step(drift) {
                        tracing::warn!("{e}");
                    }
                }

                ui.separator();
                ui.heading("Items");
                for info in SliderInspector::list_items(&self.slider) {
                    ui.monospace(info.to_string());
                }

                ui.separator();
                ui.small("F1: Toggle Inspector | Wheel / Drag: Scroll");
            });
    }
}

/// Window and GPU resources, created on resume.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

struct GpuApp {
    state: AppState,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
}

impl GpuApp {
    fn new(state: AppState) -> Self {
        Self {
            state,
            gpu: None,
            egui_ctx: EguiContext::default(),
        }
    }

    fn init_gpu(&mut self, event_loop: &ActiveEventLoop) -> Result<Gpu> {
        let attrs = Window::default_attributes()
            .with_title("Planar Carousel")
            .with_inner_size(INITIAL_SIZE);
        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);
        self.state.pointer.set_scale_factor(window.scale_factor());

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("find adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("carousel_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("create device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let mut renderer = WgpuRenderer::new(
            &device,
            surface_format,
            size.width,
            size.height,
            self.state.view.clear_color,
        );

        for &id in &self.state.slide_images {
            let image = self
                .state
                .images
                .get(id)
                .with_context(|| format!("image {id} missing from store"))?;
            let plane =
                renderer.add_plane(&device, &queue, &image.rgba, image.width, image.height);
            push_image_size(&mut renderer, plane, image.width, image.height);
        }

        // The slider was laid out for the requested size; the real one may differ.
        self.state.relayout(size, &mut renderer);

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            backend = adapter.get_info().backend.to_str(),
            planes = renderer.plane_count(),
            "GPU initialized"
        );

        Ok(Gpu {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn redraw(&mut self) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };

        self.state.slider.update();
        for event in self.state.slider.drain_events() {
            tracing::debug!(
                frame = event.frame,
                index = event.index,
                from = event.from_base_x,
                to = event.to_base_x,
                current = event.current,
                "slide wrapped"
            );
        }
        push_transforms(&self.state.slider, &mut gpu.renderer);

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
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

        gpu.renderer.render_frame(FrameTarget {
            device: &gpu.device,
            queue: &gpu.queue,
            view: &view,
            camera: &self.state.camera,
        });

        let raw_input = gpu.egui_winit.take_egui_input(&gpu.window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            self.state.draw_ui(ctx);
        });

        gpu.egui_winit
            .handle_platform_output(&gpu.window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            gpu.egui_renderer
                .update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        gpu.egui_renderer.update_buffers(
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
            gpu.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        gpu.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            gpu.egui_renderer.free_texture(id);
        }

        output.present();
        gpu.window.request_redraw();
    }
}

fn wheel_delta(delta: MouseScrollDelta) -> WheelDelta {
    // winit reports positive y for scrolling up; the slider expects the
    // browser convention.
    match delta {
        MouseScrollDelta::LineDelta(x, y) => WheelDelta::Line {
            x: -f64::from(x),
            y: -f64::from(y),
        },
        MouseScrollDelta::PixelDelta(p) => WheelDelta::Pixel { x: -p.x, y: -p.y },
    }
}

fn touch_phase(phase: winit::event::TouchPhase) -> TouchPhase {
    match phase {
        winit::event::TouchPhase::Started => TouchPhase::Started,
        winit::event::TouchPhase::Moved => TouchPhase::Moved,
        winit::event::TouchPhase::Ended => TouchPhase::Ended,
        winit::event::TouchPhase::Cancelled => TouchPhase::Cancelled,
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        match self.init_gpu(event_loop) {
            Ok(gpu) => self.gpu = Some(gpu),
            Err(e) => {
                tracing::error!("GPU initialization failed: {e:#}");
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
        if let Some(gpu) = &mut self.gpu {
            let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.config.width = new_size.width.max(1);
                    gpu.config.height = new_size.height.max(1);
                    gpu.surface.configure(&gpu.device, &gpu.config);
                    gpu.renderer
                        .resize(&gpu.device, gpu.config.width, gpu.config.height);
                }
                if new_size.width == 0 || new_size.height == 0 {
                    tracing::debug!("window minimized, relayout skipped");
                    self.state.resize.cancel();
                } else {
                    self.state.resize.schedule(Instant::now(), new_size);
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
                self.state
                    .handle_key(key, key_state == ElementState::Pressed);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let wheel = normalize_wheel(wheel_delta(delta));
                self.state.apply(Action::Wheel(wheel));
            }
            WindowEvent::CursorMoved { position, .. } => {
                let action = self.state.pointer.cursor_moved(position.x);
                self.state.apply(action);
            }
            WindowEvent::CursorLeft { .. } => {
                self.state.pointer.cursor_left();
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: btn_state,
                ..
            } => {
                let action = self.state.pointer.button(btn_state == ElementState::Pressed);
                self.state.apply(action);
            }
            WindowEvent::Touch(touch) => {
                let action =
                    self.state
                        .pointer
                        .touch(touch.id, touch_phase(touch.phase), touch.location.x);
                self.state.apply(action);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.state.pointer.set_scale_factor(scale_factor);
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(size) = self.state.resize.poll(Instant::now()) {
            if let Some(gpu) = &mut self.gpu {
                self.state.relayout(size, &mut gpu.renderer);
            }
        }
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

    tracing::info!("carousel-desktop starting");

    let manifest = Manifest::load(&cli.manifest)
        .with_context(|| format!("loading {}", cli.manifest.display()))?;
    let base = cli
        .manifest
        .parent()
        .map(PathBuf::from)
        .unwrap_or_default();
    let mut images = ImageStore::new();
    let slide_images = images.load_manifest(&manifest, &base)?;

    let config = cli.slider_config(manifest.options.clone());
    let view = RenderView::default();
    let slider = Slider::new(
        slide_images.len(),
        view.viewport_for_surface(INITIAL_SIZE.width, INITIAL_SIZE.height)
            .context("initial window size is empty")?,
        config,
    )?;

    let state = AppState::new(
        slider,
        images,
        slide_images,
        Duration::from_millis(cli.resize_debounce_ms),
    );

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(state);
    event_loop.run_app(&mut app)?;

    Ok(())
}
