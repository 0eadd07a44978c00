mod ambient;

use std::sync::Arc;
use std::time::Instant;

use ambient::AmbientBed;
use folio_core::gpu::GpuRenderer;
use folio_core::{
    AudioObserver, AudioStatus, AutoplayEvent, CpuBackend, FrameClock, FrameDriver,
    LandingConfig, PostChain, RenderBackend, RenderParameters, Viewport,
};
use glam::Vec2;
use winit::event::{ElementState, Event, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::Key;
use winit::window::{Window, WindowBuilder};

const SNAPSHOT_SIZE: (u32, u32) = (320, 180);

struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: GpuRenderer,
    attached: bool,
    fatal: bool,
}

impl GpuState {
    async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);
        let renderer = GpuRenderer::new(&device, format, config.width, config.height);
        log::info!("[gpu] adapter={:?} format={:?}", adapter.get_info().name, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            renderer,
            attached: false,
            fatal: false,
        })
    }

    fn configure(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.renderer.resize(&self.device, width, height);
    }
}

impl RenderBackend for GpuState {
    fn attach(&mut self, viewport: Viewport) {
        self.configure(viewport.width, viewport.height);
        self.attached = true;
    }

    fn resize(&mut self, viewport: Viewport) {
        self.configure(viewport.width, viewport.height);
    }

    fn draw(&mut self, params: &RenderParameters, chain: &PostChain) {
        if !self.attached || self.fatal {
            return;
        }
        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("[gpu] out of memory; stopping");
                self.fatal = true;
                return;
            }
            Err(e) => {
                log::warn!("[gpu] skipped frame: {:?}", e);
                return;
            }
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.renderer
            .render(&self.device, &self.queue, &view, params, chain);
        frame.present();
    }

    fn detach(&mut self) {
        self.attached = false;
        log::info!("[gpu] detached");
    }
}

struct StatusLog;

impl AudioObserver for StatusLog {
    fn on_status(&mut self, status: AudioStatus) {
        log::info!("[audio] {status}");
    }
}

/// Command line: an optional `key=value&...` override string and an optional
/// `--snapshot <path>`.
#[derive(Debug, Default, PartialEq)]
struct Args {
    overrides: Option<String>,
    snapshot: Option<String>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Args> {
    let mut out = Args::default();
    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        if arg == "--snapshot" {
            let path = it
                .next()
                .ok_or_else(|| anyhow::anyhow!("--snapshot needs a path"))?;
            out.snapshot = Some(path);
        } else if out.overrides.is_none() {
            out.overrides = Some(arg);
        } else {
            anyhow::bail!("unexpected argument `{arg}`");
        }
    }
    Ok(out)
}

fn load_config(overrides: Option<&str>) -> anyhow::Result<LandingConfig> {
    let mut config = LandingConfig::default();
    if let Some(query) = overrides {
        config.apply_overrides(query)?;
    }
    Ok(config)
}

/// Cursor position in window pixels to the `[-1, 1]` pointer signal, y up.
fn pointer_ndc(x: f64, y: f64, width: u32, height: u32) -> Vec2 {
    if width == 0 || height == 0 {
        return Vec2::ZERO;
    }
    let nx = (x / width as f64) * 2.0 - 1.0;
    let ny = -((y / height as f64) * 2.0 - 1.0);
    Vec2::new(nx as f32, ny as f32).clamp(Vec2::NEG_ONE, Vec2::ONE)
}

/// Render one frame on the CPU, post chain included, and write it as PPM.
fn snapshot(config: &LandingConfig, path: &str) -> anyhow::Result<()> {
    let (w, h) = SNAPSHOT_SIZE;
    let mut driver = FrameDriver::new(CpuBackend::new(w, h), config, Viewport::new(w, h));
    driver.tick(FrameClock::new(0.0, 0.0), Viewport::new(w, h), Vec2::ZERO);
    let frame = driver
        .backend()
        .last_frame()
        .ok_or_else(|| anyhow::anyhow!("snapshot produced no frame"))?;
    std::fs::write(path, frame.to_ppm())?;
    log::info!("[snapshot] wrote {}x{} to {}", w, h, path);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = parse_args(std::env::args().skip(1))?;
    let config = load_config(args.overrides.as_deref())?;
    if let Some(path) = &args.snapshot {
        return snapshot(&config, path);
    }

    let mut audio = AmbientBed::new(config.audio.volume);
    audio.hub_mut().subscribe(Box::new(StatusLog));
    audio.send(AutoplayEvent::Start);

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("folio")
            .build(&event_loop)?,
    );

    let size = window.inner_size();
    let viewport = Viewport {
        width: size.width,
        height: size.height,
        pixel_ratio: window.scale_factor() as f32,
    };
    let gpu = pollster::block_on(GpuState::new(Arc::clone(&window)))?;
    let mut driver = FrameDriver::new(gpu, &config, viewport);

    let mut pointer = Vec2::ZERO;
    let started = Instant::now();
    let mut last = started;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => {
                driver.detach();
                elwt.exit();
            }
            WindowEvent::CursorMoved { position, .. } => {
                let size = window.inner_size();
                pointer = pointer_ndc(position.x, position.y, size.width, size.height);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => audio.send(AutoplayEvent::UserGesture),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Character(c),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } if c.eq_ignore_ascii_case("m") => audio.send(AutoplayEvent::ToggleMute),
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let delta = (now - last).as_secs_f32();
                last = now;
                let size = window.inner_size();
                let viewport = Viewport {
                    width: size.width,
                    height: size.height,
                    pixel_ratio: window.scale_factor() as f32,
                };
                let clock = FrameClock::new((now - started).as_secs_f32(), delta);
                driver.tick(clock, viewport, pointer);
                if driver.backend().fatal {
                    driver.detach();
                    elwt.exit();
                }
            }
            _ => {}
        },
        Event::AboutToWait => window.request_redraw(),
        _ => {}
    })?;
    Ok(())
}
