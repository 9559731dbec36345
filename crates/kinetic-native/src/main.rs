use std::sync::Arc;
use std::time::Instant;
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

use kinetic_core::render::{PointCloudRenderer, PointFrame};
use kinetic_core::{command_for_key, GestureMailbox, Scene, SessionConfig, TITLE};

mod bridge;

struct GpuState<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: PointCloudRenderer,
}

impl<'w> GpuState<'w> {
    async fn new(window: &'w winit::window::Window, capacity: usize) -> anyhow::Result<Self> {
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
        log::info!("[gpu] adapter: {}", adapter.get_info().name);
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

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .first()
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let renderer = PointCloudRenderer::new(&device, format, capacity);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    fn render(&mut self, scene: &Scene, tau: f64) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.renderer.render(
            &self.device,
            &self.queue,
            &view,
            &PointFrame {
                positions: scene.positions(),
                view_proj: scene.view_proj(),
                color: scene.color_at(tau),
                viewport: [self.config.width, self.config.height],
            },
        );
        frame.present();
        Ok(())
    }
}

#[derive(Default)]
struct PointerState {
    dragging: bool,
    last: Option<(f64, f64)>,
}

fn key_name(key: &Key) -> Option<&str> {
    match key {
        Key::Character(s) => Some(s.as_str()),
        Key::Named(NamedKey::Tab) => Some("Tab"),
        _ => None,
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = SessionConfig::from_env().unwrap_or_else(|e| {
        log::error!("[config] {e}; using defaults");
        SessionConfig::default()
    });

    // Shared latest-gesture register between the stdin bridge and the frame loop
    let mailbox = Arc::new(GestureMailbox::new());
    let _bridge = bridge::spawn_stdin_bridge(Arc::clone(&mailbox));

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new().with_title(TITLE).build(&event_loop)?;

    let mut rng = rand::thread_rng();
    let size = window.inner_size();
    let mut scene = Scene::new(&config, mailbox, size.width, size.height, &mut rng);
    let mut state = pollster::block_on(GpuState::new(&window, scene.system().len()))?;
    let start = Instant::now();
    let mut pointer = PointerState::default();
    let mut title = String::new();

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => {
                state.resize(size);
                scene.set_viewport(size.width, size.height);
            }
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::KeyboardInput { event: key, .. } if key.state == ElementState::Pressed => {
                if key.logical_key == Key::Named(NamedKey::Escape) {
                    elwt.exit();
                } else if let Some(cmd) = key_name(&key.logical_key).and_then(command_for_key) {
                    scene.apply(cmd, &mut rng);
                }
            }
            WindowEvent::MouseInput {
                state: button_state,
                button: MouseButton::Left,
                ..
            } => {
                pointer.dragging = button_state == ElementState::Pressed;
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let (true, Some((lx, ly))) = (pointer.dragging, pointer.last) {
                    scene
                        .camera_mut()
                        .orbit((position.x - lx) as f32, (position.y - ly) as f32);
                }
                pointer.last = Some((position.x, position.y));
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let notches = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / 40.0,
                };
                scene.camera_mut().zoom(notches);
            }
            _ => {}
        },
        Event::AboutToWait => {
            let tau = start.elapsed().as_secs_f64();
            scene.advance(tau);
            let status = scene.status_line();
            if status != title {
                state.window.set_title(&status);
                title = status;
            }
            match state.render(&scene, tau) {
                Ok(_) => state.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost) => state.resize(state.window.inner_size()),
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(e) => log::warn!("[gpu] frame skipped: {e:?}"),
            }
        }
        _ => {}
    })?;
    Ok(())
}
