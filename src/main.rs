use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use hero_scene::cli::Cli;
use hero_scene::config::Settings;
use hero_scene::core::{Clock, FrameScheduler, RenderLoop};
use hero_scene::renderer::SceneRenderer;
use hero_scene::scenes::create_hero_scene;

const FPS_UPDATE_INTERVAL: f32 = 1.0;

#[derive(Default)]
struct FpsCounter {
    frame_count: u32,
    timer: f32,
}

impl FpsCounter {
    /// Returns the average rate once per interval
    fn update(&mut self, delta: f32) -> Option<f32> {
        self.frame_count += 1;
        self.timer += delta;

        if self.timer < FPS_UPDATE_INTERVAL {
            return None;
        }
        let fps = self.frame_count as f32 / self.timer;
        self.frame_count = 0;
        self.timer = 0.0;
        Some(fps)
    }
}

struct App {
    settings: Settings,
    window: Option<Arc<Window>>,
    renderer: Option<SceneRenderer>,
    clock: Clock,
    scheduler: FrameScheduler,
    render_loop: RenderLoop,
    fps: FpsCounter,
}

impl App {
    fn new(settings: Settings) -> Self {
        let mut scheduler = FrameScheduler::new();
        let render_loop = RenderLoop::mount(create_hero_scene(&settings), &mut scheduler);

        Self {
            settings,
            window: None,
            renderer: None,
            clock: Clock::new(),
            scheduler,
            render_loop,
            fps: FpsCounter::default(),
        }
    }

    fn create_window(&self, event_loop: &ActiveEventLoop) -> Result<Arc<Window>> {
        let window = &self.settings.window;
        let attributes = Window::default_attributes()
            .with_title(window.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(window.width, window.height))
            .with_transparent(self.settings.transparent);

        let window = event_loop
            .create_window(attributes)
            .context("failed to create window")?;
        Ok(Arc::new(window))
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let frame = self.clock.tick();
        if let Some(fps) = self.fps.update(frame.delta) {
            log::info!("FPS: {:.1}", fps);
        }

        self.scheduler.tick(&frame);

        let Some(renderer) = &mut self.renderer else {
            return;
        };

        let scene = self.render_loop.scene();
        match renderer.render(&scene.frame_graph()) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost or outdated, reconfiguring");
                renderer.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("surface out of memory, exiting");
                event_loop.exit();
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::debug!("surface timeout, frame {} skipped", frame.number);
            }
            Err(e) => log::warn!("render error: {}", e),
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.render_loop.teardown(&mut self.scheduler);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match self.create_window(event_loop) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{:#}", e);
                self.shutdown(event_loop);
                return;
            }
        };

        // Without a renderer the scene keeps animating, it is just never drawn
        let renderer = {
            let scene = self.render_loop.scene();
            pollster::block_on(SceneRenderer::new(window.clone(), &scene, self.settings.antialias))
        };
        match renderer {
            Ok(renderer) => self.renderer = Some(renderer),
            Err(e) => log::error!("renderer unavailable, continuing without output: {:#}", e),
        }

        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => self.shutdown(event_loop),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn init_logging(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    let settings = Settings::resolve(&cli)?;

    if cli.dump_scene {
        let scene = create_hero_scene(&settings);
        println!("{}", serde_json::to_string_pretty(&scene.describe())?);
        return Ok(());
    }

    log::info!(
        "Portfolio hero scene - {} particles, transparent: {}, seed: {:?}. Escape to quit",
        settings.particle_count,
        settings.transparent,
        settings.seed
    );

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut app = App::new(settings);
    event_loop.run_app(&mut app)?;

    Ok(())
}
