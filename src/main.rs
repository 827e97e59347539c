use std::collections::HashSet;
use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::{debug, error, info};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use raycaster::config::Args;
use raycaster::scaler::{ScaleLut, blit_nearest, build_scale_lut};
use raycaster::{
    Config, FpsMode, FrameLoop, Framebuffer, GridMap, InputState, LoopState, Pose, SystemClock,
    init_logging,
};

const TITLE: &str = "raycaster";

struct App {
    config: Config,
    window: Option<Rc<Window>>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,

    frame_loop: FrameLoop,
    framebuffer: Framebuffer,
    clock: SystemClock,

    // Window-sized stretch of the framebuffer
    scale_lut: ScaleLut,

    keys_down: HashSet<KeyCode>,
    close_requested: bool,

    // First fatal error seen inside the event loop
    failure: Option<anyhow::Error>,
}

impl App {
    fn new(config: Config, frame_loop: FrameLoop) -> Self {
        let framebuffer = Framebuffer::new(config.width, config.height);
        Self {
            config,
            window: None,
            surface: None,
            frame_loop,
            framebuffer,
            clock: SystemClock,
            scale_lut: ScaleLut::empty(),
            keys_down: HashSet::new(),
            close_requested: false,
            failure: None,
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let scale = self.config.scale as f64;
        let attributes = Window::default_attributes()
            .with_title(TITLE)
            .with_inner_size(LogicalSize::new(
                self.config.width as f64 * scale,
                self.config.height as f64 * scale,
            ));

        let window = Rc::new(
            event_loop
                .create_window(attributes)
                .map_err(|e| anyhow!("failed to create window: {e}"))?,
        );
        let context = softbuffer::Context::new(window.clone())
            .map_err(|e| anyhow!("failed to create softbuffer context: {e}"))?;
        let surface = softbuffer::Surface::new(&context, window.clone())
            .map_err(|e| anyhow!("failed to create softbuffer surface: {e}"))?;

        let size = window.inner_size();
        self.rebuild_lut(size.width as usize, size.height as usize);
        debug!("window created at {}x{}", size.width, size.height);

        self.surface = Some(surface);
        window.request_redraw();
        self.window = Some(window);
        Ok(())
    }

    fn rebuild_lut(&mut self, dst_w: usize, dst_h: usize) {
        self.scale_lut = build_scale_lut(dst_w, dst_h, self.config.width, self.config.height);
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        error!("{err:#}");
        self.failure.get_or_insert(err);
        event_loop.exit();
    }

    /// Runs one frame and presents it.
    fn redraw(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let input = InputState::from_keys(&self.keys_down, self.close_requested);
        let state = self
            .frame_loop
            .frame(&input, &mut self.framebuffer, &mut self.clock);
        if state == LoopState::Terminated {
            info!("stopping");
            event_loop.exit();
            return Ok(());
        }

        self.report_fps();

        let (Some(window), Some(surface)) = (&self.window, &mut self.surface) else {
            return Ok(());
        };

        let size = window.inner_size();
        let (Some(dw), Some(dh)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return Ok(()); // Minimized window, skip presenting
        };
        surface
            .resize(dw, dh)
            .map_err(|e| anyhow!("failed to resize surface: {e}"))?;

        let (dw, dh) = (size.width as usize, size.height as usize);
        if self.scale_lut.dst_size() != (dw, dh) {
            self.scale_lut = build_scale_lut(dw, dh, self.config.width, self.config.height);
        }

        let mut buf = surface
            .buffer_mut()
            .map_err(|e| anyhow!("failed to map surface buffer: {e}"))?;
        blit_nearest(
            &mut buf,
            dw,
            self.framebuffer.pixels(),
            self.framebuffer.width(),
            &self.scale_lut,
        );
        buf.present().map_err(|e| anyhow!("failed to present frame: {e}"))?;

        window.request_redraw();
        Ok(())
    }

    fn report_fps(&mut self) {
        let Some(fps) = self.frame_loop.take_fps() else {
            return;
        };
        match self.config.fps_mode {
            FpsMode::Off => {}
            FpsMode::Console => info!("FPS: {fps:.1}"),
            FpsMode::Overlay => {
                if let Some(window) = &self.window {
                    window.set_title(&format!("{TITLE} - {fps:.1} fps"));
                }
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.create_window(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        if self.window.as_ref().is_none_or(|w| w.id() != id) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                info!("close requested");
                self.close_requested = true;
                if let Err(err) = self.redraw(event_loop) {
                    self.fail(event_loop, err);
                }
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => match state {
                ElementState::Pressed => {
                    self.keys_down.insert(code);
                }
                ElementState::Released => {
                    self.keys_down.remove(&code);
                }
            },

            WindowEvent::Focused(false) => self.keys_down.clear(),

            WindowEvent::RedrawRequested => {
                if let Err(err) = self.redraw(event_loop) {
                    self.fail(event_loop, err);
                }
            }

            WindowEvent::Resized(new_size) => {
                self.rebuild_lut(new_size.width as usize, new_size.height as usize);
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn load_level(config: &Config) -> Result<(GridMap, Pose)> {
    let (map, requested) = match &config.map {
        Some(path) => {
            let parsed = GridMap::load(path)
                .with_context(|| format!("failed to load map {}", path.display()))?;
            (parsed.map, parsed.spawn)
        }
        None => (GridMap::built_in(), None),
    };
    let spawn = map.resolve_spawn(requested)?;
    info!(
        "map {}x{}, spawning at ({:.2}, {:.2})",
        map.width(),
        map.height(),
        spawn[0],
        spawn[1]
    );
    Ok((map, Pose::new(spawn)))
}

fn run(config: Config) -> Result<()> {
    let (map, pose) = load_level(&config)?;
    let frame_loop = FrameLoop::new(
        map,
        pose,
        config.width,
        config.height,
        config.fps_cap,
        Instant::now(),
    );

    let event_loop =
        EventLoop::new().map_err(|e| anyhow!("failed to create event loop: {e}"))?;
    // Redraws are requested continuously, so Wait still renders every frame.
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config, frame_loop);
    event_loop.run_app(&mut app).map_err(|e| anyhow!("event loop failed: {e}"))?;

    match app.failure.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = Config::try_from(args)?;
    info!(
        "viewport {}x{}, fps cap {}, fps display {:?}",
        config.width, config.height, config.fps_cap, config.fps_mode
    );

    run(config)
}
