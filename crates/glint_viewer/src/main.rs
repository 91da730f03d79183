use anyhow::Result;
use glint_core::{Camera, ControlConfig, Controller, InputState, Key, Rgb, Scene};
use glint_renderer::{FrameScheduler, Framebuffer, RenderConfig};
use pixels::{Pixels, SurfaceTexture};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize},
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window, WindowId},
};

/// Window settings for the viewer.
#[derive(Debug, Clone, PartialEq)]
struct ViewerConfig {
    title: String,
    width: u32,
    height: u32,
    controls: ControlConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "Glint".to_string(),
            width: 500,
            height: 500,
            controls: ControlConfig::default(),
        }
    }
}

/// Frames-per-second counter, reported to the log once a second
#[derive(Debug, Default)]
struct FpsCounter {
    frame_count: u32,
    timer: f64,
}

impl FpsCounter {
    /// Count one frame. Returns the average FPS whenever a full second has passed.
    fn update(&mut self, delta_time: f64) -> Option<f64> {
        self.frame_count += 1;
        self.timer += delta_time;

        if self.timer >= 1.0 {
            let fps = self.frame_count as f64 / self.timer;
            self.frame_count = 0;
            self.timer = 0.0;
            return Some(fps);
        }
        None
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    Some(match code {
        KeyCode::KeyW => Key::W,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyD => Key::D,
        KeyCode::Space => Key::Space,
        KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyE => Key::E,
        KeyCode::ArrowUp => Key::Up,
        KeyCode::ArrowDown => Key::Down,
        KeyCode::ArrowLeft => Key::Left,
        KeyCode::ArrowRight => Key::Right,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyT => Key::T,
        KeyCode::KeyP => Key::P,
        KeyCode::KeyJ => Key::J,
        KeyCode::KeyL => Key::L,
        KeyCode::Escape => Key::Escape,
        _ => return None,
    })
}

/// Copy `0x00RRGGBB` pixels into an RGBA8 frame.
fn blit_rgba(src: &[u32], dst: &mut [u8]) {
    for (&packed, rgba) in src.iter().zip(dst.chunks_exact_mut(4)) {
        let Rgb { r, g, b } = Rgb::unpack(packed);
        rgba.copy_from_slice(&[r, g, b, 0xFF]);
    }
}

/// Grab and hide the cursor while mouse-look is on, release it otherwise.
fn apply_cursor_lock(window: &Window, locked: bool) {
    let grabbed = if locked {
        window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
    } else {
        window.set_cursor_grab(CursorGrabMode::None)
    };
    if let Err(e) = grabbed {
        log::warn!("Cursor grab failed: {}", e);
    }
    window.set_cursor_visible(!locked);
}

/// Put the cursor back in the middle of the window.
fn recenter_cursor(window: &Window) {
    let size = window.inner_size();
    let centre = PhysicalPosition::new(f64::from(size.width) / 2.0, f64::from(size.height) / 2.0);
    if let Err(e) = window.set_cursor_position(centre) {
        log::trace!("Cursor recentre unavailable: {}", e);
    }
}

/// Application state
struct App {
    config: ViewerConfig,
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,

    framebuffer: Framebuffer,
    scheduler: FrameScheduler,
    scene: Scene,
    camera: Camera,
    controller: Controller,

    // Input gathered between frames
    held: HashSet<Key>,
    pressed: HashSet<Key>,
    mouse_delta: (f64, f64),
    focused: bool,

    last_frame_time: Instant,
    fps: FpsCounter,
}

impl App {
    fn new(config: ViewerConfig) -> Result<Self> {
        let scheduler = FrameScheduler::new(RenderConfig::default())?;
        let controller = Controller::new(config.controls.clone());
        let framebuffer = Framebuffer::new(config.width as usize, config.height as usize);

        Ok(Self {
            config,
            window: None,
            pixels: None,
            framebuffer,
            scheduler,
            scene: Scene::reference(),
            camera: Camera::default(),
            controller,
            held: HashSet::new(),
            pressed: HashSet::new(),
            mouse_delta: (0.0, 0.0),
            focused: true,
            last_frame_time: Instant::now(),
            fps: FpsCounter::default(),
        })
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(event_loop.create_window(attrs)?);

        let size = window.inner_size();
        let surface = SurfaceTexture::new(size.width, size.height, window.clone());
        let pixels = Pixels::new(size.width, size.height, surface)?;

        self.framebuffer.resize(size.width as usize, size.height as usize);
        apply_cursor_lock(&window, self.controller.cursor_locked());

        self.window = Some(window);
        self.pixels = Some(pixels);
        self.last_frame_time = Instant::now();

        log::info!("Window opened: {}x{}", size.width, size.height);
        Ok(())
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        let (width, height) = (size.width, size.height);
        if !self.framebuffer.resize(width as usize, height as usize) {
            return;
        }
        log::info!("Resized to {}x{}", width, height);

        if width == 0 || height == 0 {
            return;
        }
        if let Some(pixels) = &mut self.pixels {
            if let Err(e) = pixels.resize_surface(width, height) {
                log::error!("Surface resize failed: {}", e);
            }
            if let Err(e) = pixels.resize_buffer(width, height) {
                log::error!("Buffer resize failed: {}", e);
            }
        }
    }

    fn keyboard_input(&mut self, event: &KeyEvent) {
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        let Some(key) = map_key(code) else {
            return;
        };
        match event.state {
            ElementState::Pressed => {
                self.held.insert(key);
                if !event.repeat {
                    self.pressed.insert(key);
                }
            }
            ElementState::Released => {
                self.held.remove(&key);
            }
        }
    }

    /// Snapshot the input gathered since the previous frame.
    fn take_input(&mut self, dt: f64) -> InputState {
        InputState {
            held: self.held.clone(),
            pressed: std::mem::take(&mut self.pressed),
            mouse_delta: std::mem::take(&mut self.mouse_delta),
            dt,
        }
    }

    fn redraw(&mut self) -> Result<()> {
        let now = Instant::now();
        let delta_time = (now - self.last_frame_time).as_secs_f64();
        self.last_frame_time = now;

        if let Some(fps) = self.fps.update(delta_time) {
            log::info!("{:.1} fps", fps);
        }

        let input = self.take_input(delta_time);
        let was_locked = self.controller.cursor_locked();
        self.controller.apply(&input, &mut self.camera, &mut self.scene);
        let locked = self.controller.cursor_locked();

        let (Some(window), Some(pixels)) = (&self.window, &mut self.pixels) else {
            return Ok(());
        };
        if locked != was_locked {
            apply_cursor_lock(window, locked);
        }
        if locked && self.focused {
            recenter_cursor(window);
        }

        self.scheduler.render(&self.scene, &self.camera, &mut self.framebuffer)?;
        if self.framebuffer.pixels().is_empty() {
            // Minimised: nothing to present
            return Ok(());
        }

        blit_rgba(self.framebuffer.pixels(), pixels.frame_mut());
        pixels.render()?;
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init_window(event_loop) {
                log::error!("Failed to open window: {:#}", e);
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
                log::info!("Close requested");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => self.resize(size),
            WindowEvent::Focused(focused) => {
                self.focused = focused;
                if !focused {
                    // Releases are not delivered to an unfocused window
                    self.held.clear();
                } else if let Some(window) = &self.window {
                    apply_cursor_lock(window, self.controller.cursor_locked());
                }
            }
            WindowEvent::KeyboardInput { event, .. } => self.keyboard_input(&event),
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw() {
                    log::error!("Render error: {:#}", e);
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        // Raw motion keeps arriving when the grabbed cursor sits at the window edge
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.focused && self.controller.cursor_locked() {
                self.mouse_delta.0 += delta.0;
                self.mouse_delta.1 += delta.1;
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting Glint");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(ViewerConfig::default())?;
    event_loop.run_app(&mut app)?;

    log::info!("Window closed");
    Ok(())
}
