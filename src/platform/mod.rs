//=========================================================================
// Platform Subsystem
//
// Backends that implement `core::render::Backend`.
//
// Architecture:
// ```text
//  WinitPlatform (main thread)
//  ┌──────────────────────────────────────────────┐
//  │  poll_events()                               │
//  │   ├─ pump_app_events(timeout = 0)            │
//  │   │    ↓                                      │
//  │   │  PlatformApp (ApplicationHandler)         │
//  │   │   ├─ event_mapper: winit → GameEvent      │
//  │   │   ├─ caches cursor position               │
//  │   │   └─ Sender<GameEvent> ───┐               │
//  │   │                           │ channel       │
//  │   └─ Receiver<GameEvent> <────┘ (drain)       │
//  │                                               │
//  │  Canvas/Assets → PixmapCanvas (tiny-skia)     │
//  │  present()     → softbuffer surface           │
//  └──────────────────────────────────────────────┘
// ```
//
// Key Design Decisions:
// - **Pumped, not run**: the scene stack owns the loop and pumps the OS
//   queue once per frame without blocking
// - **Frame = drain**: every event queued since the previous poll is
//   delivered in one batch, in arrival order
// - **Graceful channel disconnect**: a dropped receiver only logs
//
// `headless` provides the same contract without a window.
//
//=========================================================================

//=== Submodules ==========================================================

mod canvas;
mod event_mapper;
pub mod headless;
mod text;

pub use canvas::PixmapCanvas;

//=== External Crates =====================================================

use std::num::NonZeroU32;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::*;
use softbuffer::{Context, Surface};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::config::GameConfig;
use crate::core::error::CollaboratorError;
use crate::core::geometry::Rect;
use crate::core::input::GameEvent;
use crate::core::render::{Assets, Backend, Canvas, Color, Font, Texture};

//=== PlatformApp =========================================================

/// Outcome of one window event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WindowFlow {
    Continue,
    Close,
}

/// winit application handler.
///
/// Creates the window on `resumed` and turns window events into
/// `GameEvent`s sent over the channel.
struct PlatformApp {
    attributes: WindowAttributes,
    size: (u32, u32),
    window: Option<Rc<Window>>,
    surface: Option<Surface<Rc<Window>, Rc<Window>>>,
    event_sender: Sender<GameEvent>,
    cursor: (i32, i32),
    failure: Option<CollaboratorError>,
}

impl PlatformApp {
    fn new(attributes: WindowAttributes, size: (u32, u32), event_sender: Sender<GameEvent>) -> Self {
        Self {
            attributes,
            size,
            window: None,
            surface: None,
            event_sender,
            cursor: (0, 0),
            failure: None,
        }
    }

    fn send(&self, event: GameEvent) {
        trace!(target: "platform::input", "Queued {:?}", event);
        if self.event_sender.send(event).is_err() {
            warn!(target: "platform::input", "Channel disconnected, dropping {:?}", event);
        }
    }

    /// Creates the window and its presentation surface.
    fn create_window(&self, event_loop: &ActiveEventLoop) -> Result<(Rc<Window>, Surface<Rc<Window>, Rc<Window>>), CollaboratorError> {
        let window = event_loop
            .create_window(self.attributes.clone())
            .map_err(|e| CollaboratorError::Window(e.to_string()))?;
        let window = Rc::new(window);

        let context = Context::new(window.clone()).map_err(|e| CollaboratorError::Window(e.to_string()))?;
        let mut surface =
            Surface::new(&context, window.clone()).map_err(|e| CollaboratorError::Window(e.to_string()))?;

        let (width, height) = self.size;
        let (Some(width), Some(height)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            return Err(CollaboratorError::Window(format!("invalid window size {}x{}", self.size.0, self.size.1)));
        };
        surface
            .resize(width, height)
            .map_err(|e| CollaboratorError::Window(e.to_string()))?;

        Ok((window, surface))
    }

    /// Converts one window event. Cursor motion only updates the cache.
    fn handle(&mut self, event: WindowEvent) -> WindowFlow {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.send(GameEvent::Quit);
                return WindowFlow::Close;
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x as i32, position.y as i32);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                match event_mapper::key_event(event.physical_key, event.state, event.repeat) {
                    Some(event) => self.send(event),
                    None => trace!(target: "platform::input", "Key repeat ignored"),
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(event) = event_mapper::mouse_button_event(button, state, self.cursor) {
                    self.send(event);
                }
            }

            _ => {}
        }
        WindowFlow::Continue
    }
}

impl ApplicationHandler for PlatformApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists");
            return;
        }

        match self.create_window(event_loop) {
            Ok((window, surface)) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                self.window = Some(window);
                self.surface = Some(surface);
            }
            Err(e) => {
                error!(target: "platform", "{}", e);
                self.failure = Some(e);
                self.send(GameEvent::Quit);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if self.handle(event) == WindowFlow::Close {
            event_loop.exit();
        }
    }
}

//=== WinitPlatform =======================================================

/// Windowed backend: winit for the OS window and input, tiny-skia for
/// drawing, softbuffer for presentation.
///
/// Must be created and used on the main thread.
pub struct WinitPlatform {
    event_loop: EventLoop<()>,
    app: PlatformApp,
    events: Receiver<GameEvent>,
    canvas: PixmapCanvas,
}

impl WinitPlatform {
    /// Opens a non-resizable window of the configured physical size.
    ///
    /// # Errors
    ///
    /// Fails when the event loop, the window or its surface cannot be
    /// created.
    pub fn new(config: &GameConfig) -> Result<Self, CollaboratorError> {
        debug!(target: "platform", "Creating winit event loop");
        let event_loop = EventLoop::new().map_err(|e| CollaboratorError::EventLoop(e.to_string()))?;

        let attributes = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(PhysicalSize::new(config.window_width, config.window_height))
            .with_resizable(false);

        let (sender, events) = unbounded();
        let app = PlatformApp::new(attributes, (config.window_width, config.window_height), sender);
        let canvas = PixmapCanvas::new(config.window_width, config.window_height)?;

        let mut platform = Self {
            event_loop,
            app,
            events,
            canvas,
        };

        // The first pump delivers `resumed`, which opens the window.
        platform.pump();
        if let Some(failure) = platform.app.failure.take() {
            return Err(failure);
        }
        if platform.app.window.is_none() {
            return Err(CollaboratorError::Window(String::from("window was not created on startup")));
        }
        Ok(platform)
    }

    fn pump(&mut self) {
        if let PumpStatus::Exit(code) = self.event_loop.pump_app_events(Some(Duration::ZERO), &mut self.app) {
            debug!(target: "platform", "Event loop exited with code {}", code);
        }
    }
}

//--- Canvas/Assets delegation --------------------------------------------

impl Canvas for WinitPlatform {
    fn output_size(&self) -> (i32, i32) {
        self.canvas.output_size()
    }

    fn set_draw_color(&mut self, color: Color) {
        self.canvas.set_draw_color(color);
    }

    fn clear(&mut self) {
        self.canvas.clear();
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.canvas.fill_rect(rect);
    }

    fn copy(&mut self, texture: &Texture, dst: Rect) {
        self.canvas.copy(texture, dst);
    }
}

impl Assets for WinitPlatform {
    fn load_texture(&mut self, path: &Path) -> Result<Texture, CollaboratorError> {
        self.canvas.load_texture(path)
    }

    fn load_font(&mut self, path: &Path, point_size: f32) -> Result<Font, CollaboratorError> {
        self.canvas.load_font(path, point_size)
    }

    fn render_text(&mut self, font: Font, text: &str, color: Color) -> Result<Texture, CollaboratorError> {
        self.canvas.render_text(font, text, color)
    }

    fn release_texture(&mut self, texture: Texture) {
        self.canvas.release_texture(texture);
    }

    fn release_font(&mut self, font: Font) {
        self.canvas.release_font(font);
    }
}

//--- Backend -------------------------------------------------------------

impl Backend for WinitPlatform {
    fn poll_events(&mut self) -> Vec<GameEvent> {
        self.pump();
        self.events.try_iter().collect()
    }

    fn mouse_position(&self) -> (i32, i32) {
        self.app.cursor
    }

    fn present(&mut self) -> Result<(), CollaboratorError> {
        let (Some(window), Some(surface)) = (self.app.window.as_ref(), self.app.surface.as_mut()) else {
            trace!(target: "platform", "No surface yet, frame dropped");
            return Ok(());
        };

        let mut buffer = surface
            .buffer_mut()
            .map_err(|e| CollaboratorError::Present(e.to_string()))?;
        for (dst, src) in buffer.iter_mut().zip(self.canvas.xrgb_pixels()) {
            *dst = src;
        }
        window.pre_present_notify();
        buffer
            .present()
            .map_err(|e| CollaboratorError::Present(e.to_string()))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
