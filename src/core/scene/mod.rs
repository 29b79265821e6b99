//=========================================================================
// Scene System
//=========================================================================
//
// Stack-based scene switching driven by a fixed-budget frame loop.
//
// Architecture:
// ```text
//   SceneStack<B: Backend>
//     ├─ backend: B           (events, drawing, present)
//     ├─ scenes: Vec<Box<dyn Scene>>   bottom → top
//     └─ transitions: TransitionQueue  (requests from handlers)
//
//   per frame:
//     poll_events() → top.on_event() → apply transitions
//     top.update(dt) → apply transitions
//     draw every scene bottom → top → present()
// ```
//
// Scenes never see the stack. Handlers receive a `SceneContext` that
// lends them the graphics collaborator and lets them request push/pop.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::config::GameConfig;
use crate::core::error::GameError;
use crate::core::input::GameEvent;
use crate::core::render::{Assets, Canvas, Graphics};

//=== Module Declarations =================================================

mod frame_pacer;
mod scene_stack;
mod transition_queue;

//=== Public API ==========================================================

pub use frame_pacer::FramePacer;
pub use scene_stack::{SceneStack, TickControl};
pub use transition_queue::{SceneTransition, TransitionQueue};

//=== SceneBuilder ========================================================

/// Deferred scene constructor.
///
/// Runs once, when the push is applied, with access to the graphics
/// collaborator so the scene can load its assets.
pub type SceneBuilder = Box<dyn FnOnce(&mut SceneEnv<'_>) -> Result<Box<dyn Scene>, GameError>>;

/// Wraps a typed constructor into a [`SceneBuilder`].
pub fn scene_builder<S, F>(build: F) -> SceneBuilder
where
    S: Scene + 'static,
    F: FnOnce(&mut SceneEnv<'_>) -> Result<S, GameError> + 'static,
{
    Box::new(move |env: &mut SceneEnv<'_>| -> Result<Box<dyn Scene>, GameError> {
        let scene = build(env)?;
        Ok(Box::new(scene) as Box<dyn Scene>)
    })
}

//=== SceneEnv ============================================================

/// What a scene sees while it is being constructed.
pub struct SceneEnv<'a> {
    pub graphics: &'a mut dyn Graphics,
    pub config: &'a GameConfig,
}

impl SceneEnv<'_> {
    /// Window size in pixels.
    pub fn window_dimensions(&self) -> (i32, i32) {
        self.config.window_dimensions()
    }
}

//=== SceneContext ========================================================

/// What a scene sees while one of its handlers runs.
pub struct SceneContext<'a> {
    pub graphics: &'a mut dyn Graphics,
    pub config: &'a GameConfig,
    transitions: &'a mut TransitionQueue,
    mouse_position: (i32, i32),
}

impl<'a> SceneContext<'a> {
    pub fn new(
        graphics: &'a mut dyn Graphics,
        config: &'a GameConfig,
        transitions: &'a mut TransitionQueue,
        mouse_position: (i32, i32),
    ) -> Self {
        Self {
            graphics,
            config,
            transitions,
            mouse_position,
        }
    }

    /// Requests a new scene on top of the stack.
    pub fn push(&mut self, builder: SceneBuilder) {
        self.transitions.push(SceneTransition::Push(builder));
    }

    /// Requests removal of the top scene.
    pub fn pop(&mut self) {
        self.transitions.push(SceneTransition::Pop);
    }

    /// Cursor position sampled at the start of the frame.
    pub fn mouse_position(&self) -> (i32, i32) {
        self.mouse_position
    }

    pub fn window_dimensions(&self) -> (i32, i32) {
        self.config.window_dimensions()
    }
}

//=== Scene Trait =========================================================

/// A screen of the game: menu, match, overlay.
///
/// Only the top scene receives events and updates. Every scene on the
/// stack is drawn each frame, bottom first.
///
/// # Minimal Implementation
///
/// ```rust
/// # use bouncy_games::prelude::*;
/// struct Blank;
///
/// impl Scene for Blank {
///     fn name(&self) -> &str { "blank" }
///     fn draw(&self, canvas: &mut dyn Canvas) {
///         canvas.set_draw_color(Color::BLACK);
///         canvas.clear();
///     }
///     fn update(&mut self, _dt: f32, _ctx: &mut SceneContext<'_>) -> Result<(), GameError> {
///         Ok(())
///     }
///     fn on_event(&mut self, _event: &GameEvent, _ctx: &mut SceneContext<'_>) -> Result<(), GameError> {
///         Ok(())
///     }
/// }
/// ```
pub trait Scene {
    /// Short name used in log output.
    fn name(&self) -> &str;

    fn draw(&self, canvas: &mut dyn Canvas);

    /// Advances the scene by `dt` seconds.
    fn update(&mut self, dt: f32, ctx: &mut SceneContext<'_>) -> Result<(), GameError>;

    fn on_event(&mut self, event: &GameEvent, ctx: &mut SceneContext<'_>) -> Result<(), GameError>;

    /// Called when the scene becomes the top of the stack.
    fn activate(&mut self) {}

    /// Called when the scene stops being the top of the stack.
    fn deactivate(&mut self) {}

    /// Frees textures and fonts. Called once, after the scene is popped.
    fn release(&mut self, _assets: &mut dyn Assets) {}
}
