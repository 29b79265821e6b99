//=========================================================================
// Scene Stack
//=========================================================================
//
// Owns the scenes and the backend, and runs the frame loop.
//
// Architecture:
// ```text
//   run()
//     └─ loop
//          run_frame(dt)
//            ├─ poll_events(): Quit → Exit, others → top.on_event()
//            ├─ top.update(dt)
//            ├─ draw all scenes bottom → top, present()
//            └─ empty stack → Exit
//          FramePacer::finish_frame() → dt
// ```
//
// Transitions a handler requests are applied right after it returns, so
// the next event of the same frame already reaches the new top.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, error, info, trace, warn};

//=== Internal Dependencies ===============================================

use super::{FramePacer, Scene, SceneBuilder, SceneContext, SceneEnv, SceneTransition, TransitionQueue};
use crate::core::config::GameConfig;
use crate::core::error::GameError;
use crate::core::input::GameEvent;
use crate::core::render::Backend;

//=== TickControl =========================================================

/// Frame loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== SceneStack ==========================================================

/// Ordered collection of scenes, bottom to top, driving one backend.
pub struct SceneStack<B: Backend> {
    backend: B,
    config: GameConfig,
    scenes: Vec<Box<dyn Scene>>,
    transitions: TransitionQueue,
}

impl<B: Backend> SceneStack<B> {
    //--- Construction -----------------------------------------------------

    /// Creates an empty stack. Push at least one scene before `run()`.
    pub fn new(backend: B, config: GameConfig) -> Self {
        Self {
            backend,
            config,
            scenes: Vec::new(),
            transitions: TransitionQueue::new(),
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Configured window size in pixels.
    pub fn window_dimensions(&self) -> (i32, i32) {
        self.config.window_dimensions()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Top scene.
    pub fn current(&self) -> Result<&dyn Scene, GameError> {
        self.from_top(0)
    }

    pub fn current_mut(&mut self) -> Result<&mut (dyn Scene + 'static), GameError> {
        self.from_top_mut(0)
    }

    /// Scene directly beneath the top.
    pub fn previous(&self) -> Result<&dyn Scene, GameError> {
        self.from_top(1)
    }

    pub fn previous_mut(&mut self) -> Result<&mut (dyn Scene + 'static), GameError> {
        self.from_top_mut(1)
    }

    fn from_top(&self, depth: usize) -> Result<&dyn Scene, GameError> {
        let available = self.scenes.len();
        if available <= depth {
            return Err(GameError::StackUnderflow { needed: depth + 1, available });
        }
        Ok(self.scenes[available - 1 - depth].as_ref())
    }

    fn from_top_mut(&mut self, depth: usize) -> Result<&mut (dyn Scene + 'static), GameError> {
        let available = self.scenes.len();
        if available <= depth {
            return Err(GameError::StackUnderflow { needed: depth + 1, available });
        }
        Ok(self.scenes[available - 1 - depth].as_mut())
    }

    //--- Stack Operations -------------------------------------------------

    /// Builds a scene and places it on top.
    ///
    /// The previous top is deactivated and the new one activated. A
    /// builder error leaves the stack unchanged.
    pub fn push(&mut self, builder: SceneBuilder) -> Result<(), GameError> {
        let mut env = SceneEnv {
            graphics: &mut self.backend,
            config: &self.config,
        };
        let mut scene = builder(&mut env).inspect_err(|e| error!("Scene construction failed: {}", e))?;

        if let Some(top) = self.scenes.last_mut() {
            debug!("Deactivating scene '{}'", top.name());
            top.deactivate();
        }

        info!("Pushing scene '{}' (depth {})", scene.name(), self.scenes.len() + 1);
        scene.activate();
        self.scenes.push(scene);
        Ok(())
    }

    /// Removes the top scene and activates the one beneath it.
    pub fn pop(&mut self) -> Result<(), GameError> {
        let Some(mut scene) = self.scenes.pop() else {
            return Err(GameError::StackUnderflow { needed: 1, available: 0 });
        };

        info!("Popping scene '{}' (depth {})", scene.name(), self.scenes.len());
        scene.deactivate();
        scene.release(&mut self.backend);

        if let Some(top) = self.scenes.last_mut() {
            debug!("Scene '{}' is on top again", top.name());
            top.activate();
        }
        Ok(())
    }

    /// Applies every queued transition in request order.
    fn apply_transitions(&mut self) -> Result<(), GameError> {
        for transition in self.transitions.take() {
            debug!("Applying transition {:?}", transition);
            match transition {
                SceneTransition::Push(builder) => self.push(builder)?,
                SceneTransition::Pop => self.pop()?,
            }
        }
        Ok(())
    }

    //--- Frame Steps ------------------------------------------------------

    /// Routes one event to the top scene.
    pub fn dispatch(&mut self, event: &GameEvent) -> Result<(), GameError> {
        let mouse = self.backend.mouse_position();
        let Some(top) = self.scenes.last_mut() else {
            warn!("Dropping {:?}: no scene on the stack", event);
            return Ok(());
        };

        trace!("Routing {:?} to '{}'", event, top.name());
        let mut ctx = SceneContext::new(&mut self.backend, &self.config, &mut self.transitions, mouse);
        top.on_event(event, &mut ctx)?;
        self.apply_transitions()
    }

    /// Advances the top scene by `dt` seconds.
    pub fn update(&mut self, dt: f32) -> Result<(), GameError> {
        let mouse = self.backend.mouse_position();
        let Some(top) = self.scenes.last_mut() else {
            return Ok(());
        };

        let mut ctx = SceneContext::new(&mut self.backend, &self.config, &mut self.transitions, mouse);
        top.update(dt, &mut ctx)?;
        self.apply_transitions()
    }

    /// Draws every scene, bottom first, and presents the frame.
    pub fn draw(&mut self) -> Result<(), GameError> {
        for scene in &self.scenes {
            scene.draw(&mut self.backend);
        }
        self.backend.present().inspect_err(|e| error!("Present failed: {}", e))?;
        Ok(())
    }

    /// Runs one frame with the given delta.
    ///
    /// A `Quit` in the batch ends the loop after this frame completes. The
    /// remaining events of the batch are still routed.
    pub fn run_frame(&mut self, dt: f32) -> Result<TickControl, GameError> {
        let mut control = TickControl::Continue;

        for event in self.backend.poll_events() {
            if event.is_quit() {
                info!("Quit requested");
                control = TickControl::Exit;
                continue;
            }
            self.dispatch(&event)?;
        }

        self.update(dt)?;
        self.draw()?;

        if self.scenes.is_empty() {
            info!("Scene stack is empty");
            control = TickControl::Exit;
        }
        Ok(control)
    }

    //--- Main Loop --------------------------------------------------------

    /// Runs frames until the stack empties or `Quit` arrives.
    ///
    /// Collaborator failures abort the loop and are returned.
    pub fn run(&mut self) -> Result<(), GameError> {
        info!(
            "Entering main loop ({} scene(s), budget {:?})",
            self.scenes.len(),
            self.config.frame_budget
        );

        let mut pacer = FramePacer::new(self.config.frame_budget);
        while self.run_frame(pacer.delta())? == TickControl::Continue {
            pacer.finish_frame();
        }

        info!("Main loop exited");
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
