//=========================================================================
// Transition Queue
//=========================================================================
//
// Deferred scene stack requests.
//
// Scenes cannot touch the stack that owns them while one of their
// handlers runs. They queue requests here through `SceneContext` and the
// stack applies them as soon as the handler returns.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use super::SceneBuilder;

//=== Scene Transition ====================================================

/// A single stack operation requested by a scene.
pub enum SceneTransition {
    /// Builds a new scene and places it on top of the stack.
    Push(SceneBuilder),

    /// Removes the top scene.
    Pop,
}

impl fmt::Debug for SceneTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneTransition::Push(_) => f.write_str("Push(..)"),
            SceneTransition::Pop => f.write_str("Pop"),
        }
    }
}

//=== Transition Queue ====================================================

/// FIFO of pending stack operations.
#[derive(Debug, Default)]
pub struct TransitionQueue {
    queue: Vec<SceneTransition>,
}

impl TransitionQueue {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Queues a transition to be applied after the current handler.
    pub fn push(&mut self, transition: SceneTransition) {
        self.queue.push(transition);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Takes all transitions in request order, leaving the queue empty.
    pub fn take(&mut self) -> Vec<SceneTransition> {
        std::mem::take(&mut self.queue)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::GameError;
    use crate::core::scene::{Scene, SceneEnv};

    fn failing_builder() -> SceneBuilder {
        Box::new(|_env: &mut SceneEnv<'_>| -> Result<Box<dyn Scene>, GameError> {
            Err(GameError::StackUnderflow { needed: 1, available: 0 })
        })
    }

    #[test]
    fn take_preserves_order_and_empties() {
        let mut queue = TransitionQueue::new();
        queue.push(SceneTransition::Pop);
        queue.push(SceneTransition::Push(failing_builder()));
        assert_eq!(queue.len(), 2);

        let taken = queue.take();
        assert!(queue.is_empty(), "Queue should be empty after take()");
        assert!(matches!(taken[0], SceneTransition::Pop));
        assert!(matches!(taken[1], SceneTransition::Push(_)));
    }

    #[test]
    fn debug_hides_builder() {
        let push = SceneTransition::Push(failing_builder());
        assert_eq!(format!("{:?}", push), "Push(..)");
        assert_eq!(format!("{:?}", SceneTransition::Pop), "Pop");
    }
}
