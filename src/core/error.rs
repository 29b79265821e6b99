//=========================================================================
// Error Types
//=========================================================================
//
// Two failure families:
// - CollaboratorError: the windowing/rendering/asset layer failed. Always
//   fatal; propagated up to `main` without retries.
// - GameError::StackUnderflow: a scene-stack query asked for more scenes
//   than exist. A contract violation, never part of normal flow.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::PathBuf;

//=== CollaboratorError ===================================================

/// Failure reported by the rendering, windowing or asset layer.
#[derive(Debug, thiserror::Error)]
pub enum CollaboratorError {
    #[error("failed to load texture {path}: {reason}")]
    Asset { path: PathBuf, reason: String },

    #[error("failed to load font {path}: {reason}")]
    Font { path: PathBuf, reason: String },

    #[error("failed to render text: {0}")]
    Text(String),

    #[error("window creation failed: {0}")]
    Window(String),

    #[error("failed to present frame: {0}")]
    Present(String),

    #[error("event loop error: {0}")]
    EventLoop(String),
}

//=== GameError ===========================================================

/// Top-level error type of the crate.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Fatal failure of an external collaborator.
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),

    /// Scene stack queried with too few entries.
    #[error("scene stack underflow: needed {needed} scene(s), {available} on the stack")]
    StackUnderflow { needed: usize, available: usize },
}

//=========================================================================
// Unit Tests
//=========================================================================
