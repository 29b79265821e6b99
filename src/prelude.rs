//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use bouncy_games::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Entry point
pub use crate::engine::{Game, GameBuilder};

// Configuration and errors
pub use crate::core::config::{AssetPaths, GameConfig};
pub use crate::core::error::{CollaboratorError, GameError};

// Geometry and input
pub use crate::core::geometry::Rect;
pub use crate::core::input::{GameEvent, KeyCode, MouseButton, Side};

// Rendering contracts
pub use crate::core::render::{Assets, Backend, Canvas, Color, Font, Graphics, Texture};

// Objects
pub use crate::core::object::{GameObject, ObjectBase, ObjectKind, SceneEffect, World};

// Scene system
pub use crate::core::scene::{scene_builder, Scene, SceneContext, SceneEnv, SceneStack};
