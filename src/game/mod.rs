//=========================================================================
// Games
//
// The concrete objects and scenes built on the core engine.
//
// Responsibilities:
// - Object variants: paddle, ball, goal, scoreboard
// - Scenes: the title menu and the Pong/Hockey play field
//
//=========================================================================

//=== Submodules ==========================================================

pub mod ball;
pub mod goal;
pub mod menu;
pub mod paddle;
pub mod play;
pub mod scoreboard;

//=== Public API ==========================================================

pub use menu::{MenuAction, MenuScene};
pub use play::{GameMode, PlayScene};
