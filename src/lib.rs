//=========================================================================
// Bouncy Games — Library Root
//
// Pong and four-paddle Hockey on a scene stack with a per-frame object
// engine.
//
// Typical usage:
// ```no_run
// use bouncy_games::GameBuilder;
//
// fn main() -> Result<(), bouncy_games::core::error::GameError> {
//     GameBuilder::new().build().run()
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the game-agnostic engine: scene stack, object model,
// geometry and the render/input contracts.
//
pub mod core;

// `game` holds the menu, the play field and every object variant.
pub mod game;

// `platform` provides the backends: a winit window and a headless one
// for tests and automation.
pub mod platform;

// `engine` wires configuration, the window and the first scene together.
pub mod engine;

pub mod prelude;

//--- Public Exports ------------------------------------------------------

pub use engine::{Game, GameBuilder};
