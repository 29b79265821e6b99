//=========================================================================
// Input
//
// Engine-level input vocabulary.
//
// Responsibilities:
// - Define the event enum shared by platform and scenes (`event`)
// - Track held keys per object (`key_state`)
//
//=========================================================================

//=== Submodules ==========================================================

pub mod event;
mod key_state;

//=== Public API ==========================================================

pub use event::{GameEvent, KeyCode, MouseButton, Side};
pub use key_state::KeyStates;
