//=========================================================================
// Key State
//=========================================================================
//
// Per-object record of which keys are currently held.
//
// Architecture:
//   KeyDown/KeyUp → press()/release() → HashMap<KeyCode, bool> → is_down()
//
// Every object keeps its own copy and sees every key event of its scene,
// so a paddle only needs to query the two keys it is bound to.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::event::KeyCode;

//=== KeyStates ===========================================================

/// Maps key identifiers to their pressed state. Unknown keys read as up.
#[derive(Debug, Clone, Default)]
pub struct KeyStates {
    keys: HashMap<KeyCode, bool>,
}

impl KeyStates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: KeyCode) {
        self.keys.insert(key, true);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.keys.insert(key, false);
    }

    /// Returns `true` while `key` is held.
    pub fn is_down(&self, key: KeyCode) -> bool {
        self.keys.get(&key).copied().unwrap_or(false)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
