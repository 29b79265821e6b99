//=========================================================================
// Game Event Types
//
// The single event vocabulary shared by the platform layer and the scene
// stack. Platform-specific input (winit, headless scripts) is converted
// into these types before it reaches any scene.
//
// Event Flow:
// ```text
// Platform Layer (winit / headless)
//         ↓
//    GameEvent (this module)
//         ↓
//    SceneStack → top Scene → GameObjects
// ```
//
// Score notifications raised by objects travel through the scene outbox
// (`SceneEffect`), but the `Score` variant lets the same signal be
// injected through the queue as well.
//
//=========================================================================

//=== MouseButton =========================================================

/// Physical mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Any other button (side buttons, thumb buttons, macro keys).
    Other,
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// `KeyQ` is the same key on QWERTY and AZERTY layouts, which keeps the
/// paddle bindings in the same place for every player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    /// Fallback for keys not explicitly mapped by the platform layer.
    Unidentified,
}

//=== Side ================================================================

/// One of the two teams. `Left` is index 0, `Right` is index 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    pub const fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

//=== GameEvent ===========================================================

/// Event drained from the platform queue once per frame.
///
/// `Quit` never reaches a scene: the stack consumes it and ends the loop.
/// Every other variant is routed to the top scene only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Window close requested by the user or the OS.
    Quit,

    /// Key pressed down.
    KeyDown(KeyCode),

    /// Key released.
    KeyUp(KeyCode),

    /// Mouse button pressed at window coordinates `(x, y)`.
    MouseButtonDown { button: MouseButton, x: i32, y: i32 },

    /// The given side scored a point.
    Score(Side),
}

impl GameEvent {
    /// Returns `true` for events that end the main loop.
    pub fn is_quit(&self) -> bool {
        matches!(self, GameEvent::Quit)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
