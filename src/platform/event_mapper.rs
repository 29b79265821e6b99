//=========================================================================
// Platform Event Mapper
//
// Converts winit input into the game's `GameEvent` vocabulary.
//
// Responsibilities:
// - Translate physical keys and mouse buttons
// - Drop auto-repeated key presses and button releases
// - Provide fallbacks (`Unidentified`, `Other`) for unmapped inputs
//
//=========================================================================

use winit::event::{ElementState, MouseButton as WinitMouseButton};
use winit::keyboard::KeyCode as WinitKeyCode;
use winit::keyboard::PhysicalKey;

use crate::core::input::{GameEvent, KeyCode, MouseButton};

//=== Key Conversion ======================================================

impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Numeric keys ---------------------------------------------
            Digit0 => KeyCode::Digit0, Digit1 => KeyCode::Digit1,
            Digit2 => KeyCode::Digit2, Digit3 => KeyCode::Digit3,
            Digit4 => KeyCode::Digit4, Digit5 => KeyCode::Digit5,
            Digit6 => KeyCode::Digit6, Digit7 => KeyCode::Digit7,
            Digit8 => KeyCode::Digit8, Digit9 => KeyCode::Digit9,

            //--- Alphabetic keys ------------------------------------------
            KeyA => KeyCode::KeyA, KeyB => KeyCode::KeyB, KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD, KeyE => KeyCode::KeyE, KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG, KeyH => KeyCode::KeyH, KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ, KeyK => KeyCode::KeyK, KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM, KeyN => KeyCode::KeyN, KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP, KeyQ => KeyCode::KeyQ, KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS, KeyT => KeyCode::KeyT, KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV, KeyW => KeyCode::KeyW, KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY, KeyZ => KeyCode::KeyZ,

            //--- Arrow keys -----------------------------------------------
            ArrowDown => KeyCode::ArrowDown, ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight, ArrowUp => KeyCode::ArrowUp,

            //--- Editing and control keys ---------------------------------
            Space => KeyCode::Space,
            Enter | NumpadEnter => KeyCode::Enter,
            Escape => KeyCode::Escape,
            Tab => KeyCode::Tab,
            Backspace => KeyCode::Backspace,
            Delete => KeyCode::Delete,

            //--- Fallback -------------------------------------------------
            _ => KeyCode::Unidentified,
        }
    }
}

impl From<PhysicalKey> for KeyCode {
    fn from(key: PhysicalKey) -> Self {
        match key {
            PhysicalKey::Code(code) => KeyCode::from(code),
            PhysicalKey::Unidentified(_) => KeyCode::Unidentified,
        }
    }
}

//=== Mouse Conversion ====================================================

impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

//=== Event Conversion ====================================================
//
// The winit `KeyEvent` type cannot be built outside winit, so the window
// handler unpacks it and passes the fields here.
//

/// Keyboard input to `KeyDown`/`KeyUp`. Auto-repeat presses yield `None`.
pub(crate) fn key_event(key: PhysicalKey, state: ElementState, repeat: bool) -> Option<GameEvent> {
    let key = KeyCode::from(key);
    match state {
        ElementState::Pressed if repeat => None,
        ElementState::Pressed => Some(GameEvent::KeyDown(key)),
        ElementState::Released => Some(GameEvent::KeyUp(key)),
    }
}

/// Mouse press at the cached cursor position. Releases yield `None`.
pub(crate) fn mouse_button_event(
    button: WinitMouseButton,
    state: ElementState,
    cursor: (i32, i32),
) -> Option<GameEvent> {
    match state {
        ElementState::Pressed => Some(GameEvent::MouseButtonDown {
            button: MouseButton::from(button),
            x: cursor.0,
            y: cursor.1,
        }),
        ElementState::Released => None,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::NativeKeyCode;

    //=====================================================================
    // Key Mapping
    //=====================================================================

    #[test]
    fn paddle_keys_map_by_position() {
        for (winit, ours) in [
            (WinitKeyCode::KeyQ, KeyCode::KeyQ),
            (WinitKeyCode::KeyA, KeyCode::KeyA),
            (WinitKeyCode::KeyO, KeyCode::KeyO),
            (WinitKeyCode::KeyL, KeyCode::KeyL),
        ] {
            assert_eq!(KeyCode::from(winit), ours, "{:?} should map to {:?}", winit, ours);
        }
    }

    #[test]
    fn control_keys_are_mapped() {
        assert_eq!(KeyCode::from(WinitKeyCode::Escape), KeyCode::Escape);
        assert_eq!(KeyCode::from(WinitKeyCode::NumpadEnter), KeyCode::Enter);
        assert_eq!(KeyCode::from(WinitKeyCode::Space), KeyCode::Space);
    }

    #[test]
    fn unknown_keys_fall_back() {
        assert_eq!(KeyCode::from(WinitKeyCode::F12), KeyCode::Unidentified);
        assert_eq!(
            KeyCode::from(PhysicalKey::Unidentified(NativeKeyCode::Unidentified)),
            KeyCode::Unidentified
        );
    }

    //=====================================================================
    // Event Conversion
    //=====================================================================

    #[test]
    fn key_press_and_release() {
        let key = PhysicalKey::Code(WinitKeyCode::KeyW);
        assert_eq!(
            key_event(key, ElementState::Pressed, false),
            Some(GameEvent::KeyDown(KeyCode::KeyW))
        );
        assert_eq!(
            key_event(key, ElementState::Released, false),
            Some(GameEvent::KeyUp(KeyCode::KeyW))
        );
    }

    #[test]
    fn auto_repeat_is_dropped() {
        let key = PhysicalKey::Code(WinitKeyCode::KeyW);
        assert_eq!(key_event(key, ElementState::Pressed, true), None, "Repeats must not re-press");
    }

    #[test]
    fn mouse_press_uses_cursor() {
        assert_eq!(
            mouse_button_event(WinitMouseButton::Left, ElementState::Pressed, (12, 34)),
            Some(GameEvent::MouseButtonDown { button: MouseButton::Left, x: 12, y: 34 })
        );
        assert_eq!(mouse_button_event(WinitMouseButton::Back, ElementState::Released, (0, 0)), None);
    }

    #[test]
    fn extra_buttons_map_to_other() {
        assert_eq!(MouseButton::from(WinitMouseButton::Back), MouseButton::Other);
        assert_eq!(MouseButton::from(WinitMouseButton::Other(9)), MouseButton::Other);
    }
}
