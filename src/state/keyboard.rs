//! Keyboard Module - the normalized key vocabulary.
//!
//! The core never sees raw terminal escape sequences or browser events.
//! Input adapters translate those into one of the names below, or a single
//! printable character, and hand the string to `App::handle_key`.

pub const ENTER: &str = "Enter";
pub const ESCAPE: &str = "Escape";
pub const BACKSPACE: &str = "Backspace";
pub const TAB: &str = "Tab";
pub const ARROW_UP: &str = "ArrowUp";
pub const ARROW_DOWN: &str = "ArrowDown";
pub const ARROW_LEFT: &str = "ArrowLeft";
pub const ARROW_RIGHT: &str = "ArrowRight";
/// Reverse focus traversal.
pub const SHIFT: &str = "Shift";

/// True if the key is a single printable character.
pub fn is_printable(key: &str) -> bool {
    let mut chars = key.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if !c.is_control())
}

/// True for the keys the application consumes for focus traversal.
pub fn is_focus_navigation(key: &str) -> bool {
    key == TAB || key == SHIFT
}

/// True for the four arrow keys.
pub fn is_arrow(key: &str) -> bool {
    matches!(key, ARROW_UP | ARROW_DOWN | ARROW_LEFT | ARROW_RIGHT)
}
