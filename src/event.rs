//! Typed input events produced by the [`crate::input`] parser.

/// Modifier keys held during a keyboard or mouse event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Control held.
    pub ctrl: bool,
    /// Alt held.
    pub alt: bool,
    /// Shift held.
    pub shift: bool,
}

impl Modifiers {
    /// No modifiers.
    pub const NONE: Modifiers = Modifiers { ctrl: false, alt: false, shift: false };

    /// Decode the CSI modifier parameter (`1;<mod>X` form), where `raw` is
    /// `<mod>` as sent on the wire (1-based: `raw - 1` is a bitmask of
    /// shift=1, alt=2, ctrl=4).
    pub fn from_csi_param(raw: u16) -> Modifiers {
        let bits = raw.saturating_sub(1);
        Modifiers {
            shift: bits & 0b001 != 0,
            alt: bits & 0b010 != 0,
            ctrl: bits & 0b100 != 0,
        }
    }
}

/// A logical key, independent of the byte sequence that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    /// Enter / Return.
    Enter,
    /// Tab.
    Tab,
    /// Backspace.
    Backspace,
    /// Delete.
    Delete,
    /// Escape.
    Escape,
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Insert.
    Insert,
    /// Function key, 1-based (F1 = `F(1)`).
    F(u8),
}

/// A keyboard event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyboardEvent {
    /// The logical key pressed.
    pub logical_key: KeyCode,
    /// Modifiers held.
    pub modifiers: Modifiers,
}

impl KeyboardEvent {
    /// Create a keyboard event with no modifiers held.
    pub fn new(logical_key: KeyCode) -> Self {
        Self { logical_key, modifiers: Modifiers::NONE }
    }

    /// Whether this is Ctrl+C (the default shutdown key).
    pub fn is_ctrl_c(&self) -> bool {
        self.modifiers.ctrl && self.logical_key == KeyCode::Char('c')
    }

    /// Whether this is a bare Escape (the other default shutdown key).
    pub fn is_escape(&self) -> bool {
        self.logical_key == KeyCode::Escape
    }
}

/// A mouse button or wheel direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left button.
    Left,
    /// Middle button.
    Middle,
    /// Right button.
    Right,
    /// Scroll wheel up.
    WheelUp,
    /// Scroll wheel down.
    WheelDown,
}

/// A mouse event, with coordinates in terminal cells, 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    /// Which button or wheel direction.
    pub button: MouseButton,
    /// Column, 0-based.
    pub x: u16,
    /// Row, 0-based.
    pub y: u16,
    /// `true` for press, `false` for release.
    pub pressed: bool,
    /// Modifiers held.
    pub modifiers: Modifiers,
}

/// An input event: either keyboard or mouse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum InputEvent {
    /// A keyboard event.
    Key(KeyboardEvent),
    /// A mouse event.
    Mouse(MouseEvent),
    /// The terminal was resized to `(width, height)`.
    Resize(u16, u16),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_c_detected() {
        let ev = KeyboardEvent {
            logical_key: KeyCode::Char('c'),
            modifiers: Modifiers { ctrl: true, alt: false, shift: false },
        };
        assert!(ev.is_ctrl_c());
    }

    #[test]
    fn modifiers_from_csi_param() {
        // "1;5A" -> ctrl+up: raw mod = 5 -> bits = 4 -> ctrl only
        let m = Modifiers::from_csi_param(5);
        assert_eq!(m, Modifiers { ctrl: true, alt: false, shift: false });
    }

    #[test]
    fn modifiers_from_csi_param_none() {
        assert_eq!(Modifiers::from_csi_param(1), Modifiers::NONE);
    }
}
