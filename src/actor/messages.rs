//! Message types for actor communication.
//!
//! Input events travel from the input actor to the player loop, which
//! decides whether each one is genuine user input that ends autoplay.

use bitflags::bitflags;

/// Key codes for keyboard input.
///
/// A subset of crossterm's `KeyCode`, enough for hosts to map keys to
/// replay and quit controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    /// Function key (F1-F12).
    F(u8),
    /// Backspace key.
    Backspace,
    /// Enter/Return key.
    Enter,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Tab key.
    Tab,
    /// Delete key.
    Delete,
    /// Escape key.
    Esc,
}

/// Key modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers {
    /// Shift key held.
    pub shift: bool,
    /// Control key held.
    pub control: bool,
    /// Alt/Option key held.
    pub alt: bool,
}

impl KeyModifiers {
    /// No modifiers.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
    };
}

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button.
    Middle,
}

/// Pointer position and button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// X coordinate (column).
    pub x: u16,
    /// Y coordinate (row).
    pub y: u16,
    /// Mouse button involved (if any).
    pub button: Option<MouseButton>,
}

/// Events delivered to the player loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A key was pressed.
    Key {
        /// The key code.
        code: KeyCode,
        /// Modifiers held during keypress.
        modifiers: KeyModifiers,
    },

    /// Mouse button pressed.
    MouseDown(MouseEvent),

    /// Mouse moved without a button, or dragged.
    MouseMove(MouseEvent),

    /// Mouse wheel.
    MouseScroll {
        /// Scroll delta (positive = up, negative = down).
        delta: i16,
    },

    /// Terminal was resized.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },

    /// Focus gained.
    FocusGained,

    /// Focus lost.
    FocusLost,

    /// Paste event (bracketed paste).
    Paste(String),

    /// Input thread encountered an error.
    Error(String),

    /// Input thread is shutting down.
    Shutdown,
}

impl InputEvent {
    /// Create a key press without modifiers.
    pub const fn key(code: KeyCode) -> Self {
        Self::Key {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// Classify the event as user input; `None` for everything else.
    ///
    /// Resizes, focus loss, and actor housekeeping are not the user reaching
    /// for the demo.
    pub const fn kind(&self) -> Option<InputKind> {
        match self {
            Self::Key { .. } => Some(InputKind::KEY),
            Self::MouseDown(_) => Some(InputKind::POINTER),
            Self::MouseMove(_) => Some(InputKind::HOVER),
            Self::MouseScroll { .. } => Some(InputKind::WHEEL),
            Self::FocusGained => Some(InputKind::FOCUS),
            Self::Paste(_) => Some(InputKind::PASTE),
            Self::Resize { .. } | Self::FocusLost | Self::Error(_) | Self::Shutdown => None,
        }
    }
}

bitflags! {
    /// Kinds of user input, used to choose which ones end autoplay.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
    pub struct InputKind: u8 {
        /// Key press.
        const KEY = 1 << 0;
        /// Mouse button press.
        const POINTER = 1 << 1;
        /// Mouse wheel.
        const WHEEL = 1 << 2;
        /// Focus gained.
        const FOCUS = 1 << 3;
        /// Bracketed paste.
        const PASTE = 1 << 4;
        /// Pointer motion without a press.
        const HOVER = 1 << 5;
    }
}

impl InputKind {
    /// Inputs that interrupt autoplay by default: everything but hovering.
    pub const INTERRUPTING: Self = Self::KEY
        .union(Self::POINTER)
        .union(Self::WHEEL)
        .union(Self::FOCUS)
        .union(Self::PASTE);
}
