use serde::{Deserialize, Serialize};

/// Events the darkroom canvas responds to.
///
/// Positions are in viewport pixels, origin at the top-left of the window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Mouse button pressed or released.
    MouseButton {
        button: MouseButton,
        action: Action,
        position: (f32, f32),
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Cursor moved.
    MouseMoved { position: (f32, f32) },
    /// Mouse wheel scrolled. Positive `delta` scrolls up (zoom in).
    MouseWheel {
        delta: f32,
        position: (f32, f32),
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Keyboard key pressed or released.
    Key {
        key: Key,
        action: Action,
        #[serde(default)]
        modifiers: Modifiers,
    },
}

impl Event {
    /// Cursor position carried by the event, if any.
    pub fn position(&self) -> Option<(f32, f32)> {
        match self {
            Event::MouseButton { position, .. }
            | Event::MouseMoved { position }
            | Event::MouseWheel { position, .. } => Some(*position),
            Event::Key { .. } => None,
        }
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Press/release edge of a button or key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Press,
    Release,
}

/// Keyboard keys (the subset the darkroom binds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    Space,
    Up,
    Down,
    Left,
    Right,
}

/// Keyboard modifiers held while the event fired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }
}
