//! Key bindings for darkroom view commands.

use darkroom_input::Key;
use serde::{Deserialize, Serialize};

/// What the shell should do in response to a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCommand {
    /// Leave the darkroom and return to the lighttable.
    LeaveDarkroom,
    /// Rebuild shaders and reload all modules.
    ReloadModules,
    /// Start or stop animation playback.
    ToggleAnimation {
        /// Whether playback is running after the toggle
        playing: bool,
    },
    /// Open the next image of the collection.
    NextImage,
    /// Open the previous image of the collection.
    PreviousImage,
}

/// The bindable actions, before frame-count dependent resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Leave,
    Reload,
    /// Toggles animation on multi-frame graphs, otherwise next image.
    Forward,
    /// Toggles animation on multi-frame graphs, otherwise previous image.
    Backward,
}

/// Keybinding configuration for the darkroom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Keys that leave the darkroom
    pub leave: Vec<Key>,
    /// Key that reloads modules
    pub reload: Key,
    /// Key for play/pause or next image
    pub forward: Key,
    /// Key for play/pause or previous image
    pub backward: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            leave: vec![Key::Escape, Key::Char('e')],
            reload: Key::Char('r'),
            forward: Key::Space,
            backward: Key::Backspace,
        }
    }
}

impl KeyBindings {
    /// Create new keybindings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the binding that corresponds to a key press, if any.
    ///
    /// Character keys match case-insensitively.
    pub fn binding_for_key(&self, key: Key) -> Option<Binding> {
        let key = normalize(key);
        if self.leave.iter().any(|k| normalize(*k) == key) {
            Some(Binding::Leave)
        } else if normalize(self.reload) == key {
            Some(Binding::Reload)
        } else if normalize(self.forward) == key {
            Some(Binding::Forward)
        } else if normalize(self.backward) == key {
            Some(Binding::Backward)
        } else {
            None
        }
    }
}

fn normalize(key: Key) -> Key {
    match key {
        Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
        other => other,
    }
}
