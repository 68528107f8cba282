//! Scenario tests driving [`crate::EditorContext`] with input events
//! against a headless engine.

mod navigation_tests;
mod replay_tests;

use darkroom_input::{Action, Event, Modifiers, MouseButton};

use crate::config::EditorConfig;
use crate::context::EditorContext;

/// Display node resolution used by most scenarios. With the display area
/// below, fit scale is 0.5 and view pixels equal normalized coords × 1000.
pub(crate) const IMAGE: (u32, u32) = (2000, 2000);
pub(crate) const AREA_ORIGIN: (f32, f32) = (0.0, 0.0);
pub(crate) const AREA_EXTENT: (f32, f32) = (1000.0, 1000.0);
pub(crate) const EPSILON: f32 = 1e-4;

pub(crate) fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

pub(crate) fn context() -> EditorContext {
    EditorContext::new(EditorConfig::default(), AREA_ORIGIN, AREA_EXTENT)
}

pub(crate) fn press(button: MouseButton, position: (f32, f32)) -> Event {
    Event::MouseButton {
        button,
        action: Action::Press,
        position,
        modifiers: Modifiers::NONE,
    }
}

pub(crate) fn release(button: MouseButton, position: (f32, f32)) -> Event {
    Event::MouseButton {
        button,
        action: Action::Release,
        position,
        modifiers: Modifiers::NONE,
    }
}

pub(crate) fn moved(position: (f32, f32)) -> Event {
    Event::MouseMoved { position }
}

pub(crate) fn wheel(delta: f32, position: (f32, f32), modifiers: Modifiers) -> Event {
    Event::MouseWheel {
        delta,
        position,
        modifiers,
    }
}
