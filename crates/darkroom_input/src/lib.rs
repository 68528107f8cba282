//! darkroom_input - windowing-independent input vocabulary for the darkroom canvas.
//!
//! The shell translates its native window events into these types before
//! handing them to the editor context.

mod event;

pub use event::{Action, Event, Key, Modifiers, MouseButton};
