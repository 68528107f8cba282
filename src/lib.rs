//! darkroom - on-canvas widgets and viewport navigation for a GPU image editor.
//!
//! Turns raw pointer, scroll and key events into edits of module parameters
//! (perspective quad, crop rectangle, pick region, paint mask) and decides
//! when an edit has to re-run the compute graph.

pub mod config;
pub mod constants;
pub mod context;
pub mod coords;
pub mod error;
pub mod keybindings;
pub mod mask;
pub mod recompute;
pub mod replay;
pub mod viewport;
pub mod widget;

#[cfg(test)]
mod tests;

pub use config::EditorConfig;
pub use context::EditorContext;
pub use coords::{Mapper, ViewportState};
pub use error::{InteractionError, MaskError, ReplayError};
pub use keybindings::KeyCommand;
pub use mask::{MaskBufferView, StrokeVertex};
pub use widget::{ActiveWidget, WidgetParams};
