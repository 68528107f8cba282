//! On-canvas widgets: the focused parameter's typed values and its drag state.

mod interaction;
mod params;

use darkroom_engine::{ModuleId, ParamId, WidgetKind};
use serde::Serialize;

pub use interaction::{hit_test, Handle};
pub use params::{Brush, BrushParam, Edge, Edges, Point, WidgetParams};

/// Where a press-drag on the focused widget stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DragState {
    /// No press in progress.
    #[default]
    Idle,
    /// A corner or edge was grabbed at press time and follows the cursor
    /// until release.
    Handle(Handle),
    /// The left button is down on a draw widget; motion lays down dabs.
    Painting,
}

/// The parameter currently focused in the panel, with its on-canvas state.
///
/// Recreated whenever focus changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveWidget {
    pub module: ModuleId,
    pub param: ParamId,
    pub params: WidgetParams,
    /// Locked crop aspect (width / height); ignored by other kinds.
    pub aspect_lock: Option<f32>,
    drag: DragState,
}

impl ActiveWidget {
    pub fn new(module: ModuleId, param: ParamId, params: WidgetParams, aspect_lock: Option<f32>) -> Self {
        Self {
            module,
            param,
            params,
            aspect_lock,
            drag: DragState::Idle,
        }
    }

    pub fn kind(&self) -> WidgetKind {
        self.params.kind()
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// The grabbed corner or edge, while a drag is in progress.
    pub fn selected(&self) -> Option<Handle> {
        match self.drag {
            DragState::Handle(handle) => Some(handle),
            DragState::Idle | DragState::Painting => None,
        }
    }

    pub fn brush(&self) -> Option<Brush> {
        match self.params {
            WidgetParams::Draw { brush } => Some(brush),
            _ => None,
        }
    }
}
