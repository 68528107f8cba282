//! Traits and identifiers for the external compute engine.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Result, RunFlags};

/// Index of a module (pipeline stage) in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleId(pub u32);

/// Index of a parameter within its module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParamId(pub u32);

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The on-canvas widget a parameter declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    /// Four free corners of a perspective quad.
    Perspective,
    /// Aspect-constrained crop rectangle.
    Crop,
    /// Min/max pick region.
    Pick,
    /// Freehand paint mask.
    Draw,
}

impl WidgetKind {
    pub fn name(&self) -> &'static str {
        match self {
            WidgetKind::Perspective => "perspective",
            WidgetKind::Crop => "crop",
            WidgetKind::Pick => "pick",
            WidgetKind::Draw => "draw",
        }
    }
}

/// The compute graph as seen from the canvas.
pub trait ComputeEngine {
    /// Resolution of the display node, or `None` when no display is wired.
    fn display_resolution(&self) -> Option<(u32, u32)>;

    /// Run the graph. With [`RunFlags::WAIT_DONE`] this blocks until the
    /// GPU has finished.
    fn run(&mut self, flags: RunFlags) -> Result<()>;

    /// Ask the module to re-read its source resource on the next run.
    fn mark_module_source_dirty(&mut self, module: ModuleId) -> Result<()>;

    /// Mapped host memory of the module's source buffer.
    fn mapped_source(&mut self, module: ModuleId) -> Option<&mut [u8]>;

    /// Number of animation frames in the loaded graph.
    fn frame_count(&self) -> u32 {
        1
    }
}

/// Module/parameter registry: which widget a parameter declares.
pub trait ParamRegistry {
    fn widget_kind(&self, module: ModuleId, param: ParamId) -> Option<WidgetKind>;
}
