//! darkroom_engine - the seam between the darkroom canvas and the compute graph.
//!
//! The canvas never talks to the GPU directly. It asks the engine for the
//! display node's resolution, for the mapped memory of a module's source
//! buffer, and to (re)run the graph with a set of [`RunFlags`].

pub mod engine;
pub mod error;
pub mod headless;
pub mod run_flags;

pub use engine::{ComputeEngine, ModuleId, ParamId, ParamRegistry, WidgetKind};
pub use error::{EngineError, Result};
pub use headless::HeadlessEngine;
pub use run_flags::RunFlags;
