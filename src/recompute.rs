//! Decides whether an edit needs the graph to run again right away.
//!
//! Mask edits change a source resource the next stage reads verbatim, so
//! the module is flagged to re-read its source and the graph runs
//! synchronously: the call returns only after the GPU is done, which keeps
//! the canvas from writing the mask while a run reads it. Geometric
//! parameters are tracked by the engine's own dirty propagation and picked
//! up by its next regular pass.

use darkroom_engine::{ComputeEngine, ModuleId, RunFlags};

/// Flags used for every mask-triggered run.
pub const MASK_RUN_FLAGS: RunFlags = RunFlags::RECORD_COMMANDS.union(RunFlags::WAIT_DONE);

/// What an edit changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// Dabs appended to or strokes removed from the mask buffer.
    MaskBuffer,
    /// Perspective corners, crop or pick edges.
    Geometry,
}

/// React to an edit of `module`'s widget. Returns whether a run completed.
///
/// A failed run is logged; the edit itself stays in place.
pub fn after_edit<E>(engine: &mut E, module: ModuleId, mutation: Mutation) -> bool
where
    E: ComputeEngine + ?Sized,
{
    match mutation {
        Mutation::Geometry => false,
        Mutation::MaskBuffer => {
            if let Err(e) = engine.mark_module_source_dirty(module) {
                log::error!("Cannot flag source of module {}: {}", module, e);
                return false;
            }
            match engine.run(MASK_RUN_FLAGS) {
                Ok(()) => true,
                Err(e) => {
                    log::error!("Recompute after mask edit failed: {}", e);
                    false
                }
            }
        }
    }
}
