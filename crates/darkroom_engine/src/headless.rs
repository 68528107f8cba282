//! In-memory engine used by the replay driver and by tests.
//!
//! Owns the mask buffers a real engine would map from GPU memory, and
//! records every run request instead of submitting work.

use std::collections::HashMap;

use crate::{ComputeEngine, EngineError, ModuleId, ParamId, ParamRegistry, Result, RunFlags, WidgetKind};

#[derive(Debug, Default)]
struct HeadlessModule {
    params: HashMap<ParamId, WidgetKind>,
    /// Source buffer, stored as words so the byte view is always 4-aligned.
    source: Option<Vec<u32>>,
    source_dirty: bool,
}

/// A compute engine without a GPU.
#[derive(Debug, Default)]
pub struct HeadlessEngine {
    resolution: Option<(u32, u32)>,
    frame_count: u32,
    modules: HashMap<ModuleId, HeadlessModule>,
    runs: Vec<RunFlags>,
    source_reads: usize,
    fail_runs: bool,
}

impl HeadlessEngine {
    /// Create an engine whose display node has the given resolution.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            resolution: Some((width, height)),
            frame_count: 1,
            ..Self::default()
        }
    }

    /// Create an engine with no display node wired.
    pub fn without_display() -> Self {
        Self {
            frame_count: 1,
            ..Self::default()
        }
    }

    /// Declare a widget for a module parameter.
    pub fn with_widget(mut self, module: ModuleId, param: ParamId, kind: WidgetKind) -> Self {
        self.modules.entry(module).or_default().params.insert(param, kind);
        self
    }

    /// Attach a zeroed source buffer of `capacity_bytes` (rounded down to whole words).
    pub fn with_mask_buffer(mut self, module: ModuleId, capacity_bytes: usize) -> Self {
        let words = capacity_bytes / std::mem::size_of::<u32>();
        self.modules.entry(module).or_default().source = Some(vec![0; words]);
        self
    }

    /// Set the number of animation frames.
    pub fn with_frame_count(mut self, frames: u32) -> Self {
        self.frame_count = frames;
        self
    }

    /// Make every subsequent run fail.
    pub fn set_fail_runs(&mut self, fail: bool) {
        self.fail_runs = fail;
    }

    /// Wire or unwire the display node.
    pub fn set_display_resolution(&mut self, resolution: Option<(u32, u32)>) {
        self.resolution = resolution;
    }

    /// Every run requested so far, in order.
    pub fn runs(&self) -> &[RunFlags] {
        &self.runs
    }

    /// How many times a module source was re-read by a completed run.
    pub fn source_reads(&self) -> usize {
        self.source_reads
    }

    /// Whether the module is waiting for its source to be re-read.
    pub fn is_source_dirty(&self, module: ModuleId) -> bool {
        self.modules
            .get(&module)
            .map(|m| m.source_dirty)
            .unwrap_or(false)
    }

    /// Word view of a module's source buffer.
    pub fn source_words(&self, module: ModuleId) -> Option<&[u32]> {
        self.modules.get(&module)?.source.as_deref()
    }
}

impl ComputeEngine for HeadlessEngine {
    fn display_resolution(&self) -> Option<(u32, u32)> {
        self.resolution
    }

    fn run(&mut self, flags: RunFlags) -> Result<()> {
        if self.fail_runs {
            return Err(EngineError::RunFailed(format!("{:?} rejected", flags)));
        }
        self.runs.push(flags);
        if flags.contains(RunFlags::RECORD_COMMANDS) {
            for module in self.modules.values_mut() {
                if module.source_dirty {
                    module.source_dirty = false;
                    self.source_reads += 1;
                }
            }
        }
        log::trace!("headless run {:?} (#{})", flags, self.runs.len());
        Ok(())
    }

    fn mark_module_source_dirty(&mut self, module: ModuleId) -> Result<()> {
        let entry = self
            .modules
            .get_mut(&module)
            .ok_or(EngineError::UnknownModule(module))?;
        entry.source_dirty = true;
        Ok(())
    }

    fn mapped_source(&mut self, module: ModuleId) -> Option<&mut [u8]> {
        let words = self.modules.get_mut(&module)?.source.as_mut()?;
        Some(bytemuck::cast_slice_mut(words.as_mut_slice()))
    }

    fn frame_count(&self) -> u32 {
        self.frame_count
    }
}

impl ParamRegistry for HeadlessEngine {
    fn widget_kind(&self, module: ModuleId, param: ParamId) -> Option<WidgetKind> {
        self.modules.get(&module)?.params.get(&param).copied()
    }
}
