//! Replays a recorded event script against a headless engine.
//!
//! Used for reproducing interaction bugs without a window or a GPU.

use std::path::Path;

use darkroom_engine::{HeadlessEngine, ModuleId, ParamId, WidgetKind};
use darkroom_input::Event;
use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::context::EditorContext;
use crate::coords::ViewportState;
use crate::error::ReplayError;
use crate::keybindings::KeyCommand;
use crate::mask::MaskBufferView;
use crate::widget::WidgetParams;

/// Display area of the canvas in window pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayArea {
    /// Top-left corner
    pub center: (f32, f32),
    pub extent: (f32, f32),
}

/// The parameter focused before the first event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptWidget {
    pub module: ModuleId,
    pub param: ParamId,
    pub kind: WidgetKind,
    /// Raw parameter floats as stored by the module.
    #[serde(default)]
    pub raw: Vec<f32>,
    #[serde(default)]
    pub aspect: Option<f32>,
    /// Size of the module's mask buffer; draw widgets only.
    #[serde(default)]
    pub mask_capacity_bytes: Option<usize>,
}

/// A recorded session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    /// Display node resolution; `None` simulates a graph without one.
    pub resolution: Option<(u32, u32)>,
    pub display: DisplayArea,
    #[serde(default)]
    pub widget: Option<ScriptWidget>,
    #[serde(default = "default_frames")]
    pub frames: u32,
    pub events: Vec<Event>,
}

fn default_frames() -> u32 {
    1
}

impl ReplayScript {
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// End state of a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplaySummary {
    pub viewport: ViewportState,
    pub widget: Option<WidgetParams>,
    pub mask_vertices: Option<usize>,
    pub mask_strokes: Option<usize>,
    /// Graph runs requested by the canvas.
    pub runs: usize,
    pub commands: Vec<KeyCommand>,
    /// Events dropped because the graph had no display node.
    pub rejected_events: usize,
}

impl ReplaySummary {
    pub fn to_json(&self) -> Result<String, ReplayError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Build the engine a script describes.
fn build_engine(script: &ReplayScript) -> HeadlessEngine {
    let mut engine = match script.resolution {
        Some((w, h)) => HeadlessEngine::new(w, h),
        None => HeadlessEngine::without_display(),
    }
    .with_frame_count(script.frames);
    if let Some(w) = &script.widget {
        engine = engine.with_widget(w.module, w.param, w.kind);
        if let Some(capacity) = w.mask_capacity_bytes {
            engine = engine.with_mask_buffer(w.module, capacity);
        }
    }
    engine
}

/// Drive a fresh context through every event of `script`.
pub fn run_script(script: &ReplayScript, config: EditorConfig) -> Result<ReplaySummary, ReplayError> {
    let mut engine = build_engine(script);
    let mut ctx = EditorContext::new(config, script.display.center, script.display.extent);

    if let Err(e) = ctx.enter(&engine) {
        log::warn!("Replay starts without a display: {}", e);
    }
    if let Some(w) = &script.widget {
        ctx.focus_widget(&engine, w.module, w.param, &w.raw, w.aspect);
    }

    let mut commands = Vec::new();
    let mut rejected_events = 0;
    for (i, event) in script.events.iter().enumerate() {
        match ctx.handle_event(&mut engine, *event) {
            Ok(Some(command)) => commands.push(command),
            Ok(None) => {}
            Err(e) => {
                match event.position() {
                    Some((x, y)) => log::debug!("Event {} at ({:.1}, {:.1}) rejected: {}", i, x, y, e),
                    None => log::debug!("Event {} rejected: {}", i, e),
                }
                rejected_events += 1;
            }
        }
    }
    log::info!(
        "Replayed {} events ({} rejected, {} runs)",
        script.events.len(),
        rejected_events,
        engine.runs().len()
    );

    let mask = ctx.widget().and_then(|w| {
        let mut words = engine.source_words(w.module)?.to_vec();
        let view = MaskBufferView::from_words(&mut words).ok()?;
        Some((view.len(), view.stroke_count()))
    });

    Ok(ReplaySummary {
        viewport: *ctx.viewport(),
        widget: ctx.widget().map(|w| w.params),
        mask_vertices: mask.map(|(vertices, _)| vertices),
        mask_strokes: mask.map(|(_, strokes)| strokes),
        runs: engine.runs().len(),
        commands,
        rejected_events,
    })
}
