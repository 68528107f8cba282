//! Configuration for the darkroom canvas.
//!
//! Only (de)serialization lives here; where the file is stored is up to the
//! shell.

use serde::{Deserialize, Serialize};

use crate::constants::{widget, zoom};
use crate::keybindings::KeyBindings;

/// How much the canvas logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Failed recompute runs
    Error,
    /// Also events dropped for a missing display node or mask buffer
    Warn,
    /// Also session entry and replay totals
    #[default]
    Info,
    /// Also zoom, pan, focus and grab transitions
    Debug,
    /// Also every handle move, dab and graph run
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Format version written by this build; files from a newer build are refused.
pub const CONFIG_VERSION: u32 = 1;

/// Viewport scale limits and zoom factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Smallest explicit scale
    pub min_scale: f32,
    /// Largest explicit scale
    pub max_scale: f32,
    /// Scale multiplier per scroll-up tick
    pub scroll_in_factor: f32,
    /// Scale multiplier per scroll-down tick
    pub scroll_out_factor: f32,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            min_scale: zoom::MIN_SCALE,
            max_scale: zoom::MAX_SCALE,
            scroll_in_factor: zoom::SCROLL_IN_FACTOR,
            scroll_out_factor: zoom::SCROLL_OUT_FACTOR,
        }
    }
}

/// Brush parameters used when a draw widget has no stored values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushDefaults {
    pub radius: f32,
    pub opacity: f32,
    pub hardness: f32,
}

impl Default for BrushDefaults {
    fn default() -> Self {
        Self {
            radius: widget::DEFAULT_BRUSH_RADIUS,
            opacity: widget::DEFAULT_BRUSH_OPACITY,
            hardness: widget::DEFAULT_BRUSH_HARDNESS,
        }
    }
}

/// Widget hit-testing and brush adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Hit radius as a fraction of the display area height
    pub hit_radius_fraction: f32,
    /// Brush parameter multiplier per scroll tick
    pub brush_scroll_factor: f32,
    /// Lower clamp for brush parameters
    pub brush_min: f32,
    /// Upper clamp for brush parameters
    pub brush_max: f32,
    /// Brush used when the parameter store has none
    pub default_brush: BrushDefaults,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            hit_radius_fraction: widget::HIT_RADIUS_FRACTION,
            brush_scroll_factor: widget::BRUSH_SCROLL_FACTOR,
            brush_min: widget::BRUSH_MIN,
            brush_max: widget::BRUSH_MAX,
            default_brush: BrushDefaults::default(),
        }
    }
}

/// Canvas settings, stored by the shell as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    pub version: u32,

    #[serde(default)]
    pub log_level: LogLevel,

    #[serde(default)]
    pub navigation: NavigationConfig,

    #[serde(default)]
    pub widgets: WidgetConfig,

    #[serde(default)]
    pub keybindings: KeyBindings,
}

impl EditorConfig {
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            log_level: LogLevel::default(),
            navigation: NavigationConfig::default(),
            widgets: WidgetConfig::default(),
            keybindings: KeyBindings::default(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse settings; missing sections and fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Why an editor config was refused.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Editor config is not valid JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Written by a newer darkroom build.
    #[error("Editor config version {file_version} is newer than this build reads ({supported_version})")]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },
}
