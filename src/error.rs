//! Error types for the darkroom canvas.

use thiserror::Error;

/// Errors that abort handling of a single input event.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionError {
    /// The graph has no resolvable display node.
    #[error("No display node in the graph")]
    MissingDisplay,
}

/// Errors from the mask stroke buffer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskError {
    /// No room for another vertex; the append was dropped.
    #[error("Mask buffer is full")]
    Full,

    /// The mapped memory cannot be viewed as a mask buffer.
    #[error("Mask buffer layout invalid: {reason}")]
    Layout {
        /// What is wrong with the byte region
        reason: &'static str,
    },
}

/// Errors from the replay driver.
#[derive(Error, Debug)]
pub enum ReplayError {
    /// I/O error reading a script or config file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Script parsing or summary serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration rejected
    #[error("Config error: {0}")]
    Config(#[from] crate::config::ConfigError),
}
