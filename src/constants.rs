//! Interaction constants shared across the canvas.
//!
//! These are the defaults; most of them can be overridden through
//! [`crate::config::EditorConfig`].

/// Viewport scale limits and zoom step factors.
pub mod zoom {
    /// Smallest explicit scale (screen pixels per image pixel).
    pub const MIN_SCALE: f32 = 0.1;
    /// Largest explicit scale; the middle-click cycle resets to fit past this.
    pub const MAX_SCALE: f32 = 8.0;
    /// Scale multiplier per scroll-up tick.
    pub const SCROLL_IN_FACTOR: f32 = 1.1;
    /// Scale multiplier per scroll-down tick.
    pub const SCROLL_OUT_FACTOR: f32 = 0.9;
    /// Scale the middle-click cycle jumps to from fit.
    pub const NATIVE_SCALE: f32 = 1.0;
    /// Sentinel stored in `ViewportState::scale` for "fit to viewport".
    pub const FIT: f32 = -1.0;
}

/// Widget hit-testing and brush adjustment.
pub mod widget {
    /// Hit radius as a fraction of the display area height.
    pub const HIT_RADIUS_FRACTION: f32 = 0.1;
    /// Brush parameter multiplier per scroll tick.
    pub const BRUSH_SCROLL_FACTOR: f32 = 1.2;
    /// Lower clamp for radius, opacity and hardness.
    pub const BRUSH_MIN: f32 = 0.1;
    /// Upper clamp for radius, opacity and hardness.
    pub const BRUSH_MAX: f32 = 1.0;
    /// Smallest crop width or height, as a fraction of the image.
    pub const MIN_CROP_EXTENT: f32 = 0.05;
    pub const DEFAULT_BRUSH_RADIUS: f32 = 0.5;
    pub const DEFAULT_BRUSH_OPACITY: f32 = 1.0;
    pub const DEFAULT_BRUSH_HARDNESS: f32 = 1.0;
}

/// Mask buffer layout.
pub mod mask {
    /// Words in the header (the vertex count).
    pub const HEADER_WORDS: usize = 1;
    /// Words per stroke vertex (position + brush parameters).
    pub const WORDS_PER_VERTEX: usize = 2;
    /// Full scale of a 16-bit normalized component.
    pub const UNORM16_MAX: f32 = 65535.0;
    /// Full scale of an 8-bit normalized component.
    pub const UNORM8_MAX: f32 = 255.0;
}
