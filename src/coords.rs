//! Viewport-pixel to normalized-image coordinate mapping.
//!
//! The display area is the on-screen rectangle the image is drawn into.
//! At an explicit scale `s` (screen pixels per image pixel) the image pixel
//! `focal_point` sits at the middle of that rectangle:
//!
//! ```text
//! view = view_center + s * (norm * image_size - focal_point)
//! norm = ((view - view_center) / s + focal_point) / image_size
//! ```
//!
//! In fit mode `s` is the largest scale that shows the whole image and the
//! focal point is the image center.

use serde::{Deserialize, Serialize};

use crate::constants::zoom;

/// Pan/zoom state of the canvas for one editing session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    /// Top-left corner of the display area in viewport pixels.
    pub center: (f32, f32),
    /// Width and height of the display area in viewport pixels.
    pub extent: (f32, f32),
    /// Screen pixels per image pixel, or `<= 0` for fit.
    pub scale: f32,
    /// Image pixel kept at the middle of the display area.
    pub focal_point: (f32, f32),
}

impl ViewportState {
    /// A fitted viewport over the given display area.
    pub fn new(center: (f32, f32), extent: (f32, f32)) -> Self {
        Self {
            center,
            extent,
            scale: zoom::FIT,
            focal_point: (0.0, 0.0),
        }
    }

    #[inline]
    pub fn is_fit(&self) -> bool {
        self.scale <= 0.0
    }

    /// Middle of the display area in viewport pixels.
    pub fn view_center(&self) -> (f32, f32) {
        (
            self.center.0 + 0.5 * self.extent.0,
            self.center.1 + 0.5 * self.extent.1,
        )
    }

    /// Whether a viewport pixel lies inside the display area.
    pub fn contains_view(&self, p: (f32, f32)) -> bool {
        p.0 >= self.center.0
            && p.0 < self.center.0 + self.extent.0
            && p.1 >= self.center.1
            && p.1 < self.center.1 + self.extent.1
    }

    /// Scale that fits an image of `image_size` pixels into the display area.
    pub fn fit_scale(&self, image_size: (u32, u32)) -> f32 {
        let (wd, ht) = image_dims(image_size);
        (self.extent.0 / wd).min(self.extent.1 / ht)
    }

    /// The scale actually in effect, resolving the fit sentinel.
    pub fn effective_scale(&self, image_size: (u32, u32)) -> f32 {
        if self.is_fit() {
            self.fit_scale(image_size)
        } else {
            self.scale
        }
    }

    /// The focal point actually in effect; fit always centers the image.
    pub fn effective_focal_point(&self, image_size: (u32, u32)) -> (f32, f32) {
        if self.is_fit() {
            image_center(image_size)
        } else {
            self.focal_point
        }
    }

    /// Offset of a viewport pixel from the middle of the display area.
    pub fn cursor_offset(&self, p: (f32, f32)) -> (f32, f32) {
        let c = self.view_center();
        (p.0 - c.0, p.1 - c.1)
    }

    /// Snapshot a mapper for the current state and display resolution.
    pub fn mapper(&self, image_size: (u32, u32)) -> Mapper {
        Mapper {
            view_center: self.view_center(),
            scale: self.effective_scale(image_size),
            focal_point: self.effective_focal_point(image_size),
            image: image_dims(image_size),
        }
    }
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new((0.0, 0.0), (0.0, 0.0))
    }
}

/// Image dimensions as floats, never zero.
fn image_dims(image_size: (u32, u32)) -> (f32, f32) {
    (image_size.0.max(1) as f32, image_size.1.max(1) as f32)
}

/// Center of an image in image pixels.
pub fn image_center(image_size: (u32, u32)) -> (f32, f32) {
    let (wd, ht) = image_dims(image_size);
    (0.5 * wd, 0.5 * ht)
}

/// Bidirectional viewport/image transform for one viewport state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mapper {
    view_center: (f32, f32),
    scale: f32,
    focal_point: (f32, f32),
    image: (f32, f32),
}

impl Mapper {
    /// Normalized image coordinates to viewport pixels.
    pub fn image_to_view(&self, n: (f32, f32)) -> (f32, f32) {
        (
            self.view_center.0 + self.scale * (n.0 * self.image.0 - self.focal_point.0),
            self.view_center.1 + self.scale * (n.1 * self.image.1 - self.focal_point.1),
        )
    }

    /// Viewport pixels to normalized image coordinates. Exact inverse of
    /// [`Mapper::image_to_view`].
    pub fn view_to_image(&self, v: (f32, f32)) -> (f32, f32) {
        (
            ((v.0 - self.view_center.0) / self.scale + self.focal_point.0) / self.image.0,
            ((v.1 - self.view_center.1) / self.scale + self.focal_point.1) / self.image.1,
        )
    }

    /// Viewport x of a normalized x coordinate.
    pub fn image_x_to_view(&self, x: f32) -> f32 {
        self.image_to_view((x, 0.0)).0
    }

    /// Viewport y of a normalized y coordinate.
    pub fn image_y_to_view(&self, y: f32) -> f32 {
        self.image_to_view((0.0, y)).1
    }
}
