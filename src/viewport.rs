//! Viewport navigation: scroll zoom, the middle-click zoom cycle, and panning.
//!
//! Every zoom that keeps an explicit scale is anchored at the cursor: the
//! image point under the cursor before the zoom is still under it after.

use crate::config::NavigationConfig;
use crate::constants::zoom;
use crate::coords::{image_center, ViewportState};

/// Where a pan drag started.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PanAnchor {
    cursor: (f32, f32),
    focal_point: (f32, f32),
}

/// Owns and mutates the [`ViewportState`].
#[derive(Debug, Clone)]
pub struct Navigator {
    state: ViewportState,
    pan: Option<PanAnchor>,
    limits: NavigationConfig,
}

impl Navigator {
    pub fn new(center: (f32, f32), extent: (f32, f32), limits: NavigationConfig) -> Self {
        Self {
            state: ViewportState::new(center, extent),
            pan: None,
            limits,
        }
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    /// Move or resize the on-screen display area.
    pub fn set_display_area(&mut self, center: (f32, f32), extent: (f32, f32)) {
        self.state.center = center;
        self.state.extent = extent;
    }

    /// Fit the image to the display area and center it.
    pub fn reset_to_fit(&mut self, image_size: (u32, u32)) {
        self.state.scale = zoom::FIT;
        self.state.focal_point = image_center(image_size);
        log::debug!("🔍 Zoom reset to fit");
    }

    /// Continuous zoom from a scroll tick at `cursor`.
    ///
    /// Zooming out past the fit scale recenters the image instead of
    /// anchoring at the cursor.
    pub fn scroll_zoom(&mut self, cursor: (f32, f32), delta: f32, image_size: (u32, u32)) {
        if delta == 0.0 {
            return;
        }
        let fit_scale = self.state.fit_scale(image_size);
        let old_scale = self.state.effective_scale(image_size);
        let factor = if delta > 0.0 {
            self.limits.scroll_in_factor
        } else {
            self.limits.scroll_out_factor
        };
        let new_scale = (old_scale * factor).clamp(self.limits.min_scale, self.limits.max_scale);

        if new_scale >= fit_scale {
            self.rescale_about(cursor, new_scale, image_size);
        } else {
            self.state.scale = new_scale;
            self.state.focal_point = image_center(image_size);
        }
        log::debug!(
            "🔍 Scroll zoom: {:.3}x -> {:.3}x (fit {:.3}x)",
            old_scale,
            new_scale,
            fit_scale
        );
    }

    /// Discrete zoom cycle: fit, 1x, 2x, 4x, 8x, fit, ...
    pub fn cycle_zoom(&mut self, cursor: (f32, f32), image_size: (u32, u32)) {
        if self.state.is_fit() {
            self.rescale_about(cursor, zoom::NATIVE_SCALE, image_size);
        } else if self.state.scale >= self.limits.max_scale || self.state.scale < zoom::NATIVE_SCALE {
            self.reset_to_fit(image_size);
            return;
        } else {
            let doubled = (self.state.scale * 2.0).min(self.limits.max_scale);
            self.rescale_about(cursor, doubled, image_size);
        }
        log::debug!("🔍 Zoom cycle: {:.1}x", self.state.scale);
    }

    /// Change the scale while keeping the image point under `cursor` fixed.
    fn rescale_about(&mut self, cursor: (f32, f32), new_scale: f32, image_size: (u32, u32)) {
        let old_scale = self.state.effective_scale(image_size);
        let focal = self.state.effective_focal_point(image_size);
        let offset = self.state.cursor_offset(cursor);
        let dscale = 1.0 / old_scale - 1.0 / new_scale;

        self.state.scale = new_scale;
        self.state.focal_point = (focal.0 + offset.0 * dscale, focal.1 + offset.1 * dscale);
    }

    /// Start a pan drag at `cursor`.
    pub fn begin_pan(&mut self, cursor: (f32, f32), image_size: (u32, u32)) {
        self.pan = Some(PanAnchor {
            cursor,
            focal_point: self.state.effective_focal_point(image_size),
        });
        log::debug!("Pan drag started at ({:.1}, {:.1})", cursor.0, cursor.1);
    }

    /// Follow the cursor during a pan drag. Returns whether the view moved.
    ///
    /// Fit mode has nothing to pan; the drag is tracked but ignored.
    pub fn pan_to(&mut self, cursor: (f32, f32), image_size: (u32, u32)) -> bool {
        let Some(anchor) = self.pan else {
            return false;
        };
        if self.state.is_fit() {
            return false;
        }
        let scale = self.state.scale;
        let (wd, ht) = (image_size.0 as f32, image_size.1 as f32);
        let dx = cursor.0 - anchor.cursor.0;
        let dy = cursor.1 - anchor.cursor.1;
        self.state.focal_point = (
            (anchor.focal_point.0 - dx / scale).clamp(0.0, wd),
            (anchor.focal_point.1 - dy / scale).clamp(0.0, ht),
        );
        log::trace!(
            "🖐️ Panning: delta({:.1}, {:.1}) -> focal({:.1}, {:.1})",
            dx,
            dy,
            self.state.focal_point.0,
            self.state.focal_point.1
        );
        true
    }

    pub fn end_pan(&mut self) {
        if self.pan.take().is_some() {
            log::debug!("Pan drag ended");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPSILON: f32 = 0.001;
    const IMAGE: (u32, u32) = (2000, 1000);

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn navigator() -> Navigator {
        let mut nav = Navigator::new((0.0, 0.0), (1000.0, 500.0), NavigationConfig::default());
        nav.reset_to_fit(IMAGE);
        nav
    }

    fn image_point_under(nav: &Navigator, cursor: (f32, f32)) -> (f32, f32) {
        nav.state().mapper(IMAGE).view_to_image(cursor)
    }

    #[test]
    fn test_cycle_sequence() {
        let mut nav = navigator();
        let cursor = (300.0, 200.0);
        let mut scales = Vec::new();
        for _ in 0..6 {
            nav.cycle_zoom(cursor, IMAGE);
            scales.push(nav.state().scale);
        }
        assert_eq!(&scales[..5], &[1.0, 2.0, 4.0, 8.0, zoom::FIT]);
        assert_eq!(scales[5], 1.0);
    }

    #[test]
    fn test_cycle_preserves_cursor_point() {
        let mut nav = navigator();
        let cursor = (700.0, 120.0);
        let before = image_point_under(&nav, cursor);
        nav.cycle_zoom(cursor, IMAGE);
        let after = image_point_under(&nav, cursor);
        assert!(approx_eq(before.0, after.0));
        assert!(approx_eq(before.1, after.1));

        nav.cycle_zoom(cursor, IMAGE);
        let doubled = image_point_under(&nav, cursor);
        assert!(approx_eq(before.0, doubled.0));
        assert!(approx_eq(before.1, doubled.1));
    }

    #[test]
    fn test_cycle_from_below_native_resets() {
        let mut nav = navigator();
        nav.scroll_zoom((500.0, 250.0), 1.0, IMAGE); // fit 0.5 -> 0.55
        assert!(nav.state().scale < 1.0 && nav.state().scale > 0.0);
        nav.cycle_zoom((500.0, 250.0), IMAGE);
        assert!(nav.state().is_fit());
        assert_eq!(nav.state().focal_point, (1000.0, 500.0));
    }

    #[test]
    fn test_scroll_in_anchors_at_cursor() {
        let mut nav = navigator();
        let cursor = (100.0, 400.0);
        let before = image_point_under(&nav, cursor);
        nav.scroll_zoom(cursor, 1.0, IMAGE);
        assert!(approx_eq(nav.state().scale, 0.55));
        let after = image_point_under(&nav, cursor);
        assert!(approx_eq(before.0, after.0));
        assert!(approx_eq(before.1, after.1));
    }

    #[test]
    fn test_scroll_out_below_fit_recenters() {
        let mut nav = navigator();
        nav.scroll_zoom((900.0, 100.0), 1.0, IMAGE);
        nav.scroll_zoom((900.0, 100.0), -1.0, IMAGE);
        nav.scroll_zoom((900.0, 100.0), -1.0, IMAGE);
        assert!(nav.state().scale < nav.state().fit_scale(IMAGE));
        assert_eq!(nav.state().focal_point, (1000.0, 500.0));
    }

    #[test]
    fn test_zero_scroll_is_ignored() {
        let mut nav = navigator();
        nav.scroll_zoom((10.0, 10.0), 0.0, IMAGE);
        assert!(nav.state().is_fit());
    }

    #[test]
    fn test_pan_moves_against_cursor_and_clamps() {
        let mut nav = navigator();
        nav.cycle_zoom((500.0, 250.0), IMAGE); // 1x, focal stays at center
        nav.begin_pan((500.0, 250.0), IMAGE);
        assert!(nav.pan_to((400.0, 200.0), IMAGE));
        assert!(approx_eq(nav.state().focal_point.0, 1100.0));
        assert!(approx_eq(nav.state().focal_point.1, 550.0));

        nav.pan_to((-5000.0, 250.0), IMAGE);
        assert!(approx_eq(nav.state().focal_point.0, 2000.0));

        nav.end_pan();
        assert!(!nav.pan_to((0.0, 0.0), IMAGE));
    }

    #[test]
    fn test_pan_in_fit_mode_does_nothing() {
        let mut nav = navigator();
        nav.begin_pan((500.0, 250.0), IMAGE);
        assert!(!nav.pan_to((100.0, 100.0), IMAGE));
        assert_eq!(nav.state().focal_point, (1000.0, 500.0));
    }

    proptest! {
        #[test]
        fn prop_scroll_scale_stays_in_range(
            ticks in proptest::collection::vec(prop_oneof![Just(1.0f32), Just(-1.0f32)], 1..200),
            cx in 0.0f32..1000.0,
            cy in 0.0f32..500.0,
        ) {
            let mut nav = navigator();
            for delta in ticks {
                nav.scroll_zoom((cx, cy), delta, IMAGE);
                let s = nav.state().scale;
                prop_assert!(s >= zoom::MIN_SCALE && s <= zoom::MAX_SCALE, "scale {}", s);
            }
        }
    }
}
