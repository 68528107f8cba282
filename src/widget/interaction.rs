//! Press/motion/release and scroll handling for the focused widget.
//!
//! Hit-testing happens in viewport pixels so the grab radius is the same at
//! every zoom level. The grabbed handle is fixed at press time: the cursor
//! may leave the hit radius during the drag.

use darkroom_input::Modifiers;
use serde::Serialize;

use super::params::{BrushParam, Edge, WidgetParams};
use super::{ActiveWidget, DragState};
use crate::config::WidgetConfig;
use crate::coords::Mapper;

/// A draggable part of a geometric widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Handle {
    /// Perspective quad corner, 0..4.
    Corner(usize),
    /// Crop or pick rectangle edge.
    Edge(Edge),
}

/// Find the handle nearest to `cursor` within `radius_px` viewport pixels.
///
/// Corners compare euclidean distance; edges compare distance across the
/// edge only. On equal distance the first handle wins.
pub fn hit_test(params: &WidgetParams, mapper: &Mapper, cursor: (f32, f32), radius_px: f32) -> Option<Handle> {
    let reach = radius_px * radius_px;
    let mut best: Option<(f32, Handle)> = None;
    let mut consider = |dist2: f32, handle: Handle| {
        if dist2 < reach && best.map_or(true, |(d, _)| dist2 < d) {
            best = Some((dist2, handle));
        }
    };

    match params {
        WidgetParams::Perspective { corners } => {
            for (c, corner) in corners.iter().enumerate() {
                let v = mapper.image_to_view(corner.as_tuple());
                let dx = v.0 - cursor.0;
                let dy = v.1 - cursor.1;
                consider(dx * dx + dy * dy, Handle::Corner(c));
            }
        }
        WidgetParams::Crop { edges } | WidgetParams::Pick { edges } => {
            for edge in Edge::ALL {
                let d = if edge.is_vertical() {
                    mapper.image_x_to_view(edges.get(edge)) - cursor.0
                } else {
                    mapper.image_y_to_view(edges.get(edge)) - cursor.1
                };
                consider(d * d, Handle::Edge(edge));
            }
        }
        WidgetParams::Draw { .. } => {}
    }

    best.map(|(_, handle)| handle)
}

impl ActiveWidget {
    /// Press on a geometric widget: grab the nearest handle in reach.
    /// Returns whether the press was consumed.
    pub fn press_handle(&mut self, mapper: &Mapper, cursor: (f32, f32), radius_px: f32) -> bool {
        match hit_test(&self.params, mapper, cursor, radius_px) {
            Some(handle) => {
                log::debug!("Grabbed {:?} of {} widget", handle, self.kind().name());
                self.drag = DragState::Handle(handle);
                true
            }
            None => {
                self.drag = DragState::Idle;
                false
            }
        }
    }

    /// Left button went down on a draw widget.
    pub fn begin_painting(&mut self) {
        self.drag = DragState::Painting;
    }

    /// Any button released: the drag ends.
    pub fn release(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Move the grabbed handle to a normalized image position.
    /// Returns whether a parameter changed.
    pub fn drag_to(&mut self, n: (f32, f32)) -> bool {
        let DragState::Handle(handle) = self.drag else {
            return false;
        };
        match (&mut self.params, handle) {
            (WidgetParams::Perspective { corners }, Handle::Corner(c)) => {
                let Some(corner) = corners.get_mut(c) else {
                    return false;
                };
                *corner = n.into();
            }
            (WidgetParams::Crop { edges }, Handle::Edge(edge)) => {
                let value = if edge.is_vertical() { n.0 } else { n.1 };
                edges.drag_crop(edge, value, self.aspect_lock);
            }
            (WidgetParams::Pick { edges }, Handle::Edge(edge)) => {
                let value = if edge.is_vertical() { n.0 } else { n.1 };
                edges.drag_pick(edge, value);
            }
            _ => return false,
        }
        log::trace!("{:?} -> ({:.4}, {:.4})", handle, n.0, n.1);
        true
    }

    /// Scroll over a draw widget adjusts the brush: shift for opacity,
    /// ctrl for hardness, radius otherwise. Returns the adjusted parameter
    /// and its new value, or `None` when the widget has no brush.
    pub fn scroll_brush(&mut self, delta: f32, modifiers: Modifiers, config: &WidgetConfig) -> Option<(BrushParam, f32)> {
        let WidgetParams::Draw { brush } = &mut self.params else {
            return None;
        };
        let param = if modifiers.shift {
            BrushParam::Opacity
        } else if modifiers.ctrl {
            BrushParam::Hardness
        } else {
            BrushParam::Radius
        };
        let factor = if delta > 0.0 {
            config.brush_scroll_factor
        } else {
            1.0 / config.brush_scroll_factor
        };
        let value = brush.scale(param, factor, config.brush_min, config.brush_max);
        log::debug!("Brush {:?}: {:.3}", param, value);
        Some((param, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BrushDefaults;
    use crate::coords::ViewportState;
    use crate::widget::{Edges, Point};
    use darkroom_engine::{ModuleId, ParamId, WidgetKind};

    const IMAGE: (u32, u32) = (1000, 1000);

    // 1000x1000 display over a 1000x1000 image: fit scale 1, view == pixels
    fn mapper() -> Mapper {
        ViewportState::new((0.0, 0.0), (1000.0, 1000.0)).mapper(IMAGE)
    }

    fn widget(params: WidgetParams) -> ActiveWidget {
        ActiveWidget::new(ModuleId(1), ParamId(0), params, None)
    }

    fn quad() -> WidgetParams {
        WidgetParams::Perspective {
            corners: [
                Point::new(0.1, 0.1),
                Point::new(0.9, 0.1),
                Point::new(0.9, 0.9),
                Point::new(0.1, 0.9),
            ],
        }
    }

    #[test]
    fn test_corner_hit_picks_nearest() {
        let m = mapper();
        assert_eq!(hit_test(&quad(), &m, (880.0, 120.0), 100.0), Some(Handle::Corner(1)));
        assert_eq!(hit_test(&quad(), &m, (500.0, 500.0), 100.0), None);
    }

    #[test]
    fn test_corner_tie_goes_to_first() {
        let m = mapper();
        let params = WidgetParams::Perspective {
            corners: [
                Point::new(0.375, 0.5),
                Point::new(0.625, 0.5),
                Point::new(0.9, 0.9),
                Point::new(0.1, 0.9),
            ],
        };
        assert_eq!(hit_test(&params, &m, (500.0, 500.0), 150.0), Some(Handle::Corner(0)));
    }

    #[test]
    fn test_edge_hit_measures_across_edge_only() {
        let m = mapper();
        let params = WidgetParams::Crop {
            edges: Edges::new(0.2, 0.8, 0.3, 0.7),
        };
        // Far along the edge, close across it
        assert_eq!(hit_test(&params, &m, (210.0, 990.0), 50.0), Some(Handle::Edge(Edge::Left)));
        assert_eq!(hit_test(&params, &m, (500.0, 690.0), 50.0), Some(Handle::Edge(Edge::Top)));
        assert_eq!(hit_test(&params, &m, (500.0, 500.0), 50.0), None);
    }

    #[test]
    fn test_draw_has_no_handles() {
        let params = WidgetParams::from_raw(WidgetKind::Draw, &[], BrushDefaults::default());
        assert_eq!(hit_test(&params, &mapper(), (0.0, 0.0), 1e6), None);
    }

    #[test]
    fn test_perspective_drag_moves_only_grabbed_corner() {
        let m = mapper();
        let mut w = widget(quad());
        assert!(w.press_handle(&m, (100.0, 905.0), 100.0));
        assert_eq!(w.selected(), Some(Handle::Corner(3)));

        // The handle stays grabbed far outside the hit radius
        assert!(w.drag_to((0.5, 0.2)));
        match w.params {
            WidgetParams::Perspective { corners } => {
                assert_eq!(corners[3], Point::new(0.5, 0.2));
                assert_eq!(corners[0], Point::new(0.1, 0.1));
            }
            other => panic!("Expected perspective, got {:?}", other),
        }

        w.release();
        assert_eq!(w.selected(), None);
        assert!(!w.drag_to((0.0, 0.0)));
    }

    #[test]
    fn test_crop_drag_respects_aspect_lock() {
        let m = mapper();
        let mut w = ActiveWidget::new(
            ModuleId(1),
            ParamId(0),
            WidgetParams::Crop {
                edges: Edges::new(0.2, 0.6, 0.2, 0.6),
            },
            Some(1.5),
        );
        assert!(w.press_handle(&m, (195.0, 400.0), 100.0));
        assert!(w.drag_to((0.1, 0.9)));
        match w.params {
            WidgetParams::Crop { edges } => {
                assert!((edges.left - 0.1).abs() < 1e-6);
                assert!((edges.width() / edges.height() - 1.5).abs() < 1e-5);
            }
            other => panic!("Expected crop, got {:?}", other),
        }
    }

    #[test]
    fn test_missed_press_is_not_consumed() {
        let mut w = widget(quad());
        assert!(!w.press_handle(&mapper(), (500.0, 500.0), 10.0));
        assert_eq!(w.drag_state(), DragState::Idle);
    }

    #[test]
    fn test_scroll_brush_modifiers() {
        let config = WidgetConfig::default();
        let mut w = widget(WidgetParams::Draw {
            brush: crate::widget::Brush::new(0.5, 0.5, 0.5),
        });

        let (param, value) = w.scroll_brush(1.0, Modifiers::NONE, &config).expect("draw widget");
        assert_eq!(param, BrushParam::Radius);
        assert!((value - 0.6).abs() < 1e-6);

        let (param, _) = w.scroll_brush(-1.0, Modifiers::shift(), &config).expect("draw widget");
        assert_eq!(param, BrushParam::Opacity);

        let (param, value) = w.scroll_brush(-1.0, Modifiers::ctrl(), &config).expect("draw widget");
        assert_eq!(param, BrushParam::Hardness);
        assert!((value - 0.5 / 1.2).abs() < 1e-6);

        let mut crop = widget(WidgetParams::Crop { edges: Edges::full() });
        assert_eq!(crop.scroll_brush(1.0, Modifiers::NONE, &config), None);
    }
}
