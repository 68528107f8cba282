//! Typed parameter values for each widget kind.

use darkroom_engine::WidgetKind;
use serde::{Deserialize, Serialize};

use crate::config::BrushDefaults;
use crate::constants::widget::MIN_CROP_EXTENT;

/// A point in normalized image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn as_tuple(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

/// One side of a crop or pick rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Left,
    Right,
    Bottom,
    Top,
}

impl Edge {
    /// All edges in hit-test order.
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Bottom, Edge::Top];

    /// Whether the edge is a vertical line (positioned along x).
    pub fn is_vertical(&self) -> bool {
        matches!(self, Edge::Left | Edge::Right)
    }
}

/// Axis-aligned rectangle stored as its four edges.
///
/// `bottom`/`top` are the smaller/larger normalized y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edges {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl Edges {
    pub fn new(left: f32, right: f32, bottom: f32, top: f32) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    /// The whole image.
    pub fn full() -> Self {
        Self::new(0.0, 1.0, 0.0, 1.0)
    }

    pub fn get(&self, edge: Edge) -> f32 {
        match edge {
            Edge::Left => self.left,
            Edge::Right => self.right,
            Edge::Bottom => self.bottom,
            Edge::Top => self.top,
        }
    }

    pub fn set(&mut self, edge: Edge, value: f32) {
        match edge {
            Edge::Left => self.left = value,
            Edge::Right => self.right = value,
            Edge::Bottom => self.bottom = value,
            Edge::Top => self.top = value,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    /// Swap edges as needed so that left <= right and bottom <= top.
    pub fn normalized(self) -> Self {
        Self {
            left: self.left.min(self.right),
            right: self.left.max(self.right),
            bottom: self.bottom.min(self.top),
            top: self.bottom.max(self.top),
        }
    }

    pub fn is_ordered(&self) -> bool {
        self.left <= self.right && self.bottom <= self.top
    }

    /// Move a crop edge, keeping at least [`MIN_CROP_EXTENT`] from its
    /// opposite edge and staying inside the image.
    ///
    /// With an aspect lock (width / height) the dependent edges follow:
    /// left and bottom drags move the opposite edge along, right and top
    /// drags resize the other axis symmetrically about its center. The
    /// dragged value is limited so the locked box still fits the image with
    /// both sides at least [`MIN_CROP_EXTENT`]. Locks outside
    /// `[MIN_CROP_EXTENT, 1 / MIN_CROP_EXTENT]` are clamped into that range.
    pub fn drag_crop(&mut self, edge: Edge, value: f32, aspect_lock: Option<f32>) {
        let Some(aspect) = aspect_lock.filter(|a| a.is_finite() && *a > 0.0) else {
            let value = value.max(0.0).min(1.0);
            let value = match edge {
                Edge::Left => value.min(self.right - MIN_CROP_EXTENT),
                Edge::Right => value.max(self.left + MIN_CROP_EXTENT),
                Edge::Bottom => value.min(self.top - MIN_CROP_EXTENT),
                Edge::Top => value.max(self.bottom + MIN_CROP_EXTENT),
            };
            self.set(edge, value);
            return;
        };
        let aspect = bounded(aspect, MIN_CROP_EXTENT, 1.0 / MIN_CROP_EXTENT);
        // Allowed side lengths under the lock
        let min_w = MIN_CROP_EXTENT * aspect.max(1.0);
        let max_w = aspect.min(1.0);
        let min_h = MIN_CROP_EXTENT * (1.0 / aspect).max(1.0);
        let max_h = (1.0 / aspect).min(1.0);

        match edge {
            Edge::Left => {
                let h = bounded(self.height(), min_h, max_h);
                if h != self.height() {
                    let cy = bounded(0.5 * (self.top + self.bottom), 0.5 * h, 1.0 - 0.5 * h);
                    self.bottom = cy - 0.5 * h;
                    self.top = self.bottom + h;
                }
                let w = aspect * self.height();
                self.left = bounded(value, 0.0, 1.0 - w);
                self.right = self.left + w;
            }
            Edge::Bottom => {
                let w = bounded(self.width(), min_w, max_w);
                if w != self.width() {
                    let cx = bounded(0.5 * (self.right + self.left), 0.5 * w, 1.0 - 0.5 * w);
                    self.left = cx - 0.5 * w;
                    self.right = self.left + w;
                }
                let h = self.width() / aspect;
                self.bottom = bounded(value, 0.0, 1.0 - h);
                self.top = self.bottom + h;
            }
            Edge::Right => {
                let left = bounded(self.left, 0.0, 1.0 - min_w);
                let cy = bounded(0.5 * (self.top + self.bottom), 0.5 * min_h, 1.0 - 0.5 * min_h);
                let max_w = max_w.min(1.0 - left).min(aspect * 2.0 * cy.min(1.0 - cy));
                self.left = left;
                self.right = bounded(value, left + min_w, left + max_w);
                let h = self.width() / aspect;
                self.bottom = cy - 0.5 * h;
                self.top = self.bottom + h;
            }
            Edge::Top => {
                let bottom = bounded(self.bottom, 0.0, 1.0 - min_h);
                let cx = bounded(0.5 * (self.right + self.left), 0.5 * min_w, 1.0 - 0.5 * min_w);
                let max_h = max_h.min(1.0 - bottom).min(2.0 * cx.min(1.0 - cx) / aspect);
                self.bottom = bottom;
                self.top = bounded(value, bottom + min_h, bottom + max_h);
                let w = aspect * self.height();
                self.left = cx - 0.5 * w;
                self.right = self.left + w;
            }
        }
    }

    /// Move a pick edge. Dragging past the opposite edge pushes it along so
    /// the region never inverts.
    pub fn drag_pick(&mut self, edge: Edge, value: f32) {
        self.set(edge, value);
        match edge {
            Edge::Left if self.right < value => self.right = value,
            Edge::Right if self.left > value => self.left = value,
            Edge::Bottom if self.top < value => self.top = value,
            Edge::Top if self.bottom > value => self.bottom = value,
            _ => {}
        }
    }
}

/// `value` limited to `[lo, hi]`; `hi` wins when the range is empty.
fn bounded(value: f32, lo: f32, hi: f32) -> f32 {
    value.max(lo).min(hi)
}

/// Which brush parameter a scroll adjusts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrushParam {
    Radius,
    Opacity,
    Hardness,
}

/// Freehand brush settings, each in `(0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brush {
    pub radius: f32,
    pub opacity: f32,
    pub hardness: f32,
}

impl Brush {
    pub fn new(radius: f32, opacity: f32, hardness: f32) -> Self {
        Self {
            radius,
            opacity,
            hardness,
        }
    }

    pub fn get(&self, param: BrushParam) -> f32 {
        match param {
            BrushParam::Radius => self.radius,
            BrushParam::Opacity => self.opacity,
            BrushParam::Hardness => self.hardness,
        }
    }

    /// Multiply one parameter by `factor`, clamped to `[min, max]`.
    pub fn scale(&mut self, param: BrushParam, factor: f32, min: f32, max: f32) -> f32 {
        let slot = match param {
            BrushParam::Radius => &mut self.radius,
            BrushParam::Opacity => &mut self.opacity,
            BrushParam::Hardness => &mut self.hardness,
        };
        *slot = (*slot * factor).clamp(min, max);
        *slot
    }
}

impl From<BrushDefaults> for Brush {
    fn from(d: BrushDefaults) -> Self {
        Self::new(d.radius, d.opacity, d.hardness)
    }
}

/// Parameter values of the focused widget, typed by kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WidgetParams {
    Perspective { corners: [Point; 4] },
    Crop { edges: Edges },
    Pick { edges: Edges },
    Draw { brush: Brush },
}

impl WidgetParams {
    /// Build typed values from the parameter's raw floats.
    ///
    /// Perspective reads `x0 y0 x1 y1 x2 y2 x3 y3`, crop and pick read
    /// `left right bottom top`, draw reads `radius opacity hardness`.
    /// Missing slots take defaults; rectangles are normalized.
    pub fn from_raw(kind: WidgetKind, raw: &[f32], brush: BrushDefaults) -> Self {
        let at = |i: usize, default: f32| raw.get(i).copied().unwrap_or(default);
        match kind {
            WidgetKind::Perspective => {
                let unit = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
                let corners = std::array::from_fn(|c| {
                    Point::new(at(2 * c, unit[c].0), at(2 * c + 1, unit[c].1))
                });
                WidgetParams::Perspective { corners }
            }
            WidgetKind::Crop | WidgetKind::Pick => {
                let full = Edges::full();
                let edges = Edges::new(
                    at(0, full.left),
                    at(1, full.right),
                    at(2, full.bottom),
                    at(3, full.top),
                )
                .normalized();
                if kind == WidgetKind::Crop {
                    WidgetParams::Crop { edges }
                } else {
                    WidgetParams::Pick { edges }
                }
            }
            WidgetKind::Draw => WidgetParams::Draw {
                brush: Brush::new(at(0, brush.radius), at(1, brush.opacity), at(2, brush.hardness)),
            },
        }
    }

    /// Raw floats in the layout [`WidgetParams::from_raw`] reads.
    pub fn to_raw(&self) -> Vec<f32> {
        match self {
            WidgetParams::Perspective { corners } => {
                corners.iter().flat_map(|p| [p.x, p.y]).collect()
            }
            WidgetParams::Crop { edges } | WidgetParams::Pick { edges } => {
                vec![edges.left, edges.right, edges.bottom, edges.top]
            }
            WidgetParams::Draw { brush } => vec![brush.radius, brush.opacity, brush.hardness],
        }
    }

    pub fn kind(&self) -> WidgetKind {
        match self {
            WidgetParams::Perspective { .. } => WidgetKind::Perspective,
            WidgetParams::Crop { .. } => WidgetKind::Crop,
            WidgetParams::Pick { .. } => WidgetKind::Pick,
            WidgetParams::Draw { .. } => WidgetKind::Draw,
        }
    }
}
