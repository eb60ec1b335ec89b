use egui::Color32;
use kurbo::{BezPath, Point};
use uuid::Uuid;

use crate::geometry::{self, SmoothingMode};

/// Stable identity of a stroke across undo/redo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StrokeId(Uuid);

impl StrokeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for StrokeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StrokeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Width and color a stroke is painted with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub width: f64,
    pub color: Color32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: 3.0,
            color: Color32::BLACK,
        }
    }
}

/// A finished stroke: captured points plus the curve derived from them.
///
/// All fields are owned, so `clone` is a full snapshot that later edits to
/// the store cannot reach.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    id: StrokeId,
    points: Vec<Point>,
    path: BezPath,
    style: StrokeStyle,
}

impl Stroke {
    /// Build a stroke, deriving its geometry from `points` with `mode`.
    pub fn new(points: Vec<Point>, style: StrokeStyle, mode: SmoothingMode) -> Self {
        let path = mode.apply(&points);
        Self::from_parts(StrokeId::new(), points, path, style)
    }

    /// Build a stroke around geometry that was computed elsewhere (e.g. read
    /// back from an exported document).
    pub fn from_parts(id: StrokeId, points: Vec<Point>, path: BezPath, style: StrokeStyle) -> Self {
        Self {
            id,
            points,
            path,
            style,
        }
    }

    pub fn id(&self) -> StrokeId {
        self.id
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The rendered curve.
    pub fn path(&self) -> &BezPath {
        &self.path
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }
}

/// In-progress point capture for a single gesture.
#[derive(Debug, Clone)]
pub struct MutableStroke {
    points: Vec<Point>,
    style: StrokeStyle,
}

impl MutableStroke {
    pub fn new(start: Point, style: StrokeStyle) -> Self {
        Self {
            points: vec![start],
            style,
        }
    }

    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn last_point(&self) -> Option<Point> {
        self.points.last().copied()
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    /// Straight segments through the captured points, used for live preview.
    pub fn preview_path(&self) -> BezPath {
        geometry::polyline(&self.points)
    }

    /// Finalize into an immutable stroke.
    pub fn into_stroke(self, mode: SmoothingMode) -> Stroke {
        Stroke::new(self.points, self.style, mode)
    }
}
