//! Geometry helpers shared by smoothing, hit testing and rendering.
//!
//! Model geometry is kept in `kurbo` (f64). egui only sees `Pos2` values
//! produced by [`to_pos2`] at paint time.

pub mod hit_testing;
pub mod smoothing;

use kurbo::{BezPath, ParamCurve, ParamCurveArclen, ParamCurveExtrema, PathEl, PathSeg, Point, Rect};

pub use hit_testing::intersects;
pub use smoothing::{polyline, smooth, SmoothingMode};

/// Accuracy used for arc length queries, in canvas pixels.
pub const ARCLEN_ACCURACY: f64 = 1e-3;

/// Tolerance used when flattening curves for display.
pub const FLATTEN_TOLERANCE: f64 = 0.25;

/// True when both coordinates are finite numbers.
pub fn is_valid_point(point: Point) -> bool {
    point.x.is_finite() && point.y.is_finite()
}

/// Euclidean distance between two points
pub fn distance(a: Point, b: Point) -> f64 {
    (b - a).hypot()
}

/// Axis-aligned bounding box of a set of points, `None` when empty.
pub fn bounding_box(points: &[Point]) -> Option<Rect> {
    let (first, rest) = points.split_first()?;
    let mut rect = Rect::from_points(*first, *first);
    for point in rest {
        rect = rect.union_pt(*point);
    }
    Some(rect)
}

/// Strict overlap test. Boxes that only share an edge do not intersect.
pub fn boxes_intersect(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && a.x1 > b.x0 && a.y0 < b.y1 && a.y1 > b.y0
}

/// The first point of a path, if it has one.
pub fn start_point(path: &BezPath) -> Option<Point> {
    path.elements().iter().find_map(|el| match el {
        PathEl::MoveTo(p) => Some(*p),
        _ => None,
    })
}

/// Tight bounding box of the rendered curve (control points excluded).
pub fn path_bounds(path: &BezPath) -> Option<Rect> {
    let mut bounds: Option<Rect> = None;
    for seg in path.segments() {
        let seg_box = seg.bounding_box();
        bounds = Some(match bounds {
            Some(acc) => acc.union(seg_box),
            None => seg_box,
        });
    }
    bounds.or_else(|| start_point(path).map(|p| Rect::from_points(p, p)))
}

/// Total arc length of a path.
pub fn path_length(path: &BezPath) -> f64 {
    path.segments().map(|seg| seg.arclen(ARCLEN_ACCURACY)).sum()
}

/// Points along `path` every `step` units of arc length, starting at zero
/// and never past the end of the path.
///
/// Samples are produced lazily, so callers looking for one match stop
/// paying once they find it. A path without segments yields its start
/// point. A non-positive or non-finite step yields nothing.
pub fn sample_path(path: &BezPath, step: f64) -> impl Iterator<Item = Point> + '_ {
    let valid = step.is_finite() && step > 0.0;
    let mut lone_start = if valid && path.segments().next().is_none() {
        start_point(path)
    } else {
        None
    };
    let mut segments = path.segments().filter(move |_| valid);
    let mut current: Option<(PathSeg, f64)> = None;
    let mut offset = 0.0;
    let mut target = 0.0;

    std::iter::from_fn(move || {
        if let Some(point) = lone_start.take() {
            return Some(point);
        }
        loop {
            let (seg, len) = match current {
                Some(entry) => entry,
                None => {
                    let seg = segments.next()?;
                    let entry = (seg, seg.arclen(ARCLEN_ACCURACY));
                    current = Some(entry);
                    entry
                }
            };
            if target <= offset + len {
                let t = if len > 0.0 {
                    seg.inv_arclen(target - offset, ARCLEN_ACCURACY)
                } else {
                    0.0
                };
                target += step;
                return Some(seg.eval(t));
            }
            offset += len;
            current = None;
        }
    })
}

/// Points the curve passes through at the end of each element, in order,
/// starting with the initial move.
pub fn on_curve_points(path: &BezPath) -> Vec<Point> {
    path.elements()
        .iter()
        .filter_map(|el| match el {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(*p),
            PathEl::QuadTo(_, p) => Some(*p),
            PathEl::CurveTo(_, _, p) => Some(*p),
            PathEl::ClosePath => None,
        })
        .collect()
}

/// Flattens a path into screen points offset by `origin`.
pub fn flatten_to_screen(path: &BezPath, origin: egui::Pos2) -> Vec<egui::Pos2> {
    let mut out = Vec::new();
    kurbo::flatten(path.iter(), FLATTEN_TOLERANCE, |el| match el {
        PathEl::MoveTo(p) | PathEl::LineTo(p) => out.push(origin + to_pos2(p).to_vec2()),
        _ => {}
    });
    out
}

pub fn to_pos2(point: Point) -> egui::Pos2 {
    egui::pos2(point.x as f32, point.y as f32)
}

pub fn from_pos2(pos: egui::Pos2) -> Point {
    Point::new(pos.x as f64, pos.y as f64)
}
