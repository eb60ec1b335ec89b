use kurbo::{BezPath, Point, Rect};

use super::{boxes_intersect, path_bounds, sample_path};
use crate::stroke::Stroke;

/// Square around the eraser with side `2 * radius`.
pub fn eraser_box(center: Point, radius: f64) -> Rect {
    Rect::new(center.x - radius, center.y - radius, center.x + radius, center.y + radius)
}

/// Whether an eraser disk at `center` touches `stroke`.
pub fn intersects(stroke: &Stroke, center: Point, radius: f64) -> bool {
    path_intersects(stroke.path(), center, radius)
}

/// Two-phase test: reject on bounding boxes, then walk the curve in steps
/// of `radius` and look for a sample inside the disk.
///
/// The step equals the radius, so a larger eraser samples more coarsely.
pub fn path_intersects(path: &BezPath, center: Point, radius: f64) -> bool {
    if !radius.is_finite() || radius <= 0.0 {
        return false;
    }

    let Some(bounds) = path_bounds(path) else {
        return false;
    };
    if !boxes_intersect(eraser_box(center, radius), bounds) {
        return false;
    }

    let radius_sq = radius * radius;
    sample_path(path, radius).any(|sample| (sample - center).hypot2() <= radius_sq)
}
