use kurbo::{BezPath, Point};
use serde::{Deserialize, Serialize};

/// How a finished stroke's captured points become its geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmoothingMode {
    /// Catmull-Rom derived cubic segments with a quadratic tail.
    #[default]
    Bezier,
    /// Straight segments through every captured point.
    Polyline,
}

impl SmoothingMode {
    pub fn apply(self, points: &[Point]) -> BezPath {
        match self {
            Self::Bezier => smooth(points),
            Self::Polyline => polyline(points),
        }
    }
}

/// Straight line path through all points.
pub fn polyline(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let Some((first, rest)) = points.split_first() else {
        return path;
    };
    path.move_to(*first);
    for point in rest {
        path.line_to(*point);
    }
    path
}

/// Smooth curve through `points`.
///
/// Fewer than three points cannot bend, so they come back as a polyline.
/// Otherwise segment `i` (from `p[i]` to `p[i + 1]`) is a cubic with
///
/// ```text
/// cp1 = p[i]     + (p[i + 1] - p[i - 1]) / 6
/// cp2 = p[i + 1] - (p[i + 2] - p[i])     / 6
/// ```
///
/// where `p[-1]` is clamped to `p[0]`. The last segment has no `p[i + 2]`
/// and is closed with a quadratic whose control point is
/// `p[n - 2] + (p[n - 1] - p[n - 3]) / 6`.
pub fn smooth(points: &[Point]) -> BezPath {
    let n = points.len();
    if n < 3 {
        return polyline(points);
    }

    let mut path = BezPath::new();
    path.move_to(points[0]);

    for i in 0..n - 2 {
        let p0 = if i > 0 { points[i - 1] } else { points[0] };
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[i + 2];

        let cp1 = p1 + (p2 - p0) / 6.0;
        let cp2 = p2 - (p3 - p1) / 6.0;
        path.curve_to(cp1, cp2, p2);
    }

    let last = points[n - 1];
    let second_last = points[n - 2];
    let third_last = points[n - 3];
    let cp = second_last + (last - third_last) / 6.0;
    path.quad_to(cp, last);

    path
}
