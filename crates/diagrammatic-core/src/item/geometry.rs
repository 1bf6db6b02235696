//! Planar helpers shared by item hit-testing and region selection.

use kurbo::{Point, Rect, Vec2};

/// Local-frame outline of an item, flattened to straight segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    pub points: Vec<Point>,
    /// The last point joins back to the first.
    pub closed: bool,
    /// The interior counts as part of the shape.
    pub filled: bool,
}

impl Outline {
    pub fn open(points: Vec<Point>) -> Self {
        Self {
            points,
            closed: false,
            filled: false,
        }
    }

    pub fn closed(points: Vec<Point>, filled: bool) -> Self {
        Self {
            points,
            closed: true,
            filled,
        }
    }

    pub fn from_rect(rect: Rect, filled: bool) -> Self {
        Self::closed(rect_corners(rect).to_vec(), filled)
    }

    /// Segments including the closing one.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let closing = if self.closed && self.points.len() > 2 {
            self.points.last().copied().zip(self.points.first().copied())
        } else {
            None
        };
        self.points.windows(2).map(|w| (w[0], w[1])).chain(closing)
    }

    pub fn distance_to(&self, point: Point) -> f64 {
        match self.points.as_slice() {
            [] => f64::INFINITY,
            [only] => (point - *only).hypot(),
            _ => self
                .segments()
                .map(|(a, b)| point_to_segment_dist(point, a, b))
                .fold(f64::INFINITY, f64::min),
        }
    }

    pub fn transformed(&self, transform: kurbo::Affine) -> Self {
        Self {
            points: self.points.iter().map(|p| transform * *p).collect(),
            closed: self.closed,
            filled: self.filled,
        }
    }

    pub fn bounding_rect(&self) -> Rect {
        bounding_rect_of(&self.points)
    }
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    (point - (a + seg * t)).hypot()
}

/// Minimum distance from a point to a polyline (sequence of connected segments).
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| point_to_segment_dist(point, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

/// Index of the segment of `points` nearest to `point`.
pub fn nearest_segment(point: Point, points: &[Point], closed: bool) -> Option<usize> {
    let count = if closed { points.len() } else { points.len().saturating_sub(1) };
    (0..count)
        .map(|i| {
            let (a, b) = (points[i], points[(i + 1) % points.len()]);
            (i, point_to_segment_dist(point, a, b))
        })
        .fold(None, |best: Option<(usize, f64)>, (i, d)| match best {
            Some((_, best_d)) if best_d <= d => best,
            _ => Some((i, d)),
        })
        .map(|(i, _)| i)
}

/// Even-odd point-in-polygon test.
pub fn polygon_contains(polygon: &[Point], point: Point) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (pi, pj) = (polygon[i], polygon[j]);
        if (pi.y > point.y) != (pj.y > point.y)
            && point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Test if two line segments (a-b) and (c-d) intersect.
pub fn segments_intersect(a: Point, b: Point, c: Point, d: Point) -> bool {
    let cross = |o: Point, p: Point, q: Point| -> f64 {
        (p.x - o.x) * (q.y - o.y) - (p.y - o.y) * (q.x - o.x)
    };
    let d1 = cross(c, d, a);
    let d2 = cross(c, d, b);
    let d3 = cross(a, b, c);
    let d4 = cross(a, b, d);
    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }
    // Collinear cases: check if endpoint lies on the other segment
    let on_segment = |p: Point, q: Point, r: Point| -> bool {
        r.x >= p.x.min(q.x) && r.x <= p.x.max(q.x) && r.y >= p.y.min(q.y) && r.y <= p.y.max(q.y)
    };
    (d1.abs() < 1e-10 && on_segment(c, d, a))
        || (d2.abs() < 1e-10 && on_segment(c, d, b))
        || (d3.abs() < 1e-10 && on_segment(a, b, c))
        || (d4.abs() < 1e-10 && on_segment(a, b, d))
}

/// Whether an outline touches a closed region polygon.
pub fn outline_intersects_polygon(outline: &Outline, region: &[Point]) -> bool {
    if outline.points.iter().any(|p| polygon_contains(region, *p)) {
        return true;
    }
    let region_edges: Vec<(Point, Point)> = region
        .iter()
        .zip(region.iter().cycle().skip(1))
        .map(|(a, b)| (*a, *b))
        .collect();
    if outline
        .segments()
        .any(|(a, b)| region_edges.iter().any(|(c, d)| segments_intersect(a, b, *c, *d)))
    {
        return true;
    }
    // Region entirely inside a filled outline.
    outline.filled
        && outline.closed
        && region
            .first()
            .is_some_and(|p| polygon_contains(&outline.points, *p))
}

pub fn rect_corners(rect: Rect) -> [Point; 4] {
    [
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x1, rect.y1),
        Point::new(rect.x0, rect.y1),
    ]
}

/// Smallest rect containing every point. Empty input yields a zero rect.
pub fn bounding_rect_of(points: &[Point]) -> Rect {
    let mut iter = points.iter();
    let Some(first) = iter.next() else {
        return Rect::ZERO;
    };
    iter.fold(Rect::from_points(*first, *first), |rect, p| rect.union_pt(*p))
}

/// Half-open containment: `inner`'s corners lie inside `outer` the way
/// [`Rect::contains`] treats points.
pub fn rect_contains_rect(outer: Rect, inner: Rect) -> bool {
    outer.contains(inner.origin()) && outer.contains(Point::new(inner.x1, inner.y1))
}

/// Closed overlap test; touching edges count.
pub fn rects_intersect(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

/// Unit vector at `angle` radians.
pub fn direction(angle: f64) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
