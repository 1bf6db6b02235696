//! Grid snapping for scene coordinates.

use kurbo::{Point, Rect, Vec2};

/// Default grid size in scene units.
pub const DEFAULT_GRID: f64 = 50.0;

/// Result of a snap operation.
#[derive(Debug, Clone, Copy)]
pub struct SnapResult {
    /// The snapped point.
    pub point: Point,
    /// Whether the X coordinate was moved by snapping.
    pub snapped_x: bool,
    /// Whether the Y coordinate was moved by snapping.
    pub snapped_y: bool,
}

impl SnapResult {
    /// Create a result with no snapping.
    pub fn none(point: Point) -> Self {
        Self {
            point,
            snapped_x: false,
            snapped_y: false,
        }
    }

    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        self.snapped_x || self.snapped_y
    }
}

/// Round a single coordinate to the nearest multiple of `grid`.
///
/// A grid of zero or less disables snapping and returns `value` unchanged.
/// Halfway values round away from zero.
pub fn round_to_grid(value: f64, grid: f64) -> f64 {
    if grid > 0.0 {
        (value / grid).round() * grid
    } else {
        value
    }
}

/// Snap a point element-wise to the grid.
pub fn snap_point(point: Point, grid: f64) -> Point {
    Point::new(round_to_grid(point.x, grid), round_to_grid(point.y, grid))
}

/// Snap a vector element-wise to the grid.
pub fn snap_vec(delta: Vec2, grid: f64) -> Vec2 {
    Vec2::new(round_to_grid(delta.x, grid), round_to_grid(delta.y, grid))
}

/// Snap both corners of a rectangle to the grid.
pub fn snap_rect(rect: Rect, grid: f64) -> Rect {
    Rect::from_points(snap_point(rect.origin(), grid), snap_point(Point::new(rect.x1, rect.y1), grid))
}

/// Snap a point to the nearest grid intersection, reporting which axes moved.
pub fn snap_to_grid(point: Point, grid: f64) -> SnapResult {
    if grid <= 0.0 {
        return SnapResult::none(point);
    }
    let snapped = snap_point(point, grid);
    SnapResult {
        point: snapped,
        snapped_x: (snapped.x - point.x).abs() > f64::EPSILON,
        snapped_y: (snapped.y - point.y).abs() > f64::EPSILON,
    }
}
