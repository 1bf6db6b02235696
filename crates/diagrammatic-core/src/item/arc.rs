//! Quarter-ellipse arc between two points.
//!
//! The arc is the quarter of the ellipse, centered on one corner of the box
//! spanned by the end points, that passes through both of them. Angles below
//! count counter-clockwise as seen on screen, so a y-down point at `theta`
//! sits at `(cx + rx cos theta, cy - ry sin theta)`.

use super::arrow::{StrokeEnd, draw_end_arrows, end_arrow_outlines};
use super::geometry::{Outline, bounding_rect_of};
use super::{Item, ItemFlags, ItemKind};
use crate::painter::{Brush, Painter};
use crate::point::{ItemPoint, PointFlags};
use crate::style::Style;
use kurbo::{Arc, Point, Rect, Shape as _, Vec2};
use std::f64::consts::{FRAC_PI_2, PI};

pub(super) const START: usize = 0;
pub(super) const END: usize = 1;

const SAMPLES: usize = 24;
const PATH_TOLERANCE: f64 = 0.1;

impl Item {
    /// Arc from `p1` to `p2` in scene coordinates. The item is positioned at `p1`.
    pub fn new_arc(p1: Point, p2: Point) -> Item {
        let mut style = Style::new();
        style.init_pen();
        style.init_arrows();

        let points = vec![
            ItemPoint::new(Point::ZERO, PointFlags::all()),
            ItemPoint::new((p2 - p1).to_point(), PointFlags::all()),
        ];
        let flags = ItemFlags::DEFAULT
            | ItemFlags::CAN_DELETE
            | ItemFlags::PLACE_BY_MOUSE_PRESS_AND_RELEASE
            | ItemFlags::ADJUST_POSITION_ON_RESIZE;
        let mut item = Item::from_parts(ItemKind::Arc, flags, points, style);
        item.position = p1;
        item
    }
}

/// Ellipse center, radii and the screen angle of the start point.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ArcGeometry {
    center: Point,
    radii: Vec2,
    start_angle: f64,
}

impl ArcGeometry {
    fn from_ends(p1: Point, p2: Point) -> Self {
        let (width, height) = (2.0 * (p2.x - p1.x).abs(), 2.0 * (p2.y - p1.y).abs());
        let mut left = p1.x.min(p2.x);
        let mut top = p1.y.min(p2.y);
        if p1.y >= p2.y {
            left -= width / 2.0;
        }
        if p1.x < p2.x {
            top -= height / 2.0;
        }
        let start_angle = match (p1.x < p2.x, p1.y < p2.y) {
            (true, true) => PI,
            (true, false) => 1.5 * PI,
            (false, true) => FRAC_PI_2,
            (false, false) => 0.0,
        };
        Self {
            center: Point::new(left + width / 2.0, top + height / 2.0),
            radii: Vec2::new(width / 2.0, height / 2.0),
            start_angle,
        }
    }

    fn point_at(&self, angle: f64) -> Point {
        Point::new(
            self.center.x + self.radii.x * angle.cos(),
            self.center.y - self.radii.y * angle.sin(),
        )
    }

    /// Samples along the quarter turn, first and last on the end points.
    fn samples(&self) -> Vec<Point> {
        (0..=SAMPLES)
            .map(|i| self.point_at(self.start_angle + FRAC_PI_2 * i as f64 / SAMPLES as f64))
            .collect()
    }

    fn to_kurbo(self) -> Arc {
        // kurbo measures angles clockwise in y-down space.
        Arc {
            center: self.center,
            radii: self.radii,
            start_angle: -self.start_angle,
            sweep_angle: -FRAC_PI_2,
            x_rotation: 0.0,
        }
    }
}

fn ends(points: &[ItemPoint]) -> (Point, Point) {
    (points[START].position(), points[END].position())
}

fn geometry(points: &[ItemPoint]) -> ArcGeometry {
    let (start, end) = ends(points);
    ArcGeometry::from_ends(start, end)
}

pub(super) fn is_valid(points: &[ItemPoint]) -> bool {
    let (start, end) = ends(points);
    start != end
}

pub(super) fn bounding_rect(points: &[ItemPoint]) -> Rect {
    bounding_rect_of(&geometry(points).samples())
}

/// Arrowheads lean into the arc rather than along the chord.
fn stroke_ends(points: &[ItemPoint]) -> (StrokeEnd, StrokeEnd) {
    let (start, end) = ends(points);
    let arc = geometry(points);
    let toward = |tip: Point, degrees: f64| {
        (arc.point_at(arc.start_angle + degrees.to_radians()) - tip).atan2()
    };
    let reach = (end - start).hypot();
    (
        StrokeEnd {
            tip: start,
            angle: toward(start, 20.0),
            reach,
        },
        StrokeEnd {
            tip: end,
            angle: toward(end, 70.0),
            reach,
        },
    )
}

pub(super) fn outlines(points: &[ItemPoint], style: &Style) -> Vec<Outline> {
    let (head, tail) = stroke_ends(points);
    let mut outlines = vec![Outline::open(geometry(points).samples())];
    outlines.extend(end_arrow_outlines(style, head, tail));
    outlines
}

pub(super) fn render(points: &[ItemPoint], style: &Style, painter: &mut dyn Painter) {
    let background = painter.brush();
    let pen = style.pen();

    painter.set_pen(pen);
    painter.set_brush(Brush::none());
    painter.draw_path(&geometry(points).to_kurbo().to_path(PATH_TOLERANCE));

    let (head, tail) = stroke_ends(points);
    draw_end_arrows(painter, style, head, tail, pen, background);
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Shape;
    use std::f64::consts::FRAC_1_SQRT_2;

    fn close(a: Point, b: Point) -> bool {
        (a - b).hypot() < 1e-9
    }

    #[test]
    fn test_arc_passes_through_both_ends() {
        let cases = [
            (Point::new(0.0, 0.0), Point::new(100.0, 50.0)),
            (Point::new(0.0, 50.0), Point::new(100.0, 0.0)),
            (Point::new(100.0, 0.0), Point::new(0.0, 50.0)),
            (Point::new(100.0, 50.0), Point::new(0.0, 0.0)),
        ];
        for (p1, p2) in cases {
            let arc = ArcGeometry::from_ends(p1, p2);
            let samples = arc.samples();
            assert!(close(samples[0], p1), "{p1:?} -> {p2:?}");
            assert!(close(samples[SAMPLES], p2), "{p1:?} -> {p2:?}");
        }
    }

    #[test]
    fn test_down_right_arc_bulges_below_left() {
        let arc = ArcGeometry::from_ends(Point::ZERO, Point::new(100.0, 100.0));
        assert_eq!(arc.center, Point::new(100.0, 0.0));
        assert_eq!(arc.start_angle, PI);
        let item = Item::new_arc(Point::ZERO, Point::new(100.0, 100.0));
        let bounds = item.bounding_rect();
        assert!((bounds.width() - 100.0).abs() < 1e-9);
        assert!((bounds.height() - 100.0).abs() < 1e-9);
        // The chord midpoint lies off the curve.
        assert!(!item.contains(Point::new(50.0, 50.0), 0.0));
        let on_arc = Point::new(100.0 - 100.0 * FRAC_1_SQRT_2, 100.0 * FRAC_1_SQRT_2);
        assert!(item.contains(on_arc, 0.0));
    }

    #[test]
    fn test_kurbo_path_matches_samples() {
        let arc = ArcGeometry::from_ends(Point::new(0.0, 50.0), Point::new(100.0, 0.0));
        let bounds = arc.to_kurbo().to_path(PATH_TOLERANCE).bounding_box();
        let sampled = bounding_rect_of(&arc.samples());
        assert!((bounds.x0 - sampled.x0).abs() < 1e-6);
        assert!((bounds.y1 - sampled.y1).abs() < 1e-6);
        assert!((bounds.x1 - sampled.x1).abs() < 1e-6);
    }

    #[test]
    fn test_resize_end_and_place() {
        let mut item = Item::new_arc(Point::new(10.0, 10.0), Point::new(60.0, 60.0));
        assert_eq!(item.creation_point_index(), Some(END));
        item.resize(START, Point::new(0.0, 0.0));
        assert_eq!(item.position(), Point::ZERO);
        assert_eq!(item.point_scene_position(END), Some(Point::new(60.0, 60.0)));

        item.reset_for_placement();
        assert!(!item.is_valid());
        item.place_drag(Point::new(40.0, -20.0));
        assert!(item.is_valid());
        assert_eq!(item.point_scene_position(END), Some(Point::new(40.0, -20.0)));
    }
}
