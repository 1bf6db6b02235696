//! Cubic Bézier curve.

use super::arrow::{StrokeEnd, draw_end_arrows, end_arrow_outlines};
use super::geometry::Outline;
use super::{Item, ItemFlags, ItemKind};
use crate::painter::{Brush, Painter};
use crate::point::{ItemPoint, PointFlags};
use crate::style::{PenStyle, Style};
use kurbo::{BezPath, CubicBez, Line, ParamCurve, ParamCurveExtrema, Point, Rect};

pub(super) const START: usize = 0;
pub(super) const START_CONTROL: usize = 1;
pub(super) const END_CONTROL: usize = 2;
pub(super) const END: usize = 3;

const SAMPLES: usize = 24;

impl Item {
    /// Curve from `p1` to `p2` with control points `c1` and `c2`, all in
    /// scene coordinates. The item is positioned at `p1`.
    pub fn new_curve(p1: Point, c1: Point, c2: Point, p2: Point) -> Item {
        let mut style = Style::new();
        style.init_pen();
        style.init_arrows();

        let local = |p: Point| (p - p1).to_point();
        let points = vec![
            ItemPoint::new(Point::ZERO, PointFlags::all()),
            ItemPoint::new(local(c1), PointFlags::CONTROL),
            ItemPoint::new(local(c2), PointFlags::CONTROL),
            ItemPoint::new(local(p2), PointFlags::all()),
        ];
        let flags = ItemFlags::DEFAULT
            | ItemFlags::CAN_DELETE
            | ItemFlags::PLACE_BY_MOUSE_PRESS_AND_RELEASE
            | ItemFlags::ADJUST_POSITION_ON_RESIZE;
        let mut item = Item::from_parts(ItemKind::Curve, flags, points, style);
        item.position = p1;
        item
    }
}

fn cubic(points: &[ItemPoint]) -> CubicBez {
    CubicBez::new(
        points[START].position(),
        points[START_CONTROL].position(),
        points[END_CONTROL].position(),
        points[END].position(),
    )
}

/// Moving an end drags its control point along.
pub(super) fn resize(points: &mut [ItemPoint], index: usize, local: Point) {
    let control = match index {
        START => Some(START_CONTROL),
        END => Some(END_CONTROL),
        _ => None,
    };
    if let Some(control) = control {
        let offset = points[control].position() - points[index].position();
        points[control].set_position(local + offset);
    }
    points[index].set_position(local);
}

/// Drawing drag: move the end and bend the controls toward the midpoint column.
pub(super) fn place_end(points: &mut [ItemPoint], local: Point) {
    let start = points[START].position();
    let mid_x = (start.x + local.x) / 2.0;
    points[END].set_position(local);
    points[START_CONTROL].set_position(Point::new(mid_x, start.y));
    points[END_CONTROL].set_position(Point::new(mid_x, local.y));
}

pub(super) fn is_valid(points: &[ItemPoint]) -> bool {
    let bounds = bounding_rect(points);
    bounds.width() != 0.0 || bounds.height() != 0.0
}

pub(super) fn bounding_rect(points: &[ItemPoint]) -> Rect {
    cubic(points).bounding_box()
}

fn stroke_ends(points: &[ItemPoint]) -> (StrokeEnd, StrokeEnd) {
    let curve = cubic(points);
    let reach = (curve.p3 - curve.p0).hypot();
    let toward = |from: Point, primary: Point, other: Point| {
        let target = if primary == from { other } else { primary };
        (target - from).atan2()
    };
    (
        StrokeEnd {
            tip: curve.p0,
            angle: toward(curve.p0, curve.p1, curve.p3),
            reach,
        },
        StrokeEnd {
            tip: curve.p3,
            angle: toward(curve.p3, curve.p2, curve.p0),
            reach,
        },
    )
}

pub(super) fn outlines(points: &[ItemPoint], style: &Style) -> Vec<Outline> {
    let curve = cubic(points);
    let samples = (0..=SAMPLES)
        .map(|i| curve.eval(i as f64 / SAMPLES as f64))
        .collect();
    let (head, tail) = stroke_ends(points);
    let mut outlines = vec![Outline::open(samples)];
    outlines.extend(end_arrow_outlines(style, head, tail));
    outlines
}

pub(super) fn render(points: &[ItemPoint], style: &Style, painter: &mut dyn Painter, selected: bool) {
    let background = painter.brush();
    let pen = style.pen();
    let curve = cubic(points);

    let mut path = BezPath::new();
    path.move_to(curve.p0);
    path.curve_to(curve.p1, curve.p2, curve.p3);
    painter.set_pen(pen);
    painter.set_brush(Brush::none());
    painter.draw_path(&path);

    let (head, tail) = stroke_ends(points);
    draw_end_arrows(painter, style, head, tail, pen, background);

    if selected {
        let mut guide = pen;
        guide.style = PenStyle::Dot;
        guide.width *= 0.75;
        painter.set_pen(guide);
        painter.set_brush(Brush::none());
        painter.draw_line(Line::new(curve.p0, curve.p1));
        painter.draw_line(Line::new(curve.p3, curve.p2));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_curve_points() {
        let curve = Item::new_curve(
            Point::new(100.0, 100.0),
            Point::new(200.0, 100.0),
            Point::new(200.0, 300.0),
            Point::new(300.0, 300.0),
        );
        assert_eq!(curve.points().len(), 4);
        assert!(curve.points()[START].is_free());
        assert!(!curve.points()[START_CONTROL].is_connection());
        assert_eq!(curve.point_scene_position(END), Some(Point::new(300.0, 300.0)));
    }

    #[test]
    fn test_resize_end_drags_control() {
        let mut curve = Item::new_curve(
            Point::ZERO,
            Point::new(100.0, 0.0),
            Point::new(100.0, 200.0),
            Point::new(200.0, 200.0),
        );
        curve.resize(END, Point::new(300.0, 300.0));
        assert_eq!(curve.points()[END_CONTROL].position(), Point::new(200.0, 300.0));
        assert_eq!(curve.points()[START_CONTROL].position(), Point::new(100.0, 0.0));
    }

    #[test]
    fn test_place_end_bends_controls() {
        let mut curve = Item::new_curve(Point::ZERO, Point::ZERO, Point::ZERO, Point::ZERO);
        assert!(!curve.is_valid());
        curve.place_drag(Point::new(200.0, 100.0));
        assert_eq!(curve.points()[START_CONTROL].position(), Point::new(100.0, 0.0));
        assert_eq!(curve.points()[END_CONTROL].position(), Point::new(100.0, 100.0));
        assert!(curve.is_valid());
    }

    #[test]
    fn test_bounding_rect_covers_endpoints() {
        let curve = Item::new_curve(
            Point::ZERO,
            Point::new(0.0, 100.0),
            Point::new(100.0, 100.0),
            Point::new(100.0, 0.0),
        );
        let bounds = curve.bounding_rect();
        assert!((bounds.x0 - 0.0).abs() < 1e-9);
        assert!((bounds.x1 - 100.0).abs() < 1e-9);
        assert!((bounds.y1 - 75.0).abs() < 1e-9);
    }
}
