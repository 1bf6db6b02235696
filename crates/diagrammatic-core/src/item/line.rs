//! Straight line with optional arrowheads.

use super::arrow::{StrokeEnd, draw_end_arrows, end_arrow_outlines};
use super::geometry::Outline;
use super::{Item, ItemFlags, ItemKind};
use crate::painter::{Brush, Painter};
use crate::point::{ItemPoint, PointFlags};
use crate::style::Style;
use kurbo::{Line, Point, Rect};
use std::f64::consts::PI;

pub(super) const START: usize = 0;
pub(super) const MID: usize = 1;
pub(super) const END: usize = 2;

impl Item {
    /// Line between two scene points. The item is positioned at `p1`.
    pub fn new_line(p1: Point, p2: Point) -> Item {
        let mut style = Style::new();
        style.init_pen();
        style.init_arrows();

        let end = (p2 - p1).to_point();
        let points = vec![
            ItemPoint::new(Point::ZERO, PointFlags::all()),
            ItemPoint::new(Point::ZERO.midpoint(end), PointFlags::CONNECTION),
            ItemPoint::new(end, PointFlags::all()),
        ];
        let flags = ItemFlags::DEFAULT
            | ItemFlags::CAN_DELETE
            | ItemFlags::PLACE_BY_MOUSE_PRESS_AND_RELEASE
            | ItemFlags::ADJUST_POSITION_ON_RESIZE;
        let mut item = Item::from_parts(ItemKind::Line, flags, points, style);
        item.position = p1;
        item
    }
}

fn ends(points: &[ItemPoint]) -> (Point, Point) {
    (points[START].position(), points[END].position())
}

pub(super) fn resize(points: &mut [ItemPoint], index: usize, local: Point) {
    points[index].set_position(local);
    if index != MID {
        let (start, end) = ends(points);
        points[MID].set_position(start.midpoint(end));
    }
}

pub(super) fn is_valid(points: &[ItemPoint]) -> bool {
    let (start, end) = ends(points);
    start != end
}

pub(super) fn bounding_rect(points: &[ItemPoint]) -> Rect {
    let (start, end) = ends(points);
    Rect::from_points(start, end)
}

fn stroke_ends(points: &[ItemPoint]) -> (StrokeEnd, StrokeEnd) {
    let (start, end) = ends(points);
    let angle = (end - start).atan2();
    let reach = (end - start).hypot();
    (
        StrokeEnd {
            tip: start,
            angle,
            reach,
        },
        StrokeEnd {
            tip: end,
            angle: angle + PI,
            reach,
        },
    )
}

pub(super) fn outlines(points: &[ItemPoint], style: &Style) -> Vec<Outline> {
    let (start, end) = ends(points);
    let (head, tail) = stroke_ends(points);
    let mut outlines = vec![Outline::open(vec![start, end])];
    outlines.extend(end_arrow_outlines(style, head, tail));
    outlines
}

pub(super) fn render(points: &[ItemPoint], style: &Style, painter: &mut dyn Painter) {
    let background = painter.brush();
    let pen = style.pen();
    let (start, end) = ends(points);

    painter.set_pen(pen);
    painter.set_brush(Brush::none());
    painter.draw_line(Line::new(start, end));

    let (head, tail) = stroke_ends(points);
    draw_end_arrows(painter, style, head, tail, pen, background);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{ArrowStyle, StyleKey};

    #[test]
    fn test_new_line_layout() {
        let line = Item::new_line(Point::new(100.0, 100.0), Point::new(300.0, 100.0));
        assert_eq!(line.position(), Point::new(100.0, 100.0));
        assert_eq!(line.points().len(), 3);
        assert_eq!(line.points()[MID].position(), Point::new(100.0, 0.0));
        assert_eq!(line.point_scene_position(END), Some(Point::new(300.0, 100.0)));
        assert_eq!(line.creation_point_index(), Some(END));
    }

    #[test]
    fn test_resize_end_keeps_mid_centered() {
        let mut line = Item::new_line(Point::ZERO, Point::new(100.0, 0.0));
        line.resize(END, Point::new(100.0, 200.0));
        assert_eq!(line.points()[MID].position(), Point::new(50.0, 100.0));
    }

    #[test]
    fn test_resize_start_moves_origin() {
        let mut line = Item::new_line(Point::ZERO, Point::new(100.0, 0.0));
        line.resize(START, Point::new(-50.0, 0.0));
        assert_eq!(line.position(), Point::new(-50.0, 0.0));
        assert_eq!(line.points()[START].position(), Point::ZERO);
        assert_eq!(line.point_scene_position(END), Some(Point::new(100.0, 0.0)));
    }

    #[test]
    fn test_arrow_outlines_added() {
        let mut line = Item::new_line(Point::ZERO, Point::new(400.0, 0.0));
        assert_eq!(line.outlines().len(), 1);
        assert!(!line.contains(Point::new(370.0, 10.0), 0.0));
        line.style_mut().set(StyleKey::EndArrowStyle, ArrowStyle::TriangleFilled);
        assert_eq!(line.outlines().len(), 2);
        // Head sits at the end and points back along the line.
        assert!(line.contains(Point::new(370.0, 10.0), 0.0));
    }
}
