//! Open multi-segment line.

use super::arrow::{StrokeEnd, draw_end_arrows, end_arrow_outlines};
use super::geometry::{Outline, nearest_segment};
use super::{Item, ItemFlags, ItemKind};
use crate::painter::{Brush, Painter};
use crate::point::{ItemPoint, PointFlags};
use crate::style::Style;
use kurbo::Point;

const MIN_POINTS: usize = 2;

impl Item {
    /// Polyline through scene points. The item is positioned at the first
    /// point; fewer than two points are padded with the last one.
    pub fn new_polyline(scene_points: Vec<Point>) -> Item {
        let mut style = Style::new();
        style.init_pen();
        style.init_arrows();

        let origin = scene_points.first().copied().unwrap_or(Point::ZERO);
        let mut locals: Vec<Point> = scene_points
            .iter()
            .map(|p| (*p - origin).to_point())
            .collect();
        while locals.len() < MIN_POINTS {
            locals.push(locals.last().copied().unwrap_or(Point::ZERO));
        }
        let last = locals.len() - 1;
        let points = locals
            .into_iter()
            .enumerate()
            .map(|(i, p)| {
                let flags = if i == 0 || i == last {
                    PointFlags::all()
                } else {
                    PointFlags::CONTROL | PointFlags::CONNECTION
                };
                ItemPoint::new(p, flags)
            })
            .collect();
        let flags = ItemFlags::DEFAULT
            | ItemFlags::CAN_DELETE
            | ItemFlags::CAN_INSERT_POINTS
            | ItemFlags::CAN_REMOVE_POINTS
            | ItemFlags::PLACE_BY_MOUSE_PRESS_AND_RELEASE
            | ItemFlags::ADJUST_POSITION_ON_RESIZE;
        let mut item = Item::from_parts(ItemKind::Polyline, flags, points, style);
        item.position = origin;
        item
    }
}

fn positions(points: &[ItemPoint]) -> Vec<Point> {
    points.iter().map(ItemPoint::position).collect()
}

pub(super) fn is_valid(points: &[ItemPoint]) -> bool {
    points.len() >= MIN_POINTS
        && points
            .first()
            .is_some_and(|first| points.iter().any(|p| p.position() != first.position()))
}

fn stroke_ends(points: &[Point]) -> (StrokeEnd, StrokeEnd) {
    let n = points.len();
    let end = |tip: Point, next: Point| StrokeEnd {
        tip,
        angle: (next - tip).atan2(),
        reach: (next - tip).hypot(),
    };
    (end(points[0], points[1]), end(points[n - 1], points[n - 2]))
}

pub(super) fn outlines(points: &[ItemPoint], style: &Style) -> Vec<Outline> {
    let positions = positions(points);
    let (head, tail) = stroke_ends(&positions);
    let mut outlines = vec![Outline::open(positions)];
    outlines.extend(end_arrow_outlines(style, head, tail));
    outlines
}

pub(super) fn render(points: &[ItemPoint], style: &Style, painter: &mut dyn Painter) {
    let background = painter.brush();
    let pen = style.pen();
    let positions = positions(points);

    painter.set_pen(pen);
    painter.set_brush(Brush::none());
    painter.draw_polyline(&positions);

    let (head, tail) = stroke_ends(&positions);
    draw_end_arrows(painter, style, head, tail, pen, background);
}

/// New point on the nearest segment, inserted after that segment's start.
pub(super) fn point_to_insert(points: &[ItemPoint], local: Point) -> Option<(usize, ItemPoint)> {
    let segment = nearest_segment(local, &positions(points), false)?;
    Some((
        segment + 1,
        ItemPoint::new(local, PointFlags::CONTROL | PointFlags::CONNECTION),
    ))
}

/// Nearest interior point; the two ends are never removed.
pub(super) fn point_to_remove(points: &[ItemPoint], local: Point) -> Option<usize> {
    if points.len() <= MIN_POINTS {
        return None;
    }
    (1..points.len() - 1).min_by(|a, b| {
        let da = (points[*a].position() - local).hypot2();
        let db = (points[*b].position() - local).hypot2();
        da.total_cmp(&db)
    })
}
