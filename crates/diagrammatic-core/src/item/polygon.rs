//! Closed filled polygon.

use super::geometry::nearest_segment;
use super::{Item, ItemFlags, ItemKind};
use crate::painter::Painter;
use crate::point::{ItemPoint, PointFlags};
use crate::style::Style;
use kurbo::Point;

const MIN_POINTS: usize = 3;

impl Item {
    /// Polygon through scene points, positioned at the first point.
    ///
    /// Inputs with fewer than three vertices are padded by repeating the last.
    pub fn new_polygon(scene_points: Vec<Point>) -> Item {
        let mut style = Style::new();
        style.init_pen();
        style.init_brush();

        let origin = scene_points.first().copied().unwrap_or(Point::ZERO);
        let mut locals: Vec<Point> = scene_points
            .iter()
            .map(|p| (*p - origin).to_point())
            .collect();
        while locals.len() < MIN_POINTS {
            locals.push(locals.last().copied().unwrap_or(Point::ZERO));
        }
        let points = locals
            .into_iter()
            .map(|p| ItemPoint::new(p, PointFlags::CONTROL | PointFlags::CONNECTION))
            .collect();
        let flags = ItemFlags::DEFAULT
            | ItemFlags::CAN_DELETE
            | ItemFlags::CAN_INSERT_POINTS
            | ItemFlags::CAN_REMOVE_POINTS;
        let mut item = Item::from_parts(ItemKind::Polygon, flags, points, style);
        item.position = origin;
        item
    }
}

fn positions(points: &[ItemPoint]) -> Vec<Point> {
    points.iter().map(ItemPoint::position).collect()
}

pub(super) fn is_valid(points: &[ItemPoint]) -> bool {
    points.len() >= MIN_POINTS
}

pub(super) fn render(points: &[ItemPoint], style: &Style, painter: &mut dyn Painter) {
    painter.set_pen(style.pen());
    painter.set_brush(style.brush());
    painter.draw_polygon(&positions(points));
}

/// New vertex on the nearest edge, including the closing edge.
pub(super) fn point_to_insert(points: &[ItemPoint], local: Point) -> Option<(usize, ItemPoint)> {
    let edge = nearest_segment(local, &positions(points), true)?;
    Some((
        edge + 1,
        ItemPoint::new(local, PointFlags::CONTROL | PointFlags::CONNECTION),
    ))
}

pub(super) fn point_to_remove(points: &[ItemPoint], local: Point) -> Option<usize> {
    if points.len() <= MIN_POINTS {
        return None;
    }
    (0..points.len()).min_by(|a, b| {
        let da = (points[*a].position() - local).hypot2();
        let db = (points[*b].position() - local).hypot2();
        da.total_cmp(&db)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Item {
        Item::new_polygon(vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
            Point::new(0.0, 100.0),
        ])
    }

    #[test]
    fn test_insert_on_closing_edge() {
        let item = square();
        let (index, _) = item.point_to_insert(Point::new(0.0, 50.0)).unwrap();
        assert_eq!(index, 4);
    }

    #[test]
    fn test_remove_respects_minimum() {
        let item = square();
        assert_eq!(item.point_to_remove(Point::new(-5.0, -5.0)), Some(0));
        let triangle =
            Item::new_polygon(vec![Point::ZERO, Point::new(10.0, 0.0), Point::new(0.0, 10.0)]);
        assert_eq!(triangle.point_to_remove(Point::ZERO), None);
    }

    #[test]
    fn test_not_placed_by_drag() {
        let item = square();
        assert!(!item.has_flags(ItemFlags::PLACE_BY_MOUSE_PRESS_AND_RELEASE));
        assert!(item.contains(Point::new(50.0, 50.0), 0.0));
    }
}
