//! Stored vector path stretched over an eight-handle box.
//!
//! The path keeps its own coordinates; `path_rect` is the region of those
//! coordinates mapped onto the item's box. Connection points added in path
//! coordinates follow the box when it is resized.

use super::geometry::Outline;
use super::rect::{self, corners, set_rect};
use super::{Item, ItemFlags, ItemKind};
use crate::painter::Painter;
use crate::point::{ItemPoint, PointFlags};
use crate::style::Style;
use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Handles before the first added connection point.
const BOX_POINTS: usize = 8;

/// Path data carried by a path item.
#[derive(Debug, Clone)]
pub struct PathItem {
    name: String,
    path: BezPath,
    path_rect: Rect,
    /// Path coordinates of points `BOX_POINTS..`, in order.
    anchors: Vec<Point>,
}

impl PathItem {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &BezPath {
        &self.path
    }

    pub fn path_rect(&self) -> Rect {
        self.path_rect
    }
}

impl Item {
    /// Path item drawing `path` (whose region of interest is `path_rect`)
    /// over a scene rect. The item is positioned at the rect's top-left.
    pub fn new_path(name: &str, path: BezPath, path_rect: Rect, rect: Rect) -> Item {
        let mut style = Style::new();
        style.init_pen();
        style.init_brush();

        let points = (0..BOX_POINTS)
            .map(|_| ItemPoint::new(Point::ZERO, PointFlags::CONTROL))
            .collect();
        let flags = ItemFlags::DEFAULT | ItemFlags::CAN_DELETE;
        let data = PathItem {
            name: name.to_string(),
            path,
            path_rect,
            anchors: Vec::new(),
        };
        let mut item = Item::from_parts(ItemKind::Path(Box::new(data)), flags, points, style);
        let rect = rect.abs();
        item.position = rect.origin();
        set_rect(
            &mut item.points,
            Rect::from_origin_size(Point::ZERO, rect.size()),
        );
        item
    }

    pub fn as_path(&self) -> Option<&PathItem> {
        match &self.kind {
            ItemKind::Path(path) => Some(path),
            _ => None,
        }
    }

    /// Expose the path position `path_pos` as a connection point. A point
    /// already sitting there gains the connection flag instead.
    ///
    /// Returns false for items that are not paths.
    pub fn add_path_connection_point(&mut self, path_pos: Point) -> bool {
        let ItemKind::Path(data) = &mut self.kind else {
            return false;
        };
        let local = path_to_local(corners(&self.points), data.path_rect) * path_pos;
        match self.points.iter_mut().find(|p| p.position() == local) {
            Some(point) => point.set_flags(point.flags() | PointFlags::CONNECTION),
            None => {
                self.points.push(ItemPoint::new(local, PointFlags::CONNECTION));
                data.anchors.push(path_pos);
            }
        }
        true
    }
}

/// Map from path coordinates onto the (unnormalized) item box.
fn path_to_local(item_rect: Rect, path_rect: Rect) -> Affine {
    let scale = Vec2::new(
        item_rect.width() / path_rect.width(),
        item_rect.height() / path_rect.height(),
    );
    Affine::translate(item_rect.origin().to_vec2())
        * Affine::scale_non_uniform(scale.x, scale.y)
        * Affine::translate(-path_rect.origin().to_vec2())
}

pub(super) fn is_valid(points: &[ItemPoint], data: &PathItem) -> bool {
    let rect = corners(points);
    rect.origin() != Point::new(rect.x1, rect.y1)
        && data.path_rect.width() != 0.0
        && data.path_rect.height() != 0.0
        && !data.path.elements().is_empty()
}

pub(super) fn bounding_rect(points: &[ItemPoint]) -> Rect {
    rect::bounding_rect(points)
}

/// Hit area is the whole box.
pub(super) fn outline(points: &[ItemPoint]) -> Outline {
    Outline::from_rect(bounding_rect(points), true)
}

/// Resize the box, then carry the connection points along.
pub(super) fn resize(points: &mut [ItemPoint], data: &PathItem, index: usize, local: Point) {
    if index < BOX_POINTS {
        rect::resize(points, index, local);
    }
    let transform = path_to_local(corners(points), data.path_rect);
    for (point, anchor) in points[BOX_POINTS..].iter_mut().zip(&data.anchors) {
        point.set_position(transform * *anchor);
    }
}

pub(super) fn render(
    points: &[ItemPoint],
    data: &PathItem,
    style: &Style,
    painter: &mut dyn Painter,
) {
    let mut path = data.path.clone();
    path.apply_affine(path_to_local(corners(points), data.path_rect));
    painter.set_pen(style.pen());
    painter.set_brush(style.brush());
    painter.draw_path(&path);
}
