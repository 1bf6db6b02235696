//! Axis-aligned rectangle with eight handles.
//!
//! Handles run clockwise from the top-left corner: corners at even indices,
//! edge midpoints at odd ones. Ellipses share this layout.

use super::{Item, ItemFlags, ItemKind};
use crate::painter::Painter;
use crate::point::{ItemPoint, PointFlags};
use crate::style::{Style, StyleKey};
use kurbo::{Point, Rect};

pub(super) const TOP_LEFT: usize = 0;
pub(super) const TOP_MIDDLE: usize = 1;
pub(super) const TOP_RIGHT: usize = 2;
pub(super) const MIDDLE_RIGHT: usize = 3;
pub(super) const BOTTOM_RIGHT: usize = 4;
pub(super) const BOTTOM_MIDDLE: usize = 5;
pub(super) const BOTTOM_LEFT: usize = 6;
pub(super) const MIDDLE_LEFT: usize = 7;

impl Item {
    /// Rectangle covering a scene rect. The item is positioned at its top-left.
    pub fn new_rect(rect: Rect) -> Item {
        let mut style = Style::new();
        style.init_pen();
        style.init_brush();
        style.set(StyleKey::CornerRadius, style.get(StyleKey::CornerRadius, 0.0));
        box_item(ItemKind::Rect, rect, style)
    }
}

/// Eight-handle item for rect-like kinds.
pub(super) fn box_item(kind: ItemKind, rect: Rect, style: Style) -> Item {
    let points = (0..8)
        .map(|_| ItemPoint::new(Point::ZERO, PointFlags::CONTROL | PointFlags::CONNECTION))
        .collect();
    let flags = ItemFlags::DEFAULT
        | ItemFlags::CAN_DELETE
        | ItemFlags::PLACE_BY_MOUSE_PRESS_AND_RELEASE
        | ItemFlags::ADJUST_POSITION_ON_RESIZE;
    let mut item = Item::from_parts(kind, flags, points, style);
    let rect = rect.abs();
    item.position = rect.origin();
    set_rect(
        &mut item.points,
        Rect::from_origin_size(Point::ZERO, rect.size()),
    );
    item
}

/// Lay all eight handles out on `rect` without normalizing it.
pub(super) fn set_rect(points: &mut [ItemPoint], rect: Rect) {
    let (cx, cy) = ((rect.x0 + rect.x1) / 2.0, (rect.y0 + rect.y1) / 2.0);
    let layout = [
        (TOP_LEFT, rect.x0, rect.y0),
        (TOP_MIDDLE, cx, rect.y0),
        (TOP_RIGHT, rect.x1, rect.y0),
        (MIDDLE_RIGHT, rect.x1, cy),
        (BOTTOM_RIGHT, rect.x1, rect.y1),
        (BOTTOM_MIDDLE, cx, rect.y1),
        (BOTTOM_LEFT, rect.x0, rect.y1),
        (MIDDLE_LEFT, rect.x0, cy),
    ];
    for (index, x, y) in layout {
        points[index].set_position(Point::new(x, y));
    }
}

pub(super) fn corners(points: &[ItemPoint]) -> Rect {
    let (tl, br) = (points[TOP_LEFT].position(), points[BOTTOM_RIGHT].position());
    Rect::new(tl.x, tl.y, br.x, br.y)
}

/// Move the edges the dragged handle controls.
pub(super) fn resize(points: &mut [ItemPoint], index: usize, local: Point) {
    let mut rect = corners(points);
    match index {
        TOP_LEFT => (rect.x0, rect.y0) = (local.x, local.y),
        TOP_MIDDLE => rect.y0 = local.y,
        TOP_RIGHT => (rect.x1, rect.y0) = (local.x, local.y),
        MIDDLE_RIGHT => rect.x1 = local.x,
        BOTTOM_RIGHT => (rect.x1, rect.y1) = (local.x, local.y),
        BOTTOM_MIDDLE => rect.y1 = local.y,
        BOTTOM_LEFT => (rect.x0, rect.y1) = (local.x, local.y),
        MIDDLE_LEFT => rect.x0 = local.x,
        _ => return,
    }
    set_rect(points, rect);
}

pub(super) fn is_valid(points: &[ItemPoint]) -> bool {
    let rect = corners(points);
    rect.width() != 0.0 || rect.height() != 0.0
}

pub(super) fn bounding_rect(points: &[ItemPoint]) -> Rect {
    corners(points).abs()
}

pub(super) fn render(rect: Rect, style: &Style, painter: &mut dyn Painter) {
    painter.set_pen(style.pen());
    painter.set_brush(style.brush());
    let radius = style.get(StyleKey::CornerRadius, 0.0);
    if radius > 0.0 {
        painter.draw_rounded_rect(rect, radius);
    } else {
        painter.draw_rect(rect);
    }
}
