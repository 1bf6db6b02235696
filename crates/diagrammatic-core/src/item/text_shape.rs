//! Rectangles, ellipses and polygons that carry a centered caption.
//!
//! The shape part reuses the plain kinds. The caption box is sized from the
//! font and centered on the shape: the box center for rects and ellipses, the
//! vertex average for polygons.

use super::geometry::Outline;
use super::rect::box_item;
use super::text::text_size;
use super::{Item, ItemFlags, ItemKind, ellipse, polygon, rect};
use crate::painter::{Painter, Pen, TextAlignment};
use crate::point::ItemPoint;
use crate::style::{HorizontalAlignment, Style, StyleKey, VerticalAlignment};
use kurbo::{Point, Rect};

fn caption_style(caption: &str) -> Style {
    let mut style = Style::new();
    style.init_pen();
    style.init_brush();
    style.init_text();
    style.set(StyleKey::Caption, caption);
    style
}

/// Captioned box item. Placed by a click, so the drag flag is cleared.
fn captioned_box(kind: ItemKind, rect: Rect, style: Style) -> Item {
    let mut item = box_item(kind, rect, style);
    item.flags.remove(ItemFlags::PLACE_BY_MOUSE_PRESS_AND_RELEASE);
    item
}

impl Item {
    /// Rectangle over a scene rect with `caption` centered inside.
    pub fn new_text_rect(rect: Rect, caption: &str) -> Item {
        let mut style = caption_style(caption);
        style.set(StyleKey::CornerRadius, style.get(StyleKey::CornerRadius, 0.0));
        captioned_box(ItemKind::TextRect, rect, style)
    }

    /// Ellipse inscribed in a scene rect with `caption` centered inside.
    pub fn new_text_ellipse(rect: Rect, caption: &str) -> Item {
        captioned_box(ItemKind::TextEllipse, rect, caption_style(caption))
    }

    /// Polygon through scene points with `caption` at the vertex average.
    pub fn new_text_polygon(scene_points: Vec<Point>, caption: &str) -> Item {
        let mut item = Item::new_polygon(scene_points);
        item.kind = ItemKind::TextPolygon;
        item.style = caption_style(caption);
        item
    }
}

fn vertex_average(points: &[ItemPoint]) -> Point {
    if points.is_empty() {
        return Point::ZERO;
    }
    let sum = points
        .iter()
        .fold(kurbo::Vec2::ZERO, |sum, p| sum + p.position().to_vec2());
    (sum / points.len() as f64).to_point()
}

/// Anchor of the caption for a captioned kind.
pub(super) fn caption_center(kind: &ItemKind, points: &[ItemPoint]) -> Point {
    match kind {
        ItemKind::TextPolygon => vertex_average(points),
        _ => rect::bounding_rect(points).center(),
    }
}

/// Caption box, or `None` when there is nothing to show.
pub(super) fn caption_rect(style: &Style, center: Point) -> Option<Rect> {
    let caption = style.get(StyleKey::Caption, String::new());
    if caption.is_empty() {
        return None;
    }
    let size = text_size(&caption, style.font().size);
    Some(Rect::from_center_size(center, size))
}

/// Shape bounds united with the caption box.
pub(super) fn bounding_rect(kind: &ItemKind, points: &[ItemPoint], style: &Style) -> Rect {
    let shape = match kind {
        ItemKind::TextPolygon => super::geometry::bounding_rect_of(
            &points.iter().map(ItemPoint::position).collect::<Vec<_>>(),
        ),
        _ => rect::bounding_rect(points),
    };
    match caption_rect(style, caption_center(kind, points)) {
        Some(text) => shape.union(text),
        None => shape,
    }
}

pub(super) fn is_valid(kind: &ItemKind, points: &[ItemPoint]) -> bool {
    match kind {
        ItemKind::TextPolygon => polygon::is_valid(points),
        _ => rect::is_valid(points),
    }
}

/// Shape outline plus a filled caption box.
pub(super) fn outlines(
    kind: &ItemKind,
    points: &[ItemPoint],
    style: &Style,
    filled: bool,
) -> Vec<Outline> {
    let shape = match kind {
        ItemKind::TextRect => Outline::from_rect(rect::bounding_rect(points), filled),
        ItemKind::TextEllipse => ellipse::outline(rect::bounding_rect(points), filled),
        _ => Outline::closed(points.iter().map(ItemPoint::position).collect(), filled),
    };
    let mut outlines = vec![shape];
    if let Some(text) = caption_rect(style, caption_center(kind, points)) {
        outlines.push(Outline::from_rect(text, true));
    }
    outlines
}

pub(super) fn render(kind: &ItemKind, points: &[ItemPoint], style: &Style, painter: &mut dyn Painter) {
    let shape = rect::bounding_rect(points);
    match kind {
        ItemKind::TextRect => rect::render(shape, style, painter),
        ItemKind::TextEllipse => ellipse::render(shape, style, painter),
        _ => polygon::render(points, style, painter),
    }
    let Some(text) = caption_rect(style, caption_center(kind, points)) else {
        return;
    };
    let centered = TextAlignment {
        horizontal: HorizontalAlignment::Center,
        vertical: VerticalAlignment::Center,
    };
    let caption = style.get(StyleKey::Caption, String::new());
    painter.set_pen(Pen::none());
    painter.set_brush(style.text_brush());
    painter.draw_text(text, centered, &style.font(), &caption);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::recording::Recording;

    #[test]
    fn test_text_rect_centers_caption() {
        let mut item = Item::new_text_rect(Rect::new(100.0, 100.0, 500.0, 300.0), "ab");
        item.style_mut().set(StyleKey::FontSize, 10.0);
        assert!(item.is_valid());
        assert!(!item.has_flags(ItemFlags::PLACE_BY_MOUSE_PRESS_AND_RELEASE));
        assert!(item.has_flags(ItemFlags::ADJUST_POSITION_ON_RESIZE));
        assert_eq!(item.caption(), "ab");

        let mut recording = Recording::default();
        item.render(&mut recording);
        assert_eq!(recording.calls, vec!["rect", "text"]);
        assert_eq!(recording.texts[0].0, Rect::new(194.0, 95.0, 206.0, 105.0));
        assert_eq!(recording.texts[0].1, "ab");
    }

    #[test]
    fn test_long_caption_grows_bounds() {
        let item = Item::new_text_ellipse(Rect::new(0.0, 0.0, 100.0, 100.0), "0123456789");
        // Ten glyphs at 100 units and 0.6 advance span 600.
        assert_eq!(item.bounding_rect(), Rect::new(-250.0, 0.0, 350.0, 100.0));
        assert!(item.contains(Point::new(-200.0, 50.0), 0.0));

        let blank = Item::new_text_ellipse(Rect::new(0.0, 0.0, 100.0, 100.0), "");
        assert!(blank.is_valid());
        assert_eq!(blank.bounding_rect(), Rect::new(0.0, 0.0, 100.0, 100.0));
        let mut recording = Recording::default();
        blank.render(&mut recording);
        assert_eq!(recording.calls, vec!["ellipse"]);
    }

    #[test]
    fn test_text_ellipse_resize_keeps_caption_centered() {
        let mut item = Item::new_text_ellipse(Rect::new(0.0, 0.0, 200.0, 100.0), "x");
        item.resize(rect::BOTTOM_RIGHT, Point::new(400.0, 300.0));
        let text = caption_rect(item.style(), caption_center(item.kind(), item.points()));
        assert_eq!(text.map(|r| r.center()), Some(Point::new(200.0, 150.0)));
    }

    #[test]
    fn test_text_polygon_edits_points() {
        let item = Item::new_text_polygon(
            vec![
                Point::new(0.0, 0.0),
                Point::new(300.0, 0.0),
                Point::new(0.0, 300.0),
            ],
            "",
        );
        assert!(matches!(item.kind(), ItemKind::TextPolygon));
        assert_eq!(caption_center(item.kind(), item.points()), Point::new(100.0, 100.0));
        let (index, _) = item.point_to_insert(Point::new(150.0, 0.0)).unwrap();
        assert_eq!(index, 1);
        assert_eq!(item.point_to_remove(Point::ZERO), None);
        assert!(item.contains(Point::new(50.0, 50.0), 0.0));
    }
}
