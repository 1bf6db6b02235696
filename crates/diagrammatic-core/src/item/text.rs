//! Single- or multi-line caption anchored at the item origin.

use super::{Item, ItemFlags, ItemKind};
use crate::painter::{Pen, Painter};
use crate::point::{ItemPoint, PointFlags};
use crate::style::{HorizontalAlignment, Style, StyleKey, VerticalAlignment};
use kurbo::{Point, Rect, Size};

/// Average glyph advance as a fraction of the font size.
const CHAR_WIDTH_RATIO: f64 = 0.6;

impl Item {
    /// Text item showing `caption` at a scene position.
    pub fn new_text(position: Point, caption: &str) -> Item {
        let mut style = Style::new();
        style.init_text();
        style.set(StyleKey::Caption, caption);

        let points = vec![ItemPoint::new(Point::ZERO, PointFlags::empty())];
        let flags = ItemFlags::DEFAULT | ItemFlags::CAN_DELETE;
        let mut item = Item::from_parts(ItemKind::Text, flags, points, style);
        item.position = position;
        item
    }

    /// Caption of a text or captioned-shape item; empty for other kinds.
    pub fn caption(&self) -> String {
        self.style.get(StyleKey::Caption, String::new())
    }
}

/// Approximate extent of `caption` at `font_size`.
pub(super) fn text_size(caption: &str, font_size: f64) -> Size {
    let lines = caption.lines().count().max(1);
    let widest = caption.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    Size::new(
        CHAR_WIDTH_RATIO * font_size * widest as f64,
        font_size * lines as f64,
    )
}

/// Text box placed around the origin according to the style alignment.
pub(super) fn bounding_rect(_points: &[ItemPoint], style: &Style) -> Rect {
    let caption = style.get(StyleKey::Caption, String::new());
    let size = text_size(&caption, style.font().size);
    let alignment = style.text_alignment();
    let x = match alignment.horizontal {
        HorizontalAlignment::Left => 0.0,
        HorizontalAlignment::Center => -size.width / 2.0,
        HorizontalAlignment::Right => -size.width,
    };
    let y = match alignment.vertical {
        VerticalAlignment::Top => 0.0,
        VerticalAlignment::Center => -size.height / 2.0,
        VerticalAlignment::Bottom => -size.height,
    };
    Rect::from_origin_size(Point::new(x, y), size)
}

pub(super) fn is_valid(style: &Style) -> bool {
    !style.get(StyleKey::Caption, String::new()).is_empty()
}

pub(super) fn render(rect: Rect, style: &Style, painter: &mut dyn Painter) {
    painter.set_pen(Pen::none());
    painter.set_brush(style.text_brush());
    let caption = style.get(StyleKey::Caption, String::new());
    painter.draw_text(rect, style.text_alignment(), &style.font(), &caption);
}
