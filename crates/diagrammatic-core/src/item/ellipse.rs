//! Ellipse inscribed in an eight-handle box.

use super::geometry::Outline;
use super::rect::box_item;
use super::{Item, ItemKind};
use crate::painter::Painter;
use crate::style::Style;
use kurbo::{Ellipse, Point, Rect};
use std::f64::consts::TAU;

const SAMPLES: usize = 48;

impl Item {
    /// Ellipse inscribed in a scene rect.
    pub fn new_ellipse(rect: Rect) -> Item {
        let mut style = Style::new();
        style.init_pen();
        style.init_brush();
        box_item(ItemKind::Ellipse, rect, style)
    }
}

pub(super) fn bounding_rect(points: &[crate::point::ItemPoint]) -> Rect {
    super::rect::bounding_rect(points)
}

pub(super) fn outline(rect: Rect, filled: bool) -> Outline {
    let center = rect.center();
    let (rx, ry) = (rect.width() / 2.0, rect.height() / 2.0);
    let points = (0..SAMPLES)
        .map(|i| {
            let theta = TAU * i as f64 / SAMPLES as f64;
            Point::new(center.x + rx * theta.cos(), center.y + ry * theta.sin())
        })
        .collect();
    Outline::closed(points, filled)
}

pub(super) fn render(rect: Rect, style: &Style, painter: &mut dyn Painter) {
    painter.set_pen(style.pen());
    painter.set_brush(style.brush());
    painter.draw_ellipse(Ellipse::from_rect(rect));
}
