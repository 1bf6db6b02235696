//! Drawing interface consumed by item rendering.

use crate::style::{
    BrushStyle, CapStyle, HorizontalAlignment, JoinStyle, PenStyle, VerticalAlignment,
};
use kurbo::{Affine, BezPath, Ellipse, Line, Point, Rect, Vec2};
use peniko::Color;

/// Stroke settings.
#[derive(Debug, Clone, Copy)]
pub struct Pen {
    pub color: Color,
    pub width: f64,
    pub style: PenStyle,
    pub cap: CapStyle,
    pub join: JoinStyle,
}

impl Pen {
    pub fn new(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            style: PenStyle::Solid,
            cap: CapStyle::Round,
            join: JoinStyle::Round,
        }
    }

    /// A pen that draws nothing.
    pub fn none() -> Self {
        Self {
            style: PenStyle::NoPen,
            ..Self::new(Color::TRANSPARENT, 0.0)
        }
    }

    pub fn is_visible(&self) -> bool {
        self.style != PenStyle::NoPen
    }
}

impl Default for Pen {
    fn default() -> Self {
        Self::new(Color::BLACK, 1.0)
    }
}

/// Fill settings.
#[derive(Debug, Clone, Copy)]
pub struct Brush {
    pub color: Color,
    pub style: BrushStyle,
}

impl Brush {
    pub fn solid(color: Color) -> Self {
        Self {
            color,
            style: BrushStyle::Solid,
        }
    }

    /// A brush that fills nothing.
    pub fn none() -> Self {
        Self {
            color: Color::TRANSPARENT,
            style: BrushStyle::NoBrush,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.style != BrushStyle::NoBrush
    }
}

impl Default for Brush {
    fn default() -> Self {
        Self::none()
    }
}

/// Font description resolved from a style.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub family: String,
    pub size: f64,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub overline: bool,
    pub strike_through: bool,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: "Arial".to_string(),
            size: 100.0,
            bold: false,
            italic: false,
            underline: false,
            overline: false,
            strike_through: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextAlignment {
    pub horizontal: HorizontalAlignment,
    pub vertical: VerticalAlignment,
}

/// A 2D painter with save/restore state, pen, brush and an affine transform.
///
/// Items draw in their local frame; the caller installs the item's
/// transform before calling `render`.
pub trait Painter {
    /// Push the current pen, brush and transform.
    fn save(&mut self);

    /// Pop the state pushed by the matching `save`.
    fn restore(&mut self);

    /// Post-multiply the current transform.
    fn concat_transform(&mut self, transform: Affine);

    fn translate(&mut self, delta: Vec2) {
        self.concat_transform(Affine::translate(delta));
    }

    fn set_pen(&mut self, pen: Pen);
    fn set_brush(&mut self, brush: Brush);
    fn pen(&self) -> Pen;
    fn brush(&self) -> Brush;

    fn draw_line(&mut self, line: Line);
    fn draw_rect(&mut self, rect: Rect);
    fn draw_rounded_rect(&mut self, rect: Rect, radius: f64);
    fn draw_ellipse(&mut self, ellipse: Ellipse);
    fn draw_path(&mut self, path: &BezPath);
    fn draw_polygon(&mut self, points: &[Point]);
    fn draw_polyline(&mut self, points: &[Point]);
    fn draw_text(&mut self, rect: Rect, alignment: TextAlignment, font: &Font, text: &str);
}
