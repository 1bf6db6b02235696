//! Arrowheads drawn at the ends of line-like items.

use super::geometry::{Outline, direction};
use crate::painter::{Brush, Painter, Pen};
use crate::style::{ArrowStyle, PenStyle, Style};
use kurbo::{Ellipse, Line, Point};
use std::f64::consts::{FRAC_PI_4, FRAC_PI_6, PI, SQRT_2};

/// Vertices of an arrowhead whose tip sits at `tip`.
///
/// `angle` (radians) points from the tip back along the line.
pub fn arrow_points(style: ArrowStyle, size: f64, tip: Point, angle: f64) -> Vec<Point> {
    let wing = size / SQRT_2;
    let at = |length: f64, theta: f64| tip + direction(theta) * length;
    match style {
        ArrowStyle::Normal | ArrowStyle::Triangle | ArrowStyle::TriangleFilled => vec![
            tip,
            at(wing, angle - FRAC_PI_6),
            at(wing, angle + FRAC_PI_6),
        ],
        ArrowStyle::Harpoon => vec![tip, at(wing, angle - FRAC_PI_6)],
        ArrowStyle::HarpoonMirrored => vec![tip, at(wing, angle + FRAC_PI_6)],
        ArrowStyle::Concave | ArrowStyle::ConcaveFilled => vec![
            tip,
            at(wing, angle - FRAC_PI_6),
            at(wing / 2.0, angle),
            at(wing, angle + FRAC_PI_6),
        ],
        ArrowStyle::Diamond | ArrowStyle::DiamondFilled => vec![
            at(size / 2.0, angle),
            at(size / 2.0, angle - PI / 2.0),
            at(size / 2.0, angle - PI),
            at(size / 2.0, angle + PI / 2.0),
        ],
        ArrowStyle::Reverse => {
            let base = at(wing, angle);
            vec![
                base,
                base - direction(angle - FRAC_PI_6) * wing,
                base - direction(angle + FRAC_PI_6) * wing,
            ]
        }
        ArrowStyle::X => vec![
            at(wing, angle + FRAC_PI_4),
            at(wing, angle + 5.0 * FRAC_PI_4),
            at(wing, angle + 3.0 * FRAC_PI_4),
            at(wing, angle + 7.0 * FRAC_PI_4),
        ],
        ArrowStyle::Circle | ArrowStyle::CircleFilled | ArrowStyle::None => Vec::new(),
    }
}

/// One end of a stroke that may carry an arrowhead.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StrokeEnd {
    pub tip: Point,
    /// Direction (radians) from the tip back along the stroke.
    pub angle: f64,
    /// Length available for the head; shorter strokes get no arrow.
    pub reach: f64,
}

/// Arrowheads `(style, size, end)` the style asks for at each end.
pub(crate) fn end_arrows(
    style: &Style,
    start: StrokeEnd,
    end: StrokeEnd,
) -> Vec<(ArrowStyle, f64, StrokeEnd)> {
    let (start_style, start_size) = style.start_arrow();
    let (end_style, end_size) = style.end_arrow();
    [(start_style, start_size, start), (end_style, end_size, end)]
        .into_iter()
        .filter(|(arrow, size, at)| *arrow != ArrowStyle::None && at.reach > *size)
        .collect()
}

/// Outlines of both arrowheads.
pub(crate) fn end_arrow_outlines(style: &Style, start: StrokeEnd, end: StrokeEnd) -> Vec<Outline> {
    end_arrows(style, start, end)
        .into_iter()
        .flat_map(|(arrow, size, at)| arrow_outline(arrow, size, at.tip, at.angle))
        .collect()
}

/// Draw both arrowheads with `pen`, filling hollow heads with `background`.
pub(crate) fn draw_end_arrows(
    painter: &mut dyn Painter,
    style: &Style,
    start: StrokeEnd,
    end: StrokeEnd,
    pen: Pen,
    background: Brush,
) {
    if !pen.is_visible() {
        return;
    }
    for (arrow, size, at) in end_arrows(style, start, end) {
        draw_arrow(painter, arrow, size, at.tip, at.angle, pen, background);
    }
}

/// Hit-test outline of an arrowhead.
fn arrow_outline(style: ArrowStyle, size: f64, tip: Point, angle: f64) -> Vec<Outline> {
    match style {
        ArrowStyle::None => Vec::new(),
        ArrowStyle::Circle | ArrowStyle::CircleFilled => {
            let points = (0..24)
                .map(|i| tip + direction(i as f64 * PI / 12.0) * (size / 2.0))
                .collect();
            vec![Outline::closed(points, true)]
        }
        ArrowStyle::Normal | ArrowStyle::Reverse => {
            let p = arrow_points(style, size, tip, angle);
            vec![Outline::open(vec![p[1], p[0], p[2]])]
        }
        ArrowStyle::Harpoon | ArrowStyle::HarpoonMirrored => {
            vec![Outline::open(arrow_points(style, size, tip, angle))]
        }
        ArrowStyle::X => {
            let p = arrow_points(style, size, tip, angle);
            vec![Outline::open(vec![p[0], p[1]]), Outline::open(vec![p[2], p[3]])]
        }
        _ => vec![Outline::closed(arrow_points(style, size, tip, angle), true)],
    }
}

/// Draw an arrowhead. Hollow styles are filled with `background`.
fn draw_arrow(
    painter: &mut dyn Painter,
    style: ArrowStyle,
    size: f64,
    tip: Point,
    angle: f64,
    pen: Pen,
    background: Brush,
) {
    if style == ArrowStyle::None {
        return;
    }

    let mut arrow_pen = pen;
    if arrow_pen.style != PenStyle::NoPen {
        arrow_pen.style = PenStyle::Solid;
    }
    painter.set_pen(arrow_pen);
    painter.set_brush(if style.is_filled() {
        Brush::solid(pen.color)
    } else if style.is_hollow() {
        background
    } else {
        Brush::none()
    });

    let points = arrow_points(style, size, tip, angle);
    match style {
        ArrowStyle::Normal | ArrowStyle::Reverse => {
            painter.draw_line(Line::new(points[0], points[1]));
            painter.draw_line(Line::new(points[0], points[2]));
        }
        ArrowStyle::Circle | ArrowStyle::CircleFilled => {
            painter.draw_ellipse(Ellipse::new(tip, (size / 2.0, size / 2.0), 0.0));
        }
        ArrowStyle::Harpoon | ArrowStyle::HarpoonMirrored => {
            painter.draw_line(Line::new(points[0], points[1]));
        }
        ArrowStyle::X => {
            painter.draw_line(Line::new(points[0], points[1]));
            painter.draw_line(Line::new(points[2], points[3]));
        }
        _ => painter.draw_polygon(&points),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_arrow_wings() {
        let points = arrow_points(ArrowStyle::Normal, 100.0, Point::ZERO, 0.0);
        assert_eq!(points.len(), 3);
        assert_eq!(points[0], Point::ZERO);
        let wing = 100.0 / SQRT_2;
        assert!(((points[1] - Point::ZERO).hypot() - wing).abs() < 1e-9);
        assert!((points[1].y + points[2].y).abs() < 1e-9);
        assert!(points[1].x > 0.0);
    }

    #[test]
    fn test_point_counts() {
        let count = |style| arrow_points(style, 10.0, Point::ZERO, 1.0).len();
        assert_eq!(count(ArrowStyle::None), 0);
        assert_eq!(count(ArrowStyle::Harpoon), 2);
        assert_eq!(count(ArrowStyle::Concave), 4);
        assert_eq!(count(ArrowStyle::DiamondFilled), 4);
        assert_eq!(count(ArrowStyle::X), 4);
    }

    #[test]
    fn test_circle_outline_radius() {
        let outlines = arrow_outline(ArrowStyle::Circle, 20.0, Point::new(5.0, 5.0), 0.0);
        assert_eq!(outlines.len(), 1);
        assert!(outlines[0]
            .points
            .iter()
            .all(|p| ((*p - Point::new(5.0, 5.0)).hypot() - 10.0).abs() < 1e-9));
    }

    #[test]
    fn test_short_strokes_get_no_arrow() {
        let mut style = Style::new();
        style.set(crate::style::StyleKey::StartArrowStyle, ArrowStyle::Normal);
        style.set(crate::style::StyleKey::StartArrowSize, 50.0);
        let end = |reach| StrokeEnd {
            tip: Point::ZERO,
            angle: 0.0,
            reach,
        };
        assert_eq!(end_arrows(&style, end(100.0), end(100.0)).len(), 1);
        assert!(end_arrows(&style, end(40.0), end(100.0)).is_empty());
    }
}
