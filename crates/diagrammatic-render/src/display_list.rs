//! Recording painter.
//!
//! [`DisplayList`] implements [`Painter`] by storing every draw call together
//! with the pen, brush and transform in effect at the time. Backends replay
//! the list; tests inspect it.

use diagrammatic_core::{Brush, Font, Painter, Pen, TextAlignment};
use kurbo::{Affine, BezPath, Ellipse, Line, Point, Rect, Shape as _, Vec2};

/// Geometry of a recorded draw call, in the frame given by its transform.
#[derive(Debug, Clone)]
pub enum DrawShape {
    Line(Line),
    Rect(Rect),
    RoundedRect { rect: Rect, radius: f64 },
    Ellipse(Ellipse),
    Path(BezPath),
    Polygon(Vec<Point>),
    Polyline(Vec<Point>),
    Text {
        rect: Rect,
        alignment: TextAlignment,
        font: Font,
        text: String,
    },
}

impl DrawShape {
    /// Bounding box in the shape's own frame.
    pub fn bounding_box(&self) -> Rect {
        match self {
            DrawShape::Line(line) => line.bounding_box(),
            DrawShape::Rect(rect) | DrawShape::RoundedRect { rect, .. } => rect.abs(),
            DrawShape::Ellipse(ellipse) => ellipse.bounding_box(),
            DrawShape::Path(path) => path.bounding_box(),
            DrawShape::Polygon(points) | DrawShape::Polyline(points) => points_bounds(points),
            DrawShape::Text { rect, .. } => rect.abs(),
        }
    }
}

fn points_bounds(points: &[Point]) -> Rect {
    let mut iter = points.iter();
    let Some(first) = iter.next() else {
        return Rect::ZERO;
    };
    iter.fold(Rect::from_points(*first, *first), |rect, p| rect.union_pt(*p))
}

/// One recorded draw call.
#[derive(Debug, Clone)]
pub struct DrawOp {
    pub shape: DrawShape,
    pub transform: Affine,
    pub pen: Pen,
    pub brush: Brush,
}

impl DrawOp {
    /// Bounding box in the recording's root frame.
    pub fn bounds(&self) -> Rect {
        self.transform.transform_rect_bbox(self.shape.bounding_box())
    }
}

#[derive(Debug, Clone, Copy)]
struct PaintState {
    transform: Affine,
    pen: Pen,
    brush: Brush,
}

impl Default for PaintState {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            pen: Pen::default(),
            brush: Brush::default(),
        }
    }
}

/// Ordered list of draw calls.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    ops: Vec<DrawOp>,
    state: PaintState,
    stack: Vec<PaintState>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Drop all recorded calls and reset the paint state.
    pub fn clear(&mut self) {
        self.ops.clear();
        self.stack.clear();
        self.state = PaintState::default();
    }

    /// Current transform.
    pub fn transform(&self) -> Affine {
        self.state.transform
    }

    /// Depth of unmatched `save` calls.
    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }

    /// Union of all recorded bounds.
    pub fn bounds(&self) -> Option<Rect> {
        self.ops.iter().map(DrawOp::bounds).reduce(|a, b| a.union(b))
    }

    fn record(&mut self, shape: DrawShape) {
        self.ops.push(DrawOp {
            shape,
            transform: self.state.transform,
            pen: self.state.pen,
            brush: self.state.brush,
        });
    }
}

impl Painter for DisplayList {
    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some(state) => self.state = state,
            None => log::warn!("restore without matching save"),
        }
    }

    fn concat_transform(&mut self, transform: Affine) {
        self.state.transform *= transform;
    }

    fn translate(&mut self, delta: Vec2) {
        self.concat_transform(Affine::translate(delta));
    }

    fn set_pen(&mut self, pen: Pen) {
        self.state.pen = pen;
    }

    fn set_brush(&mut self, brush: Brush) {
        self.state.brush = brush;
    }

    fn pen(&self) -> Pen {
        self.state.pen
    }

    fn brush(&self) -> Brush {
        self.state.brush
    }

    fn draw_line(&mut self, line: Line) {
        self.record(DrawShape::Line(line));
    }

    fn draw_rect(&mut self, rect: Rect) {
        self.record(DrawShape::Rect(rect));
    }

    fn draw_rounded_rect(&mut self, rect: Rect, radius: f64) {
        self.record(DrawShape::RoundedRect { rect, radius });
    }

    fn draw_ellipse(&mut self, ellipse: Ellipse) {
        self.record(DrawShape::Ellipse(ellipse));
    }

    fn draw_path(&mut self, path: &BezPath) {
        self.record(DrawShape::Path(path.clone()));
    }

    fn draw_polygon(&mut self, points: &[Point]) {
        self.record(DrawShape::Polygon(points.to_vec()));
    }

    fn draw_polyline(&mut self, points: &[Point]) {
        self.record(DrawShape::Polyline(points.to_vec()));
    }

    fn draw_text(&mut self, rect: Rect, alignment: TextAlignment, font: &Font, text: &str) {
        self.record(DrawShape::Text {
            rect,
            alignment,
            font: font.clone(),
            text: text.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use peniko::Color;

    #[test]
    fn test_records_state_per_call() {
        let mut list = DisplayList::new();
        list.set_pen(Pen::new(Color::BLACK, 2.0));
        list.save();
        list.translate(Vec2::new(10.0, 20.0));
        list.set_brush(Brush::solid(Color::WHITE));
        list.draw_rect(Rect::new(0.0, 0.0, 5.0, 5.0));
        list.restore();
        list.draw_line(Line::new((0.0, 0.0), (1.0, 1.0)));

        assert_eq!(list.len(), 2);
        let first = &list.ops()[0];
        assert_eq!(first.bounds(), Rect::new(10.0, 20.0, 15.0, 25.0));
        assert!(first.brush.is_visible());
        let second = &list.ops()[1];
        assert_eq!(second.transform, Affine::IDENTITY);
        assert!(!second.brush.is_visible());
        assert!((second.pen.width - 2.0).abs() < f64::EPSILON);
        assert_eq!(list.save_depth(), 0);
    }

    #[test]
    fn test_unbalanced_restore_is_ignored() {
        let mut list = DisplayList::new();
        list.translate(Vec2::new(3.0, 0.0));
        list.restore();
        assert_eq!(list.transform(), Affine::translate(Vec2::new(3.0, 0.0)));
    }

    #[test]
    fn test_bounds_union() {
        let mut list = DisplayList::new();
        assert!(list.bounds().is_none());
        list.draw_polyline(&[Point::new(0.0, 0.0), Point::new(10.0, 5.0)]);
        list.draw_polygon(&[Point::new(-5.0, 2.0), Point::new(0.0, 8.0), Point::new(3.0, 3.0)]);
        assert_eq!(list.bounds(), Some(Rect::new(-5.0, 0.0, 10.0, 8.0)));
        list.clear();
        assert!(list.is_empty());
    }
}
