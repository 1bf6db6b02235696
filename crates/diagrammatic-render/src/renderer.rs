//! Frame painting for an editor view.

use diagrammatic_core::style::PenStyle;
use diagrammatic_core::{Brush, Editor, Item, Painter, Pen};
use kurbo::{Ellipse, Line, Point, Rect, Size};
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Viewport is empty: {0:?}")]
    EmptyViewport(Size),
    #[error("Render failed: {0}")]
    RenderFailed(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Grid display style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridStyle {
    /// No grid.
    None,
    /// Full grid lines.
    #[default]
    Lines,
    /// Only grid intersections.
    Dots,
}

impl GridStyle {
    /// Cycle to the next grid style.
    pub fn next(self) -> Self {
        match self {
            GridStyle::None => GridStyle::Lines,
            GridStyle::Lines => GridStyle::Dots,
            GridStyle::Dots => GridStyle::None,
        }
    }

    /// Get display name for this grid style.
    pub fn name(self) -> &'static str {
        match self {
            GridStyle::None => "None",
            GridStyle::Lines => "Lines",
            GridStyle::Dots => "Dots",
        }
    }
}

/// Grid spacings closer than this many pixels are not drawn.
const MIN_GRID_PIXELS: f64 = 4.0;

/// Context for a single render frame.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Viewport size in pixels.
    pub viewport_size: Size,
    pub grid_style: GridStyle,
    pub grid_color: Color,
    /// Color of point handles and the rubber band.
    pub selection_color: Color,
    /// Edge length of point handles in pixels.
    pub handle_size: f64,
}

impl RenderContext {
    /// Create a new render context.
    pub fn new(viewport_size: Size) -> Self {
        Self {
            viewport_size,
            grid_style: GridStyle::Lines,
            grid_color: Color::from_rgba8(200, 200, 200, 255),
            selection_color: Color::from_rgba8(59, 130, 246, 255), // Blue
            handle_size: 8.0,
        }
    }

    pub fn with_grid_style(mut self, style: GridStyle) -> Self {
        self.grid_style = style;
        self
    }

    pub fn with_grid_color(mut self, color: Color) -> Self {
        self.grid_color = color;
        self
    }

    pub fn with_selection_color(mut self, color: Color) -> Self {
        self.selection_color = color;
        self
    }

    pub fn with_handle_size(mut self, size: f64) -> Self {
        self.handle_size = size;
        self
    }
}

/// Counts of what a frame painted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub grid_marks: usize,
    pub items: usize,
    pub ghosts: usize,
    pub handles: usize,
    pub rubber_band: bool,
}

/// Paints an editor's scene, overlays and interaction feedback onto a
/// [`Painter`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewRenderer;

impl ViewRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Paint one frame. Everything except the rubber band is drawn under
    /// the view transform; the rubber band is drawn in viewport pixels.
    pub fn render(
        &self,
        editor: &Editor,
        ctx: &RenderContext,
        painter: &mut dyn Painter,
    ) -> RenderResult<FrameStats> {
        let viewport = ctx.viewport_size;
        if viewport.width <= 0.0 || viewport.height <= 0.0 {
            return Err(RendererError::EmptyViewport(viewport));
        }
        let scale = editor.scale();
        if !scale.is_finite() || scale <= 0.0 {
            return Err(RendererError::RenderFailed(format!("invalid view scale {scale}")));
        }

        let mut stats = FrameStats::default();
        let view = editor.view().transform();
        let scene_rect = editor.scene().scene_rect();

        painter.save();
        painter.concat_transform(view);

        painter.set_pen(Pen::none());
        painter.set_brush(Brush::solid(editor.scene().background().into()));
        painter.draw_rect(scene_rect);

        let visible = editor.view().map_rect_to_scene(viewport.to_rect()).intersect(scene_rect);
        stats.grid_marks = self.render_grid(painter, ctx, visible, editor.grid(), scale);

        for item in editor.scene().items().filter(|item| item.is_visible()) {
            render_item(painter, item);
            stats.items += 1;
        }

        for ghost in editor.place_items() {
            render_item(painter, ghost);
            stats.ghosts += 1;
        }

        for item in editor.selected_items() {
            stats.handles += self.render_handles(painter, ctx, editor, item, scale);
        }

        painter.restore();

        if let Some(band) = editor.rubber_band_rect() {
            self.render_rubber_band(painter, ctx, band);
            stats.rubber_band = true;
        }

        log::trace!("Rendered frame: {stats:?}");
        Ok(stats)
    }

    /// Draw the grid over `visible`, in scene units. Returns the number of
    /// marks drawn.
    fn render_grid(
        &self,
        painter: &mut dyn Painter,
        ctx: &RenderContext,
        visible: Rect,
        grid: f64,
        scale: f64,
    ) -> usize {
        if ctx.grid_style == GridStyle::None || grid <= 0.0 || visible.is_zero_area() {
            return 0;
        }
        if grid * scale < MIN_GRID_PIXELS {
            return 0;
        }

        let (start_x, start_y, end_x, end_y) = grid_bounds(visible, grid);
        let xs = grid_steps(start_x, end_x, grid);
        let ys = grid_steps(start_y, end_y, grid);

        match ctx.grid_style {
            GridStyle::None => 0,
            GridStyle::Lines => {
                painter.set_pen(Pen::new(ctx.grid_color, 1.0 / scale));
                painter.set_brush(Brush::none());
                for &x in &xs {
                    painter.draw_line(Line::new((x, start_y), (x, end_y)));
                }
                for &y in &ys {
                    painter.draw_line(Line::new((start_x, y), (end_x, y)));
                }
                xs.len() + ys.len()
            }
            GridStyle::Dots => {
                let radius = 1.0 / scale;
                painter.set_pen(Pen::none());
                painter.set_brush(Brush::solid(ctx.grid_color));
                for &x in &xs {
                    for &y in &ys {
                        painter.draw_ellipse(Ellipse::new(Point::new(x, y), (radius, radius), 0.0));
                    }
                }
                xs.len() * ys.len()
            }
        }
    }

    /// Draw the point handles of a selected item. Control points are
    /// squares, bare connection points circles; connected points are filled.
    fn render_handles(
        &self,
        painter: &mut dyn Painter,
        ctx: &RenderContext,
        editor: &Editor,
        item: &Item,
        scale: f64,
    ) -> usize {
        let half = ctx.handle_size / scale / 2.0;
        let connections = editor.scene().connections();
        painter.set_pen(Pen::new(ctx.selection_color, 1.0 / scale));

        let mut drawn = 0;
        for (index, point) in item.points().iter().enumerate() {
            let Some(center) = item.point_scene_position(index) else {
                continue;
            };
            let connected = item
                .point_ref(index)
                .is_some_and(|point_ref| connections.has_peers(point_ref));
            painter.set_brush(if connected {
                Brush::solid(ctx.selection_color)
            } else {
                Brush::solid(Color::WHITE)
            });
            if point.is_control() {
                painter.draw_rect(Rect::from_center_size(center, (half * 2.0, half * 2.0)));
            } else {
                painter.draw_ellipse(Ellipse::new(center, (half, half), 0.0));
            }
            drawn += 1;
        }
        drawn
    }

    fn render_rubber_band(&self, painter: &mut dyn Painter, ctx: &RenderContext, band: Rect) {
        let mut pen = Pen::new(ctx.selection_color, 1.0);
        pen.style = PenStyle::Dash;
        painter.set_pen(pen);
        painter.set_brush(Brush::solid(ctx.selection_color.with_alpha(0.1)));
        painter.draw_rect(band);
    }
}

fn render_item(painter: &mut dyn Painter, item: &Item) {
    painter.save();
    painter.concat_transform(item.scene_transform());
    item.render(painter);
    painter.restore();
}

/// Grid-aligned bounds covering `rect`.
fn grid_bounds(rect: Rect, grid: f64) -> (f64, f64, f64, f64) {
    let start_x = (rect.x0 / grid).floor() * grid;
    let start_y = (rect.y0 / grid).floor() * grid;
    let end_x = (rect.x1 / grid).ceil() * grid;
    let end_y = (rect.y1 / grid).ceil() * grid;
    (start_x, start_y, end_x, end_y)
}

fn grid_steps(start: f64, end: f64, grid: f64) -> Vec<f64> {
    let count = ((end - start) / grid).round() as usize;
    (0..=count).map(|i| start + i as f64 * grid).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display_list::{DisplayList, DrawShape};
    use diagrammatic_core::{EditorConfig, MouseEvent};

    fn editor() -> Editor {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut editor = Editor::new(EditorConfig {
            scene_rect: Rect::new(0.0, 0.0, 1000.0, 1000.0),
            grid: 50.0,
            ..EditorConfig::default()
        });
        editor.set_viewport_size(Size::new(400.0, 300.0));
        editor
    }

    fn ctx() -> RenderContext {
        RenderContext::new(Size::new(400.0, 300.0)).with_grid_style(GridStyle::None)
    }

    #[test]
    fn test_grid_style_cycle() {
        assert_eq!(GridStyle::default().next(), GridStyle::Dots);
        assert_eq!(GridStyle::Dots.next().next(), GridStyle::Lines);
        assert_eq!(GridStyle::None.name(), "None");
    }

    #[test]
    fn test_empty_viewport_is_an_error() {
        let editor = editor();
        let mut list = DisplayList::new();
        let result = ViewRenderer::new().render(&editor, &RenderContext::new(Size::ZERO), &mut list);
        assert!(matches!(result, Err(RendererError::EmptyViewport(_))));
        assert!(list.is_empty());
    }

    #[test]
    fn test_background_then_items_in_paint_order() {
        let mut editor = editor();
        let back = Item::new_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
        let front = Item::new_rect(Rect::new(200.0, 0.0, 300.0, 100.0));
        let hidden = front.id();
        let top = Item::new_line(Point::new(0.0, 200.0), Point::new(100.0, 200.0));
        editor.add_items(vec![back, front, top], false);
        editor.set_items_visible(vec![hidden], false);

        let mut list = DisplayList::new();
        let stats = ViewRenderer::new().render(&editor, &ctx(), &mut list).unwrap();
        assert_eq!(stats.items, 2);
        assert_eq!(stats.handles, 0);
        assert!(editor.scene().item(hidden).is_some());

        let ops = list.ops();
        assert!(matches!(ops[0].shape, DrawShape::Rect(r) if r == Rect::new(0.0, 0.0, 1000.0, 1000.0)));
        assert!(ops[0].brush.is_visible());
        assert!(matches!(ops[1].shape, DrawShape::Rect(_)));
        assert!(matches!(ops[2].shape, DrawShape::Line(_) | DrawShape::Path(_)));
        assert_eq!(list.save_depth(), 0);
    }

    #[test]
    fn test_items_draw_in_scene_frame() {
        let mut editor = editor();
        editor.add_items(vec![Item::new_rect(Rect::new(100.0, 50.0, 200.0, 150.0))], false);
        let mut list = DisplayList::new();
        ViewRenderer::new().render(&editor, &ctx(), &mut list).unwrap();

        let item_op = &list.ops()[1];
        let expected = editor.view().map_rect_from_scene(Rect::new(100.0, 50.0, 200.0, 150.0));
        let bounds = item_op.bounds();
        assert!((bounds.x0 - expected.x0).abs() < 1e-9);
        assert!((bounds.y1 - expected.y1).abs() < 1e-9);
    }

    #[test]
    fn test_selected_items_get_handles() {
        let mut editor = editor();
        let rect = Item::new_rect(Rect::new(100.0, 100.0, 200.0, 200.0));
        let id = rect.id();
        editor.add_items(vec![rect], false);
        editor.select_items(vec![id]);

        let mut list = DisplayList::new();
        let stats = ViewRenderer::new()
            .render(&editor, &ctx().with_handle_size(10.0), &mut list)
            .unwrap();
        assert_eq!(stats.handles, 8);
        let handle = list.ops().last().unwrap();
        let size = handle.bounds().size();
        assert!((size.width - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_grid_marks_cover_visible_area() {
        let editor = editor();
        let visible = editor.view().visible_scene_rect().intersect(editor.scene().scene_rect());
        let (x0, y0, x1, y1) = grid_bounds(visible, 50.0);
        let columns = ((x1 - x0) / 50.0).round() as usize + 1;
        let rows = ((y1 - y0) / 50.0).round() as usize + 1;

        let mut lines = DisplayList::new();
        let stats = ViewRenderer::new()
            .render(&editor, &ctx().with_grid_style(GridStyle::Lines), &mut lines)
            .unwrap();
        assert_eq!(stats.grid_marks, columns + rows);
        assert_eq!(lines.len(), 1 + columns + rows);

        let mut dots = DisplayList::new();
        let stats = ViewRenderer::new()
            .render(&editor, &ctx().with_grid_style(GridStyle::Dots), &mut dots)
            .unwrap();
        assert_eq!(stats.grid_marks, columns * rows);
    }

    #[test]
    fn test_dense_grid_is_skipped() {
        let mut editor = editor();
        editor.set_grid(2.0);
        let mut list = DisplayList::new();
        let stats = ViewRenderer::new()
            .render(&editor, &ctx().with_grid_style(GridStyle::Lines), &mut list)
            .unwrap();
        assert_eq!(stats.grid_marks, 0);
    }

    #[test]
    fn test_place_ghosts_and_rubber_band_last() {
        let mut editor = editor();
        editor.set_place_mode(vec![Item::new_rect(Rect::new(0.0, 0.0, 40.0, 40.0))]);
        let mut list = DisplayList::new();
        let stats = ViewRenderer::new().render(&editor, &ctx(), &mut list).unwrap();
        assert_eq!(stats.ghosts, 1);
        assert!(!stats.rubber_band);

        editor.set_default_mode();
        editor.mouse_press(&MouseEvent::left(Point::new(300.0, 250.0)));
        editor.mouse_move(&MouseEvent::left(Point::new(380.0, 290.0)));
        let band = editor.rubber_band_rect().unwrap();

        let mut list = DisplayList::new();
        let stats = ViewRenderer::new().render(&editor, &ctx(), &mut list).unwrap();
        assert!(stats.rubber_band);
        let last = list.ops().last().unwrap();
        assert_eq!(last.transform, kurbo::Affine::IDENTITY);
        assert!(matches!(last.shape, DrawShape::Rect(r) if r == band));
    }
}
