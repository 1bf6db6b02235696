//! Viewport-to-scene mapping with pan and zoom.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest allowed scale factor.
pub const MIN_SCALE: f64 = 1.0 / 1024.0;
/// Largest allowed scale factor.
pub const MAX_SCALE: f64 = 1024.0;
/// Factor applied by a single zoom step.
pub const ZOOM_STEP: f64 = std::f64::consts::SQRT_2;
/// Margin in viewport pixels kept around a fitted rectangle.
pub const FIT_MARGIN: f64 = 5.0;

/// Uniform scale plus translation mapping scene units to viewport pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    /// Viewport position of the scene origin.
    pub offset: Vec2,
    /// Viewport pixels per scene unit.
    pub scale: f64,
    /// Minimum allowed scale.
    pub min_scale: f64,
    /// Maximum allowed scale.
    pub max_scale: f64,
    viewport: Size,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            viewport: Size::new(800.0, 600.0),
        }
    }
}

impl ViewTransform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scene-to-viewport transform.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.scale)
    }

    /// Viewport-to-scene transform.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.scale) * Affine::translate(-self.offset)
    }

    /// Map a viewport point to scene coordinates.
    pub fn map_to_scene(&self, viewport_point: Point) -> Point {
        self.inverse_transform() * viewport_point
    }

    /// Map a scene point to viewport coordinates.
    pub fn map_from_scene(&self, scene_point: Point) -> Point {
        self.transform() * scene_point
    }

    /// Map a viewport rectangle to scene coordinates.
    pub fn map_rect_to_scene(&self, rect: Rect) -> Rect {
        Rect::from_points(self.map_to_scene(rect.origin()), self.map_to_scene(Point::new(rect.x1, rect.y1)))
    }

    /// Map a scene rectangle to viewport coordinates.
    pub fn map_rect_from_scene(&self, rect: Rect) -> Rect {
        Rect::from_points(
            self.map_from_scene(rect.origin()),
            self.map_from_scene(Point::new(rect.x1, rect.y1)),
        )
    }

    /// Size of the viewport in pixels.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Resize the viewport, keeping the scene point at its center fixed.
    pub fn set_viewport(&mut self, size: Size) {
        let center = self.map_to_scene(self.viewport_center());
        self.viewport = size;
        self.center_on(center);
    }

    fn viewport_center(&self) -> Point {
        Point::new(self.viewport.width / 2.0, self.viewport.height / 2.0)
    }

    /// Scene rectangle currently visible in the viewport.
    pub fn visible_scene_rect(&self) -> Rect {
        self.map_rect_to_scene(self.viewport.to_rect())
    }

    /// Pan by a delta in viewport pixels.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Put the given scene point at the viewport center.
    pub fn center_on(&mut self, scene_point: Point) {
        let center = self.viewport_center();
        self.offset = Vec2::new(
            center.x - scene_point.x * self.scale,
            center.y - scene_point.y * self.scale,
        );
    }

    /// Zoom by `factor`, keeping the given viewport point fixed.
    ///
    /// Returns whether the scale changed.
    pub fn zoom_at(&mut self, viewport_point: Point, factor: f64) -> bool {
        let new_scale = (self.scale * factor).clamp(self.min_scale, self.max_scale);
        if (new_scale - self.scale).abs() < f64::EPSILON * self.scale {
            return false;
        }

        let scene_point = self.map_to_scene(viewport_point);
        self.scale = new_scale;

        let new_viewport = self.map_from_scene(scene_point);
        self.offset += viewport_point - new_viewport;
        true
    }

    /// Set an absolute scale, keeping the viewport center fixed.
    pub fn set_scale(&mut self, scale: f64) -> bool {
        if !(scale.is_finite() && scale > 0.0) {
            return false;
        }
        self.zoom_at(self.viewport_center(), scale / self.scale)
    }

    /// Zoom in one step about the viewport center.
    pub fn zoom_in(&mut self) -> bool {
        self.zoom_at(self.viewport_center(), ZOOM_STEP)
    }

    /// Zoom out one step about the viewport center.
    pub fn zoom_out(&mut self) -> bool {
        self.zoom_at(self.viewport_center(), 1.0 / ZOOM_STEP)
    }

    /// Fit a scene rectangle into the viewport with a small margin and center it.
    ///
    /// Degenerate rectangles only recenter.
    pub fn zoom_to_rect(&mut self, rect: Rect) -> bool {
        let old_scale = self.scale;
        let old_offset = self.offset;
        if rect.width() > 0.0 && rect.height() > 0.0 {
            let scale_x = (self.viewport.width - FIT_MARGIN).max(1.0) / rect.width();
            let scale_y = (self.viewport.height - FIT_MARGIN).max(1.0) / rect.height();
            self.scale = scale_x.min(scale_y).clamp(self.min_scale, self.max_scale);
        }
        self.center_on(rect.center());
        (self.scale - old_scale).abs() > f64::EPSILON || self.offset != old_offset
    }

    /// Reset to scale 1 with the scene origin at the viewport origin.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.scale = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_view() {
        let view = ViewTransform::new();
        assert_eq!(view.offset, Vec2::ZERO);
        assert!((view.scale - 1.0).abs() < f64::EPSILON);
        assert_eq!(view.viewport(), Size::new(800.0, 600.0));
    }

    #[test]
    fn test_map_with_offset_and_scale() {
        let mut view = ViewTransform::new();
        view.offset = Vec2::new(50.0, 100.0);
        view.scale = 2.0;
        let scene = view.map_to_scene(Point::new(150.0, 300.0));
        assert!((scene.x - 50.0).abs() < f64::EPSILON);
        assert!((scene.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_roundtrip_mapping() {
        let mut view = ViewTransform::new();
        view.offset = Vec2::new(30.0, -20.0);
        view.scale = 1.5;
        let original = Point::new(123.0, 456.0);
        let back = view.map_from_scene(view.map_to_scene(original));
        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_in_out_by_sqrt2() {
        let mut view = ViewTransform::new();
        assert!(view.zoom_in());
        assert!((view.scale - std::f64::consts::SQRT_2).abs() < 1e-12);
        assert!(view.zoom_out());
        assert!((view.scale - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zoom_at_keeps_point_fixed() {
        let mut view = ViewTransform::new();
        let anchor = Point::new(200.0, 150.0);
        let before = view.map_to_scene(anchor);
        view.zoom_at(anchor, 3.0);
        let after = view.map_to_scene(anchor);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut view = ViewTransform::new();
        view.zoom_at(Point::ZERO, 1e-9);
        assert!((view.scale - MIN_SCALE).abs() < f64::EPSILON);
        assert!(!view.zoom_out());

        view.scale = 1.0;
        view.zoom_at(Point::ZERO, 1e9);
        assert!((view.scale - MAX_SCALE).abs() < f64::EPSILON);
        assert!(!view.zoom_in());
    }

    #[test]
    fn test_zoom_to_rect_fits_and_centers() {
        let mut view = ViewTransform::new();
        view.set_viewport(Size::new(1105.0, 855.0));
        view.zoom_to_rect(Rect::new(0.0, 0.0, 11000.0, 8500.0));
        assert!((view.scale - 0.1).abs() < 1e-12);
        let center = view.map_from_scene(Point::new(5500.0, 4250.0));
        assert!((center.x - 552.5).abs() < 1e-9);
        assert!((center.y - 427.5).abs() < 1e-9);
    }

    #[test]
    fn test_pan() {
        let mut view = ViewTransform::new();
        view.pan(Vec2::new(10.0, 20.0));
        assert!((view.offset.x - 10.0).abs() < f64::EPSILON);
        assert!((view.offset.y - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_visible_scene_rect() {
        let mut view = ViewTransform::new();
        view.scale = 2.0;
        let visible = view.visible_scene_rect();
        assert!((visible.width() - 400.0).abs() < 1e-9);
        assert!((visible.height() - 300.0).abs() < 1e-9);
    }
}
