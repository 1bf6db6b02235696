//! Graphical items.
//!
//! Every item shares one record (position, transform, points, style, flags)
//! and carries an [`ItemKind`] tag. Geometry, rendering and point editing
//! are dispatched on that tag into the per-kind modules.

mod arc;
mod arrow;
mod curve;
mod ellipse;
mod geometry;
mod group;
mod line;
mod path;
mod polygon;
mod polyline;
mod rect;
mod text;
mod text_shape;

pub use arrow::arrow_points;
pub use geometry::{
    Outline, point_to_polyline_dist, point_to_segment_dist, polygon_contains, rect_contains_rect,
    rects_intersect,
};
pub use group::GroupItem;
pub use path::PathItem;

use crate::connections::{Connections, PointRef};
use crate::input::KeyEvent;
use crate::painter::Painter;
use crate::point::{ItemPoint, PointFlags, PointId};
use crate::style::{BrushStyle, PenStyle, Style, StyleColor, StyleKey};
use bitflags::bitflags;
use kurbo::{Affine, BezPath, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for items.
pub type ItemId = Uuid;

bitflags! {
    /// Capabilities of an item.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ItemFlags: u16 {
        const CAN_MOVE = 1 << 0;
        const CAN_RESIZE = 1 << 1;
        const CAN_ROTATE = 1 << 2;
        const CAN_FLIP = 1 << 3;
        const CAN_SELECT = 1 << 4;
        const CAN_DELETE = 1 << 5;
        const CAN_INSERT_POINTS = 1 << 6;
        const CAN_REMOVE_POINTS = 1 << 7;
        /// Placed by dragging from press to release rather than by a click.
        const PLACE_BY_MOUSE_PRESS_AND_RELEASE = 1 << 8;
        /// Resizing keeps point 0 at the local origin by moving the item.
        const ADJUST_POSITION_ON_RESIZE = 1 << 9;
    }
}

impl ItemFlags {
    /// Move, resize, rotate, flip and select.
    pub const DEFAULT: ItemFlags = ItemFlags::CAN_MOVE
        .union(ItemFlags::CAN_RESIZE)
        .union(ItemFlags::CAN_ROTATE)
        .union(ItemFlags::CAN_FLIP)
        .union(ItemFlags::CAN_SELECT);
}

impl Default for ItemFlags {
    fn default() -> Self {
        ItemFlags::DEFAULT
    }
}

/// Quarter-turn and mirror operations applied about a scene pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransformOp {
    /// Quarter turn; `(x, y)` maps to `(-y, x)`.
    Rotate,
    RotateBack,
    FlipHorizontal,
    FlipVertical,
}

impl TransformOp {
    pub fn inverse(self) -> Self {
        match self {
            TransformOp::Rotate => TransformOp::RotateBack,
            TransformOp::RotateBack => TransformOp::Rotate,
            flip => flip,
        }
    }

    /// Capability an item needs for this operation.
    pub fn required_flag(self) -> ItemFlags {
        match self {
            TransformOp::Rotate | TransformOp::RotateBack => ItemFlags::CAN_ROTATE,
            TransformOp::FlipHorizontal | TransformOp::FlipVertical => ItemFlags::CAN_FLIP,
        }
    }

    fn matrix(self) -> Affine {
        match self {
            TransformOp::Rotate => Affine::new([0.0, 1.0, -1.0, 0.0, 0.0, 0.0]),
            TransformOp::RotateBack => Affine::new([0.0, -1.0, 1.0, 0.0, 0.0, 0.0]),
            TransformOp::FlipHorizontal => Affine::new([-1.0, 0.0, 0.0, 1.0, 0.0, 0.0]),
            TransformOp::FlipVertical => Affine::new([1.0, 0.0, 0.0, -1.0, 0.0, 0.0]),
        }
    }
}

/// Concrete item kinds.
#[derive(Debug, Clone)]
pub enum ItemKind {
    Line,
    Arc,
    Curve,
    Rect,
    Ellipse,
    Polyline,
    Polygon,
    Path(Box<PathItem>),
    Text,
    TextRect,
    TextEllipse,
    TextPolygon,
    Group(Box<GroupItem>),
}

impl ItemKind {
    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::Line => "line",
            ItemKind::Arc => "arc",
            ItemKind::Curve => "curve",
            ItemKind::Rect => "rect",
            ItemKind::Ellipse => "ellipse",
            ItemKind::Polyline => "polyline",
            ItemKind::Polygon => "polygon",
            ItemKind::Path(_) => "path",
            ItemKind::Text => "text",
            ItemKind::TextRect => "text-rect",
            ItemKind::TextEllipse => "text-ellipse",
            ItemKind::TextPolygon => "text-polygon",
            ItemKind::Group(_) => "group",
        }
    }
}

/// A graphical element in a scene.
///
/// Points are stored in the item's local frame. A local point `p` sits at
/// `transform * p + position` in the scene.
#[derive(Debug, Clone)]
pub struct Item {
    id: ItemId,
    position: Point,
    transform: Affine,
    inverse: Affine,
    flags: ItemFlags,
    points: Vec<ItemPoint>,
    style: Style,
    visible: bool,
    selected: bool,
    kind: ItemKind,
}

impl Item {
    fn from_parts(kind: ItemKind, flags: ItemFlags, points: Vec<ItemPoint>, style: Style) -> Self {
        Self {
            id: Uuid::new_v4(),
            position: Point::ZERO,
            transform: Affine::IDENTITY,
            inverse: Affine::IDENTITY,
            flags,
            points,
            style,
            visible: true,
            selected: false,
            kind,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    pub fn as_group(&self) -> Option<&GroupItem> {
        match &self.kind {
            ItemKind::Group(group) => Some(group),
            _ => None,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, ItemKind::Group(_))
    }

    pub fn flags(&self) -> ItemFlags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: ItemFlags) {
        self.flags = flags;
    }

    pub fn has_flags(&self, flags: ItemFlags) -> bool {
        self.flags.contains(flags)
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Replace the linear transform. Singular transforms are refused.
    pub fn set_transform(&mut self, transform: Affine) -> bool {
        if transform.determinant().abs() < f64::EPSILON {
            return false;
        }
        self.transform = transform;
        self.inverse = transform.inverse();
        true
    }

    /// Local-to-scene transform including the position.
    pub fn scene_transform(&self) -> Affine {
        Affine::translate(self.position.to_vec2()) * self.transform
    }

    pub fn map_to_scene(&self, local: Point) -> Point {
        self.transform * local + self.position.to_vec2()
    }

    pub fn map_from_scene(&self, scene: Point) -> Point {
        self.inverse * (scene - self.position.to_vec2())
    }

    /// Bounding box in the scene of a local rectangle.
    pub fn map_rect_to_scene(&self, rect: Rect) -> Rect {
        self.scene_transform().transform_rect_bbox(rect)
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if !visible {
            self.selected = false;
        }
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected && self.visible;
    }

    pub fn points(&self) -> &[ItemPoint] {
        &self.points
    }

    pub fn point(&self, index: usize) -> Option<&ItemPoint> {
        self.points.get(index)
    }

    pub fn point_index(&self, id: PointId) -> Option<usize> {
        self.points.iter().position(|p| p.id() == id)
    }

    pub fn point_by_id(&self, id: PointId) -> Option<&ItemPoint> {
        self.points.iter().find(|p| p.id() == id)
    }

    /// Scene address of the point at `index`.
    pub fn point_ref(&self, index: usize) -> Option<PointRef> {
        self.points.get(index).map(|p| PointRef::new(self.id, p.id()))
    }

    pub fn point_scene_position(&self, index: usize) -> Option<Point> {
        self.points.get(index).map(|p| self.map_to_scene(p.position()))
    }

    /// Change the capability flags of the point at `index`.
    pub fn set_point_flags(&mut self, index: usize, flags: PointFlags) -> bool {
        match self.points.get_mut(index) {
            Some(point) => {
                point.set_flags(flags);
                true
            }
            None => false,
        }
    }

    pub(crate) fn insert_point(&mut self, index: usize, point: ItemPoint) {
        let index = index.min(self.points.len());
        self.points.insert(index, point);
    }

    pub(crate) fn remove_point(&mut self, index: usize) -> Option<ItemPoint> {
        (index < self.points.len()).then(|| self.points.remove(index))
    }

    /// Stroke width from the style (zero when unset).
    pub fn pen_width(&self) -> f64 {
        if self.style.get(StyleKey::PenStyle, PenStyle::Solid) == PenStyle::NoPen {
            return 0.0;
        }
        self.style.get(StyleKey::PenWidth, 0.0)
    }

    /// Whether the style paints the interior.
    fn fills(&self) -> bool {
        self.style.get(StyleKey::BrushStyle, BrushStyle::Solid) != BrushStyle::NoBrush
            && self.style.get(StyleKey::BrushColor, StyleColor::WHITE).a > 0
            && self.style.get(StyleKey::BrushOpacity, 1.0) > 0.0
    }

    /// Local bounding rectangle of the item's geometry (stroke width excluded).
    pub fn bounding_rect(&self) -> Rect {
        match &self.kind {
            ItemKind::Line => line::bounding_rect(&self.points),
            ItemKind::Arc => arc::bounding_rect(&self.points),
            ItemKind::Curve => curve::bounding_rect(&self.points),
            ItemKind::Rect => rect::bounding_rect(&self.points),
            ItemKind::Ellipse => ellipse::bounding_rect(&self.points),
            ItemKind::Polyline | ItemKind::Polygon => geometry::bounding_rect_of(
                &self.points.iter().map(ItemPoint::position).collect::<Vec<_>>(),
            ),
            ItemKind::Path(_) => path::bounding_rect(&self.points),
            ItemKind::Text => text::bounding_rect(&self.points, &self.style),
            ItemKind::TextRect | ItemKind::TextEllipse | ItemKind::TextPolygon => {
                text_shape::bounding_rect(&self.kind, &self.points, &self.style)
            }
            ItemKind::Group(group) => group.bounding_rect(),
        }
    }

    pub fn scene_bounding_rect(&self) -> Rect {
        self.map_rect_to_scene(self.bounding_rect())
    }

    /// Local center used as the rotation reference for selections.
    pub fn center_pos(&self) -> Point {
        match self.kind {
            ItemKind::Text => Point::ZERO,
            _ => self.bounding_rect().center(),
        }
    }

    pub fn scene_center(&self) -> Point {
        self.map_to_scene(self.center_pos())
    }

    /// Whether the geometry is non-degenerate.
    pub fn is_valid(&self) -> bool {
        match &self.kind {
            ItemKind::Line => line::is_valid(&self.points),
            ItemKind::Arc => arc::is_valid(&self.points),
            ItemKind::Curve => curve::is_valid(&self.points),
            ItemKind::Rect | ItemKind::Ellipse => rect::is_valid(&self.points),
            ItemKind::Polyline => polyline::is_valid(&self.points),
            ItemKind::Polygon => polygon::is_valid(&self.points),
            ItemKind::Path(data) => path::is_valid(&self.points, data),
            ItemKind::Text => text::is_valid(&self.style),
            ItemKind::TextRect | ItemKind::TextEllipse | ItemKind::TextPolygon => {
                text_shape::is_valid(&self.kind, &self.points)
            }
            ItemKind::Group(group) => !group.items().is_empty(),
        }
    }

    /// Flattened outlines in the local frame.
    pub fn outlines(&self) -> Vec<Outline> {
        match &self.kind {
            ItemKind::Line => line::outlines(&self.points, &self.style),
            ItemKind::Arc => arc::outlines(&self.points, &self.style),
            ItemKind::Curve => curve::outlines(&self.points, &self.style),
            ItemKind::Rect => vec![Outline::from_rect(self.bounding_rect(), self.fills())],
            ItemKind::Ellipse => vec![ellipse::outline(self.bounding_rect(), self.fills())],
            ItemKind::Polyline => polyline::outlines(&self.points, &self.style),
            ItemKind::Polygon => vec![Outline::closed(
                self.points.iter().map(ItemPoint::position).collect(),
                self.fills(),
            )],
            ItemKind::Path(_) => vec![path::outline(&self.points)],
            ItemKind::Text => vec![Outline::from_rect(self.bounding_rect(), true)],
            ItemKind::TextRect | ItemKind::TextEllipse | ItemKind::TextPolygon => {
                text_shape::outlines(&self.kind, &self.points, &self.style, self.fills())
            }
            ItemKind::Group(group) => group.outlines(),
        }
    }

    /// Outlines mapped to scene coordinates.
    pub fn scene_outlines(&self) -> Vec<Outline> {
        let transform = self.scene_transform();
        self.outlines()
            .iter()
            .map(|outline| outline.transformed(transform))
            .collect()
    }

    /// Local outline as a path.
    pub fn shape(&self) -> BezPath {
        let mut path = BezPath::new();
        for outline in self.outlines() {
            let mut points = outline.points.iter();
            let Some(first) = points.next() else {
                continue;
            };
            path.move_to(*first);
            for point in points {
                path.line_to(*point);
            }
            if outline.closed {
                path.close_path();
            }
        }
        path
    }

    /// Hit test at a scene position. `tolerance` is in scene units and is
    /// added to half the stroke width.
    pub fn contains(&self, scene_pos: Point, tolerance: f64) -> bool {
        let local = self.map_from_scene(scene_pos);
        let reach = self.pen_width() / 2.0 + tolerance;
        self.outlines().iter().any(|outline| {
            outline.distance_to(local) <= reach
                || (outline.filled && outline.closed && polygon_contains(&outline.points, local))
        })
    }

    /// Whether the shape touches a closed scene polygon.
    pub fn intersects_scene_polygon(&self, region: &[Point]) -> bool {
        self.scene_outlines()
            .iter()
            .any(|outline| geometry::outline_intersects_polygon(outline, region))
    }

    /// Index of the first point whose scene position is within `tolerance`
    /// (per axis) of `scene_pos`.
    pub fn point_at(&self, scene_pos: Point, tolerance: f64) -> Option<usize> {
        self.points.iter().position(|p| {
            let s = self.map_to_scene(p.position());
            (s.x - scene_pos.x).abs() <= tolerance && (s.y - scene_pos.y).abs() <= tolerance
        })
    }

    /// Index of the point nearest to `scene_pos`.
    pub fn nearest_point(&self, scene_pos: Point) -> Option<usize> {
        let local = self.map_from_scene(scene_pos);
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (i, (p.position() - local).hypot2()))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    /// Draw in the local frame. The caller installs the scene transform.
    pub fn render(&self, painter: &mut dyn Painter) {
        if !self.is_valid() {
            return;
        }
        painter.save();
        match &self.kind {
            ItemKind::Line => line::render(&self.points, &self.style, painter),
            ItemKind::Arc => arc::render(&self.points, &self.style, painter),
            ItemKind::Curve => curve::render(&self.points, &self.style, painter, self.selected),
            ItemKind::Rect => rect::render(self.bounding_rect(), &self.style, painter),
            ItemKind::Ellipse => ellipse::render(self.bounding_rect(), &self.style, painter),
            ItemKind::Polyline => polyline::render(&self.points, &self.style, painter),
            ItemKind::Polygon => polygon::render(&self.points, &self.style, painter),
            ItemKind::Path(data) => path::render(&self.points, data, &self.style, painter),
            ItemKind::Text => text::render(self.bounding_rect(), &self.style, painter),
            ItemKind::TextRect | ItemKind::TextEllipse | ItemKind::TextPolygon => {
                text_shape::render(&self.kind, &self.points, &self.style, painter)
            }
            ItemKind::Group(group) => group.render(painter),
        }
        painter.restore();
    }

    /// Deep copy with fresh item and point ids. The copy is unselected.
    pub fn copy(&self) -> Item {
        let kind = match &self.kind {
            ItemKind::Group(group) => ItemKind::Group(Box::new(group.copy())),
            other => other.clone(),
        };
        Item {
            id: Uuid::new_v4(),
            position: self.position,
            transform: self.transform,
            inverse: self.inverse,
            flags: self.flags,
            points: self.points.iter().map(ItemPoint::copy).collect(),
            style: self.style.clone(),
            visible: self.visible,
            selected: false,
            kind,
        }
    }

    /// Move the point at `index` to `scene_pos` and let the kind update
    /// dependent points.
    pub fn resize(&mut self, index: usize, scene_pos: Point) {
        if index >= self.points.len() {
            return;
        }
        let local = self.map_from_scene(scene_pos);
        match &self.kind {
            ItemKind::Line => line::resize(&mut self.points, index, local),
            ItemKind::Curve => curve::resize(&mut self.points, index, local),
            ItemKind::Rect | ItemKind::Ellipse | ItemKind::TextRect | ItemKind::TextEllipse => {
                rect::resize(&mut self.points, index, local)
            }
            ItemKind::Path(data) => path::resize(&mut self.points, data, index, local),
            _ => self.points[index].set_position(local),
        }
        if self.flags.contains(ItemFlags::ADJUST_POSITION_ON_RESIZE) {
            self.adjust_position();
        }
    }

    /// Shift the origin onto point 0 without moving anything in the scene.
    fn adjust_position(&mut self) {
        let Some(anchor) = self.points.first().map(ItemPoint::position) else {
            return;
        };
        if anchor == Point::ZERO {
            return;
        }
        let new_position = self.map_to_scene(anchor);
        for point in &mut self.points {
            point.set_position(point.position() - anchor.to_vec2());
        }
        self.position = new_position;
    }

    /// Rotate or mirror about a scene pivot.
    pub fn apply_transform(&mut self, op: TransformOp, pivot: Point) {
        let matrix = op.matrix();
        let offset = (matrix * (self.position - pivot).to_point()).to_vec2();
        self.position = pivot + offset;
        self.transform = matrix * self.transform;
        self.inverse = self.transform.inverse();
    }

    pub fn rotate(&mut self, pivot: Point) {
        self.apply_transform(TransformOp::Rotate, pivot);
    }

    pub fn rotate_back(&mut self, pivot: Point) {
        self.apply_transform(TransformOp::RotateBack, pivot);
    }

    pub fn flip_horizontal(&mut self, pivot: Point) {
        self.apply_transform(TransformOp::FlipHorizontal, pivot);
    }

    pub fn flip_vertical(&mut self, pivot: Point) {
        self.apply_transform(TransformOp::FlipVertical, pivot);
    }

    /// Point to add at a (grid-snapped) scene position, with its index.
    pub fn point_to_insert(&self, scene_pos: Point) -> Option<(usize, ItemPoint)> {
        if !self.flags.contains(ItemFlags::CAN_INSERT_POINTS) {
            return None;
        }
        let local = self.map_from_scene(scene_pos);
        match &self.kind {
            ItemKind::Polyline => polyline::point_to_insert(&self.points, local),
            ItemKind::Polygon | ItemKind::TextPolygon => {
                polygon::point_to_insert(&self.points, local)
            }
            _ => None,
        }
    }

    /// Index of the point to drop for a removal near `scene_pos`.
    pub fn point_to_remove(&self, scene_pos: Point) -> Option<usize> {
        if !self.flags.contains(ItemFlags::CAN_REMOVE_POINTS) {
            return None;
        }
        let local = self.map_from_scene(scene_pos);
        match &self.kind {
            ItemKind::Polyline => polyline::point_to_remove(&self.points, local),
            ItemKind::Polygon | ItemKind::TextPolygon => polygon::point_to_remove(&self.points, local),
            _ => None,
        }
    }

    /// Point dragged while the item is drawn in place mode.
    pub fn creation_point_index(&self) -> Option<usize> {
        if !self.flags.contains(ItemFlags::PLACE_BY_MOUSE_PRESS_AND_RELEASE) {
            return None;
        }
        match &self.kind {
            ItemKind::Line => Some(line::END),
            ItemKind::Arc => Some(arc::END),
            ItemKind::Curve => Some(curve::END),
            ItemKind::Rect | ItemKind::Ellipse => Some(rect::BOTTOM_RIGHT),
            ItemKind::Polyline => self.points.len().checked_sub(1),
            _ => None,
        }
    }

    /// Collapse every point onto the origin so a drag can draw the item.
    pub fn reset_for_placement(&mut self) {
        if self.flags.contains(ItemFlags::PLACE_BY_MOUSE_PRESS_AND_RELEASE) {
            for point in &mut self.points {
                point.set_position(Point::ZERO);
            }
        }
    }

    /// Place-mode drag: move the creation point to `scene_pos`.
    pub fn place_drag(&mut self, scene_pos: Point) {
        let Some(index) = self.creation_point_index() else {
            return;
        };
        if matches!(self.kind, ItemKind::Curve) {
            let local = self.map_from_scene(scene_pos);
            curve::place_end(&mut self.points, local);
            if self.flags.contains(ItemFlags::ADJUST_POSITION_ON_RESIZE) {
                self.adjust_position();
            }
        } else {
            self.resize(index, scene_pos);
        }
    }

    /// Key input forwarded while the item has focus. Returns whether it was consumed.
    pub fn key_event(&mut self, event: &KeyEvent) -> bool {
        log::trace!("{} item ignores key {:?}", self.kind.name(), event.key);
        false
    }
}

/// Deep-copy `items`, keeping peer edges whose endpoints both lie within the set.
pub fn copy_items(items: &[&Item], connections: &Connections) -> (Vec<Item>, Connections) {
    let copies: Vec<Item> = items.iter().map(|item| item.copy()).collect();
    let mut links = Connections::new();
    let locate = |point: PointRef| -> Option<PointRef> {
        let index = items.iter().position(|item| item.id() == point.item)?;
        let point_index = items[index].point_index(point.point)?;
        copies[index].point_ref(point_index)
    };
    for (a, b) in connections.edges() {
        if let (Some(a), Some(b)) = (locate(a), locate(b)) {
            links.connect(a, b);
        }
    }
    (copies, links)
}

/// Painter that records what each draw call was, for render tests.
#[cfg(test)]
pub(crate) mod recording {
    use crate::painter::{Brush, Font, Painter, Pen, TextAlignment};
    use kurbo::{Affine, BezPath, Ellipse, Line, Point, Rect};

    #[derive(Debug, Default)]
    pub(crate) struct Recording {
        pub calls: Vec<&'static str>,
        pub paths: Vec<BezPath>,
        pub texts: Vec<(Rect, String)>,
        pen: Pen,
        brush: Brush,
    }

    impl Painter for Recording {
        fn save(&mut self) {}
        fn restore(&mut self) {}
        fn concat_transform(&mut self, _transform: Affine) {}
        fn set_pen(&mut self, pen: Pen) {
            self.pen = pen;
        }
        fn set_brush(&mut self, brush: Brush) {
            self.brush = brush;
        }
        fn pen(&self) -> Pen {
            self.pen
        }
        fn brush(&self) -> Brush {
            self.brush
        }
        fn draw_line(&mut self, _line: Line) {
            self.calls.push("line");
        }
        fn draw_rect(&mut self, _rect: Rect) {
            self.calls.push("rect");
        }
        fn draw_rounded_rect(&mut self, _rect: Rect, _radius: f64) {
            self.calls.push("rounded-rect");
        }
        fn draw_ellipse(&mut self, _ellipse: Ellipse) {
            self.calls.push("ellipse");
        }
        fn draw_path(&mut self, path: &BezPath) {
            self.calls.push("path");
            self.paths.push(path.clone());
        }
        fn draw_polygon(&mut self, _points: &[Point]) {
            self.calls.push("polygon");
        }
        fn draw_polyline(&mut self, _points: &[Point]) {
            self.calls.push("polyline");
        }
        fn draw_text(&mut self, rect: Rect, _alignment: TextAlignment, _font: &Font, text: &str) {
            self.calls.push("text");
            self.texts.push((rect, text.to_string()));
        }
    }
}
