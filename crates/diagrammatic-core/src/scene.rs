//! Ordered item container.

use crate::config::{DEFAULT_SCENE_RECT, ItemSelectionMode};
use crate::connections::{Connections, PointRef};
use crate::item::{Item, ItemId, rect_contains_rect, rects_intersect};
use crate::point::ItemPoint;
use crate::style::StyleColor;
use kurbo::{Point, Rect};
use std::collections::HashMap;

/// Items in paint order (back to front) plus the peer relation between
/// their points.
#[derive(Debug, Clone)]
pub struct Scene {
    /// All items, keyed by ID.
    items: HashMap<ItemId, Item>,
    /// Paint and hit order (back to front).
    z_order: Vec<ItemId>,
    connections: Connections,
    scene_rect: Rect,
    background: StyleColor,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self::with_rect(DEFAULT_SCENE_RECT)
    }

    pub fn with_rect(scene_rect: Rect) -> Self {
        Self {
            items: HashMap::new(),
            z_order: Vec::new(),
            connections: Connections::new(),
            scene_rect,
            background: StyleColor::WHITE,
        }
    }

    /// Append an item on top. Returns `false` if an item with the same id is present.
    pub fn add_item(&mut self, item: Item) -> bool {
        let index = self.z_order.len();
        self.insert_item(index, item)
    }

    /// Insert an item at a paint index (clamped). No-op for duplicate ids.
    pub fn insert_item(&mut self, index: usize, item: Item) -> bool {
        let id = item.id();
        if self.items.contains_key(&id) {
            return false;
        }
        let index = index.min(self.z_order.len());
        self.z_order.insert(index, id);
        self.items.insert(id, item);
        true
    }

    /// Take an item out of the scene with its former index.
    ///
    /// Peer edges are left alone; commands that remove items disconnect
    /// them explicitly so that undo can restore them.
    pub fn remove_item(&mut self, id: ItemId) -> Option<(usize, Item)> {
        let index = self.index_of(id)?;
        self.z_order.remove(index);
        self.items.remove(&id).map(|item| (index, item))
    }

    /// Remove every item and every peer edge.
    pub fn clear_items(&mut self) -> Vec<Item> {
        self.connections.clear();
        let order = std::mem::take(&mut self.z_order);
        order
            .into_iter()
            .filter_map(|id| self.items.remove(&id))
            .collect()
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.get_mut(&id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.z_order.iter().position(|&item_id| item_id == id)
    }

    /// Item ids back to front.
    pub fn item_ids(&self) -> &[ItemId] {
        &self.z_order
    }

    /// Items back to front.
    pub fn items(&self) -> impl DoubleEndedIterator<Item = &Item> {
        self.z_order.iter().filter_map(|id| self.items.get(id))
    }

    pub fn len(&self) -> usize {
        self.z_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.z_order.is_empty()
    }

    /// Replace the paint order. `order` must be a permutation of the current ids.
    pub fn set_item_order(&mut self, order: Vec<ItemId>) -> bool {
        if order.len() != self.z_order.len() || !order.iter().all(|id| self.items.contains_key(id))
        {
            return false;
        }
        self.z_order = order;
        true
    }

    pub fn connections(&self) -> &Connections {
        &self.connections
    }

    pub fn connections_mut(&mut self) -> &mut Connections {
        &mut self.connections
    }

    pub fn scene_rect(&self) -> Rect {
        self.scene_rect
    }

    pub fn set_scene_rect(&mut self, rect: Rect) {
        self.scene_rect = rect;
    }

    pub fn background(&self) -> StyleColor {
        self.background
    }

    pub fn set_background(&mut self, color: StyleColor) {
        self.background = color;
    }

    /// Point addressed by `point`, if its item is in the scene.
    pub fn point(&self, point: PointRef) -> Option<&ItemPoint> {
        self.items.get(&point.item)?.point_by_id(point.point)
    }

    pub fn point_scene_position(&self, point: PointRef) -> Option<Point> {
        let item = self.items.get(&point.item)?;
        let local = item.point_by_id(point.point)?.position();
        Some(item.map_to_scene(local))
    }

    /// Topmost visible item whose shape contains `scene_pos`.
    pub fn item_at(&self, scene_pos: Point, tolerance: f64) -> Option<ItemId> {
        self.items()
            .rev()
            .find(|item| item.is_visible() && item.contains(scene_pos, tolerance))
            .map(Item::id)
    }

    /// Visible items matching a rectangle under a selection mode, back to front.
    pub fn items_in_rect(&self, rect: Rect, mode: ItemSelectionMode) -> Vec<ItemId> {
        let rect = rect.abs();
        let region = rect_polygon(rect);
        self.items()
            .filter(|item| item.is_visible())
            .filter(|item| match mode {
                ItemSelectionMode::ContainsBoundingRect => {
                    rect_contains_rect(rect, item.scene_bounding_rect())
                }
                ItemSelectionMode::IntersectsBoundingRect => {
                    rects_intersect(rect, item.scene_bounding_rect())
                }
                ItemSelectionMode::ContainsShape => item
                    .scene_outlines()
                    .iter()
                    .all(|outline| outline.points.iter().all(|p| rect.contains(*p))),
                ItemSelectionMode::IntersectsShape => item.intersects_scene_polygon(&region),
            })
            .map(Item::id)
            .collect()
    }

    /// Visible items matching a closed scene polygon under a selection mode.
    pub fn items_in_polygon(&self, polygon: &[Point], mode: ItemSelectionMode) -> Vec<ItemId> {
        let inside = |p: Point| crate::item::polygon_contains(polygon, p);
        self.items()
            .filter(|item| item.is_visible())
            .filter(|item| match mode {
                ItemSelectionMode::ContainsBoundingRect => {
                    rect_polygon(item.scene_bounding_rect())
                        .into_iter()
                        .all(|p| inside(p))
                }
                ItemSelectionMode::IntersectsBoundingRect => {
                    let bounds = rect_polygon(item.scene_bounding_rect());
                    bounds.iter().any(|p| inside(*p))
                        || polygon
                            .iter()
                            .any(|p| crate::item::polygon_contains(&bounds, *p))
                }
                ItemSelectionMode::ContainsShape => item
                    .scene_outlines()
                    .iter()
                    .all(|outline| outline.points.iter().all(|p| inside(*p))),
                ItemSelectionMode::IntersectsShape => item.intersects_scene_polygon(polygon),
            })
            .map(Item::id)
            .collect()
    }

    /// Union of the scene bounding rects of all items.
    pub fn items_bounding_rect(&self) -> Option<Rect> {
        self.items()
            .map(Item::scene_bounding_rect)
            .reduce(|a, b| a.union(b))
    }

    /// Peer relation is symmetric, every endpoint exists and is a connection point.
    pub fn is_consistent(&self) -> bool {
        self.connections.is_symmetric()
            && self.connections.edges().iter().all(|(a, b)| {
                [a, b]
                    .iter()
                    .all(|p| self.point(**p).is_some_and(ItemPoint::is_connection))
            })
    }
}

fn rect_polygon(rect: Rect) -> [Point; 4] {
    [
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x1, rect.y1),
        Point::new(rect.x0, rect.y1),
    ]
}
