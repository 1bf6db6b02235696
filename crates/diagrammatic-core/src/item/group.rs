//! Item holding copies of other items.

use super::geometry::Outline;
use super::{Item, ItemFlags, ItemKind, copy_items};
use crate::connections::Connections;
use crate::painter::Painter;
use crate::style::Style;
use kurbo::{Point, Rect};

/// Children of a group, positioned in the group's local frame, together
/// with the peer edges among them.
#[derive(Debug, Clone, Default)]
pub struct GroupItem {
    items: Vec<Item>,
    links: Connections,
}

impl GroupItem {
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Peer edges between children.
    pub fn links(&self) -> &Connections {
        &self.links
    }

    pub(super) fn bounding_rect(&self) -> Rect {
        self.items
            .iter()
            .map(Item::scene_bounding_rect)
            .reduce(|a, b| a.union(b))
            .unwrap_or(Rect::ZERO)
    }

    pub(super) fn outlines(&self) -> Vec<Outline> {
        self.items.iter().flat_map(Item::scene_outlines).collect()
    }

    pub(super) fn render(&self, painter: &mut dyn Painter) {
        for item in &self.items {
            painter.save();
            painter.concat_transform(item.scene_transform());
            item.render(painter);
            painter.restore();
        }
    }

    pub(super) fn copy(&self) -> GroupItem {
        let refs: Vec<&Item> = self.items.iter().collect();
        let (items, links) = copy_items(&refs, &self.links);
        GroupItem { items, links }
    }
}

impl Item {
    /// Group over scene items. The group sits at the first child's position
    /// and children are re-expressed relative to it.
    pub fn new_group(items: Vec<Item>, links: Connections) -> Item {
        let origin = items.first().map(Item::position).unwrap_or(Point::ZERO);
        let items = items
            .into_iter()
            .map(|mut item| {
                item.position = (item.position - origin).to_point();
                item.selected = false;
                item
            })
            .collect();
        let flags = ItemFlags::CAN_MOVE
            | ItemFlags::CAN_ROTATE
            | ItemFlags::CAN_FLIP
            | ItemFlags::CAN_SELECT
            | ItemFlags::CAN_DELETE;
        let group = GroupItem { items, links };
        let mut item = Item::from_parts(
            ItemKind::Group(Box::new(group)),
            flags,
            Vec::new(),
            Style::new(),
        );
        item.position = origin;
        item
    }

    /// Copies of the children mapped back into the scene, with their links.
    ///
    /// Each child takes the group's position and transform on top of its own.
    pub fn ungrouped_items(&self) -> Option<(Vec<Item>, Connections)> {
        let group = self.as_group()?;
        let copy = group.copy();
        let items = copy
            .items
            .into_iter()
            .map(|mut child| {
                child.position = self.map_to_scene(child.position);
                child.transform = self.transform * child.transform;
                child.inverse = child.transform.inverse();
                child
            })
            .collect();
        Some((items, copy.links))
    }
}
