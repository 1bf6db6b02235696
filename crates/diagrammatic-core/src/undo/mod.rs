//! Undoable commands.
//!
//! A command owns one [`Action`] plus an ordered list of child commands.
//! Redo runs the action and then the children; undo runs the children in
//! reverse and then reverts the action. Items and points a command takes
//! out of the scene are held by the command until it is undone, redone or
//! released.

mod stack;

pub use stack::UndoStack;

use crate::connections::{Connections, PointRef};
use crate::item::{Item, ItemId, TransformOp};
use crate::point::{ItemPoint, PointId};
use crate::scene::Scene;
use crate::signals::EditorEvent;
use kurbo::Point;

/// Default capacity of an [`UndoStack`].
pub const DEFAULT_UNDO_LIMIT: usize = 64;

/// Type id of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    AddItems,
    RemoveItems,
    MoveItems,
    ResizeItem,
    Rotate,
    RotateBack,
    FlipH,
    FlipV,
    Reorder,
    Select,
    SetVisibility,
    InsertItemPoint,
    RemoveItemPoint,
    PointConnect,
    PointDisconnect,
    Compound,
}

impl CommandKind {
    /// Default user-visible title.
    pub fn title(self) -> &'static str {
        match self {
            CommandKind::AddItems => "Add Items",
            CommandKind::RemoveItems => "Remove Items",
            CommandKind::MoveItems => "Move Items",
            CommandKind::ResizeItem => "Resize Item",
            CommandKind::Rotate => "Rotate Items",
            CommandKind::RotateBack => "Rotate Back Items",
            CommandKind::FlipH => "Flip Items Horizontal",
            CommandKind::FlipV => "Flip Items Vertical",
            CommandKind::Reorder => "Reorder Items",
            CommandKind::Select => "Select Items",
            CommandKind::SetVisibility => "Set Items Visibility",
            CommandKind::InsertItemPoint => "Insert Point",
            CommandKind::RemoveItemPoint => "Remove Point",
            CommandKind::PointConnect => "Connect Points",
            CommandKind::PointDisconnect => "Disconnect Points",
            CommandKind::Compound => "",
        }
    }

    fn of_transform(op: TransformOp) -> Self {
        match op {
            TransformOp::Rotate => CommandKind::Rotate,
            TransformOp::RotateBack => CommandKind::RotateBack,
            TransformOp::FlipHorizontal => CommandKind::FlipH,
            TransformOp::FlipVertical => CommandKind::FlipV,
        }
    }
}

/// Mutable state a command runs against.
pub struct CommandContext<'a> {
    pub scene: &'a mut Scene,
    /// Selected item ids in selection order.
    pub selection: &'a mut Vec<ItemId>,
    pub events: &'a mut Vec<EditorEvent>,
}

impl CommandContext<'_> {
    pub(crate) fn set_selection(&mut self, ids: &[ItemId]) {
        for id in self.selection.iter() {
            if let Some(item) = self.scene.item_mut(*id) {
                item.set_selected(false);
            }
        }
        self.selection.clear();
        for id in ids {
            match self.scene.item_mut(*id) {
                Some(item) if item.is_visible() => {
                    item.set_selected(true);
                    if !self.selection.contains(id) {
                        self.selection.push(*id);
                    }
                }
                Some(_) => {}
                None => log::warn!("select: item {id} is not in the scene"),
            }
        }
        self.events
            .push(EditorEvent::SelectionChanged(self.selection.clone()));
    }

    fn drop_from_selection(&mut self, ids: &[ItemId]) {
        let before = self.selection.len();
        self.selection.retain(|id| !ids.contains(id));
        if self.selection.len() != before {
            self.events
                .push(EditorEvent::SelectionChanged(self.selection.clone()));
        }
    }

    fn item_count_changed(&mut self) {
        self.events
            .push(EditorEvent::NumberOfItemsChanged(self.scene.len()));
    }
}

/// An item moving in or out of the scene.
///
/// `item` is `Some` while the command holds the item (it is not in the scene).
#[derive(Debug, Clone)]
pub struct ItemSlot {
    pub id: ItemId,
    /// Paint index to insert at; `None` appends.
    pub index: Option<usize>,
    pub item: Option<Item>,
}

/// State change performed by a command.
#[derive(Debug, Clone)]
pub enum Action {
    /// Pure container for child commands.
    None,
    AddItems {
        slots: Vec<ItemSlot>,
        /// Edges among the slot items, held while the items are out of the scene.
        edges: Vec<(PointRef, PointRef)>,
    },
    RemoveItems {
        slots: Vec<ItemSlot>,
        /// Edges among the slot items, held while the items are out of the scene.
        edges: Vec<(PointRef, PointRef)>,
    },
    MoveItems {
        items: Vec<ItemId>,
        before: Vec<Point>,
        after: Vec<Point>,
        final_move: bool,
    },
    ResizeItem {
        point: PointRef,
        /// Scene positions of the point.
        before: Point,
        after: Point,
        final_resize: bool,
    },
    TransformItems {
        items: Vec<ItemId>,
        pivot: Point,
        op: TransformOp,
    },
    Reorder {
        before: Vec<ItemId>,
        after: Vec<ItemId>,
    },
    Select {
        before: Vec<ItemId>,
        after: Vec<ItemId>,
        final_select: bool,
    },
    SetVisibility {
        items: Vec<ItemId>,
        before: Vec<bool>,
        after: Vec<bool>,
    },
    InsertItemPoint {
        item: ItemId,
        index: usize,
        id: PointId,
        /// Held while the point is not installed.
        point: Option<ItemPoint>,
    },
    RemoveItemPoint {
        item: ItemId,
        index: usize,
        id: PointId,
        /// Held while the point is removed.
        point: Option<ItemPoint>,
    },
    Connect {
        a: PointRef,
        b: PointRef,
    },
    Disconnect {
        a: PointRef,
        b: PointRef,
    },
}

/// A node in a compound undo command.
#[derive(Debug, Clone)]
pub struct UndoCommand {
    kind: CommandKind,
    title: String,
    action: Action,
    children: Vec<UndoCommand>,
}

impl UndoCommand {
    fn new(kind: CommandKind, action: Action) -> Self {
        Self {
            kind,
            title: kind.title().to_string(),
            action,
            children: Vec::new(),
        }
    }

    /// Container with a custom title, e.g. "Delete Items".
    pub fn compound(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::new(CommandKind::Compound, Action::None)
        }
    }

    /// Insert `items` at `index` (appending when `None`), in order.
    pub fn add_items(items: Vec<Item>, index: Option<usize>) -> Self {
        let slots = items
            .into_iter()
            .enumerate()
            .map(|(offset, item)| ItemSlot {
                id: item.id(),
                index: index.map(|i| i + offset),
                item: Some(item),
            })
            .collect();
        Self::new(
            CommandKind::AddItems,
            Action::AddItems {
                slots,
                edges: Vec::new(),
            },
        )
    }

    pub fn remove_items(ids: Vec<ItemId>) -> Self {
        let slots = ids
            .into_iter()
            .map(|id| ItemSlot {
                id,
                index: None,
                item: None,
            })
            .collect();
        Self::new(
            CommandKind::RemoveItems,
            Action::RemoveItems {
                slots,
                edges: Vec::new(),
            },
        )
    }

    pub fn move_items(items: Vec<ItemId>, before: Vec<Point>, after: Vec<Point>, final_move: bool) -> Self {
        Self::new(
            CommandKind::MoveItems,
            Action::MoveItems {
                items,
                before,
                after,
                final_move,
            },
        )
    }

    pub fn resize_item(point: PointRef, before: Point, after: Point, final_resize: bool) -> Self {
        Self::new(
            CommandKind::ResizeItem,
            Action::ResizeItem {
                point,
                before,
                after,
                final_resize,
            },
        )
    }

    pub fn transform_items(items: Vec<ItemId>, pivot: Point, op: TransformOp) -> Self {
        Self::new(
            CommandKind::of_transform(op),
            Action::TransformItems { items, pivot, op },
        )
    }

    pub fn reorder(before: Vec<ItemId>, after: Vec<ItemId>) -> Self {
        Self::new(CommandKind::Reorder, Action::Reorder { before, after })
    }

    pub fn select(before: Vec<ItemId>, after: Vec<ItemId>, final_select: bool) -> Self {
        Self::new(
            CommandKind::Select,
            Action::Select {
                before,
                after,
                final_select,
            },
        )
    }

    pub fn set_visibility(items: Vec<ItemId>, before: Vec<bool>, after: Vec<bool>) -> Self {
        Self::new(
            CommandKind::SetVisibility,
            Action::SetVisibility {
                items,
                before,
                after,
            },
        )
    }

    pub fn insert_point(item: ItemId, index: usize, point: ItemPoint) -> Self {
        Self::new(
            CommandKind::InsertItemPoint,
            Action::InsertItemPoint {
                item,
                index,
                id: point.id(),
                point: Some(point),
            },
        )
    }

    pub fn remove_point(item: ItemId, index: usize, id: PointId) -> Self {
        Self::new(
            CommandKind::RemoveItemPoint,
            Action::RemoveItemPoint {
                item,
                index,
                id,
                point: None,
            },
        )
    }

    pub fn connect(a: PointRef, b: PointRef) -> Self {
        Self::new(CommandKind::PointConnect, Action::Connect { a, b })
    }

    pub fn disconnect(a: PointRef, b: PointRef) -> Self {
        Self::new(CommandKind::PointDisconnect, Action::Disconnect { a, b })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    pub fn children(&self) -> &[UndoCommand] {
        &self.children
    }

    pub fn push_child(&mut self, child: UndoCommand) {
        self.children.push(child);
    }

    /// Kinds of this command and all descendants, depth first.
    pub fn kinds(&self) -> Vec<CommandKind> {
        let mut kinds = vec![self.kind];
        for child in &self.children {
            kinds.extend(child.kinds());
        }
        kinds
    }

    /// A gesture step that later steps of the same gesture may merge into.
    pub fn is_open(&self) -> bool {
        matches!(
            self.action,
            Action::MoveItems {
                final_move: false,
                ..
            } | Action::ResizeItem {
                final_resize: false,
                ..
            } | Action::Select {
                final_select: false,
                ..
            }
        )
    }

    pub fn redo(&mut self, ctx: &mut CommandContext<'_>) {
        self.redo_own(ctx);
        for child in &mut self.children {
            child.redo(ctx);
        }
    }

    pub fn undo(&mut self, ctx: &mut CommandContext<'_>) {
        for child in self.children.iter_mut().rev() {
            child.undo(ctx);
        }
        self.undo_own(ctx);
    }

    /// Apply only this command's action.
    pub(crate) fn redo_own(&mut self, ctx: &mut CommandContext<'_>) {
        match &mut self.action {
            Action::None => {}
            Action::AddItems { slots, edges } => {
                add_slots(ctx, slots, edges);
            }
            Action::RemoveItems { slots, edges } => {
                remove_slots(ctx, slots, edges);
            }
            Action::MoveItems { items, after, .. } => {
                set_positions(ctx, items, after);
            }
            Action::ResizeItem { point, after, .. } => {
                resize_point(ctx, *point, *after);
            }
            Action::TransformItems { items, pivot, op } => {
                transform_items(ctx, items, *pivot, *op);
            }
            Action::Reorder { after, .. } => {
                reorder(ctx.scene, after);
            }
            Action::Select { after, .. } => {
                let after = after.clone();
                ctx.set_selection(&after);
            }
            Action::SetVisibility { items, after, .. } => {
                set_visibility(ctx, items, after);
            }
            Action::InsertItemPoint {
                item, index, point, ..
            } => {
                install_point(ctx, *item, *index, point);
            }
            Action::RemoveItemPoint {
                item,
                index,
                id,
                point,
            } => {
                uninstall_point(ctx, *item, index, *id, point);
            }
            Action::Connect { a, b } => {
                ctx.scene.connections_mut().connect(*a, *b);
            }
            Action::Disconnect { a, b } => {
                ctx.scene.connections_mut().disconnect(*a, *b);
            }
        }
    }

    /// Revert only this command's action.
    pub(crate) fn undo_own(&mut self, ctx: &mut CommandContext<'_>) {
        match &mut self.action {
            Action::None => {}
            Action::AddItems { slots, edges } => {
                remove_slots(ctx, slots, edges);
            }
            Action::RemoveItems { slots, edges } => {
                add_slots(ctx, slots, edges);
            }
            Action::MoveItems { items, before, .. } => {
                set_positions(ctx, items, before);
            }
            Action::ResizeItem { point, before, .. } => {
                resize_point(ctx, *point, *before);
            }
            Action::TransformItems { items, pivot, op } => {
                transform_items(ctx, items, *pivot, op.inverse());
            }
            Action::Reorder { before, .. } => {
                reorder(ctx.scene, before);
            }
            Action::Select { before, .. } => {
                let before = before.clone();
                ctx.set_selection(&before);
            }
            Action::SetVisibility { items, before, .. } => {
                set_visibility(ctx, items, before);
            }
            Action::InsertItemPoint {
                item,
                index,
                id,
                point,
            } => {
                let mut at = *index;
                uninstall_point(ctx, *item, &mut at, *id, point);
            }
            Action::RemoveItemPoint {
                item, index, point, ..
            } => {
                install_point(ctx, *item, *index, point);
            }
            Action::Connect { a, b } => {
                ctx.scene.connections_mut().disconnect(*a, *b);
            }
            Action::Disconnect { a, b } => {
                ctx.scene.connections_mut().connect(*a, *b);
            }
        }
    }

    /// Fold a later command of the same gesture into this one.
    ///
    /// The merged command keeps this command's before-state and takes the
    /// incoming after-state and final flag. Incoming children merge into
    /// matching existing children or are appended. Returns the incoming
    /// command untouched when it cannot merge.
    pub fn merge(&mut self, incoming: UndoCommand) -> Result<(), UndoCommand> {
        let mergeable = match (&self.action, &incoming.action) {
            (
                Action::MoveItems {
                    items,
                    final_move: false,
                    ..
                },
                Action::MoveItems { items: other, .. },
            ) => items == other,
            (
                Action::ResizeItem {
                    point,
                    final_resize: false,
                    ..
                },
                Action::ResizeItem { point: other, .. },
            ) => point == other,
            (
                Action::Select {
                    final_select: false,
                    ..
                },
                Action::Select { .. },
            ) => true,
            (Action::Connect { a, b }, Action::Connect { a: c, b: d })
            | (Action::Disconnect { a, b }, Action::Disconnect { a: c, b: d }) => {
                (a == c && b == d) || (a == d && b == c)
            }
            _ => false,
        };
        if !mergeable {
            return Err(incoming);
        }

        let UndoCommand {
            action, children, ..
        } = incoming;
        match (&mut self.action, action) {
            (
                Action::MoveItems {
                    after, final_move, ..
                },
                Action::MoveItems {
                    after: new_after,
                    final_move: new_final,
                    ..
                },
            ) => {
                *after = new_after;
                *final_move = new_final;
            }
            (
                Action::ResizeItem {
                    after,
                    final_resize,
                    ..
                },
                Action::ResizeItem {
                    after: new_after,
                    final_resize: new_final,
                    ..
                },
            ) => {
                *after = new_after;
                *final_resize = new_final;
            }
            (
                Action::Select {
                    after,
                    final_select,
                    ..
                },
                Action::Select {
                    after: new_after,
                    final_select: new_final,
                    ..
                },
            ) => {
                *after = new_after;
                *final_select = new_final;
            }
            _ => {}
        }
        for child in children {
            self.merge_child(child);
        }
        Ok(())
    }

    fn merge_child(&mut self, child: UndoCommand) {
        let mut pending = child;
        for existing in &mut self.children {
            match existing.merge(pending) {
                Ok(()) => return,
                Err(rejected) => pending = rejected,
            }
        }
        self.children.push(pending);
    }

    /// Drop the command, purging peer edges that touch items or points it
    /// still holds.
    pub(crate) fn release(self, connections: &mut Connections) {
        match self.action {
            Action::AddItems { slots, .. } | Action::RemoveItems { slots, .. } => {
                for slot in slots.into_iter().filter(|s| s.item.is_some()) {
                    connections.clear_item(slot.id);
                }
            }
            Action::InsertItemPoint {
                item,
                id,
                point: Some(_),
                ..
            }
            | Action::RemoveItemPoint {
                item,
                id,
                point: Some(_),
                ..
            } => {
                connections.clear_point(PointRef::new(item, id));
            }
            _ => {}
        }
        for child in self.children {
            child.release(connections);
        }
    }
}

/// Insert held items in ascending paint index, appending those without
/// one, then restore the edges among them.
fn add_slots(
    ctx: &mut CommandContext<'_>,
    slots: &mut [ItemSlot],
    edges: &mut Vec<(PointRef, PointRef)>,
) {
    let mut order: Vec<&mut ItemSlot> = slots.iter_mut().collect();
    order.sort_by_key(|slot| slot.index.unwrap_or(usize::MAX));
    for slot in order {
        add_slot(ctx.scene, slot);
    }
    for (a, b) in edges.drain(..) {
        ctx.scene.connections_mut().connect(a, b);
    }
    ctx.item_count_changed();
}

/// Take items out of the scene, highest paint index first so every slot
/// records its original index. Edges among the items go with them; edges
/// leaving the set are the caller's to disconnect.
fn remove_slots(
    ctx: &mut CommandContext<'_>,
    slots: &mut [ItemSlot],
    edges: &mut Vec<(PointRef, PointRef)>,
) {
    let ids: Vec<ItemId> = slots.iter().map(|s| s.id).collect();
    ctx.drop_from_selection(&ids);
    *edges = ctx.scene.connections().edges_within(|id| ids.contains(&id));
    for (a, b) in edges.iter() {
        ctx.scene.connections_mut().disconnect(*a, *b);
    }
    let scene = &*ctx.scene;
    let mut order: Vec<(Option<usize>, &mut ItemSlot)> =
        slots.iter_mut().map(|slot| (scene.index_of(slot.id), slot)).collect();
    order.sort_by_key(|(index, _)| std::cmp::Reverse(*index));
    for (_, slot) in order {
        remove_slot(ctx.scene, slot);
    }
    ctx.item_count_changed();
}

fn add_slot(scene: &mut Scene, slot: &mut ItemSlot) {
    let Some(item) = slot.item.take() else {
        log::warn!("add: item {} is not held by the command", slot.id);
        return;
    };
    let index = slot.index.unwrap_or(scene.len());
    if scene.insert_item(index, item) {
        slot.index = scene.index_of(slot.id);
    } else {
        log::warn!("add: item {} is already in the scene", slot.id);
    }
}

fn remove_slot(scene: &mut Scene, slot: &mut ItemSlot) {
    match scene.remove_item(slot.id) {
        Some((index, mut item)) => {
            item.set_selected(false);
            slot.index = Some(index);
            slot.item = Some(item);
        }
        None => log::warn!("remove: item {} is not in the scene", slot.id),
    }
}

fn set_positions(ctx: &mut CommandContext<'_>, items: &[ItemId], positions: &[Point]) {
    for (id, position) in items.iter().zip(positions) {
        match ctx.scene.item_mut(*id) {
            Some(item) => item.set_position(*position),
            None => log::warn!("move: item {id} is not in the scene"),
        }
    }
    ctx.events
        .push(EditorEvent::ItemsPositionChanged(items.to_vec()));
}

fn resize_point(ctx: &mut CommandContext<'_>, point: PointRef, scene_pos: Point) {
    let Some(item) = ctx.scene.item_mut(point.item) else {
        log::warn!("resize: item {} is not in the scene", point.item);
        return;
    };
    let Some(index) = item.point_index(point.point) else {
        log::warn!("resize: point {} is not on item {}", point.point, point.item);
        return;
    };
    item.resize(index, scene_pos);
    ctx.events
        .push(EditorEvent::ItemsGeometryChanged(vec![point.item]));
}

fn transform_items(ctx: &mut CommandContext<'_>, items: &[ItemId], pivot: Point, op: TransformOp) {
    for id in items {
        match ctx.scene.item_mut(*id) {
            Some(item) => item.apply_transform(op, pivot),
            None => log::warn!("transform: item {id} is not in the scene"),
        }
    }
    ctx.events
        .push(EditorEvent::ItemsTransformChanged(items.to_vec()));
}

fn reorder(scene: &mut Scene, order: &[ItemId]) {
    if !scene.set_item_order(order.to_vec()) {
        log::warn!("reorder: order does not match the scene's items");
    }
}

fn set_visibility(ctx: &mut CommandContext<'_>, items: &[ItemId], visible: &[bool]) {
    let mut hidden = Vec::new();
    for (id, visible) in items.iter().zip(visible) {
        match ctx.scene.item_mut(*id) {
            Some(item) => {
                item.set_visible(*visible);
                if !*visible {
                    hidden.push(*id);
                }
            }
            None => log::warn!("visibility: item {id} is not in the scene"),
        }
    }
    ctx.drop_from_selection(&hidden);
    ctx.events
        .push(EditorEvent::ItemsVisibilityChanged(items.to_vec()));
}

fn install_point(ctx: &mut CommandContext<'_>, item_id: ItemId, index: usize, held: &mut Option<ItemPoint>) {
    let Some(item) = ctx.scene.item_mut(item_id) else {
        log::warn!("insert point: item {item_id} is not in the scene");
        return;
    };
    let Some(point) = held.take() else {
        log::warn!("insert point: no point held for item {item_id}");
        return;
    };
    item.insert_point(index, point);
    ctx.events
        .push(EditorEvent::ItemsGeometryChanged(vec![item_id]));
}

fn uninstall_point(
    ctx: &mut CommandContext<'_>,
    item_id: ItemId,
    index: &mut usize,
    id: PointId,
    held: &mut Option<ItemPoint>,
) {
    let Some(item) = ctx.scene.item_mut(item_id) else {
        log::warn!("remove point: item {item_id} is not in the scene");
        return;
    };
    let Some(found) = item.point_index(id) else {
        log::warn!("remove point: point {id} is not on item {item_id}");
        return;
    };
    *index = found;
    *held = item.remove_point(found);
    ctx.events
        .push(EditorEvent::ItemsGeometryChanged(vec![item_id]));
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Rect;

    struct Fixture {
        scene: Scene,
        selection: Vec<ItemId>,
        events: Vec<EditorEvent>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                scene: Scene::new(),
                selection: Vec::new(),
                events: Vec::new(),
            }
        }

        fn ctx(&mut self) -> CommandContext<'_> {
            CommandContext {
                scene: &mut self.scene,
                selection: &mut self.selection,
                events: &mut self.events,
            }
        }
    }

    fn rect_at(x: f64, y: f64) -> Item {
        Item::new_rect(Rect::new(x, y, x + 100.0, y + 50.0))
    }

    #[test]
    fn test_add_remove_roundtrip() {
        let mut fx = Fixture::new();
        let item = rect_at(0.0, 0.0);
        let id = item.id();
        let mut add = UndoCommand::add_items(vec![item], None);
        add.redo(&mut fx.ctx());
        assert!(fx.scene.contains(id));
        add.undo(&mut fx.ctx());
        assert!(!fx.scene.contains(id));
        add.redo(&mut fx.ctx());
        assert!(fx.scene.contains(id));

        let mut remove = UndoCommand::remove_items(vec![id]);
        remove.redo(&mut fx.ctx());
        assert!(fx.scene.is_empty());
        remove.undo(&mut fx.ctx());
        assert_eq!(fx.scene.item_ids(), &[id]);
        assert!(
            fx.events
                .contains(&EditorEvent::NumberOfItemsChanged(1))
        );
    }

    #[test]
    fn test_remove_restores_original_indices() {
        let mut fx = Fixture::new();
        let items: Vec<Item> = (0..4).map(|i| rect_at(i as f64 * 10.0, 0.0)).collect();
        let ids: Vec<ItemId> = items.iter().map(Item::id).collect();
        for item in items {
            fx.scene.add_item(item);
        }
        let mut remove = UndoCommand::remove_items(vec![ids[3], ids[1]]);
        remove.redo(&mut fx.ctx());
        assert_eq!(fx.scene.item_ids(), &[ids[0], ids[2]]);
        remove.undo(&mut fx.ctx());
        assert_eq!(fx.scene.item_ids(), ids.as_slice());
    }

    #[test]
    fn test_remove_adjacent_items_keeps_paint_order() {
        let mut fx = Fixture::new();
        let items: Vec<Item> = (0..3).map(|i| rect_at(i as f64 * 10.0, 0.0)).collect();
        let ids: Vec<ItemId> = items.iter().map(Item::id).collect();
        for item in items {
            fx.scene.add_item(item);
        }
        for targets in [vec![ids[0], ids[1]], vec![ids[2], ids[1]]] {
            let mut remove = UndoCommand::remove_items(targets);
            remove.redo(&mut fx.ctx());
            remove.undo(&mut fx.ctx());
            assert_eq!(fx.scene.item_ids(), ids.as_slice());
            remove.redo(&mut fx.ctx());
            remove.undo(&mut fx.ctx());
            assert_eq!(fx.scene.item_ids(), ids.as_slice());
        }
    }

    #[test]
    fn test_edges_among_removed_items_leave_with_them() {
        let mut fx = Fixture::new();
        let a = Item::new_line(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        let b = Item::new_line(Point::new(100.0, 0.0), Point::new(100.0, 100.0));
        let edge = (a.point_ref(2).unwrap(), b.point_ref(0).unwrap());
        let ids = vec![a.id(), b.id()];
        fx.scene.add_item(a);
        fx.scene.add_item(b);
        fx.scene.connections_mut().connect(edge.0, edge.1);

        let mut remove = UndoCommand::remove_items(ids.clone());
        remove.redo(&mut fx.ctx());
        assert!(fx.scene.connections().is_empty());
        assert!(fx.scene.is_consistent());
        remove.undo(&mut fx.ctx());
        assert!(fx.scene.connections().is_connected(edge.0, edge.1));
        assert!(fx.scene.is_consistent());

        // Undoing an add takes the same edges out and redo brings them back.
        let items: Vec<Item> = ids
            .iter()
            .filter_map(|id| fx.scene.remove_item(*id))
            .map(|(_, item)| item)
            .collect();
        let mut add = UndoCommand::add_items(items, None);
        add.redo(&mut fx.ctx());
        assert!(fx.scene.is_consistent());
        add.undo(&mut fx.ctx());
        assert!(fx.scene.connections().is_empty());
        add.redo(&mut fx.ctx());
        assert!(fx.scene.connections().is_connected(edge.0, edge.1));
        assert!(fx.scene.is_consistent());
    }

    #[test]
    fn test_move_merge_keeps_first_before() {
        let id = ItemId::new_v4();
        let p = |x: f64| Point::new(x, 0.0);
        let mut first = UndoCommand::move_items(vec![id], vec![p(0.0)], vec![p(10.0)], false);
        let second = UndoCommand::move_items(vec![id], vec![p(10.0)], vec![p(25.0)], true);
        assert!(first.merge(second).is_ok());
        match first.action() {
            Action::MoveItems {
                before,
                after,
                final_move,
                ..
            } => {
                assert_eq!(before, &vec![p(0.0)]);
                assert_eq!(after, &vec![p(25.0)]);
                assert!(*final_move);
            }
            other => panic!("unexpected action {other:?}"),
        }
        let third = UndoCommand::move_items(vec![id], vec![p(25.0)], vec![p(30.0)], false);
        assert!(first.merge(third).is_err());
    }

    #[test]
    fn test_merge_children_dedupes_and_appends() {
        let (i, j) = (ItemId::new_v4(), ItemId::new_v4());
        let a = PointRef::new(i, PointId::new_v4());
        let b = PointRef::new(j, PointId::new_v4());
        let mut first = UndoCommand::move_items(vec![i], vec![Point::ZERO], vec![Point::ZERO], false);
        first.push_child(UndoCommand::resize_item(b, Point::ZERO, Point::new(5.0, 0.0), false));
        first.push_child(UndoCommand::disconnect(a, b));

        let mut second = UndoCommand::move_items(vec![i], vec![Point::ZERO], vec![Point::ZERO], true);
        second.push_child(UndoCommand::resize_item(b, Point::new(5.0, 0.0), Point::new(9.0, 0.0), true));
        second.push_child(UndoCommand::disconnect(b, a));
        second.push_child(UndoCommand::connect(a, b));

        assert!(first.merge(second).is_ok());
        assert_eq!(first.children().len(), 3);
        match first.children()[0].action() {
            Action::ResizeItem { before, after, .. } => {
                assert_eq!(*before, Point::ZERO);
                assert_eq!(*after, Point::new(9.0, 0.0));
            }
            other => panic!("unexpected action {other:?}"),
        }
        assert_eq!(first.children()[2].kind(), CommandKind::PointConnect);
    }

    #[test]
    fn test_select_merge_only_while_open() {
        let id = ItemId::new_v4();
        let mut open = UndoCommand::select(vec![], vec![], false);
        assert!(open.is_open());
        assert!(open.merge(UndoCommand::select(vec![], vec![id], true)).is_ok());
        assert!(!open.is_open());
        assert!(open.merge(UndoCommand::select(vec![id], vec![], true)).is_err());
    }

    #[test]
    fn test_compound_undo_runs_children_in_reverse() {
        let mut fx = Fixture::new();
        let a = Item::new_line(Point::ZERO, Point::new(100.0, 0.0));
        let b = Item::new_line(Point::new(100.0, 0.0), Point::new(200.0, 0.0));
        let (pa, pb) = (a.point_ref(2).unwrap(), b.point_ref(0).unwrap());

        let mut cmd = UndoCommand::compound("Paste Items");
        cmd.push_child(UndoCommand::add_items(vec![a, b], None));
        cmd.push_child(UndoCommand::connect(pa, pb));
        cmd.redo(&mut fx.ctx());
        assert!(fx.scene.connections().is_connected(pa, pb));
        assert_eq!(fx.scene.len(), 2);

        cmd.undo(&mut fx.ctx());
        assert!(fx.scene.connections().is_empty());
        assert!(fx.scene.is_empty());
        assert_eq!(cmd.title(), "Paste Items");
    }

    #[test]
    fn test_point_insert_and_remove() {
        let mut fx = Fixture::new();
        let item = Item::new_polyline(vec![Point::ZERO, Point::new(100.0, 0.0)]);
        let id = item.id();
        fx.scene.add_item(item);

        let point = ItemPoint::new(Point::new(50.0, 0.0), crate::point::PointFlags::CONTROL);
        let point_id = point.id();
        let mut insert = UndoCommand::insert_point(id, 1, point);
        insert.redo(&mut fx.ctx());
        assert_eq!(fx.scene.item(id).unwrap().points().len(), 3);
        assert_eq!(fx.scene.item(id).unwrap().point_index(point_id), Some(1));
        insert.undo(&mut fx.ctx());
        assert_eq!(fx.scene.item(id).unwrap().points().len(), 2);
        insert.redo(&mut fx.ctx());

        let mut remove = UndoCommand::remove_point(id, 1, point_id);
        remove.redo(&mut fx.ctx());
        assert_eq!(fx.scene.item(id).unwrap().points().len(), 2);
        remove.undo(&mut fx.ctx());
        assert_eq!(fx.scene.item(id).unwrap().point_index(point_id), Some(1));
    }

    #[test]
    fn test_release_purges_held_items() {
        let mut connections = Connections::new();
        let a = Item::new_line(Point::ZERO, Point::new(10.0, 0.0));
        let b = Item::new_line(Point::new(10.0, 0.0), Point::new(20.0, 0.0));
        connections.connect(a.point_ref(2).unwrap(), b.point_ref(0).unwrap());
        let command = UndoCommand::add_items(vec![a], None);
        command.release(&mut connections);
        assert!(connections.is_empty());
    }
}
