//! Editing operations on the selection and programmatic command builders.

use super::{Editor, EditorMode};
use crate::connections::PointRef;
use crate::item::{Item, ItemFlags, ItemId, TransformOp, copy_items};
use crate::snap::snap_vec;
use crate::undo::{CommandContext, UndoCommand};
use kurbo::{Point, Rect, Vec2};

/// Apply a selection change inside a command tree being built.
fn select_child(ctx: &mut CommandContext<'_>, ids: Vec<ItemId>) -> UndoCommand {
    let mut command = UndoCommand::select(ctx.selection.clone(), ids, true);
    command.redo_own(ctx);
    command
}

impl Editor {
    // Selection

    /// Select exactly `ids`. Hidden and unknown items are skipped.
    pub fn select_items(&mut self, ids: Vec<ItemId>) {
        let mut selectable: Vec<ItemId> = Vec::with_capacity(ids.len());
        for id in ids {
            let visible = self.scene.item(id).is_some_and(Item::is_visible);
            if visible && !selectable.contains(&id) {
                selectable.push(id);
            }
        }
        if selectable != self.selection {
            self.select_items_command(selectable, true);
        }
    }

    pub fn select_all(&mut self) {
        let ids = self
            .scene
            .items()
            .filter(|item| item.is_visible() && item.has_flags(ItemFlags::CAN_SELECT))
            .map(Item::id)
            .collect();
        self.select_items(ids);
    }

    /// Select the items in a scene rectangle under the item selection mode.
    pub fn select_area(&mut self, rect: Rect) {
        let ids = self.scene.items_in_rect(rect, self.config.item_selection_mode);
        let ids = self.selectable(ids);
        self.select_items(ids);
    }

    /// Select the items in a closed scene polygon under the item selection mode.
    pub fn select_area_polygon(&mut self, polygon: &[Point]) {
        let ids = self
            .scene
            .items_in_polygon(polygon, self.config.item_selection_mode);
        let ids = self.selectable(ids);
        self.select_items(ids);
    }

    pub fn select_none(&mut self) {
        self.focus_item = None;
        if !self.selection.is_empty() {
            self.select_items_command(Vec::new(), true);
        }
    }

    fn selectable(&self, ids: Vec<ItemId>) -> Vec<ItemId> {
        ids.into_iter()
            .filter(|id| {
                self.scene
                    .item(*id)
                    .is_some_and(|item| item.has_flags(ItemFlags::CAN_SELECT))
            })
            .collect()
    }

    /// Selected ids carrying `flags`.
    fn selected_with(&self, flags: ItemFlags) -> Vec<ItemId> {
        self.selection
            .iter()
            .copied()
            .filter(|id| self.scene.item(*id).is_some_and(|item| item.has_flags(flags)))
            .collect()
    }

    /// Selected ids in paint order, back to front.
    fn selection_in_z_order(&self) -> Vec<ItemId> {
        self.scene
            .item_ids()
            .iter()
            .copied()
            .filter(|id| self.selection.contains(id))
            .collect()
    }

    fn single_selected(&self, flags: ItemFlags) -> Option<ItemId> {
        match self.selection.as_slice() {
            &[id] if self.scene.item(id).is_some_and(|item| item.has_flags(flags)) => Some(id),
            _ => None,
        }
    }

    // Geometry

    /// Move the movable selected items by `delta` and connect what lands on
    /// other items' points.
    pub fn move_selection(&mut self, delta: Vec2) -> bool {
        let ids = self.selected_with(ItemFlags::CAN_MOVE);
        let positions = ids
            .iter()
            .filter_map(|id| self.scene.item(*id))
            .map(|item| item.position() + delta)
            .collect();
        self.move_items(ids, positions, true)
    }

    /// Drag point `index` of the single selected item to a snapped scene position.
    pub fn resize_selection(&mut self, index: usize, scene_pos: Point) -> bool {
        let Some(id) = self.single_selected(ItemFlags::CAN_RESIZE) else {
            return false;
        };
        let Some(point) = self.scene.item(id).and_then(|item| item.point_ref(index)) else {
            return false;
        };
        let target = self.round_to_grid(scene_pos);
        self.resize_item(point, target, true, true)
    }

    pub fn rotate_selection(&mut self) -> bool {
        self.transform_selection(TransformOp::Rotate)
    }

    pub fn rotate_back_selection(&mut self) -> bool {
        self.transform_selection(TransformOp::RotateBack)
    }

    pub fn flip_selection_horizontal(&mut self) -> bool {
        self.transform_selection(TransformOp::FlipHorizontal)
    }

    pub fn flip_selection_vertical(&mut self) -> bool {
        self.transform_selection(TransformOp::FlipVertical)
    }

    /// In place mode the ghosts turn about the snapped cursor. Otherwise the
    /// selection turns about its snapped center.
    fn transform_selection(&mut self, op: TransformOp) -> bool {
        match self.mode {
            EditorMode::Place => {
                let pivot = self.round_to_grid(self.cursor_scene_pos);
                let mut changed = false;
                for item in &mut self.place_items {
                    if item.has_flags(op.required_flag()) {
                        item.apply_transform(op, pivot);
                        changed = true;
                    }
                }
                changed
            }
            EditorMode::Default => {
                let items = self.selected_with(op.required_flag());
                if items.is_empty() {
                    return false;
                }
                let pivot = self.round_to_grid(self.selection_center());
                self.build_and_push(true, |linker, ctx| {
                    Some(linker.build_transform(ctx, items, pivot, op))
                })
            }
            EditorMode::Scroll | EditorMode::Zoom => false,
        }
    }

    // Paint order

    pub fn bring_forward(&mut self) -> bool {
        self.reorder_selection(|order, selected| {
            for id in selected.iter().rev() {
                if let Some(index) = order.iter().position(|other| other == id) {
                    let moved = order.remove(index);
                    let to = (index + 1).min(order.len());
                    order.insert(to, moved);
                }
            }
        })
    }

    pub fn send_backward(&mut self) -> bool {
        self.reorder_selection(|order, selected| {
            for id in selected.iter().rev() {
                if let Some(index) = order.iter().position(|other| other == id) {
                    let moved = order.remove(index);
                    order.insert(index.saturating_sub(1), moved);
                }
            }
        })
    }

    /// Paint the selection above everything else, keeping its relative order.
    pub fn bring_to_front(&mut self) -> bool {
        self.reorder_selection(|order, selected| {
            let (mut rest, top): (Vec<ItemId>, Vec<ItemId>) =
                order.iter().partition(|id| !selected.contains(id));
            rest.extend(top);
            *order = rest;
        })
    }

    /// Paint the selection below everything else, keeping its relative order.
    pub fn send_to_back(&mut self) -> bool {
        self.reorder_selection(|order, selected| {
            let (mut bottom, rest): (Vec<ItemId>, Vec<ItemId>) =
                order.iter().partition(|id| selected.contains(id));
            bottom.extend(rest);
            *order = bottom;
        })
    }

    fn reorder_selection(&mut self, arrange: impl FnOnce(&mut Vec<ItemId>, &[ItemId])) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        let before = self.scene.item_ids().to_vec();
        let mut after = before.clone();
        arrange(&mut after, &self.selection);
        if after == before {
            return false;
        }
        self.push_command(UndoCommand::reorder(before, after));
        true
    }

    // Points

    /// Insert a point into the single selected item at the last press position.
    pub fn insert_item_point(&mut self) -> bool {
        self.insert_item_point_at(self.press_scene_pos)
    }

    pub fn insert_item_point_at(&mut self, scene_pos: Point) -> bool {
        let Some(id) = self.single_selected(ItemFlags::CAN_INSERT_POINTS) else {
            return false;
        };
        let target = self.round_to_grid(scene_pos);
        let Some((index, point)) = self.scene.item(id).and_then(|item| item.point_to_insert(target)) else {
            return false;
        };
        self.push_command(UndoCommand::insert_point(id, index, point));
        true
    }

    /// Remove the point of the single selected item nearest the last press
    /// position. The item may refuse, leaving the undo stack untouched.
    pub fn remove_item_point(&mut self) -> bool {
        self.remove_item_point_at(self.press_scene_pos)
    }

    pub fn remove_item_point_at(&mut self, scene_pos: Point) -> bool {
        let Some(id) = self.single_selected(ItemFlags::CAN_REMOVE_POINTS) else {
            return false;
        };
        let target = self.round_to_grid(scene_pos);
        let found = self.scene.item(id).and_then(|item| {
            let index = item.point_to_remove(target)?;
            Some((index, item.point_ref(index)?))
        });
        let Some((index, point)) = found else {
            return false;
        };
        self.build_and_push(true, |linker, ctx| {
            let peers = ctx.scene.connections().peers(point).to_vec();
            let mut command = UndoCommand::remove_point(id, index, point.point);
            command.redo_own(ctx);
            for peer in peers {
                if let Some(child) = linker.build_disconnect(ctx, point, peer) {
                    command.push_child(child);
                }
            }
            Some(command)
        })
    }

    // Structure

    /// Replace two or more selected items with one group holding copies of them.
    pub fn group_selection(&mut self) -> bool {
        if self.mode != EditorMode::Default {
            return false;
        }
        let ids = self.selection_in_z_order();
        if ids.len() < 2 {
            return false;
        }
        let refs: Vec<&Item> = ids.iter().filter_map(|id| self.scene.item(*id)).collect();
        let (copies, links) = copy_items(&refs, self.scene.connections());
        let group = Item::new_group(copies, links);
        let group_id = group.id();
        log::debug!("Grouping {} items into {group_id}", ids.len());

        let undoable = self.config.undoable_select_commands;
        if !undoable {
            self.set_selection_direct(&[]);
        }
        let pushed = self.build_and_push(true, |linker, ctx| {
            let mut command = UndoCommand::compound("Group Items");
            if undoable {
                command.push_child(select_child(ctx, Vec::new()));
            }
            command.push_child(linker.build_remove(ctx, ids));
            command.push_child(linker.build_add(ctx, vec![group], false));
            if undoable {
                command.push_child(select_child(ctx, vec![group_id]));
            }
            Some(command)
        });
        if !undoable {
            self.set_selection_direct(&[group_id]);
        }
        pushed
    }

    /// Replace the single selected group with its children and their links.
    pub fn ungroup_selection(&mut self) -> bool {
        if self.mode != EditorMode::Default {
            return false;
        }
        let &[group_id] = self.selection.as_slice() else {
            return false;
        };
        let Some((children, links)) = self.scene.item(group_id).and_then(Item::ungrouped_items) else {
            return false;
        };
        let child_ids: Vec<ItemId> = children.iter().map(Item::id).collect();
        let edges = links.edges();

        let undoable = self.config.undoable_select_commands;
        if !undoable {
            self.set_selection_direct(&[]);
        }
        let selected = child_ids.clone();
        let pushed = self.build_and_push(true, |linker, ctx| {
            let mut command = UndoCommand::compound("Ungroup Items");
            if undoable {
                command.push_child(select_child(ctx, Vec::new()));
            }
            command.push_child(linker.build_remove(ctx, vec![group_id]));
            command.push_child(linker.build_add(ctx, children, false));
            for (a, b) in edges {
                if let Some(child) = linker.build_connect(ctx, a, b) {
                    command.push_child(child);
                }
            }
            if undoable {
                command.push_child(select_child(ctx, selected));
            }
            Some(command)
        });
        if !undoable {
            self.set_selection_direct(&child_ids);
        }
        pushed
    }

    // Clipboard

    /// Copy the selection, in paint order, with the links among it.
    pub fn copy_selection(&mut self) -> bool {
        let ids = self.selection_in_z_order();
        if ids.is_empty() {
            return false;
        }
        let refs: Vec<&Item> = ids.iter().filter_map(|id| self.scene.item(*id)).collect();
        let (items, links) = copy_items(&refs, self.scene.connections());
        self.clipboard = items;
        self.clipboard_links = links;
        true
    }

    pub fn cut_selection(&mut self) -> bool {
        self.copy_selection() && self.delete_selection()
    }

    /// Add copies of the clipboard near the cursor. Consecutive pastes without
    /// a mouse release in between step further down and right.
    pub fn paste(&mut self) -> bool {
        if self.mode != EditorMode::Default {
            return false;
        }
        let Some(anchor) = self.clipboard.first().map(Item::position) else {
            return false;
        };
        let refs: Vec<&Item> = self.clipboard.iter().collect();
        let (mut copies, links) = copy_items(&refs, &self.clipboard_links);

        let grid = self.config.grid;
        let step = 2.0 * self.consecutive_pastes as f64 * grid;
        let offset = Vec2::new(step, step) + snap_vec(self.cursor_scene_pos - anchor, grid);
        for item in &mut copies {
            item.set_flags(item.flags() - ItemFlags::PLACE_BY_MOUSE_PRESS_AND_RELEASE);
            item.set_position(item.position() + offset);
        }
        let ids: Vec<ItemId> = copies.iter().map(Item::id).collect();
        let edges = links.edges();

        let undoable = self.config.undoable_select_commands;
        if !undoable {
            self.set_selection_direct(&[]);
        }
        let selected = ids.clone();
        let pushed = self.build_and_push(true, |linker, ctx| {
            let mut command = UndoCommand::compound("Paste Items");
            if undoable {
                command.push_child(select_child(ctx, Vec::new()));
            }
            command.push_child(linker.build_add(ctx, copies, false));
            for (a, b) in edges {
                if let Some(child) = linker.build_connect(ctx, a, b) {
                    command.push_child(child);
                }
            }
            if undoable {
                command.push_child(select_child(ctx, selected));
            }
            Some(command)
        });
        if !undoable {
            self.set_selection_direct(&ids);
        }
        self.consecutive_pastes += 1;
        pushed
    }

    /// Remove the deletable selected items. Outside default mode this only
    /// returns to default mode.
    pub fn delete_selection(&mut self) -> bool {
        if self.mode != EditorMode::Default {
            self.set_default_mode();
            return false;
        }
        let ids = self.selected_with(ItemFlags::CAN_DELETE);
        if ids.is_empty() {
            return false;
        }
        let undoable = self.config.undoable_select_commands;
        if !undoable {
            self.set_selection_direct(&[]);
        }
        self.build_and_push(true, |linker, ctx| {
            let mut command = UndoCommand::compound("Delete Items");
            if undoable {
                command.push_child(select_child(ctx, Vec::new()));
            }
            command.push_child(linker.build_remove(ctx, ids));
            Some(command)
        })
    }

    // Programmatic commands

    /// Add items to the scene. With `place`, co-located connection points
    /// are connected to the rest of the scene.
    pub fn add_items(&mut self, items: Vec<Item>, place: bool) -> bool {
        let items: Vec<Item> = items
            .into_iter()
            .filter(|item| !self.scene.contains(item.id()))
            .collect();
        if items.is_empty() {
            return false;
        }
        self.build_and_push(true, |linker, ctx| Some(linker.build_add(ctx, items, place)))
    }

    /// Remove items, disconnecting them from the rest of the scene.
    pub fn remove_items(&mut self, ids: Vec<ItemId>) -> bool {
        let ids: Vec<ItemId> = ids.into_iter().filter(|id| self.scene.contains(*id)).collect();
        if ids.is_empty() {
            return false;
        }
        self.build_and_push(true, |linker, ctx| Some(linker.build_remove(ctx, ids)))
    }

    /// Move items to scene positions, keeping connections intact.
    pub fn move_items(&mut self, ids: Vec<ItemId>, positions: Vec<Point>, place: bool) -> bool {
        if ids.is_empty() || ids.len() != positions.len() || !ids.iter().all(|id| self.scene.contains(*id)) {
            return false;
        }
        self.build_and_push(true, |linker, ctx| Some(linker.build_move(ctx, ids, positions, place)))
    }

    /// Drag one item point to a scene position. With `disconnect`, the point
    /// lets go of its peers first.
    pub fn resize_item(&mut self, point: PointRef, scene_pos: Point, place: bool, disconnect: bool) -> bool {
        self.build_and_push(true, |linker, ctx| {
            linker.build_resize(ctx, point, scene_pos, place, disconnect)
        })
    }

    pub fn set_items_visible(&mut self, ids: Vec<ItemId>, visible: bool) -> bool {
        let (ids, before): (Vec<ItemId>, Vec<bool>) = ids
            .into_iter()
            .filter_map(|id| self.scene.item(id).map(|item| (id, item.is_visible())))
            .unzip();
        if before.iter().all(|was| *was == visible) {
            return false;
        }
        let after = vec![visible; ids.len()];
        self.push_command(UndoCommand::set_visibility(ids, before, after));
        true
    }

    pub fn connect_points(&mut self, a: PointRef, b: PointRef) -> bool {
        self.build_and_push(true, |linker, ctx| linker.build_connect(ctx, a, b))
    }

    pub fn disconnect_points(&mut self, a: PointRef, b: PointRef) -> bool {
        self.build_and_push(true, |linker, ctx| linker.build_disconnect(ctx, a, b))
    }
}
