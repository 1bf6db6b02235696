//! Connection side effects of editing commands.
//!
//! Builders apply each command to the live scene as they go so that later
//! steps see earlier ones. The caller reverts the finished command before
//! pushing it.

use crate::connections::PointRef;
use crate::item::{ItemFlags, ItemId, TransformOp};
use crate::scene::Scene;
use crate::undo::{CommandContext, UndoCommand};
use kurbo::Point;
use std::collections::HashSet;

/// Distance under which two points count as co-located.
pub(crate) fn connection_tolerance(grid: f64) -> f64 {
    if grid > 0.0 { grid / 2.0 } else { 1e-6 }
}

/// Builds one command tree and tracks what it already touched.
pub(crate) struct Linker {
    tolerance: f64,
    final_step: bool,
    /// Items moved or transformed as a whole by the root command.
    roots: HashSet<ItemId>,
    /// Points already resized by this tree.
    resized: HashSet<PointRef>,
    /// Items whose points were already checked for broken connections.
    visited: HashSet<ItemId>,
}

impl Linker {
    pub(crate) fn new(grid: f64, final_step: bool) -> Self {
        Self {
            tolerance: connection_tolerance(grid),
            final_step,
            roots: HashSet::new(),
            resized: HashSet::new(),
            visited: HashSet::new(),
        }
    }

    fn colocated(&self, a: Point, b: Point) -> bool {
        (a - b).hypot() <= self.tolerance
    }

    pub(crate) fn build_add(
        &mut self,
        ctx: &mut CommandContext<'_>,
        items: Vec<crate::item::Item>,
        place: bool,
    ) -> UndoCommand {
        let ids: Vec<ItemId> = items.iter().map(|item| item.id()).collect();
        let mut command = UndoCommand::add_items(items, None);
        command.redo_own(ctx);
        if place {
            self.place(ctx, &mut command, &ids);
        }
        command
    }

    pub(crate) fn build_remove(&mut self, ctx: &mut CommandContext<'_>, ids: Vec<ItemId>) -> UndoCommand {
        let mut command = UndoCommand::remove_items(ids.clone());
        command.redo_own(ctx);
        self.unplace(ctx, &mut command, &ids);
        command
    }

    /// Move `items` to the scene positions in `after`.
    pub(crate) fn build_move(
        &mut self,
        ctx: &mut CommandContext<'_>,
        items: Vec<ItemId>,
        after: Vec<Point>,
        place: bool,
    ) -> UndoCommand {
        let before = items
            .iter()
            .map(|id| ctx.scene.item(*id).map(|item| item.position()).unwrap_or_default())
            .collect();
        let mut command = UndoCommand::move_items(items.clone(), before, after, self.final_step);
        command.redo_own(ctx);
        self.roots.extend(items.iter().copied());
        self.maintain(ctx, &mut command, &items, true, None);
        if place {
            self.place(ctx, &mut command, &items);
        }
        command
    }

    /// Drag `point` to `scene_pos`. With `disconnect`, the point first lets go
    /// of all its peers.
    pub(crate) fn build_resize(
        &mut self,
        ctx: &mut CommandContext<'_>,
        point: PointRef,
        scene_pos: Point,
        place: bool,
        disconnect: bool,
    ) -> Option<UndoCommand> {
        let before = ctx.scene.point_scene_position(point)?;
        let free = ctx.scene.point(point)?.is_free();
        let mut command = UndoCommand::resize_item(point, before, scene_pos, self.final_step);
        command.redo_own(ctx);
        self.resized.insert(point);

        if disconnect {
            for peer in ctx.scene.connections().peers(point).to_vec() {
                self.push_disconnect(ctx, &mut command, point, peer);
            }
        }
        if self.visited.insert(point.item) {
            self.maintain(ctx, &mut command, &[point.item], !free, Some(point));
        }
        if place {
            self.place(ctx, &mut command, &[point.item]);
        }
        Some(command)
    }

    pub(crate) fn build_transform(
        &mut self,
        ctx: &mut CommandContext<'_>,
        items: Vec<ItemId>,
        pivot: Point,
        op: TransformOp,
    ) -> UndoCommand {
        let mut command = UndoCommand::transform_items(items.clone(), pivot, op);
        command.redo_own(ctx);
        self.roots.extend(items.iter().copied());
        self.maintain(ctx, &mut command, &items, true, None);
        command
    }

    /// Link `a` and `b`, resizing one of them onto the other if they are apart.
    pub(crate) fn build_connect(
        &mut self,
        ctx: &mut CommandContext<'_>,
        a: PointRef,
        b: PointRef,
    ) -> Option<UndoCommand> {
        if a.item == b.item || ctx.scene.connections().is_connected(a, b) {
            return None;
        }
        let (pa, pb) = (ctx.scene.point(a)?, ctx.scene.point(b)?);
        if !(pa.is_connection() && pb.is_connection()) {
            return None;
        }
        let a_pos = ctx.scene.point_scene_position(a)?;
        let b_pos = ctx.scene.point_scene_position(b)?;

        let mut command = UndoCommand::connect(a, b);
        if a_pos != b_pos {
            let child = if can_drag(ctx.scene, b) {
                self.build_resize(ctx, b, a_pos, false, true)
            } else if can_drag(ctx.scene, a) {
                self.build_resize(ctx, a, b_pos, false, true)
            } else {
                None
            };
            if let Some(child) = child {
                command.push_child(child);
            }
        }
        command.redo_own(ctx);
        Some(command)
    }

    pub(crate) fn build_disconnect(
        &mut self,
        ctx: &mut CommandContext<'_>,
        a: PointRef,
        b: PointRef,
    ) -> Option<UndoCommand> {
        if !ctx.scene.connections().is_connected(a, b) {
            return None;
        }
        let mut command = UndoCommand::disconnect(a, b);
        command.redo_own(ctx);
        Some(command)
    }

    fn push_disconnect(&mut self, ctx: &mut CommandContext<'_>, parent: &mut UndoCommand, a: PointRef, b: PointRef) {
        if let Some(child) = self.build_disconnect(ctx, a, b) {
            parent.push_child(child);
        }
    }

    /// Re-establish co-location of every peer of `items`' points, resizing
    /// peers that can follow and disconnecting the rest.
    fn maintain(
        &mut self,
        ctx: &mut CommandContext<'_>,
        parent: &mut UndoCommand,
        items: &[ItemId],
        check_control: bool,
        skip: Option<PointRef>,
    ) {
        for &item_id in items {
            self.visited.insert(item_id);
            let Some(item) = ctx.scene.item(item_id) else {
                continue;
            };
            let points: Vec<PointRef> = item
                .points()
                .iter()
                .filter(|point| check_control || !point.is_control())
                .map(|point| PointRef::new(item_id, point.id()))
                .filter(|point| Some(*point) != skip)
                .collect();

            for point in points {
                for peer in ctx.scene.connections().peers(point).to_vec() {
                    let (Some(p), Some(q)) = (
                        ctx.scene.point_scene_position(point),
                        ctx.scene.point_scene_position(peer),
                    ) else {
                        continue;
                    };
                    if self.colocated(p, q) {
                        continue;
                    }
                    let follows = can_follow(ctx.scene, peer)
                        && !self.roots.contains(&peer.item)
                        && !self.resized.contains(&peer);
                    if follows {
                        log::trace!("Resizing {} to keep it attached", peer.item);
                        if let Some(child) = self.build_resize(ctx, peer, p, false, false) {
                            parent.push_child(child);
                        }
                    } else {
                        self.push_disconnect(ctx, parent, point, peer);
                    }
                }
            }
        }
    }

    /// Connect co-located points of `items` to points on other scene items.
    fn place(&mut self, ctx: &mut CommandContext<'_>, parent: &mut UndoCommand, items: &[ItemId]) {
        for &item_id in items {
            let others: Vec<ItemId> = ctx
                .scene
                .item_ids()
                .iter()
                .copied()
                .filter(|id| !items.contains(id))
                .collect();
            for other in others {
                let pairs = self.connectable_pairs(ctx.scene, item_id, other);
                for (p, q) in pairs {
                    if !should_connect(ctx.scene, p, q) {
                        continue;
                    }
                    if let Some(child) = self.build_connect(ctx, p, q) {
                        parent.push_child(child);
                    }
                }
            }
        }
    }

    fn connectable_pairs(&self, scene: &Scene, item: ItemId, other: ItemId) -> Vec<(PointRef, PointRef)> {
        let (Some(a), Some(b)) = (scene.item(item), scene.item(other)) else {
            return Vec::new();
        };
        let mut pairs = Vec::new();
        for (i, p) in a.points().iter().enumerate() {
            for (j, q) in b.points().iter().enumerate() {
                let (Some(ps), Some(qs)) = (a.point_scene_position(i), b.point_scene_position(j)) else {
                    continue;
                };
                if self.colocated(ps, qs) {
                    pairs.push((PointRef::new(item, p.id()), PointRef::new(other, q.id())));
                }
            }
        }
        pairs
    }

    /// Disconnect every edge that leaves the set `items`.
    fn unplace(&mut self, ctx: &mut CommandContext<'_>, parent: &mut UndoCommand, items: &[ItemId]) {
        let leaving: Vec<(PointRef, PointRef)> = ctx
            .scene
            .connections()
            .edges()
            .into_iter()
            .filter(|(a, b)| items.contains(&a.item) != items.contains(&b.item))
            .map(|(a, b)| if items.contains(&a.item) { (a, b) } else { (b, a) })
            .collect();
        for (a, b) in leaving {
            self.push_disconnect(ctx, parent, a, b);
        }
    }
}

/// `point` may be dragged to join another point.
fn can_drag(scene: &Scene, point: PointRef) -> bool {
    let Some(item) = scene.item(point.item) else {
        return false;
    };
    item.has_flags(ItemFlags::CAN_RESIZE) && item.point_by_id(point.point).is_some_and(|p| p.is_control())
}

/// `point` may be resized to stay attached to a moving peer.
fn can_follow(scene: &Scene, point: PointRef) -> bool {
    can_drag(scene, point) && scene.point(point).is_some_and(|p| p.is_free())
}

fn should_connect(scene: &Scene, a: PointRef, b: PointRef) -> bool {
    let (Some(pa), Some(pb)) = (scene.point(a), scene.point(b)) else {
        return false;
    };
    pa.is_connection()
        && pb.is_connection()
        && (pa.is_free() || pb.is_free())
        && !scene.connections().is_connected_to_item(a, b.item)
}
