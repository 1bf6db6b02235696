//! Bounded undo stack with merging and clean tracking.

use super::{CommandContext, UndoCommand};
use crate::connections::Connections;

/// Linear history of commands. Entries below `index` are done, entries at
/// and above it are undone and form the redo side.
#[derive(Debug, Clone)]
pub struct UndoStack {
    commands: Vec<UndoCommand>,
    index: usize,
    limit: usize,
    /// Index at the last `set_clean`; `None` once that state is unreachable.
    clean_index: Option<usize>,
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new(super::DEFAULT_UNDO_LIMIT)
    }
}

impl UndoStack {
    pub fn new(limit: usize) -> Self {
        Self {
            commands: Vec::new(),
            index: 0,
            limit: limit.max(1),
            clean_index: Some(0),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Change the capacity, evicting the oldest commands if needed.
    pub fn set_limit(&mut self, limit: usize, connections: &mut Connections) {
        self.limit = limit.max(1);
        self.evict(connections);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn command(&self, index: usize) -> Option<&UndoCommand> {
        self.commands.get(index)
    }

    /// Most recently done command.
    pub fn top(&self) -> Option<&UndoCommand> {
        self.index.checked_sub(1).and_then(|i| self.commands.get(i))
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index < self.commands.len()
    }

    pub fn undo_text(&self) -> Option<&str> {
        self.top().map(UndoCommand::title)
    }

    pub fn redo_text(&self) -> Option<&str> {
        self.commands.get(self.index).map(UndoCommand::title)
    }

    pub fn is_clean(&self) -> bool {
        self.clean_index == Some(self.index)
    }

    pub fn set_clean(&mut self) {
        self.clean_index = Some(self.index);
    }

    /// Execute `command` and record it, merging into the open top command
    /// when possible.
    pub fn push(&mut self, mut command: UndoCommand, ctx: &mut CommandContext<'_>) {
        command.redo(ctx);
        self.truncate(ctx.scene.connections_mut());

        let mergeable_top = self.index > 0 && self.clean_index != Some(self.index);
        if mergeable_top {
            let top = &mut self.commands[self.index - 1];
            match top.merge(command) {
                Ok(()) => {
                    log::debug!("Merged command into '{}'", top.title());
                    return;
                }
                Err(rejected) => command = rejected,
            }
        }

        log::debug!("Pushed command '{}'", command.title());
        self.commands.push(command);
        self.index += 1;
        self.evict(ctx.scene.connections_mut());
    }

    pub fn undo(&mut self, ctx: &mut CommandContext<'_>) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.index -= 1;
        let command = &mut self.commands[self.index];
        log::debug!("Undo '{}'", command.title());
        command.undo(ctx);
        true
    }

    pub fn redo(&mut self, ctx: &mut CommandContext<'_>) -> bool {
        if !self.can_redo() {
            return false;
        }
        let command = &mut self.commands[self.index];
        log::debug!("Redo '{}'", command.title());
        command.redo(ctx);
        self.index += 1;
        true
    }

    /// Undo and drop a top command that is still open for merging.
    pub fn abandon_open(&mut self, ctx: &mut CommandContext<'_>) -> bool {
        if self.index == 0 || self.index != self.commands.len() {
            return false;
        }
        if !self.commands[self.index - 1].is_open() {
            return false;
        }
        self.index -= 1;
        if let Some(mut command) = self.commands.pop() {
            log::debug!("Abandoned open command '{}'", command.title());
            command.undo(ctx);
            command.release(ctx.scene.connections_mut());
        }
        if self.clean_index.is_some_and(|clean| clean > self.index) {
            self.clean_index = None;
        }
        true
    }

    /// Drop every command. The empty stack is clean.
    pub fn clear(&mut self, connections: &mut Connections) {
        for command in self.commands.drain(..) {
            command.release(connections);
        }
        self.index = 0;
        self.clean_index = Some(0);
    }

    fn truncate(&mut self, connections: &mut Connections) {
        if self.index == self.commands.len() {
            return;
        }
        for command in self.commands.drain(self.index..) {
            command.release(connections);
        }
        if self.clean_index.is_some_and(|clean| clean > self.index) {
            self.clean_index = None;
        }
    }

    fn evict(&mut self, connections: &mut Connections) {
        while self.commands.len() > self.limit {
            let oldest = self.commands.remove(0);
            log::debug!("Evicted command '{}'", oldest.title());
            oldest.release(connections);
            self.index = self.index.saturating_sub(1);
            self.clean_index = match self.clean_index {
                Some(0) | None => None,
                Some(clean) => Some(clean - 1),
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Item, ItemId};
    use crate::scene::Scene;
    use crate::signals::EditorEvent;
    use kurbo::{Point, Rect};

    struct Fixture {
        scene: Scene,
        selection: Vec<ItemId>,
        events: Vec<EditorEvent>,
    }

    impl Fixture {
        fn with_item() -> (Self, ItemId) {
            let mut scene = Scene::new();
            let item = Item::new_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
            let id = item.id();
            scene.add_item(item);
            (
                Self {
                    scene,
                    selection: Vec::new(),
                    events: Vec::new(),
                },
                id,
            )
        }

        fn ctx(&mut self) -> CommandContext<'_> {
            CommandContext {
                scene: &mut self.scene,
                selection: &mut self.selection,
                events: &mut self.events,
            }
        }

        fn position(&self, id: ItemId) -> Point {
            self.scene.item(id).unwrap().position()
        }
    }

    fn step(id: ItemId, from: f64, to: f64, final_move: bool) -> UndoCommand {
        UndoCommand::move_items(
            vec![id],
            vec![Point::new(from, 0.0)],
            vec![Point::new(to, 0.0)],
            final_move,
        )
    }

    #[test]
    fn test_push_undo_redo() {
        let (mut fx, id) = Fixture::with_item();
        let mut stack = UndoStack::new(8);
        stack.push(step(id, 0.0, 50.0, true), &mut fx.ctx());
        assert_eq!(fx.position(id), Point::new(50.0, 0.0));
        assert!(stack.can_undo());
        assert_eq!(stack.undo_text(), Some("Move Items"));

        assert!(stack.undo(&mut fx.ctx()));
        assert_eq!(fx.position(id), Point::ZERO);
        assert!(!stack.undo(&mut fx.ctx()));
        assert!(stack.redo(&mut fx.ctx()));
        assert_eq!(fx.position(id), Point::new(50.0, 0.0));
        assert!(!stack.redo(&mut fx.ctx()));
    }

    #[test]
    fn test_gesture_merges_into_one_command() {
        let (mut fx, id) = Fixture::with_item();
        let mut stack = UndoStack::new(8);
        stack.set_clean();
        stack.push(step(id, 0.0, 10.0, false), &mut fx.ctx());
        stack.push(step(id, 10.0, 20.0, false), &mut fx.ctx());
        stack.push(step(id, 20.0, 30.0, true), &mut fx.ctx());
        assert_eq!(stack.len(), 1);
        stack.push(step(id, 30.0, 40.0, true), &mut fx.ctx());
        assert_eq!(stack.len(), 2);

        stack.undo(&mut fx.ctx());
        stack.undo(&mut fx.ctx());
        assert_eq!(fx.position(id), Point::ZERO);
    }

    #[test]
    fn test_push_truncates_redo_side() {
        let (mut fx, id) = Fixture::with_item();
        let mut stack = UndoStack::new(8);
        stack.push(step(id, 0.0, 10.0, true), &mut fx.ctx());
        stack.push(step(id, 10.0, 20.0, true), &mut fx.ctx());
        stack.undo(&mut fx.ctx());
        stack.push(step(id, 10.0, 70.0, true), &mut fx.ctx());
        assert_eq!(stack.len(), 2);
        assert!(!stack.can_redo());
        assert_eq!(fx.position(id), Point::new(70.0, 0.0));
    }

    #[test]
    fn test_clean_tracking() {
        let (mut fx, id) = Fixture::with_item();
        let mut stack = UndoStack::new(8);
        assert!(stack.is_clean());
        stack.push(step(id, 0.0, 10.0, true), &mut fx.ctx());
        assert!(!stack.is_clean());
        stack.set_clean();
        assert!(stack.is_clean());
        stack.undo(&mut fx.ctx());
        assert!(!stack.is_clean());
        stack.redo(&mut fx.ctx());
        assert!(stack.is_clean());

        stack.undo(&mut fx.ctx());
        stack.push(step(id, 0.0, 90.0, true), &mut fx.ctx());
        assert!(!stack.is_clean());
        stack.undo(&mut fx.ctx());
        stack.redo(&mut fx.ctx());
        assert!(!stack.is_clean());
    }

    #[test]
    fn test_no_merge_across_clean_point() {
        let (mut fx, id) = Fixture::with_item();
        let mut stack = UndoStack::new(8);
        stack.push(step(id, 0.0, 10.0, false), &mut fx.ctx());
        stack.set_clean();
        stack.push(step(id, 10.0, 20.0, true), &mut fx.ctx());
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_eviction_keeps_limit() {
        let (mut fx, id) = Fixture::with_item();
        let mut stack = UndoStack::new(3);
        for i in 0..4 {
            let from = i as f64 * 10.0;
            stack.push(step(id, from, from + 10.0, true), &mut fx.ctx());
        }
        assert_eq!(stack.len(), 3);
        assert!(!stack.is_clean());
        while stack.undo(&mut fx.ctx()) {}
        assert_eq!(fx.position(id), Point::new(10.0, 0.0));
        assert_eq!(stack.index(), 0);
        stack.set_limit(1, fx.scene.connections_mut());
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_abandon_open_gesture() {
        let (mut fx, id) = Fixture::with_item();
        let mut stack = UndoStack::new(8);
        stack.push(step(id, 0.0, 10.0, true), &mut fx.ctx());
        assert!(!stack.abandon_open(&mut fx.ctx()));
        stack.push(step(id, 10.0, 40.0, false), &mut fx.ctx());
        assert!(stack.abandon_open(&mut fx.ctx()));
        assert_eq!(stack.len(), 1);
        assert_eq!(fx.position(id), Point::new(10.0, 0.0));
    }

    #[test]
    fn test_clear_is_clean() {
        let (mut fx, id) = Fixture::with_item();
        let mut stack = UndoStack::new(8);
        stack.push(step(id, 0.0, 10.0, true), &mut fx.ctx());
        stack.clear(fx.scene.connections_mut());
        assert!(stack.is_empty());
        assert!(stack.is_clean());
        assert!(!stack.can_undo());
    }
}
