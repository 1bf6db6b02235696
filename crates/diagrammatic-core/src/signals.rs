//! Synchronous change notifications.

use crate::editor::EditorMode;
use crate::item::ItemId;
use std::fmt;

/// Something observable changed in an editor.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    ScaleChanged(f64),
    ModeChanged(EditorMode),
    CleanChanged(bool),
    CanUndoChanged(bool),
    CanRedoChanged(bool),
    NumberOfItemsChanged(usize),
    ItemsPositionChanged(Vec<ItemId>),
    ItemsTransformChanged(Vec<ItemId>),
    ItemsGeometryChanged(Vec<ItemId>),
    ItemsVisibilityChanged(Vec<ItemId>),
    SelectionChanged(Vec<ItemId>),
    /// Number of place-mode items now following the pointer.
    NewItemsChanged(usize),
    MouseInfoChanged(String),
}

/// Handle returned by [`Signals::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(usize);

type Callback = Box<dyn FnMut(&EditorEvent)>;

/// Subscriber registry. Events are delivered in subscription order on the
/// calling thread before `emit` returns.
#[derive(Default)]
pub struct Signals {
    subscribers: Vec<(SubscriberId, Callback)>,
    next_id: usize,
}

impl Signals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&EditorEvent) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn emit(&mut self, event: &EditorEvent) {
        for (_, callback) in &mut self.subscribers {
            callback(event);
        }
    }

    pub fn emit_all(&mut self, events: impl IntoIterator<Item = EditorEvent>) {
        for event in events {
            self.emit(&event);
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl fmt::Debug for Signals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signals")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
