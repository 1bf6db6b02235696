//! The editor controller: modes, selection, gestures, undo and view state
//! over a single scene.

mod actions;
mod connections;
mod mouse;

pub use mouse::MouseState;

use crate::config::{EditorConfig, ItemSelectionMode};
use crate::connections::Connections;
use crate::item::{Item, ItemId};
use crate::scene::Scene;
use crate::signals::{EditorEvent, Signals, SubscriberId};
use crate::snap::snap_point;
use crate::style::StyleColor;
use crate::undo::{CommandContext, UndoCommand, UndoStack};
use crate::view::ViewTransform;
use connections::Linker;
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Interaction mode of an [`Editor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EditorMode {
    /// Select, move and resize items.
    #[default]
    Default,
    /// Drag to pan the view.
    Scroll,
    /// Drag a rectangle to zoom to.
    Zoom,
    /// Ghost items follow the pointer and are added on release.
    Place,
}

/// Undo stack flags observed before a change, to emit only what changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StackState {
    clean: bool,
    can_undo: bool,
    can_redo: bool,
}

/// Interactive editing over a [`Scene`].
///
/// All state changes that should be undoable go through commands pushed on
/// the editor's [`UndoStack`]. Observers subscribe to [`EditorEvent`]s.
#[derive(Debug)]
pub struct Editor {
    config: EditorConfig,
    scene: Scene,
    view: ViewTransform,
    undo_stack: UndoStack,
    /// Selected item ids in selection order.
    selection: Vec<ItemId>,
    mode: EditorMode,
    /// Ghost items shown in place mode. Not part of the scene.
    place_items: Vec<Item>,
    clipboard: Vec<Item>,
    clipboard_links: Connections,
    consecutive_pastes: usize,
    focus_item: Option<ItemId>,
    gesture: mouse::Gesture,
    /// Last pointer position in scene coordinates.
    cursor_scene_pos: Point,
    /// Scene position of the last press, used by point insertion and removal.
    press_scene_pos: Point,
    signals: Signals,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        let mut scene = Scene::with_rect(config.scene_rect);
        scene.set_background(config.background);
        Self {
            undo_stack: UndoStack::new(config.undo_limit),
            config,
            scene,
            view: ViewTransform::new(),
            selection: Vec::new(),
            mode: EditorMode::Default,
            place_items: Vec::new(),
            clipboard: Vec::new(),
            clipboard_links: Connections::new(),
            consecutive_pastes: 0,
            focus_item: None,
            gesture: mouse::Gesture::default(),
            cursor_scene_pos: Point::ZERO,
            press_scene_pos: Point::ZERO,
            signals: Signals::new(),
        }
    }

    // Accessors

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn undo_stack(&self) -> &UndoStack {
        &self.undo_stack
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn grid(&self) -> f64 {
        self.config.grid
    }

    pub fn set_grid(&mut self, grid: f64) {
        if grid.is_finite() {
            self.config.grid = grid;
        }
    }

    pub fn round_to_grid(&self, point: Point) -> Point {
        snap_point(point, self.config.grid)
    }

    pub fn undo_limit(&self) -> usize {
        self.undo_stack.limit()
    }

    pub fn set_undo_limit(&mut self, limit: usize) {
        let before = self.stack_state();
        self.config.undo_limit = limit.max(1);
        self.undo_stack
            .set_limit(limit, self.scene.connections_mut());
        self.emit_stack_changes(before);
    }

    pub fn item_selection_mode(&self) -> ItemSelectionMode {
        self.config.item_selection_mode
    }

    pub fn set_item_selection_mode(&mut self, mode: ItemSelectionMode) {
        self.config.item_selection_mode = mode;
    }

    pub fn set_undoable_select_commands(&mut self, undoable: bool) {
        self.config.undoable_select_commands = undoable;
    }

    pub fn set_sends_mouse_move_info(&mut self, sends: bool) {
        self.config.sends_mouse_move_info = sends;
    }

    pub fn set_scene_rect(&mut self, rect: Rect) {
        self.config.scene_rect = rect;
        self.scene.set_scene_rect(rect);
    }

    pub fn set_background(&mut self, color: StyleColor) {
        self.config.background = color;
        self.scene.set_background(color);
    }

    /// Selected item ids in selection order.
    pub fn selection(&self) -> &[ItemId] {
        &self.selection
    }

    pub fn selected_items(&self) -> Vec<&Item> {
        self.selection
            .iter()
            .filter_map(|id| self.scene.item(*id))
            .collect()
    }

    /// Items following the pointer in place mode.
    pub fn place_items(&self) -> &[Item] {
        &self.place_items
    }

    pub fn clipboard(&self) -> &[Item] {
        &self.clipboard
    }

    pub fn focus_item(&self) -> Option<ItemId> {
        self.focus_item
    }

    /// Item under the pointer when the current gesture started.
    pub fn mouse_down_item(&self) -> Option<ItemId> {
        self.gesture.mouse_down_item
    }

    pub fn mouse_state(&self) -> MouseState {
        self.gesture.state
    }

    /// Rubber band of the current gesture in viewport pixels.
    pub fn rubber_band_rect(&self) -> Option<Rect> {
        self.gesture.rubber_band
    }

    pub fn cursor_scene_pos(&self) -> Point {
        self.cursor_scene_pos
    }

    /// Mean scene center of the selected items.
    pub fn selection_center(&self) -> Point {
        let items = self.selected_items();
        if items.is_empty() {
            return Point::ZERO;
        }
        let sum = items
            .iter()
            .fold(kurbo::Vec2::ZERO, |acc, item| acc + item.scene_center().to_vec2());
        (sum / items.len() as f64).to_point()
    }

    // Signals

    pub fn subscribe(&mut self, callback: impl FnMut(&EditorEvent) + 'static) -> SubscriberId {
        self.signals.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.signals.unsubscribe(id)
    }

    fn emit(&mut self, event: EditorEvent) {
        self.signals.emit(&event);
    }

    fn stack_state(&self) -> StackState {
        StackState {
            clean: self.undo_stack.is_clean(),
            can_undo: self.undo_stack.can_undo(),
            can_redo: self.undo_stack.can_redo(),
        }
    }

    fn emit_stack_changes(&mut self, before: StackState) {
        let after = self.stack_state();
        if after.clean != before.clean {
            self.emit(EditorEvent::CleanChanged(after.clean));
        }
        if after.can_undo != before.can_undo {
            self.emit(EditorEvent::CanUndoChanged(after.can_undo));
        }
        if after.can_redo != before.can_redo {
            self.emit(EditorEvent::CanRedoChanged(after.can_redo));
        }
    }

    // Undo

    /// Execute a command and record it on the undo stack.
    pub fn push_command(&mut self, command: UndoCommand) {
        let before = self.stack_state();
        let mut events = Vec::new();
        let mut ctx = CommandContext {
            scene: &mut self.scene,
            selection: &mut self.selection,
            events: &mut events,
        };
        self.undo_stack.push(command, &mut ctx);
        self.signals.emit_all(events);
        self.emit_stack_changes(before);
    }

    /// Build a command against the live scene, revert it, then push it.
    ///
    /// Events raised while building are dropped; pushing raises them again.
    fn build_and_push<F>(&mut self, final_step: bool, build: F) -> bool
    where
        F: FnOnce(&mut Linker, &mut CommandContext<'_>) -> Option<UndoCommand>,
    {
        let mut scratch = Vec::new();
        let mut linker = Linker::new(self.config.grid, final_step);
        let mut ctx = CommandContext {
            scene: &mut self.scene,
            selection: &mut self.selection,
            events: &mut scratch,
        };
        let Some(mut command) = build(&mut linker, &mut ctx) else {
            return false;
        };
        command.undo(&mut ctx);
        self.push_command(command);
        true
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.undo_stack.can_redo()
    }

    pub fn undo_text(&self) -> Option<&str> {
        self.undo_stack.undo_text()
    }

    pub fn redo_text(&self) -> Option<&str> {
        self.undo_stack.redo_text()
    }

    pub fn is_clean(&self) -> bool {
        self.undo_stack.is_clean()
    }

    pub fn set_clean(&mut self) {
        let before = self.stack_state();
        self.undo_stack.set_clean();
        self.emit_stack_changes(before);
    }

    /// Undo the last command. Only honoured in default mode.
    pub fn undo(&mut self) -> bool {
        self.step_history(true)
    }

    /// Redo the next command. Only honoured in default mode.
    pub fn redo(&mut self) -> bool {
        self.step_history(false)
    }

    fn step_history(&mut self, backwards: bool) -> bool {
        let possible = if backwards {
            self.undo_stack.can_undo()
        } else {
            self.undo_stack.can_redo()
        };
        if self.mode != EditorMode::Default || !possible {
            return false;
        }
        if !self.config.undoable_select_commands {
            self.set_selection_direct(&[]);
        }
        let before = self.stack_state();
        let mut events = Vec::new();
        let mut ctx = CommandContext {
            scene: &mut self.scene,
            selection: &mut self.selection,
            events: &mut events,
        };
        let done = if backwards {
            self.undo_stack.undo(&mut ctx)
        } else {
            self.undo_stack.redo(&mut ctx)
        };
        self.signals.emit_all(events);
        self.emit_stack_changes(before);
        done
    }

    /// Empty the scene, the undo stack, the selection and any gesture.
    pub fn clear_items(&mut self) {
        let before = self.stack_state();
        self.undo_stack.clear(self.scene.connections_mut());
        self.scene.clear_items();
        self.selection.clear();
        self.focus_item = None;
        self.gesture = mouse::Gesture::default();
        self.consecutive_pastes = 0;
        self.emit(EditorEvent::NumberOfItemsChanged(0));
        self.emit(EditorEvent::SelectionChanged(Vec::new()));
        self.emit_stack_changes(before);
    }

    // Selection

    /// Replace the selection without recording a command.
    fn set_selection_direct(&mut self, ids: &[ItemId]) {
        let mut events = Vec::new();
        let mut ctx = CommandContext {
            scene: &mut self.scene,
            selection: &mut self.selection,
            events: &mut events,
        };
        ctx.set_selection(ids);
        self.signals.emit_all(events);
    }

    /// Change the selection, as a command when selection is undoable.
    fn select_items_command(&mut self, ids: Vec<ItemId>, final_select: bool) {
        if self.config.undoable_select_commands {
            let before = self.selection.clone();
            self.push_command(UndoCommand::select(before, ids, final_select));
        } else {
            self.set_selection_direct(&ids);
        }
    }

    // Modes

    pub fn set_default_mode(&mut self) {
        self.enter_mode(EditorMode::Default);
    }

    pub fn set_scroll_mode(&mut self) {
        self.enter_mode(EditorMode::Scroll);
    }

    pub fn set_zoom_mode(&mut self) {
        self.enter_mode(EditorMode::Zoom);
    }

    fn enter_mode(&mut self, mode: EditorMode) {
        self.gesture = mouse::Gesture::default();
        if !self.place_items.is_empty() {
            self.place_items.clear();
            self.emit(EditorEvent::NewItemsChanged(0));
        }
        self.set_selection_direct(&[]);
        self.set_mode(mode);
    }

    fn set_mode(&mut self, mode: EditorMode) {
        if self.mode != mode {
            log::debug!("Editor mode {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
        self.emit(EditorEvent::ModeChanged(mode));
    }

    /// Enter place mode with `items` following the pointer. An empty list
    /// returns to default mode.
    pub fn set_place_mode(&mut self, items: Vec<Item>) {
        if items.is_empty() {
            self.set_default_mode();
            return;
        }
        self.gesture = mouse::Gesture::default();
        self.set_selection_direct(&[]);
        self.place_items = items;
        self.center_place_items(self.cursor_scene_pos);
        self.emit(EditorEvent::NewItemsChanged(self.place_items.len()));
        self.set_mode(EditorMode::Place);
    }

    /// Shift ghosts so their mean center lands on the grid near `scene_pos`.
    fn center_place_items(&mut self, scene_pos: Point) {
        if self.place_items.is_empty() {
            return;
        }
        let sum = self
            .place_items
            .iter()
            .fold(kurbo::Vec2::ZERO, |acc, item| acc + item.scene_center().to_vec2());
        let center = (sum / self.place_items.len() as f64).to_point();
        let delta = crate::snap::snap_vec(scene_pos - center, self.config.grid);
        for item in &mut self.place_items {
            item.set_position(item.position() + delta);
        }
    }

    // View

    pub fn scale(&self) -> f64 {
        self.view.scale
    }

    pub fn map_to_scene(&self, viewport_point: Point) -> Point {
        self.view.map_to_scene(viewport_point)
    }

    pub fn map_from_scene(&self, scene_point: Point) -> Point {
        self.view.map_from_scene(scene_point)
    }

    pub fn set_viewport_size(&mut self, size: Size) {
        self.view.set_viewport(size);
    }

    pub fn zoom_in(&mut self) {
        if self.view.zoom_in() {
            self.emit(EditorEvent::ScaleChanged(self.view.scale));
        }
    }

    pub fn zoom_out(&mut self) {
        if self.view.zoom_out() {
            self.emit(EditorEvent::ScaleChanged(self.view.scale));
        }
    }

    /// Fit the whole scene rectangle into the viewport.
    pub fn zoom_fit(&mut self) {
        self.zoom_to_rect(self.scene.scene_rect());
    }

    pub fn zoom_to_rect(&mut self, scene_rect: Rect) {
        let old_scale = self.view.scale;
        self.view.zoom_to_rect(scene_rect);
        if (self.view.scale - old_scale).abs() > f64::EPSILON {
            self.emit(EditorEvent::ScaleChanged(self.view.scale));
        }
    }

    pub fn center_on(&mut self, scene_point: Point) {
        self.view.center_on(scene_point);
    }
}
