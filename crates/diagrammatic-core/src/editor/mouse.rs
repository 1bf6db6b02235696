//! Pointer, wheel and keyboard handling.

use super::{Editor, EditorMode};
use crate::connections::PointRef;
use crate::input::{Key, KeyEvent, MouseButton, MouseEvent, WheelEvent};
use crate::item::{ItemFlags, ItemId};
use crate::signals::EditorEvent;
use crate::snap::snap_point;
use crate::undo::{CommandContext, CommandKind};
use crate::view::ZOOM_STEP;
use kurbo::{Point, Rect, Vec2};

/// What the current left-button gesture does in default mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseState {
    #[default]
    Ready,
    /// Selection toggled on press; dragging does nothing.
    Select,
    MoveItems,
    ResizeItem,
    RubberBand,
}

/// State kept between a press and its release.
#[derive(Debug, Clone, Default)]
pub(super) struct Gesture {
    pub(super) state: MouseState,
    pub(super) button: Option<MouseButton>,
    down_pos: Point,
    down_scene: Point,
    dragged: bool,
    pub(super) mouse_down_item: Option<ItemId>,
    selected_point: Option<PointRef>,
    /// Scene position of the selected point at press.
    point_start: Point,
    initial_positions: Vec<(ItemId, Point)>,
    /// Viewport rectangle of the rubber band.
    pub(super) rubber_band: Option<Rect>,
    /// Selection kept under an additive rubber band.
    base_selection: Vec<ItemId>,
    start_offset: Vec2,
    place_dragging: bool,
}

impl Gesture {
    fn is_active(&self) -> bool {
        self.button.is_some()
    }
}

/// Text for a value without a negative zero.
fn coord(value: f64) -> f64 {
    value + 0.0
}

fn point_info(point: Point) -> String {
    format!("({},{})", coord(point.x), coord(point.y))
}

fn drag_info(from: Point, to: Point) -> String {
    let delta = to - from;
    format!(
        "{} - {}  \u{0394} = ({},{})",
        point_info(from),
        point_info(to),
        coord(delta.x),
        coord(delta.y)
    )
}

impl Editor {
    pub fn mouse_press(&mut self, event: &MouseEvent) {
        let scene_pos = self.view.map_to_scene(event.position);
        self.cursor_scene_pos = scene_pos;
        self.press_scene_pos = scene_pos;
        self.gesture = Gesture {
            button: Some(event.button),
            down_pos: event.position,
            down_scene: scene_pos,
            start_offset: self.view.offset,
            ..Gesture::default()
        };
        if event.button != MouseButton::Left {
            return;
        }

        match self.mode {
            EditorMode::Default => self.press_default(event, scene_pos),
            EditorMode::Zoom => {
                self.gesture.state = MouseState::RubberBand;
                self.gesture.rubber_band = Some(Rect::from_points(event.position, event.position));
            }
            EditorMode::Scroll => {}
            EditorMode::Place => {
                self.gesture.place_dragging = self.place_items.len() == 1
                    && self.place_items[0].has_flags(ItemFlags::PLACE_BY_MOUSE_PRESS_AND_RELEASE);
            }
        }
    }

    fn press_default(&mut self, event: &MouseEvent, scene_pos: Point) {
        let tolerance = self.config.point_hit_tolerance / self.view.scale;

        if let &[only] = self.selection.as_slice() {
            let hit = self.scene.item(only).and_then(|item| {
                if !item.has_flags(ItemFlags::CAN_RESIZE) {
                    return None;
                }
                let index = item.point_at(scene_pos, tolerance)?;
                let point = item.point(index)?;
                if !point.is_control() {
                    return None;
                }
                Some((item.point_ref(index)?, item.point_scene_position(index)?))
            });
            if let Some((point, start)) = hit {
                self.gesture.state = MouseState::ResizeItem;
                self.gesture.selected_point = Some(point);
                self.gesture.point_start = start;
                self.gesture.mouse_down_item = Some(only);
                self.focus_item = Some(only);
                return;
            }
        }

        let Some(hit) = self.item_under(scene_pos, tolerance) else {
            self.gesture.state = MouseState::RubberBand;
            self.gesture.rubber_band = Some(Rect::from_points(event.position, event.position));
            if event.modifiers.is_additive() {
                self.gesture.base_selection = self.selection.clone();
            } else if !self.selection.is_empty() {
                self.select_items_command(Vec::new(), false);
            }
            return;
        };

        self.gesture.mouse_down_item = Some(hit);
        self.focus_item = Some(hit);
        if event.modifiers.is_additive() {
            let mut ids = self.selection.clone();
            match ids.iter().position(|id| *id == hit) {
                Some(index) => {
                    ids.remove(index);
                }
                None => ids.push(hit),
            }
            self.select_items_command(ids, true);
            self.gesture.state = MouseState::Select;
            return;
        }
        if !self.selection.contains(&hit) {
            self.select_items_command(vec![hit], true);
        }
        self.gesture.state = MouseState::MoveItems;
        self.gesture.initial_positions = self
            .selection
            .iter()
            .filter_map(|id| self.scene.item(*id))
            .filter(|item| item.has_flags(ItemFlags::CAN_MOVE))
            .map(|item| (item.id(), item.position()))
            .collect();
    }

    /// Topmost visible item at `scene_pos`, selected items first.
    fn item_under(&self, scene_pos: Point, tolerance: f64) -> Option<ItemId> {
        let mut hits = self
            .scene
            .items()
            .rev()
            .filter(|item| item.is_visible() && item.contains(scene_pos, tolerance));
        let first = hits.next()?;
        if first.is_selected() {
            return Some(first.id());
        }
        hits.find(|item| item.is_selected())
            .map(|item| item.id())
            .or(Some(first.id()))
    }

    pub fn mouse_move(&mut self, event: &MouseEvent) {
        let scene_pos = self.view.map_to_scene(event.position);
        self.cursor_scene_pos = scene_pos;

        if self.gesture.button != Some(MouseButton::Left) {
            if self.mode == EditorMode::Place {
                self.center_place_items(scene_pos);
            }
            if self.config.sends_mouse_move_info {
                let info = point_info(self.round_to_grid(scene_pos));
                self.emit(EditorEvent::MouseInfoChanged(info));
            }
            return;
        }

        if !self.gesture.dragged {
            let distance = event.position - self.gesture.down_pos;
            if distance.x.abs() + distance.y.abs() < self.config.drag_threshold {
                return;
            }
            self.gesture.dragged = true;
        }

        match self.mode {
            EditorMode::Default => match self.gesture.state {
                MouseState::MoveItems => self.move_gesture(scene_pos, false),
                MouseState::ResizeItem => self.resize_gesture(scene_pos, false),
                MouseState::RubberBand => {
                    self.gesture.rubber_band = Some(Rect::from_points(self.gesture.down_pos, event.position));
                    self.rubber_band_select();
                }
                MouseState::Ready | MouseState::Select => {}
            },
            EditorMode::Scroll => {
                self.view.offset = self.gesture.start_offset + (event.position - self.gesture.down_pos);
            }
            EditorMode::Zoom => {
                self.gesture.rubber_band = Some(Rect::from_points(self.gesture.down_pos, event.position));
            }
            EditorMode::Place => {
                if self.gesture.place_dragging {
                    let target = self.round_to_grid(scene_pos);
                    if let Some(item) = self.place_items.first_mut() {
                        item.place_drag(target);
                    }
                }
            }
        }

        if self.config.sends_mouse_move_info {
            let info = self.drag_info(scene_pos);
            self.emit(EditorEvent::MouseInfoChanged(info));
        }
    }

    fn drag_info(&self, scene_pos: Point) -> String {
        match (self.mode, self.gesture.state) {
            (EditorMode::Default, MouseState::RubberBand) | (EditorMode::Zoom, _) => {
                let band = self
                    .gesture
                    .rubber_band
                    .map(|rect| self.view.map_rect_to_scene(rect))
                    .unwrap_or_default();
                drag_info(band.origin(), Point::new(band.x1, band.y1))
            }
            (EditorMode::Default, MouseState::ResizeItem) => {
                drag_info(self.gesture.point_start, self.round_to_grid(scene_pos))
            }
            _ => drag_info(
                self.round_to_grid(self.gesture.down_scene),
                self.round_to_grid(scene_pos),
            ),
        }
    }

    fn move_gesture(&mut self, scene_pos: Point, final_move: bool) {
        let grid = self.config.grid;
        let delta = snap_point(scene_pos, grid) - snap_point(self.gesture.down_scene, grid);
        let (ids, after): (Vec<ItemId>, Vec<Point>) = self
            .gesture
            .initial_positions
            .iter()
            .map(|(id, start)| (*id, *start + delta))
            .unzip();
        if ids.is_empty() {
            return;
        }

        let unchanged = ids
            .iter()
            .zip(&after)
            .all(|(id, pos)| self.scene.item(*id).is_some_and(|item| item.position() == *pos));
        if final_move {
            if !self.top_is_open(CommandKind::MoveItems) && delta == Vec2::ZERO {
                return;
            }
        } else if unchanged {
            return;
        }

        self.build_and_push(final_move, |linker, ctx| Some(linker.build_move(ctx, ids, after, final_move)));
    }

    fn resize_gesture(&mut self, scene_pos: Point, final_resize: bool) {
        let Some(point) = self.gesture.selected_point else {
            return;
        };
        let target = self.round_to_grid(scene_pos);
        let current = self.scene.point_scene_position(point);
        if final_resize {
            if !self.top_is_open(CommandKind::ResizeItem) && current == Some(target) {
                return;
            }
        } else if current == Some(target) {
            return;
        }
        self.build_and_push(final_resize, |linker, ctx| {
            linker.build_resize(ctx, point, target, final_resize, true)
        });
    }

    fn rubber_band_select(&mut self) {
        let Some(band) = self.gesture.rubber_band else {
            return;
        };
        let region = self.view.map_rect_to_scene(band);
        let mut ids = self.gesture.base_selection.clone();
        for id in self.scene.items_in_rect(region, self.config.item_selection_mode) {
            let selectable = self
                .scene
                .item(id)
                .is_some_and(|item| item.has_flags(ItemFlags::CAN_SELECT));
            if selectable && !ids.contains(&id) {
                ids.push(id);
            }
        }
        if ids != self.selection {
            self.select_items_command(ids, false);
        }
    }

    pub(super) fn top_is_open(&self, kind: CommandKind) -> bool {
        self.undo_stack
            .top()
            .is_some_and(|top| top.kind() == kind && top.is_open())
    }

    pub fn mouse_release(&mut self, event: &MouseEvent) {
        let scene_pos = self.view.map_to_scene(event.position);
        self.cursor_scene_pos = scene_pos;

        match event.button {
            MouseButton::Right => {
                if self.mode != EditorMode::Default {
                    self.set_default_mode();
                }
            }
            MouseButton::Left if self.gesture.button == Some(MouseButton::Left) => match self.mode {
                EditorMode::Default => self.release_default(event),
                EditorMode::Zoom => {
                    if let Some(band) = self.gesture.rubber_band.filter(|_| self.gesture.dragged) {
                        let region = self.view.map_rect_to_scene(band);
                        self.zoom_to_rect(region);
                    }
                    self.set_default_mode();
                }
                EditorMode::Scroll => {}
                EditorMode::Place => self.release_place(),
            },
            _ => {}
        }

        self.gesture = Gesture::default();
        self.consecutive_pastes = 0;
        if self.config.sends_mouse_move_info {
            self.emit(EditorEvent::MouseInfoChanged(String::new()));
        }
    }

    fn release_default(&mut self, event: &MouseEvent) {
        let scene_pos = self.cursor_scene_pos;
        match self.gesture.state {
            MouseState::MoveItems if self.gesture.dragged => self.move_gesture(scene_pos, true),
            MouseState::MoveItems => {
                let clicked = self.gesture.mouse_down_item;
                if let Some(id) = clicked {
                    if self.selection.len() > 1 && event.modifiers.is_empty() {
                        self.select_items_command(vec![id], true);
                    }
                }
            }
            MouseState::ResizeItem if self.gesture.dragged => self.resize_gesture(scene_pos, true),
            MouseState::RubberBand => {
                if self.top_is_open(CommandKind::Select) {
                    self.select_items_command(self.selection.clone(), true);
                }
            }
            _ => {}
        }
    }

    fn release_place(&mut self) {
        let valid = match self.place_items.as_slice() {
            [] => false,
            [single] => single.is_valid(),
            _ => true,
        };
        let press_drag = self.gesture.place_dragging;

        if valid {
            let placed = std::mem::take(&mut self.place_items);
            self.place_items = placed
                .iter()
                .map(|item| {
                    let mut ghost = item.copy();
                    if press_drag {
                        ghost.reset_for_placement();
                    }
                    ghost
                })
                .collect();
            log::debug!("Placing {} item(s)", placed.len());
            self.build_and_push(true, |linker, ctx| Some(linker.build_add(ctx, placed, true)));
        } else if press_drag {
            for item in &mut self.place_items {
                item.reset_for_placement();
            }
        }
        self.center_place_items(self.cursor_scene_pos);
        self.emit(EditorEvent::NewItemsChanged(self.place_items.len()));
    }

    /// Double-click leaves Scroll and Zoom mode and otherwise acts as a press.
    pub fn mouse_double_click(&mut self, event: &MouseEvent) {
        match self.mode {
            EditorMode::Scroll | EditorMode::Zoom => self.set_default_mode(),
            EditorMode::Place => {}
            EditorMode::Default => self.mouse_press(event),
        }
    }

    /// Ctrl zooms about the pointer. Otherwise the wheel pans, horizontally
    /// while Shift is held.
    pub fn wheel(&mut self, event: &WheelEvent) {
        if event.modifiers.ctrl {
            let factor = if event.delta.y > 0.0 { ZOOM_STEP } else { 1.0 / ZOOM_STEP };
            if self.view.zoom_at(event.position, factor) {
                self.emit(EditorEvent::ScaleChanged(self.view.scale));
            }
            return;
        }
        let delta = if event.modifiers.shift {
            Vec2::new(event.delta.y, 0.0)
        } else {
            event.delta
        };
        self.view.pan(delta);
    }

    pub fn key_press(&mut self, event: &KeyEvent) {
        if event.key == Key::Escape {
            if self.mode != EditorMode::Default {
                self.set_default_mode();
            } else if self.gesture.is_active() {
                self.abandon_gesture();
            } else {
                self.select_none();
            }
            return;
        }
        self.forward_key(event);
    }

    pub fn key_release(&mut self, event: &KeyEvent) {
        self.forward_key(event);
    }

    fn forward_key(&mut self, event: &KeyEvent) {
        let Some(id) = self.focus_item else {
            return;
        };
        let consumed = self
            .scene
            .item_mut(id)
            .is_some_and(|item| item.key_event(event));
        if consumed {
            self.emit(EditorEvent::ItemsGeometryChanged(vec![id]));
        }
    }

    /// Undo whatever the running gesture has pushed so far.
    fn abandon_gesture(&mut self) {
        let before = self.stack_state();
        let mut events = Vec::new();
        let mut ctx = CommandContext {
            scene: &mut self.scene,
            selection: &mut self.selection,
            events: &mut events,
        };
        if self.undo_stack.abandon_open(&mut ctx) {
            log::debug!("Gesture cancelled");
        }
        self.signals.emit_all(events);
        self.emit_stack_changes(before);
        self.gesture = Gesture::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::input::Modifiers;
    use crate::item::Item;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn editor() -> Editor {
        Editor::new(EditorConfig {
            grid: 10.0,
            ..EditorConfig::default()
        })
    }

    fn add_rect(editor: &mut Editor, rect: Rect) -> ItemId {
        let item = Item::new_rect(rect);
        let id = item.id();
        editor.add_items(vec![item], false);
        id
    }

    fn drag(editor: &mut Editor, from: Point, to: Point) {
        editor.mouse_press(&MouseEvent::left(from));
        editor.mouse_move(&MouseEvent::left(to));
        editor.mouse_release(&MouseEvent::left(to));
    }

    #[test]
    fn test_press_selects_and_drag_moves() {
        let mut editor = editor();
        let id = add_rect(&mut editor, Rect::new(100.0, 100.0, 200.0, 200.0));
        drag(&mut editor, Point::new(150.0, 150.0), Point::new(182.0, 150.0));
        assert_eq!(editor.selection(), &[id]);
        assert_eq!(editor.scene().item(id).unwrap().position(), Point::new(130.0, 100.0));
        assert_eq!(editor.undo_text(), Some("Move Items"));
        assert!(!editor.undo_stack().top().unwrap().is_open());
    }

    #[test]
    fn test_small_motion_is_a_click() {
        let mut editor = editor();
        let id = add_rect(&mut editor, Rect::new(100.0, 100.0, 200.0, 200.0));
        drag(&mut editor, Point::new(150.0, 150.0), Point::new(151.0, 151.0));
        assert_eq!(editor.scene().item(id).unwrap().position(), Point::new(100.0, 100.0));
        assert_eq!(editor.undo_text(), Some("Select Items"));
    }

    #[test]
    fn test_additive_click_toggles() {
        let mut editor = editor();
        let a = add_rect(&mut editor, Rect::new(0.0, 0.0, 50.0, 50.0));
        let b = add_rect(&mut editor, Rect::new(100.0, 0.0, 150.0, 50.0));
        let shift = |p| MouseEvent::left(p).with_modifiers(Modifiers::SHIFT);
        editor.mouse_press(&shift(Point::new(25.0, 25.0)));
        editor.mouse_release(&shift(Point::new(25.0, 25.0)));
        editor.mouse_press(&shift(Point::new(125.0, 25.0)));
        editor.mouse_release(&shift(Point::new(125.0, 25.0)));
        assert_eq!(editor.selection(), &[a, b]);
        editor.mouse_press(&shift(Point::new(25.0, 25.0)));
        editor.mouse_release(&shift(Point::new(25.0, 25.0)));
        assert_eq!(editor.selection(), &[b]);
    }

    #[test]
    fn test_click_on_one_of_many_selects_it() {
        let mut editor = editor();
        let a = add_rect(&mut editor, Rect::new(0.0, 0.0, 50.0, 50.0));
        add_rect(&mut editor, Rect::new(100.0, 0.0, 150.0, 50.0));
        editor.select_all();
        assert_eq!(editor.selection().len(), 2);
        editor.mouse_press(&MouseEvent::left(Point::new(25.0, 25.0)));
        editor.mouse_release(&MouseEvent::left(Point::new(25.0, 25.0)));
        assert_eq!(editor.selection(), &[a]);
    }

    #[test]
    fn test_rubber_band_selects_contained() {
        let mut editor = editor();
        let a = add_rect(&mut editor, Rect::new(10.0, 10.0, 50.0, 50.0));
        add_rect(&mut editor, Rect::new(100.0, 100.0, 300.0, 300.0));
        drag(&mut editor, Point::new(0.0, 0.0), Point::new(80.0, 80.0));
        assert_eq!(editor.selection(), &[a]);
        assert!(!editor.undo_stack().top().unwrap().is_open());
        assert_eq!(editor.mouse_state(), MouseState::Ready);
    }

    #[test]
    fn test_resize_selected_point() {
        let mut editor = editor();
        let id = add_rect(&mut editor, Rect::new(0.0, 0.0, 100.0, 100.0));
        editor.select_all();
        // bottom-right corner
        drag(&mut editor, Point::new(100.0, 100.0), Point::new(141.0, 119.0));
        let item = editor.scene().item(id).unwrap();
        assert_eq!(item.point_scene_position(4), Some(Point::new(140.0, 120.0)));
        assert_eq!(editor.undo_text(), Some("Resize Item"));
        editor.undo();
        let item = editor.scene().item(id).unwrap();
        assert_eq!(item.point_scene_position(4), Some(Point::new(100.0, 100.0)));
    }

    #[test]
    fn test_escape_abandons_gesture() {
        let mut editor = editor();
        let id = add_rect(&mut editor, Rect::new(100.0, 100.0, 200.0, 200.0));
        editor.mouse_press(&MouseEvent::left(Point::new(150.0, 150.0)));
        editor.mouse_move(&MouseEvent::left(Point::new(200.0, 150.0)));
        assert_eq!(editor.scene().item(id).unwrap().position(), Point::new(150.0, 100.0));
        editor.key_press(&KeyEvent::pressed(Key::Escape));
        assert_eq!(editor.scene().item(id).unwrap().position(), Point::new(100.0, 100.0));
        assert_eq!(editor.mouse_state(), MouseState::Ready);
        editor.key_press(&KeyEvent::pressed(Key::Escape));
        assert!(editor.selection().is_empty());
    }

    #[test]
    fn test_mouse_info_texts() {
        let mut editor = editor();
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        editor.subscribe(move |event| {
            if let EditorEvent::MouseInfoChanged(text) = event {
                sink.borrow_mut().push(text.clone());
            }
        });
        editor.mouse_move(&MouseEvent::new(Point::new(-2.0, 21.0), MouseButton::Left, Modifiers::NONE));
        assert_eq!(log.borrow().last().map(String::as_str), Some("(0,20)"));
        editor.mouse_press(&MouseEvent::left(Point::new(0.0, 0.0)));
        editor.mouse_move(&MouseEvent::left(Point::new(30.0, 40.0)));
        assert_eq!(
            log.borrow().last().map(String::as_str),
            Some("(0,0) - (30,40)  \u{0394} = (30,40)")
        );
        editor.mouse_release(&MouseEvent::left(Point::new(30.0, 40.0)));
        assert_eq!(log.borrow().last().map(String::as_str), Some(""));
    }

    #[test]
    fn test_scroll_mode_pans() {
        let mut editor = editor();
        editor.set_scroll_mode();
        drag(&mut editor, Point::new(10.0, 10.0), Point::new(60.0, 30.0));
        assert_eq!(editor.view().offset, Vec2::new(50.0, 20.0));
        editor.mouse_release(&MouseEvent::new(Point::ZERO, MouseButton::Right, Modifiers::NONE));
        assert_eq!(editor.mode(), EditorMode::Default);

        editor.set_scroll_mode();
        editor.mouse_double_click(&MouseEvent::left(Point::ZERO));
        assert_eq!(editor.mode(), EditorMode::Default);
    }

    #[test]
    fn test_zoom_mode_band_zooms_and_returns() {
        let mut editor = editor();
        editor.set_viewport_size(kurbo::Size::new(400.0, 400.0));
        editor.view.reset();
        editor.set_zoom_mode();
        drag(&mut editor, Point::new(0.0, 0.0), Point::new(100.0, 100.0));
        assert!(editor.scale() > 3.0);
        assert_eq!(editor.mode(), EditorMode::Default);
    }

    #[test]
    fn test_wheel_zoom_and_pan() {
        let mut editor = editor();
        let ctrl = WheelEvent {
            position: Point::new(100.0, 100.0),
            delta: Vec2::new(0.0, 1.0),
            modifiers: Modifiers::CTRL,
        };
        editor.wheel(&ctrl);
        assert!((editor.scale() - ZOOM_STEP).abs() < 1e-12);
        assert!((editor.map_to_scene(Point::new(100.0, 100.0)) - Point::new(100.0, 100.0)).hypot() < 1e-9);

        let offset = editor.view().offset;
        editor.wheel(&WheelEvent {
            position: Point::ZERO,
            delta: Vec2::new(0.0, 15.0),
            modifiers: Modifiers::SHIFT,
        });
        assert_eq!(editor.view().offset, offset + Vec2::new(15.0, 0.0));
    }

    #[test]
    fn test_place_mode_click_places_copy() {
        let mut editor = editor();
        editor.set_place_mode(vec![Item::new_rect(Rect::new(-20.0, -20.0, 20.0, 20.0))]);
        editor.mouse_move(&MouseEvent::new(Point::new(200.0, 200.0), MouseButton::Left, Modifiers::NONE));
        editor.mouse_press(&MouseEvent::left(Point::new(200.0, 200.0)));
        editor.mouse_release(&MouseEvent::left(Point::new(200.0, 200.0)));
        assert_eq!(editor.scene().len(), 1);
        let placed = editor.scene().items().next().unwrap();
        assert_eq!(placed.scene_center(), Point::new(200.0, 200.0));
        assert_eq!(editor.place_items().len(), 1);
        assert_ne!(editor.place_items()[0].id(), placed.id());
        assert_eq!(editor.mode(), EditorMode::Place);

        editor.key_press(&KeyEvent::pressed(Key::Escape));
        assert_eq!(editor.mode(), EditorMode::Default);
        assert!(editor.place_items().is_empty());
    }

    #[test]
    fn test_place_mode_press_drag_draws_line() {
        let mut editor = editor();
        let mut line = Item::new_line(Point::ZERO, Point::ZERO);
        line.set_flags(line.flags() | ItemFlags::PLACE_BY_MOUSE_PRESS_AND_RELEASE);
        editor.set_place_mode(vec![line]);
        editor.mouse_move(&MouseEvent::new(Point::new(100.0, 100.0), MouseButton::Left, Modifiers::NONE));
        drag(&mut editor, Point::new(100.0, 100.0), Point::new(200.0, 150.0));
        assert_eq!(editor.scene().len(), 1);
        let placed = editor.scene().items().next().unwrap();
        assert_eq!(placed.point_scene_position(0), Some(Point::new(100.0, 100.0)));
        assert_eq!(placed.point_scene_position(2), Some(Point::new(200.0, 150.0)));
    }
}
