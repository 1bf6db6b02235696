//! Round-trip laws and invariants that hold after every editor call.

use diagrammatic_core::{
    Editor, EditorConfig, EditorEvent, Item, ItemId, PointRef,
};
use kurbo::{Affine, Point, Rect, Vec2};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
struct ItemState {
    id: ItemId,
    position: Point,
    transform: Affine,
    points: Vec<Point>,
    visible: bool,
    selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct Snapshot {
    items: Vec<ItemState>,
    edges: Vec<(PointRef, PointRef)>,
    selection: Vec<ItemId>,
}

fn snapshot(editor: &Editor) -> Snapshot {
    Snapshot {
        items: editor
            .scene()
            .items()
            .map(|item| ItemState {
                id: item.id(),
                position: item.position(),
                transform: item.transform(),
                points: item.points().iter().map(|p| p.position()).collect(),
                visible: item.is_visible(),
                selected: item.is_selected(),
            })
            .collect(),
        edges: editor.scene().connections().edges(),
        selection: editor.selection().to_vec(),
    }
}

fn assert_invariants(editor: &Editor) {
    let scene = editor.scene();
    assert!(scene.is_consistent(), "peer relation is inconsistent");
    for id in editor.selection() {
        let item = scene.item(*id).expect("selected item is in the scene");
        assert!(item.is_visible());
        assert!(item.is_selected());
    }
    let flagged = scene.items().filter(|item| item.is_selected()).count();
    assert_eq!(flagged, editor.selection().len());
}

/// Two lines joined end to end plus a polyline, all selected.
fn fixture() -> (Editor, Vec<ItemId>) {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut editor = Editor::new(EditorConfig {
        grid: 10.0,
        ..EditorConfig::default()
    });
    let a = Item::new_line(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
    let b = Item::new_line(Point::new(100.0, 0.0), Point::new(100.0, 100.0));
    let c = Item::new_polyline(vec![
        Point::new(200.0, 0.0),
        Point::new(300.0, 0.0),
        Point::new(300.0, 100.0),
    ]);
    let ids = vec![a.id(), b.id(), c.id()];
    for item in [a, b, c] {
        assert!(editor.add_items(vec![item], true));
    }
    assert_eq!(editor.scene().connections().len(), 1);
    (editor, ids)
}

fn check_round_trip(mut op: impl FnMut(&mut Editor) -> bool) {
    let (mut editor, _) = fixture();
    editor.select_all();
    assert!(op(&mut editor), "operation made no change");
    assert_invariants(&editor);
    let after = snapshot(&editor);
    assert!(editor.undo());
    assert_invariants(&editor);
    assert!(editor.redo());
    assert_invariants(&editor);
    assert_eq!(snapshot(&editor), after);
}

#[test]
fn undo_redo_symmetry_for_every_command() {
    check_round_trip(|e| e.add_items(vec![Item::new_rect(Rect::new(0.0, 200.0, 50.0, 250.0))], true));
    check_round_trip(|e| {
        e.add_items(
            vec![
                Item::new_arc(Point::new(0.0, 300.0), Point::new(100.0, 400.0)),
                Item::new_text_ellipse(Rect::new(200.0, 300.0, 400.0, 400.0), "Label"),
            ],
            true,
        )
    });
    check_round_trip(|e| {
        let id = e.selection()[1];
        e.remove_items(vec![id])
    });
    check_round_trip(|e| e.move_selection(Vec2::new(30.0, 10.0)));
    check_round_trip(|e| {
        let id = e.selection()[0];
        let point = e.scene().item(id).unwrap().point_ref(2).unwrap();
        e.resize_item(point, Point::new(120.0, 40.0), true, true)
    });
    check_round_trip(Editor::rotate_selection);
    check_round_trip(Editor::rotate_back_selection);
    check_round_trip(Editor::flip_selection_horizontal);
    check_round_trip(Editor::flip_selection_vertical);
    check_round_trip(|e| {
        let id = e.selection()[2];
        e.select_items(vec![id]);
        e.send_to_back()
    });
    check_round_trip(|e| {
        e.select_none();
        true
    });
    check_round_trip(|e| {
        let id = e.selection()[0];
        e.set_items_visible(vec![id], false)
    });
    check_round_trip(|e| {
        let id = e.selection()[2];
        e.select_items(vec![id]);
        e.insert_item_point_at(Point::new(250.0, 0.0))
    });
    check_round_trip(|e| {
        let id = e.selection()[2];
        e.select_items(vec![id]);
        e.remove_item_point_at(Point::new(300.0, 0.0))
    });
    check_round_trip(|e| {
        let ids = e.selection().to_vec();
        let a = e.scene().item(ids[0]).unwrap().point_ref(0).unwrap();
        let c = e.scene().item(ids[2]).unwrap().point_ref(0).unwrap();
        e.connect_points(a, c)
    });
    check_round_trip(|e| {
        let edges = e.scene().connections().edges();
        let (a, b) = edges[0];
        e.disconnect_points(a, b)
    });
    check_round_trip(Editor::group_selection);
    check_round_trip(Editor::delete_selection);
    check_round_trip(|e| e.copy_selection() && e.paste());
}

#[test]
fn four_rotations_are_identity() {
    let (mut editor, ids) = fixture();
    editor.select_all();
    let before = snapshot(&editor);
    for _ in 0..4 {
        assert!(editor.rotate_selection());
    }
    let after = snapshot(&editor);
    for (was, now) in before.items.iter().zip(&after.items) {
        assert!((was.position - now.position).hypot() < 1e-9);
        assert_eq!(was.transform, now.transform);
    }
    assert_eq!(before.edges, after.edges);
    assert_eq!(editor.selection(), ids.as_slice());
}

#[test]
fn double_flips_are_identity() {
    let (mut editor, _) = fixture();
    editor.select_all();
    let before = snapshot(&editor);
    editor.flip_selection_horizontal();
    editor.flip_selection_horizontal();
    assert_eq!(snapshot(&editor), before);
    editor.flip_selection_vertical();
    editor.flip_selection_vertical();
    assert_eq!(snapshot(&editor), before);
}

#[test]
fn copy_is_deep_and_detached() {
    let (editor, ids) = fixture();
    let original = editor.scene().item(ids[0]).unwrap();
    let copy = original.copy();
    assert_ne!(copy.id(), original.id());
    assert_eq!(copy.bounding_rect(), original.bounding_rect());
    assert_eq!(copy.pen_width(), original.pen_width());
    assert_eq!(copy.style().len(), original.style().len());
    assert_eq!(copy.points().len(), original.points().len());
    for (a, b) in copy.points().iter().zip(original.points()) {
        assert_ne!(a.id(), b.id());
        assert_eq!(a.position(), b.position());
    }
    assert!(!copy.is_selected());
    let copy_end = copy.point_ref(2).unwrap();
    assert!(!editor.scene().connections().has_peers(copy_end));
}

#[test]
fn clean_state_tracks_history() {
    let (mut editor, ids) = fixture();
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    editor.subscribe(move |event| {
        if let EditorEvent::CleanChanged(clean) = event {
            sink.borrow_mut().push(*clean);
        }
    });

    editor.set_clean();
    assert!(editor.is_clean());
    editor.move_items(vec![ids[2]], vec![Point::new(200.0, 50.0)], false);
    assert!(!editor.is_clean());
    editor.undo();
    assert!(editor.is_clean());
    editor.undo();
    assert!(!editor.is_clean());
    editor.redo();
    assert!(editor.is_clean());
    assert_eq!(*log.borrow(), vec![true, false, true, false, true]);
}

#[test]
fn invariants_hold_through_a_session() {
    let (mut editor, ids) = fixture();
    editor.select_all();
    assert_invariants(&editor);
    editor.move_selection(Vec2::new(10.0, 10.0));
    assert_invariants(&editor);
    editor.select_items(vec![ids[0]]);
    editor.move_selection(Vec2::new(0.0, 50.0));
    assert_invariants(&editor);
    assert!(editor.scene().connections().len() <= 1);
    editor.set_items_visible(vec![ids[1]], false);
    assert_invariants(&editor);
    editor.select_all();
    editor.group_selection();
    assert_invariants(&editor);
    editor.ungroup_selection();
    assert_invariants(&editor);
    while editor.undo() {
        assert_invariants(&editor);
    }
    assert!(editor.scene().is_empty());
    while editor.redo() {
        assert_invariants(&editor);
    }
    editor.clear_items();
    assert_invariants(&editor);
    assert!(editor.scene().connections().is_empty());
}
