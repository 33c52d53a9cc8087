use sitemap_core::Point;
use sitemap_designer::{
    Bounds, BuilderSession, Element, ElementShape, IdSource, Modifiers, PointerEvent, Scene,
    Selection, Tool,
};

fn scene_with(rects: &[(f64, f64, f64, f64)]) -> (Scene, Vec<u64>) {
    let mut scene = Scene::default();
    let mut ids = Vec::new();
    for &(x, y, w, h) in rects {
        let id = scene.next_id();
        let element =
            Element::new(id, "rectangle", ElementShape::Rectangle, Point::new(x, y), w, h)
                .unwrap();
        ids.push(scene.insert(element).unwrap());
    }
    (scene, ids)
}

#[test]
fn test_set_dedups_and_reports_change() {
    let mut selection = Selection::new();
    assert!(selection.set([3, 1, 3]));
    assert_eq!(selection.ids(), &[3, 1]);
    assert_eq!(selection.primary(), Some(1));
    assert!(!selection.set([3, 1]));
    assert!(!Selection::new().clear());
}

#[test]
fn test_select_at_topmost() {
    let (scene, ids) = scene_with(&[(0.0, 0.0, 50.0, 50.0), (25.0, 25.0, 50.0, 50.0)]);
    let mut selection = Selection::new();
    selection.select_at(&scene, Point::new(30.0, 30.0));
    assert_eq!(selection.ids(), &[ids[1]]);
    selection.select_at(&scene, Point::new(300.0, 300.0));
    assert!(selection.is_empty());
}

#[test]
fn test_marquee_extend_and_replace() {
    let (scene, ids) = scene_with(&[
        (0.0, 0.0, 10.0, 10.0),
        (100.0, 0.0, 10.0, 10.0),
        (200.0, 0.0, 10.0, 10.0),
    ]);
    let mut selection = Selection::new();
    selection.select_only(ids[2]);

    selection.select_in_rect(&scene, &Bounds::new(-5.0, -5.0, 105.0, 5.0), true);
    assert_eq!(selection.len(), 3);

    selection.select_in_rect(&scene, &Bounds::new(-5.0, -5.0, 5.0, 5.0), false);
    assert_eq!(selection.ids(), &[ids[0]]);
}

#[test]
fn test_in_draw_order_skips_unknown() {
    let (scene, ids) = scene_with(&[(0.0, 0.0, 10.0, 10.0), (20.0, 0.0, 10.0, 10.0)]);
    let mut selection = Selection::new();
    selection.set([ids[1], 99, ids[0]]);
    assert_eq!(selection.in_draw_order(&scene), vec![ids[0], ids[1]]);
    assert!(selection.prune(&scene));
    assert_eq!(selection.len(), 2);
}

#[test]
fn test_session_click_shift_and_marquee() {
    let mut session = BuilderSession::default();
    session.set_snapping(false);
    let a = session.insert_template("food-stall", Point::new(0.0, 0.0)).unwrap();
    let b = session.insert_template("food-stall", Point::new(100.0, 0.0)).unwrap();
    session.set_tool(Tool::Select);

    session.handle_pointer(PointerEvent::down(10.0, 10.0));
    session.handle_pointer(PointerEvent::up(10.0, 10.0));
    assert_eq!(session.selection().ids(), &[a]);

    session.handle_pointer(PointerEvent::down(110.0, 10.0).with_modifiers(Modifiers::SHIFT));
    session.handle_pointer(PointerEvent::up(110.0, 10.0).with_modifiers(Modifiers::SHIFT));
    assert_eq!(session.selection().len(), 2);

    session.handle_pointer(PointerEvent::down(110.0, 10.0).with_modifiers(Modifiers::SHIFT));
    session.handle_pointer(PointerEvent::up(110.0, 10.0).with_modifiers(Modifiers::SHIFT));
    assert_eq!(session.selection().ids(), &[a]);

    // Marquee from empty space replaces the selection.
    session.handle_pointer(PointerEvent::down(90.0, 200.0));
    session.handle_pointer(PointerEvent::moved(150.0, 20.0));
    session.handle_pointer(PointerEvent::up(150.0, 20.0));
    assert_eq!(session.selection().ids(), &[b]);

    session.handle_pointer(PointerEvent::down(500.0, 500.0));
    session.handle_pointer(PointerEvent::up(500.0, 500.0));
    assert!(session.selection().is_empty());
}
