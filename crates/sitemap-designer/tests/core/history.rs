use sitemap_core::Point;
use sitemap_designer::{
    BuilderSession, CommandHistory, DuplicationOptions, Element, ElementShape, IdSource, KeyEvent,
    PointerEvent, Scene, SceneCommand, ToolbarAction,
};

fn element(scene: &mut Scene, x: f64) -> Element {
    let id = scene.next_id();
    Element::new(id, "rectangle", ElementShape::Rectangle, Point::new(x, 0.0), 10.0, 10.0).unwrap()
}

#[test]
fn test_execute_undo_redo_cycle() {
    let mut scene = Scene::default();
    let mut history = CommandHistory::new(10);
    let a = element(&mut scene, 0.0);
    let id = a.id;

    history.execute(SceneCommand::add(vec![a]), &mut scene);
    assert!(scene.contains(id));
    assert_eq!(history.undo_name(), Some("Add Elements"));

    history.undo(&mut scene);
    assert!(!scene.contains(id));
    assert_eq!(history.redo_name(), Some("Add Elements"));

    history.redo(&mut scene);
    assert!(scene.contains(id));
    assert!(!history.can_redo());
}

#[test]
fn test_new_entry_clears_redo() {
    let mut scene = Scene::default();
    let mut history = CommandHistory::default();
    let a = element(&mut scene, 0.0);
    let b = element(&mut scene, 20.0);

    history.execute(SceneCommand::add(vec![a]), &mut scene);
    history.undo(&mut scene);
    assert!(history.can_redo());
    history.execute(SceneCommand::add(vec![b]), &mut scene);
    assert!(!history.can_redo());
}

#[test]
fn test_depth_is_bounded() {
    let mut scene = Scene::default();
    let mut history = CommandHistory::new(3);
    for i in 0..5 {
        let e = element(&mut scene, i as f64 * 20.0);
        history.execute(SceneCommand::add(vec![e]), &mut scene);
    }
    assert_eq!(history.undo_depth(), 3);
    while history.undo(&mut scene).is_some() {}
    assert_eq!(scene.len(), 2);
}

#[test]
fn test_remove_undo_restores_draw_order() {
    let mut scene = Scene::default();
    let mut history = CommandHistory::default();
    let ids: Vec<u64> = (0..4)
        .map(|i| {
            let e = element(&mut scene, i as f64 * 20.0);
            scene.insert(e).unwrap()
        })
        .collect();
    let order = scene.ids();

    let command = SceneCommand::remove(&scene, &[ids[2], ids[0]]);
    history.execute(command, &mut scene);
    assert_eq!(scene.ids(), vec![ids[1], ids[3]]);

    history.undo(&mut scene);
    assert_eq!(scene.ids(), order);
}

#[test]
fn test_update_command_swaps_values() {
    let mut scene = Scene::default();
    let a = element(&mut scene, 0.0);
    let id = scene.insert(a.clone()).unwrap();
    let mut moved = a.clone();
    moved.translate(100.0, 0.0);

    let command = SceneCommand::update(vec![a], vec![moved]);
    command.apply(&mut scene);
    assert_eq!(scene.get(id).unwrap().x, 100.0);
    command.undo(&mut scene);
    assert_eq!(scene.get(id).unwrap().x, 0.0);
    assert_eq!(command.affected_ids(), vec![id]);
}

#[test]
fn test_one_entry_per_gesture() {
    let mut session = BuilderSession::default();
    session.set_snapping(false);
    let id = session.insert_template("bar", Point::new(0.0, 0.0)).unwrap();
    let depth = session.history().undo_depth();

    session.handle_pointer(PointerEvent::down(10.0, 10.0));
    for step in 1..=10 {
        session.handle_pointer(PointerEvent::moved(10.0 + step as f64 * 5.0, 10.0));
    }
    session.handle_pointer(PointerEvent::up(60.0, 10.0));
    assert_eq!(session.scene().get(id).unwrap().x, 50.0);
    assert_eq!(session.history().undo_depth(), depth + 1);

    assert!(session.handle_key(KeyEvent::ctrl('z')));
    assert_eq!(session.scene().get(id).unwrap().x, 0.0);
}

#[test]
fn test_array_duplication_is_one_entry() {
    let mut session = BuilderSession::default();
    session.insert_template("food-stall", Point::new(0.0, 0.0)).unwrap();
    let outcome = session.execute(ToolbarAction::Duplicate(DuplicationOptions::grid(3, 3, 60.0)));
    assert_eq!(outcome.affected().len(), 9);
    assert_eq!(session.scene().len(), 10);

    assert!(session.undo());
    assert_eq!(session.scene().len(), 1);
    assert!(session.redo());
    assert_eq!(session.scene().len(), 10);
}
