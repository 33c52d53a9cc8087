use sitemap_core::{ElementError, Point};
use sitemap_designer::{Bounds, Element, ElementShape, IdCounter, IdSource, Scene};

fn rect(scene: &mut Scene, x: f64, y: f64, w: f64, h: f64) -> u64 {
    let id = scene.next_id();
    let element = Element::new(id, "rectangle", ElementShape::Rectangle, Point::new(x, y), w, h)
        .unwrap();
    scene.insert(element).unwrap()
}

#[test]
fn test_scene_defaults() {
    let scene = Scene::default();
    assert!(scene.is_empty());
    assert!(scene.grid_enabled());
    assert!(scene.grid_size() > 0.0);
    assert_eq!(scene.peek_next_id(), 1);
}

#[test]
fn test_insert_and_draw_order() {
    let mut scene = Scene::new(500.0, 500.0);
    let a = rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
    let b = rect(&mut scene, 5.0, 5.0, 10.0, 10.0);
    assert_eq!(scene.ids(), vec![a, b]);
    assert_eq!(scene.index_of(b), Some(1));
    assert_eq!(scene.hit_test(Point::new(7.0, 7.0)), Some(b));
    assert_eq!(scene.hit_test(Point::new(2.0, 2.0)), Some(a));
    assert_eq!(scene.hit_test(Point::new(100.0, 100.0)), None);
}

#[test]
fn test_remove_keeps_counter() {
    let mut scene = Scene::default();
    let a = rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
    let (index, removed) = scene.remove(a).unwrap();
    assert_eq!(index, 0);
    assert_eq!(removed.id, a);
    assert!(scene.remove(a).is_none());

    let b = rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
    assert!(b > a);
}

#[test]
fn test_insert_at_restores_position() {
    let mut scene = Scene::default();
    let a = rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
    let b = rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
    let c = rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
    let (index, element) = scene.remove(b).unwrap();
    scene.insert_at(index, element).unwrap();
    assert_eq!(scene.ids(), vec![a, b, c]);
}

#[test]
fn test_invalid_geometry_rejected() {
    assert!(matches!(
        Element::new(1, "x", ElementShape::Rectangle, Point::zero(), 0.0, 10.0),
        Err(ElementError::InvalidSize { .. })
    ));
    assert!(matches!(
        Element::new(1, "x", ElementShape::Rectangle, Point::new(f64::NAN, 0.0), 10.0, 10.0),
        Err(ElementError::InvalidPosition { .. })
    ));

    let mut element =
        Element::new(1, "x", ElementShape::Rectangle, Point::zero(), 10.0, 10.0).unwrap();
    assert!(element.resize(-5.0, 10.0).is_err());
    assert_eq!(element.width(), 10.0);
}

#[test]
fn test_replace_requires_existing_id() {
    let mut scene = Scene::default();
    let a = rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
    let mut moved = scene.get(a).unwrap().clone();
    moved.translate(30.0, 0.0);
    scene.replace(moved).unwrap();
    assert_eq!(scene.get(a).unwrap().x, 30.0);

    let stranger =
        Element::new(999, "x", ElementShape::Rectangle, Point::zero(), 10.0, 10.0).unwrap();
    assert_eq!(scene.replace(stranger), Err(ElementError::NotFound(999)));
}

#[test]
fn test_rect_queries_and_bounds() {
    let mut scene = Scene::default();
    let a = rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
    let b = rect(&mut scene, 50.0, 50.0, 20.0, 20.0);
    assert_eq!(
        scene.elements_in_rect(&Bounds::new(5.0, 5.0, 55.0, 55.0)),
        vec![a, b]
    );
    assert_eq!(scene.elements_in_rect(&Bounds::new(20.0, 20.0, 30.0, 30.0)), Vec::<u64>::new());
    assert_eq!(scene.content_bounds(), Some(Bounds::new(0.0, 0.0, 70.0, 70.0)));
    assert_eq!(scene.bounds_of(&[b, 42]), Some(Bounds::new(50.0, 50.0, 70.0, 70.0)));
    assert_eq!(scene.bounds_of(&[]), None);
}

#[test]
fn test_grid_settings() {
    let mut scene = Scene::default();
    scene.set_grid(true, 25.0).unwrap();
    assert_eq!(scene.grid_size(), 25.0);
    assert!(scene.set_grid(true, 0.0).is_err());
    assert_eq!(scene.grid_size(), 25.0);

    scene.set_grid(false, 0.0).unwrap();
    assert!(!scene.grid_enabled());
    assert_eq!(scene.grid_size(), 25.0);
}

#[test]
fn test_validate_advances_counter() {
    let mut scene = Scene::default();
    let element =
        Element::new(40, "x", ElementShape::Rectangle, Point::zero(), 10.0, 10.0).unwrap();
    scene.insert(element).unwrap();
    scene.validate().unwrap();
    assert_eq!(scene.next_id(), 41);

    scene.reserve_ids_from(10);
    assert_eq!(scene.peek_next_id(), 42);
}

#[test]
fn test_id_counter() {
    let mut ids = IdCounter::starting_at(0);
    assert_eq!(ids.next_id(), 1);
    assert_eq!(ids.next_id(), 2);
    assert_eq!(IdCounter::default(), IdCounter::starting_at(1));
}
