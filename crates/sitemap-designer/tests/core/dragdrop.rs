use sitemap_core::constants::ELEMENT_TEMPLATE_ITEM;
use sitemap_core::DragError;
use sitemap_designer::dragdrop::{
    dispatch_all, DragDropCoordinator, DragItem, DropOutcome, DropTarget, DropZone, ZoneEvent,
    ZoneId,
};
use sitemap_designer::{Bounds, Point, Viewport};

#[derive(Default)]
struct Recorder {
    hovers: Vec<String>,
    leaves: Vec<String>,
    drops: Vec<(String, Point)>,
}

impl DropTarget for Recorder {
    fn on_hover(&mut self, zone: &ZoneId, _item: &DragItem, _point: Point) {
        self.hovers.push(zone.to_string());
    }

    fn on_leave(&mut self, zone: &ZoneId) {
        self.leaves.push(zone.to_string());
    }

    fn on_drop(&mut self, zone: &ZoneId, _item: &DragItem, point: Point) {
        self.drops.push((zone.to_string(), point));
    }
}

fn coordinator() -> DragDropCoordinator {
    let mut coordinator = DragDropCoordinator::new();
    coordinator.register_zone(
        DropZone::new("left", Bounds::new(0.0, 0.0, 100.0, 100.0))
            .accepting([ELEMENT_TEMPLATE_ITEM]),
    );
    coordinator.register_zone(
        DropZone::new("right", Bounds::new(200.0, 0.0, 300.0, 100.0))
            .accepting([ELEMENT_TEMPLATE_ITEM]),
    );
    coordinator
}

#[test]
fn test_full_gesture_through_dispatch() {
    let vp = Viewport::new(400.0, 200.0);
    let mut coordinator = coordinator();
    let mut recorder = Recorder::default();
    let item = DragItem::template("bar", "food-and-drink");

    let events = coordinator.start_drag(item, Point::new(50.0, 50.0), &vp).unwrap();
    dispatch_all(&events, &mut recorder);
    let events = coordinator.update_drag(Point::new(250.0, 50.0), &vp).unwrap();
    dispatch_all(&events, &mut recorder);
    let report = coordinator.end_drag(Point::new(250.0, 50.0), &vp).unwrap();
    dispatch_all(&report.events, &mut recorder);

    assert_eq!(recorder.hovers, vec!["left", "right"]);
    assert_eq!(recorder.leaves, vec!["left", "right"]);
    assert_eq!(recorder.drops, vec![("right".to_string(), Point::new(250.0, 50.0))]);
    assert!(report.outcome.is_dropped());
    assert!(!coordinator.is_dragging());
}

#[test]
fn test_drop_point_uses_inverse_transform() {
    let mut vp = Viewport::new(400.0, 200.0);
    vp.set_zoom(2.0);
    vp.set_pan(10.0, 10.0);
    let mut coordinator = coordinator();

    coordinator
        .start_drag(DragItem::template("bar", "food-and-drink"), Point::zero(), &vp)
        .unwrap();
    let report = coordinator.end_drag(Point::new(110.0, 90.0), &vp).unwrap();
    match report.outcome {
        DropOutcome::Dropped { zone, point, .. } => {
            assert_eq!(zone.as_str(), "left");
            assert_eq!(point, Point::new(50.0, 40.0));
        }
        other => panic!("expected drop, got {:?}", other),
    }
}

#[test]
fn test_snapping_keeps_drop_inside_zone() {
    let vp = Viewport::new(400.0, 200.0);
    let mut coordinator = coordinator();
    coordinator.set_snapping(Some(20.0));

    coordinator
        .start_drag(DragItem::template("bar", "food-and-drink"), Point::zero(), &vp)
        .unwrap();
    let report = coordinator.end_drag(Point::new(95.0, 9.0), &vp).unwrap();
    match report.outcome {
        DropOutcome::Dropped { zone, point, .. } => {
            assert_eq!(zone.as_str(), "left");
            assert_eq!(point, Point::new(80.0, 0.0));
        }
        other => panic!("expected drop, got {:?}", other),
    }

    coordinator
        .start_drag(DragItem::template("bar", "food-and-drink"), Point::zero(), &vp)
        .unwrap();
    let report = coordinator.end_drag(Point::new(211.0, 49.0), &vp).unwrap();
    match report.outcome {
        DropOutcome::Dropped { zone, point, .. } => {
            assert_eq!(zone.as_str(), "right");
            assert_eq!(point, Point::new(220.0, 40.0));
        }
        other => panic!("expected drop, got {:?}", other),
    }
}

#[test]
fn test_gap_between_zones_cancels() {
    let vp = Viewport::new(400.0, 200.0);
    let mut coordinator = coordinator();
    coordinator
        .start_drag(DragItem::template("bar", "food-and-drink"), Point::new(50.0, 50.0), &vp)
        .unwrap();
    let report = coordinator.end_drag(Point::new(150.0, 50.0), &vp).unwrap();
    assert!(matches!(report.outcome, DropOutcome::Cancelled { .. }));
    assert!(report
        .events
        .iter()
        .all(|e| matches!(e, ZoneEvent::Leave { .. })));
}

#[test]
fn test_item_type_must_be_accepted() {
    let vp = Viewport::new(400.0, 200.0);
    let mut coordinator = coordinator();
    let item = DragItem::new("image-file", serde_json::json!({"path": "map.png"}));

    let events = coordinator.start_drag(item, Point::new(50.0, 50.0), &vp).unwrap();
    assert!(events.is_empty());
    let report = coordinator.end_drag(Point::new(50.0, 50.0), &vp).unwrap();
    assert!(!report.outcome.is_dropped());
}

#[test]
fn test_state_errors() {
    let vp = Viewport::new(400.0, 200.0);
    let mut coordinator = coordinator();
    assert_eq!(
        coordinator.end_drag(Point::zero(), &vp).unwrap_err(),
        DragError::NotDragging
    );
    assert!(coordinator.cancel_drag().is_err());

    coordinator
        .start_drag(DragItem::template("bar", "food-and-drink"), Point::zero(), &vp)
        .unwrap();
    let err = coordinator
        .start_drag(DragItem::template("stage", "stage"), Point::zero(), &vp)
        .unwrap_err();
    assert_eq!(
        err,
        DragError::AlreadyDragging {
            current: ELEMENT_TEMPLATE_ITEM.to_string()
        }
    );
    assert_eq!(
        coordinator.current_item().map(|i| i.payload["template_id"].clone()),
        Some(serde_json::json!("bar"))
    );
}

#[test]
fn test_zone_lifecycle() {
    let mut coordinator = coordinator();
    assert_eq!(coordinator.zones().len(), 2);
    assert!(coordinator.unregister_zone("left").is_empty());
    assert!(!coordinator.has_zone("left"));
    assert!(coordinator.unregister_zone("missing").is_empty());
    assert!(coordinator.set_zone_bounds("right", Bounds::new(0.0, 0.0, 10.0, 10.0)));
    assert!(!coordinator.set_zone_bounds("left", Bounds::new(0.0, 0.0, 10.0, 10.0)));
}
