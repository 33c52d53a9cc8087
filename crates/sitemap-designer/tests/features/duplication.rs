use sitemap_core::Point;
use sitemap_designer::{
    ArrayType, BuilderSession, DuplicationGenerator, DuplicationOptions, Element, ElementShape,
    IdCounter, MirrorMode, ToolbarAction,
};
use sitemap_designer::duplication::MAX_PATTERN_SIZE;

fn source(x: f64, y: f64) -> Element {
    Element::new(1, "tent", ElementShape::Rectangle, Point::new(x, y), 30.0, 30.0)
        .unwrap()
        .with_label("Tent")
}

#[test]
fn test_single_with_mirror() {
    let options = DuplicationOptions::mirrored(20.0, 10.0, MirrorMode::Both);
    let copies = DuplicationGenerator::generate(&[source(100.0, 100.0)], &options, &mut IdCounter::starting_at(2));
    assert_eq!(copies.len(), 1);
    assert_eq!(copies[0].position(), Point::new(80.0, 90.0));
    assert_eq!(copies[0].label, "Tent (Copy)");
    assert_eq!(copies[0].id, 2);
}

#[test]
fn test_multiple_steps_from_source() {
    let options = DuplicationOptions::multiple(3, 40.0, 0.0);
    let copies = DuplicationGenerator::generate(&[source(0.0, 0.0)], &options, &mut IdCounter::starting_at(2));
    let xs: Vec<f64> = copies.iter().map(|c| c.x).collect();
    assert_eq!(xs, vec![40.0, 80.0, 120.0]);
}

#[test]
fn test_copies_grouped_by_offset() {
    let a = source(0.0, 0.0);
    let mut b = source(0.0, 100.0);
    b.id = 2;
    let options = DuplicationOptions::multiple(2, 50.0, 0.0);
    let copies = DuplicationGenerator::generate(&[a, b], &options, &mut IdCounter::starting_at(3));
    let positions: Vec<Point> = copies.iter().map(|c| c.position()).collect();
    assert_eq!(
        positions,
        vec![
            Point::new(50.0, 0.0),
            Point::new(50.0, 100.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
        ]
    );
    let ids: Vec<u64> = copies.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![3, 4, 5, 6]);
}

#[test]
fn test_radial_rotation_added() {
    let options = DuplicationOptions::radial(1, 4, 100.0, 45.0);
    let copies = DuplicationGenerator::generate(&[source(0.0, 0.0)], &options, &mut IdCounter::default());
    assert_eq!(copies.len(), 4);
    assert!(copies.iter().all(|c| c.rotation == 45.0));
    assert!((copies[1].x - 0.0).abs() < 1e-9);
    assert!((copies[1].y - 100.0).abs() < 1e-9);
}

#[test]
fn test_grid_ignores_angle() {
    let options = DuplicationOptions::Array {
        array_type: ArrayType::Grid,
        rows: 2,
        columns: 2,
        spacing: 10.0,
        angle: 30.0,
        radius: 0.0,
    };
    let copies = DuplicationGenerator::generate(&[source(0.0, 0.0)], &options, &mut IdCounter::default());
    assert!(copies.iter().all(|c| c.rotation == 0.0));
}

#[test]
fn test_invalid_counts_are_clamped() {
    assert_eq!(DuplicationOptions::multiple(0, 10.0, 10.0).copies_per_element(), 1);
    assert_eq!(DuplicationOptions::grid(0, 0, 10.0).copies_per_element(), 1);
    let offsets = DuplicationGenerator::offsets(&DuplicationOptions::grid(2, 2, -5.0));
    assert!(offsets.iter().all(|p| *p == Point::zero()));
}

#[test]
fn test_preview_matches_commit() {
    let mut session = BuilderSession::default();
    session.set_snapping(false);
    session.insert_template("toilet-block", Point::new(100.0, 100.0)).unwrap();
    let options = DuplicationOptions::linear(1, 4, 90.0, 0.0);

    let preview = session.preview_duplication(&options);
    assert_eq!(preview.count(), 4);
    assert_eq!(session.scene().len(), 1);
    assert!(!session.can_redo() && session.history().undo_depth() == 1);

    let outcome = session.execute(ToolbarAction::Duplicate(options));
    let committed: Vec<Point> = outcome
        .affected()
        .iter()
        .map(|id| session.scene().get(*id).unwrap().position())
        .collect();
    assert_eq!(committed, preview.positions);
    assert_eq!(session.selection().ids(), outcome.affected());
}

#[test]
fn test_duplicate_without_selection_is_disabled() {
    let mut session = BuilderSession::default();
    session.insert_template("bar", Point::new(0.0, 0.0)).unwrap();
    session.execute(ToolbarAction::ClearSelection);
    let outcome = session.execute(ToolbarAction::Duplicate(DuplicationOptions::single(10.0, 0.0)));
    assert!(!outcome.is_applied());
    assert_eq!(session.scene().len(), 1);
}

#[test]
fn test_oversized_array_is_capped_per_element() {
    let mut session = BuilderSession::default();
    session.set_snapping(false);
    session.insert_template("bar", Point::new(0.0, 0.0)).unwrap();

    let preview = session.preview_duplication(&DuplicationOptions::grid(10_000, 10_000, 1.0));
    assert_eq!(preview.count(), MAX_PATTERN_SIZE as usize);
    assert_eq!(
        DuplicationOptions::linear(2_000, 2_000, 5.0, 0.0).copies_per_element(),
        2_000 * 5
    );
}
