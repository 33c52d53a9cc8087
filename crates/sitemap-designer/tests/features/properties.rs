use proptest::prelude::*;
use sitemap_core::{snap_to_grid, Point};
use sitemap_designer::{
    BuilderSession, DuplicationGenerator, DuplicationOptions, Element, ElementShape, IdCounter,
    IdSource, MirrorMode, Modifiers, PointerEvent, Scene, Selection, ToolbarAction,
};
use std::collections::HashSet;
use std::f64::consts::TAU;

fn element_at(id: u64, x: f64, y: f64) -> Element {
    Element::new(id, "rectangle", ElementShape::Rectangle, Point::new(x, y), 10.0, 10.0).unwrap()
}

fn mirror_mode() -> impl Strategy<Value = MirrorMode> {
    prop_oneof![
        Just(MirrorMode::None),
        Just(MirrorMode::Horizontal),
        Just(MirrorMode::Vertical),
        Just(MirrorMode::Both),
    ]
}

proptest! {
    #[test]
    fn grid_offsets_are_row_major(rows in 1u32..8, columns in 1u32..8, spacing in 0.0f64..200.0) {
        let offsets = DuplicationGenerator::offsets(&DuplicationOptions::grid(rows, columns, spacing));
        prop_assert_eq!(offsets.len(), (rows * columns) as usize);
        for row in 0..rows {
            for col in 0..columns {
                let offset = offsets[(row * columns + col) as usize];
                prop_assert_eq!(offset, Point::new(col as f64 * spacing, row as f64 * spacing));
            }
        }
    }

    #[test]
    fn radial_offsets_lie_on_circle(total in 1u32..64, radius in 0.0f64..500.0) {
        let offsets = DuplicationGenerator::radial_offsets(total, radius);
        prop_assert_eq!(offsets.len(), total as usize);
        let step = TAU / total as f64;
        for (i, offset) in offsets.iter().enumerate() {
            prop_assert!((offset.length() - radius).abs() < 1e-6);
            let expected = i as f64 * step;
            prop_assert!((offset.x - radius * expected.cos()).abs() < 1e-6);
            prop_assert!((offset.y - radius * expected.sin()).abs() < 1e-6);
        }
    }

    #[test]
    fn linear_offsets_use_one_axis(rows in 1u32..6, columns in 1u32..6, spacing in 0.0f64..100.0) {
        let offsets = DuplicationGenerator::linear_offsets(rows, columns, spacing);
        prop_assert_eq!(offsets.len(), (rows * columns) as usize);
        for (i, offset) in offsets.iter().enumerate() {
            let distance = i as f64 * spacing;
            if rows == 1 {
                prop_assert_eq!(*offset, Point::new(distance, 0.0));
            } else {
                prop_assert_eq!(*offset, Point::new(0.0, distance));
            }
        }
    }

    #[test]
    fn mirror_negates_selected_axes(dx in -500.0f64..500.0, dy in -500.0f64..500.0, mode in mirror_mode()) {
        let offsets = DuplicationGenerator::offsets(&DuplicationOptions::mirrored(dx, dy, mode));
        let offset = offsets[0];
        let flip_x = matches!(mode, MirrorMode::Horizontal | MirrorMode::Both);
        let flip_y = matches!(mode, MirrorMode::Vertical | MirrorMode::Both);
        prop_assert_eq!(offset.x, if flip_x { -dx } else { dx });
        prop_assert_eq!(offset.y, if flip_y { -dy } else { dy });
    }

    #[test]
    fn snapped_points_are_grid_multiples(x in -5000.0f64..5000.0, y in -5000.0f64..5000.0, cell in 1u32..100) {
        let cell = cell as f64;
        let snapped = snap_to_grid(Point::new(x, y), cell);
        prop_assert!((snapped.x / cell - (snapped.x / cell).round()).abs() < 1e-9);
        prop_assert!((snapped.y / cell - (snapped.y / cell).round()).abs() < 1e-9);
        prop_assert!((snapped.x - x).abs() <= cell / 2.0 + 1e-9);
        prop_assert_eq!(snap_to_grid(snapped, cell), snapped);
    }

    #[test]
    fn delete_prunes_selection(count in 1usize..12, picks in proptest::collection::vec(any::<prop::sample::Index>(), 1..6)) {
        let mut session = BuilderSession::default();
        let mut ids = Vec::new();
        for i in 0..count {
            ids.push(session.insert_template("food-stall", Point::new(i as f64 * 50.0, 0.0)).unwrap());
        }
        let doomed: HashSet<u64> = picks.iter().map(|p| ids[p.index(ids.len())]).collect();

        session.execute(ToolbarAction::ClearSelection);
        for id in &doomed {
            let at = session.scene().get(*id).unwrap().center();
            session.handle_pointer(PointerEvent::down(at.x, at.y).with_modifiers(Modifiers::SHIFT));
            session.handle_pointer(PointerEvent::up(at.x, at.y).with_modifiers(Modifiers::SHIFT));
        }
        prop_assert_eq!(session.selection().len(), doomed.len());

        session.execute(ToolbarAction::Delete);
        prop_assert!(session.selection().is_empty());
        prop_assert_eq!(session.scene().len(), count - doomed.len());
        for id in &doomed {
            prop_assert!(!session.scene().contains(*id));
        }

        // A stale selection held elsewhere is pruned to surviving ids.
        let mut stale = Selection::new();
        stale.set(ids.iter().copied());
        stale.prune(session.scene());
        prop_assert!(stale.ids().iter().all(|id| session.scene().contains(*id)));
    }

    #[test]
    fn duplicates_get_fresh_ids_and_leave_sources(count in 1u32..20, n_sources in 1usize..5) {
        let mut scene = Scene::default();
        let sources: Vec<Element> = (0..n_sources)
            .map(|i| {
                let id = scene.next_id();
                let element = element_at(id, i as f64 * 20.0, 0.0);
                scene.insert(element.clone()).unwrap();
                element
            })
            .collect();
        let snapshot = scene.clone();

        let options = DuplicationOptions::multiple(count, 5.0, 5.0);
        let copies = DuplicationGenerator::generate(&sources, &options, &mut scene);
        prop_assert_eq!(copies.len(), count as usize * n_sources);

        let source_ids: HashSet<u64> = sources.iter().map(|e| e.id).collect();
        let copy_ids: HashSet<u64> = copies.iter().map(|e| e.id).collect();
        prop_assert_eq!(copy_ids.len(), copies.len());
        prop_assert!(copy_ids.is_disjoint(&source_ids));
        prop_assert_eq!(scene.elements(), snapshot.elements());
    }

    #[test]
    fn zoom_always_in_range(zoom in proptest::num::f64::ANY) {
        let mut session = BuilderSession::default();
        session.set_zoom(zoom);
        let z = session.viewport().zoom();
        prop_assert!((0.1..=5.0).contains(&z));
    }

    #[test]
    fn ids_strictly_increase(n in 1usize..50) {
        let mut ids = IdCounter::default();
        let drawn: Vec<u64> = (0..n).map(|_| ids.next_id()).collect();
        prop_assert!(drawn.windows(2).all(|w| w[0] < w[1]));
    }
}
