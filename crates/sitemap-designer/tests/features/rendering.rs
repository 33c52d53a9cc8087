use image::Rgba;
use sitemap_core::Point;
use sitemap_designer::{
    build_display_list, render_scene, render_to_image, BuilderSession, Color, DragItem, DrawOp,
    DuplicationOptions, Element, ElementShape, IdSource, Overlays, PointerEvent, RenderStyle, Scene,
    Selection, Tool, ToolbarAction, Viewport,
};

fn plain_scene() -> (Scene, u64) {
    let mut scene = Scene::new(400.0, 200.0);
    scene.set_grid(false, 20.0).unwrap();
    let id = scene.next_id();
    let element = Element::new(id, "rectangle", ElementShape::Rectangle, Point::new(20.0, 20.0), 40.0, 40.0)
        .unwrap()
        .with_fill(Color::rgb(0, 0, 255));
    scene.insert(element).unwrap();
    (scene, id)
}

#[test]
fn test_zoom_scales_shapes_on_screen() {
    let (scene, _) = plain_scene();
    let mut vp = Viewport::new(400.0, 200.0);
    vp.set_zoom(2.0);

    let image = render_to_image(&scene, &Selection::new(), &vp, &RenderStyle::default(), &Overlays::none());
    // Scene (50, 50) lands at screen (100, 100) at 2x.
    assert_eq!(image.get_pixel(100, 100), &Rgba([0, 0, 255, 255]));
    // Scene (70, 70) is outside the element.
    assert_eq!(image.get_pixel(150, 150), &Rgba([255, 255, 255, 255]));
}

#[test]
fn test_pan_moves_shapes() {
    let (scene, _) = plain_scene();
    let mut vp = Viewport::new(400.0, 200.0);
    vp.set_pan(200.0, 0.0);

    let image = render_to_image(&scene, &Selection::new(), &vp, &RenderStyle::default(), &Overlays::none());
    assert_eq!(image.get_pixel(240, 40), &Rgba([0, 0, 255, 255]));
    assert_eq!(image.get_pixel(40, 40), &Rgba([255, 255, 255, 255]));
}

#[test]
fn test_later_elements_paint_over_earlier() {
    let (mut scene, _) = plain_scene();
    let id = scene.next_id();
    let top = Element::new(id, "rectangle", ElementShape::Rectangle, Point::new(40.0, 40.0), 40.0, 40.0)
        .unwrap()
        .with_fill(Color::rgb(255, 0, 0));
    scene.insert(top).unwrap();

    let vp = Viewport::new(400.0, 200.0);
    let image = render_to_image(&scene, &Selection::new(), &vp, &RenderStyle::default(), &Overlays::none());
    assert_eq!(image.get_pixel(50, 50), &Rgba([255, 0, 0, 255]));
    assert_eq!(image.get_pixel(30, 30), &Rgba([0, 0, 255, 255]));
}

#[test]
fn test_zero_sized_canvas_renders_nothing() {
    let (scene, _) = plain_scene();
    let vp = Viewport::new(0.0, 0.0);
    assert!(render_scene(&scene, &Selection::new(), &vp, &RenderStyle::default(), &Overlays::none()).is_none());
}

#[test]
fn test_selection_outline_in_screen_space() {
    let (scene, id) = plain_scene();
    let mut selection = Selection::new();
    selection.select_only(id);
    let mut vp = Viewport::new(400.0, 200.0);
    vp.set_zoom(2.0);

    let ops = build_display_list(&scene, &selection, &vp, &RenderStyle::default(), &Overlays::none());
    let outline = ops
        .iter()
        .find_map(|op| match op {
            DrawOp::SelectionOutline { rect, .. } => Some(*rect),
            _ => None,
        })
        .unwrap();
    // Element spans screen 40..120; the outline sits just outside it.
    assert!(outline.min_x < 40.0 && outline.max_x > 120.0);
    assert!(outline.min_y < 40.0 && outline.max_y > 120.0);
}

#[test]
fn test_session_redraw_flag() {
    let mut session = BuilderSession::default();
    session.take_redraw();
    assert!(!session.needs_redraw());

    session.insert_template("bar", Point::new(10.0, 10.0)).unwrap();
    assert!(session.take_redraw());
    assert!(!session.take_redraw());

    session.set_zoom(2.0);
    assert!(session.needs_redraw());

    let ops = session.display_list();
    assert!(ops.iter().any(|op| matches!(op, DrawOp::SelectionOutline { .. })));
}

fn count(ops: &[DrawOp], pred: impl Fn(&DrawOp) -> bool) -> usize {
    ops.iter().filter(|op| pred(op)).count()
}

#[test]
fn test_drop_hover_is_drawn_while_dragging() {
    let mut session = BuilderSession::default();
    session
        .start_drag(DragItem::template("generator", "power"), Point::new(5.0, 5.0))
        .unwrap();
    session.update_drag(Point::new(120.0, 80.0)).unwrap();

    let ops = session.display_list();
    let marker = ops.iter().find_map(|op| match op {
        DrawOp::DropMarker { center, .. } => Some(*center),
        _ => None,
    });
    assert_eq!(marker, Some(Point::new(120.0, 80.0)));

    session.cancel_drag().unwrap();
    let ops = session.display_list();
    assert_eq!(count(&ops, |op| matches!(op, DrawOp::DropMarker { .. })), 0);
}

#[test]
fn test_marquee_band_is_drawn_during_gesture() {
    let mut session = BuilderSession::default();
    session.set_snapping(false);
    session.set_tool(Tool::Select);
    session.handle_pointer(PointerEvent::down(10.0, 10.0));
    session.handle_pointer(PointerEvent::moved(60.0, 40.0));

    let ops = session.display_list();
    let band = ops.iter().find_map(|op| match op {
        DrawOp::Band { rect, .. } => Some(*rect),
        _ => None,
    });
    assert_eq!(band, Some(sitemap_core::Bounds::new(10.0, 10.0, 60.0, 40.0)));
    assert!(matches!(ops.last(), Some(DrawOp::Band { .. })));

    session.handle_pointer(PointerEvent::up(60.0, 40.0));
    let ops = session.display_list();
    assert_eq!(count(&ops, |op| matches!(op, DrawOp::Band { .. })), 0);
}

#[test]
fn test_duplication_preview_markers_until_duplicated() {
    let mut session = BuilderSession::default();
    session.insert_template("bar", Point::new(20.0, 20.0)).unwrap();
    session.execute(ToolbarAction::SelectAll);

    let options = DuplicationOptions::multiple(3, 40.0, 0.0);
    session.take_redraw();
    session.show_duplication_preview(options.clone());
    assert!(session.needs_redraw());

    let ops = session.display_list();
    assert_eq!(count(&ops, |op| matches!(op, DrawOp::PreviewMarker { .. })), 3);
    assert_eq!(session.scene().len(), 1);

    session.execute(ToolbarAction::Duplicate(options));
    assert_eq!(session.scene().len(), 4);
    let ops = session.display_list();
    assert_eq!(count(&ops, |op| matches!(op, DrawOp::PreviewMarker { .. })), 0);
}
