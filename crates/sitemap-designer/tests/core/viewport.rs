use sitemap_designer::viewport::{clamp_zoom, Viewport};
use sitemap_designer::{Bounds, Point};

#[test]
fn test_viewport_creation() {
    let vp = Viewport::new(1200.0, 800.0);
    assert_eq!(vp.zoom(), 1.0);
    assert_eq!(vp.pan(), Point::zero());
}

#[test]
fn test_zoom_is_clamped() {
    let mut vp = Viewport::new(800.0, 600.0);
    vp.set_zoom(10.0);
    assert_eq!(vp.zoom(), 5.0);
    vp.set_zoom(0.001);
    assert_eq!(vp.zoom(), 0.1);
    vp.set_zoom(f64::NAN);
    assert_eq!(vp.zoom(), 1.0);
    assert_eq!(clamp_zoom(f64::INFINITY), 5.0);
}

#[test]
fn test_screen_scene_transform() {
    let mut vp = Viewport::new(800.0, 600.0);
    vp.set_zoom(2.0);
    vp.set_pan(100.0, 50.0);

    let scene = vp.screen_to_scene(Point::new(300.0, 250.0));
    assert_eq!(scene, Point::new(100.0, 100.0));
    assert_eq!(vp.scene_to_screen(scene), Point::new(300.0, 250.0));
}

#[test]
fn test_zoom_at_keeps_anchor_fixed() {
    let mut vp = Viewport::new(800.0, 600.0);
    vp.set_pan(20.0, 10.0);
    let cursor = Point::new(400.0, 300.0);
    let before = vp.screen_to_scene(cursor);

    vp.zoom_at(cursor, 2.5);
    let after = vp.screen_to_scene(cursor);
    assert!((before.x - after.x).abs() < 1e-9);
    assert!((before.y - after.y).abs() < 1e-9);
}

#[test]
fn test_zoom_steps_stay_in_range() {
    let mut vp = Viewport::new(800.0, 600.0);
    for _ in 0..50 {
        vp.zoom_in();
    }
    assert_eq!(vp.zoom(), 5.0);
    for _ in 0..100 {
        vp.zoom_out();
    }
    assert_eq!(vp.zoom(), 0.1);
}

#[test]
fn test_non_finite_pan_ignored() {
    let mut vp = Viewport::new(800.0, 600.0);
    vp.set_pan(5.0, 5.0);
    vp.pan_by(f64::NAN, 1.0);
    assert_eq!(vp.pan(), Point::new(5.0, 5.0));
}

#[test]
fn test_fit_to_bounds_centers_content() {
    let mut vp = Viewport::new(1000.0, 500.0);
    let content = Bounds::new(0.0, 0.0, 200.0, 100.0);
    vp.fit_to_bounds(&content, 0.0);
    assert!((vp.zoom() - 5.0).abs() < 1e-9);

    let center = vp.scene_to_screen(content.center());
    assert!((center.x - 500.0).abs() < 1e-9);
    assert!((center.y - 250.0).abs() < 1e-9);
}

#[test]
fn test_fit_ignores_degenerate_bounds() {
    let mut vp = Viewport::new(800.0, 600.0);
    vp.fit_to_bounds(&Bounds::new(10.0, 10.0, 10.0, 50.0), 0.05);
    assert_eq!(vp.zoom(), 1.0);
}

#[test]
fn test_visible_bounds_follow_pan_and_zoom() {
    let mut vp = Viewport::new(400.0, 200.0);
    vp.set_zoom(2.0);
    vp.set_pan(-100.0, 0.0);
    let visible = vp.visible_scene_bounds();
    assert_eq!(visible, Bounds::new(50.0, 0.0, 250.0, 100.0));

    vp.reset();
    assert_eq!(vp.visible_scene_bounds(), Bounds::new(0.0, 0.0, 400.0, 200.0));
}
