//! Scene renderer
//! Redraws the whole scene on every change using tiny-skia.
//!
//! Rendering is split in two steps so ordering can be checked without pixels:
//! 1. [`build_display_list`] produces the ordered draw operations: background,
//!    grid lines inside the visible area, each element's shape followed by its
//!    label, dashed outlines around selected elements, then the interaction
//!    [`Overlays`]: duplication preview markers, the marquee band and the drop
//!    marker.
//! 2. [`render_scene`] rasterises that list into a `Pixmap`;
//!    [`render_to_image`] converts it to an `RgbaImage`.

use crate::font_manager;
use crate::model::{Color, ElementShape};
use crate::scene::Scene;
use crate::selection::Selection;
use crate::viewport::Viewport;
use image::{Rgba, RgbaImage};
use rusttype::{point as rt_point, Scale};
use sitemap_core::{Bounds, Point};
use sitemap_settings::RenderSettings;
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Rect, Stroke, StrokeDash, Transform};

/// Screen pixels between the selection outline and the element.
const SELECTION_PADDING: f64 = 3.0;
/// Grid lines closer than this many screen pixels are not drawn.
const MIN_GRID_SPACING_PX: f64 = 4.0;
/// Half the size of the drop marker cross, in screen pixels.
const DROP_MARKER_RADIUS: f64 = 8.0;
/// Alpha of the marquee band fill.
const BAND_FILL_ALPHA: u8 = 0x33;

/// Transient feedback drawn on top of the scene, in scene coordinates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlays {
    /// Where a dragged catalog item would land
    pub drop_marker: Option<Point>,
    /// Marquee band or the shape being drawn
    pub band: Option<Bounds>,
    /// Footprints of the copies a pending duplication would create
    pub preview: Vec<Bounds>,
}

impl Overlays {
    pub fn none() -> Self {
        Self::default()
    }
}

/// Colors and label font used by the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    pub grid_color: Color,
    pub selection_color: Color,
    pub label_color: Color,
    /// Label size in screen pixels at zoom 1.0
    pub label_size: f32,
    pub label_font: String,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::from_settings(&RenderSettings::default())
    }
}

impl RenderStyle {
    pub fn from_settings(settings: &RenderSettings) -> Self {
        Self {
            grid_color: Color::parse_or(&settings.grid_color, Color::rgb(0xe2, 0xe8, 0xf0)),
            selection_color: Color::parse_or(
                &settings.selection_color,
                Color::rgb(0x25, 0x63, 0xeb),
            ),
            label_color: Color::parse_or(&settings.label_color, Color::BLACK),
            label_size: settings.label_size as f32,
            label_font: settings.label_font.clone(),
        }
    }
}

/// One draw operation.
///
/// Shapes are in scene coordinates. Everything else is already in screen
/// pixels so line widths do not scale with zoom.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Background(Color),
    GridLine {
        from: Point,
        to: Point,
        color: Color,
    },
    Shape {
        id: u64,
        shape: ElementShape,
        rect: Bounds,
        rotation: f64,
        fill: Color,
        stroke: Color,
        stroke_width: f64,
    },
    Label {
        id: u64,
        text: String,
        center: Point,
        size: f32,
        color: Color,
    },
    SelectionOutline {
        id: u64,
        rect: Bounds,
        rotation: f64,
        color: Color,
    },
    /// Ghost outline of one copy a duplication would create
    PreviewMarker {
        rect: Bounds,
        color: Color,
    },
    /// Rubber band of a marquee selection or a shape being drawn
    Band {
        rect: Bounds,
        color: Color,
    },
    /// Cross at the point a dragged catalog item would drop
    DropMarker {
        center: Point,
        color: Color,
    },
}

/// Builds the ordered draw list for the current state.
pub fn build_display_list(
    scene: &Scene,
    selection: &Selection,
    viewport: &Viewport,
    style: &RenderStyle,
    overlays: &Overlays,
) -> Vec<DrawOp> {
    let mut ops = vec![DrawOp::Background(scene.background)];

    if scene.grid_enabled() {
        push_grid_lines(&mut ops, scene, viewport, style.grid_color);
    }

    let label_size = style.label_size * viewport.zoom() as f32;
    for element in scene.elements() {
        ops.push(DrawOp::Shape {
            id: element.id,
            shape: element.shape,
            rect: element.bounds(),
            rotation: element.rotation,
            fill: element.fill,
            stroke: element.stroke,
            stroke_width: element.stroke_width,
        });
        if !element.label.is_empty() {
            ops.push(DrawOp::Label {
                id: element.id,
                text: element.label.clone(),
                center: viewport.scene_to_screen(element.center()),
                size: label_size,
                color: style.label_color,
            });
        }
    }

    for id in selection.in_draw_order(scene) {
        if let Some(element) = scene.get(id) {
            let rect = screen_rect(viewport, &element.bounds())
                .expand(SELECTION_PADDING, SELECTION_PADDING);
            ops.push(DrawOp::SelectionOutline {
                id,
                rect,
                rotation: element.rotation,
                color: style.selection_color,
            });
        }
    }

    for footprint in &overlays.preview {
        ops.push(DrawOp::PreviewMarker {
            rect: screen_rect(viewport, footprint),
            color: style.selection_color,
        });
    }
    if let Some(band) = &overlays.band {
        ops.push(DrawOp::Band {
            rect: screen_rect(viewport, band),
            color: style.selection_color,
        });
    }
    if let Some(point) = overlays.drop_marker {
        ops.push(DrawOp::DropMarker {
            center: viewport.scene_to_screen(point),
            color: style.selection_color,
        });
    }

    ops
}

fn screen_rect(viewport: &Viewport, bounds: &Bounds) -> Bounds {
    Bounds::from_points(
        viewport.scene_to_screen(bounds.min()),
        viewport.scene_to_screen(bounds.max()),
    )
}

fn skia_rect(rect: &Bounds) -> Option<Rect> {
    Rect::from_ltrb(
        rect.min_x as f32,
        rect.min_y as f32,
        rect.max_x as f32,
        rect.max_y as f32,
    )
}

fn push_grid_lines(ops: &mut Vec<DrawOp>, scene: &Scene, viewport: &Viewport, color: Color) {
    let cell = scene.grid_size();
    if cell * viewport.zoom() < MIN_GRID_SPACING_PX {
        return;
    }
    let Some(area) = viewport
        .visible_scene_bounds()
        .intersection(&scene.extent())
    else {
        return;
    };

    let top = viewport.scene_to_screen(Point::new(area.min_x, area.min_y));
    let bottom = viewport.scene_to_screen(Point::new(area.max_x, area.max_y));

    let columns = (area.min_x / cell).ceil() as i64..=(area.max_x / cell).floor() as i64;
    for i in columns {
        let sx = viewport.scene_to_screen(Point::new(i as f64 * cell, 0.0)).x;
        ops.push(DrawOp::GridLine {
            from: Point::new(sx, top.y),
            to: Point::new(sx, bottom.y),
            color,
        });
    }

    let rows = (area.min_y / cell).ceil() as i64..=(area.max_y / cell).floor() as i64;
    for i in rows {
        let sy = viewport.scene_to_screen(Point::new(0.0, i as f64 * cell)).y;
        ops.push(DrawOp::GridLine {
            from: Point::new(top.x, sy),
            to: Point::new(bottom.x, sy),
            color,
        });
    }
}

fn paint_for(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color.to_tiny_skia());
    paint.anti_alias = true;
    paint
}

/// Rasterises the scene at the viewport's canvas size.
///
/// Returns `None` when the surface size is zero.
pub fn render_scene(
    scene: &Scene,
    selection: &Selection,
    viewport: &Viewport,
    style: &RenderStyle,
    overlays: &Overlays,
) -> Option<Pixmap> {
    let width = viewport.canvas_width().round() as u32;
    let height = viewport.canvas_height().round() as u32;
    let mut pixmap = Pixmap::new(width, height)?;

    let zoom = viewport.zoom() as f32;
    let pan = viewport.pan();
    // scene -> screen: screen = scene * zoom + pan
    let transform = Transform::from_scale(zoom, zoom).post_translate(pan.x as f32, pan.y as f32);

    for op in build_display_list(scene, selection, viewport, style, overlays) {
        match op {
            DrawOp::Background(color) => pixmap.fill(color.to_tiny_skia()),
            DrawOp::GridLine { from, to, color } => {
                let mut pb = PathBuilder::new();
                pb.move_to(from.x as f32, from.y as f32);
                pb.line_to(to.x as f32, to.y as f32);
                if let Some(path) = pb.finish() {
                    let mut paint = paint_for(color);
                    paint.anti_alias = false;
                    let stroke = Stroke {
                        width: 1.0,
                        ..Default::default()
                    };
                    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
                }
            }
            DrawOp::Shape {
                shape,
                rect,
                rotation,
                fill,
                stroke,
                stroke_width,
                ..
            } => {
                let center = rect.center();
                let element_transform = transform.pre_concat(Transform::from_rotate_at(
                    rotation as f32,
                    center.x as f32,
                    center.y as f32,
                ));
                draw_shape(
                    &mut pixmap,
                    shape,
                    &rect,
                    fill,
                    stroke,
                    stroke_width as f32,
                    element_transform,
                );
            }
            DrawOp::Label {
                text,
                center,
                size,
                color,
                ..
            } => draw_label(&mut pixmap, &style.label_font, &text, center, size, color),
            DrawOp::SelectionOutline {
                rect,
                rotation,
                color,
                ..
            } => {
                let Some(r) = skia_rect(&rect) else {
                    continue;
                };
                let path = PathBuilder::from_rect(r);
                let center = rect.center();
                let stroke = Stroke {
                    width: 1.5,
                    dash: StrokeDash::new(vec![6.0, 4.0], 0.0),
                    ..Default::default()
                };
                pixmap.stroke_path(
                    &path,
                    &paint_for(color),
                    &stroke,
                    Transform::from_rotate_at(rotation as f32, center.x as f32, center.y as f32),
                    None,
                );
            }
            DrawOp::PreviewMarker { rect, color } => {
                let Some(r) = skia_rect(&rect) else {
                    continue;
                };
                let stroke = Stroke {
                    width: 1.0,
                    dash: StrokeDash::new(vec![3.0, 3.0], 0.0),
                    ..Default::default()
                };
                pixmap.stroke_path(
                    &PathBuilder::from_rect(r),
                    &paint_for(color),
                    &stroke,
                    Transform::identity(),
                    None,
                );
            }
            DrawOp::Band { rect, color } => {
                let Some(r) = skia_rect(&rect) else {
                    continue;
                };
                let tint = Color::rgba(color.r, color.g, color.b, BAND_FILL_ALPHA);
                pixmap.fill_rect(r, &paint_for(tint), Transform::identity(), None);
                let stroke = Stroke {
                    width: 1.0,
                    ..Default::default()
                };
                pixmap.stroke_path(
                    &PathBuilder::from_rect(r),
                    &paint_for(color),
                    &stroke,
                    Transform::identity(),
                    None,
                );
            }
            DrawOp::DropMarker { center, color } => {
                let (x, y) = (center.x as f32, center.y as f32);
                let r = DROP_MARKER_RADIUS as f32;
                let mut pb = PathBuilder::new();
                pb.move_to(x - r, y);
                pb.line_to(x + r, y);
                pb.move_to(x, y - r);
                pb.line_to(x, y + r);
                if let Some(path) = pb.finish() {
                    let stroke = Stroke {
                        width: 2.0,
                        ..Default::default()
                    };
                    pixmap.stroke_path(
                        &path,
                        &paint_for(color),
                        &stroke,
                        Transform::identity(),
                        None,
                    );
                }
            }
        }
    }

    Some(pixmap)
}

fn draw_shape(
    pixmap: &mut Pixmap,
    shape: ElementShape,
    rect: &Bounds,
    fill: Color,
    stroke: Color,
    stroke_width: f32,
    transform: Transform,
) {
    let Some(r) = Rect::from_xywh(
        rect.min_x as f32,
        rect.min_y as f32,
        rect.width() as f32,
        rect.height() as f32,
    ) else {
        return;
    };

    let (path, path_transform) = match shape {
        ElementShape::Rectangle | ElementShape::Text => (Some(PathBuilder::from_rect(r)), transform),
        ElementShape::Ellipse => {
            // tiny-skia has no ellipse primitive: scale a unit circle
            let center = rect.center();
            let ellipse_transform = transform
                .pre_translate(center.x as f32, center.y as f32)
                .pre_scale(r.width() / 2.0, r.height() / 2.0);
            (PathBuilder::from_circle(0.0, 0.0, 1.0), ellipse_transform)
        }
    };
    let Some(path) = path else {
        return;
    };

    pixmap.fill_path(&path, &paint_for(fill), FillRule::Winding, path_transform, None);

    if shape != ElementShape::Text && stroke_width > 0.0 {
        // Keep the stroke width in scene units for the unit-circle path too.
        let scale = match shape {
            ElementShape::Ellipse => (r.width().min(r.height()) / 2.0).max(f32::EPSILON),
            _ => 1.0,
        };
        let stroke_style = Stroke {
            width: stroke_width / scale,
            ..Default::default()
        };
        pixmap.stroke_path(&path, &paint_for(stroke), &stroke_style, path_transform, None);
    }
}

fn draw_label(
    pixmap: &mut Pixmap,
    family: &str,
    text: &str,
    center: Point,
    size: f32,
    color: Color,
) {
    if size < 1.0 {
        return;
    }
    let Some(font) = font_manager::label_font(family) else {
        return;
    };

    let scale = Scale::uniform(size);
    let v_metrics = font.v_metrics(scale);
    let glyphs: Vec<_> = font.layout(text, scale, rt_point(0.0, 0.0)).collect();
    let text_width = glyphs
        .iter()
        .rev()
        .find_map(|g| g.pixel_bounding_box().map(|bb| bb.max.x as f32))
        .unwrap_or(0.0);
    let text_height = v_metrics.ascent - v_metrics.descent;

    let origin_x = center.x as f32 - text_width / 2.0;
    let baseline_y = center.y as f32 - text_height / 2.0 + v_metrics.ascent;

    let width = pixmap.width() as i32;
    let height = pixmap.height() as i32;
    let data = pixmap.data_mut();

    for glyph in font.layout(text, scale, rt_point(origin_x, baseline_y)) {
        let Some(bounding_box) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let px = gx as i32 + bounding_box.min.x;
            let py = gy as i32 + bounding_box.min.y;
            if px >= 0 && px < width && py >= 0 && py < height {
                let idx = ((py * width + px) * 4) as usize;
                blend_premultiplied(&mut data[idx..idx + 4], color, coverage);
            }
        });
    }
}

/// Source-over blend of `color` at `coverage` onto a premultiplied RGBA pixel.
fn blend_premultiplied(pixel: &mut [u8], color: Color, coverage: f32) {
    let alpha = (coverage.clamp(0.0, 1.0) * color.a as f32 / 255.0).clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return;
    }
    let inv = 1.0 - alpha;
    let src = [color.r, color.g, color.b, 255];
    for (channel, source) in pixel.iter_mut().zip(src) {
        *channel = (source as f32 * alpha + *channel as f32 * inv).round() as u8;
    }
}

/// Renders to an 8-bit RGBA image (straight alpha).
pub fn render_to_image(
    scene: &Scene,
    selection: &Selection,
    viewport: &Viewport,
    style: &RenderStyle,
    overlays: &Overlays,
) -> RgbaImage {
    let width = viewport.canvas_width().round() as u32;
    let height = viewport.canvas_height().round() as u32;
    let Some(pixmap) = render_scene(scene, selection, viewport, style, overlays) else {
        return RgbaImage::new(width, height);
    };

    let pixels = pixmap.pixels();
    RgbaImage::from_fn(pixmap.width(), pixmap.height(), |x, y| {
        let c = pixels[(y * pixmap.width() + x) as usize].demultiply();
        Rgba([c.red(), c.green(), c.blue(), c.alpha()])
    })
}
