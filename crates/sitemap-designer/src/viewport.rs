//! Viewport and coordinate transformation for canvas rendering.
//!
//! Converts between screen pixels and scene units. Both spaces have their
//! origin at the top-left with +Y pointing down, so the mapping is a plain
//! scale followed by a translation:
//!
//! ```text
//! scene  = (screen - pan) / zoom
//! screen = scene * zoom + pan
//! ```
//!
//! Zoom requests come from continuous gestures (wheel, pinch), so values
//! outside [`MIN_ZOOM`, `MAX_ZOOM`] are clamped rather than rejected.

use std::fmt;

use serde::{Deserialize, Serialize};
use sitemap_core::constants::{MAX_ZOOM, MIN_ZOOM, VIEW_PADDING, ZOOM_STEP};
use sitemap_core::{Bounds, Point};

/// Pan/zoom state of the drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    #[serde(default = "default_canvas_width")]
    canvas_width: f64,
    #[serde(default = "default_canvas_height")]
    canvas_height: f64,
    #[serde(default = "default_zoom_step")]
    zoom_step: f64,
}

fn default_canvas_width() -> f64 {
    1200.0
}

fn default_canvas_height() -> f64 {
    800.0
}

fn default_zoom_step() -> f64 {
    ZOOM_STEP
}

/// Clamps a zoom factor into the supported range; non-finite input maps to 1.0.
pub fn clamp_zoom(zoom: f64) -> f64 {
    if zoom.is_nan() {
        return 1.0;
    }
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

impl Viewport {
    /// Creates a viewport for a drawing surface of the given pixel size.
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            canvas_width,
            canvas_height,
            zoom_step: ZOOM_STEP,
        }
    }

    /// Sets the multiplicative step used by zoom in / zoom out.
    pub fn with_zoom_step(mut self, step: f64) -> Self {
        if step.is_finite() && step > 1.0 {
            self.zoom_step = step;
        }
        self
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// Sets the drawing surface size (typically called when the window resizes).
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width.max(1.0);
        self.canvas_height = height.max(1.0);
    }

    /// Gets the current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level, clamped to [0.1, 5].
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = clamp_zoom(zoom);
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * self.zoom_step);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / self.zoom_step);
    }

    /// Zooms while keeping the scene point under `screen_point` fixed on screen.
    pub fn zoom_at(&mut self, screen_point: Point, zoom: f64) {
        let anchor = self.screen_to_scene(screen_point);
        self.zoom = clamp_zoom(zoom);
        self.pan_x = screen_point.x - anchor.x * self.zoom;
        self.pan_y = screen_point.y - anchor.y * self.zoom;
    }

    pub fn pan(&self) -> Point {
        Point::new(self.pan_x, self.pan_y)
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        if x.is_finite() && y.is_finite() {
            self.pan_x = x;
            self.pan_y = y;
        }
    }

    /// Pans by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.set_pan(self.pan_x + dx, self.pan_y + dy);
    }

    /// Converts screen pixels to scene coordinates.
    pub fn screen_to_scene(&self, point: Point) -> Point {
        Point::new(
            (point.x - self.pan_x) / self.zoom,
            (point.y - self.pan_y) / self.zoom,
        )
    }

    /// Converts scene coordinates to screen pixels.
    pub fn scene_to_screen(&self, point: Point) -> Point {
        Point::new(
            point.x * self.zoom + self.pan_x,
            point.y * self.zoom + self.pan_y,
        )
    }

    /// Scene-space rectangle currently visible on the drawing surface.
    pub fn visible_scene_bounds(&self) -> Bounds {
        let top_left = self.screen_to_scene(Point::zero());
        let bottom_right =
            self.screen_to_scene(Point::new(self.canvas_width, self.canvas_height));
        Bounds::from_points(top_left, bottom_right)
    }

    /// Fits the given bounding box into the viewport with padding.
    ///
    /// `padding` is the fraction of the surface reserved on each side
    /// (0.0 - 0.45). Degenerate boxes are ignored.
    pub fn fit_to_bounds(&mut self, bounds: &Bounds, padding: f64) {
        let width = bounds.width();
        let height = bounds.height();
        if !(width > 0.0 && height > 0.0) {
            return;
        }

        let padding_factor = 1.0 - padding.clamp(0.0, 0.45) * 2.0;
        let zoom_x = self.canvas_width * padding_factor / width;
        let zoom_y = self.canvas_height * padding_factor / height;
        self.zoom = clamp_zoom(zoom_x.min(zoom_y));

        let center = bounds.center();
        self.center_on(center);
    }

    /// Fits the bounding box with the default padding.
    pub fn fit_to_view(&mut self, bounds: &Bounds) {
        self.fit_to_bounds(bounds, VIEW_PADDING);
    }

    /// Centers the viewport on a scene point.
    pub fn center_on(&mut self, point: Point) {
        self.pan_x = self.canvas_width / 2.0 - point.x * self.zoom;
        self.pan_y = self.canvas_height / 2.0 - point.y * self.zoom;
    }

    /// Resets to 1:1 zoom with the scene origin at the top-left corner.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Pan: ({:.1}, {:.1})",
            self.zoom, self.pan_x, self.pan_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(default_canvas_width(), default_canvas_height())
    }
}
