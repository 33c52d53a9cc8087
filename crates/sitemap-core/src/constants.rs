//! Shared constants for the site-map builder.

/// Smallest zoom factor the viewport accepts.
pub const MIN_ZOOM: f64 = 0.1;

/// Largest zoom factor the viewport accepts.
pub const MAX_ZOOM: f64 = 5.0;

/// Default multiplicative step for zoom in / zoom out.
pub const ZOOM_STEP: f64 = 1.2;

/// Fraction of the viewport reserved as padding by fit-to-view.
pub const VIEW_PADDING: f64 = 0.05;

/// Default grid cell size in scene units.
pub const DEFAULT_GRID_SIZE: f64 = 20.0;

/// Default scene width in scene units.
pub const DEFAULT_SCENE_WIDTH: f64 = 1200.0;

/// Default scene height in scene units.
pub const DEFAULT_SCENE_HEIGHT: f64 = 800.0;

/// Drag item type produced by catalog palettes.
pub const ELEMENT_TEMPLATE_ITEM: &str = "element-template";

/// Identifier of the drop zone covering the whole canvas.
pub const CANVAS_ZONE_ID: &str = "canvas";

/// Suffix appended to duplicated element labels.
pub const COPY_SUFFIX: &str = " (Copy)";
