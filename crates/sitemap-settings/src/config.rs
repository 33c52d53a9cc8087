//! Configuration for the site-map builder
//!
//! Provides configuration file handling, defaults and validation.
//! Supports JSON and TOML file formats stored in the platform config directory.
//!
//! Configuration is organized into logical sections:
//! - Canvas defaults (scene size, background)
//! - Grid and snapping
//! - Viewport zoom behaviour
//! - Drawing-tool defaults
//! - Undo history depth
//! - Render colors

use crate::error::{SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use sitemap_core::constants::{
    DEFAULT_GRID_SIZE, DEFAULT_SCENE_HEIGHT, DEFAULT_SCENE_WIDTH, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP,
};
use std::path::{Path, PathBuf};

/// File name used under the platform config directory.
pub const CONFIG_FILE_NAME: &str = "sitemap-builder.toml";

/// Default scene settings for newly opened site maps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// Scene width in scene units
    pub width: f64,
    /// Scene height in scene units
    pub height: f64,
    /// Background color (CSS syntax)
    pub background: String,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_SCENE_WIDTH,
            height: DEFAULT_SCENE_HEIGHT,
            background: "#f8fafc".to_string(),
        }
    }
}

/// Grid and snapping settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Draw the grid
    pub enabled: bool,
    /// Cell size in scene units
    pub cell_size: f64,
    /// Snap drops to grid intersections
    pub snap_enabled: bool,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            cell_size: DEFAULT_GRID_SIZE,
            snap_enabled: true,
        }
    }
}

/// Viewport behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    /// Multiplicative zoom step for zoom in / zoom out
    pub zoom_step: f64,
    /// Zoom applied when a site map is opened
    pub initial_zoom: f64,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            zoom_step: ZOOM_STEP,
            initial_zoom: 1.0,
        }
    }
}

/// Defaults for drawing tools and duplication
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingSettings {
    /// Width used when a shape gesture has no horizontal extent
    pub default_width: f64,
    /// Height used when a shape gesture has no vertical extent
    pub default_height: f64,
    /// Width of a new text box
    pub text_width: f64,
    /// Height of a new text box
    pub text_height: f64,
    /// Keep drawing tools active after each creation
    pub pin_tools: bool,
    /// Fill color for primitive shapes
    pub fill: String,
    /// Stroke color for primitive shapes
    pub stroke: String,
    /// Stroke width for primitive shapes
    pub stroke_width: f64,
    /// Default single-duplication offset (x)
    pub duplicate_offset_x: f64,
    /// Default single-duplication offset (y)
    pub duplicate_offset_y: f64,
}

impl Default for DrawingSettings {
    fn default() -> Self {
        Self {
            default_width: 40.0,
            default_height: 40.0,
            text_width: 120.0,
            text_height: 24.0,
            pin_tools: false,
            fill: "#cbd5e1".to_string(),
            stroke: "#334155".to_string(),
            stroke_width: 1.0,
            duplicate_offset_x: 20.0,
            duplicate_offset_y: 20.0,
        }
    }
}

/// Undo/redo history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of undoable entries kept
    pub max_depth: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { max_depth: 100 }
    }
}

/// Render colors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub grid_color: String,
    pub selection_color: String,
    pub label_color: String,
    /// Label font size in screen pixels at zoom 1.0
    pub label_size: f64,
    /// Font family used for labels ("Sans" selects the system default)
    pub label_font: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            grid_color: "#e2e8f0".to_string(),
            selection_color: "#2563eb".to_string(),
            label_color: "#0f172a".to_string(),
            label_size: 12.0,
            label_font: "Sans".to_string(),
        }
    }
}

/// Complete builder configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BuilderConfig {
    pub canvas: CanvasSettings,
    pub grid: GridSettings,
    pub viewport: ViewportSettings,
    pub drawing: DrawingSettings,
    pub history: HistorySettings,
    pub render: RenderSettings,
}

impl BuilderConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default location of the config file, if the platform has a config dir.
    pub fn default_config_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("sitemap-builder").join(CONFIG_FILE_NAME))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no platform config directory".to_string())
            })
    }

    /// Load config from the default location, falling back to defaults when
    /// no file exists yet.
    pub fn load_or_default() -> SettingsResult<Self> {
        let path = Self::default_config_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match extension(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::info!("Loaded builder config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        tracing::info!("Saved builder config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if !(self.canvas.width > 0.0 && self.canvas.height > 0.0) {
            return Err(SettingsError::invalid(
                "canvas",
                "scene width and height must be > 0",
            ));
        }

        if !(self.grid.cell_size.is_finite() && self.grid.cell_size > 0.0) {
            return Err(SettingsError::invalid("grid.cell_size", "must be > 0"));
        }

        if !(self.viewport.zoom_step.is_finite() && self.viewport.zoom_step > 1.0) {
            return Err(SettingsError::invalid("viewport.zoom_step", "must be > 1"));
        }

        if !(MIN_ZOOM..=MAX_ZOOM).contains(&self.viewport.initial_zoom) {
            return Err(SettingsError::invalid(
                "viewport.initial_zoom",
                format!("must lie in [{}, {}]", MIN_ZOOM, MAX_ZOOM),
            ));
        }

        let d = &self.drawing;
        if d.default_width <= 0.0
            || d.default_height <= 0.0
            || d.text_width <= 0.0
            || d.text_height <= 0.0
        {
            return Err(SettingsError::invalid("drawing", "default sizes must be > 0"));
        }

        if d.stroke_width < 0.0 {
            return Err(SettingsError::invalid("drawing.stroke_width", "must be >= 0"));
        }

        if self.history.max_depth == 0 {
            return Err(SettingsError::invalid("history.max_depth", "must be > 0"));
        }

        if self.render.label_size <= 0.0 {
            return Err(SettingsError::invalid("render.label_size", "must be > 0"));
        }

        Ok(())
    }
}

enum Format {
    Json,
    Toml,
}

fn extension(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(SettingsError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}
