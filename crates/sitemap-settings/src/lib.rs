//! Site-Map Builder Settings Crate
//!
//! Handles builder configuration: defaults, validation and persistence.

pub mod config;
pub mod error;

pub use config::{
    BuilderConfig, CanvasSettings, DrawingSettings, GridSettings, HistorySettings,
    RenderSettings, ViewportSettings,
};
pub use error::{SettingsError, SettingsResult};
