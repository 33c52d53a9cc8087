//! # Site-Map Builder
//!
//! An interactive builder for event and venue site maps:
//! - Drag element templates (stages, tents, generators, ...) from a catalog
//!   onto a pannable, zoomable canvas
//! - Select, move, align, distribute, flip and rotate elements
//! - Duplicate selections singly, as multiple copies, or as linear, grid and
//!   radial arrays
//! - Undo/redo, snapping to a grid, and JSON site-map documents
//!
//! ## Architecture
//!
//! The builder is organized as a workspace with multiple crates:
//!
//! 1. **sitemap-core** - Geometry, errors, constants and the event bus
//! 2. **sitemap-settings** - Builder configuration (JSON/TOML)
//! 3. **sitemap-designer** - Scene, catalog, drag-drop, viewport, renderer,
//!    tools, selection, duplication and the `BuilderSession` that ties them
//! 4. **sitemap-builder** - Command-line front end (render, catalog, place,
//!    duplication previews)

pub mod cli;

pub use sitemap_core::{
    event_bus, AppEvent, Bounds, CatalogError, DragError, ElementError, Error, EventBus,
    EventFilter, PersistenceError, Point, Result,
};
pub use sitemap_designer as designer;
pub use sitemap_designer::{
    BuilderSession, Catalog, DragItem, DuplicationGenerator, DuplicationOptions, Element,
    SiteMapFile, TemplateLibrary, Tool, ToolbarAction, Viewport,
};
pub use sitemap_settings::BuilderConfig;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Console output on stderr (stdout carries command output)
/// - RUST_LOG environment variable support, `default_level` otherwise
/// - JSON lines instead of human-readable output when `json` is set
pub fn init_logging(default_level: &str, json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow::anyhow!("Invalid log level '{}': {}", default_level, e))?;

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true)
                    .with_line_number(true),
            )
            .try_init()?;
    }

    Ok(())
}
