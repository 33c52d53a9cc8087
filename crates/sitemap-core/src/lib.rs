//! # Site-Map Builder Core
//!
//! Core types shared by the site-map builder crates:
//! geometry primitives, the error hierarchy, and the event bus used to
//! notify the host about selection, scene, tool and drag changes.

pub mod constants;
pub mod error;
pub mod event_bus;
pub mod geometry;

pub use error::{CatalogError, DragError, ElementError, Error, PersistenceError, Result};

pub use event_bus::{
    AppEvent, DragEvent, EventBus, EventCategory, EventFilter, FileEvent, SceneEvent,
    SelectionEvent, SubscriptionId, ToolEvent,
};

pub use geometry::{snap_to_grid, snap_to_grid_within, Bounds, Point};
