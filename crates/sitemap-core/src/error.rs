//! Error handling for the site-map builder
//!
//! Provides error types for every layer of the builder core:
//! - Drag errors (drag-drop state machine violations)
//! - Element errors (invalid geometry, unknown ids)
//! - Catalog errors (template lookups)
//! - Persistence errors (save/load of site maps)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Drag-drop error type
///
/// Only one drag gesture may be active at a time; violations are reported
/// instead of silently replacing the in-progress drag.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DragError {
    /// A drag gesture is already in progress
    #[error("Drag already in progress for item type '{current}'")]
    AlreadyDragging {
        /// The item type of the drag that is currently active.
        current: String,
    },

    /// No drag gesture is active
    #[error("No drag in progress")]
    NotDragging,
}

/// Element error type
///
/// Represents invalid element data detected at creation or mutation time.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ElementError {
    /// Width or height is not strictly positive (or not finite)
    #[error("Invalid element size {width}x{height}: width and height must be > 0")]
    InvalidSize {
        /// The rejected width.
        width: f64,
        /// The rejected height.
        height: f64,
    },

    /// Position is not finite
    #[error("Invalid element position ({x}, {y})")]
    InvalidPosition {
        /// The rejected x coordinate.
        x: f64,
        /// The rejected y coordinate.
        y: f64,
    },

    /// No element with this id exists in the scene
    #[error("Element {0} not found")]
    NotFound(u64),

    /// An element with this id already exists in the scene
    #[error("Element id {0} already in use")]
    DuplicateId(u64),

    /// The id leaves no room for a successor, so the counter cannot move past it
    #[error("Element id {0} is out of range")]
    IdOutOfRange(u64),
}

/// Catalog error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Template lookup failed
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// Template data could not be used to build an element
    #[error("Invalid template '{id}': {reason}")]
    InvalidTemplate {
        /// The template identifier.
        id: String,
        /// Why the template is unusable.
        reason: String,
    },

    /// A drag payload did not reference a template
    #[error("Drag payload does not reference a template")]
    MissingTemplateReference,
}

/// Persistence error type
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// No stored site map with this id
    #[error("Site map not found: {0}")]
    NotFound(String),

    /// The stored document uses an unknown format version
    #[error("Unsupported site map format version: {0}")]
    UnsupportedVersion(String),

    /// I/O failure while reading or writing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Main error type for the site-map builder
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Drag-drop error
    #[error(transparent)]
    Drag(#[from] DragError),

    /// Element error
    #[error(transparent)]
    Element(#[from] ElementError),

    /// Catalog error
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Persistence error
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a drag error
    pub fn is_drag_error(&self) -> bool {
        matches!(self, Error::Drag(_))
    }

    /// Check if this is an element error
    pub fn is_element_error(&self) -> bool {
        matches!(self, Error::Element(_))
    }

    /// Check if this is a persistence error
    pub fn is_persistence_error(&self) -> bool {
        matches!(self, Error::Persistence(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
