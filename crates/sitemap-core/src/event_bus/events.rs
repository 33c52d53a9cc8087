//! Event type definitions for the event bus.
//!
//! This module defines the events a builder session emits for host
//! integration, organized by category. Events are cloneable and serializable
//! for logging/replay.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Root event enum for all builder events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppEvent {
    /// Selection set changes
    Selection(SelectionEvent),
    /// Element list changes
    Scene(SceneEvent),
    /// Active tool changes
    Tool(ToolEvent),
    /// Drag-drop gesture outcomes
    Drag(DragEvent),
    /// Save/load of site maps
    File(FileEvent),
}

impl AppEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            AppEvent::Selection(_) => EventCategory::Selection,
            AppEvent::Scene(_) => EventCategory::Scene,
            AppEvent::Tool(_) => EventCategory::Tool,
            AppEvent::Drag(_) => EventCategory::Drag,
            AppEvent::File(_) => EventCategory::File,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            AppEvent::Selection(e) => e.description(),
            AppEvent::Scene(e) => e.description(),
            AppEvent::Tool(e) => e.description(),
            AppEvent::Drag(e) => e.description(),
            AppEvent::File(e) => e.description(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Selection events.
    Selection,
    /// Scene (element list) events.
    Scene,
    /// Tool events.
    Tool,
    /// Drag-drop events.
    Drag,
    /// File events.
    File,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Selection => write!(f, "Selection"),
            EventCategory::Scene => write!(f, "Scene"),
            EventCategory::Tool => write!(f, "Tool"),
            EventCategory::Drag => write!(f, "Drag"),
            EventCategory::File => write!(f, "File"),
        }
    }
}

/// Selection-related events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectionEvent {
    /// The selection set changed.
    Changed {
        /// Selected element ids, in selection order.
        ids: Vec<u64>,
    },
}

impl SelectionEvent {
    /// Get a short description
    pub fn description(&self) -> String {
        match self {
            SelectionEvent::Changed { ids } => format!("Selection changed: {} element(s)", ids.len()),
        }
    }
}

/// Scene-related events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneEvent {
    /// The element list changed (insert, delete, or in-place edit).
    Changed {
        /// All element ids currently in the scene, in draw order.
        element_ids: Vec<u64>,
    },
    /// Grid visibility or cell size changed.
    GridChanged {
        /// Whether the grid is drawn.
        enabled: bool,
        /// Grid cell size in scene units.
        cell_size: f64,
    },
}

impl SceneEvent {
    /// Get a short description
    pub fn description(&self) -> String {
        match self {
            SceneEvent::Changed { element_ids } => {
                format!("Scene changed: {} element(s)", element_ids.len())
            }
            SceneEvent::GridChanged { enabled, cell_size } => {
                format!("Grid changed: enabled={} cell={}", enabled, cell_size)
            }
        }
    }
}

/// Tool-related events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ToolEvent {
    /// A different tool became active.
    Changed {
        /// Name of the newly active tool.
        tool: String,
    },
}

impl ToolEvent {
    /// Get a short description
    pub fn description(&self) -> String {
        match self {
            ToolEvent::Changed { tool } => format!("Tool changed: {}", tool),
        }
    }
}

/// Drag-drop events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DragEvent {
    /// A dragged item was dropped on a zone.
    Dropped {
        /// Type of the dropped item.
        item_type: String,
        /// Zone that accepted the drop.
        zone: String,
        /// Drop point in scene coordinates (after snapping).
        point: Point,
    },
    /// A drag was cancelled without any scene mutation.
    Cancelled {
        /// Type of the cancelled item.
        item_type: String,
    },
}

impl DragEvent {
    /// Get a short description
    pub fn description(&self) -> String {
        match self {
            DragEvent::Dropped {
                item_type,
                zone,
                point,
            } => format!("Dropped {} on {} at {}", item_type, zone, point),
            DragEvent::Cancelled { item_type } => format!("Drag of {} cancelled", item_type),
        }
    }
}

/// Site-map file events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FileEvent {
    /// A site map was saved.
    Saved {
        /// Site map identifier.
        id: String,
    },
    /// A site map was loaded.
    Loaded {
        /// Site map identifier.
        id: String,
        /// Number of elements loaded.
        element_count: usize,
    },
}

impl FileEvent {
    /// Get a short description
    pub fn description(&self) -> String {
        match self {
            FileEvent::Saved { id } => format!("Saved site map {}", id),
            FileEvent::Loaded { id, element_count } => {
                format!("Loaded site map {} ({} elements)", id, element_count)
            }
        }
    }
}
