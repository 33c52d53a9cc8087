//! # Tools
//!
//! The active interaction mode and the gesture currently in progress.
//!
//! Exactly one [`Tool`] is active at a time, and at most one [`Gesture`] is in
//! flight. Both are plain enums, so combinations such as "panning while drawing"
//! cannot be represented. Tools change only through explicit selection, except
//! that a drawing tool drops back to [`Tool::Select`] after one creation unless
//! it is pinned.

use serde::{Deserialize, Serialize};
use sitemap_core::{Bounds, Point};
use uuid::Uuid;

/// Interaction modes offered by the toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tool {
    /// Click / marquee selection and moving
    #[default]
    Select,
    /// Drag to pan the viewport
    Pan,
    /// Drag out a rectangle
    DrawRectangle,
    /// Drag out a circle / ellipse
    DrawCircle,
    /// Click to place a text box
    Text,
    /// Drag to measure a distance
    Measure,
    /// Click to drop an issue marker
    IssueReport,
}

impl Tool {
    pub const ALL: [Tool; 7] = [
        Tool::Select,
        Tool::Pan,
        Tool::DrawRectangle,
        Tool::DrawCircle,
        Tool::Text,
        Tool::Measure,
        Tool::IssueReport,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tool::Select => "select",
            Tool::Pan => "pan",
            Tool::DrawRectangle => "draw-rectangle",
            Tool::DrawCircle => "draw-circle",
            Tool::Text => "text",
            Tool::Measure => "measure",
            Tool::IssueReport => "issue-report",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }

    /// Tools that create an element or annotation and then return to select.
    pub fn is_creation_tool(&self) -> bool {
        !matches!(self, Tool::Select | Tool::Pan)
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyboard modifier state attached to input events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
    };
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
    };
    pub const CTRL: Modifiers = Modifiers {
        shift: false,
        ctrl: true,
    };
}

/// Raw pointer input in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, modifiers: Modifiers },
    Move { position: Point, modifiers: Modifiers },
    Up { position: Point, modifiers: Modifiers },
}

impl PointerEvent {
    pub fn down(x: f64, y: f64) -> Self {
        PointerEvent::Down {
            position: Point::new(x, y),
            modifiers: Modifiers::NONE,
        }
    }

    pub fn moved(x: f64, y: f64) -> Self {
        PointerEvent::Move {
            position: Point::new(x, y),
            modifiers: Modifiers::NONE,
        }
    }

    pub fn up(x: f64, y: f64) -> Self {
        PointerEvent::Up {
            position: Point::new(x, y),
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(self, modifiers: Modifiers) -> Self {
        match self {
            PointerEvent::Down { position, .. } => PointerEvent::Down {
                position,
                modifiers,
            },
            PointerEvent::Move { position, .. } => PointerEvent::Move {
                position,
                modifiers,
            },
            PointerEvent::Up { position, .. } => PointerEvent::Up {
                position,
                modifiers,
            },
        }
    }

    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Move { position, .. }
            | PointerEvent::Up { position, .. } => *position,
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        match self {
            PointerEvent::Down { modifiers, .. }
            | PointerEvent::Move { modifiers, .. }
            | PointerEvent::Up { modifiers, .. } => *modifiers,
        }
    }
}

/// Keys the builder reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Escape,
    Delete,
    Backspace,
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn ctrl(c: char) -> Self {
        Self {
            key: Key::Char(c),
            modifiers: Modifiers::CTRL,
        }
    }
}

/// Gesture in progress. Points are in scene coordinates except for panning,
/// which tracks screen pixels.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// Moving the selected elements; `before` holds their original state.
    /// `pressed` is the element under the pointer when the gesture began.
    Moving {
        origin: Point,
        last: Point,
        pressed: u64,
        before: Vec<crate::model::Element>,
    },
    /// Rubber-band selection from an empty spot.
    Marquee {
        origin: Point,
        current: Point,
        extend: bool,
    },
    Panning {
        last_screen: Point,
    },
    /// Dragging out a shape or measurement.
    Drawing {
        origin: Point,
        current: Point,
    },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    /// Scene rectangle spanned by a marquee or drawing gesture.
    pub fn rect(&self) -> Option<Bounds> {
        match self {
            Gesture::Marquee {
                origin, current, ..
            }
            | Gesture::Drawing { origin, current } => Some(Bounds::from_points(*origin, *current)),
            _ => None,
        }
    }
}

/// Distance measured with the measure tool
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub start: Point,
    pub end: Point,
    pub distance: f64,
}

impl Measurement {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            distance: start.distance_to(&end),
        }
    }
}

/// Problem flagged on the map with the issue-report tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueMarker {
    pub id: Uuid,
    pub position: Point,
    pub note: String,
}

impl IssueMarker {
    pub fn new(position: Point, note: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            note: note.into(),
        }
    }
}

/// Annotations created by the measure and issue-report tools
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub measurements: Vec<Measurement>,
    pub issues: Vec<IssueMarker>,
}

/// Active tool, pin flag and gesture
#[derive(Debug, Clone, Default)]
pub struct ToolState {
    tool: Tool,
    pinned: bool,
    gesture: Gesture,
}

impl ToolState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switches tool, abandoning any gesture. Returns true if the tool changed.
    pub fn set_tool(&mut self, tool: Tool) -> bool {
        self.gesture = Gesture::Idle;
        if self.tool == tool {
            return false;
        }
        tracing::debug!("Tool changed: {} -> {}", self.tool, tool);
        self.tool = tool;
        true
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Keeps creation tools active after each creation.
    pub fn pin(&mut self, pinned: bool) {
        self.pinned = pinned;
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn gesture_mut(&mut self) -> &mut Gesture {
        &mut self.gesture
    }

    pub fn begin(&mut self, gesture: Gesture) {
        self.gesture = gesture;
    }

    /// Ends the gesture, returning it.
    pub fn take_gesture(&mut self) -> Gesture {
        std::mem::take(&mut self.gesture)
    }

    /// Called after a creation tool produced something: returns to select
    /// unless pinned. Returns true if the tool changed.
    pub fn finish_creation(&mut self) -> bool {
        if self.tool.is_creation_tool() && !self.pinned {
            self.set_tool(Tool::Select)
        } else {
            false
        }
    }
}

/// Rectangle for a drawn shape: the dragged extent, or a default-size box
/// at the origin when the drag had no extent on either axis.
pub fn drawn_rect(origin: Point, current: Point, default_width: f64, default_height: f64) -> Bounds {
    let dragged = Bounds::from_points(origin, current);
    let width = if dragged.width() > 0.0 {
        dragged.width()
    } else {
        default_width
    };
    let height = if dragged.height() > 0.0 {
        dragged.height()
    } else {
        default_height
    };
    Bounds::from_rect(dragged.min_x, dragged.min_y, width, height)
}
