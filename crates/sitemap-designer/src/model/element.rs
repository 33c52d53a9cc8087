use serde::{Deserialize, Serialize};
use sitemap_core::{Bounds, ElementError, Point};
use std::collections::BTreeMap;

use super::Color;

/// How an element is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ElementShape {
    /// Filled, stroked rectangle covering the element bounds.
    #[default]
    Rectangle,
    /// Ellipse inscribed in the element bounds.
    Ellipse,
    /// Label only, with a light box behind it.
    Text,
}

impl ElementShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementShape::Rectangle => "rectangle",
            ElementShape::Ellipse => "ellipse",
            ElementShape::Text => "text",
        }
    }
}

/// Site-planning metadata carried by an element.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementProperties {
    /// People the element holds (stages, tents, seating).
    pub capacity: Option<u32>,
    /// Electrical demand in kW; negative for supply (generators).
    pub power_kw: Option<f64>,
    /// Needs a water connection.
    pub water_required: bool,
    /// Step-free / wheelchair accessible.
    pub accessible: bool,
    /// Drag payload the element was created from, kept verbatim.
    pub payload: Option<serde_json::Value>,
    /// Free-form extra properties.
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// One placed, styled, labeled object in a scene.
///
/// Position is the top-left corner of the unrotated bounds; rotation (degrees)
/// is applied around the center when drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: u64,
    /// Template id or primitive name ("rectangle", "circle", "text").
    pub element_type: String,
    pub shape: ElementShape,
    pub x: f64,
    pub y: f64,
    width: f64,
    height: f64,
    pub rotation: f64,
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: f64,
    pub label: String,
    #[serde(default)]
    pub properties: ElementProperties,
}

impl Element {
    /// Creates an element, rejecting non-positive or non-finite geometry.
    pub fn new(
        id: u64,
        element_type: impl Into<String>,
        shape: ElementShape,
        position: Point,
        width: f64,
        height: f64,
    ) -> Result<Self, ElementError> {
        validate_size(width, height)?;
        validate_position(position)?;
        Ok(Self {
            id,
            element_type: element_type.into(),
            shape,
            x: position.x,
            y: position.y,
            width,
            height,
            rotation: 0.0,
            fill: Color::WHITE,
            stroke: Color::BLACK,
            stroke_width: 1.0,
            label: String::new(),
            properties: ElementProperties::default(),
        })
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_stroke(mut self, stroke: Color, width: f64) -> Self {
        self.stroke = stroke;
        self.stroke_width = width.max(0.0);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.set_rotation(degrees);
        self
    }

    pub fn with_properties(mut self, properties: ElementProperties) -> Self {
        self.properties = properties;
        self
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Axis-aligned bounds of the unrotated element.
    pub fn bounds(&self) -> Bounds {
        Bounds::from_rect(self.x, self.y, self.width, self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Point-in-rectangle test against the element bounds.
    pub fn contains_point(&self, point: Point) -> bool {
        self.bounds().contains(point)
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    pub fn set_position(&mut self, position: Point) -> Result<(), ElementError> {
        validate_position(position)?;
        self.x = position.x;
        self.y = position.y;
        Ok(())
    }

    /// Moves the element so its center lands on `center`.
    pub fn set_center(&mut self, center: Point) {
        self.x = center.x - self.width / 2.0;
        self.y = center.y - self.height / 2.0;
    }

    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), ElementError> {
        validate_size(width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Sets rotation in degrees, normalized to [0, 360).
    pub fn set_rotation(&mut self, degrees: f64) {
        self.rotation = normalize_degrees(degrees);
    }

    /// Re-checks the geometry invariants (used after deserialization).
    pub fn validate(&self) -> Result<(), ElementError> {
        validate_size(self.width, self.height)?;
        validate_position(self.position())
    }
}

/// Normalizes an angle in degrees to [0, 360).
pub fn normalize_degrees(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let normalized = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

fn validate_size(width: f64, height: f64) -> Result<(), ElementError> {
    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(ElementError::InvalidSize { width, height })
    }
}

fn validate_position(position: Point) -> Result<(), ElementError> {
    if position.is_finite() {
        Ok(())
    } else {
        Err(ElementError::InvalidPosition {
            x: position.x,
            y: position.y,
        })
    }
}
