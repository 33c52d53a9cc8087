//! # Element Catalog
//!
//! Read-only library of element templates that palettes drag onto the canvas.
//!
//! The builder only consumes the [`Catalog`] trait (`by_id`, `by_category`,
//! `search`); [`TemplateLibrary`] is the in-memory implementation that ships
//! with a set of common event-site templates and can be loaded from or saved
//! to JSON.

use crate::model::{Color, Element, ElementProperties, ElementShape};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sitemap_core::{CatalogError, ElementError, Point};
use std::collections::BTreeMap;
use std::path::Path;

/// Template categories for organizing the palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateCategory {
    /// Performance stages and platforms
    Stage,
    /// Tents and marquees
    Tent,
    /// Generators and distribution
    Power,
    /// Toilets and washing facilities
    Sanitation,
    /// Food stalls and bars
    FoodAndDrink,
    /// Water and waste points
    Utilities,
    /// First aid, barriers and security
    Safety,
    /// Gates and entrances
    Access,
    /// Vehicle parking
    Parking,
    /// User-defined templates
    Custom,
}

impl TemplateCategory {
    pub const ALL: [TemplateCategory; 10] = [
        TemplateCategory::Stage,
        TemplateCategory::Tent,
        TemplateCategory::Power,
        TemplateCategory::Sanitation,
        TemplateCategory::FoodAndDrink,
        TemplateCategory::Utilities,
        TemplateCategory::Safety,
        TemplateCategory::Access,
        TemplateCategory::Parking,
        TemplateCategory::Custom,
    ];

    /// Get category as string
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateCategory::Stage => "stage",
            TemplateCategory::Tent => "tent",
            TemplateCategory::Power => "power",
            TemplateCategory::Sanitation => "sanitation",
            TemplateCategory::FoodAndDrink => "food-and-drink",
            TemplateCategory::Utilities => "utilities",
            TemplateCategory::Safety => "safety",
            TemplateCategory::Access => "access",
            TemplateCategory::Parking => "parking",
            TemplateCategory::Custom => "custom",
        }
    }

    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

impl std::fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reusable element definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementTemplate {
    /// Unique template identifier, also used as the element type tag
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: TemplateCategory,
    #[serde(default)]
    pub shape: ElementShape,
    pub width: f64,
    pub height: f64,
    pub fill: Color,
    pub stroke: Color,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    /// Search keywords
    #[serde(default)]
    pub tags: Vec<String>,
    /// Capacity / utility metadata copied into new elements
    #[serde(default)]
    pub properties: ElementProperties,
}

fn default_stroke_width() -> f64 {
    1.0
}

impl ElementTemplate {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: TemplateCategory,
        width: f64,
        height: f64,
        fill: Color,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category,
            shape: ElementShape::Rectangle,
            width,
            height,
            fill,
            stroke: Color::rgb(0x33, 0x41, 0x55),
            stroke_width: default_stroke_width(),
            tags: Vec::new(),
            properties: ElementProperties::default(),
        }
    }

    pub fn with_shape(mut self, shape: ElementShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_properties(mut self, properties: ElementProperties) -> Self {
        self.properties = properties;
        self
    }

    /// Case-insensitive substring match over name, id, category and tags.
    pub fn matches_search(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&q)
            || self.id.to_lowercase().contains(&q)
            || self.category.as_str().contains(&q)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&q))
    }

    /// Rejects templates whose default size could never produce a valid element.
    pub fn validate(&self) -> std::result::Result<(), CatalogError> {
        if self.id.trim().is_empty() {
            return Err(CatalogError::InvalidTemplate {
                id: self.id.clone(),
                reason: "empty id".to_string(),
            });
        }
        if !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
        {
            return Err(CatalogError::InvalidTemplate {
                id: self.id.clone(),
                reason: format!("default size {}x{} must be > 0", self.width, self.height),
            });
        }
        Ok(())
    }

    /// Builds a new element at `position` (top-left) with this template's
    /// geometry, style, label and metadata.
    pub fn instantiate(&self, id: u64, position: Point) -> std::result::Result<Element, ElementError> {
        let element = Element::new(
            id,
            self.id.clone(),
            self.shape,
            position,
            self.width,
            self.height,
        )?
        .with_fill(self.fill)
        .with_stroke(self.stroke, self.stroke_width)
        .with_label(self.name.clone())
        .with_properties(self.properties.clone());
        Ok(element)
    }
}

/// Query interface the builder uses to look up templates.
pub trait Catalog {
    fn by_id(&self, id: &str) -> std::result::Result<ElementTemplate, CatalogError>;
    fn by_category(&self, category: TemplateCategory) -> Vec<ElementTemplate>;
    fn search(&self, query: &str) -> Vec<ElementTemplate>;
}

/// Extracts the template id from a drag payload.
///
/// Accepts either a bare string or an object with a `template_id` (or `id`) field.
pub fn template_id_from_payload(
    payload: &serde_json::Value,
) -> std::result::Result<&str, CatalogError> {
    match payload {
        serde_json::Value::String(id) => Ok(id.as_str()),
        serde_json::Value::Object(map) => map
            .get("template_id")
            .or_else(|| map.get("id"))
            .and_then(|v| v.as_str())
            .ok_or(CatalogError::MissingTemplateReference),
        _ => Err(CatalogError::MissingTemplateReference),
    }
}

/// In-memory template library
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateLibrary {
    templates: BTreeMap<String, ElementTemplate>,
}

impl TemplateLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Library pre-populated with the built-in site templates
    pub fn with_defaults() -> Self {
        let mut library = Self::new();
        for template in default_templates() {
            library.templates.insert(template.id.clone(), template);
        }
        library
    }

    /// Add template to library
    pub fn add_template(
        &mut self,
        template: ElementTemplate,
    ) -> std::result::Result<(), CatalogError> {
        template.validate()?;
        if self.templates.contains_key(&template.id) {
            return Err(CatalogError::InvalidTemplate {
                id: template.id,
                reason: "a template with this id already exists".to_string(),
            });
        }
        tracing::debug!("Added template '{}'", template.id);
        self.templates.insert(template.id.clone(), template);
        Ok(())
    }

    /// Remove template by ID
    pub fn remove_template(&mut self, id: &str) -> Option<ElementTemplate> {
        self.templates.remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&ElementTemplate> {
        self.templates.get(id)
    }

    /// All templates ordered by id
    pub fn list_all(&self) -> Vec<&ElementTemplate> {
        self.templates.values().collect()
    }

    pub fn count(&self) -> usize {
        self.templates.len()
    }

    /// Categories that have at least one template
    pub fn categories(&self) -> Vec<TemplateCategory> {
        let mut cats: Vec<TemplateCategory> =
            self.templates.values().map(|t| t.category).collect();
        cats.sort();
        cats.dedup();
        cats
    }

    /// Load a library from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading template library {}", path.display()))?;
        let library: TemplateLibrary = serde_json::from_str(&content)
            .with_context(|| format!("parsing template library {}", path.display()))?;
        for template in library.templates.values() {
            template.validate()?;
        }
        tracing::info!(
            "Loaded {} templates from {}",
            library.count(),
            path.display()
        );
        Ok(library)
    }

    /// Save the library to a JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("writing template library {}", path.display()))?;
        Ok(())
    }
}

impl Catalog for TemplateLibrary {
    fn by_id(&self, id: &str) -> std::result::Result<ElementTemplate, CatalogError> {
        self.templates
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogError::TemplateNotFound(id.to_string()))
    }

    fn by_category(&self, category: TemplateCategory) -> Vec<ElementTemplate> {
        self.templates
            .values()
            .filter(|t| t.category == category)
            .cloned()
            .collect()
    }

    fn search(&self, query: &str) -> Vec<ElementTemplate> {
        self.templates
            .values()
            .filter(|t| t.matches_search(query))
            .cloned()
            .collect()
    }
}

fn props(
    capacity: Option<u32>,
    power_kw: Option<f64>,
    water_required: bool,
    accessible: bool,
) -> ElementProperties {
    ElementProperties {
        capacity,
        power_kw,
        water_required,
        accessible,
        ..Default::default()
    }
}

fn default_templates() -> Vec<ElementTemplate> {
    use TemplateCategory::*;

    vec![
        ElementTemplate::new("main-stage", "Main Stage", Stage, 200.0, 120.0, Color::rgb(0x7c, 0x3a, 0xed))
            .with_description("Covered performance stage with front-of-house area")
            .with_tags(&["stage", "performance", "music"])
            .with_properties(props(Some(5000), Some(120.0), false, true)),
        ElementTemplate::new("marquee-tent", "Marquee Tent", Tent, 120.0, 80.0, Color::rgb(0xf1, 0xf5, 0xf9))
            .with_description("Clear-span marquee")
            .with_tags(&["tent", "marquee", "shelter"])
            .with_properties(props(Some(300), Some(10.0), false, true)),
        ElementTemplate::new("generator", "Generator", Power, 60.0, 40.0, Color::AMBER)
            .with_description("Diesel generator, 100 kVA")
            .with_tags(&["power", "electric", "generator"])
            .with_properties(props(None, Some(-100.0), false, false)),
        ElementTemplate::new("toilet-block", "Toilet Block", Sanitation, 80.0, 40.0, Color::rgb(0x0e, 0xa5, 0xe9))
            .with_tags(&["toilet", "wc", "sanitation"])
            .with_properties(props(Some(12), Some(2.0), true, true)),
        ElementTemplate::new("food-stall", "Food Stall", FoodAndDrink, 40.0, 40.0, Color::rgb(0xef, 0x44, 0x44))
            .with_tags(&["food", "vendor", "catering"])
            .with_properties(props(None, Some(5.0), true, false)),
        ElementTemplate::new("bar", "Bar", FoodAndDrink, 100.0, 40.0, Color::rgb(0x14, 0xb8, 0xa6))
            .with_tags(&["bar", "drinks", "beverage"])
            .with_properties(props(Some(200), Some(10.0), true, true)),
        ElementTemplate::new("water-point", "Water Point", Utilities, 20.0, 20.0, Color::rgb(0x3b, 0x82, 0xf6))
            .with_shape(ElementShape::Ellipse)
            .with_tags(&["water", "tap", "drinking"])
            .with_properties(props(None, None, true, true)),
        ElementTemplate::new("first-aid", "First Aid Post", Safety, 60.0, 40.0, Color::rgb(0xdc, 0x26, 0x26))
            .with_tags(&["medical", "first aid", "safety"])
            .with_properties(props(None, Some(3.0), true, true)),
        ElementTemplate::new("entrance-gate", "Entrance Gate", Access, 120.0, 20.0, Color::rgb(0x16, 0xa3, 0x4a))
            .with_tags(&["gate", "entrance", "ticketing"])
            .with_properties(props(None, Some(2.0), false, true)),
        ElementTemplate::new("crowd-barrier", "Crowd Barrier", Safety, 100.0, 10.0, Color::rgb(0x64, 0x74, 0x8b))
            .with_tags(&["barrier", "fence", "crowd"]),
        ElementTemplate::new("parking-area", "Parking Area", Parking, 300.0, 200.0, Color::rgb(0x94, 0xa3, 0xb8))
            .with_tags(&["parking", "cars", "vehicles"])
            .with_properties(props(Some(400), None, false, true)),
        ElementTemplate::new("waste-point", "Waste Point", Utilities, 30.0, 30.0, Color::rgb(0x78, 0x71, 0x6c))
            .with_shape(ElementShape::Ellipse)
            .with_tags(&["waste", "bins", "recycling"]),
    ]
}
