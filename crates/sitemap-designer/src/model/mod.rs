//! Scene data model: elements, their shapes, colors and metadata.

mod color;
mod element;

pub use self::color::Color;
pub use self::element::{normalize_degrees, Element, ElementProperties, ElementShape};
pub use sitemap_core::{Bounds, Point};
