use ::color::{parse_color, Srgb};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An 8-bit sRGB color with alpha.
///
/// Parsed from any CSS color syntax (`#f59e0b`, `rgb(245 158 11)`, `orange`)
/// and serialized as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    /// Tailwind amber-500, used by power equipment in the default catalog.
    pub const AMBER: Color = Color::rgb(0xf5, 0x9e, 0x0b);

    /// Parses a CSS color string.
    pub fn parse(value: &str) -> Result<Self, String> {
        let parsed =
            parse_color(value.trim()).map_err(|e| format!("Invalid color '{}': {}", value, e))?;
        let rgba = parsed.to_alpha_color::<Srgb>().to_rgba8();
        Ok(Self::rgba(rgba.r, rgba.g, rgba.b, rgba.a))
    }

    /// Parses a CSS color string, falling back when it is invalid.
    pub fn parse_or(value: &str, fallback: Color) -> Self {
        Self::parse(value).unwrap_or_else(|err| {
            tracing::warn!("{}; using {}", err, fallback);
            fallback
        })
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    pub fn to_tiny_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Color::parse(&raw).map_err(serde::de::Error::custom)
    }
}
