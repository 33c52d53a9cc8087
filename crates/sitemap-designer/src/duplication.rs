//! # Duplication Patterns
//!
//! Turns a selection plus [`DuplicationOptions`] into new element placements.
//!
//! Supports:
//! - Single copies with an offset, optionally mirrored per axis
//! - Multiple copies stepping by a fixed spacing
//! - Arrays: linear (one axis), grid (row-major) and radial (evenly spaced on
//!   a circle)
//! - Previews that compute positions and a bounding box without committing
//!
//! The generator is pure: it never mutates the source elements and draws every
//! new id from the supplied [`IdSource`].

use serde::{Deserialize, Serialize};
use sitemap_core::constants::COPY_SUFFIX;
use sitemap_core::{Bounds, Point};
use std::f64::consts::TAU;

use crate::model::{normalize_degrees, Element};
use crate::scene::IdSource;

/// Upper bound for `count`, `rows`, `columns` and the copies of one array
/// (`rows * columns`).
pub const MAX_PATTERN_SIZE: u32 = 10_000;

/// Axis flip applied to a single duplication offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MirrorMode {
    #[default]
    None,
    /// Negates the X offset
    Horizontal,
    /// Negates the Y offset
    Vertical,
    /// Negates both offsets
    Both,
}

impl MirrorMode {
    /// Applies the mirror to an offset.
    pub fn apply(self, offset: Point) -> Point {
        match self {
            MirrorMode::None => offset,
            MirrorMode::Horizontal => Point::new(-offset.x, offset.y),
            MirrorMode::Vertical => Point::new(offset.x, -offset.y),
            MirrorMode::Both => -offset,
        }
    }
}

/// Represents different types of array layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayType {
    /// All copies along one axis
    Linear,
    /// Rows and columns
    Grid,
    /// Evenly spaced around a circle
    Radial,
}

/// How copies are laid out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum DuplicationOptions {
    Single {
        offset_x: f64,
        offset_y: f64,
        #[serde(default)]
        mirror: MirrorMode,
    },
    Multiple {
        count: u32,
        spacing_x: f64,
        spacing_y: f64,
    },
    Array {
        array_type: ArrayType,
        rows: u32,
        columns: u32,
        #[serde(default)]
        spacing: f64,
        /// Rotation in degrees added to every linear or radial copy
        #[serde(default)]
        angle: f64,
        #[serde(default)]
        radius: f64,
    },
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn non_negative(value: f64) -> f64 {
    finite_or_zero(value).max(0.0)
}

fn clamp_size(value: u32) -> u32 {
    value.clamp(1, MAX_PATTERN_SIZE)
}

impl DuplicationOptions {
    pub fn single(offset_x: f64, offset_y: f64) -> Self {
        DuplicationOptions::Single {
            offset_x,
            offset_y,
            mirror: MirrorMode::None,
        }
    }

    pub fn mirrored(offset_x: f64, offset_y: f64, mirror: MirrorMode) -> Self {
        DuplicationOptions::Single {
            offset_x,
            offset_y,
            mirror,
        }
    }

    pub fn multiple(count: u32, spacing_x: f64, spacing_y: f64) -> Self {
        DuplicationOptions::Multiple {
            count,
            spacing_x,
            spacing_y,
        }
    }

    pub fn grid(rows: u32, columns: u32, spacing: f64) -> Self {
        DuplicationOptions::Array {
            array_type: ArrayType::Grid,
            rows,
            columns,
            spacing,
            angle: 0.0,
            radius: 0.0,
        }
    }

    pub fn linear(rows: u32, columns: u32, spacing: f64, angle: f64) -> Self {
        DuplicationOptions::Array {
            array_type: ArrayType::Linear,
            rows,
            columns,
            spacing,
            angle,
            radius: 0.0,
        }
    }

    pub fn radial(rows: u32, columns: u32, radius: f64, angle: f64) -> Self {
        DuplicationOptions::Array {
            array_type: ArrayType::Radial,
            rows,
            columns,
            spacing: 0.0,
            angle,
            radius,
        }
    }

    /// Clamps counts into [1, `MAX_PATTERN_SIZE`] and replaces non-finite
    /// values with 0. Arrays keep `rows` and shrink `columns` until
    /// `rows * columns` fits the same bound. Array spacing and radius are also floored at 0;
    /// single offsets and multiple spacings keep their sign (direction).
    pub fn validated(&self) -> Self {
        match *self {
            DuplicationOptions::Single {
                offset_x,
                offset_y,
                mirror,
            } => DuplicationOptions::Single {
                offset_x: finite_or_zero(offset_x),
                offset_y: finite_or_zero(offset_y),
                mirror,
            },
            DuplicationOptions::Multiple {
                count,
                spacing_x,
                spacing_y,
            } => DuplicationOptions::Multiple {
                count: clamp_size(count),
                spacing_x: finite_or_zero(spacing_x),
                spacing_y: finite_or_zero(spacing_y),
            },
            DuplicationOptions::Array {
                array_type,
                rows,
                columns,
                spacing,
                angle,
                radius,
            } => {
                let rows = clamp_size(rows);
                DuplicationOptions::Array {
                    array_type,
                    rows,
                    columns: clamp_size(columns).min(MAX_PATTERN_SIZE / rows),
                    spacing: non_negative(spacing),
                    angle: finite_or_zero(angle),
                    radius: non_negative(radius),
                }
            }
        }
    }

    /// Number of copies emitted per selected element.
    pub fn copies_per_element(&self) -> usize {
        match self.validated() {
            DuplicationOptions::Single { .. } => 1,
            DuplicationOptions::Multiple { count, .. } => count as usize,
            DuplicationOptions::Array { rows, columns, .. } => rows as usize * columns as usize,
        }
    }

    /// Rotation (degrees) added to each copy.
    fn copy_rotation(&self) -> f64 {
        match self {
            DuplicationOptions::Array {
                array_type: ArrayType::Linear | ArrayType::Radial,
                angle,
                ..
            } => *angle,
            _ => 0.0,
        }
    }
}

/// Positions computed by a preview, plus the area they cover
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicationPreview {
    /// Top-left position of every copy that would be created
    pub positions: Vec<Point>,
    /// Area each copy would cover, in the same order as `positions`
    pub footprints: Vec<Bounds>,
    /// Extent of the positions padded by one element footprint, `None` when
    /// nothing is selected
    pub bounds: Option<Bounds>,
}

impl DuplicationPreview {
    pub fn count(&self) -> usize {
        self.positions.len()
    }
}

/// Generator for duplication patterns
pub struct DuplicationGenerator;

impl DuplicationGenerator {
    /// Offsets of every copy relative to its source, after input validation.
    pub fn offsets(options: &DuplicationOptions) -> Vec<Point> {
        match options.validated() {
            DuplicationOptions::Single {
                offset_x,
                offset_y,
                mirror,
            } => vec![mirror.apply(Point::new(offset_x, offset_y))],
            DuplicationOptions::Multiple {
                count,
                spacing_x,
                spacing_y,
            } => (1..=count)
                .map(|i| Point::new(i as f64 * spacing_x, i as f64 * spacing_y))
                .collect(),
            DuplicationOptions::Array {
                array_type,
                rows,
                columns,
                spacing,
                radius,
                ..
            } => match array_type {
                ArrayType::Linear => Self::linear_offsets(rows, columns, spacing),
                ArrayType::Grid => Self::grid_offsets(rows, columns, spacing),
                ArrayType::Radial => Self::radial_offsets(rows * columns, radius),
            },
        }
    }

    /// `rows * columns` offsets along X when there is a single row, else along Y.
    pub fn linear_offsets(rows: u32, columns: u32, spacing: f64) -> Vec<Point> {
        let total = rows.max(1) * columns.max(1);
        let horizontal = rows <= 1;
        (0..total)
            .map(|i| {
                let distance = i as f64 * spacing;
                if horizontal {
                    Point::new(distance, 0.0)
                } else {
                    Point::new(0.0, distance)
                }
            })
            .collect()
    }

    /// Row-major grid offsets: index `row * columns + col` is `(col * s, row * s)`.
    pub fn grid_offsets(rows: u32, columns: u32, spacing: f64) -> Vec<Point> {
        let mut offsets = Vec::with_capacity(rows as usize * columns as usize);
        for row in 0..rows {
            for col in 0..columns {
                offsets.push(Point::new(col as f64 * spacing, row as f64 * spacing));
            }
        }
        offsets
    }

    /// `total` offsets on a circle of `radius`, `2π / total` apart, starting at +X.
    pub fn radial_offsets(total: u32, radius: f64) -> Vec<Point> {
        let total = total.max(1);
        let step = TAU / total as f64;
        (0..total)
            .map(|i| {
                let angle = i as f64 * step;
                Point::new(radius * angle.cos(), radius * angle.sin())
            })
            .collect()
    }

    /// Emits copies of `selected` laid out by `options`.
    ///
    /// Copies are grouped per pattern position (every selected element at
    /// offset 0, then every selected element at offset 1, ...). Each copy gets a
    /// fresh id, a label suffixed with " (Copy)", and for linear and radial
    /// arrays the configured extra rotation.
    pub fn generate<S: IdSource + ?Sized>(
        selected: &[Element],
        options: &DuplicationOptions,
        ids: &mut S,
    ) -> Vec<Element> {
        let options = options.validated();
        let offsets = Self::offsets(&options);
        let rotation = options.copy_rotation();

        let mut copies = Vec::with_capacity(offsets.len() * selected.len());
        for offset in &offsets {
            for source in selected {
                let mut copy = source.clone();
                copy.id = ids.next_id();
                copy.translate(offset.x, offset.y);
                if rotation != 0.0 {
                    copy.set_rotation(normalize_degrees(source.rotation + rotation));
                }
                if !copy.label.is_empty() {
                    copy.label.push_str(COPY_SUFFIX);
                }
                copies.push(copy);
            }
        }

        tracing::debug!(
            "Generated {} copies of {} element(s)",
            copies.len(),
            selected.len()
        );
        copies
    }

    /// Computes copy positions without creating elements.
    pub fn preview(selected: &[Element], options: &DuplicationOptions) -> DuplicationPreview {
        let offsets = Self::offsets(options);

        let mut positions = Vec::with_capacity(offsets.len() * selected.len());
        let mut footprints = Vec::with_capacity(positions.capacity());
        let mut bounds: Option<Bounds> = None;
        for offset in &offsets {
            for source in selected {
                let position = source.position() + *offset;
                let footprint =
                    Bounds::from_rect(position.x, position.y, source.width(), source.height());
                bounds = Some(match bounds {
                    Some(b) => b.union(&footprint),
                    None => footprint,
                });
                positions.push(position);
                footprints.push(footprint);
            }
        }

        DuplicationPreview {
            positions,
            footprints,
            bounds,
        }
    }
}
