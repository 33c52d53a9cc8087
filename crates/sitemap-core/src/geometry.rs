//! Basic 2D geometry shared by every builder crate.
//!
//! Scene space and screen space both use a top-left origin with +Y pointing
//! down; the viewport is the only place where the two are related.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A point (or offset) in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin (0, 0).
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Euclidean length when the point is used as an offset vector.
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        (*other - *self).length()
    }

    /// Angle of the vector in radians, measured from +X.
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Returns true when both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Point {
    type Output = Point;

    fn div(self, rhs: f64) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Axis-aligned bounding box.
///
/// Bounds are inclusive on every edge: a point lying exactly on the border is
/// considered inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Creates bounds from two corners, normalizing the order.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            min_x: x1.min(x2),
            min_y: y1.min(y2),
            max_x: x1.max(x2),
            max_y: y1.max(y2),
        }
    }

    /// Creates bounds from a top-left position and a size.
    pub fn from_rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Creates bounds spanning two points.
    pub fn from_points(a: Point, b: Point) -> Self {
        Self::new(a.x, a.y, b.x, b.y)
    }

    /// Smallest bounds containing every point, or `None` for an empty input.
    pub fn enclosing<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Bounds::new(p.x, p.y, p.x, p.y),
                Some(b) => b.include_point(p),
            })
        })
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn min(&self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    pub fn max(&self) -> Point {
        Point::new(self.max_x, self.max_y)
    }

    /// Checks whether the point lies inside (or on the edge of) these bounds.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Checks whether two bounds overlap (touching edges count).
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    /// Returns the overlapping region, if any.
    pub fn intersection(&self, other: &Bounds) -> Option<Bounds> {
        if !self.intersects(other) {
            return None;
        }
        Some(Bounds {
            min_x: self.min_x.max(other.min_x),
            min_y: self.min_y.max(other.min_y),
            max_x: self.max_x.min(other.max_x),
            max_y: self.max_y.min(other.max_y),
        })
    }

    /// Smallest bounds containing both.
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Grows the bounds to include a point.
    pub fn include_point(&self, point: Point) -> Bounds {
        Bounds {
            min_x: self.min_x.min(point.x),
            min_y: self.min_y.min(point.y),
            max_x: self.max_x.max(point.x),
            max_y: self.max_y.max(point.y),
        }
    }

    /// Pads every side by the given amounts.
    pub fn expand(&self, dx: f64, dy: f64) -> Bounds {
        Bounds {
            min_x: self.min_x - dx,
            min_y: self.min_y - dy,
            max_x: self.max_x + dx,
            max_y: self.max_y + dy,
        }
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.2}, {:.2}] - [{:.2}, {:.2}]",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}

/// Quantizes a point to the nearest grid intersection.
///
/// Each axis is rounded to the nearest multiple of `cell_size`. A non-positive
/// or non-finite cell size leaves the point untouched.
pub fn snap_to_grid(point: Point, cell_size: f64) -> Point {
    if !(cell_size.is_finite() && cell_size > 0.0) {
        return point;
    }
    Point::new(
        snap_axis(point.x, cell_size),
        snap_axis(point.y, cell_size),
    )
}

/// Snaps a point that lies inside `bounds` without letting it leave them.
///
/// An axis whose nearest grid line falls before the min edge, or on or past
/// the max edge, takes the grid line on the inner side instead. When the
/// bounds hold no grid line on that side, the axis keeps its raw value.
pub fn snap_to_grid_within(point: Point, cell_size: f64, bounds: &Bounds) -> Point {
    if !(cell_size.is_finite() && cell_size > 0.0) {
        return point;
    }
    Point::new(
        snap_axis_within(point.x, cell_size, bounds.min_x, bounds.max_x),
        snap_axis_within(point.y, cell_size, bounds.min_y, bounds.max_y),
    )
}

fn snap_axis_within(value: f64, cell_size: f64, min: f64, max: f64) -> f64 {
    let snapped = snap_axis(value, cell_size);
    if snapped == value || (snapped >= min && snapped < max) {
        return snapped;
    }
    let inner = if snapped < min {
        snap_axis((value / cell_size).ceil() * cell_size, cell_size)
    } else {
        snap_axis((value / cell_size).floor() * cell_size, cell_size)
    };
    if inner >= min && inner <= max {
        inner
    } else {
        value
    }
}

fn snap_axis(value: f64, cell_size: f64) -> f64 {
    let snapped = (value / cell_size).round() * cell_size;
    // Normalize -0.0 so snapped values compare and serialize cleanly.
    if snapped == 0.0 {
        0.0
    } else {
        snapped
    }
}
