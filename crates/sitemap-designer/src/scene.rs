//! The editable site map: dimensions, grid settings and elements in draw order.

use crate::model::{Color, Element};
use serde::{Deserialize, Serialize};
use sitemap_core::constants::{DEFAULT_GRID_SIZE, DEFAULT_SCENE_HEIGHT, DEFAULT_SCENE_WIDTH};
use sitemap_core::{Bounds, ElementError, Error, Point, Result};
use std::collections::HashSet;

/// Hands out element ids that have never been used before.
pub trait IdSource {
    fn next_id(&mut self) -> u64;
}

/// Free-standing id counter, used where no scene is involved (previews, tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdCounter {
    next: u64,
}

impl IdCounter {
    pub fn starting_at(next: u64) -> Self {
        Self { next: next.max(1) }
    }
}

impl Default for IdCounter {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl IdSource for IdCounter {
    fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next = self.next.saturating_add(1);
        id
    }
}

/// One open site map.
///
/// Elements are stored in draw order: later elements are drawn on top and win
/// hit tests. Ids come from a monotonic counter and are never handed out twice,
/// even after the element that held them is deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub background: Color,
    grid_enabled: bool,
    grid_size: f64,
    elements: Vec<Element>,
    #[serde(default)]
    next_id: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(DEFAULT_SCENE_WIDTH, DEFAULT_SCENE_HEIGHT)
    }
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            background: Color::WHITE,
            grid_enabled: true,
            grid_size: DEFAULT_GRID_SIZE,
            elements: Vec::new(),
            next_id: 1,
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn grid_enabled(&self) -> bool {
        self.grid_enabled
    }

    pub fn grid_size(&self) -> f64 {
        self.grid_size
    }

    /// Updates the grid. The cell size must be positive whenever the grid is on.
    pub fn set_grid(&mut self, enabled: bool, cell_size: f64) -> Result<()> {
        if enabled && !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(Error::other(format!(
                "grid cell size must be > 0, got {}",
                cell_size
            )));
        }
        self.grid_enabled = enabled;
        if cell_size.is_finite() && cell_size > 0.0 {
            self.grid_size = cell_size;
        }
        Ok(())
    }

    /// Scene-space rectangle covered by the map.
    pub fn extent(&self) -> Bounds {
        Bounds::from_rect(0.0, 0.0, self.width, self.height)
    }

    /// Id the next allocation will return.
    pub fn peek_next_id(&self) -> u64 {
        self.next_id
    }

    /// Moves the id counter forward to at least `next`. Never moves it back.
    pub fn reserve_ids_from(&mut self, next: u64) {
        self.next_id = self.next_id.max(next);
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn ids(&self) -> Vec<u64> {
        self.elements.iter().map(|e| e.id).collect()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.index_of(id).is_some()
    }

    pub fn index_of(&self, id: u64) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    pub fn get(&self, id: u64) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    /// Adds an element on top of the draw order.
    pub fn insert(&mut self, element: Element) -> std::result::Result<u64, ElementError> {
        let index = self.elements.len();
        self.insert_at(index, element)
    }

    /// Adds an element at a draw-order position (clamped to the list length).
    pub fn insert_at(
        &mut self,
        index: usize,
        element: Element,
    ) -> std::result::Result<u64, ElementError> {
        element.validate()?;
        if self.contains(element.id) {
            return Err(ElementError::DuplicateId(element.id));
        }
        let id = element.id;
        let successor = id.checked_add(1).ok_or(ElementError::IdOutOfRange(id))?;
        self.next_id = self.next_id.max(successor);
        let index = index.min(self.elements.len());
        self.elements.insert(index, element);
        Ok(id)
    }

    /// Removes an element, returning its draw-order index and value.
    /// Unknown ids are ignored.
    pub fn remove(&mut self, id: u64) -> Option<(usize, Element)> {
        let index = self.index_of(id)?;
        Some((index, self.elements.remove(index)))
    }

    /// Replaces an element with the same id in place.
    pub fn replace(&mut self, element: Element) -> std::result::Result<(), ElementError> {
        element.validate()?;
        let slot = self
            .get_mut(element.id)
            .ok_or(ElementError::NotFound(element.id))?;
        *slot = element;
        Ok(())
    }

    /// Topmost element whose bounds contain the point.
    pub fn hit_test(&self, point: Point) -> Option<u64> {
        self.elements
            .iter()
            .rev()
            .find(|e| e.contains_point(point))
            .map(|e| e.id)
    }

    /// Ids of every element whose bounds intersect the rectangle, in draw order.
    pub fn elements_in_rect(&self, rect: &Bounds) -> Vec<u64> {
        self.elements
            .iter()
            .filter(|e| e.bounds().intersects(rect))
            .map(|e| e.id)
            .collect()
    }

    /// Union of the bounds of the listed elements; unknown ids are skipped.
    pub fn bounds_of(&self, ids: &[u64]) -> Option<Bounds> {
        ids.iter()
            .filter_map(|id| self.get(*id))
            .map(|e| e.bounds())
            .reduce(|acc, b| acc.union(&b))
    }

    /// Union of the bounds of every element.
    pub fn content_bounds(&self) -> Option<Bounds> {
        self.elements
            .iter()
            .map(|e| e.bounds())
            .reduce(|acc, b| acc.union(&b))
    }

    /// Checks element geometry, id uniqueness and grid settings, and moves the
    /// id counter past every stored id. Called after loading a scene.
    pub fn validate(&mut self) -> Result<()> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(Error::other(format!(
                "scene size must be > 0, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.grid_size.is_finite() && self.grid_size > 0.0) {
            return Err(Error::other(format!(
                "grid cell size must be > 0, got {}",
                self.grid_size
            )));
        }

        let mut seen = HashSet::new();
        for element in &self.elements {
            element.validate()?;
            if !seen.insert(element.id) {
                return Err(ElementError::DuplicateId(element.id).into());
            }
        }

        let max_id = self.elements.iter().map(|e| e.id).max().unwrap_or(0);
        let successor = max_id
            .checked_add(1)
            .ok_or(ElementError::IdOutOfRange(max_id))?;
        self.next_id = self.next_id.max(successor).max(1);
        Ok(())
    }
}

impl IdSource for Scene {
    /// At the ceiling the same id keeps coming back; `insert` then rejects it
    /// with `IdOutOfRange` instead of reusing a stored id.
    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        id
    }
}
