use crate::scene::Scene;
use sitemap_core::{Bounds, Point};

/// The set of selected element ids.
///
/// `Selection` is responsible for:
/// - Click selection (replace with the hit element, or clear on a miss)
/// - Shift+click toggling
/// - Marquee selection of every element intersecting a band
/// - Staying a subset of the scene's element ids ([`prune`](Selection::prune))
///
/// Ids keep the order in which they were selected; the most recently added id
/// is the "primary" selection. Every mutating method returns `true` when the
/// set actually changed, so callers only emit selection events for real changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<u64>,
}

impl Selection {
    /// Creates an empty selection.
    ///
    /// # Examples
    ///
    /// ```
    /// use sitemap_designer::selection::Selection;
    ///
    /// let selection = Selection::new();
    /// assert!(selection.is_empty());
    /// assert_eq!(selection.primary(), None);
    /// ```
    pub fn new() -> Self {
        Self { ids: Vec::new() }
    }

    pub fn ids(&self) -> &[u64] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    /// Most recently selected id.
    pub fn primary(&self) -> Option<u64> {
        self.ids.last().copied()
    }

    /// Replaces the selection with the given ids (duplicates dropped).
    pub fn set(&mut self, ids: impl IntoIterator<Item = u64>) -> bool {
        let mut next = Vec::new();
        for id in ids {
            if !next.contains(&id) {
                next.push(id);
            }
        }
        if next == self.ids {
            return false;
        }
        self.ids = next;
        true
    }

    /// Replaces the selection with a single id.
    pub fn select_only(&mut self, id: u64) -> bool {
        self.set([id])
    }

    /// Adds an id without touching the rest of the selection.
    pub fn add(&mut self, id: u64) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.ids.len();
        self.ids.retain(|i| *i != id);
        self.ids.len() != before
    }

    /// Shift+click behaviour.
    pub fn toggle(&mut self, id: u64) -> bool {
        if !self.remove(id) {
            self.ids.push(id);
        }
        true
    }

    pub fn clear(&mut self) -> bool {
        if self.ids.is_empty() {
            return false;
        }
        self.ids.clear();
        true
    }

    /// Click selection: the topmost element under the point replaces the
    /// selection; a miss clears it.
    pub fn select_at(&mut self, scene: &Scene, point: Point) -> bool {
        match scene.hit_test(point) {
            Some(id) => self.select_only(id),
            None => self.clear(),
        }
    }

    /// Marquee selection. With `extend` the hits are added to the current
    /// selection, otherwise they replace it.
    pub fn select_in_rect(&mut self, scene: &Scene, rect: &Bounds, extend: bool) -> bool {
        let hits = scene.elements_in_rect(rect);
        if extend {
            let mut changed = false;
            for id in hits {
                changed |= self.add(id);
            }
            changed
        } else {
            self.set(hits)
        }
    }

    pub fn select_all(&mut self, scene: &Scene) -> bool {
        self.set(scene.ids())
    }

    /// Drops ids that no longer exist in the scene.
    pub fn prune(&mut self, scene: &Scene) -> bool {
        let before = self.ids.len();
        self.ids.retain(|id| scene.contains(*id));
        self.ids.len() != before
    }

    /// Selected ids in scene draw order (unknown ids skipped).
    pub fn in_draw_order(&self, scene: &Scene) -> Vec<u64> {
        scene
            .elements()
            .iter()
            .filter(|e| self.contains(e.id))
            .map(|e| e.id)
            .collect()
    }
}
