//! # Drag-Drop Coordinator
//!
//! Tracks one pointer-driven drag gesture at a time and decides where it lands.
//!
//! ```text
//! idle --start_drag--> dragging --end_drag--> dropped | cancelled --> idle
//!                          |
//!                          +--cancel_drag--> cancelled --> idle
//! ```
//!
//! Drop zones are plain records in a registry (id, scene bounds, accepted item
//! types). The coordinator never calls into zones or touches the scene; it
//! returns [`ZoneEvent`]s describing hover, leave and drop transitions, and the
//! caller hands them to its [`DropTarget`] through [`dispatch`].

use serde::{Deserialize, Serialize};
use sitemap_core::constants::ELEMENT_TEMPLATE_ITEM;
use sitemap_core::{snap_to_grid_within, Bounds, DragError, Point};
use std::collections::BTreeSet;
use std::fmt;

use crate::viewport::Viewport;

/// Identifier of a registered drop zone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ZoneId(String);

impl ZoneId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ZoneId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// What is being dragged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragItem {
    /// Source type matched against a zone's accepted types.
    pub item_type: String,
    #[serde(default)]
    pub category: Option<String>,
    /// Opaque data copied verbatim into whatever the drop creates.
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl DragItem {
    pub fn new(item_type: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            item_type: item_type.into(),
            category: None,
            payload,
        }
    }

    /// A catalog template dragged from a palette.
    pub fn template(template_id: &str, category: impl Into<String>) -> Self {
        Self {
            item_type: ELEMENT_TEMPLATE_ITEM.to_string(),
            category: Some(category.into()),
            payload: serde_json::json!({ "template_id": template_id }),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// A region that accepts dragged items.
#[derive(Debug, Clone, PartialEq)]
pub struct DropZone {
    pub id: ZoneId,
    /// Scene-space bounds.
    pub bounds: Bounds,
    pub accepts: BTreeSet<String>,
}

impl DropZone {
    pub fn new(id: impl Into<ZoneId>, bounds: Bounds) -> Self {
        Self {
            id: id.into(),
            bounds,
            accepts: BTreeSet::new(),
        }
    }

    pub fn accepting<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accepts.extend(types.into_iter().map(Into::into));
        self
    }

    pub fn accepts(&self, item_type: &str) -> bool {
        self.accepts.contains(item_type)
    }

    /// The zone qualifies for this item at this scene point.
    pub fn qualifies(&self, item: &DragItem, point: Point) -> bool {
        self.accepts(&item.item_type) && self.bounds.contains(point)
    }
}

impl From<String> for ZoneId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Zone transitions produced by the coordinator.
#[derive(Debug, Clone, PartialEq)]
pub enum ZoneEvent {
    /// The pointer is over a qualifying zone (sent on every move inside it).
    Hover {
        zone: ZoneId,
        item: DragItem,
        point: Point,
    },
    /// The pointer left a zone it was hovering, or the gesture ended.
    Leave { zone: ZoneId },
    /// The item was released inside a qualifying zone.
    Drop {
        zone: ZoneId,
        item: DragItem,
        point: Point,
    },
}

impl ZoneEvent {
    pub fn zone(&self) -> &ZoneId {
        match self {
            ZoneEvent::Hover { zone, .. }
            | ZoneEvent::Leave { zone }
            | ZoneEvent::Drop { zone, .. } => zone,
        }
    }
}

/// How a gesture ended.
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// Released inside a qualifying zone; `point` is the (possibly snapped)
    /// scene-space drop position.
    Dropped {
        zone: ZoneId,
        item: DragItem,
        point: Point,
    },
    /// Released outside every qualifying zone, or cancelled.
    Cancelled { item: DragItem },
}

impl DropOutcome {
    pub fn is_dropped(&self) -> bool {
        matches!(self, DropOutcome::Dropped { .. })
    }
}

/// Outcome of ending a gesture plus the zone events it produced
/// (leaves first, then the drop if any).
#[derive(Debug, Clone, PartialEq)]
pub struct DropReport {
    pub outcome: DropOutcome,
    pub events: Vec<ZoneEvent>,
}

/// Receiver of zone events.
pub trait DropTarget {
    fn on_hover(&mut self, _zone: &ZoneId, _item: &DragItem, _point: Point) {}

    fn on_leave(&mut self, _zone: &ZoneId) {}

    fn on_drop(&mut self, zone: &ZoneId, item: &DragItem, point: Point);
}

/// Delivers one zone event to a target.
pub fn dispatch<T: DropTarget + ?Sized>(event: &ZoneEvent, target: &mut T) {
    match event {
        ZoneEvent::Hover { zone, item, point } => target.on_hover(zone, item, *point),
        ZoneEvent::Leave { zone } => target.on_leave(zone),
        ZoneEvent::Drop { zone, item, point } => target.on_drop(zone, item, *point),
    }
}

/// Delivers events in order.
pub fn dispatch_all<T: DropTarget + ?Sized>(events: &[ZoneEvent], target: &mut T) {
    for event in events {
        dispatch(event, target);
    }
}

#[derive(Debug, Clone)]
struct ActiveDrag {
    item: DragItem,
    screen: Point,
    scene: Point,
    hovered: Vec<ZoneId>,
}

/// Coordinates a single drag gesture against the registered drop zones.
#[derive(Debug, Clone, Default)]
pub struct DragDropCoordinator {
    zones: Vec<DropZone>,
    active: Option<ActiveDrag>,
    snap: Option<f64>,
}

impl DragDropCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables snapping of drop points to a grid with the given cell size,
    /// or disables it with `None`.
    pub fn set_snapping(&mut self, cell_size: Option<f64>) {
        self.snap = cell_size.filter(|s| s.is_finite() && *s > 0.0);
    }

    pub fn snapping(&self) -> Option<f64> {
        self.snap
    }

    /// Registers a zone, replacing any zone with the same id.
    /// Zones registered later take precedence when zones overlap.
    pub fn register_zone(&mut self, zone: DropZone) {
        tracing::debug!("Registering drop zone '{}' at {}", zone.id, zone.bounds);
        self.zones.retain(|z| z.id != zone.id);
        self.zones.push(zone);
    }

    /// Removes a zone. If the active gesture was hovering it, a leave event is
    /// returned for it.
    pub fn unregister_zone(&mut self, id: &str) -> Vec<ZoneEvent> {
        let before = self.zones.len();
        self.zones.retain(|z| z.id.as_str() != id);
        if self.zones.len() == before {
            return Vec::new();
        }
        tracing::debug!("Unregistered drop zone '{}'", id);

        let mut events = Vec::new();
        if let Some(active) = self.active.as_mut() {
            if let Some(pos) = active.hovered.iter().position(|z| z.as_str() == id) {
                events.push(ZoneEvent::Leave {
                    zone: active.hovered.remove(pos),
                });
            }
        }
        events
    }

    pub fn has_zone(&self, id: &str) -> bool {
        self.zones.iter().any(|z| z.id.as_str() == id)
    }

    pub fn zone(&self, id: &str) -> Option<&DropZone> {
        self.zones.iter().find(|z| z.id.as_str() == id)
    }

    /// Updates the bounds of an existing zone (e.g. after a scene resize).
    pub fn set_zone_bounds(&mut self, id: &str, bounds: Bounds) -> bool {
        match self.zones.iter_mut().find(|z| z.id.as_str() == id) {
            Some(zone) => {
                zone.bounds = bounds;
                true
            }
            None => false,
        }
    }

    pub fn zones(&self) -> &[DropZone] {
        &self.zones
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn current_item(&self) -> Option<&DragItem> {
        self.active.as_ref().map(|a| &a.item)
    }

    /// Scene-space pointer position of the active gesture.
    pub fn current_scene_point(&self) -> Option<Point> {
        self.active.as_ref().map(|a| a.scene)
    }

    /// Screen-space pointer position of the active gesture.
    pub fn current_screen_point(&self) -> Option<Point> {
        self.active.as_ref().map(|a| a.screen)
    }

    /// Zones currently hovered by the active gesture.
    pub fn hovered_zones(&self) -> &[ZoneId] {
        self.active.as_ref().map(|a| a.hovered.as_slice()).unwrap_or(&[])
    }

    /// Begins a gesture. Fails if another gesture is already active.
    pub fn start_drag(
        &mut self,
        item: DragItem,
        screen_point: Point,
        viewport: &Viewport,
    ) -> Result<Vec<ZoneEvent>, DragError> {
        if let Some(active) = &self.active {
            return Err(DragError::AlreadyDragging {
                current: active.item.item_type.clone(),
            });
        }

        tracing::debug!("Drag started: {}", item.item_type);
        self.active = Some(ActiveDrag {
            item,
            screen: screen_point,
            scene: viewport.screen_to_scene(screen_point),
            hovered: Vec::new(),
        });
        self.update_drag(screen_point, viewport)
    }

    /// Moves the pointer: recomputes the scene position and hit-tests zones.
    ///
    /// Returns leave events for zones the pointer exited, then hover events
    /// for every qualifying zone under the pointer.
    pub fn update_drag(
        &mut self,
        screen_point: Point,
        viewport: &Viewport,
    ) -> Result<Vec<ZoneEvent>, DragError> {
        let active = self.active.as_mut().ok_or(DragError::NotDragging)?;
        active.screen = screen_point;
        active.scene = viewport.screen_to_scene(screen_point);

        let under: Vec<ZoneId> = self
            .zones
            .iter()
            .filter(|z| z.qualifies(&active.item, active.scene))
            .map(|z| z.id.clone())
            .collect();

        let mut events: Vec<ZoneEvent> = active
            .hovered
            .iter()
            .filter(|id| !under.contains(id))
            .map(|id| ZoneEvent::Leave { zone: id.clone() })
            .collect();

        events.extend(under.iter().map(|id| ZoneEvent::Hover {
            zone: id.clone(),
            item: active.item.clone(),
            point: active.scene,
        }));

        active.hovered = under;
        Ok(events)
    }

    /// Releases the pointer.
    ///
    /// The topmost qualifying zone under the final position receives a drop,
    /// with the point snapped when snapping is on. Snapping never moves the
    /// point out of that zone. Otherwise the gesture is
    /// cancelled. Either way the coordinator returns to idle.
    pub fn end_drag(
        &mut self,
        screen_point: Point,
        viewport: &Viewport,
    ) -> Result<DropReport, DragError> {
        let active = self.active.take().ok_or(DragError::NotDragging)?;
        let scene_point = viewport.screen_to_scene(screen_point);

        let mut events: Vec<ZoneEvent> = active
            .hovered
            .iter()
            .map(|id| ZoneEvent::Leave { zone: id.clone() })
            .collect();

        let target = self
            .zones
            .iter()
            .rev()
            .find(|z| z.qualifies(&active.item, scene_point));

        let outcome = match target {
            Some(zone) => {
                let point = match self.snap {
                    Some(cell) => snap_to_grid_within(scene_point, cell, &zone.bounds),
                    None => scene_point,
                };
                tracing::debug!(
                    "Drag dropped: {} on '{}' at {}",
                    active.item.item_type,
                    zone.id,
                    point
                );
                events.push(ZoneEvent::Drop {
                    zone: zone.id.clone(),
                    item: active.item.clone(),
                    point,
                });
                DropOutcome::Dropped {
                    zone: zone.id.clone(),
                    item: active.item,
                    point,
                }
            }
            None => {
                tracing::debug!(
                    "Drag cancelled: no zone accepts {} at {}",
                    active.item.item_type,
                    scene_point
                );
                DropOutcome::Cancelled { item: active.item }
            }
        };

        Ok(DropReport { outcome, events })
    }

    /// Aborts the gesture (escape). Hovered zones receive leave events.
    pub fn cancel_drag(&mut self) -> Result<DropReport, DragError> {
        let active = self.active.take().ok_or(DragError::NotDragging)?;
        tracing::debug!("Drag cancelled: {}", active.item.item_type);
        let events = active
            .hovered
            .into_iter()
            .map(|zone| ZoneEvent::Leave { zone })
            .collect();
        Ok(DropReport {
            outcome: DropOutcome::Cancelled { item: active.item },
            events,
        })
    }
}
