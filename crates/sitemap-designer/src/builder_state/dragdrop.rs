//! Catalog drag-and-drop onto the canvas.

use sitemap_core::constants::{CANVAS_ZONE_ID, ELEMENT_TEMPLATE_ITEM};
use sitemap_core::{AppEvent, DragError, DragEvent, Point};

use super::BuilderSession;
use crate::catalog::template_id_from_payload;
use crate::commands::SceneCommand;
use crate::dragdrop::{DragItem, DropOutcome, DropReport, DropTarget, ZoneId};
use crate::scene::IdSource;

impl BuilderSession {
    /// Starts dragging an item (typically a catalog template) at a screen
    /// point. Fails if a drag is already in progress.
    pub fn start_drag(&mut self, item: DragItem, screen_point: Point) -> Result<(), DragError> {
        let events = self.drag.start_drag(item, screen_point, &self.viewport)?;
        self.dispatch_zone_events(&events);
        Ok(())
    }

    pub fn update_drag(&mut self, screen_point: Point) -> Result<(), DragError> {
        let events = self.drag.update_drag(screen_point, &self.viewport)?;
        self.dispatch_zone_events(&events);
        Ok(())
    }

    /// Releases the dragged item. Returns the id of the element created by a
    /// drop on the canvas, if any.
    pub fn end_drag(&mut self, screen_point: Point) -> Result<Option<u64>, DragError> {
        let report = self.drag.end_drag(screen_point, &self.viewport)?;
        Ok(self.finish_drag(report))
    }

    /// Aborts the drag (escape) without touching the scene.
    pub fn cancel_drag(&mut self) -> Result<(), DragError> {
        let report = self.drag.cancel_drag()?;
        self.finish_drag(report);
        Ok(())
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Scene point the dragged item hovers over the canvas, for drop feedback.
    pub fn drop_preview(&self) -> Option<Point> {
        self.drop_hover
    }

    fn finish_drag(&mut self, report: DropReport) -> Option<u64> {
        self.last_drop = None;
        self.dispatch_zone_events(&report.events);
        self.drop_hover = None;
        self.redraw = true;

        let event = match &report.outcome {
            DropOutcome::Dropped { zone, item, point } => DragEvent::Dropped {
                item_type: item.item_type.clone(),
                zone: zone.to_string(),
                point: *point,
            },
            DropOutcome::Cancelled { item } => DragEvent::Cancelled {
                item_type: item.item_type.clone(),
            },
        };
        self.emit(AppEvent::Drag(event));
        self.last_drop.take()
    }

    /// Instantiates a catalog template with its top-left corner at a scene
    /// point and selects it. One history entry.
    pub fn insert_template(&mut self, template_id: &str, position: Point) -> sitemap_core::Result<u64> {
        self.insert_template_with_payload(template_id, position, None)
    }

    fn insert_template_with_payload(
        &mut self,
        template_id: &str,
        position: Point,
        payload: Option<serde_json::Value>,
    ) -> sitemap_core::Result<u64> {
        let template = self.catalog.by_id(template_id)?;
        let id = self.scene.next_id();
        let mut element = template.instantiate(id, position)?;
        if payload.is_some() {
            element.properties.payload = payload;
        }

        tracing::info!("Placed '{}' as element {} at {}", template.name, id, position);
        self.execute_command(SceneCommand::add(vec![element]));
        self.change_selection(|selection, _| selection.select_only(id));
        Ok(id)
    }

    fn drop_on_canvas(&mut self, item: &DragItem, point: Point) {
        let result = template_id_from_payload(&item.payload)
            .map(str::to_string)
            .map_err(sitemap_core::Error::from)
            .and_then(|template_id| {
                self.insert_template_with_payload(&template_id, point, Some(item.payload.clone()))
            });
        match result {
            Ok(id) => self.last_drop = Some(id),
            Err(e) => tracing::warn!("Drop on canvas ignored: {}", e),
        }
    }
}

impl DropTarget for BuilderSession {
    fn on_hover(&mut self, zone: &ZoneId, _item: &DragItem, point: Point) {
        if zone.as_str() == CANVAS_ZONE_ID {
            self.drop_hover = Some(point);
            self.redraw = true;
        }
    }

    fn on_leave(&mut self, zone: &ZoneId) {
        if zone.as_str() == CANVAS_ZONE_ID {
            self.drop_hover = None;
            self.redraw = true;
        }
    }

    fn on_drop(&mut self, zone: &ZoneId, item: &DragItem, point: Point) {
        if zone.as_str() == CANVAS_ZONE_ID && item.item_type == ELEMENT_TEMPLATE_ITEM {
            self.drop_on_canvas(item, point);
        }
    }
}
