//! Pointer and keyboard handling.

use sitemap_core::Point;

use super::{BuilderSession, ToolbarAction};
use crate::commands::SceneCommand;
use crate::model::{Color, Element, ElementShape};
use crate::scene::IdSource;
use crate::tools::{
    drawn_rect, Gesture, IssueMarker, Key, KeyEvent, Measurement, Modifiers, PointerEvent, Tool,
};

impl BuilderSession {
    /// Interprets a pointer event according to the active tool.
    ///
    /// While a catalog drag is active, moves and releases are routed to the
    /// drag-drop coordinator instead.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        if self.drag.is_dragging() {
            let result = match event {
                PointerEvent::Move { position, .. } => self.update_drag(position),
                PointerEvent::Up { position, .. } => self.end_drag(position).map(|_| ()),
                PointerEvent::Down { .. } => Ok(()),
            };
            if let Err(e) = result {
                tracing::warn!("Drag input ignored: {}", e);
            }
            return;
        }

        match event {
            PointerEvent::Down {
                position,
                modifiers,
            } => self.pointer_down(position, modifiers),
            PointerEvent::Move { position, .. } => self.pointer_move(position),
            PointerEvent::Up { position, .. } => self.pointer_up(position),
        }
    }

    /// Handles a key press. Returns true if the key did something.
    pub fn handle_key(&mut self, event: KeyEvent) -> bool {
        match event.key {
            Key::Escape => self.escape(),
            Key::Delete | Key::Backspace => {
                self.execute(ToolbarAction::Delete).is_applied()
            }
            Key::Char(c) if event.modifiers.ctrl => match c.to_ascii_lowercase() {
                'a' => self.execute(ToolbarAction::SelectAll).is_applied(),
                'z' if event.modifiers.shift => self.redo(),
                'z' => self.undo(),
                'y' => self.redo(),
                _ => false,
            },
            Key::Char(_) => false,
        }
    }

    /// Cancels a catalog drag or the gesture in progress.
    fn escape(&mut self) -> bool {
        if self.drag.is_dragging() {
            return self.cancel_drag().is_ok();
        }
        if self.tools.gesture().is_idle() {
            return false;
        }
        self.abort_gesture();
        true
    }

    /// Drops the gesture in progress. A move in progress is reverted.
    pub(crate) fn abort_gesture(&mut self) {
        if let Gesture::Moving { before, .. } = self.tools.take_gesture() {
            for element in before {
                if let Err(e) = self.scene.replace(element) {
                    tracing::warn!("Failed to revert move: {}", e);
                }
            }
        }
        self.redraw = true;
    }

    fn pointer_down(&mut self, screen: Point, modifiers: Modifiers) {
        let point = self.viewport.screen_to_scene(screen);
        match self.tools.tool() {
            Tool::Select => self.select_down(point, modifiers),
            Tool::Pan => self.tools.begin(Gesture::Panning {
                last_screen: screen,
            }),
            Tool::DrawRectangle
            | Tool::DrawCircle
            | Tool::Text
            | Tool::Measure
            | Tool::IssueReport => {
                let origin = self.maybe_snap(point);
                self.tools.begin(Gesture::Drawing {
                    origin,
                    current: origin,
                });
            }
        }
    }

    fn select_down(&mut self, point: Point, modifiers: Modifiers) {
        match self.scene.hit_test(point) {
            Some(id) if modifiers.shift => {
                self.change_selection(|selection, _| selection.toggle(id));
            }
            Some(id) => {
                if !self.selection.contains(id) {
                    self.change_selection(|selection, _| selection.select_only(id));
                }
                let before: Vec<Element> = self
                    .selection
                    .in_draw_order(&self.scene)
                    .into_iter()
                    .filter_map(|id| self.scene.get(id).cloned())
                    .collect();
                self.tools.begin(Gesture::Moving {
                    origin: point,
                    last: point,
                    pressed: id,
                    before,
                });
            }
            None => {
                if !modifiers.shift {
                    self.change_selection(|selection, _| selection.clear());
                }
                self.tools.begin(Gesture::Marquee {
                    origin: point,
                    current: point,
                    extend: modifiers.shift,
                });
            }
        }
    }

    fn pointer_move(&mut self, screen: Point) {
        let point = self.viewport.screen_to_scene(screen);
        let snap = self.snap_cell();
        match self.tools.gesture_mut() {
            Gesture::Idle => return,
            Gesture::Moving {
                origin,
                last,
                before,
                ..
            } => {
                let raw = point - *origin;
                let delta = match snap {
                    Some(cell) => sitemap_core::snap_to_grid(raw, cell),
                    None => raw,
                };
                let step = delta - (*last - *origin);
                *last = *origin + delta;
                if step != Point::zero() {
                    let ids: Vec<u64> = before.iter().map(|e| e.id).collect();
                    for id in ids {
                        if let Some(element) = self.scene.get_mut(id) {
                            element.translate(step.x, step.y);
                        }
                    }
                }
            }
            Gesture::Marquee { current, .. } => *current = point,
            Gesture::Panning { last_screen } => {
                let delta = screen - *last_screen;
                *last_screen = screen;
                self.viewport.pan_by(delta.x, delta.y);
            }
            Gesture::Drawing { current, .. } => {
                *current = match snap {
                    Some(cell) => sitemap_core::snap_to_grid(point, cell),
                    None => point,
                };
            }
        }
        self.redraw = true;
    }

    fn pointer_up(&mut self, screen: Point) {
        let point = self.viewport.screen_to_scene(screen);
        match self.tools.take_gesture() {
            Gesture::Idle | Gesture::Panning { .. } => {}
            Gesture::Moving {
                pressed, before, ..
            } => {
                let after: Vec<Element> = before
                    .iter()
                    .filter_map(|e| self.scene.get(e.id).cloned())
                    .collect();
                if after != before {
                    tracing::debug!("Moved {} element(s)", after.len());
                    self.record_command(SceneCommand::update(before, after));
                } else if self.selection.len() > 1 {
                    // A plain click inside a multi-selection picks that element.
                    self.change_selection(|selection, _| selection.select_only(pressed));
                }
            }
            Gesture::Marquee {
                origin, extend, ..
            } => {
                let rect = sitemap_core::Bounds::from_points(origin, point);
                if rect.width() > 0.0 || rect.height() > 0.0 {
                    self.change_selection(|selection, scene| {
                        selection.select_in_rect(scene, &rect, extend)
                    });
                }
            }
            Gesture::Drawing { origin, .. } => {
                let current = self.maybe_snap(point);
                self.finish_drawing(origin, current);
            }
        }
        self.redraw = true;
    }

    fn finish_drawing(&mut self, origin: Point, current: Point) {
        let drawing = &self.config.drawing;
        let created = match self.tools.tool() {
            Tool::DrawRectangle | Tool::DrawCircle => {
                let rect = drawn_rect(
                    origin,
                    current,
                    drawing.default_width,
                    drawing.default_height,
                );
                let (element_type, shape) = if self.tools.tool() == Tool::DrawCircle {
                    ("circle", ElementShape::Ellipse)
                } else {
                    ("rectangle", ElementShape::Rectangle)
                };
                self.create_primitive(element_type, shape, rect.min(), rect.width(), rect.height(), "")
            }
            Tool::Text => {
                let (w, h) = (drawing.text_width, drawing.text_height);
                self.create_primitive("text", ElementShape::Text, origin, w, h, "Text")
            }
            Tool::Measure => {
                let measurement = Measurement::new(origin, current);
                tracing::debug!("Measured {:.2} units", measurement.distance);
                self.annotations.measurements.push(measurement);
                true
            }
            Tool::IssueReport => {
                let marker = IssueMarker::new(origin, "");
                tracing::info!("Issue {} reported at {}", marker.id, marker.position);
                self.annotations.issues.push(marker);
                self.is_modified = true;
                true
            }
            Tool::Select | Tool::Pan => false,
        };

        if created && self.tools.finish_creation() {
            self.emit_tool_changed();
        }
    }

    fn create_primitive(
        &mut self,
        element_type: &str,
        shape: ElementShape,
        position: Point,
        width: f64,
        height: f64,
        label: &str,
    ) -> bool {
        let drawing = &self.config.drawing;
        let fill = if shape == ElementShape::Text {
            Color::TRANSPARENT
        } else {
            Color::parse_or(&drawing.fill, Color::WHITE)
        };
        let stroke = Color::parse_or(&drawing.stroke, Color::BLACK);
        let stroke_width = drawing.stroke_width;

        let id = self.scene.next_id();
        match Element::new(id, element_type, shape, position, width, height) {
            Ok(element) => {
                let element = element
                    .with_fill(fill)
                    .with_stroke(stroke, stroke_width)
                    .with_label(label);
                tracing::debug!("Drew {} {} at {}", element_type, id, position);
                self.execute_command(SceneCommand::add(vec![element]));
                self.change_selection(|selection, _| selection.select_only(id));
                true
            }
            Err(e) => {
                tracing::warn!("Cannot create {}: {}", element_type, e);
                false
            }
        }
    }
}
