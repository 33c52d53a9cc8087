//! Toolbar commands on the current selection.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sitemap_core::Point;

use super::BuilderSession;
use crate::commands::SceneCommand;
use crate::duplication::{DuplicationGenerator, DuplicationOptions, DuplicationPreview};
use crate::model::{normalize_degrees, Color, Element};

/// Edge or centre line elements are aligned to, taken from the selection bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
    Top,
    Middle,
    Bottom,
}

/// Axis along which element centres are spread evenly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlipAxis {
    /// Mirror left/right
    Horizontal,
    /// Mirror top/bottom
    Vertical,
}

/// Immediate toolbar command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "kebab-case")]
pub enum ToolbarAction {
    Duplicate(DuplicationOptions),
    Delete,
    Align(Alignment),
    Distribute(Axis),
    Flip(FlipAxis),
    /// Degrees added to every selected element's rotation
    Rotate(f64),
    SelectAll,
    ClearSelection,
}

impl ToolbarAction {
    pub fn name(&self) -> &'static str {
        match self {
            ToolbarAction::Duplicate(_) => "Duplicate",
            ToolbarAction::Delete => "Delete",
            ToolbarAction::Align(_) => "Align",
            ToolbarAction::Distribute(_) => "Distribute",
            ToolbarAction::Flip(_) => "Flip",
            ToolbarAction::Rotate(_) => "Rotate",
            ToolbarAction::SelectAll => "Select All",
            ToolbarAction::ClearSelection => "Clear Selection",
        }
    }
}

/// Result of a toolbar command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The command ran. `affected` lists the elements it created, removed or
    /// changed (empty when it ran without changing anything).
    Applied { affected: Vec<u64> },
    /// Nothing to act on (e.g. empty selection).
    Disabled,
}

impl ActionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, ActionOutcome::Applied { .. })
    }

    pub fn affected(&self) -> &[u64] {
        match self {
            ActionOutcome::Applied { affected } => affected,
            ActionOutcome::Disabled => &[],
        }
    }
}

impl BuilderSession {
    /// Whether `action` would do anything in the current state.
    pub fn is_action_enabled(&self, action: &ToolbarAction) -> bool {
        match action {
            ToolbarAction::SelectAll => !self.scene.is_empty(),
            _ => !self.selection.is_empty(),
        }
    }

    /// Runs a toolbar command. Commands that change the scene are recorded
    /// as a single history entry.
    pub fn execute(&mut self, action: ToolbarAction) -> ActionOutcome {
        if !self.is_action_enabled(&action) {
            tracing::debug!("{} disabled: nothing selected", action.name());
            return ActionOutcome::Disabled;
        }

        match action {
            ToolbarAction::Duplicate(options) => {
                self.clear_duplication_preview();
                self.duplicate_selection(&options)
            }
            ToolbarAction::Delete => self.delete_selection(),
            ToolbarAction::Align(alignment) => self.align_selection(alignment),
            ToolbarAction::Distribute(axis) => self.distribute_selection(axis),
            ToolbarAction::Flip(axis) => self.flip_selection(axis),
            ToolbarAction::Rotate(degrees) => self.rotate_selection(degrees),
            ToolbarAction::SelectAll => {
                self.change_selection(|selection, scene| selection.select_all(scene));
                ActionOutcome::Applied {
                    affected: self.selection.ids().to_vec(),
                }
            }
            ToolbarAction::ClearSelection => {
                let affected = self.selection.ids().to_vec();
                self.change_selection(|selection, _| selection.clear());
                ActionOutcome::Applied { affected }
            }
        }
    }

    /// Copy positions the duplicate command would produce, without creating
    /// anything.
    pub fn preview_duplication(&self, options: &DuplicationOptions) -> DuplicationPreview {
        DuplicationGenerator::preview(&self.selected_elements(), options)
    }

    /// Draws ghost outlines of the copies `options` would create from the
    /// current selection, until the duplication runs or the preview is
    /// cleared.
    pub fn show_duplication_preview(&mut self, options: DuplicationOptions) {
        self.pending_duplication = Some(options);
        self.redraw = true;
    }

    pub fn clear_duplication_preview(&mut self) {
        if self.pending_duplication.take().is_some() {
            self.redraw = true;
        }
    }

    /// Moves the selection by a scene-space delta (arrow-key nudge).
    pub fn nudge_selection(&mut self, dx: f64, dy: f64) -> ActionOutcome {
        if self.selection.is_empty() {
            return ActionOutcome::Disabled;
        }
        if !(dx.is_finite() && dy.is_finite()) {
            return ActionOutcome::Applied { affected: vec![] };
        }
        let ids = self.selection.in_draw_order(&self.scene);
        self.update_elements(&ids, |element| element.translate(dx, dy))
    }

    /// Resizes one element. Non-positive sizes are rejected.
    pub fn resize_element(&mut self, id: u64, width: f64, height: f64) -> sitemap_core::Result<()> {
        let before = self
            .scene
            .get(id)
            .cloned()
            .ok_or(sitemap_core::ElementError::NotFound(id))?;
        let mut after = before.clone();
        after.resize(width, height)?;
        self.commit_update(vec![before], vec![after]);
        Ok(())
    }

    /// Changes fill, stroke and stroke width of one element.
    pub fn set_element_style(
        &mut self,
        id: u64,
        fill: Color,
        stroke: Color,
        stroke_width: f64,
    ) -> sitemap_core::Result<()> {
        let before = self
            .scene
            .get(id)
            .cloned()
            .ok_or(sitemap_core::ElementError::NotFound(id))?;
        let mut after = before.clone().with_fill(fill).with_stroke(stroke, stroke_width);
        if !(after.stroke_width.is_finite() && after.stroke_width >= 0.0) {
            after.stroke_width = before.stroke_width;
        }
        self.commit_update(vec![before], vec![after]);
        Ok(())
    }

    pub fn set_element_label(&mut self, id: u64, label: impl Into<String>) -> sitemap_core::Result<()> {
        let before = self
            .scene
            .get(id)
            .cloned()
            .ok_or(sitemap_core::ElementError::NotFound(id))?;
        let after = before.clone().with_label(label);
        self.commit_update(vec![before], vec![after]);
        Ok(())
    }

    pub(crate) fn selected_elements(&self) -> Vec<Element> {
        self.selection
            .in_draw_order(&self.scene)
            .into_iter()
            .filter_map(|id| self.scene.get(id).cloned())
            .collect()
    }

    fn duplicate_selection(&mut self, options: &DuplicationOptions) -> ActionOutcome {
        let sources = self.selected_elements();
        let copies = DuplicationGenerator::generate(&sources, options, &mut self.scene);
        let ids: Vec<u64> = copies.iter().map(|e| e.id).collect();
        tracing::info!(
            "Duplicated {} element(s) into {} copies",
            sources.len(),
            copies.len()
        );

        self.execute_command(SceneCommand::add(copies));
        self.change_selection(|selection, _| selection.set(ids.iter().copied()));
        ActionOutcome::Applied { affected: ids }
    }

    fn delete_selection(&mut self) -> ActionOutcome {
        let ids = self.selection.in_draw_order(&self.scene);
        tracing::info!("Deleting {} element(s)", ids.len());
        let command = SceneCommand::remove(&self.scene, &ids);
        self.execute_command(command);
        ActionOutcome::Applied { affected: ids }
    }

    fn align_selection(&mut self, alignment: Alignment) -> ActionOutcome {
        let ids = self.selection.in_draw_order(&self.scene);
        let Some(bounds) = self.scene.bounds_of(&ids) else {
            return ActionOutcome::Applied { affected: vec![] };
        };
        let center = bounds.center();

        self.update_elements(&ids, |element| {
            let (w, h) = (element.width(), element.height());
            match alignment {
                Alignment::Left => element.x = bounds.min_x,
                Alignment::Center => element.x = center.x - w / 2.0,
                Alignment::Right => element.x = bounds.max_x - w,
                Alignment::Top => element.y = bounds.min_y,
                Alignment::Middle => element.y = center.y - h / 2.0,
                Alignment::Bottom => element.y = bounds.max_y - h,
            }
        })
    }

    /// Spaces element centres evenly between the two outermost ones.
    fn distribute_selection(&mut self, axis: Axis) -> ActionOutcome {
        let mut elements = self.selected_elements();
        if elements.len() < 3 {
            return ActionOutcome::Applied { affected: vec![] };
        }

        let along = |p: Point| match axis {
            Axis::Horizontal => p.x,
            Axis::Vertical => p.y,
        };
        elements.sort_by(|a, b| along(a.center()).total_cmp(&along(b.center())));

        let first = along(elements[0].center());
        let last = along(elements[elements.len() - 1].center());
        let step = (last - first) / (elements.len() - 1) as f64;
        let targets: HashMap<u64, f64> = elements
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id, first + step * i as f64))
            .collect();

        let ids: Vec<u64> = elements.iter().map(|e| e.id).collect();
        self.update_elements(&ids, |element| {
            if let Some(target) = targets.get(&element.id) {
                let center = element.center();
                let new_center = match axis {
                    Axis::Horizontal => Point::new(*target, center.y),
                    Axis::Vertical => Point::new(center.x, *target),
                };
                element.set_center(new_center);
            }
        })
    }

    /// Mirrors positions across the selection centre and negates rotation.
    fn flip_selection(&mut self, axis: FlipAxis) -> ActionOutcome {
        let ids = self.selection.in_draw_order(&self.scene);
        let Some(bounds) = self.scene.bounds_of(&ids) else {
            return ActionOutcome::Applied { affected: vec![] };
        };
        let pivot = bounds.center();

        self.update_elements(&ids, |element| {
            let c = element.center();
            let mirrored = match axis {
                FlipAxis::Horizontal => Point::new(2.0 * pivot.x - c.x, c.y),
                FlipAxis::Vertical => Point::new(c.x, 2.0 * pivot.y - c.y),
            };
            element.set_center(mirrored);
            element.set_rotation(normalize_degrees(-element.rotation));
        })
    }

    fn rotate_selection(&mut self, degrees: f64) -> ActionOutcome {
        if !degrees.is_finite() {
            tracing::warn!("Ignoring rotation by {}", degrees);
            return ActionOutcome::Applied { affected: vec![] };
        }
        let ids = self.selection.in_draw_order(&self.scene);
        self.update_elements(&ids, |element| {
            element.set_rotation(normalize_degrees(element.rotation + degrees));
        })
    }

    /// Edits the listed elements in place, recording one history entry when
    /// anything changed.
    fn update_elements<F>(&mut self, ids: &[u64], mut edit: F) -> ActionOutcome
    where
        F: FnMut(&mut Element),
    {
        let before: Vec<Element> = ids
            .iter()
            .filter_map(|id| self.scene.get(*id).cloned())
            .collect();
        let after: Vec<Element> = before
            .iter()
            .cloned()
            .map(|mut element| {
                edit(&mut element);
                element
            })
            .collect();

        let affected = self.commit_update(before, after);
        ActionOutcome::Applied { affected }
    }

    /// Applies before/after pairs as one history entry. Returns the ids that
    /// actually changed.
    fn commit_update(&mut self, before: Vec<Element>, after: Vec<Element>) -> Vec<u64> {
        let (before, after): (Vec<Element>, Vec<Element>) = before
            .into_iter()
            .zip(after)
            .filter(|(b, a)| b != a)
            .unzip();
        if after.is_empty() {
            return Vec::new();
        }
        let affected = after.iter().map(|e| e.id).collect();
        self.execute_command(SceneCommand::update(before, after));
        affected
    }
}
