use crate::model::Element;
use crate::scene::Scene;

/// A reversible change to the scene.
///
/// Commands capture a change after it was decided: they carry the element
/// values needed to both re-apply and revert it, so `apply` and `undo` can be
/// called any number of times in alternation.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneCommand {
    AddElements(AddElements),
    RemoveElements(RemoveElements),
    UpdateElements(UpdateElements),
    Composite(CompositeCommand),
}

/// Elements placed on top of the draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct AddElements {
    pub elements: Vec<Element>,
}

/// Elements taken out of the scene, with the draw-order index each had.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoveElements {
    /// Sorted by ascending index.
    pub removed: Vec<(usize, Element)>,
}

impl RemoveElements {
    /// Snapshots the listed elements as they currently sit in the scene.
    /// Unknown ids are skipped.
    pub fn capture(scene: &Scene, ids: &[u64]) -> Self {
        let mut removed: Vec<(usize, Element)> = ids
            .iter()
            .filter_map(|id| {
                let index = scene.index_of(*id)?;
                Some((index, scene.elements()[index].clone()))
            })
            .collect();
        removed.sort_by_key(|(index, _)| *index);
        removed.dedup_by_key(|(index, _)| *index);
        Self { removed }
    }

    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
    }
}

/// Elements whose properties changed (move, resize, rotate, style).
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateElements {
    pub before: Vec<Element>,
    pub after: Vec<Element>,
}

impl UpdateElements {
    /// True when nothing actually changed.
    pub fn is_noop(&self) -> bool {
        self.before == self.after
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompositeCommand {
    pub commands: Vec<SceneCommand>,
    pub name: String,
}

impl SceneCommand {
    pub fn add(elements: Vec<Element>) -> Self {
        SceneCommand::AddElements(AddElements { elements })
    }

    pub fn remove(scene: &Scene, ids: &[u64]) -> Self {
        SceneCommand::RemoveElements(RemoveElements::capture(scene, ids))
    }

    pub fn update(before: Vec<Element>, after: Vec<Element>) -> Self {
        SceneCommand::UpdateElements(UpdateElements { before, after })
    }

    /// Name for display in undo/redo menus.
    pub fn name(&self) -> &str {
        match self {
            SceneCommand::AddElements(_) => "Add Elements",
            SceneCommand::RemoveElements(_) => "Delete Elements",
            SceneCommand::UpdateElements(_) => "Edit Elements",
            SceneCommand::Composite(cmd) => &cmd.name,
        }
    }

    /// Ids of every element the command touches.
    pub fn affected_ids(&self) -> Vec<u64> {
        match self {
            SceneCommand::AddElements(cmd) => cmd.elements.iter().map(|e| e.id).collect(),
            SceneCommand::RemoveElements(cmd) => cmd.removed.iter().map(|(_, e)| e.id).collect(),
            SceneCommand::UpdateElements(cmd) => cmd.after.iter().map(|e| e.id).collect(),
            SceneCommand::Composite(cmd) => {
                cmd.commands.iter().flat_map(|c| c.affected_ids()).collect()
            }
        }
    }

    pub fn apply(&self, scene: &mut Scene) {
        match self {
            SceneCommand::AddElements(cmd) => {
                for element in &cmd.elements {
                    if let Err(e) = scene.insert(element.clone()) {
                        tracing::warn!("Failed to add element {}: {}", element.id, e);
                    }
                }
            }
            SceneCommand::RemoveElements(cmd) => {
                for (_, element) in &cmd.removed {
                    scene.remove(element.id);
                }
            }
            SceneCommand::UpdateElements(cmd) => replace_all(scene, &cmd.after),
            SceneCommand::Composite(cmd) => {
                for sub_cmd in &cmd.commands {
                    sub_cmd.apply(scene);
                }
            }
        }
    }

    pub fn undo(&self, scene: &mut Scene) {
        match self {
            SceneCommand::AddElements(cmd) => {
                for element in &cmd.elements {
                    scene.remove(element.id);
                }
            }
            SceneCommand::RemoveElements(cmd) => {
                // Ascending order puts each element back at its original index.
                for (index, element) in &cmd.removed {
                    if let Err(e) = scene.insert_at(*index, element.clone()) {
                        tracing::warn!("Failed to restore element {}: {}", element.id, e);
                    }
                }
            }
            SceneCommand::UpdateElements(cmd) => replace_all(scene, &cmd.before),
            SceneCommand::Composite(cmd) => {
                for sub_cmd in cmd.commands.iter().rev() {
                    sub_cmd.undo(scene);
                }
            }
        }
    }
}

fn replace_all(scene: &mut Scene, elements: &[Element]) {
    for element in elements {
        if let Err(e) = scene.replace(element.clone()) {
            tracing::warn!("Failed to update element {}: {}", element.id, e);
        }
    }
}
