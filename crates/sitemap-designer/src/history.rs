//! Undo/redo command log.

use std::collections::VecDeque;

use crate::commands::SceneCommand;
use crate::scene::Scene;

/// Bounded undo stack plus redo stack of [`SceneCommand`]s.
///
/// One entry corresponds to one user gesture or toolbar action. Recording a new
/// entry clears the redo stack; when the undo stack exceeds `max_depth` the
/// oldest entry is dropped.
#[derive(Debug, Clone)]
pub struct CommandHistory {
    undo_stack: VecDeque<SceneCommand>,
    redo_stack: Vec<SceneCommand>,
    max_depth: usize,
}

impl CommandHistory {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Records a command whose effect is already in the scene.
    pub fn record(&mut self, command: SceneCommand) {
        tracing::debug!("History: recorded '{}'", command.name());
        self.redo_stack.clear();
        self.undo_stack.push_back(command);
        while self.undo_stack.len() > self.max_depth {
            self.undo_stack.pop_front();
        }
    }

    /// Applies a command to the scene and records it.
    pub fn execute(&mut self, command: SceneCommand, scene: &mut Scene) {
        command.apply(scene);
        self.record(command);
    }

    /// Reverts the most recent entry, returning it.
    pub fn undo(&mut self, scene: &mut Scene) -> Option<&SceneCommand> {
        let command = self.undo_stack.pop_back()?;
        tracing::debug!("History: undo '{}'", command.name());
        command.undo(scene);
        self.redo_stack.push(command);
        self.redo_stack.last()
    }

    /// Re-applies the most recently undone entry, returning it.
    pub fn redo(&mut self, scene: &mut Scene) -> Option<&SceneCommand> {
        let command = self.redo_stack.pop()?;
        tracing::debug!("History: redo '{}'", command.name());
        command.apply(scene);
        self.undo_stack.push_back(command);
        self.undo_stack.back()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Name of the entry `undo` would revert.
    pub fn undo_name(&self) -> Option<&str> {
        self.undo_stack.back().map(|c| c.name())
    }

    pub fn redo_name(&self) -> Option<&str> {
        self.redo_stack.last().map(|c| c.name())
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new(100)
    }
}
