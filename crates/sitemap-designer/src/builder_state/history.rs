//! Undo/redo for the session.

use super::BuilderSession;

impl BuilderSession {
    /// Reverts the last gesture or action. Returns false when there is
    /// nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.abort_gesture();
        if self.history.undo(&mut self.scene).is_none() {
            return false;
        }
        self.after_scene_change();
        true
    }

    /// Re-applies the last undone entry.
    pub fn redo(&mut self) -> bool {
        self.abort_gesture();
        if self.history.redo(&mut self.scene).is_none() {
            return false;
        }
        self.after_scene_change();
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}
