//! Save/open operations for the session.

use anyhow::Context;
use sitemap_core::{AppEvent, FileEvent};
use sitemap_settings::BuilderConfig;
use std::path::Path;

use super::BuilderSession;
use crate::serialization::{SceneRepository, SiteMapFile};

impl BuilderSession {
    /// Snapshot of the session as a site-map document.
    pub fn to_document(&self) -> SiteMapFile {
        SiteMapFile::new(&self.name, self.scene.clone())
            .with_viewport(&self.viewport)
            .with_annotations(self.annotations.clone())
    }

    /// Replaces the session contents with a document. Selection, history and
    /// any gesture in progress are discarded.
    pub fn load_document(&mut self, file: SiteMapFile) {
        self.abort_gesture();
        if self.drag.is_dragging() {
            let _ = self.cancel_drag();
        }

        self.name = file.metadata.name;
        self.scene = file.scene;
        self.scene.reserve_ids_from(file.next_id);
        file.viewport.apply_to(&mut self.viewport);
        self.annotations = file.annotations;
        self.history.clear();
        self.selection.clear();
        self.sync_canvas_zone();
        self.drag.set_snapping(self.snap_cell());
        self.is_modified = false;

        self.emit_selection_changed();
        self.emit_scene_changed();
        self.request_redraw();
    }

    /// Saves through a repository under `id`.
    pub fn save_to(&mut self, repo: &dyn SceneRepository, id: &str) -> sitemap_core::Result<()> {
        repo.save(id, &self.to_document())?;
        self.is_modified = false;
        self.emit(AppEvent::File(FileEvent::Saved { id: id.to_string() }));
        Ok(())
    }

    /// Loads `id` from a repository into this session.
    pub fn load_from(&mut self, repo: &dyn SceneRepository, id: &str) -> sitemap_core::Result<()> {
        let file = repo.load(id)?;
        self.load_document(file);
        self.emit(AppEvent::File(FileEvent::Loaded {
            id: id.to_string(),
            element_count: self.scene.len(),
        }));
        Ok(())
    }

    /// Opens a new session on a stored site map.
    pub fn open(
        repo: &dyn SceneRepository,
        id: &str,
        config: BuilderConfig,
    ) -> sitemap_core::Result<Self> {
        let mut session = Self::new(config);
        session.load_from(repo, id)?;
        Ok(session)
    }

    /// Saves the document to a JSON file.
    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        self.to_document()
            .save_to_file(path)
            .with_context(|| format!("Failed to save site map to {}", path.display()))?;
        self.is_modified = false;
        Ok(())
    }

    /// Loads a JSON site-map file into this session.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let file = SiteMapFile::load_from_file(path)
            .with_context(|| format!("Failed to load site map from {}", path.display()))?;
        self.load_document(file);
        Ok(())
    }
}
