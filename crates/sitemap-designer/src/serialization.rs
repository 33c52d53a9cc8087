//! Site-map documents and the persistence boundary.
//!
//! A site map is stored as one JSON document holding the scene, the viewport it
//! was last shown with, and metadata. Where documents live is behind the
//! [`SceneRepository`] trait; [`JsonFileRepository`] keeps one `<id>.json` file
//! per site map in a directory.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use sitemap_core::PersistenceError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::scene::Scene;
use crate::tools::Annotations;
use crate::viewport::Viewport;

/// Site-map file format version
pub const FILE_FORMAT_VERSION: &str = "1.0";

/// Complete site-map document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteMapFile {
    pub version: String,
    pub metadata: SiteMapMetadata,
    pub viewport: ViewportState,
    pub scene: Scene,
    /// First id the builder may hand out after loading.
    #[serde(default)]
    pub next_id: u64,
    #[serde(default)]
    pub annotations: Annotations,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteMapMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
}

/// Pan and zoom as last shown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

impl From<&Viewport> for ViewportState {
    fn from(viewport: &Viewport) -> Self {
        let pan = viewport.pan();
        Self {
            zoom: viewport.zoom(),
            pan_x: pan.x,
            pan_y: pan.y,
        }
    }
}

impl ViewportState {
    /// Applies the stored pan/zoom to a viewport. Out-of-range zoom is clamped.
    pub fn apply_to(&self, viewport: &mut Viewport) {
        viewport.set_zoom(self.zoom);
        viewport.set_pan(self.pan_x, self.pan_y);
    }
}

impl SiteMapFile {
    /// Creates a document for an empty scene
    pub fn new(name: impl Into<String>, scene: Scene) -> Self {
        let now = Utc::now();
        let next_id = scene.peek_next_id();
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            metadata: SiteMapMetadata {
                name: name.into(),
                created: now,
                modified: now,
                description: String::new(),
            },
            viewport: ViewportState::default(),
            scene,
            next_id,
            annotations: Annotations::default(),
        }
    }

    pub fn with_viewport(mut self, viewport: &Viewport) -> Self {
        self.viewport = ViewportState::from(viewport);
        self
    }

    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }

    /// Updates the modified timestamp.
    pub fn touch(&mut self) {
        self.metadata.modified = Utc::now();
    }

    /// Checks the format version and scene contents, and moves the scene's id
    /// counter past both the stored counter and every stored id.
    pub fn validate(&mut self) -> sitemap_core::Result<()> {
        if self.version != FILE_FORMAT_VERSION {
            return Err(PersistenceError::UnsupportedVersion(self.version.clone()).into());
        }
        self.scene.reserve_ids_from(self.next_id);
        self.scene.validate()?;
        self.next_id = self.scene.peek_next_id();
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses and validates a document.
    pub fn from_json(json: &str) -> sitemap_core::Result<Self> {
        let mut file: SiteMapFile = serde_json::from_str(json).map_err(PersistenceError::from)?;
        file.validate()?;
        Ok(file)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> sitemap_core::Result<()> {
        let json = self.to_json()?;
        std::fs::write(path.as_ref(), json).map_err(PersistenceError::from)?;
        Ok(())
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> sitemap_core::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(PersistenceError::from)?;
        Self::from_json(&content)
    }
}

/// Storage for site-map documents, keyed by site-map id.
pub trait SceneRepository {
    fn save(&self, id: &str, file: &SiteMapFile) -> sitemap_core::Result<()>;
    fn load(&self, id: &str) -> sitemap_core::Result<SiteMapFile>;
}

/// One `<id>.json` document per site map inside a directory.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    dir: PathBuf,
}

impl JsonFileRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the document for `id`.
    pub fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    /// Ids of every stored site map, sorted.
    pub fn list(&self) -> sitemap_core::Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut ids = Vec::new();
        for entry in std::fs::read_dir(&self.dir).map_err(PersistenceError::from)? {
            let path = entry.map_err(PersistenceError::from)?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    ids.push(stem.to_string());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}

impl SceneRepository for JsonFileRepository {
    fn save(&self, id: &str, file: &SiteMapFile) -> sitemap_core::Result<()> {
        std::fs::create_dir_all(&self.dir).map_err(PersistenceError::from)?;
        let path = self.path_for(id);
        file.save_to_file(&path)?;
        tracing::info!("Saved site map '{}' to {}", id, path.display());
        Ok(())
    }

    fn load(&self, id: &str) -> sitemap_core::Result<SiteMapFile> {
        let path = self.path_for(id);
        if !path.exists() {
            return Err(PersistenceError::NotFound(id.to_string()).into());
        }
        let file = SiteMapFile::load_from_file(&path)?;
        tracing::info!(
            "Loaded site map '{}' ({} elements)",
            id,
            file.scene.len()
        );
        Ok(file)
    }
}

/// Repository kept in memory, mainly for tests and embedding hosts.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    documents: RwLock<HashMap<String, String>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }
}

impl SceneRepository for InMemoryRepository {
    fn save(&self, id: &str, file: &SiteMapFile) -> sitemap_core::Result<()> {
        let json = file.to_json()?;
        self.documents.write().insert(id.to_string(), json);
        Ok(())
    }

    fn load(&self, id: &str) -> sitemap_core::Result<SiteMapFile> {
        let documents = self.documents.read();
        let json = documents
            .get(id)
            .ok_or_else(|| PersistenceError::NotFound(id.to_string()))?;
        SiteMapFile::from_json(json)
    }
}
