use sitemap_core::{ElementError, Error, PersistenceError, Point};
use sitemap_designer::serialization::FILE_FORMAT_VERSION;
use sitemap_designer::{
    BuilderSession, Element, ElementShape, IdSource, InMemoryRepository, JsonFileRepository,
    Scene, SceneRepository, SiteMapFile, Viewport,
};
use tempfile::TempDir;

fn sample_file() -> SiteMapFile {
    let mut scene = Scene::default();
    let id = scene.next_id();
    let element = Element::new(id, "bar", ElementShape::Rectangle, Point::new(40.0, 60.0), 100.0, 40.0)
        .unwrap()
        .with_label("Bar");
    scene.insert(element).unwrap();

    let mut viewport = Viewport::new(800.0, 600.0);
    viewport.set_zoom(1.5);
    viewport.set_pan(-20.0, 10.0);
    SiteMapFile::new("Riverside", scene).with_viewport(&viewport)
}

#[test]
fn test_json_roundtrip() {
    let file = sample_file();
    let json = file.to_json().unwrap();
    assert!(json.contains("\"version\": \"1.0\""));

    let loaded = SiteMapFile::from_json(&json).unwrap();
    assert_eq!(loaded.metadata.name, "Riverside");
    assert_eq!(loaded.scene, file.scene);
    assert_eq!(loaded.viewport.zoom, 1.5);
    assert_eq!(loaded.viewport.pan_x, -20.0);
}

#[test]
fn test_unknown_version_rejected() {
    let mut file = sample_file();
    file.version = "9.9".to_string();
    let json = file.to_json().unwrap();
    let err = SiteMapFile::from_json(&json).unwrap_err();
    assert!(matches!(
        err,
        Error::Persistence(PersistenceError::UnsupportedVersion(ref v)) if v == "9.9"
    ));
    assert_eq!(FILE_FORMAT_VERSION, "1.0");
}

#[test]
fn test_malformed_json_rejected() {
    let err = SiteMapFile::from_json("{ not json").unwrap_err();
    assert!(matches!(err, Error::Persistence(PersistenceError::Json(_))));
}

#[test]
fn test_element_id_at_ceiling_rejected() {
    let mut doc: serde_json::Value = serde_json::from_str(&sample_file().to_json().unwrap()).unwrap();
    doc["scene"]["elements"][0]["id"] = serde_json::json!(u64::MAX);

    let err = SiteMapFile::from_json(&doc.to_string()).unwrap_err();
    assert!(matches!(err, Error::Element(ElementError::IdOutOfRange(id)) if id == u64::MAX));
}

#[test]
fn test_exhausted_counter_never_reuses_ids() {
    let mut scene = Scene::default();
    let last = Element::new(u64::MAX - 1, "bar", ElementShape::Rectangle, Point::zero(), 10.0, 10.0)
        .unwrap();
    scene.insert(last).unwrap();
    assert_eq!(scene.peek_next_id(), u64::MAX);

    let id = scene.next_id();
    let element = Element::new(id, "bar", ElementShape::Rectangle, Point::zero(), 10.0, 10.0).unwrap();
    assert_eq!(scene.insert(element), Err(ElementError::IdOutOfRange(u64::MAX)));
    assert_eq!(scene.len(), 1);
}

#[test]
fn test_stale_counter_is_corrected() {
    let mut file = sample_file();
    file.next_id = 0;
    let json = file.to_json().unwrap();
    let loaded = SiteMapFile::from_json(&json).unwrap();
    let max_id = loaded.scene.ids().into_iter().max().unwrap();
    assert!(loaded.next_id > max_id);
}

#[test]
fn test_out_of_range_zoom_clamped_on_apply() {
    let mut file = sample_file();
    file.viewport.zoom = 40.0;
    let mut viewport = Viewport::default();
    file.viewport.apply_to(&mut viewport);
    assert_eq!(viewport.zoom(), 5.0);
}

#[test]
fn test_file_repository_save_list_load() {
    let temp_dir = TempDir::new().unwrap();
    let repo = JsonFileRepository::new(temp_dir.path().join("maps"));
    assert!(repo.list().unwrap().is_empty());

    repo.save("riverside", &sample_file()).unwrap();
    repo.save("hilltop", &sample_file()).unwrap();
    assert_eq!(repo.list().unwrap(), vec!["hilltop", "riverside"]);
    assert!(repo.path_for("riverside").exists());

    let loaded = repo.load("riverside").unwrap();
    assert_eq!(loaded.scene.len(), 1);

    let err = repo.load("missing").unwrap_err();
    assert!(matches!(
        err,
        Error::Persistence(PersistenceError::NotFound(ref id)) if id == "missing"
    ));
}

#[test]
fn test_session_roundtrip_through_repository() {
    let repo = InMemoryRepository::new();
    assert!(repo.is_empty());

    let mut session = BuilderSession::default().with_name("Festival");
    session.insert_template("main-stage", Point::new(200.0, 100.0)).unwrap();
    session.insert_template("generator", Point::new(420.0, 100.0)).unwrap();
    session.save_to(&repo, "festival").unwrap();
    assert_eq!(repo.len(), 1);

    let mut other = BuilderSession::default();
    other.load_from(&repo, "festival").unwrap();
    assert_eq!(other.name(), "Festival");
    assert_eq!(other.scene(), session.scene());
    assert!(!other.is_modified());
    assert!(other.load_from(&repo, "nope").is_err());
}
