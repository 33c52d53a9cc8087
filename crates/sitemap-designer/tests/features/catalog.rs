use sitemap_core::{CatalogError, Point};
use sitemap_designer::catalog::template_id_from_payload;
use sitemap_designer::{
    BuilderSession, Catalog, Color, DragItem, ElementTemplate, TemplateCategory, TemplateLibrary,
};
use tempfile::TempDir;

#[test]
fn test_default_library_contents() {
    let library = TemplateLibrary::with_defaults();
    assert!(library.count() >= 10);
    assert!(library.categories().contains(&TemplateCategory::Power));
    for template in library.list_all() {
        assert!(template.validate().is_ok(), "{} invalid", template.id);
    }
}

#[test]
fn test_lookup_and_queries() {
    let library = TemplateLibrary::with_defaults();
    let generator = library.by_id("generator").unwrap();
    assert_eq!((generator.width, generator.height), (60.0, 40.0));
    assert_eq!(generator.fill, Color::AMBER);

    assert_eq!(
        library.by_id("helipad"),
        Err(CatalogError::TemplateNotFound("helipad".to_string()))
    );

    let food = library.by_category(TemplateCategory::FoodAndDrink);
    assert!(food.iter().all(|t| t.category == TemplateCategory::FoodAndDrink));
    assert!(food.iter().any(|t| t.id == "bar"));

    let hits = library.search("WATER");
    assert!(hits.iter().any(|t| t.id == "water-point"));
    assert_eq!(library.search("").len(), library.count());
}

#[test]
fn test_custom_library_file_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("templates.json");

    let mut library = TemplateLibrary::new();
    library
        .add_template(
            ElementTemplate::new("info-point", "Info Point", TemplateCategory::Custom, 30.0, 30.0, Color::rgb(0x22, 0xc5, 0x5e))
                .with_tags(&["info", "help"]),
        )
        .unwrap();
    library.save_to_file(&path).unwrap();

    let loaded = TemplateLibrary::load_from_file(&path).unwrap();
    assert_eq!(loaded.count(), 1);
    assert_eq!(loaded.search("help")[0].id, "info-point");
}

#[test]
fn test_invalid_library_file_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.json");
    std::fs::write(&path, "[1, 2, 3]").unwrap();
    assert!(TemplateLibrary::load_from_file(&path).is_err());
    assert!(TemplateLibrary::load_from_file(&temp_dir.path().join("none.json")).is_err());
}

#[test]
fn test_payload_forms() {
    assert_eq!(template_id_from_payload(&serde_json::json!("bar")), Ok("bar"));
    assert_eq!(
        template_id_from_payload(&serde_json::json!({ "id": "bar" })),
        Ok("bar")
    );
    assert_eq!(
        template_id_from_payload(&serde_json::json!(42)),
        Err(CatalogError::MissingTemplateReference)
    );
}

#[test]
fn test_session_with_custom_catalog() {
    let mut library = TemplateLibrary::new();
    library
        .add_template(ElementTemplate::new("kiosk", "Kiosk", TemplateCategory::Custom, 25.0, 25.0, Color::WHITE))
        .unwrap();
    let mut session = BuilderSession::default().with_catalog(Box::new(library));
    assert!(session.catalog().by_id("generator").is_err());

    session.set_snapping(false);
    session
        .start_drag(DragItem::template("kiosk", "custom"), Point::new(5.0, 5.0))
        .unwrap();
    let id = session.end_drag(Point::new(33.0, 44.0)).unwrap().unwrap();
    let element = session.scene().get(id).unwrap();
    assert_eq!(element.element_type, "kiosk");
    assert_eq!(element.position(), Point::new(33.0, 44.0));
    assert_eq!(
        element.properties.payload,
        Some(serde_json::json!({ "template_id": "kiosk" }))
    );
}
