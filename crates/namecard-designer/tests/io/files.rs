use std::sync::Arc;

use namecard_designer::{FileImageDecoder, ImageRole, NamecardEditor, Profile, TextAlign};
use namecard_settings::Config;

#[tokio::test]
async fn test_save_and_reload_template() {
    let dir = tempfile::tempdir().unwrap();
    image::RgbaImage::new(64, 32).save(dir.path().join("logo.png")).unwrap();
    let decoder = Arc::new(FileImageDecoder::with_base_dir(dir.path()));

    let mut editor = NamecardEditor::new(Config::default(), decoder.clone());
    editor.load_default_template();
    editor.bind_profile(&Profile::new("Acme", "Jane Doe", "CSO"));
    let logo = editor.add_image("logo.png", ImageRole::Editable).await.unwrap();
    assert!(editor.set_position(logo, 20.0, 380.0).unwrap());

    let path = dir.path().join("jane.json");
    editor.save_to_file(&path).unwrap();
    assert_eq!(editor.current_file_path.as_deref(), Some(path.as_path()));

    let mut reopened = NamecardEditor::new(Config::default(), decoder);
    let report = reopened.load_from_file(&path).await.unwrap();
    assert_eq!(report.object_count, 4);
    assert_eq!(reopened.template_name, "jane");
    assert_eq!(
        reopened.export_template().objects,
        editor.export_template().objects
    );

    let image = reopened
        .document()
        .objects()
        .iter()
        .find_map(|o| o.object.as_image().cloned())
        .unwrap();
    assert_eq!((image.natural_width, image.natural_height), (64.0, 32.0));
    assert_eq!((image.left, image.top), (20.0, 380.0));
}

#[tokio::test]
async fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut editor = NamecardEditor::new(Config::default(), Arc::new(FileImageDecoder::new()));
    editor.load_default_template();
    let before = editor.document().snapshot();

    let err = editor
        .load_from_file(dir.path().join("nope.json"))
        .await
        .unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to read template"));
    assert_eq!(editor.document().snapshot(), before);
}

#[tokio::test]
async fn test_property_setters() {
    let mut editor = NamecardEditor::new(Config::default(), Arc::new(FileImageDecoder::new()));
    editor.load_default_template();
    let id = editor.document().text_fields().map(|(id, _)| id).next().unwrap();

    assert!(editor.set_text(id, "Initech").unwrap());
    assert!(editor.set_font_size(id, 500.0).unwrap());
    assert!(editor.set_text_align(id, TextAlign::Right).unwrap());
    assert!(editor.set_fill(id, "#112233").unwrap());

    let text = editor
        .document()
        .get(id)
        .and_then(|o| o.object.as_text())
        .cloned()
        .unwrap();
    assert_eq!(text.text, "Initech");
    assert_eq!(text.font_size, 200.0);
    assert_eq!(text.text_align, TextAlign::Right);
    assert_eq!(text.fill, "#112233");

    editor.set_background_color("#000000");
    let exported = editor.export_template();
    assert_eq!(exported.canvas.background_color, "#000000");
}

#[tokio::test]
async fn test_saved_name_wins_over_file_stem() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("conference-badge.json");
    std::fs::write(
        &path,
        r#"{"formatVersion":"1.0","metadata":{"name":"Speaker","created":"2026-03-01T09:00:00Z","modified":"2026-03-01T09:00:00Z"},"canvas":{"width":340,"height":472},"objects":[]}"#,
    )
    .unwrap();

    let mut editor = NamecardEditor::new(Config::default(), Arc::new(FileImageDecoder::new()));
    editor.load_from_file(&path).await.unwrap();
    assert_eq!(editor.template_name, "Speaker");

    let other = dir.path().join("plain.json");
    std::fs::write(
        &other,
        r#"{"formatVersion":"1.0","canvas":{"width":340,"height":472},"objects":[]}"#,
    )
    .unwrap();
    let mut editor = NamecardEditor::new(Config::default(), Arc::new(FileImageDecoder::new()));
    editor.load_from_file(&other).await.unwrap();
    assert_eq!(editor.template_name, "plain");
}
