use std::sync::{Arc, Mutex};

use namecard_core::event_bus::{DocumentEvent, EditorEvent, EventCategory, EventFilter};
use namecard_designer::{
    FileImageDecoder, GuideKind, NamecardEditor, SceneElement, SceneObject, ShapeObject,
};
use namecard_settings::Config;

fn editor() -> NamecardEditor {
    NamecardEditor::new(Config::default(), Arc::new(FileImageDecoder::new()))
}

#[test]
fn test_toggle_guides_twice() {
    let mut editor = editor();
    editor.clear();
    assert_eq!(editor.document().guide_count(), 4);

    assert_eq!(editor.toggle_guides(false), 0);
    assert_eq!(editor.document().guide_count(), 0);
    assert_eq!(editor.toggle_guides(true), 4);
    assert_eq!(editor.toggle_guides(true), 4);
    assert_eq!(editor.document().guide_count(), 4);
}

#[test]
fn test_default_template_has_size_label() {
    let mut editor = editor();
    editor.load_default_template();

    let label = editor.document().objects().iter().find_map(|o| match &o.object {
        SceneObject::Guide(g) if g.kind == GuideKind::SizeLabel => Some(g.clone()),
        _ => None,
    });
    assert!(label.is_some());
    assert_eq!(editor.document().guide_count(), 5);
    assert!(editor.print_objects().iter().all(|o| !o.object.is_guide()));
}

#[test]
fn test_resize_keeps_object_positions() {
    let mut editor = editor();
    editor.load_default_template();
    let before = editor.document().content_positions();

    assert!(editor.resize(9.0, 5.0).is_ok());
    assert_eq!(editor.document().width_px(), 340.0);
    assert_eq!(editor.document().height_px(), 189.0);
    assert_eq!(editor.document().content_positions(), before);
    assert_eq!(editor.document().guide_count(), 5);
}

fn guide_layout(editor: &NamecardEditor) -> Vec<(GuideKind, (f64, f64, f64, f64))> {
    editor
        .document()
        .objects()
        .iter()
        .filter_map(|o| match &o.object {
            SceneObject::Guide(g) => Some((g.kind, o.object.bounds())),
            _ => None,
        })
        .collect()
}

#[test]
fn test_repeated_resize_is_stable() {
    let mut editor = editor();
    editor.load_default_template();
    let positions = editor.document().content_positions();

    editor.resize(9.0, 12.5).unwrap();
    let guides = guide_layout(&editor);
    assert_eq!(guides.len(), 5);

    editor.resize(9.0, 12.5).unwrap();
    assert_eq!(guide_layout(&editor), guides);
    assert_eq!(editor.document().content_positions(), positions);
    assert_eq!(editor.document().width_px(), 340.0);
    assert_eq!(editor.document().height_px(), 472.0);
}

#[test]
fn test_resize_rejects_empty_paper() {
    let mut editor = editor();
    editor.load_default_template();
    assert!(editor.resize(0.0, 5.0).is_err());
    assert_eq!(editor.document().height_px(), 472.0);
}

#[test]
fn test_resize_publishes_new_frame() {
    let mut editor = editor();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    editor.events().subscribe(
        EventFilter::Categories(vec![EventCategory::Document]),
        move |event| sink.lock().unwrap().push(event),
    );

    editor.resize(9.0, 5.0).unwrap();
    let seen = seen.lock().unwrap();
    assert!(seen.contains(&EditorEvent::Document(DocumentEvent::Resized {
        width_px: 340.0,
        height_px: 189.0,
    })));
}

#[test]
fn test_shapes_keep_bounds_across_resize() {
    let mut editor = editor();
    editor.clear();
    let mut doc = editor.document().clone();
    let id = doc.add_object(SceneObject::Shape(ShapeObject::rect(30.0, 40.0, 50.0, 20.0)));
    let bounds = doc.get(id).map(|o| o.object.bounds());

    doc.resize_paper(namecard_core::units::PaperSize::BUSINESS_CARD, 0.5);
    assert_eq!(doc.get(id).map(|o| o.object.bounds()), bounds);
}
