use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use namecard_core::event_bus::{ContextMenuEvent, EditorEvent, EventCategory, EventFilter};
use namecard_designer::{
    ContextAction, DecodedImage, DocumentError, EditorCommand, ImageDecoder, ImageRole,
    InteractionState, Modifiers, NamecardEditor, Point, PointerButton, SceneElement,
};
use namecard_settings::Config;

struct FixedDecoder;

#[async_trait]
impl ImageDecoder for FixedDecoder {
    async fn decode(&self, _source_ref: &str) -> anyhow::Result<DecodedImage> {
        Ok(DecodedImage {
            width: 680,
            height: 944,
        })
    }
}

fn editor_with_template() -> NamecardEditor {
    let mut editor = NamecardEditor::new(Config::default(), Arc::new(FixedDecoder));
    editor.load_default_template();
    editor
}

/// Center of the topmost text field.
fn first_text(editor: &NamecardEditor) -> (u64, Point) {
    let (id, text) = editor
        .document()
        .text_fields()
        .min_by(|a, b| a.1.top.total_cmp(&b.1.top))
        .unwrap();
    let (x1, y1, x2, y2) = text.bounds();
    (id, Point::new((x1 + x2) / 2.0, (y1 + y2) / 2.0))
}

fn record(editor: &NamecardEditor, category: EventCategory) -> Arc<Mutex<Vec<EditorEvent>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    editor.events().subscribe(
        EventFilter::Categories(vec![category]),
        move |event| sink.lock().unwrap().push(event),
    );
    seen
}

#[test]
fn test_click_selects_and_release_on_empty_clears() {
    let mut editor = editor_with_template();
    let (id, at) = first_text(&editor);

    editor.handle(EditorCommand::click(at.x, at.y)).unwrap();
    editor.handle(EditorCommand::release(at.x, at.y)).unwrap();
    assert_eq!(editor.interaction_state(), InteractionState::Selected(id));

    editor.handle(EditorCommand::click(2.0, 2.0)).unwrap();
    assert_eq!(editor.active_id(), Some(id));
    editor.handle(EditorCommand::release(2.0, 2.0)).unwrap();
    assert_eq!(editor.interaction_state(), InteractionState::Idle);
    assert_eq!(editor.active_id(), None);
}

#[test]
fn test_move_and_commit() {
    let mut editor = editor_with_template();
    let (id, at) = first_text(&editor);
    let before = editor.document().get(id).map(|o| o.object.position()).unwrap();

    editor.handle(EditorCommand::click(at.x, at.y)).unwrap();
    editor.handle(EditorCommand::Move { dx: 5.0, dy: -3.0 }).unwrap();
    assert_eq!(editor.interaction_state(), InteractionState::Moving(id));
    editor.handle(EditorCommand::Commit).unwrap();
    assert_eq!(editor.interaction_state(), InteractionState::Selected(id));

    let after = editor.document().get(id).map(|o| o.object.position()).unwrap();
    assert_eq!(after, Point::new(before.x + 5.0, before.y - 3.0));
}

#[test]
fn test_right_click_opens_menu_without_selecting() {
    let mut editor = editor_with_template();
    let seen = record(&editor, EventCategory::ContextMenu);
    let (id, at) = first_text(&editor);

    editor.handle(EditorCommand::right_click(at.x, at.y)).unwrap();
    assert_eq!(editor.context_menu().and_then(|m| m.target), Some(id));
    assert_eq!(editor.active_id(), None);

    let seen = seen.lock().unwrap();
    assert!(matches!(
        seen.first(),
        Some(EditorEvent::ContextMenu(ContextMenuEvent::Opened {
            target: Some(t),
            suppress_native: true,
            ..
        })) if *t == id
    ));
}

#[test]
fn test_duplicate_from_menu() {
    let mut editor = editor_with_template();
    let (id, at) = first_text(&editor);
    let count = editor.document().len();

    editor.handle(EditorCommand::right_click(at.x, at.y)).unwrap();
    editor
        .handle(EditorCommand::ContextAction(ContextAction::Duplicate))
        .unwrap();

    assert_eq!(editor.document().len(), count + 1);
    assert!(editor.context_menu().is_none());
    let copy = editor.active_id().unwrap();
    assert_ne!(copy, id);

    let original = editor.document().get(id).unwrap();
    let duplicate = editor.document().get(copy).unwrap();
    assert_eq!(duplicate.name, format!("{} copy", original.name));
    let (p, q) = (original.object.position(), duplicate.object.position());
    assert_eq!((q.x - p.x, q.y - p.y), (10.0, 10.0));
}

#[test]
fn test_delete_from_menu_clears_selection() {
    let mut editor = editor_with_template();
    let (id, at) = first_text(&editor);

    editor.handle(EditorCommand::click(at.x, at.y)).unwrap();
    editor.handle(EditorCommand::right_click(at.x, at.y)).unwrap();
    editor
        .handle(EditorCommand::ContextAction(ContextAction::Delete))
        .unwrap();

    assert!(!editor.document().contains(id));
    assert_eq!(editor.interaction_state(), InteractionState::Idle);
    assert_eq!(
        editor.set_text(id, "gone"),
        Err(DocumentError::ObjectNotFound { id })
    );
}

#[test]
fn test_menu_over_empty_canvas_does_nothing() {
    let mut editor = editor_with_template();
    let count = editor.document().len();

    editor.handle(EditorCommand::right_click(3.0, 468.0)).unwrap();
    assert_eq!(editor.context_menu().map(|m| m.target), Some(None));
    editor
        .handle(EditorCommand::ContextAction(ContextAction::Delete))
        .unwrap();
    assert_eq!(editor.document().len(), count);
    assert!(editor.context_menu().is_none());
}

#[tokio::test]
async fn test_background_needs_alt_or_explicit_select() {
    let mut editor = editor_with_template();
    let background = editor
        .add_image("paper.png", ImageRole::Background)
        .await
        .unwrap();
    assert_eq!(editor.active_id(), None);

    editor.handle(EditorCommand::click(3.0, 468.0)).unwrap();
    assert_eq!(editor.active_id(), None);

    editor
        .handle(EditorCommand::PointerDown {
            point: Point::new(3.0, 468.0),
            button: PointerButton::Primary,
            modifiers: Modifiers::alt(),
        })
        .unwrap();
    assert_eq!(editor.active_id(), Some(background));

    editor.clear_selection();
    assert_eq!(editor.select_background(), Some(background));
}

#[tokio::test]
async fn test_editable_image_becomes_active() {
    let mut editor = editor_with_template();
    let id = editor.add_image("logo.png", ImageRole::Editable).await.unwrap();
    assert_eq!(editor.active_id(), Some(id));
    assert_eq!(editor.interaction_state(), InteractionState::Selected(id));
}
