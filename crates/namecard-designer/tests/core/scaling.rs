use std::sync::Arc;

use namecard_designer::{
    settle, settle_text, EditorCommand, FileImageDecoder, ImageAsset, ImageRole,
    NamecardEditor, SceneElement, SceneObject, SettleMode, ShapeGeometry, ShapeObject, TextField,
    MAX_FONT_SIZE, MIN_FONT_SIZE,
};
use namecard_settings::Config;
use proptest::prelude::*;

#[test]
fn test_scale_converts_to_font_size() {
    let mut text = TextField::new("Jane Doe", 10.0, 10.0, 20.0);
    text.scale_x = 1.23;
    text.scale_y = 1.23;

    assert!(settle_text(&mut text, SettleMode::Commit));
    assert_eq!(text.font_size, 22.0);
    assert_eq!((text.scale_x, text.scale_y), (1.0, 1.0));
}

#[test]
fn test_ceiling_only_on_commit() {
    let mut live = TextField::new("Jane Doe", 10.0, 10.0, 199.0);
    live.scale_x = 2.0;
    live.scale_y = 2.0;
    let mut committed = live.clone();

    settle_text(&mut live, SettleMode::Interactive);
    settle_text(&mut committed, SettleMode::Commit);
    assert_eq!(live.font_size, 209.0);
    assert_eq!(committed.font_size, MAX_FONT_SIZE);
}

#[test]
fn test_jitter_resets_scale_only() {
    let mut text = TextField::new("Jane Doe", 10.0, 10.0, 20.0);
    text.scale_x = 1.04;
    assert!(settle_text(&mut text, SettleMode::Interactive));
    assert_eq!(text.font_size, 20.0);
    assert!(text.is_unit_scale());
}

#[test]
fn test_images_keep_scale() {
    let mut image = SceneObject::Image(ImageAsset::new("logo.png", ImageRole::Editable));
    image.set_scale(1.5, 1.5);
    assert!(!settle(&mut image, SettleMode::Commit));
    assert_eq!(image.scale(), (1.5, 1.5));
}

#[test]
fn test_shape_scale_folds_into_size_on_commit() {
    let mut rect = SceneObject::Shape(ShapeObject::rect(0.0, 0.0, 40.0, 20.0));
    rect.set_scale(2.0, 1.5);
    assert!(!settle(&mut rect, SettleMode::Interactive));
    assert!(settle(&mut rect, SettleMode::Commit));

    let SceneObject::Shape(shape) = &rect else {
        panic!("expected a shape");
    };
    assert_eq!(
        shape.geometry,
        ShapeGeometry::Rect {
            width: 80.0,
            height: 30.0
        }
    );
    assert_eq!((shape.scale_x, shape.scale_y), (1.0, 1.0));
}

#[test]
fn test_scale_gesture_through_editor() {
    let mut editor = NamecardEditor::new(Config::default(), Arc::new(FileImageDecoder::new()));
    editor.load_default_template();

    let (id, center) = {
        let (id, text) = editor
            .document()
            .text_fields()
            .min_by(|a, b| a.1.top.total_cmp(&b.1.top))
            .unwrap();
        assert_eq!(text.font_size, 24.0);
        let (x1, y1, x2, y2) = text.bounds();
        (id, ((x1 + x2) / 2.0, (y1 + y2) / 2.0))
    };

    editor.handle(EditorCommand::click(center.0, center.1)).unwrap();
    assert_eq!(editor.active_id(), Some(id));
    editor
        .handle(EditorCommand::Scale {
            scale_x: 1.5,
            scale_y: 1.5,
        })
        .unwrap();
    editor.handle(EditorCommand::Commit).unwrap();

    let text = editor
        .document()
        .get(id)
        .and_then(|o| o.object.as_text())
        .cloned()
        .unwrap();
    assert_eq!(text.font_size, 29.0);
    assert!(text.is_unit_scale());
}

#[test]
fn test_commit_caps_font_grown_during_gesture() {
    let mut editor = NamecardEditor::new(Config::default(), Arc::new(FileImageDecoder::new()));
    editor.load_default_template();
    let id = editor.document().text_fields().map(|(id, _)| id).next().unwrap();
    assert!(editor.set_font_size(id, 195.0).unwrap());

    editor.select(id).unwrap();

    editor
        .handle(EditorCommand::Scale {
            scale_x: 2.0,
            scale_y: 2.0,
        })
        .unwrap();
    let live = editor.document().get(id).and_then(|o| o.object.as_text()).unwrap();
    assert_eq!(live.font_size, 205.0);

    editor.handle(EditorCommand::Commit).unwrap();
    let text = editor.document().get(id).and_then(|o| o.object.as_text()).unwrap();
    assert_eq!(text.font_size, MAX_FONT_SIZE);
    assert!(text.is_unit_scale());
}

proptest! {
    #[test]
    fn prop_committed_text_is_unit_scale_and_bounded(
        size in 8.0f64..=200.0,
        scale in 0.05f64..6.0,
        gestures in 1usize..5,
    ) {
        let mut text = TextField::new("Acme", 0.0, 0.0, size.round());
        for _ in 0..gestures {
            text.scale_x = scale;
            text.scale_y = scale;
            settle_text(&mut text, SettleMode::Interactive);
            prop_assert!(text.is_unit_scale());
            prop_assert!(text.font_size >= MIN_FONT_SIZE);
        }
        text.scale_x = scale;
        text.scale_y = scale;
        settle_text(&mut text, SettleMode::Commit);

        prop_assert!(text.is_unit_scale());
        prop_assert!(text.font_size >= MIN_FONT_SIZE && text.font_size <= MAX_FONT_SIZE);
        prop_assert_eq!(text.font_size.fract(), 0.0);
    }

    #[test]
    fn prop_commit_after_live_ticks_is_bounded(
        size in 8.0f64..=200.0,
        scale in 0.05f64..6.0,
        gestures in 1usize..5,
    ) {
        let mut text = TextField::new("Acme", 0.0, 0.0, size.round());
        for _ in 0..gestures {
            text.scale_x = scale;
            text.scale_y = scale;
            settle_text(&mut text, SettleMode::Interactive);
        }
        settle_text(&mut text, SettleMode::Commit);

        prop_assert!(text.is_unit_scale());
        prop_assert!(text.font_size >= MIN_FONT_SIZE && text.font_size <= MAX_FONT_SIZE);
    }
}
