use namecard_designer::{
    regenerate_guides, ContextAction, Document, GuideOptions, ImageAsset, ImageRole, SceneObject,
    ShapeObject, TextField, ZBand,
};
use proptest::prelude::*;

fn object_for(kind: u8) -> SceneObject {
    match kind % 4 {
        0 => SceneObject::Text(TextField::new("label", 20.0, 20.0, 20.0)),
        1 => SceneObject::Image(ImageAsset::new("logo.png", ImageRole::Editable).with_size(40.0, 40.0)),
        2 => SceneObject::Image(ImageAsset::new("bg.png", ImageRole::Background).with_size(340.0, 472.0)),
        _ => SceneObject::Shape(ShapeObject::rect(10.0, 10.0, 30.0, 30.0)),
    }
}

fn bands(doc: &Document) -> Vec<ZBand> {
    doc.objects().iter().map(|o| o.band()).collect()
}

fn is_banded(doc: &Document) -> bool {
    bands(doc).windows(2).all(|w| w[0] <= w[1])
}

#[test]
fn test_text_stays_above_late_background() {
    let mut doc = Document::default();
    let text = doc.add_object(object_for(0));
    let logo = doc.add_object(object_for(1));
    let background = doc.add_object(object_for(2));
    regenerate_guides(&mut doc, &GuideOptions::default());

    let order: Vec<u64> = doc.objects().iter().map(|o| o.id).collect();
    assert_eq!(&order[order.len() - 3..], &[background, logo, text]);
    assert!(doc.objects()[..4].iter().all(|o| o.object.is_guide()));
}

#[test]
fn test_reorder_is_confined_to_band() {
    let mut doc = Document::default();
    let text = doc.add_object(object_for(0));
    let rect = doc.add_object(object_for(3));
    let logo = doc.add_object(object_for(1));

    assert!(ContextAction::BringToFront.apply(&mut doc, rect).is_ok());
    assert_eq!(doc.stacking_index(rect), Some(1));
    assert_eq!(doc.stacking_index(text), Some(2));

    assert!(ContextAction::SendToBack.apply(&mut doc, rect).is_ok());
    assert_eq!(doc.stacking_index(rect), Some(0));
    assert_eq!(doc.stacking_index(logo), Some(1));
    assert!(is_banded(&doc));
}

proptest! {
    #[test]
    fn prop_insertions_keep_bands_sorted(kinds in prop::collection::vec(0u8..4, 1..40)) {
        let mut doc = Document::default();
        for kind in &kinds {
            doc.add_object(object_for(*kind));
        }
        regenerate_guides(&mut doc, &GuideOptions::default());
        prop_assert!(is_banded(&doc));
        prop_assert_eq!(doc.len(), kinds.len() + 4);
    }

    #[test]
    fn prop_actions_keep_bands_sorted(
        kinds in prop::collection::vec(0u8..4, 1..20),
        actions in prop::collection::vec((0usize..6, 0usize..20), 0..30),
    ) {
        let mut doc = Document::default();
        let mut ids: Vec<u64> = kinds.iter().map(|k| doc.add_object(object_for(*k))).collect();

        for (action, pick) in actions {
            if ids.is_empty() {
                break;
            }
            let target = ids[pick % ids.len()];
            let action = ContextAction::ALL[action];
            let outcome = action.apply(&mut doc, target);
            prop_assert!(outcome.is_ok());
            match action {
                ContextAction::Delete => ids.retain(|id| *id != target),
                ContextAction::Duplicate => ids = doc.objects().iter().map(|o| o.id).collect(),
                _ => {}
            }
            prop_assert!(is_banded(&doc));
        }
    }
}
