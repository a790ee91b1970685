use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use namecard_core::error::TemplateError;
use namecard_core::event_bus::{EditorEvent, EventCategory, EventFilter, TemplateEvent};
use namecard_designer::assets::load_assets;
use namecard_designer::{DecodedImage, ImageDecoder, NamecardEditor, PendingAsset, SceneObject};
use namecard_settings::Config;
use serde_json::json;

/// Decoder backed by a fixed table; unknown references fail.
struct TableDecoder {
    sizes: HashMap<String, (u32, u32)>,
    delay: Duration,
}

impl TableDecoder {
    fn new(entries: &[(&str, u32, u32)]) -> Self {
        Self {
            sizes: entries
                .iter()
                .map(|(name, w, h)| (name.to_string(), (*w, *h)))
                .collect(),
            delay: Duration::ZERO,
        }
    }

    fn slow(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl ImageDecoder for TableDecoder {
    async fn decode(&self, source_ref: &str) -> anyhow::Result<DecodedImage> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match self.sizes.get(source_ref) {
            Some((width, height)) => Ok(DecodedImage {
                width: *width,
                height: *height,
            }),
            None => anyhow::bail!("no such image: {}", source_ref),
        }
    }
}

fn editor(decoder: TableDecoder) -> NamecardEditor {
    NamecardEditor::new(Config::default(), Arc::new(decoder))
}

fn template_with_images(refs: &[&str]) -> String {
    let mut objects = vec![json!({"kind": "text", "text": "Acme", "left": 20, "top": 80})];
    for (i, source_ref) in refs.iter().enumerate() {
        objects.push(json!({
            "kind": "image",
            "sourceRef": source_ref,
            "left": 10 * i,
            "top": 300,
            "scaleX": 0.5,
            "scaleY": 0.5
        }));
    }
    json!({
        "formatVersion": "1.0",
        "canvas": {"width": 340, "height": 472},
        "objects": objects
    })
    .to_string()
}

#[tokio::test]
async fn test_load_fills_in_image_sizes() {
    let mut editor = editor(TableDecoder::new(&[("a.png", 100, 50), ("b.png", 30, 30)]));
    let report = editor
        .load_template(&template_with_images(&["a.png", "b.png"]))
        .await
        .unwrap();

    assert_eq!(report.object_count, 3);
    assert!(report.warnings.is_empty());
    let sizes: Vec<(f64, f64)> = editor
        .document()
        .objects()
        .iter()
        .filter_map(|o| o.object.as_image())
        .map(|img| (img.natural_width, img.natural_height))
        .collect();
    assert_eq!(sizes, vec![(100.0, 50.0), (30.0, 30.0)]);
    assert_eq!(editor.document().guide_count(), 4);
}

#[tokio::test]
async fn test_failed_asset_leaves_document_intact() {
    let mut editor = editor(TableDecoder::new(&[("a.png", 100, 50)]));
    editor.load_default_template();
    let before = editor.document().snapshot();

    let failures = Arc::new(Mutex::new(Vec::new()));
    let sink = failures.clone();
    editor.events().subscribe(
        EventFilter::Categories(vec![EventCategory::Template]),
        move |event| sink.lock().unwrap().push(event),
    );

    let err = editor
        .load_template(&template_with_images(&["a.png", "missing.png"]))
        .await
        .unwrap_err();
    assert!(matches!(
        &err,
        TemplateError::AssetLoadFailed { source_ref, .. } if source_ref == "missing.png"
    ));
    assert_eq!(editor.document().snapshot(), before);

    let failures = failures.lock().unwrap();
    assert!(failures
        .iter()
        .any(|e| matches!(e, EditorEvent::Template(TemplateEvent::ImportFailed { .. }))));
}

#[tokio::test]
async fn test_load_assets_fails_fast() {
    let decoder: Arc<dyn ImageDecoder> = Arc::new(
        TableDecoder::new(&[("slow.png", 10, 10)]).slow(Duration::from_millis(20)),
    );
    let assets = vec![
        PendingAsset {
            id: 1,
            source_ref: "slow.png".to_string(),
        },
        PendingAsset {
            id: 2,
            source_ref: "broken.png".to_string(),
        },
    ];

    let err = load_assets(decoder, &assets).await.unwrap_err();
    assert!(matches!(
        err,
        TemplateError::AssetLoadFailed { ref source_ref, .. } if source_ref == "broken.png"
    ));
}

#[tokio::test]
async fn test_older_load_is_superseded() {
    let mut editor = editor(TableDecoder::new(&[("a.png", 10, 10), ("b.png", 20, 20)]));

    let first = editor.prepare_import(&template_with_images(&["a.png"])).unwrap();
    let second = editor
        .prepare_import(&template_with_images(&["b.png", "b.png"]))
        .unwrap();
    assert!(second.generation() > first.generation());

    let stale = first.resolve().await.unwrap();
    assert_eq!(
        editor.commit_import(stale).unwrap_err(),
        TemplateError::Superseded { generation: 1 }
    );
    assert!(editor.document().is_empty());

    let fresh = second.resolve().await.unwrap();
    let report = editor.commit_import(fresh).unwrap();
    assert_eq!(report.object_count, 3);
}

#[tokio::test]
async fn test_clear_abandons_in_flight_load() {
    let mut editor = editor(TableDecoder::new(&[("a.png", 10, 10)]));
    let pending = editor.prepare_import(&template_with_images(&["a.png"])).unwrap();

    editor.clear();
    let resolved = pending.resolve().await.unwrap();
    assert!(matches!(
        editor.commit_import(resolved),
        Err(TemplateError::Superseded { .. })
    ));
    assert!(editor
        .document()
        .objects()
        .iter()
        .all(|o| matches!(o.object, SceneObject::Guide(_))));
}

#[tokio::test]
async fn test_skipped_objects_are_published() {
    let mut editor = editor(TableDecoder::new(&[]));
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    editor.events().subscribe(
        EventFilter::Categories(vec![EventCategory::Template]),
        move |event| sink.lock().unwrap().push(event),
    );

    let payload = json!({
        "formatVersion": "1.0",
        "canvas": {"width": 340, "height": 472},
        "objects": [
            {"kind": "text", "text": "Acme"},
            {"kind": "hologram"}
        ]
    });
    let report = editor.load_template(&payload.to_string()).await.unwrap();
    assert_eq!(report.warnings.len(), 1);

    let seen = seen.lock().unwrap();
    assert!(seen.contains(&EditorEvent::Template(TemplateEvent::ObjectSkipped {
        index: 1,
        reason: "Unsupported object kind 'hologram' at index 1".to_string(),
    })));
    assert!(seen.contains(&EditorEvent::Template(TemplateEvent::ImportFinished {
        generation: report.generation,
        warnings: 1,
    })));
}
