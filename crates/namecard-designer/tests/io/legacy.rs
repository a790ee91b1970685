use namecard_core::error::{ObjectError, TemplateError};
use namecard_designer::{
    parse_template, ImageRole, ImportOptions, PayloadFormat, SceneObject, ShapeGeometry,
};
use serde_json::json;

fn texts(staged: &namecard_designer::StagedTemplate) -> Vec<String> {
    staged
        .document
        .text_fields()
        .map(|(_, t)| t.text.clone())
        .collect()
}

#[test]
fn test_unknown_kind_is_skipped() {
    let payload = json!({
        "formatVersion": "1.0",
        "canvas": {"width": 340, "height": 472},
        "objects": [
            {"kind": "text", "text": "Acme", "left": 20, "top": 80},
            {"kind": "sparkle-unsupported", "left": 5},
            {"kind": "text", "text": "Jane Doe", "left": 20, "top": 200}
        ]
    });

    let staged = parse_template(&payload.to_string(), &ImportOptions::default()).unwrap();
    assert_eq!(staged.document.len(), 2);
    assert_eq!(
        staged.warnings,
        vec![ObjectError::UnsupportedObjectKind {
            index: 1,
            kind: "sparkle-unsupported".to_string(),
        }]
    );
}

#[test]
fn test_malformed_object_is_reported() {
    let payload = json!({
        "formatVersion": "1.0",
        "canvas": {"width": 340, "height": 472},
        "objects": [
            {"kind": "circle", "left": 5},
            {"left": 5},
            {"kind": "text", "text": "ok"}
        ]
    });

    let staged = parse_template(&payload.to_string(), &ImportOptions::default()).unwrap();
    assert_eq!(staged.document.len(), 1);
    assert_eq!(staged.warnings.len(), 2);
    assert!(staged
        .warnings
        .iter()
        .all(|w| matches!(w, ObjectError::MalformedObject { .. })));
    assert_eq!(staged.warnings[1].index(), 1);
}

#[test]
fn test_bare_array_uses_fallback_paper() {
    let payload = json!([
        {"type": "i-text", "text": "회사명", "left": 170, "top": 118, "fontWeight": 700},
        {"type": "image", "src": "logo.png", "left": 10, "top": 10, "width": 64, "height": 64}
    ]);

    let staged = parse_template(&payload.to_string(), &ImportOptions::default()).unwrap();
    assert_eq!(staged.format, PayloadFormat::LegacyArray);
    assert_eq!(staged.document.width_px(), 340.0);
    assert_eq!(staged.document.height_px(), 472.0);
    assert_eq!(staged.pending_assets.len(), 1);
    assert_eq!(staged.pending_assets[0].source_ref, "logo.png");

    let weight = staged
        .document
        .text_fields()
        .map(|(_, t)| t.font_weight.clone())
        .next();
    assert_eq!(weight.as_deref(), Some("700"));
}

#[test]
fn test_canvas_library_payload() {
    let payload = json!({
        "version": "5.3.0",
        "background": "#eeeeee",
        "backgroundImage": {"type": "image", "src": "paper.png", "width": 680, "height": 944},
        "objects": [
            {"type": "image", "src": "paper.png", "isBackground": true, "width": 680, "height": 944},
            {"type": "border", "left": 19, "top": 19, "width": 302, "height": 434, "fill": "red", "stroke": "#999999"},
            {"type": "textbox", "text": "Jane Doe", "left": 170, "top": 212, "fontSize": 36, "shadow": null}
        ]
    });

    let staged = parse_template(&payload.to_string(), &ImportOptions::default()).unwrap();
    assert_eq!(staged.format, PayloadFormat::LegacyCanvas);
    assert_eq!(staged.document.background_color(), "#eeeeee");
    assert!(staged.warnings.is_empty());

    let backgrounds = staged
        .document
        .objects()
        .iter()
        .filter(|o| o.object.as_image().is_some_and(|i| i.role == ImageRole::Background))
        .count();
    assert_eq!(backgrounds, 1);
    assert_eq!(staged.pending_assets.len(), 1);

    let border = staged.document.objects().iter().find_map(|o| match &o.object {
        SceneObject::Shape(s) => Some(s.clone()),
        _ => None,
    });
    let border = border.unwrap();
    assert_eq!(
        border.geometry,
        ShapeGeometry::Rect {
            width: 302.0,
            height: 434.0
        }
    );
    assert_eq!(border.fill, None);
    assert_eq!(border.stroke_dash, Some(vec![5.0, 5.0]));
    assert_eq!(texts(&staged), vec!["Jane Doe"]);
}

#[test]
fn test_canvas_json_row_wrapper() {
    let inner = json!({
        "objects": [{"type": "text", "text": "Acme", "left": 10, "top": 10}]
    });
    let payload = json!({
        "id": 42,
        "width": 340,
        "height": 189,
        "canvas_json": inner.to_string()
    });

    let staged = parse_template(&payload.to_string(), &ImportOptions::default()).unwrap();
    assert_eq!(staged.format, PayloadFormat::LegacyCanvas);
    assert_eq!(staged.document.height_px(), 189.0);
    assert_eq!(texts(&staged), vec!["Acme"]);
}

#[test]
fn test_rejected_payloads() {
    let options = ImportOptions::default();

    assert!(matches!(
        parse_template("{not json", &options),
        Err(TemplateError::InvalidPayload { .. })
    ));
    assert!(matches!(
        parse_template(r#"{"hello": "world"}"#, &options),
        Err(TemplateError::InvalidPayload { .. })
    ));
    assert!(matches!(
        parse_template(r#"{"formatVersion": "1.0", "objects": []}"#, &options),
        Err(TemplateError::InvalidPayload { .. })
    ));
    assert!(matches!(
        parse_template(
            r#"{"formatVersion": "1.0", "canvas": {"width": 0, "height": 472}}"#,
            &options
        ),
        Err(TemplateError::InvalidPayload { .. })
    ));
    assert_eq!(
        parse_template(
            r#"{"formatVersion": "2.0", "canvas": {"width": 340, "height": 472}}"#,
            &options
        )
        .unwrap_err(),
        TemplateError::UnsupportedFormatVersion {
            version: "2.0".to_string()
        }
    );
}

#[test]
fn test_unversioned_export_keeps_nested_canvas() {
    let payload = json!({
        "canvas": {
            "width": 340,
            "height": 189,
            "backgroundColor": "#eeeeee",
            "backgroundImage": {"sourceRef": "card-bg.png", "width": 340, "height": 189}
        },
        "objects": [
            {"kind": "text", "text": "Acme", "left": 20, "top": 40}
        ]
    });

    let staged = parse_template(&payload.to_string(), &ImportOptions::default()).unwrap();
    assert_eq!(staged.format, PayloadFormat::LegacyCanvas);
    assert_eq!(staged.document.width_px(), 340.0);
    assert_eq!(staged.document.height_px(), 189.0);
    assert_eq!(staged.document.background_color(), "#eeeeee");
    assert_eq!(staged.document.paper().label(), "9cm × 5cm");
    assert_eq!(texts(&staged), vec!["Acme".to_string()]);
    assert_eq!(staged.pending_assets.len(), 1);
    assert_eq!(staged.pending_assets[0].source_ref, "card-bg.png");
}
