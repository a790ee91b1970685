//! Template serialization.
//!
//! Exports write the versioned `"1.0"` shape. Imports accept that shape
//! plus three older ones (bare object array, canvas-library JSON and the
//! `canvas_json` row wrapper), normalize them into the versioned shape,
//! and then run a single loader.
//!
//! A structurally broken payload fails the whole import. Once the canvas
//! is valid, each object is rebuilt on its own: unknown kinds and bad
//! attributes are skipped and reported as warnings.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use namecard_core::error::{ObjectError, TemplateError};
use namecard_core::units::PaperSize;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::document::Document;
use crate::model::{
    ImageAsset, ImageRole, ObjectKind, OriginX, OriginY, SceneObject, ShapeGeometry, ShapeKind,
    ShapeObject, TextAlign, TextField,
};

/// Template format version written by this build.
pub const FORMAT_VERSION: &str = "1.0";

const DEFAULT_BACKGROUND: &str = "#ffffff";

/// Complete template file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateFile {
    pub format_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TemplateMetadata>,
    pub canvas: CanvasData,
    #[serde(default)]
    pub objects: Vec<ObjectData>,
}

impl TemplateFile {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Template metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl TemplateMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            created: now,
            modified: now,
        }
    }

    /// Same template saved again: keep `created`, bump `modified`.
    pub fn touched(&self) -> Self {
        Self {
            modified: Utc::now(),
            ..self.clone()
        }
    }
}

/// Canvas frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasData {
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_background")]
    pub background_color: String,
    /// Canvas-level background slot used by older saves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<ImageData>,
}

fn default_background() -> String {
    DEFAULT_BACKGROUND.to_string()
}

fn one() -> f64 {
    1.0
}

fn default_font_size() -> f64 {
    20.0
}

fn default_font_family() -> String {
    "Noto Sans KR".to_string()
}

fn normal() -> String {
    "normal".to_string()
}

fn black() -> String {
    "#000000".to_string()
}

/// Serialized text field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextData {
    pub text: String,
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "normal")]
    pub font_weight: String,
    #[serde(default = "normal")]
    pub font_style: String,
    #[serde(default = "black")]
    pub fill: String,
    #[serde(default)]
    pub text_align: TextAlign,
    #[serde(default)]
    pub angle: f64,
    #[serde(default = "one")]
    pub scale_x: f64,
    #[serde(default = "one")]
    pub scale_y: f64,
    #[serde(default)]
    pub origin_x: OriginX,
    #[serde(default)]
    pub origin_y: OriginY,
}

/// Serialized image (editable or background)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageData {
    pub source_ref: String,
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default = "one")]
    pub scale_x: f64,
    #[serde(default = "one")]
    pub scale_y: f64,
    #[serde(default)]
    pub angle: f64,
    #[serde(default = "one")]
    pub opacity: f64,
}

/// Serialized shape. Which dimensions are required depends on the kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeData {
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub top: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rx: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ry: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y2: Option<f64>,
    #[serde(default)]
    pub fill: Option<String>,
    #[serde(default)]
    pub stroke: Option<String>,
    #[serde(default = "one")]
    pub stroke_width: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_dash_array: Option<Vec<f64>>,
    #[serde(default)]
    pub angle: f64,
    #[serde(default = "one")]
    pub scale_x: f64,
    #[serde(default = "one")]
    pub scale_y: f64,
}

/// One serialized object, discriminated by its `kind` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ObjectData {
    Text(TextData),
    Image(ImageData),
    Background(ImageData),
    Rect(ShapeData),
    Circle(ShapeData),
    Ellipse(ShapeData),
    Line(ShapeData),
}

impl ObjectData {
    /// Serializable form of a scene object. Guides are never saved.
    pub fn from_scene(object: &SceneObject) -> Option<Self> {
        match object {
            SceneObject::Text(t) => Some(ObjectData::Text(TextData {
                text: t.text.clone(),
                left: t.left,
                top: t.top,
                width: t.width,
                height: t.height,
                font_size: t.font_size,
                font_family: t.font_family.clone(),
                font_weight: t.font_weight.clone(),
                font_style: t.font_style.clone(),
                fill: t.fill.clone(),
                text_align: t.text_align,
                angle: t.angle,
                scale_x: t.scale_x,
                scale_y: t.scale_y,
                origin_x: t.origin_x,
                origin_y: t.origin_y,
            })),
            SceneObject::Image(img) => {
                let data = ImageData {
                    source_ref: img.source_ref.clone(),
                    left: img.left,
                    top: img.top,
                    width: img.natural_width,
                    height: img.natural_height,
                    scale_x: img.scale_x,
                    scale_y: img.scale_y,
                    angle: img.angle,
                    opacity: img.opacity,
                };
                Some(match img.role {
                    ImageRole::Editable => ObjectData::Image(data),
                    ImageRole::Background => ObjectData::Background(data),
                })
            }
            SceneObject::Shape(shape) => {
                let mut data = ShapeData {
                    left: shape.left,
                    top: shape.top,
                    fill: shape.fill.clone(),
                    stroke: shape.stroke.clone(),
                    stroke_width: shape.stroke_width,
                    stroke_dash_array: shape.stroke_dash.clone(),
                    angle: shape.angle,
                    scale_x: shape.scale_x,
                    scale_y: shape.scale_y,
                    ..Default::default()
                };
                match shape.geometry {
                    ShapeGeometry::Rect { width, height } => {
                        data.width = Some(width);
                        data.height = Some(height);
                    }
                    ShapeGeometry::Circle { radius } => data.radius = Some(radius),
                    ShapeGeometry::Ellipse { rx, ry } => {
                        data.rx = Some(rx);
                        data.ry = Some(ry);
                    }
                    ShapeGeometry::Line { x1, y1, x2, y2 } => {
                        data.x1 = Some(x1);
                        data.y1 = Some(y1);
                        data.x2 = Some(x2);
                        data.y2 = Some(y2);
                    }
                }
                Some(match shape.kind() {
                    ShapeKind::Rect => ObjectData::Rect(data),
                    ShapeKind::Circle => ObjectData::Circle(data),
                    ShapeKind::Ellipse => ObjectData::Ellipse(data),
                    ShapeKind::Line => ObjectData::Line(data),
                })
            }
            SceneObject::Guide(_) => None,
        }
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            ObjectData::Text(_) => ObjectKind::Text,
            ObjectData::Image(_) => ObjectKind::Image,
            ObjectData::Background(_) => ObjectKind::Background,
            ObjectData::Rect(_) => ObjectKind::Rect,
            ObjectData::Circle(_) => ObjectKind::Circle,
            ObjectData::Ellipse(_) => ObjectKind::Ellipse,
            ObjectData::Line(_) => ObjectKind::Line,
        }
    }

    /// Rebuilds the scene object. `index` is only used for error reports.
    pub fn into_scene(self, index: usize) -> Result<SceneObject, ObjectError> {
        let kind = self.kind();
        match self {
            ObjectData::Text(d) => {
                let mut text = TextField::new(d.text, d.left, d.top, d.font_size);
                text.font_family = d.font_family;
                text.font_weight = d.font_weight;
                text.font_style = d.font_style;
                text.fill = d.fill;
                text.text_align = d.text_align;
                text.angle = d.angle;
                text.scale_x = d.scale_x;
                text.scale_y = d.scale_y;
                text.origin_x = d.origin_x;
                text.origin_y = d.origin_y;
                Ok(SceneObject::Text(text))
            }
            ObjectData::Image(d) => Ok(SceneObject::Image(image_from(d, ImageRole::Editable))),
            ObjectData::Background(d) => {
                Ok(SceneObject::Image(image_from(d, ImageRole::Background)))
            }
            ObjectData::Rect(d) => {
                let width = require(d.width, "width", index, kind)?;
                let height = require(d.height, "height", index, kind)?;
                shape_from(ShapeObject::rect(d.left, d.top, width, height), d)
            }
            ObjectData::Circle(d) => {
                let radius = require(d.radius, "radius", index, kind)?;
                shape_from(ShapeObject::circle(d.left, d.top, radius), d)
            }
            ObjectData::Ellipse(d) => {
                let rx = require(d.rx, "rx", index, kind)?;
                let ry = require(d.ry, "ry", index, kind)?;
                shape_from(ShapeObject::ellipse(d.left, d.top, rx, ry), d)
            }
            ObjectData::Line(d) => {
                let x1 = require(d.x1, "x1", index, kind)?;
                let y1 = require(d.y1, "y1", index, kind)?;
                let x2 = require(d.x2, "x2", index, kind)?;
                let y2 = require(d.y2, "y2", index, kind)?;
                let mut line = ShapeObject::line(0.0, 0.0, 0.0, 0.0);
                line.geometry = ShapeGeometry::Line { x1, y1, x2, y2 };
                line.left = d.left;
                line.top = d.top;
                shape_from(line, d)
            }
        }
    }
}

fn require(value: Option<f64>, field: &str, index: usize, kind: ObjectKind) -> Result<f64, ObjectError> {
    match value {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(ObjectError::MalformedObject {
            index,
            kind: kind.tag().to_string(),
            reason: format!("missing or invalid '{}'", field),
        }),
    }
}

fn image_from(d: ImageData, role: ImageRole) -> ImageAsset {
    let mut img = ImageAsset::new(d.source_ref, role).with_size(d.width, d.height);
    img.left = d.left;
    img.top = d.top;
    img.scale_x = d.scale_x;
    img.scale_y = d.scale_y;
    img.angle = d.angle;
    img.opacity = d.opacity;
    img
}

fn shape_from(mut shape: ShapeObject, d: ShapeData) -> Result<SceneObject, ObjectError> {
    shape.left = d.left;
    shape.top = d.top;
    shape.fill = d.fill;
    shape.stroke = d.stroke;
    shape.stroke_width = d.stroke_width;
    shape.stroke_dash = d.stroke_dash_array;
    shape.angle = d.angle;
    shape.scale_x = d.scale_x;
    shape.scale_y = d.scale_y;
    Ok(SceneObject::Shape(shape))
}

/// Builds the versioned template for a document. Guides are left out.
pub fn export_template(doc: &Document, metadata: Option<TemplateMetadata>) -> TemplateFile {
    let objects: Vec<ObjectData> = doc
        .objects()
        .iter()
        .filter_map(|o| ObjectData::from_scene(&o.object))
        .collect();

    tracing::debug!(objects = objects.len(), "Exporting template");

    TemplateFile {
        format_version: FORMAT_VERSION.to_string(),
        metadata,
        canvas: CanvasData {
            width: doc.width_px(),
            height: doc.height_px(),
            background_color: doc.background_color().to_string(),
            background_image: None,
        },
        objects,
    }
}

/// Payload shape an import was recognized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFormat {
    /// `{formatVersion: "1.0", canvas, objects}`
    Versioned,
    /// A bare array of objects.
    LegacyArray,
    /// Canvas-library JSON with `type`-tagged objects.
    LegacyCanvas,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportOptions {
    /// Paper used when the payload carries no canvas size.
    pub fallback_paper: PaperSize,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            fallback_paper: PaperSize::BADGE,
        }
    }
}

/// An image the staged document still needs decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingAsset {
    pub id: u64,
    pub source_ref: String,
}

/// A fully reconstructed document that has not replaced the live one yet.
#[derive(Debug, Clone)]
pub struct StagedTemplate {
    pub document: Document,
    pub pending_assets: Vec<PendingAsset>,
    pub warnings: Vec<ObjectError>,
    pub format: PayloadFormat,
    pub metadata: Option<TemplateMetadata>,
}

/// Parses and stages a template from JSON text.
pub fn parse_template(json: &str, options: &ImportOptions) -> Result<StagedTemplate, TemplateError> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| TemplateError::invalid(format!("not valid JSON: {}", e)))?;
    stage_template(value, options)
}

/// Stages a template from an already parsed JSON value.
pub fn stage_template(value: Value, options: &ImportOptions) -> Result<StagedTemplate, TemplateError> {
    let (normalized, format) = normalize(value, options, None)?;
    load_normalized(normalized, format, options)
}

/// Canvas size carried by a `canvas_json` row wrapper.
type FrameHint = Option<(f64, f64)>;

fn normalize(
    value: Value,
    options: &ImportOptions,
    hint: FrameHint,
) -> Result<(Map<String, Value>, PayloadFormat), TemplateError> {
    match value {
        Value::Array(objects) => {
            let canvas = fallback_canvas(options, hint);
            let objects = objects.iter().map(legacy_object).collect();
            Ok((versioned(canvas, objects), PayloadFormat::LegacyArray))
        }
        Value::Object(mut map) => {
            if let Some(inner) = map.remove("canvas_json") {
                let hint = frame_of(&map).or(hint);
                let inner = match inner {
                    Value::String(text) => serde_json::from_str(&text).map_err(|e| {
                        TemplateError::invalid(format!("canvas_json is not valid JSON: {}", e))
                    })?,
                    Value::Null => return Err(TemplateError::invalid("canvas_json is empty")),
                    other => other,
                };
                return normalize(inner, options, hint);
            }

            if let Some(version) = map.get("formatVersion") {
                let version = version.as_str().unwrap_or_default();
                if version != FORMAT_VERSION {
                    return Err(TemplateError::UnsupportedFormatVersion {
                        version: version.to_string(),
                    });
                }
                return Ok((map, PayloadFormat::Versioned));
            }

            if let Some(Value::Array(objects)) = map.get("objects") {
                let objects: Vec<Value> = objects.iter().map(legacy_object).collect();
                // Older editor exports nest the frame under `canvas`.
                let nested = map.get("canvas").and_then(Value::as_object);
                let (w, h) = nested
                    .and_then(frame_of)
                    .or_else(|| frame_of(&map))
                    .or(hint)
                    .unwrap_or_else(|| options.fallback_paper.to_px());
                let mut canvas = Map::new();
                canvas.insert("width".into(), w.into());
                canvas.insert("height".into(), h.into());
                let color = nested
                    .and_then(|c| c.get("backgroundColor").or_else(|| c.get("background")))
                    .or_else(|| map.get("background"))
                    .and_then(Value::as_str);
                if let Some(color) = color {
                    canvas.insert("backgroundColor".into(), color.into());
                }
                let background = nested
                    .and_then(|c| c.get("backgroundImage"))
                    .or_else(|| map.get("backgroundImage"));
                if let Some(bg) = background.filter(|v| v.is_object()) {
                    let mut bg = legacy_object(bg);
                    if let Some(obj) = bg.as_object_mut() {
                        obj.remove("kind");
                    }
                    canvas.insert("backgroundImage".into(), bg);
                }
                return Ok((versioned(Value::Object(canvas), objects), PayloadFormat::LegacyCanvas));
            }

            Err(TemplateError::invalid(
                "expected formatVersion, objects or canvas_json",
            ))
        }
        Value::Null => Err(TemplateError::invalid("payload is empty")),
        _ => Err(TemplateError::invalid("payload must be an object or array")),
    }
}

fn frame_of(map: &Map<String, Value>) -> FrameHint {
    let w = map.get("width").and_then(Value::as_f64)?;
    let h = map.get("height").and_then(Value::as_f64)?;
    Some((w, h))
}

fn fallback_canvas(options: &ImportOptions, hint: FrameHint) -> Value {
    let (w, h) = hint.unwrap_or_else(|| options.fallback_paper.to_px());
    serde_json::json!({ "width": w, "height": h })
}

fn versioned(canvas: Value, objects: Vec<Value>) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("formatVersion".into(), FORMAT_VERSION.into());
    map.insert("canvas".into(), canvas);
    map.insert("objects".into(), Value::Array(objects));
    map
}

/// Rewrites one canvas-library object into the versioned object shape.
fn legacy_object(value: &Value) -> Value {
    let Some(source) = value.as_object() else {
        return value.clone();
    };
    // Nulls mean "unset" in the old exports.
    let mut obj: Map<String, Value> = source
        .iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    if let Some(src) = obj.remove("src") {
        obj.entry("sourceRef").or_insert(src);
    }
    if let Some(weight) = obj.get("fontWeight").and_then(Value::as_f64) {
        obj.insert("fontWeight".into(), Value::String(weight.to_string()));
    }

    let Some(tag) = obj.remove("type").and_then(|t| t.as_str().map(str::to_string)) else {
        return Value::Object(obj);
    };
    let kind = match tag.as_str() {
        "text" | "i-text" | "textbox" => "text".to_string(),
        "image" => {
            let is_background = obj.get("isBackground").and_then(Value::as_bool) == Some(true)
                || obj.get("role").and_then(Value::as_str) == Some("background");
            let kind = if is_background { "background" } else { "image" };
            kind.to_string()
        }
        "border" => {
            obj.entry("strokeDashArray")
                .or_insert_with(|| serde_json::json!([5.0, 5.0]));
            obj.remove("fill");
            "rect".to_string()
        }
        other => other.to_string(),
    };
    obj.insert("kind".into(), Value::String(kind));
    Value::Object(obj)
}

fn load_normalized(
    mut map: Map<String, Value>,
    format: PayloadFormat,
    options: &ImportOptions,
) -> Result<StagedTemplate, TemplateError> {
    let canvas: CanvasData = match map.remove("canvas") {
        Some(value @ Value::Object(_)) => serde_json::from_value(value)
            .map_err(|e| TemplateError::invalid(format!("malformed canvas: {}", e)))?,
        Some(_) => return Err(TemplateError::invalid("canvas must be an object")),
        None => return Err(TemplateError::invalid("missing canvas")),
    };
    if !(canvas.width.is_finite() && canvas.height.is_finite())
        || canvas.width <= 0.0
        || canvas.height <= 0.0
    {
        return Err(TemplateError::invalid(format!(
            "canvas size must be positive, got {}x{}",
            canvas.width, canvas.height
        )));
    }

    let objects = match map.remove("objects") {
        Some(Value::Array(objects)) => objects,
        None | Some(Value::Null) => Vec::new(),
        Some(_) => return Err(TemplateError::invalid("objects must be an array")),
    };

    let metadata = map
        .remove("metadata")
        .and_then(|m| serde_json::from_value::<TemplateMetadata>(m).ok());

    let paper = if options.fallback_paper.to_px() == (canvas.width, canvas.height) {
        options.fallback_paper
    } else {
        PaperSize::from_px(canvas.width, canvas.height)
    };
    let mut document = Document::with_frame(paper, canvas.width, canvas.height);
    document.set_background_color(canvas.background_color.clone());

    let mut pending_assets = Vec::new();
    let mut warnings = Vec::new();
    let mut backgrounds: HashSet<String> = HashSet::new();

    if let Some(bg) = canvas.background_image {
        let source_ref = bg.source_ref.clone();
        backgrounds.insert(source_ref.clone());
        let id = document.add_object(SceneObject::Image(image_from(bg, ImageRole::Background)));
        pending_assets.push(PendingAsset { id, source_ref });
    }

    for (index, value) in objects.into_iter().enumerate() {
        let object = match build_object(index, value) {
            Ok(object) => object,
            Err(err) => {
                tracing::warn!(index, error = %err, "Skipping template object");
                warnings.push(err);
                continue;
            }
        };

        if let SceneObject::Image(img) = &object {
            if img.role == ImageRole::Background && !backgrounds.insert(img.source_ref.clone()) {
                tracing::debug!(index, source_ref = %img.source_ref, "Background already loaded");
                continue;
            }
        }

        let source_ref = object.as_image().map(|img| img.source_ref.clone());
        let id = document.add_object(object);
        if let Some(source_ref) = source_ref {
            pending_assets.push(PendingAsset { id, source_ref });
        }
    }

    document.take_dirty();
    tracing::info!(
        format = ?format,
        objects = document.len(),
        warnings = warnings.len(),
        pending_assets = pending_assets.len(),
        "Template staged"
    );

    Ok(StagedTemplate {
        document,
        pending_assets,
        warnings,
        format,
        metadata,
    })
}

fn build_object(index: usize, value: Value) -> Result<SceneObject, ObjectError> {
    let tag = match value.get("kind") {
        Some(Value::String(tag)) => tag.clone(),
        Some(other) => other.to_string(),
        None => {
            return Err(ObjectError::MalformedObject {
                index,
                kind: "unknown".to_string(),
                reason: "missing kind".to_string(),
            })
        }
    };

    let Some(kind) = ObjectKind::from_template_tag(&tag) else {
        return Err(ObjectError::UnsupportedObjectKind { index, kind: tag });
    };

    let data: ObjectData =
        serde_json::from_value(value).map_err(|e| ObjectError::MalformedObject {
            index,
            kind: kind.tag().to_string(),
            reason: e.to_string(),
        })?;
    data.into_scene(index)
}
