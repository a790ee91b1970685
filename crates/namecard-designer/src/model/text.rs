use serde::{Deserialize, Serialize};

use super::{Point, Property, SceneElement};

/// Line height factor applied to the font size.
const LINE_HEIGHT: f64 = 1.16;
/// Advance of a narrow (ASCII) glyph relative to the font size.
const NARROW_ADVANCE: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OriginX {
    #[default]
    Left,
    Center,
    Right,
}

impl OriginX {
    /// Fraction of the width that lies left of the anchor.
    fn offset(self) -> f64 {
        match self {
            OriginX::Left => 0.0,
            OriginX::Center => 0.5,
            OriginX::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OriginY {
    #[default]
    Top,
    Center,
    Bottom,
}

impl OriginY {
    fn offset(self) -> f64 {
        match self {
            OriginY::Top => 0.0,
            OriginY::Center => 0.5,
            OriginY::Bottom => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// A text slot on the badge (company, name, title, or free text).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextField {
    pub text: String,
    pub left: f64,
    pub top: f64,
    pub origin_x: OriginX,
    pub origin_y: OriginY,
    pub font_size: f64,
    pub font_family: String,
    pub font_weight: String,
    pub font_style: String,
    pub fill: String,
    pub text_align: TextAlign,
    pub angle: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    /// Unscaled layout box, kept in sync by `refresh_layout`.
    pub width: f64,
    pub height: f64,
}

impl TextField {
    pub fn new(text: impl Into<String>, left: f64, top: f64, font_size: f64) -> Self {
        let mut field = Self {
            text: text.into(),
            left,
            top,
            origin_x: OriginX::Left,
            origin_y: OriginY::Top,
            font_size,
            font_family: "Noto Sans KR".to_string(),
            font_weight: "normal".to_string(),
            font_style: "normal".to_string(),
            fill: "#000000".to_string(),
            text_align: TextAlign::Left,
            angle: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            width: 0.0,
            height: 0.0,
        };
        field.refresh_layout();
        field
    }

    /// Centered on `left`, the way badge labels are laid out.
    pub fn centered(text: impl Into<String>, left: f64, top: f64, font_size: f64) -> Self {
        let mut field = Self::new(text, left, top, font_size);
        field.origin_x = OriginX::Center;
        field.text_align = TextAlign::Center;
        field
    }

    /// Estimated layout box for the current text and font size.
    ///
    /// Wide (non-ASCII) glyphs advance a full em, narrow ones 0.6 em. The
    /// host surface does real shaping; this only needs to be good enough
    /// for hit testing.
    pub fn measure(text: &str, font_size: f64) -> (f64, f64) {
        let lines: Vec<&str> = text.split('\n').collect();
        let widest = lines
            .iter()
            .map(|line| {
                line.chars()
                    .map(|c| if c.is_ascii() { NARROW_ADVANCE } else { 1.0 })
                    .sum::<f64>()
            })
            .fold(0.0, f64::max);
        (
            widest * font_size,
            lines.len() as f64 * font_size * LINE_HEIGHT,
        )
    }

    /// Recompute `width`/`height` after a text or font change.
    pub fn refresh_layout(&mut self) {
        let (w, h) = Self::measure(&self.text, self.font_size);
        self.width = w;
        self.height = h;
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.refresh_layout();
    }

    pub fn set_font_size(&mut self, font_size: f64) {
        self.font_size = font_size;
        self.refresh_layout();
    }

    pub fn is_unit_scale(&self) -> bool {
        self.scale_x == 1.0 && self.scale_y == 1.0
    }
}

impl SceneElement for TextField {
    fn bounds(&self) -> (f64, f64, f64, f64) {
        let w = self.width * self.scale_x.abs();
        let h = self.height * self.scale_y.abs();
        let x1 = self.left - w * self.origin_x.offset();
        let y1 = self.top - h * self.origin_y.offset();
        (x1, y1, x1 + w, y1 + h)
    }

    fn properties(&self) -> Vec<Property> {
        vec![
            Property::string("Text", self.text.clone()),
            Property::number("Left", self.left),
            Property::number("Top", self.top),
            Property::number("Font Size", self.font_size),
            Property::string("Font Family", self.font_family.clone()),
            Property::string("Font Weight", self.font_weight.clone()),
            Property::string("Fill", self.fill.clone()),
            Property::number("Angle", self.angle),
            Property::number("Scale X", self.scale_x),
            Property::number("Scale Y", self.scale_y),
        ]
    }

    fn position(&self) -> Point {
        Point::new(self.left, self.top)
    }

    fn set_position(&mut self, left: f64, top: f64) {
        self.left = left;
        self.top = top;
    }

    fn angle(&self) -> f64 {
        self.angle
    }

    fn set_angle(&mut self, angle: f64) {
        self.angle = angle;
    }

    fn scale(&self) -> (f64, f64) {
        (self.scale_x, self.scale_y)
    }

    fn set_scale(&mut self, scale_x: f64, scale_y: f64) {
        self.scale_x = scale_x;
        self.scale_y = scale_y;
    }
}
