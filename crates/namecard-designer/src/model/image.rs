use serde::{Deserialize, Serialize};

use super::{Point, Property, SceneElement};

/// What an image is for. Governs its band and whether it is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageRole {
    /// Logo, photo or other content the user places and prints.
    #[default]
    Editable,
    /// Pre-printed card stock preview; positioning aid only.
    Background,
}

/// A raster image placed on the badge by reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAsset {
    /// Where the image comes from (URL, data URI or path).
    pub source_ref: String,
    pub role: ImageRole,
    pub left: f64,
    pub top: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub angle: f64,
    pub opacity: f64,
    /// Decoded pixel size; zero until the asset has been loaded.
    pub natural_width: f64,
    pub natural_height: f64,
}

impl ImageAsset {
    pub fn new(source_ref: impl Into<String>, role: ImageRole) -> Self {
        Self {
            source_ref: source_ref.into(),
            role,
            left: 0.0,
            top: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            angle: 0.0,
            opacity: 1.0,
            natural_width: 0.0,
            natural_height: 0.0,
        }
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.natural_width = width;
        self.natural_height = height;
        self
    }

    pub fn is_loaded(&self) -> bool {
        self.natural_width > 0.0 && self.natural_height > 0.0
    }

    /// Scale a background so it covers a `width` x `height` frame.
    pub fn fit_to(&mut self, width: f64, height: f64) {
        if !self.is_loaded() {
            return;
        }
        self.scale_x = width / self.natural_width;
        self.scale_y = height / self.natural_height;
        self.left = 0.0;
        self.top = 0.0;
    }
}

impl SceneElement for ImageAsset {
    fn bounds(&self) -> (f64, f64, f64, f64) {
        (
            self.left,
            self.top,
            self.left + self.natural_width * self.scale_x.abs(),
            self.top + self.natural_height * self.scale_y.abs(),
        )
    }

    fn properties(&self) -> Vec<Property> {
        vec![
            Property::string("Source", self.source_ref.clone()),
            Property::bool("Background", self.role == ImageRole::Background),
            Property::number("Left", self.left),
            Property::number("Top", self.top),
            Property::number("Scale X", self.scale_x),
            Property::number("Scale Y", self.scale_y),
            Property::number("Angle", self.angle),
            Property::number("Opacity", self.opacity),
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
