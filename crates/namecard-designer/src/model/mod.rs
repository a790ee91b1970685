use serde::{Deserialize, Serialize};

pub use namecard_core::properties::{Property, PropertyValue};

mod guide;
mod image;
mod shape;
mod text;

pub use guide::{Axis, Guide, GuideGeometry, GuideKind};
pub use image::{ImageAsset, ImageRole};
pub use shape::{ShapeGeometry, ShapeKind, ShapeObject};
pub use text::{OriginX, OriginY, TextAlign, TextField};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Coarse stacking category. Reordering never moves an object across bands.
///
/// Variants are declared bottom to top, so the derived `Ord` is the paint
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ZBand {
    Guide,
    Background,
    Content,
    Text,
}

impl ZBand {
    /// Nominal z value of the band.
    pub fn rank(self) -> i32 {
        match self {
            ZBand::Guide => i32::MIN,
            ZBand::Background => -1000,
            ZBand::Content => 500,
            ZBand::Text => 1000,
        }
    }
}

/// Kind tag as written into templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Text,
    Image,
    Background,
    Rect,
    Circle,
    Ellipse,
    Line,
    Guide,
}

impl ObjectKind {
    pub fn tag(self) -> &'static str {
        match self {
            ObjectKind::Text => "text",
            ObjectKind::Image => "image",
            ObjectKind::Background => "background",
            ObjectKind::Rect => "rect",
            ObjectKind::Circle => "circle",
            ObjectKind::Ellipse => "ellipse",
            ObjectKind::Line => "line",
            ObjectKind::Guide => "guide",
        }
    }

    /// Kinds the template loader can construct.
    pub fn from_template_tag(tag: &str) -> Option<Self> {
        match tag {
            "text" => Some(ObjectKind::Text),
            "image" => Some(ObjectKind::Image),
            "background" => Some(ObjectKind::Background),
            "rect" => Some(ObjectKind::Rect),
            "circle" => Some(ObjectKind::Circle),
            "ellipse" => Some(ObjectKind::Ellipse),
            "line" => Some(ObjectKind::Line),
            _ => None,
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Behaviour shared by every element on the badge canvas.
pub trait SceneElement {
    /// Axis-aligned bounds `(min_x, min_y, max_x, max_y)` in canvas pixels.
    fn bounds(&self) -> (f64, f64, f64, f64);
    fn properties(&self) -> Vec<Property>;

    fn position(&self) -> Point;
    fn set_position(&mut self, left: f64, top: f64);

    fn angle(&self) -> f64;
    fn set_angle(&mut self, angle: f64);

    fn scale(&self) -> (f64, f64);
    fn set_scale(&mut self, scale_x: f64, scale_y: f64);

    fn translate(&mut self, dx: f64, dy: f64) {
        let p = self.position();
        self.set_position(p.x + dx, p.y + dy);
    }

    fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        let (x1, y1, x2, y2) = self.bounds();
        p.x >= x1 - tolerance
            && p.x <= x2 + tolerance
            && p.y >= y1 - tolerance
            && p.y <= y2 + tolerance
    }
}

/// One visual element on the badge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneObject {
    Text(TextField),
    Image(ImageAsset),
    Shape(ShapeObject),
    Guide(Guide),
}

impl SceneObject {
    pub fn kind(&self) -> ObjectKind {
        match self {
            SceneObject::Text(_) => ObjectKind::Text,
            SceneObject::Image(img) => match img.role {
                ImageRole::Editable => ObjectKind::Image,
                ImageRole::Background => ObjectKind::Background,
            },
            SceneObject::Shape(shape) => match shape.kind() {
                ShapeKind::Rect => ObjectKind::Rect,
                ShapeKind::Circle => ObjectKind::Circle,
                ShapeKind::Ellipse => ObjectKind::Ellipse,
                ShapeKind::Line => ObjectKind::Line,
            },
            SceneObject::Guide(_) => ObjectKind::Guide,
        }
    }

    pub fn band(&self) -> ZBand {
        match self {
            SceneObject::Text(_) => ZBand::Text,
            SceneObject::Image(img) => match img.role {
                ImageRole::Editable => ZBand::Content,
                ImageRole::Background => ZBand::Background,
            },
            SceneObject::Shape(_) => ZBand::Content,
            SceneObject::Guide(_) => ZBand::Guide,
        }
    }

    /// Whether a plain pointer-down can pick this object.
    pub fn is_selectable(&self) -> bool {
        match self {
            SceneObject::Text(_) | SceneObject::Shape(_) => true,
            SceneObject::Image(img) => img.role == ImageRole::Editable,
            SceneObject::Guide(_) => false,
        }
    }

    /// Whether the object belongs on the printed badge.
    pub fn is_printable(&self) -> bool {
        match self {
            SceneObject::Text(_) | SceneObject::Shape(_) => true,
            SceneObject::Image(img) => img.role == ImageRole::Editable,
            SceneObject::Guide(_) => false,
        }
    }

    pub fn is_guide(&self) -> bool {
        matches!(self, SceneObject::Guide(_))
    }

    pub fn is_background(&self) -> bool {
        matches!(self, SceneObject::Image(img) if img.role == ImageRole::Background)
    }

    pub fn as_text(&self) -> Option<&TextField> {
        match self {
            SceneObject::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextField> {
        match self {
            SceneObject::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageAsset> {
        match self {
            SceneObject::Image(img) => Some(img),
            _ => None,
        }
    }

    /// Display name used for new canvas objects.
    pub fn default_name(&self) -> &'static str {
        match self.kind() {
            ObjectKind::Text => "Text",
            ObjectKind::Image => "Image",
            ObjectKind::Background => "Background",
            ObjectKind::Rect => "Rectangle",
            ObjectKind::Circle => "Circle",
            ObjectKind::Ellipse => "Ellipse",
            ObjectKind::Line => "Line",
            ObjectKind::Guide => "Guide",
        }
    }
}

impl SceneElement for SceneObject {
    fn bounds(&self) -> (f64, f64, f64, f64) {
        match self {
            SceneObject::Text(s) => s.bounds(),
            SceneObject::Image(s) => s.bounds(),
            SceneObject::Shape(s) => s.bounds(),
            SceneObject::Guide(s) => s.bounds(),
        }
    }

    fn properties(&self) -> Vec<Property> {
        match self {
            SceneObject::Text(s) => s.properties(),
            SceneObject::Image(s) => s.properties(),
            SceneObject::Shape(s) => s.properties(),
            SceneObject::Guide(s) => s.properties(),
        }
    }

    fn position(&self) -> Point {
        match self {
            SceneObject::Text(s) => s.position(),
            SceneObject::Image(s) => s.position(),
            SceneObject::Shape(s) => s.position(),
            SceneObject::Guide(s) => s.position(),
        }
    }

    fn set_position(&mut self, left: f64, top: f64) {
        match self {
            SceneObject::Text(s) => s.set_position(left, top),
            SceneObject::Image(s) => s.set_position(left, top),
            SceneObject::Shape(s) => s.set_position(left, top),
            SceneObject::Guide(s) => s.set_position(left, top),
        }
    }

    fn angle(&self) -> f64 {
        match self {
            SceneObject::Text(s) => s.angle(),
            SceneObject::Image(s) => s.angle(),
            SceneObject::Shape(s) => s.angle(),
            SceneObject::Guide(s) => s.angle(),
        }
    }

    fn set_angle(&mut self, angle: f64) {
        match self {
            SceneObject::Text(s) => s.set_angle(angle),
            SceneObject::Image(s) => s.set_angle(angle),
            SceneObject::Shape(s) => s.set_angle(angle),
            SceneObject::Guide(s) => s.set_angle(angle),
        }
    }

    fn scale(&self) -> (f64, f64) {
        match self {
            SceneObject::Text(s) => s.scale(),
            SceneObject::Image(s) => s.scale(),
            SceneObject::Shape(s) => s.scale(),
            SceneObject::Guide(s) => s.scale(),
        }
    }

    fn set_scale(&mut self, scale_x: f64, scale_y: f64) {
        match self {
            SceneObject::Text(s) => s.set_scale(scale_x, scale_y),
            SceneObject::Image(s) => s.set_scale(scale_x, scale_y),
            SceneObject::Shape(s) => s.set_scale(scale_x, scale_y),
            SceneObject::Guide(s) => s.set_scale(scale_x, scale_y),
        }
    }

    fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        match self {
            SceneObject::Shape(s) => s.contains_point(p, tolerance),
            SceneObject::Guide(_) => false,
            other => {
                let (x1, y1, x2, y2) = other.bounds();
                p.x >= x1 - tolerance
                    && p.x <= x2 + tolerance
                    && p.y >= y1 - tolerance
                    && p.y <= y2 + tolerance
            }
        }
    }
}
