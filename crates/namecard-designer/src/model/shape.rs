use serde::{Deserialize, Serialize};

use super::{Point, Property, SceneElement};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rect,
    Circle,
    Ellipse,
    Line,
}

/// Unscaled dimensions of a shape, relative to its `left`/`top` anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShapeGeometry {
    Rect { width: f64, height: f64 },
    Circle { radius: f64 },
    Ellipse { rx: f64, ry: f64 },
    /// Endpoints are offsets from the anchor.
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl ShapeGeometry {
    fn extent(&self) -> (f64, f64) {
        match self {
            ShapeGeometry::Rect { width, height } => (*width, *height),
            ShapeGeometry::Circle { radius } => (radius * 2.0, radius * 2.0),
            ShapeGeometry::Ellipse { rx, ry } => (rx * 2.0, ry * 2.0),
            ShapeGeometry::Line { x1, y1, x2, y2 } => ((x2 - x1).abs(), (y2 - y1).abs()),
        }
    }
}

/// Decorative vector shape (frame, divider, dot).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeObject {
    pub geometry: ShapeGeometry,
    pub left: f64,
    pub top: f64,
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: f64,
    /// Dash pattern, e.g. `[5, 5]`; `None` draws a solid stroke.
    pub stroke_dash: Option<Vec<f64>>,
    pub angle: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl ShapeObject {
    fn with_geometry(geometry: ShapeGeometry, left: f64, top: f64) -> Self {
        Self {
            geometry,
            left,
            top,
            fill: None,
            stroke: Some("#000000".to_string()),
            stroke_width: 1.0,
            stroke_dash: None,
            angle: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    pub fn rect(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self::with_geometry(ShapeGeometry::Rect { width, height }, left, top)
    }

    pub fn circle(left: f64, top: f64, radius: f64) -> Self {
        Self::with_geometry(ShapeGeometry::Circle { radius }, left, top)
    }

    pub fn ellipse(left: f64, top: f64, rx: f64, ry: f64) -> Self {
        Self::with_geometry(ShapeGeometry::Ellipse { rx, ry }, left, top)
    }

    /// A line between two absolute canvas points.
    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        let left = x1.min(x2);
        let top = y1.min(y2);
        Self::with_geometry(
            ShapeGeometry::Line {
                x1: x1 - left,
                y1: y1 - top,
                x2: x2 - left,
                y2: y2 - top,
            },
            left,
            top,
        )
    }

    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    pub fn with_stroke(mut self, stroke: impl Into<String>, width: f64) -> Self {
        self.stroke = Some(stroke.into());
        self.stroke_width = width;
        self
    }

    pub fn dashed(mut self, pattern: Vec<f64>) -> Self {
        self.stroke_dash = Some(pattern);
        self
    }

    pub fn kind(&self) -> ShapeKind {
        match self.geometry {
            ShapeGeometry::Rect { .. } => ShapeKind::Rect,
            ShapeGeometry::Circle { .. } => ShapeKind::Circle,
            ShapeGeometry::Ellipse { .. } => ShapeKind::Ellipse,
            ShapeGeometry::Line { .. } => ShapeKind::Line,
        }
    }

    /// Fold the transient scale into the dimensions and reset it to 1.
    ///
    /// A circle stays a circle: it takes the larger of the two factors.
    pub fn settle(&mut self) {
        let (sx, sy) = (self.scale_x, self.scale_y);
        if sx == 1.0 && sy == 1.0 {
            return;
        }
        self.geometry = match self.geometry {
            ShapeGeometry::Rect { width, height } => ShapeGeometry::Rect {
                width: width * sx.abs(),
                height: height * sy.abs(),
            },
            ShapeGeometry::Circle { radius } => ShapeGeometry::Circle {
                radius: radius * sx.abs().max(sy.abs()),
            },
            ShapeGeometry::Ellipse { rx, ry } => ShapeGeometry::Ellipse {
                rx: rx * sx.abs(),
                ry: ry * sy.abs(),
            },
            ShapeGeometry::Line { x1, y1, x2, y2 } => ShapeGeometry::Line {
                x1: x1 * sx,
                y1: y1 * sy,
                x2: x2 * sx,
                y2: y2 * sy,
            },
        };
        self.scale_x = 1.0;
        self.scale_y = 1.0;
    }

    fn line_endpoints(&self) -> Option<(Point, Point)> {
        match self.geometry {
            ShapeGeometry::Line { x1, y1, x2, y2 } => Some((
                Point::new(self.left + x1 * self.scale_x, self.top + y1 * self.scale_y),
                Point::new(self.left + x2 * self.scale_x, self.top + y2 * self.scale_y),
            )),
            _ => None,
        }
    }
}

impl SceneElement for ShapeObject {
    fn bounds(&self) -> (f64, f64, f64, f64) {
        if let Some((a, b)) = self.line_endpoints() {
            return (a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y));
        }
        let (w, h) = self.geometry.extent();
        (
            self.left,
            self.top,
            self.left + w * self.scale_x.abs(),
            self.top + h * self.scale_y.abs(),
        )
    }

    fn properties(&self) -> Vec<Property> {
        let mut props = vec![
            Property::number("Left", self.left),
            Property::number("Top", self.top),
        ];
        match self.geometry {
            ShapeGeometry::Rect { width, height } => {
                props.push(Property::number("Width", width));
                props.push(Property::number("Height", height));
            }
            ShapeGeometry::Circle { radius } => {
                props.push(Property::number("Radius", radius));
            }
            ShapeGeometry::Ellipse { rx, ry } => {
                props.push(Property::number("Radius X", rx));
                props.push(Property::number("Radius Y", ry));
            }
            ShapeGeometry::Line { x1, y1, x2, y2 } => {
                props.push(Property::number("X1", x1));
                props.push(Property::number("Y1", y1));
                props.push(Property::number("X2", x2));
                props.push(Property::number("Y2", y2));
            }
        }
        props.push(Property::string(
            "Fill",
            self.fill.clone().unwrap_or_default(),
        ));
        props.push(Property::string(
            "Stroke",
            self.stroke.clone().unwrap_or_default(),
        ));
        props.push(Property::number("Stroke Width", self.stroke_width));
        props.push(Property::number("Angle", self.angle));
        props.push(Property::number("Scale X", self.scale_x));
        props.push(Property::number("Scale Y", self.scale_y));
        props
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

    fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        match self.line_endpoints() {
            Some((a, b)) => {
                distance_to_segment(p, a, b) <= tolerance + self.stroke_width / 2.0
            }
            None => {
                let (x1, y1, x2, y2) = self.bounds();
                p.x >= x1 - tolerance
                    && p.x <= x2 + tolerance
                    && p.y >= y1 - tolerance
                    && p.y <= y2 + tolerance
            }
        }
    }
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance_to(&a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance_to(&Point::new(a.x + t * dx, a.y + t * dy))
}
