use serde::{Deserialize, Serialize};

use super::{Point, Property, SceneElement};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GuideKind {
    OuterBorder,
    SafeMargin,
    CenterCross,
    SizeLabel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GuideGeometry {
    Frame {
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    },
    /// A full-length line at `offset` along the other axis.
    Line { axis: Axis, offset: f64, length: f64 },
    Label { left: f64, top: f64, text: String },
}

/// Non-interactive layout aid drawn over the badge. Never printed or saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guide {
    pub kind: GuideKind,
    pub geometry: GuideGeometry,
    pub stroke: String,
    pub dash: Option<Vec<f64>>,
}

impl Guide {
    pub fn frame(kind: GuideKind, left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            kind,
            geometry: GuideGeometry::Frame {
                left,
                top,
                width,
                height,
            },
            stroke: "#999999".to_string(),
            dash: Some(vec![5.0, 5.0]),
        }
    }

    pub fn center_line(axis: Axis, offset: f64, length: f64) -> Self {
        Self {
            kind: GuideKind::CenterCross,
            geometry: GuideGeometry::Line {
                axis,
                offset,
                length,
            },
            stroke: "#cccccc".to_string(),
            dash: Some(vec![3.0, 3.0]),
        }
    }

    pub fn label(text: impl Into<String>, left: f64, top: f64) -> Self {
        Self {
            kind: GuideKind::SizeLabel,
            geometry: GuideGeometry::Label {
                left,
                top,
                text: text.into(),
            },
            stroke: "#666666".to_string(),
            dash: None,
        }
    }
}

impl SceneElement for Guide {
    fn bounds(&self) -> (f64, f64, f64, f64) {
        match &self.geometry {
            GuideGeometry::Frame {
                left,
                top,
                width,
                height,
            } => (*left, *top, left + width, top + height),
            GuideGeometry::Line {
                axis: Axis::Horizontal,
                offset,
                length,
            } => (0.0, *offset, *length, *offset),
            GuideGeometry::Line {
                axis: Axis::Vertical,
                offset,
                length,
            } => (*offset, 0.0, *offset, *length),
            GuideGeometry::Label { left, top, .. } => (*left, *top, *left, *top),
        }
    }

    fn properties(&self) -> Vec<Property> {
        Vec::new()
    }

    fn position(&self) -> Point {
        let (x, y, _, _) = self.bounds();
        Point::new(x, y)
    }

    // Guides are regenerated from the frame, never moved.
    fn set_position(&mut self, _left: f64, _top: f64) {}

    fn angle(&self) -> f64 {
        0.0
    }

    fn set_angle(&mut self, _angle: f64) {}

    fn scale(&self) -> (f64, f64) {
        (1.0, 1.0)
    }

    fn set_scale(&mut self, _scale_x: f64, _scale_y: f64) {}
}
