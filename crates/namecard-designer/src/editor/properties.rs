//! Property setters for the host's property panel.
//!
//! Each setter returns whether it applied (a text-only property on an
//! image is ignored), and publishes the object's new properties.

use namecard_core::error::DocumentError;
use namecard_core::event_bus::{EditorEvent, PropertyEvent};

use super::NamecardEditor;
use crate::model::{SceneElement, SceneObject, TextAlign};
use crate::scale::clamp_font_size;

impl NamecardEditor {
    fn update(
        &mut self,
        id: u64,
        f: impl FnOnce(&mut SceneObject) -> bool,
    ) -> Result<bool, DocumentError> {
        let applied = self.document.modify(id, f)?;
        if applied {
            let properties = self
                .document
                .get(id)
                .map(|o| o.object.properties())
                .unwrap_or_default();
            self.events
                .publish(EditorEvent::Property(PropertyEvent::Changed { id, properties }));
        }
        self.flush();
        Ok(applied)
    }

    pub fn set_text(&mut self, id: u64, text: &str) -> Result<bool, DocumentError> {
        self.update(id, |o| match o.as_text_mut() {
            Some(t) => {
                t.set_text(text);
                true
            }
            None => false,
        })
    }

    /// Sets the font size, clamped to the allowed range.
    pub fn set_font_size(&mut self, id: u64, size: f64) -> Result<bool, DocumentError> {
        self.update(id, |o| match o.as_text_mut() {
            Some(t) => {
                t.set_font_size(clamp_font_size(size));
                true
            }
            None => false,
        })
    }

    pub fn set_font_family(&mut self, id: u64, family: &str) -> Result<bool, DocumentError> {
        self.update(id, |o| match o.as_text_mut() {
            Some(t) => {
                t.font_family = family.to_string();
                true
            }
            None => false,
        })
    }

    pub fn set_text_align(&mut self, id: u64, align: TextAlign) -> Result<bool, DocumentError> {
        self.update(id, |o| match o.as_text_mut() {
            Some(t) => {
                t.text_align = align;
                true
            }
            None => false,
        })
    }

    /// Text color, or shape fill.
    pub fn set_fill(&mut self, id: u64, fill: &str) -> Result<bool, DocumentError> {
        self.update(id, |o| match o {
            SceneObject::Text(t) => {
                t.fill = fill.to_string();
                true
            }
            SceneObject::Shape(s) => {
                s.fill = Some(fill.to_string());
                true
            }
            SceneObject::Image(_) | SceneObject::Guide(_) => false,
        })
    }

    pub fn set_position(&mut self, id: u64, left: f64, top: f64) -> Result<bool, DocumentError> {
        self.update(id, |o| {
            if o.is_guide() {
                return false;
            }
            o.set_position(left, top);
            true
        })
    }

    /// Angle in degrees.
    pub fn set_angle(&mut self, id: u64, angle: f64) -> Result<bool, DocumentError> {
        self.update(id, |o| {
            if o.is_guide() {
                return false;
            }
            o.set_angle(angle);
            true
        })
    }

    pub fn set_background_color(&mut self, color: &str) {
        self.document.set_background_color(color);
        self.flush();
    }
}
