//! # Built-in Templates
//!
//! The default badge: three centered placeholder fields for company, name
//! and title, ready to be bound to a profile.

use namecard_core::units::PaperSize;
use namecard_settings::Config;

use crate::binding::ProfileSlot;
use crate::document::Document;
use crate::geometry::{regenerate_guides, GuideOptions};
use crate::model::{SceneObject, TextField};

/// Layout of one placeholder field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotLayout {
    pub slot: ProfileSlot,
    /// Top edge as a fraction of the canvas height.
    pub top_ratio: f64,
    pub font_size: f64,
}

pub const DEFAULT_LAYOUT: [SlotLayout; 3] = [
    SlotLayout {
        slot: ProfileSlot::Company,
        top_ratio: 0.25,
        font_size: 24.0,
    },
    SlotLayout {
        slot: ProfileSlot::Name,
        top_ratio: 0.45,
        font_size: 36.0,
    },
    SlotLayout {
        slot: ProfileSlot::Title,
        top_ratio: 0.60,
        font_size: 20.0,
    },
];

/// Text and canvas defaults applied to new templates.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateStyle {
    pub font_family: String,
    pub fill: String,
    pub background_color: String,
}

impl Default for TemplateStyle {
    fn default() -> Self {
        Self {
            font_family: "Noto Sans KR".to_string(),
            fill: "#000000".to_string(),
            background_color: "#ffffff".to_string(),
        }
    }
}

impl From<&Config> for TemplateStyle {
    fn from(config: &Config) -> Self {
        Self {
            font_family: config.text.font_family.clone(),
            fill: config.text.default_fill.clone(),
            background_color: config.canvas.background_color.clone(),
        }
    }
}

/// Builds the default three-field badge for `paper`.
///
/// Guides (with the size label) are added when `guides.show` is set.
pub fn default_document(paper: PaperSize, style: &TemplateStyle, guides: &GuideOptions) -> Document {
    let mut doc = Document::new(paper);
    doc.set_background_color(style.background_color.clone());

    let center_x = doc.width_px() / 2.0;
    let height = doc.height_px();
    for layout in DEFAULT_LAYOUT {
        let mut field = TextField::centered(
            layout.slot.placeholder(),
            center_x,
            height * layout.top_ratio,
            layout.font_size,
        );
        field.font_family = style.font_family.clone();
        field.fill = style.fill.clone();
        doc.add_named(layout.slot.placeholder(), SceneObject::Text(field));
    }

    regenerate_guides(
        &mut doc,
        &GuideOptions {
            size_label: true,
            ..guides.clone()
        },
    );
    doc
}
