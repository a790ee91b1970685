//! Paper frame and guide generation.

use namecard_core::units::{cm_to_px, PaperSize};

use crate::document::Document;
use crate::model::{Axis, Guide, GuideKind, SceneObject};

/// Height reserved above the bottom edge for the size label.
const LABEL_OFFSET: f64 = 16.0;

#[derive(Debug, Clone, PartialEq)]
pub struct GuideOptions {
    pub margin_cm: f64,
    pub show: bool,
    pub size_label: bool,
}

impl Default for GuideOptions {
    fn default() -> Self {
        Self {
            margin_cm: 0.5,
            show: true,
            size_label: false,
        }
    }
}

/// Replaces the document's guides with a fresh set for its current frame.
///
/// Running it twice with the same options yields the same guides. Returns
/// the number of guides now present.
pub fn regenerate_guides(doc: &mut Document, options: &GuideOptions) -> usize {
    doc.remove_guides();
    doc.set_show_guides(options.show);
    if !options.show {
        return 0;
    }

    let w = doc.width_px();
    let h = doc.height_px();
    let inset = cm_to_px(options.margin_cm);

    let mut guides = vec![
        Guide::frame(GuideKind::OuterBorder, 0.0, 0.0, w, h),
        Guide::frame(
            GuideKind::SafeMargin,
            inset,
            inset,
            (w - inset * 2.0).max(0.0),
            (h - inset * 2.0).max(0.0),
        ),
        Guide::center_line(Axis::Horizontal, h / 2.0, w),
        Guide::center_line(Axis::Vertical, w / 2.0, h),
    ];
    if options.size_label {
        guides.push(Guide::label(
            doc.paper().label(),
            inset,
            (h - LABEL_OFFSET).max(0.0),
        ));
    }

    let count = guides.len();
    for guide in guides {
        doc.add_object(SceneObject::Guide(guide));
    }
    tracing::debug!(count, width_px = w, height_px = h, "Guides regenerated");
    count
}

/// Whether the document currently carries a size label guide.
pub fn has_size_label(doc: &Document) -> bool {
    doc.objects()
        .iter()
        .any(|o| matches!(&o.object, SceneObject::Guide(g) if g.kind == GuideKind::SizeLabel))
}

impl Document {
    /// Changes the paper size, keeping object positions in pixel space.
    ///
    /// The frame and guides change; objects only get their cached geometry
    /// refreshed. A size label present before the resize is kept.
    pub fn resize_paper(&mut self, paper: PaperSize, margin_cm: f64) {
        let size_label = has_size_label(self);
        let show = self.show_guides();
        self.set_paper(paper);
        self.refresh_coords();
        regenerate_guides(
            self,
            &GuideOptions {
                margin_cm,
                show,
                size_label,
            },
        );
    }
}
