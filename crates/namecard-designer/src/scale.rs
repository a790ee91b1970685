//! Scale normalization.
//!
//! Text is never left at a non-unit scale. A pinch or drag scale is
//! converted to a whole font-size step and the scale is reset to 1, both
//! on every interactive frame and on commit. Shapes fold the scale into
//! their dimensions on commit; images keep their scale.

use crate::model::{SceneObject, TextField};

pub const MIN_FONT_SIZE: f64 = 8.0;
pub const MAX_FONT_SIZE: f64 = 200.0;

/// Scale changes smaller than this are treated as pointer jitter.
pub const NOISE_THRESHOLD: f64 = 0.1;

/// Which bounds a settle enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleMode {
    /// Live preview while the pointer moves: floor only.
    Interactive,
    /// Final commit: floor and ceiling.
    Commit,
}

/// Font-size delta for a scale pair, one point per 10% of change.
pub fn font_size_delta(scale_x: f64, scale_y: f64) -> f64 {
    let change = scale_x.max(scale_y) - 1.0;
    if change.abs() < NOISE_THRESHOLD {
        return 0.0;
    }
    // Half-up rounding so -0.25 * 10 maps to -2, not -3.
    (change * 10.0 + 0.5).floor()
}

pub fn clamp_font_size(size: f64) -> f64 {
    size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
}

/// Converts a text field's scale into a font size. Returns true when the
/// field was changed.
///
/// Interactive ticks already reset the scale, so a commit at unit scale
/// still enforces the ceiling on whatever size the gesture reached.
pub fn settle_text(text: &mut TextField, mode: SettleMode) -> bool {
    if text.is_unit_scale() {
        if mode == SettleMode::Commit {
            let size = clamp_font_size(text.font_size);
            if size != text.font_size {
                text.set_font_size(size);
                return true;
            }
        }
        return false;
    }
    let delta = font_size_delta(text.scale_x, text.scale_y);
    let mut size = (text.font_size + delta).max(MIN_FONT_SIZE);
    if mode == SettleMode::Commit {
        size = size.min(MAX_FONT_SIZE);
    }
    text.scale_x = 1.0;
    text.scale_y = 1.0;
    text.set_font_size(size);
    true
}

/// Applies the per-kind settle rule to any scene object.
pub fn settle(object: &mut SceneObject, mode: SettleMode) -> bool {
    match object {
        SceneObject::Text(text) => settle_text(text, mode),
        SceneObject::Shape(shape) if mode == SettleMode::Commit => {
            let changed = shape.scale_x != 1.0 || shape.scale_y != 1.0;
            shape.settle();
            changed
        }
        SceneObject::Shape(_) | SceneObject::Image(_) | SceneObject::Guide(_) => false,
    }
}
