//! Unit conversion utilities
//!
//! Handles conversion between physical paper units (cm) and canvas pixels,
//! plus the paper sizes a badge can be printed on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canvas pixels per centimeter (96 DPI / 2.54).
pub const PX_PER_CM: f64 = 37.8;

/// Convert centimeters to whole canvas pixels.
pub fn cm_to_px(cm: f64) -> f64 {
    (cm * PX_PER_CM).round()
}

/// Convert canvas pixels back to centimeters (unrounded).
pub fn px_to_cm(px: f64) -> f64 {
    px / PX_PER_CM
}

/// Format a centimeter value for display, trimming trailing zeros.
///
/// `9.0` renders as `"9"`, `12.50` as `"12.5"`.
pub fn format_cm(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Physical paper size of the badge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaperSize {
    /// Width in centimeters
    pub width_cm: f64,
    /// Height in centimeters
    pub height_cm: f64,
}

/// Centimeter value for a pixel length, on a 0.1 cm grid when that grid
/// maps back to the same pixel count, else on a 0.01 cm grid.
fn snap_cm(px: f64) -> f64 {
    let cm = px_to_cm(px);
    let tenth = (cm * 10.0).round() / 10.0;
    if cm_to_px(tenth) == px.round() {
        tenth
    } else {
        (cm * 100.0).round() / 100.0
    }
}

impl PaperSize {
    /// Standard hanging badge (9 × 12.5 cm)
    pub const BADGE: PaperSize = PaperSize {
        width_cm: 9.0,
        height_cm: 12.5,
    };

    /// Business card (9 × 5 cm)
    pub const BUSINESS_CARD: PaperSize = PaperSize {
        width_cm: 9.0,
        height_cm: 5.0,
    };

    pub fn new(width_cm: f64, height_cm: f64) -> Self {
        Self {
            width_cm,
            height_cm,
        }
    }

    /// Canvas size in pixels for this paper.
    pub fn to_px(&self) -> (f64, f64) {
        (cm_to_px(self.width_cm), cm_to_px(self.height_cm))
    }

    /// Paper size that a pixel canvas corresponds to.
    pub fn from_px(width_px: f64, height_px: f64) -> Self {
        Self {
            width_cm: snap_cm(width_px),
            height_cm: snap_cm(height_px),
        }
    }

    /// Human readable size label, e.g. `9cm × 12.5cm`.
    pub fn label(&self) -> String {
        format!(
            "{}cm × {}cm",
            format_cm(self.width_cm),
            format_cm(self.height_cm)
        )
    }

    /// True when both sides are finite and positive.
    pub fn is_valid(&self) -> bool {
        self.width_cm.is_finite()
            && self.height_cm.is_finite()
            && self.width_cm > 0.0
            && self.height_cm > 0.0
    }
}

impl Default for PaperSize {
    fn default() -> Self {
        Self::BADGE
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for PaperSize {
    type Err = String;

    /// Parses `9x12.5`, `9 × 12.5` or a preset name (`badge`, `card`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_lowercase();
        match input.as_str() {
            "badge" => return Ok(Self::BADGE),
            "card" | "business-card" => return Ok(Self::BUSINESS_CARD),
            _ => {}
        }

        let parts: Vec<&str> = input
            .split(|c: char| c == 'x' || c == '×' || c == '*')
            .map(|p| p.trim().trim_end_matches("cm").trim())
            .collect();
        if parts.len() != 2 {
            return Err(format!("Invalid paper size: {}", s));
        }

        let width = parts[0]
            .parse::<f64>()
            .map_err(|_| format!("Invalid paper width: {}", parts[0]))?;
        let height = parts[1]
            .parse::<f64>()
            .map_err(|_| format!("Invalid paper height: {}", parts[1]))?;

        let size = Self::new(width, height);
        if !size.is_valid() {
            return Err(format!("Paper size must be positive: {}", s));
        }
        Ok(size)
    }
}
