use namecard_core::units::{cm_to_px, px_to_cm, PaperSize};
use proptest::prelude::*;

#[test]
fn test_badge_canvas_size() {
    let (w, h) = PaperSize::BADGE.to_px();
    assert_eq!(w, 340.0);
    assert_eq!(h, 472.0);
}

#[test]
fn test_paper_display_matches_label() {
    let size = PaperSize::new(9.0, 5.0);
    assert_eq!(size.to_string(), "9cm × 5cm");
}

proptest! {
    #[test]
    fn whole_pixels_survive_cm_round_trip(px in 0u32..5_000) {
        let px = px as f64;
        prop_assert_eq!(cm_to_px(px_to_cm(px)), px);
    }

    #[test]
    fn cm_to_px_is_monotonic(a in 0.0f64..100.0, b in 0.0f64..100.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(cm_to_px(lo) <= cm_to_px(hi));
    }
}
