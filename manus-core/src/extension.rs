//! Per-finger extension detection.
//!
//! Pure geometry: no state, no side effects. The confidence is the planar
//! tip-to-base distance normalized by the expected finger length; the binary
//! decision additionally requires the tip to sit above its base, which
//! rejects fingers that are spread sideways but not raised.

use manus_types::{Finger, Hand, TrackingSettings};

/// Raw extension result for one finger in one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extension {
    pub extended: bool,
    /// How "pointed" the finger is, in [0,1].
    pub confidence: f32,
}

/// Compute the extension of `finger` on `hand`.
///
/// Confidence: planar (x/y) distance from tip to base, divided by the
/// expected length constant (the thumb uses a smaller constant — its
/// tip-to-MCP span is anatomically shorter). Clamped to [0,1].
///
/// Direction: the tip must be at least `raise_margin` above the base
/// (smaller y; y grows downward). The thumb compares against the wrist
/// with the larger thumb margin, since its base barely rises when the
/// thumb points up.
pub fn detect_extension(hand: &Hand, finger: Finger, settings: &TrackingSettings) -> Extension {
    let tip = hand.point(finger.tip_index());
    let base = hand.point(finger.base_index());

    let expected = match finger {
        Finger::Thumb => settings.thumb_length,
        _ => settings.finger_length,
    };
    let confidence = (tip.planar_distance(&base) / expected).clamp(0.0, 1.0) as f32;

    let raised = match finger {
        Finger::Thumb => tip.y < hand.wrist().y - settings.thumb_raise_margin,
        _ => tip.y < base.y - settings.raise_margin,
    };

    Extension {
        extended: confidence > settings.activation_threshold && raised,
        confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use manus_types::{landmark, Landmark};

    /// A neutral hand: wrist low in the frame, knuckle row above it, all
    /// fingers curled (tips just below their bases).
    fn curled_hand() -> [Landmark; landmark::LANDMARK_COUNT] {
        let mut pts = [Landmark::default(); landmark::LANDMARK_COUNT];
        pts[landmark::WRIST] = Landmark::new(0.50, 0.85, 0.0);
        let columns = [
            (landmark::THUMB_MCP, landmark::THUMB_TIP, 0.40),
            (landmark::INDEX_MCP, landmark::INDEX_TIP, 0.45),
            (landmark::MIDDLE_MCP, landmark::MIDDLE_TIP, 0.50),
            (landmark::RING_MCP, landmark::RING_TIP, 0.55),
            (landmark::PINKY_MCP, landmark::PINKY_TIP, 0.60),
        ];
        for (base, tip, x) in columns {
            pts[base] = Landmark::new(x, 0.65, 0.0);
            pts[tip] = Landmark::new(x, 0.70, 0.0);
        }
        pts
    }

    fn hand(pts: [Landmark; landmark::LANDMARK_COUNT]) -> Hand {
        Hand::from_landmarks(&pts).unwrap()
    }

    #[test]
    fn curled_finger_not_extended() {
        let result = detect_extension(&hand(curled_hand()), Finger::Index, &Default::default());
        assert!(!result.extended);
        assert!(result.confidence < 0.5);
    }

    #[test]
    fn raised_finger_extended_with_high_confidence() {
        let mut pts = curled_hand();
        pts[landmark::INDEX_TIP] = Landmark::new(0.45, 0.45, 0.0);
        let result = detect_extension(&hand(pts), Finger::Index, &Default::default());
        assert!(result.extended);
        assert!(result.confidence > 0.9);
    }

    #[test]
    fn spread_but_not_raised_rejected() {
        // Long lateral distance, tip level with the base: the distance gate
        // passes but the direction check must reject it.
        let mut pts = curled_hand();
        pts[landmark::INDEX_TIP] = Landmark::new(0.25, 0.65, 0.0);
        let result = detect_extension(&hand(pts), Finger::Index, &Default::default());
        assert!(!result.extended);
        assert!(result.confidence > 0.9);
    }

    #[test]
    fn barely_raised_finger_rejected_by_margin() {
        let mut pts = curled_hand();
        // 0.02 above the base is inside the default 0.03 margin.
        pts[landmark::INDEX_TIP] = Landmark::new(0.25, 0.63, 0.0);
        let result = detect_extension(&hand(pts), Finger::Index, &Default::default());
        assert!(!result.extended);
    }

    #[test]
    fn thumb_measured_against_wrist() {
        let mut pts = curled_hand();
        // Tip well clear of the thumb base, above the base but below the
        // wrist margin line (wrist y 0.85 - 0.06 = 0.79).
        pts[landmark::THUMB_TIP] = Landmark::new(0.28, 0.82, 0.0);
        let result = detect_extension(&hand(pts), Finger::Thumb, &Default::default());
        assert!(!result.extended, "thumb below the wrist margin must not trigger");

        pts[landmark::THUMB_TIP] = Landmark::new(0.30, 0.60, 0.0);
        let result = detect_extension(&hand(pts), Finger::Thumb, &Default::default());
        assert!(result.extended);
    }

    #[test]
    fn confidence_clamped_to_unit_range() {
        let mut pts = curled_hand();
        pts[landmark::MIDDLE_TIP] = Landmark::new(0.50, 0.05, 0.0);
        let result = detect_extension(&hand(pts), Finger::Middle, &Default::default());
        assert!(result.confidence <= 1.0);
    }

    #[test]
    fn depth_does_not_affect_confidence() {
        let mut near = curled_hand();
        near[landmark::INDEX_TIP] = Landmark::new(0.45, 0.45, 0.4);
        let mut far = curled_hand();
        far[landmark::INDEX_TIP] = Landmark::new(0.45, 0.45, -0.4);
        let a = detect_extension(&hand(near), Finger::Index, &Default::default());
        let b = detect_extension(&hand(far), Finger::Index, &Default::default());
        assert_eq!(a.confidence, b.confidence);
    }
}
