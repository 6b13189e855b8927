//! Tunable tracking constants.
//!
//! Loaded once at session start and fixed for the session's lifetime.
//! Stricter thresholds trade missed triggers for fewer false positives;
//! looser ones the reverse. The defaults are tuned for ~30-60Hz webcam
//! tracking at arm's length.

use serde::{Deserialize, Serialize};

use crate::slot::HandSide;

/// How hands with the wrong landmark count are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LandmarkPolicy {
    /// Skip the malformed hand for this frame (default, safer).
    Strict,
    /// Pad short hands by repeating the last point. Can fabricate
    /// extension geometry; opt-in only.
    Pad,
}

impl Default for LandmarkPolicy {
    fn default() -> Self {
        LandmarkPolicy::Strict
    }
}

/// The tunable-constants block for the whole pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackingSettings {
    /// Primary confidence gate for raw extension detection.
    pub activation_threshold: f32,
    /// Secondary, stricter gate the stability tracker counts against.
    pub stability_threshold: f32,
    /// Consecutive qualifying frames before a slot becomes active.
    pub activation_frames: u32,
    /// Count below which an already-active slot releases.
    pub release_frames: u32,
    /// Expected planar tip-to-base length of a non-thumb finger.
    pub finger_length: f64,
    /// Expected planar tip-to-base length of the thumb.
    pub thumb_length: f64,
    /// How far above its base (smaller y) a fingertip must sit.
    pub raise_margin: f64,
    /// Thumb margin, measured against the wrist instead of the base.
    pub thumb_raise_margin: f64,
    /// Malformed-hand policy.
    pub landmark_policy: LandmarkPolicy,
    /// Which hand's wrist drives the beat estimator.
    pub beat_hand: HandSide,
    /// Volume reported when no hands are tracked.
    pub default_volume: f32,
}

impl Default for TrackingSettings {
    fn default() -> Self {
        Self {
            activation_threshold: 0.55,
            stability_threshold: 0.60,
            activation_frames: 2,
            release_frames: 2,
            finger_length: 0.18,
            thumb_length: 0.11,
            raise_margin: 0.03,
            thumb_raise_margin: 0.06,
            landmark_policy: LandmarkPolicy::Strict,
            beat_hand: HandSide::Right,
            default_volume: 0.75,
        }
    }
}

impl TrackingSettings {
    /// Clamp every field into its valid range. The stability threshold is
    /// never allowed below the activation threshold, frame counts never
    /// below 1, lengths and margins never non-positive.
    pub fn sanitized(mut self) -> Self {
        self.activation_threshold = self.activation_threshold.clamp(0.0, 1.0);
        self.stability_threshold = self
            .stability_threshold
            .clamp(self.activation_threshold, 1.0);
        self.activation_frames = self.activation_frames.max(1);
        self.release_frames = self.release_frames.clamp(1, self.activation_frames);
        self.finger_length = self.finger_length.max(1e-3);
        self.thumb_length = self.thumb_length.max(1e-3);
        self.raise_margin = self.raise_margin.max(0.0);
        self.thumb_raise_margin = self.thumb_raise_margin.max(0.0);
        self.default_volume = self.default_volume.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_already_sane() {
        let defaults = TrackingSettings::default();
        assert_eq!(defaults.sanitized(), defaults);
    }

    #[test]
    fn stability_threshold_never_below_activation() {
        let settings = TrackingSettings {
            activation_threshold: 0.7,
            stability_threshold: 0.2,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(settings.stability_threshold, 0.7);
    }

    #[test]
    fn frame_counts_at_least_one() {
        let settings = TrackingSettings {
            activation_frames: 0,
            release_frames: 0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(settings.activation_frames, 1);
        assert_eq!(settings.release_frames, 1);
    }

    #[test]
    fn release_frames_capped_by_activation_frames() {
        let settings = TrackingSettings {
            activation_frames: 2,
            release_frames: 9,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(settings.release_frames, 2);
    }

    #[test]
    fn default_policy_is_strict() {
        assert_eq!(LandmarkPolicy::default(), LandmarkPolicy::Strict);
    }
}
