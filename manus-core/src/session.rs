//! The per-frame pipeline driver.
//!
//! A [`Session`] owns the only mutable pipeline state: the stability
//! tracker, the sustained-note registry and the beat estimator. Each call to
//! [`Session::process_frame`] runs one frame to completion — detection,
//! stabilization, registry updates, tempo and volume derivation — before
//! returning, so there is never concurrent mutation of gesture state.

use std::time::Duration;

use manus_types::{
    Finger, FingerSlot, FrameInput, FrameOutput, Hand, HandInput, HandSide, Instrument, Landmark,
    LandmarkPolicy, TrackingSettings,
};

use crate::assign::assign_sides;
use crate::beat::BeatEstimator;
use crate::extension::detect_extension;
use crate::quantize::quantize;
use crate::registry::NoteRegistry;
use crate::stability::StabilityTracker;

/// Softest strike a confirmed gesture can produce; confidence scales the rest.
const VELOCITY_FLOOR: f32 = 0.4;

/// Build a [`FrameInput`] from raw per-hand landmark lists, applying the
/// configured malformed-hand policy. Under [`LandmarkPolicy::Strict`] a hand
/// with the wrong landmark count is skipped for this frame; under
/// [`LandmarkPolicy::Pad`] short hands are padded by repeating their last
/// point. Either way the frame itself is always produced — malformed input
/// degrades to fewer hands, never to an error.
pub fn frame_from_raw(
    timestamp: Duration,
    raw_hands: &[Vec<Landmark>],
    policy: LandmarkPolicy,
) -> FrameInput {
    let mut hands = Vec::with_capacity(raw_hands.len().min(2));
    for raw in raw_hands {
        let converted = match policy {
            LandmarkPolicy::Strict => Hand::from_landmarks(raw),
            LandmarkPolicy::Pad => Hand::from_landmarks_padded(raw),
        };
        match converted {
            Ok(hand) => hands.push(hand),
            Err(e) => {
                log::warn!(target: "frame", "dropping malformed hand: {}", e);
            }
        }
    }
    FrameInput::new(timestamp, hands)
}

/// One gesture session: all pipeline state plus its settings.
pub struct Session {
    settings: TrackingSettings,
    tracker: StabilityTracker,
    registry: NoteRegistry,
    beat: BeatEstimator,
    /// Which sides were tracked last frame; a present-to-absent edge
    /// triggers the full-hand release sweep exactly once.
    side_present: [bool; 2],
}

impl Session {
    pub fn new(settings: TrackingSettings) -> Self {
        Self {
            settings: settings.sanitized(),
            tracker: StabilityTracker::new(),
            registry: NoteRegistry::new(),
            beat: BeatEstimator::new(),
            side_present: [false; 2],
        }
    }

    /// Session with the built-in default thresholds.
    pub fn with_defaults() -> Self {
        Self::new(TrackingSettings::default())
    }

    pub fn settings(&self) -> &TrackingSettings {
        &self.settings
    }

    /// Run the full pipeline for one frame.
    ///
    /// Sides are processed in fixed left-then-right order and fingers in
    /// anatomical order, so the event list is deterministic for identical
    /// input. Losing a side releases all five of its slots in that frame
    /// and zeroes its stability runs; reappearing later starts completely
    /// fresh.
    pub fn process_frame(&mut self, input: &FrameInput) -> FrameOutput {
        let hands = &input.hands[..input.hands.len().min(2)];
        let sides = assign_sides(hands);
        let mut events = Vec::new();

        for (side_index, side) in HandSide::ALL.into_iter().enumerate() {
            match sides.get(side) {
                HandInput::Absent => {
                    if self.side_present[side_index] {
                        // Lost tracking: release every slot on this side in
                        // this frame and zero its stability runs so
                        // reappearance starts completely fresh.
                        self.registry.release_side(side, &mut events);
                        self.tracker.reset_side(side);
                    }
                    self.side_present[side_index] = false;
                }
                HandInput::Present(hand) => {
                    self.side_present[side_index] = true;
                    for finger in Finger::ALL {
                        self.process_slot(FingerSlot::new(side, finger), hand, input.timestamp, &mut events);
                    }
                }
            }
        }

        // The estimator survives dropouts untouched, but a BPM is only
        // reported on frames where the conducting hand is actually tracked.
        let bpm = match sides.get(self.settings.beat_hand) {
            HandInput::Present(hand) => {
                self.beat.observe(hand.wrist().y, input.timestamp);
                self.beat.bpm()
            }
            HandInput::Absent => None,
        };

        FrameOutput {
            events,
            bpm,
            volume: derive_volume(&sides, &self.settings),
            hands_detected: hands.len(),
        }
    }

    fn process_slot(
        &mut self,
        slot: FingerSlot,
        hand: &Hand,
        now: Duration,
        events: &mut Vec<manus_types::GestureEvent>,
    ) {
        let extension = detect_extension(hand, slot.finger, &self.settings);
        let active = self.tracker.update(slot, extension, &self.settings);

        if active {
            let x = hand.point(slot.finger.tip_index()).x;
            let note = quantize(x, Instrument::for_slot(slot), slot.finger);
            let velocity = VELOCITY_FLOOR + (1.0 - VELOCITY_FLOOR) * extension.confidence;
            self.registry.note_on(slot, note, velocity, now, events);
        } else {
            self.registry.note_off(slot, events);
        }
    }
}

/// Continuous intensity from average hand height (wrists high in the frame
/// mean loud; y grows downward). Falls back to the configured default when
/// no hands are tracked.
fn derive_volume(sides: &crate::assign::SidePair, settings: &TrackingSettings) -> f32 {
    let mut sum = 0.0;
    let mut count = 0;
    for side in HandSide::ALL {
        if let Some(hand) = sides.get(side).hand() {
            sum += 1.0 - hand.wrist().y;
            count += 1;
        }
    }
    if count == 0 {
        settings.default_volume
    } else {
        ((sum / count as f64) as f32).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use manus_types::landmark;

    fn empty_frame(ms: u64) -> FrameInput {
        FrameInput::new(Duration::from_millis(ms), vec![])
    }

    fn flat_hand(x: f64, wrist_y: f64) -> Hand {
        let mut points = [Landmark::new(x, wrist_y, 0.0); landmark::LANDMARK_COUNT];
        // Knuckle row slightly above the wrist, tips curled below the bases.
        for finger in Finger::ALL {
            points[finger.base_index()] = Landmark::new(x, wrist_y - 0.2, 0.0);
            points[finger.tip_index()] = Landmark::new(x, wrist_y - 0.15, 0.0);
        }
        Hand::from_landmarks(&points).unwrap()
    }

    #[test]
    fn empty_frame_reports_defaults() {
        let mut session = Session::with_defaults();
        let output = session.process_frame(&empty_frame(0));
        assert!(output.events.is_empty());
        assert_eq!(output.bpm, None);
        assert_eq!(output.volume, session.settings().default_volume);
        assert_eq!(output.hands_detected, 0);
    }

    #[test]
    fn curled_hand_emits_nothing() {
        let mut session = Session::with_defaults();
        let frame = FrameInput::new(Duration::ZERO, vec![flat_hand(0.3, 0.8)]);
        let output = session.process_frame(&frame);
        assert!(output.events.is_empty());
        assert_eq!(output.hands_detected, 1);
    }

    #[test]
    fn volume_follows_hand_height() {
        let mut session = Session::with_defaults();
        let low = session.process_frame(&FrameInput::new(
            Duration::ZERO,
            vec![flat_hand(0.3, 0.9)],
        ));
        let high = session.process_frame(&FrameInput::new(
            Duration::from_millis(16),
            vec![flat_hand(0.3, 0.2)],
        ));
        assert!(high.volume > low.volume);
        assert!((high.volume - 0.8).abs() < 1e-6);
    }

    #[test]
    fn frame_from_raw_strict_drops_malformed() {
        let good = vec![Landmark::new(0.3, 0.5, 0.0); landmark::LANDMARK_COUNT];
        let bad = vec![Landmark::new(0.7, 0.5, 0.0); 7];
        let frame = frame_from_raw(
            Duration::ZERO,
            &[good.clone(), bad.clone()],
            LandmarkPolicy::Strict,
        );
        assert_eq!(frame.hands.len(), 1);

        let frame = frame_from_raw(Duration::ZERO, &[good, bad], LandmarkPolicy::Pad);
        assert_eq!(frame.hands.len(), 2);
    }

    #[test]
    fn frame_from_raw_pad_still_rejects_empty() {
        let frame = frame_from_raw(Duration::ZERO, &[vec![]], LandmarkPolicy::Pad);
        assert!(frame.hands.is_empty());
    }
}
