//! Temporal stabilization of raw extension results.
//!
//! Landmark jitter produces single-frame confidence spikes and dips. The
//! tracker requires a run of consecutive qualifying frames before trusting a
//! transition, with asymmetric thresholds for turning on and off. This is
//! the central chatter suppressor: at 30-60Hz the default run lengths add
//! roughly 16-50ms of latency, below the perceptible threshold.

use manus_types::{FingerSlot, HandSide, TrackingSettings};

use crate::extension::Extension;

/// Per-slot run-length record. One per slot, created at session start and
/// never destroyed; reset to zero on hand loss.
#[derive(Debug, Clone, Copy, Default)]
struct SlotStability {
    consecutive: u32,
    last_confidence: f32,
    active: bool,
}

/// Hysteresis state for all 10 slots.
#[derive(Debug, Default)]
pub struct StabilityTracker {
    slots: [SlotStability; 10],
}

impl StabilityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one frame's raw extension into the slot's run length and return
    /// the stable decision.
    ///
    /// The run counts frames where the raw result is extended *and* clears
    /// the stricter stability threshold; anything else resets it to zero.
    /// An inactive slot activates at `activation_frames`; an active slot
    /// holds on while the run stays at or above `release_frames`.
    pub fn update(
        &mut self,
        slot: FingerSlot,
        extension: Extension,
        settings: &TrackingSettings,
    ) -> bool {
        let record = &mut self.slots[slot.index()];

        if extension.extended && extension.confidence > settings.stability_threshold {
            record.consecutive = record.consecutive.saturating_add(1);
        } else {
            record.consecutive = 0;
        }
        record.last_confidence = extension.confidence;

        let active = if record.active {
            record.consecutive >= settings.release_frames
        } else {
            record.consecutive >= settings.activation_frames
        };

        if active != record.active {
            log::debug!(
                target: "gesture",
                "slot {} {} (run {}, confidence {:.2})",
                slot,
                if active { "activated" } else { "released" },
                record.consecutive,
                record.last_confidence,
            );
        }
        record.active = active;
        active
    }

    /// Zero every slot of a side. Called when that hand is lost so stale
    /// run lengths cannot produce an instantly-stable trigger when the hand
    /// reappears.
    pub fn reset_side(&mut self, side: HandSide) {
        for slot in FingerSlot::ALL.iter().filter(|slot| slot.side == side) {
            self.slots[slot.index()] = SlotStability::default();
        }
    }

    /// Current run length for a slot (diagnostics and tests).
    pub fn consecutive(&self, slot: FingerSlot) -> u32 {
        self.slots[slot.index()].consecutive
    }
}
