//! Sustained-note bookkeeping.
//!
//! Tracks the note currently sounding on each slot so that a held gesture
//! does not retrigger every frame, a pitch change replaces cleanly, and a
//! lost hand releases everything it was holding. Transition events are
//! pushed into the caller's frame event list; continuation events are
//! emitted for held notes so cosmetic consumers can follow live gestures.

use std::time::Duration;

use manus_types::{FingerSlot, GestureEvent, HandSide, Note};

/// The note currently held by one slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SustainedNote {
    pub note: Note,
    pub velocity: f32,
    pub started_at: Duration,
}

/// Monophonic per-slot sustain map. At most one note per slot.
#[derive(Debug, Default)]
pub struct NoteRegistry {
    slots: [Option<SustainedNote>; 10],
}

impl NoteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start, continue, or replace the note on `slot`.
    ///
    /// Same note already held: no-op apart from a continuation event — this
    /// is the idempotence that prevents per-frame retriggering. A different
    /// note implicitly releases the old one first (monophonic per slot).
    pub fn note_on(
        &mut self,
        slot: FingerSlot,
        note: Note,
        velocity: f32,
        now: Duration,
        events: &mut Vec<GestureEvent>,
    ) {
        match self.slots[slot.index()] {
            Some(current) if current.note == note => {
                events.push(GestureEvent {
                    slot,
                    active: true,
                    note: Some(note),
                    velocity: current.velocity,
                    sustained: true,
                });
            }
            Some(current) => {
                log::debug!(
                    target: "notes",
                    "slot {} replaces {} with {}",
                    slot,
                    current.note,
                    note,
                );
                events.push(release_event(slot));
                self.start(slot, note, velocity, now, events);
            }
            None => {
                self.start(slot, note, velocity, now, events);
            }
        }
    }

    /// Release the note on `slot`, if any.
    pub fn note_off(&mut self, slot: FingerSlot, events: &mut Vec<GestureEvent>) {
        if let Some(current) = self.slots[slot.index()].take() {
            log::debug!(target: "notes", "slot {} stops {}", slot, current.note);
            events.push(release_event(slot));
        }
    }

    /// Cancellation path for lost hand tracking: every slot on `side` gets
    /// a release event, whether or not it was sounding. The caller invokes
    /// this once per loss, on the present-to-absent transition.
    pub fn release_side(&mut self, side: HandSide, events: &mut Vec<GestureEvent>) {
        for &slot in FingerSlot::ALL.iter().filter(|slot| slot.side == side) {
            if let Some(current) = self.slots[slot.index()].take() {
                log::debug!(target: "notes", "slot {} cut off at {}", slot, current.note);
            }
            events.push(release_event(slot));
        }
    }

    /// The note currently held by `slot`, if any.
    pub fn sustained(&self, slot: FingerSlot) -> Option<&SustainedNote> {
        self.slots[slot.index()].as_ref()
    }

    /// Number of slots currently sounding.
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    fn start(
        &mut self,
        slot: FingerSlot,
        note: Note,
        velocity: f32,
        now: Duration,
        events: &mut Vec<GestureEvent>,
    ) {
        log::debug!(target: "notes", "slot {} starts {} vel {:.2}", slot, note, velocity);
        self.slots[slot.index()] = Some(SustainedNote {
            note,
            velocity,
            started_at: now,
        });
        events.push(GestureEvent {
            slot,
            active: true,
            note: Some(note),
            velocity,
            sustained: false,
        });
    }
}

fn release_event(slot: FingerSlot) -> GestureEvent {
    GestureEvent {
        slot,
        active: false,
        note: None,
        velocity: 0.0,
        sustained: false,
    }
}
