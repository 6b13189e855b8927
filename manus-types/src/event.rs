//! Frame input/output and the gesture events emitted per frame.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::landmark::Hand;
use crate::music::Note;
use crate::slot::FingerSlot;

/// One gesture event for one slot.
///
/// * `active && !sustained` — a note just started on this slot.
/// * `active && sustained` — the slot's note is still held (no retrigger).
/// * `!active` — the slot's note was released; `note` is `None`.
///
/// Per transition, exactly one start event and one release event are emitted;
/// continuation events repeat each frame while the gesture is held so
/// cosmetic consumers (particles, UI) can track live gestures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureEvent {
    pub slot: FingerSlot,
    pub active: bool,
    pub note: Option<Note>,
    pub velocity: f32,
    pub sustained: bool,
}

impl GestureEvent {
    /// True when downstream audio should trigger a new note.
    pub fn is_note_on(&self) -> bool {
        self.active && !self.sustained
    }

    /// True when downstream audio should stop this slot's note.
    pub fn is_note_off(&self) -> bool {
        !self.active
    }
}

/// One frame of tracking input. `timestamp` is time since session start;
/// the hand list carries zero, one or two hands (extras are ignored).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    pub timestamp: Duration,
    pub hands: Vec<Hand>,
}

impl FrameInput {
    pub fn new(timestamp: Duration, hands: Vec<Hand>) -> Self {
        Self { timestamp, hands }
    }
}

/// Everything the pipeline derives from one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameOutput {
    /// Slot events in deterministic slot order (left hand first).
    pub events: Vec<GestureEvent>,
    /// Conducting tempo, absent until two beats have been observed.
    pub bpm: Option<f32>,
    /// Continuous intensity control in [0,1], from average hand height.
    pub volume: f32,
    /// Hand count seen this frame; hosts surface this as a status indicator.
    pub hands_detected: usize,
}

impl FrameOutput {
    /// Events that start a note this frame.
    pub fn note_ons(&self) -> impl Iterator<Item = &GestureEvent> {
        self.events.iter().filter(|e| e.is_note_on())
    }

    /// Events that release a note this frame.
    pub fn note_offs(&self) -> impl Iterator<Item = &GestureEvent> {
        self.events.iter().filter(|e| e.is_note_off())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::{Note, PitchClass};
    use crate::slot::{Finger, HandSide};

    fn slot() -> FingerSlot {
        FingerSlot::new(HandSide::Left, Finger::Index)
    }

    #[test]
    fn start_event_is_note_on() {
        let event = GestureEvent {
            slot: slot(),
            active: true,
            note: Some(Note::new(PitchClass::C, 4)),
            velocity: 0.8,
            sustained: false,
        };
        assert!(event.is_note_on());
        assert!(!event.is_note_off());
    }

    #[test]
    fn continuation_event_is_neither() {
        let event = GestureEvent {
            slot: slot(),
            active: true,
            note: Some(Note::new(PitchClass::C, 4)),
            velocity: 0.8,
            sustained: true,
        };
        assert!(!event.is_note_on());
        assert!(!event.is_note_off());
    }

    #[test]
    fn release_event_is_note_off() {
        let event = GestureEvent {
            slot: slot(),
            active: false,
            note: None,
            velocity: 0.0,
            sustained: false,
        };
        assert!(event.is_note_off());
        assert!(!event.is_note_on());
    }
}
