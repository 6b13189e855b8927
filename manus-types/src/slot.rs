//! Finger slots and their static instrument bindings.
//!
//! A slot is one of the 10 fixed (hand side × finger) combinations. Each slot
//! is permanently bound to one instrument; the binding is configuration, not
//! runtime state.

use serde::{Deserialize, Serialize};

use crate::landmark;
use crate::music::{PitchClass, Scale};

/// Which hand a slot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandSide {
    Left,
    Right,
}

impl HandSide {
    /// Processing order within a frame: left slots before right slots.
    pub const ALL: [HandSide; 2] = [HandSide::Left, HandSide::Right];

    pub fn name(&self) -> &'static str {
        match self {
            HandSide::Left => "left",
            HandSide::Right => "right",
        }
    }
}

impl std::fmt::Display for HandSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the five fingers of a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Finger::Thumb => "thumb",
            Finger::Index => "index",
            Finger::Middle => "middle",
            Finger::Ring => "ring",
            Finger::Pinky => "pinky",
        }
    }

    /// Landmark index of this finger's tip.
    pub fn tip_index(&self) -> usize {
        match self {
            Finger::Thumb => landmark::THUMB_TIP,
            Finger::Index => landmark::INDEX_TIP,
            Finger::Middle => landmark::MIDDLE_TIP,
            Finger::Ring => landmark::RING_TIP,
            Finger::Pinky => landmark::PINKY_TIP,
        }
    }

    /// Landmark index of the base the tip distance is measured against.
    /// The thumb measures from its MCP joint, the other fingers from theirs.
    pub fn base_index(&self) -> usize {
        match self {
            Finger::Thumb => landmark::THUMB_MCP,
            Finger::Index => landmark::INDEX_MCP,
            Finger::Middle => landmark::MIDDLE_MCP,
            Finger::Ring => landmark::RING_MCP,
            Finger::Pinky => landmark::PINKY_MCP,
        }
    }

    /// Octave perturbation applied on top of the instrument's base octave,
    /// so five held fingers spread into a chord-like register fan instead of
    /// stacking in unison. Thumb sits lowest, pinky highest.
    pub fn octave_offset(&self) -> i8 {
        match self {
            Finger::Thumb => -1,
            Finger::Index => 0,
            Finger::Middle => 0,
            Finger::Ring => 0,
            Finger::Pinky => 1,
        }
    }
}

impl std::fmt::Display for Finger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Compound key for one of the 10 finger slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FingerSlot {
    pub side: HandSide,
    pub finger: Finger,
}

impl FingerSlot {
    /// All 10 slots in deterministic processing order (left hand first).
    pub const ALL: [FingerSlot; 10] = [
        FingerSlot::new(HandSide::Left, Finger::Thumb),
        FingerSlot::new(HandSide::Left, Finger::Index),
        FingerSlot::new(HandSide::Left, Finger::Middle),
        FingerSlot::new(HandSide::Left, Finger::Ring),
        FingerSlot::new(HandSide::Left, Finger::Pinky),
        FingerSlot::new(HandSide::Right, Finger::Thumb),
        FingerSlot::new(HandSide::Right, Finger::Index),
        FingerSlot::new(HandSide::Right, Finger::Middle),
        FingerSlot::new(HandSide::Right, Finger::Ring),
        FingerSlot::new(HandSide::Right, Finger::Pinky),
    ];

    pub const fn new(side: HandSide, finger: Finger) -> Self {
        Self { side, finger }
    }

    /// Dense index in 0..10, stable across runs (left thumb = 0).
    pub fn index(&self) -> usize {
        let side = match self.side {
            HandSide::Left => 0,
            HandSide::Right => 5,
        };
        let finger = match self.finger {
            Finger::Thumb => 0,
            Finger::Index => 1,
            Finger::Middle => 2,
            Finger::Ring => 3,
            Finger::Pinky => 4,
        };
        side + finger
    }
}

impl std::fmt::Display for FingerSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.side, self.finger)
    }
}

/// The 10 instruments, bound 1:1 to the finger slots.
///
/// Left-hand slots carry the rhythm section, right-hand slots the melodic
/// voices. Per-instrument scale, root and base octave are compile-time
/// lookup tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instrument {
    Drums,
    Bass,
    Piano,
    Guitar,
    Synth,
    Marimba,
    Flute,
    Harp,
    Violin,
    Bells,
}

impl Instrument {
    pub const ALL: [Instrument; 10] = [
        Instrument::Drums,
        Instrument::Bass,
        Instrument::Piano,
        Instrument::Guitar,
        Instrument::Synth,
        Instrument::Marimba,
        Instrument::Flute,
        Instrument::Harp,
        Instrument::Violin,
        Instrument::Bells,
    ];

    /// The static slot → instrument binding.
    pub fn for_slot(slot: FingerSlot) -> Instrument {
        match (slot.side, slot.finger) {
            (HandSide::Left, Finger::Thumb) => Instrument::Drums,
            (HandSide::Left, Finger::Index) => Instrument::Bass,
            (HandSide::Left, Finger::Middle) => Instrument::Piano,
            (HandSide::Left, Finger::Ring) => Instrument::Guitar,
            (HandSide::Left, Finger::Pinky) => Instrument::Synth,
            (HandSide::Right, Finger::Thumb) => Instrument::Marimba,
            (HandSide::Right, Finger::Index) => Instrument::Flute,
            (HandSide::Right, Finger::Middle) => Instrument::Harp,
            (HandSide::Right, Finger::Ring) => Instrument::Violin,
            (HandSide::Right, Finger::Pinky) => Instrument::Bells,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Instrument::Drums => "Drums",
            Instrument::Bass => "Bass",
            Instrument::Piano => "Piano",
            Instrument::Guitar => "Guitar",
            Instrument::Synth => "Synth",
            Instrument::Marimba => "Marimba",
            Instrument::Flute => "Flute",
            Instrument::Harp => "Harp",
            Instrument::Violin => "Violin",
            Instrument::Bells => "Bells",
        }
    }

    /// Scale the horizontal position quantizes onto. Rhythm instruments get
    /// the single-degree unison scale.
    pub fn scale(&self) -> Scale {
        match self {
            Instrument::Drums => Scale::Unison,
            Instrument::Bass => Scale::MinorPentatonic,
            Instrument::Piano => Scale::Major,
            Instrument::Guitar => Scale::MajorPentatonic,
            Instrument::Synth => Scale::Blues,
            Instrument::Marimba => Scale::MajorPentatonic,
            Instrument::Flute => Scale::Major,
            Instrument::Harp => Scale::MajorPentatonic,
            Instrument::Violin => Scale::Major,
            Instrument::Bells => Scale::MajorPentatonic,
        }
    }

    /// Root pitch class of the instrument's scale.
    pub fn root(&self) -> PitchClass {
        match self {
            Instrument::Drums => PitchClass::C,
            Instrument::Bass => PitchClass::A,
            Instrument::Piano => PitchClass::C,
            Instrument::Guitar => PitchClass::G,
            Instrument::Synth => PitchClass::A,
            Instrument::Marimba => PitchClass::C,
            Instrument::Flute => PitchClass::C,
            Instrument::Harp => PitchClass::D,
            Instrument::Violin => PitchClass::G,
            Instrument::Bells => PitchClass::C,
        }
    }

    /// Base octave for the instrument family; bass voices sit low, bright
    /// melodic voices high. Finger offsets perturb this further.
    pub fn base_octave(&self) -> i8 {
        match self {
            Instrument::Drums => 2,
            Instrument::Bass => 1,
            Instrument::Piano => 3,
            Instrument::Guitar => 3,
            Instrument::Synth => 4,
            Instrument::Marimba => 3,
            Instrument::Flute => 5,
            Instrument::Harp => 4,
            Instrument::Violin => 4,
            Instrument::Bells => 5,
        }
    }
}

impl std::fmt::Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ten_slots_with_dense_indices() {
        let indices: Vec<usize> = FingerSlot::ALL.iter().map(|s| s.index()).collect();
        assert_eq!(indices, (0..10).collect::<Vec<usize>>());
    }

    #[test]
    fn left_slots_precede_right_slots() {
        assert!(FingerSlot::ALL[..5]
            .iter()
            .all(|s| s.side == HandSide::Left));
        assert!(FingerSlot::ALL[5..]
            .iter()
            .all(|s| s.side == HandSide::Right));
    }

    #[test]
    fn slot_display_names() {
        assert_eq!(
            FingerSlot::new(HandSide::Left, Finger::Thumb).to_string(),
            "left_thumb"
        );
        assert_eq!(
            FingerSlot::new(HandSide::Right, Finger::Pinky).to_string(),
            "right_pinky"
        );
    }

    #[test]
    fn slot_instrument_binding_is_bijective() {
        let bound: HashSet<Instrument> =
            FingerSlot::ALL.iter().map(|&s| Instrument::for_slot(s)).collect();
        assert_eq!(bound.len(), 10);
    }

    #[test]
    fn left_thumb_is_drums() {
        let slot = FingerSlot::new(HandSide::Left, Finger::Thumb);
        assert_eq!(Instrument::for_slot(slot), Instrument::Drums);
    }

    #[test]
    fn rhythm_slot_has_unison_scale() {
        assert_eq!(Instrument::Drums.scale(), Scale::Unison);
        assert_eq!(Instrument::Drums.scale().intervals(), &[0]);
    }

    #[test]
    fn thumb_and_pinky_registers_differ() {
        assert!(Finger::Thumb.octave_offset() < Finger::Pinky.octave_offset());
    }

    #[test]
    fn tip_indices_match_landmark_convention() {
        let tips: Vec<usize> = Finger::ALL.iter().map(|f| f.tip_index()).collect();
        assert_eq!(tips, vec![4, 8, 12, 16, 20]);
    }

    #[test]
    fn instrument_names_unique() {
        let names: HashSet<&str> = Instrument::ALL.iter().map(|i| i.name()).collect();
        assert_eq!(names.len(), 10);
    }
}
