//! Musical pitch types: pitch classes, scale tables and concrete notes.

use serde::{Deserialize, Serialize};

/// Musical pitch class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PitchClass {
    C,
    Cs,
    D,
    Ds,
    E,
    F,
    Fs,
    G,
    Gs,
    A,
    As,
    B,
}

impl PitchClass {
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::Cs,
        PitchClass::D,
        PitchClass::Ds,
        PitchClass::E,
        PitchClass::F,
        PitchClass::Fs,
        PitchClass::G,
        PitchClass::Gs,
        PitchClass::A,
        PitchClass::As,
        PitchClass::B,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::Cs => "C#",
            PitchClass::D => "D",
            PitchClass::Ds => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::Fs => "F#",
            PitchClass::G => "G",
            PitchClass::Gs => "G#",
            PitchClass::A => "A",
            PitchClass::As => "A#",
            PitchClass::B => "B",
        }
    }

    /// Semitone offset from C in 0..12.
    pub fn semitone(&self) -> i32 {
        match self {
            PitchClass::C => 0,
            PitchClass::Cs => 1,
            PitchClass::D => 2,
            PitchClass::Ds => 3,
            PitchClass::E => 4,
            PitchClass::F => 5,
            PitchClass::Fs => 6,
            PitchClass::G => 7,
            PitchClass::Gs => 8,
            PitchClass::A => 9,
            PitchClass::As => 10,
            PitchClass::B => 11,
        }
    }

    /// Pitch class for an arbitrary semitone count (wraps modulo 12).
    pub fn from_semitone(semitone: i32) -> PitchClass {
        PitchClass::ALL[semitone.rem_euclid(12) as usize]
    }
}

impl std::fmt::Display for PitchClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Scale definition as semitone intervals from the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scale {
    /// Single repeated pitch, used by the rhythm slots.
    Unison,
    Major,
    MajorPentatonic,
    MinorPentatonic,
    Blues,
}

impl Scale {
    pub const ALL: [Scale; 5] = [
        Scale::Unison,
        Scale::Major,
        Scale::MajorPentatonic,
        Scale::MinorPentatonic,
        Scale::Blues,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Scale::Unison => "Unison",
            Scale::Major => "Major",
            Scale::MajorPentatonic => "Major Pentatonic",
            Scale::MinorPentatonic => "Minor Pentatonic",
            Scale::Blues => "Blues",
        }
    }

    /// Semitone intervals from root for this scale.
    pub fn intervals(&self) -> &'static [i32] {
        match self {
            Scale::Unison => &[0],
            Scale::Major => &[0, 2, 4, 5, 7, 9, 11],
            Scale::MajorPentatonic => &[0, 2, 4, 7, 9],
            Scale::MinorPentatonic => &[0, 3, 5, 7, 10],
            Scale::Blues => &[0, 3, 5, 6, 7, 10],
        }
    }

}

/// A concrete note: pitch class plus octave, displayed as e.g. `C4` or `F#3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Note {
    pub pitch_class: PitchClass,
    pub octave: i8,
}

impl Note {
    pub fn new(pitch_class: PitchClass, octave: i8) -> Self {
        Self { pitch_class, octave }
    }

    /// MIDI note number, or `None` when the note falls outside 0..=127.
    /// C4 maps to 60 (the common middle-C convention).
    pub fn to_midi(&self) -> Option<u8> {
        let value = (self.octave as i32 + 1) * 12 + self.pitch_class.semitone();
        if (0..=127).contains(&value) {
            Some(value as u8)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Note {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.pitch_class, self.octave)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn pitch_class_semitones_cover_octave() {
        let semitones: Vec<i32> = PitchClass::ALL.iter().map(|p| p.semitone()).collect();
        assert_eq!(semitones, (0..12).collect::<Vec<i32>>());
    }

    #[test]
    fn from_semitone_wraps() {
        assert_eq!(PitchClass::from_semitone(0), PitchClass::C);
        assert_eq!(PitchClass::from_semitone(12), PitchClass::C);
        assert_eq!(PitchClass::from_semitone(14), PitchClass::D);
        assert_eq!(PitchClass::from_semitone(-1), PitchClass::B);
    }

    #[test]
    fn scale_names_unique() {
        let names: HashSet<&str> = Scale::ALL.iter().map(|s| s.name()).collect();
        assert_eq!(names.len(), Scale::ALL.len());
    }

    #[test]
    fn unison_has_one_degree() {
        assert_eq!(Scale::Unison.intervals().len(), 1);
    }

    #[test]
    fn pentatonic_scales_have_five_degrees() {
        assert_eq!(Scale::MajorPentatonic.intervals().len(), 5);
        assert_eq!(Scale::MinorPentatonic.intervals().len(), 5);
    }

    #[test]
    fn note_display() {
        assert_eq!(Note::new(PitchClass::C, 4).to_string(), "C4");
        assert_eq!(Note::new(PitchClass::Fs, 3).to_string(), "F#3");
    }

    #[test]
    fn middle_c_is_midi_60() {
        assert_eq!(Note::new(PitchClass::C, 4).to_midi(), Some(60));
    }

    #[test]
    fn midi_out_of_range_is_none() {
        assert_eq!(Note::new(PitchClass::C, 11).to_midi(), None);
        assert_eq!(Note::new(PitchClass::B, -2).to_midi(), None);
    }
}
