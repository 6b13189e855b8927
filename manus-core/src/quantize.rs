//! Pitch quantization: horizontal position onto an instrument's scale.

use manus_types::{Finger, Instrument, Note, PitchClass};

/// Map a normalized horizontal position to a concrete note.
///
/// The position selects a scale degree (`floor(x * len)`, clamped so x = 1.0
/// stays on the top degree); the octave is the instrument's base octave plus
/// the finger's register offset, carrying any semitone overflow past B into
/// the next octave. Total: every input produces a valid note.
pub fn quantize(x: f64, instrument: Instrument, finger: Finger) -> Note {
    let x = if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) };

    let intervals = instrument.scale().intervals();
    let degree = ((x * intervals.len() as f64) as usize).min(intervals.len() - 1);

    let semitone = instrument.root().semitone() + intervals[degree];
    let octave = instrument.base_octave() + finger.octave_offset() + (semitone / 12) as i8;

    Note::new(PitchClass::from_semitone(semitone), octave)
}
