//! MIDI rendering of gesture events.
//!
//! Each of the 10 slots gets its own MIDI channel (base..base+9) with the
//! slot instrument's General MIDI program, so a multitimbral synth voices
//! the full hand ensemble. The sink mirrors the registry's sustain state as
//! sounding MIDI keys, because a note-off must name the key that went on.

use manus_types::{FingerSlot, GestureEvent, Instrument};

/// Backend abstraction over midir, so event bookkeeping is testable
/// without a MIDI port.
pub trait MidiOut: Send {
    fn program_change(&mut self, channel: u8, program: u8);
    fn note_on(&mut self, channel: u8, note: u8, velocity: u8);
    fn note_off(&mut self, channel: u8, note: u8);
}

struct MidirOut {
    conn: midir::MidiOutputConnection,
}

impl MidiOut for MidirOut {
    fn program_change(&mut self, channel: u8, program: u8) {
        let _ = self.conn.send(&[0xC0 | (channel & 0x0F), program]);
    }
    fn note_on(&mut self, channel: u8, note: u8, velocity: u8) {
        let _ = self.conn.send(&[0x90 | (channel & 0x0F), note, velocity]);
    }
    fn note_off(&mut self, channel: u8, note: u8) {
        let _ = self.conn.send(&[0x80 | (channel & 0x0F), note, 0]);
    }
}

/// Backend used when no MIDI port is available; events are dropped.
pub struct NullOut;

impl MidiOut for NullOut {
    fn program_change(&mut self, _channel: u8, _program: u8) {}
    fn note_on(&mut self, _channel: u8, _note: u8, _velocity: u8) {}
    fn note_off(&mut self, _channel: u8, _note: u8) {}
}

/// General MIDI program for each slot instrument.
fn gm_program(instrument: Instrument) -> u8 {
    match instrument {
        Instrument::Drums => 117,   // Melodic Tom
        Instrument::Bass => 33,     // Fingered Bass
        Instrument::Piano => 0,     // Acoustic Grand
        Instrument::Guitar => 24,   // Nylon Guitar
        Instrument::Synth => 81,    // Saw Lead
        Instrument::Marimba => 12,  // Marimba
        Instrument::Flute => 73,    // Flute
        Instrument::Harp => 46,     // Orchestral Harp
        Instrument::Violin => 40,   // Violin
        Instrument::Bells => 14,    // Tubular Bells
    }
}

/// Names of all available MIDI output ports.
pub fn list_ports() -> Vec<String> {
    let Ok(midi_out) = midir::MidiOutput::new("manus") else {
        return Vec::new();
    };
    midi_out
        .ports()
        .iter()
        .filter_map(|port| midi_out.port_name(port).ok())
        .collect()
}

/// Open a MIDI output, preferring a port whose name contains `hint`
/// (case-insensitive). Falls back to the first port, or to the null backend
/// with a warning when nothing is available.
pub fn open_output(hint: &str) -> Box<dyn MidiOut> {
    let midi_out = match midir::MidiOutput::new("manus") {
        Ok(m) => m,
        Err(e) => {
            log::warn!(target: "midi", "MIDI init failed: {} — using null output", e);
            return Box::new(NullOut);
        }
    };

    let ports = midi_out.ports();
    if ports.is_empty() {
        log::warn!(target: "midi", "no MIDI output ports found — using null output");
        return Box::new(NullOut);
    }

    let hint = hint.to_lowercase();
    let index = if hint.is_empty() {
        0
    } else {
        ports
            .iter()
            .position(|port| {
                midi_out
                    .port_name(port)
                    .map(|name| name.to_lowercase().contains(&hint))
                    .unwrap_or(false)
            })
            .unwrap_or(0)
    };

    let name = midi_out
        .port_name(&ports[index])
        .unwrap_or_else(|_| "<unknown>".into());
    match midi_out.connect(&ports[index], "manus") {
        Ok(conn) => {
            log::info!(target: "midi", "connected to {}", name);
            Box::new(MidirOut { conn })
        }
        Err(e) => {
            log::warn!(target: "midi", "could not connect to {}: {} — using null output", name, e);
            Box::new(NullOut)
        }
    }
}

/// Renders gesture events on a MIDI backend.
pub struct MidiSink {
    out: Box<dyn MidiOut>,
    base_channel: u8,
    /// MIDI key currently sounding per slot.
    sounding: [Option<u8>; 10],
}

impl MidiSink {
    pub fn new(out: Box<dyn MidiOut>, base_channel: u8) -> Self {
        let mut sink = Self {
            out,
            base_channel: base_channel.min(6),
            sounding: [None; 10],
        };
        for &slot in &FingerSlot::ALL {
            let channel = sink.channel(slot);
            sink.out
                .program_change(channel, gm_program(Instrument::for_slot(slot)));
        }
        sink
    }

    fn channel(&self, slot: FingerSlot) -> u8 {
        self.base_channel + slot.index() as u8
    }

    /// Render one frame's events. Note-offs release whatever key this slot
    /// last sounded; notes outside the MIDI range are skipped.
    pub fn handle(&mut self, events: &[GestureEvent]) {
        for event in events {
            let index = event.slot.index();
            let channel = self.channel(event.slot);
            if event.is_note_off() {
                if let Some(key) = self.sounding[index].take() {
                    self.out.note_off(channel, key);
                }
            } else if event.is_note_on() {
                let Some(key) = event.note.and_then(|note| note.to_midi()) else {
                    log::warn!(target: "midi", "slot {} produced an unplayable note", event.slot);
                    continue;
                };
                if let Some(previous) = self.sounding[index].take() {
                    self.out.note_off(channel, previous);
                }
                let velocity = (event.velocity.clamp(0.0, 1.0) * 127.0) as u8;
                self.out.note_on(channel, key, velocity);
                self.sounding[index] = Some(key);
            }
        }
    }

    /// Release everything still sounding (shutdown path).
    pub fn all_notes_off(&mut self) {
        for &slot in &FingerSlot::ALL {
            if let Some(key) = self.sounding[slot.index()].take() {
                self.out.note_off(self.channel(slot), key);
            }
        }
    }

    /// Number of currently sounding keys (diagnostics and tests).
    pub fn sounding_count(&self) -> usize {
        self.sounding.iter().filter(|key| key.is_some()).count()
    }
}

impl Drop for MidiSink {
    fn drop(&mut self) {
        self.all_notes_off();
    }
}
