//! # manus-midi
//!
//! Host-side collaborator for the manus pipeline: replays recorded
//! hand-landmark traces (JSONL, one frame per line) through a
//! [`manus_core::Session`] and renders the resulting gesture events as
//! real-time MIDI.
//!
//! Trace capture is the host application's job; any tracker that can dump
//! its per-frame landmark lists with timestamps produces a playable file.

pub mod sink;
pub mod trace;

pub use sink::{open_output, MidiSink};
pub use trace::{read_trace, TraceError, TraceFrame};
