//! # manus-core
//!
//! The gesture recognition and stabilization pipeline: per-finger extension
//! detection, temporal hysteresis, sustained-note bookkeeping, pitch
//! quantization, and conducting-tempo estimation.
//!
//! The entry point is [`Session`]: feed it one [`FrameInput`] per rendering
//! frame and consume the returned [`FrameOutput`]. The session owns all
//! mutable pipeline state; processing is synchronous and completes before
//! the next frame.
//!
//! ```
//! use std::time::Duration;
//! use manus_core::Session;
//! use manus_types::FrameInput;
//!
//! let mut session = Session::with_defaults();
//! let output = session.process_frame(&FrameInput::new(Duration::ZERO, vec![]));
//! assert_eq!(output.hands_detected, 0);
//! ```
//!
//! [`FrameInput`]: manus_types::FrameInput
//! [`FrameOutput`]: manus_types::FrameOutput

pub mod assign;
pub mod beat;
pub mod config;
pub mod extension;
pub mod quantize;
pub mod registry;
pub mod session;
pub mod stability;

pub use assign::{assign_sides, SidePair};
pub use beat::BeatEstimator;
pub use config::Config;
pub use extension::{detect_extension, Extension};
pub use quantize::quantize;
pub use registry::{NoteRegistry, SustainedNote};
pub use session::{frame_from_raw, Session};
pub use stability::StabilityTracker;
