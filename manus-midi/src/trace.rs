//! JSONL landmark-trace reading.
//!
//! One frame per line:
//!
//! ```json
//! {"t_ms": 1234.5, "hands": [[[0.41, 0.62, 0.01], ...21 points...]]}
//! ```
//!
//! `t_ms` is milliseconds since capture start. Each hand is a list of
//! `[x, y, z]` triples; hands with the wrong landmark count are kept in the
//! trace and resolved by the session's landmark policy at replay time.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use manus_core::frame_from_raw;
use manus_types::{FrameInput, Landmark, LandmarkPolicy};

/// One captured frame of tracking output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceFrame {
    /// Milliseconds since capture start.
    pub t_ms: f64,
    /// Zero or more hands, each a list of `[x, y, z]` landmark triples.
    pub hands: Vec<Vec<[f64; 3]>>,
}

impl TraceFrame {
    /// Convert to pipeline input, applying the malformed-hand policy.
    pub fn to_frame_input(&self, policy: LandmarkPolicy) -> FrameInput {
        let raw: Vec<Vec<Landmark>> = self
            .hands
            .iter()
            .map(|hand| {
                hand.iter()
                    .map(|&[x, y, z]| Landmark::new(x, y, z))
                    .collect()
            })
            .collect();
        frame_from_raw(self.timestamp(), &raw, policy)
    }

    /// Capture time as a duration since trace start. Negative or NaN
    /// timestamps collapse to zero.
    pub fn timestamp(&self) -> Duration {
        if self.t_ms.is_finite() && self.t_ms > 0.0 {
            Duration::from_secs_f64(self.t_ms / 1000.0)
        } else {
            Duration::ZERO
        }
    }
}

/// Error type for trace loading.
#[derive(Debug)]
pub enum TraceError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl From<std::io::Error> for TraceError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for TraceError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl std::fmt::Display for TraceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for TraceError {}

/// Read a whole trace file. Empty lines are skipped; a malformed line is a
/// hard error, since a broken trace should fail loudly rather than replay
/// with silent gaps.
pub fn read_trace(path: &Path) -> Result<Vec<TraceFrame>, TraceError> {
    let file = File::open(path)?;
    let mut frames = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        frames.push(serde_json::from_str(&line)?);
    }
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn full_hand() -> Vec<[f64; 3]> {
        (0..21).map(|i| [i as f64 * 0.01, 0.5, 0.0]).collect()
    }

    #[test]
    fn parse_single_frame() {
        let line = r#"{"t_ms": 33.4, "hands": [[[0.1, 0.2, 0.0]]]}"#;
        let frame: TraceFrame = serde_json::from_str(line).unwrap();
        assert!((frame.t_ms - 33.4).abs() < 1e-9);
        assert_eq!(frame.hands.len(), 1);
        assert_eq!(frame.hands[0][0], [0.1, 0.2, 0.0]);
    }

    #[test]
    fn round_trip() {
        let frame = TraceFrame {
            t_ms: 100.0,
            hands: vec![full_hand()],
        };
        let json = serde_json::to_string(&frame).unwrap();
        let back: TraceFrame = serde_json::from_str(&json).unwrap();
        assert_eq!(frame, back);
    }

    #[test]
    fn to_frame_input_respects_policy() {
        let frame = TraceFrame {
            t_ms: 50.0,
            hands: vec![full_hand(), full_hand()[..10].to_vec()],
        };
        let strict = frame.to_frame_input(LandmarkPolicy::Strict);
        assert_eq!(strict.hands.len(), 1);
        let padded = frame.to_frame_input(LandmarkPolicy::Pad);
        assert_eq!(padded.hands.len(), 2);
        assert_eq!(strict.timestamp, Duration::from_millis(50));
    }

    #[test]
    fn bogus_timestamp_collapses_to_zero() {
        let frame = TraceFrame {
            t_ms: f64::NAN,
            hands: vec![],
        };
        assert_eq!(frame.timestamp(), Duration::ZERO);
        let frame = TraceFrame {
            t_ms: -4.0,
            hands: vec![],
        };
        assert_eq!(frame.timestamp(), Duration::ZERO);
    }

    #[test]
    fn read_trace_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("take.jsonl");
        let mut file = File::create(&path).unwrap();
        writeln!(file, r#"{{"t_ms": 0.0, "hands": []}}"#).unwrap();
        writeln!(file).unwrap();
        writeln!(file, r#"{{"t_ms": 16.7, "hands": []}}"#).unwrap();

        let frames = read_trace(&path).unwrap();
        assert_eq!(frames.len(), 2);
    }

    #[test]
    fn read_trace_fails_on_malformed_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.jsonl");
        std::fs::write(&path, "{\"t_ms\": 0.0, \"hands\": []}\nnot json\n").unwrap();
        assert!(matches!(read_trace(&path), Err(TraceError::Json(_))));
    }

    #[test]
    fn read_trace_missing_file_is_io_error() {
        assert!(matches!(
            read_trace(Path::new("/nonexistent/take.jsonl")),
            Err(TraceError::Io(_))
        ));
    }
}
