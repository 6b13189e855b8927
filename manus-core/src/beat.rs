//! Conducting-tempo estimation from periodic vertical wrist motion.
//!
//! A beat fires on a down-to-up reversal of the tracked wrist: the upward
//! rebound after a conductor's downbeat has a sharper, more repeatable snap
//! than the downstroke itself. Inter-beat intervals feed a short sliding
//! window; the BPM is recomputed from the window mean on every beat.

use std::collections::VecDeque;
use std::time::Duration;

/// Sliding-window depth for inter-beat intervals.
const INTERVAL_WINDOW: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Vertical {
    Up,
    Down,
}

/// Direction-reversal beat detector for one hand's wrist.
///
/// Created once at session start. When the tracked hand drops out the state
/// is left untouched, so a brief tracking gap does not restart the tempo
/// estimate from scratch.
#[derive(Debug, Default)]
pub struct BeatEstimator {
    last_y: Option<f64>,
    last_direction: Option<Vertical>,
    last_beat: Option<Duration>,
    /// Recent inter-beat intervals in milliseconds, oldest first.
    intervals: VecDeque<f64>,
}

impl BeatEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame's wrist height. Returns true when this frame completed
    /// a beat (down-to-up reversal).
    ///
    /// `y` is in normalized camera coordinates, growing downward: a negative
    /// delta means the hand moved up. A zero delta keeps the previous
    /// direction and can never complete a reversal.
    pub fn observe(&mut self, y: f64, now: Duration) -> bool {
        let previous = match self.last_y.replace(y) {
            Some(previous) => previous,
            None => return false,
        };

        let delta = y - previous;
        let direction = if delta < 0.0 {
            Vertical::Up
        } else if delta > 0.0 {
            Vertical::Down
        } else {
            return false;
        };

        let beat = self.last_direction == Some(Vertical::Down) && direction == Vertical::Up;
        self.last_direction = Some(direction);
        if !beat {
            return false;
        }

        if let Some(last_beat) = self.last_beat {
            let interval_ms = now.saturating_sub(last_beat).as_secs_f64() * 1000.0;
            if self.intervals.len() == INTERVAL_WINDOW {
                self.intervals.pop_front();
            }
            self.intervals.push_back(interval_ms);
            log::debug!(
                target: "beat",
                "beat at {:?}, interval {:.0}ms, bpm {:?}",
                now,
                interval_ms,
                self.bpm(),
            );
        }
        self.last_beat = Some(now);
        true
    }

    /// Estimated tempo, absent until at least two beats have been observed.
    pub fn bpm(&self) -> Option<f32> {
        if self.intervals.is_empty() {
            return None;
        }
        let mean_ms = self.intervals.iter().sum::<f64>() / self.intervals.len() as f64;
        if mean_ms <= 0.0 {
            return None;
        }
        Some((60_000.0 / mean_ms) as f32)
    }

    /// Number of recorded inter-beat intervals (diagnostics and tests).
    pub fn interval_count(&self) -> usize {
        self.intervals.len()
    }
}
