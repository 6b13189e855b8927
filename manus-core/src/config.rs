//! Configuration loading: embedded defaults merged with the user config.
//!
//! The embedded `config.toml` always parses (a broken build asset is a
//! programming error). A user override at `<config dir>/manus/config.toml`
//! is merged field-wise on top; a malformed user file is logged and ignored
//! rather than failing the session.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use manus_types::{HandSide, LandmarkPolicy, TrackingSettings};

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    tracking: TrackingConfig,
    #[serde(default)]
    midi: MidiConfig,
}

#[derive(Deserialize, Default)]
struct TrackingConfig {
    activation_threshold: Option<f32>,
    stability_threshold: Option<f32>,
    activation_frames: Option<u32>,
    release_frames: Option<u32>,
    finger_length: Option<f64>,
    thumb_length: Option<f64>,
    raise_margin: Option<f64>,
    thumb_raise_margin: Option<f64>,
    landmark_policy: Option<String>,
    beat_hand: Option<String>,
    default_volume: Option<f32>,
}

#[derive(Deserialize, Default)]
struct MidiConfig {
    port_hint: Option<String>,
    base_channel: Option<u8>,
}

pub struct Config {
    tracking: TrackingConfig,
    midi: MidiConfig,
}

impl Config {
    /// Load embedded defaults plus the user override, if present.
    pub fn load() -> Self {
        Self::load_with_override(user_config_path().as_deref())
    }

    /// Load with an explicit override path (tests use this directly).
    pub fn load_with_override(path: Option<&Path>) -> Self {
        let mut base: ConfigFile =
            toml::from_str(DEFAULT_CONFIG).expect("Failed to parse embedded config.toml");

        if let Some(path) = path {
            if path.exists() {
                match std::fs::read_to_string(path) {
                    Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
                        Ok(user) => {
                            merge_tracking(&mut base.tracking, user.tracking);
                            merge_midi(&mut base.midi, user.midi);
                        }
                        Err(e) => {
                            log::warn!(target: "config", "ignoring malformed config {}: {}", path.display(), e)
                        }
                    },
                    Err(e) => {
                        log::warn!(target: "config", "could not read config {}: {}", path.display(), e)
                    }
                }
            }
        }

        Config {
            tracking: base.tracking,
            midi: base.midi,
        }
    }

    /// Resolved tracking settings, clamped into their valid ranges.
    pub fn tracking(&self) -> TrackingSettings {
        let fallback = TrackingSettings::default();
        TrackingSettings {
            activation_threshold: self
                .tracking
                .activation_threshold
                .unwrap_or(fallback.activation_threshold),
            stability_threshold: self
                .tracking
                .stability_threshold
                .unwrap_or(fallback.stability_threshold),
            activation_frames: self
                .tracking
                .activation_frames
                .unwrap_or(fallback.activation_frames),
            release_frames: self
                .tracking
                .release_frames
                .unwrap_or(fallback.release_frames),
            finger_length: self.tracking.finger_length.unwrap_or(fallback.finger_length),
            thumb_length: self.tracking.thumb_length.unwrap_or(fallback.thumb_length),
            raise_margin: self.tracking.raise_margin.unwrap_or(fallback.raise_margin),
            thumb_raise_margin: self
                .tracking
                .thumb_raise_margin
                .unwrap_or(fallback.thumb_raise_margin),
            landmark_policy: self
                .tracking
                .landmark_policy
                .as_deref()
                .and_then(parse_landmark_policy)
                .unwrap_or(fallback.landmark_policy),
            beat_hand: self
                .tracking
                .beat_hand
                .as_deref()
                .and_then(parse_hand_side)
                .unwrap_or(fallback.beat_hand),
            default_volume: self
                .tracking
                .default_volume
                .unwrap_or(fallback.default_volume),
        }
        .sanitized()
    }

    /// Substring matched against MIDI port names when picking an output.
    pub fn midi_port_hint(&self) -> &str {
        self.midi.port_hint.as_deref().unwrap_or("")
    }

    /// First MIDI channel of the slot range (clamped so all 10 slots fit).
    pub fn midi_base_channel(&self) -> u8 {
        self.midi.base_channel.unwrap_or(0).min(6)
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("manus").join("config.toml"))
}

fn merge_tracking(base: &mut TrackingConfig, user: TrackingConfig) {
    if user.activation_threshold.is_some() {
        base.activation_threshold = user.activation_threshold;
    }
    if user.stability_threshold.is_some() {
        base.stability_threshold = user.stability_threshold;
    }
    if user.activation_frames.is_some() {
        base.activation_frames = user.activation_frames;
    }
    if user.release_frames.is_some() {
        base.release_frames = user.release_frames;
    }
    if user.finger_length.is_some() {
        base.finger_length = user.finger_length;
    }
    if user.thumb_length.is_some() {
        base.thumb_length = user.thumb_length;
    }
    if user.raise_margin.is_some() {
        base.raise_margin = user.raise_margin;
    }
    if user.thumb_raise_margin.is_some() {
        base.thumb_raise_margin = user.thumb_raise_margin;
    }
    if user.landmark_policy.is_some() {
        base.landmark_policy = user.landmark_policy;
    }
    if user.beat_hand.is_some() {
        base.beat_hand = user.beat_hand;
    }
    if user.default_volume.is_some() {
        base.default_volume = user.default_volume;
    }
}

fn merge_midi(base: &mut MidiConfig, user: MidiConfig) {
    if user.port_hint.is_some() {
        base.port_hint = user.port_hint;
    }
    if user.base_channel.is_some() {
        base.base_channel = user.base_channel;
    }
}

fn parse_landmark_policy(s: &str) -> Option<LandmarkPolicy> {
    match s.to_lowercase().as_str() {
        "strict" => Some(LandmarkPolicy::Strict),
        "pad" => Some(LandmarkPolicy::Pad),
        _ => None,
    }
}

fn parse_hand_side(s: &str) -> Option<HandSide> {
    match s.to_lowercase().as_str() {
        "left" => Some(HandSide::Left),
        "right" => Some(HandSide::Right),
        _ => None,
    }
}
