//! Metronome configuration with builder-style setters.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::sequencing::{
    scheduler::{LOOKAHEAD, SCHEDULE_AHEAD},
    transport::{clamp_beats, clamp_tempo, DEFAULT_BEATS, DEFAULT_BPM},
};

/// Display refresh interval for the continuous pendulum animation (~60 fps).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Synthesized click parameters
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickSound {
    /// Pitch of beat 0 (Hz)
    pub accent_hz: f32,
    /// Pitch of every other beat (Hz)
    pub regular_hz: f32,
    /// Seconds from onset to silence
    pub duration: f32,
}

impl ClickSound {
    pub fn frequency_for(&self, beat: u32) -> f32 {
        if beat == 0 {
            self.accent_hz
        } else {
            self.regular_hz
        }
    }
}

impl Default for ClickSound {
    fn default() -> Self {
        Self {
            accent_hz: 1_000.0,
            regular_hz: 600.0,
            duration: 0.05,
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct MetronomeConfig {
    /// Initial tempo, clamped to [1, 600]
    pub bpm: u32,
    /// Initial beats per measure, clamped to [1, 64]
    pub beats_per_measure: u32,
    pub click: ClickSound,
    /// Scheduler tick period
    pub lookahead: Duration,
    /// Audio-clock window committed per tick (seconds)
    pub schedule_ahead: f64,
    /// Pendulum animation period
    pub frame_interval: Duration,
}

impl MetronomeConfig {
    pub fn bpm(mut self, bpm: i64) -> Self {
        self.bpm = clamp_tempo(bpm);
        self
    }

    pub fn beats(mut self, beats: i64) -> Self {
        self.beats_per_measure = clamp_beats(beats);
        self
    }

    pub fn click(mut self, click: ClickSound) -> Self {
        self.click = click;
        self
    }

    pub fn accent_hz(mut self, hz: f32) -> Self {
        self.click.accent_hz = hz;
        self
    }

    pub fn regular_hz(mut self, hz: f32) -> Self {
        self.click.regular_hz = hz;
        self
    }
}

impl Default for MetronomeConfig {
    fn default() -> Self {
        Self {
            bpm: DEFAULT_BPM,
            beats_per_measure: DEFAULT_BEATS,
            click: ClickSound::default(),
            lookahead: LOOKAHEAD,
            schedule_ahead: SCHEDULE_AHEAD,
            frame_interval: FRAME_INTERVAL,
        }
    }
}
