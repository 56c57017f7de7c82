//! Visual-layer seam and the continuous pendulum phase.

use std::f64::consts::PI;

/// Pendulum swing either side of vertical, in degrees.
pub const MAX_ANGLE: f64 = 10.0;
/// Meters above this are shown as a counter rather than one shape per beat.
pub const MAX_SHAPE_BEATS: u32 = 8;

/// Receives what the core decided, never when to draw it.
pub trait BeatDisplay {
    /// A beat became audible. Called once per click, close to its onset.
    fn on_beat(&mut self, beat: u32, beats_per_measure: u32);

    /// Continuous pendulum angle in degrees, once per display frame.
    fn on_phase(&mut self, angle: f64);

    /// The meter changed; redraw the indicator.
    fn on_meter(&mut self, _beats_per_measure: u32) {}

    /// Playback stopped; clear highlights and return the indicator to beat 1.
    fn on_reset(&mut self, _beats_per_measure: u32) {}
}

/// Pendulum angle `elapsed` seconds into a session.
///
/// The arm sits at an extreme on every beat and crosses the centre halfway
/// between beats, one full swing per two beats.
pub fn pendulum_angle(elapsed: f64, bpm: u32) -> f64 {
    let seconds_per_beat = 60.0 / bpm.max(1) as f64;
    -MAX_ANGLE * (PI * elapsed / seconds_per_beat).cos()
}

/// Fractional position within the current beat, in [0, 1).
pub fn beat_phase(elapsed: f64, bpm: u32) -> f64 {
    let beats = elapsed.max(0.0) * bpm.max(1) as f64 / 60.0;
    beats.fract()
}

/// How the beat indicator is drawn for a meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorLayout {
    /// One shape per beat; the downbeat is drawn square, the others round
    Shapes { beats: u32 },
    /// "n / N" text
    Counter { beats: u32 },
}

impl IndicatorLayout {
    pub fn for_beats(beats: u32) -> Self {
        if beats > MAX_SHAPE_BEATS {
            IndicatorLayout::Counter { beats }
        } else {
            IndicatorLayout::Shapes { beats }
        }
    }

    /// Counter text for `beat` (zero-based).
    pub fn counter_label(&self, beat: u32) -> String {
        let beats = match self {
            IndicatorLayout::Shapes { beats } | IndicatorLayout::Counter { beats } => *beats,
        };
        format!("{} / {}", beat + 1, beats)
    }
}
