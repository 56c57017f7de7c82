//! What the screen shows, updated by the metronome as a [`BeatDisplay`]

use std::time::{Duration, Instant};

use saavy_metronome::runtime::{BeatDisplay, IndicatorLayout};

/// How long the tempo readout flashes after a click
const PULSE: Duration = Duration::from_millis(100);
/// How long the ripple takes to spread from the pivot
const RIPPLE: Duration = Duration::from_millis(300);

pub struct UiState {
    pub layout: IndicatorLayout,
    /// Beat last heard, `None` while stopped
    pub active_beat: Option<u32>,
    /// Pendulum angle in degrees
    pub angle: f64,
    pulse_until: Option<Instant>,
    ripple_from: Option<Instant>,
}

impl UiState {
    pub fn new(beats_per_measure: u32) -> Self {
        Self {
            layout: IndicatorLayout::for_beats(beats_per_measure),
            active_beat: None,
            angle: 0.0,
            pulse_until: None,
            ripple_from: None,
        }
    }

    pub fn is_pulsing(&self, now: Instant) -> bool {
        self.pulse_until.is_some_and(|until| now < until)
    }

    /// How far the last beat's ripple has spread, in `[0, 1)`, or `None`
    /// once it has faded.
    pub fn ripple(&self, now: Instant) -> Option<f64> {
        let from = self.ripple_from?;
        let progress = now.saturating_duration_since(from).as_secs_f64() / RIPPLE.as_secs_f64();
        (progress < 1.0).then_some(progress)
    }
}

impl BeatDisplay for UiState {
    fn on_beat(&mut self, beat: u32, beats_per_measure: u32) {
        if beat >= beats_per_measure {
            // Committed before the meter shrank
            return;
        }
        let now = Instant::now();
        self.active_beat = Some(beat);
        self.pulse_until = Some(now + PULSE);
        self.ripple_from = Some(now);
    }

    fn on_phase(&mut self, angle: f64) {
        self.angle = angle;
    }

    fn on_meter(&mut self, beats_per_measure: u32) {
        self.layout = IndicatorLayout::for_beats(beats_per_measure);
        if self.active_beat.is_some_and(|beat| beat >= beats_per_measure) {
            self.active_beat = None;
        }
    }

    fn on_reset(&mut self, beats_per_measure: u32) {
        self.layout = IndicatorLayout::for_beats(beats_per_measure);
        self.active_beat = None;
        self.angle = 0.0;
        self.pulse_until = None;
        self.ripple_from = None;
    }
}
