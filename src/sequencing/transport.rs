//! Transport - musical state and the audio-domain beat clock
//!
//! The transport is a plain value: it never reads a clock itself. Callers
//! pass the current audio-clock time into the few operations that need it,
//! which keeps every transition deterministic and testable.

/// Slowest accepted tempo
pub const MIN_BPM: u32 = 1;
/// Fastest accepted tempo
pub const MAX_BPM: u32 = 600;
pub const DEFAULT_BPM: u32 = 120;

pub const MIN_BEATS: u32 = 1;
pub const MAX_BEATS: u32 = 64;
pub const DEFAULT_BEATS: u32 = 4;

/// Clamp any integer into the accepted tempo range.
pub fn clamp_tempo(bpm: i64) -> u32 {
    bpm.clamp(MIN_BPM as i64, MAX_BPM as i64) as u32
}

/// Clamp any integer into the accepted beats-per-measure range.
pub fn clamp_beats(beats: i64) -> u32 {
    beats.clamp(MIN_BEATS as i64, MAX_BEATS as i64) as u32
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transport {
    /// Tempo in beats per minute, always within [MIN_BPM, MAX_BPM]
    tempo_bpm: u32,
    /// Beats per measure, always within [MIN_BEATS, MAX_BEATS]
    beats_per_measure: u32,
    /// Beat the next scheduled event belongs to, in [0, beats_per_measure)
    current_beat: u32,
    running: bool,
    /// Audio-clock time of the next beat event (seconds)
    next_event_time: f64,
    /// Audio-clock time beat 0 of the current session began
    measure_start_time: f64,
}

impl Transport {
    pub fn new(bpm: i64, beats_per_measure: i64) -> Self {
        Self {
            tempo_bpm: clamp_tempo(bpm),
            beats_per_measure: clamp_beats(beats_per_measure),
            current_beat: 0,
            running: false,
            next_event_time: 0.0,
            measure_start_time: 0.0,
        }
    }

    pub fn tempo_bpm(&self) -> u32 {
        self.tempo_bpm
    }

    pub fn beats_per_measure(&self) -> u32 {
        self.beats_per_measure
    }

    pub fn current_beat(&self) -> u32 {
        self.current_beat
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn next_event_time(&self) -> f64 {
        self.next_event_time
    }

    pub fn measure_start_time(&self) -> f64 {
        self.measure_start_time
    }

    /// Length of one beat in seconds.
    pub fn seconds_per_beat(&self) -> f64 {
        60.0 / self.tempo_bpm as f64
    }

    /// Begin a session with beat 0 sounding at `now`.
    ///
    /// Callers must not start a running transport; doing so silently
    /// restarts the measure.
    pub fn start(&mut self, now: f64) {
        self.running = true;
        self.current_beat = 0;
        self.next_event_time = now;
        self.measure_start_time = now;
    }

    /// Stop scheduling. Beat and clock fields are left as they were.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Set the tempo, clamped. A running transport restarts at `now` so the
    /// new tempo begins on a fresh beat 0 instead of gliding.
    pub fn set_tempo(&mut self, bpm: i64, now: f64) -> u32 {
        self.tempo_bpm = clamp_tempo(bpm);
        if self.running {
            self.stop();
            self.start(now);
        }
        self.tempo_bpm
    }

    /// Step the tempo by `delta`.
    ///
    /// Stepping up by more than one from the minimum counts from zero, so
    /// coarse steps from 1 land on round numbers (1 → 5 → 10, not 1 → 6).
    pub fn nudge_tempo(&mut self, delta: i64, now: f64) -> u32 {
        let base = if delta > 1 && self.tempo_bpm == MIN_BPM {
            0
        } else {
            self.tempo_bpm as i64
        };
        self.set_tempo(base + delta, now)
    }

    /// Set the meter, clamped. Does not restart: the beat pattern can
    /// change without disturbing tempo phase.
    pub fn set_beats_per_measure(&mut self, beats: i64) -> u32 {
        self.beats_per_measure = clamp_beats(beats);
        if self.current_beat >= self.beats_per_measure {
            self.current_beat = 0;
        }
        self.beats_per_measure
    }

    pub fn nudge_beats(&mut self, delta: i64) -> u32 {
        self.set_beats_per_measure(self.beats_per_measure as i64 + delta)
    }

    /// Move to the next beat. Called only by the scheduler after it has
    /// committed the event at `next_event_time`.
    pub fn advance(&mut self) {
        self.next_event_time += self.seconds_per_beat();
        self.current_beat += 1;
        if self.current_beat >= self.beats_per_measure {
            self.current_beat = 0;
        }
    }

    /// Seconds since the session's first beat, for continuous animation.
    pub fn elapsed(&self, now: f64) -> f64 {
        (now - self.measure_start_time).max(0.0)
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::new(DEFAULT_BPM as i64, DEFAULT_BEATS as i64)
    }
}
