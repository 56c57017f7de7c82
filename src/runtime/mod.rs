//! Cooperative runtime driving the metronome.
//!
//! [`Metronome`] owns the transport, the look-ahead scheduler and one
//! [`TimerQueue`]. A host loop feeds it input and host events, sleeps until
//! [`Metronome::next_deadline`], then calls [`Metronome::run_due`].
//!
//! # Example
//!
//! ```
//! use std::time::Instant;
//! use saavy_metronome::{
//!     engine::SystemClock,
//!     runtime::{BeatDisplay, Metronome, NoWakeLock},
//!     MetronomeConfig,
//! };
//! # use saavy_metronome::engine::{AudioClock, AudioEngine, EngineError, Tone};
//! # struct Silent(SystemClock);
//! # impl AudioClock for Silent { fn now(&self) -> f64 { self.0.now() } }
//! # impl AudioEngine for Silent {
//! #     fn resume(&mut self) -> Result<(), EngineError> { Ok(()) }
//! #     fn schedule_tone(&mut self, _: Tone) -> Result<(), EngineError> { Ok(()) }
//! # }
//! struct Print;
//! impl BeatDisplay for Print {
//!     fn on_beat(&mut self, beat: u32, beats: u32) { println!("{} / {}", beat + 1, beats) }
//!     fn on_phase(&mut self, _angle: f64) {}
//! }
//!
//! let config = MetronomeConfig::default().bpm(96).beats(3);
//! let mut metronome = Metronome::new(config, Silent(SystemClock::new()), Print, NoWakeLock);
//! metronome.start(Instant::now());
//! metronome.run_due(Instant::now());
//! metronome.stop();
//! ```

mod host;
mod metronome;
pub mod timer;
mod visual;

pub use host::{HostEvent, NoWakeLock, WakeLock, WakeLockError};
pub use metronome::{Metronome, Task};
pub use timer::{TimerHandle, TimerQueue};
pub use visual::{beat_phase, pendulum_angle, BeatDisplay, IndicatorLayout, MAX_ANGLE, MAX_SHAPE_BEATS};
