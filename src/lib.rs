pub mod config;
pub mod dsp;
pub mod engine; // Audio clock, tone queue and click rendering
pub mod graph; // Composable audio graph nodes
pub mod runtime; // Event loop, timers, host notifications
pub mod sequencing; // Transport, look-ahead scheduling, tempo names
pub mod voices;

pub use config::{ClickSound, MetronomeConfig};
pub use runtime::Metronome;

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
