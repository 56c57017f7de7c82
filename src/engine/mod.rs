//! Audio engine seam.
//!
//! The control side hands [`Tone`]s to an [`AudioEngine`]; the audio thread
//! renders them with a [`ToneRenderer`]. Both sides share one monotonic
//! [`AudioClock`] so a tone's `start_time` means the same instant everywhere.

pub mod clock;
pub mod renderer;
pub mod voice;

pub use clock::{AudioClock, FrameClock, SystemClock};
pub use renderer::{tone_channel, ToneRenderer, ToneSender, MAX_VOICES, TONE_QUEUE_SIZE};

/// A single click to be played at an exact audio-clock time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Pitch in Hz
    pub frequency: f32,
    /// Audio-clock time (seconds) of the first sample
    pub start_time: f64,
    /// Seconds from onset to silence
    pub duration: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("audio engine is not initialized")]
    NotInitialized,
    #[error("audio engine is suspended")]
    Suspended,
    #[error("tone queue is full")]
    QueueFull,
    #[error("audio device error: {0}")]
    Device(String),
}

/// Sink for scheduled tones.
///
/// Scheduling is fire-and-forget: a rejected tone is simply not played and
/// nothing is retried.
pub trait AudioEngine: AudioClock {
    /// Lazily initialize or resume output. Must be cheap when already running.
    fn resume(&mut self) -> Result<(), EngineError>;

    fn schedule_tone(&mut self, tone: Tone) -> Result<(), EngineError>;
}
