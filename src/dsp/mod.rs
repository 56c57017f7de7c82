//! Low-level DSP primitives used by the higher level graph nodes.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! embed directly inside click voices. They stay focused on the signal math so
//! graph nodes can layer note events and gain on top.

/// One-shot exponential decay envelope for percussive clicks.
pub mod envelope;
/// Phase-accumulating sine oscillator.
pub mod oscillator;

pub use envelope::DecayStage;
