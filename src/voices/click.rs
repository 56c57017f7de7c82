//! Metronome click voice.
//!
//! A pure sine burst with an exponential decay, the same shape a hardware
//! metronome's beeper produces. The pitch is supplied per trigger so one
//! voice type serves both the accented downbeat and the regular beats.
//!
//! # How It Works
//!
//! 1. Sine oscillator restarts at phase zero on every trigger
//! 2. Decay envelope drops from full level to -60 dB over the tone duration
//! 3. The voice goes inactive once the envelope is silent
//!
//! # Variations
//!
//! - Shorter duration = drier "tick"
//! - Higher pitch = cuts through louder mixes

use crate::graph::{amplify::Amplify, envelope::DecayNode, extensions::NodeExt, oscillator::OscNode};

/// Concrete node type of a click, so voice pools can hold it without boxing.
pub type Click = Amplify<OscNode, DecayNode>;

/// Create a click voice lasting `duration` seconds.
pub fn click(duration: f32) -> Click {
    OscNode::sine().amplify(DecayNode::click(duration))
}
