use crate::{graph::node::RenderCtx, MIN_TIME};

/*
Click Decay Envelope
====================

A metronome click is a short burst of tone that must start at full level on
an exact sample and die away quickly. There is no sustain and no gate-off:
the envelope is one-shot.

The Shape: Exponential Ramp
---------------------------

  Level
    1.0 ┐
        │╲
        │ ╲
        │  ╲__
        │     ╲___
  0.001 └─────────╲──┤→ Time (then hard silence)
        0         duration

Each sample multiplies the level by a constant factor, which is the sampled
form of an exponential ramp from 1.0 to FLOOR over `duration` seconds:

    level(n) = FLOOR ^ (n / total_samples)
    factor   = FLOOR ^ (1 / total_samples)

An exponential cannot reach zero, so the ramp ends at FLOOR (-60 dB) and the
envelope drops to silence once `total_samples` have elapsed. At -60 dB the
step is inaudible.

Example: 50 ms at 48 kHz
  - total_samples = 2400
  - factor = 0.001 ^ (1/2400) ≈ 0.99712
*/

/// Level the ramp reaches at the end of the tone (-60 dB).
pub const DECAY_FLOOR: f32 = 0.001;

/// Stage of the one-shot envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecayStage {
    Idle,     // Silent, waiting for a trigger
    Decaying, // Ramping from 1.0 toward DECAY_FLOOR
}

pub struct DecayEnvelope {
    duration: f32, // seconds from trigger to silence

    stage: DecayStage,
    level: f32,
    factor: f32,
    remaining_samples: u32,
}

impl DecayEnvelope {
    pub fn new(duration: f32) -> Self {
        Self {
            duration: duration.max(MIN_TIME),
            stage: DecayStage::Idle,
            level: 0.0,
            factor: 0.0,
            remaining_samples: 0,
        }
    }

    /// Start the ramp from full level. Retriggering mid-decay restarts it.
    ///
    /// A positive `ctx.duration` overrides the envelope's own duration.
    pub fn trigger(&mut self, ctx: &RenderCtx) {
        if ctx.duration > 0.0 {
            self.duration = ctx.duration.max(MIN_TIME);
        }
        let total = (self.duration * ctx.sample_rate).round().max(1.0) as u32;
        self.factor = DECAY_FLOOR.powf(1.0 / total as f32);
        self.level = 1.0;
        self.remaining_samples = total;
        self.stage = DecayStage::Decaying;
    }

    /// Advance by one sample and return the level for that sample.
    pub fn next_sample(&mut self) -> f32 {
        match self.stage {
            DecayStage::Idle => 0.0,
            DecayStage::Decaying => {
                let out = self.level;
                self.level *= self.factor;
                self.remaining_samples -= 1;
                if self.remaining_samples == 0 {
                    self.level = 0.0;
                    self.stage = DecayStage::Idle;
                }
                out
            }
        }
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }

    pub fn is_active(&self) -> bool {
        self.stage == DecayStage::Decaying
    }

    pub fn stage(&self) -> DecayStage {
        self.stage
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }
}
