use std::f32::consts::TAU;

use crate::graph::node::RenderCtx;

/// Sine oscillator driven by a normalized phase accumulator.
///
/// Phase lives in `[0, 1)` and wraps once per cycle, so long-running clicks
/// never lose precision the way an unbounded sample counter would.
pub struct Oscillator {
    phase: f32,
}

impl Oscillator {
    pub fn sine() -> Self {
        Self { phase: 0.0 }
    }

    /// Restart the waveform at a zero crossing.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn render(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let increment = ctx.frequency / ctx.sample_rate;
        for sample in out.iter_mut() {
            *sample = (TAU * self.phase).sin();
            self.phase += increment;
            if self.phase >= 1.0 {
                self.phase -= 1.0;
            }
        }
    }
}

impl Default for Oscillator {
    fn default() -> Self {
        Self::sine()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_sine() {
        let sample_rate = 48_000.0;
        let ctx = RenderCtx::from_freq(sample_rate, 1_000.0, 1.0);
        let mut osc = Oscillator::sine();

        let mut buffer = vec![0.0f32; 128];
        osc.render(&mut buffer, &ctx);

        // sample n should be sin(2pi f n / sr)
        let sample_index = 12;
        let expected = (TAU * ctx.frequency * sample_index as f32 / sample_rate).sin();
        let actual = buffer[sample_index];
        assert!(
            (actual - expected).abs() < 1e-4,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn reset_restarts_at_zero_crossing() {
        let ctx = RenderCtx::from_freq(48_000.0, 600.0, 1.0);
        let mut osc = Oscillator::sine();
        let mut buffer = vec![0.0f32; 37];
        osc.render(&mut buffer, &ctx);
        assert!(osc.phase() > 0.0);

        osc.reset();
        osc.render(&mut buffer[..1], &ctx);
        assert_eq!(buffer[0], 0.0);
    }
}
