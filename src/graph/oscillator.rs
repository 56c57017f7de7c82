use crate::dsp::oscillator::Oscillator;
use crate::graph::node::{GraphNode, RenderCtx};

/// Sine tone source for clicks, pitched by each trigger's frequency.
///
/// Every trigger restarts the waveform at phase zero, so consecutive clicks
/// at the same pitch sound identical regardless of where the previous one
/// was cut off.
pub struct OscNode {
    osc: Oscillator,
}

impl OscNode {
    pub fn sine() -> Self {
        Self {
            osc: Oscillator::sine(),
        }
    }
}

impl GraphNode for OscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.osc.render(out, ctx);
    }

    fn note_on(&mut self, _ctx: &RenderCtx) {
        self.osc.reset();
    }
}
