use crate::{
    dsp::envelope::DecayEnvelope,
    graph::node::{GraphNode, RenderCtx},
};

/// Graph wrapper around [`DecayEnvelope`]; renders the gain curve itself.
pub struct DecayNode {
    env: DecayEnvelope,
}

impl DecayNode {
    /// Envelope lasting `duration` seconds from trigger to silence.
    pub fn click(duration: f32) -> Self {
        Self {
            env: DecayEnvelope::new(duration),
        }
    }
}

impl GraphNode for DecayNode {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        self.env.render(out);
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.env.trigger(ctx);
    }

    fn is_active(&self) -> bool {
        self.env.is_active()
    }
}
