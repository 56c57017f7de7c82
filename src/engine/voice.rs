use crate::graph::node::{GraphNode, RenderCtx};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Free,     // Available for allocation
    Sounding, // Envelope still running
}

/// A single click voice that can play any GraphNode
pub struct Voice<T: GraphNode> {
    frequency: f32,
    gain: f32,
    duration: f32,
    state: VoiceState,
    started_at: u64,
    sample_rate: f32,
    graph: T,
}

impl<T: GraphNode> Voice<T> {
    pub fn new(graph: T, sample_rate: f32) -> Self {
        Self {
            frequency: 0.0,
            gain: 0.0,
            duration: 0.0,
            state: VoiceState::Free,
            started_at: 0,
            sample_rate,
            graph,
        }
    }

    /// Trigger the graph. `frame` is the onset frame, used for stealing.
    pub fn start(&mut self, frequency: f32, gain: f32, duration: f32, frame: u64) {
        self.frequency = frequency;
        self.gain = gain;
        self.duration = duration;
        self.state = VoiceState::Sounding;
        self.started_at = frame;

        let ctx =
            RenderCtx::from_freq(self.sample_rate, frequency, gain).with_duration(duration);
        self.graph.note_on(&ctx);
    }

    /// Render and mix into `out`, using `scratch` as the voice's own buffer.
    pub fn render_into(&mut self, out: &mut [f32], scratch: &mut [f32]) {
        let ctx = RenderCtx::from_freq(self.sample_rate, self.frequency, self.gain)
            .with_duration(self.duration);
        let scratch = &mut scratch[..out.len()];
        self.graph.render_block(scratch, &ctx);

        for (o, v) in out.iter_mut().zip(scratch.iter()) {
            *o += v;
        }

        if !self.graph.is_active() {
            self.state = VoiceState::Free;
        }
    }

    pub fn is_free(&self) -> bool {
        self.state == VoiceState::Free
    }

    pub fn started_at(&self) -> u64 {
        self.started_at
    }
}
