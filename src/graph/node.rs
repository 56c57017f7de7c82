/// Context passed to graph nodes during rendering
///
/// Contains information about what to render:
/// - sample_rate: Audio sample rate (e.g., 48000.0)
/// - frequency: Pitch to render (Hz)
/// - gain: Linear output gain (0.0-1.0)
/// - duration: Seconds a triggered tone should last (0.0 = node default)
#[derive(Debug, Clone, Copy)]
pub struct RenderCtx {
    pub sample_rate: f32,
    pub frequency: f32,
    pub gain: f32,
    pub duration: f32,
}

impl RenderCtx {
    /// Create context from a direct frequency. Metronome clicks are tuned in
    /// Hz, never by note number.
    pub fn from_freq(sample_rate: f32, frequency: f32, gain: f32) -> Self {
        Self {
            sample_rate,
            frequency,
            gain,
            duration: 0.0,
        }
    }

    pub fn with_duration(mut self, seconds: f32) -> Self {
        self.duration = seconds;
        self
    }
}

/// Core trait for audio processing graph nodes
///
/// Nodes render audio and respond to click triggers.
pub trait GraphNode: Send {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx);

    /// Triggered when a tone starts
    ///
    /// Default implementation does nothing (stateless nodes).
    fn note_on(&mut self, _ctx: &RenderCtx) {}

    /// Check if this node is still producing sound
    ///
    /// Used by the tone renderer to know when a voice can be reused.
    fn is_active(&self) -> bool {
        true
    }
}
