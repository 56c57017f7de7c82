//! Tone renderer - sample-accurate click playback
//!
//! The renderer runs in the audio thread. It receives [`Tone`]s through a
//! lock-free ring buffer, holds them until their start frame falls inside
//! the block being rendered, and splits the block exactly at that frame so
//! each click begins on the sample the scheduler asked for.

use rtrb::{Consumer, Producer, RingBuffer};

use super::{
    clock::{AudioClock, FrameClock},
    voice::Voice,
    AudioEngine, EngineError, Tone,
};
use crate::{
    voices::{self, Click},
    MAX_BLOCK_SIZE,
};

/// Capacity of the control → audio tone queue.
pub const TONE_QUEUE_SIZE: usize = 256;
/// Clicks that may ring at once. At 600 BPM a 50 ms click overlaps at most one
/// other; the rest is headroom for long tone durations.
pub const MAX_VOICES: usize = 8;

/// Envelope length a voice is built with; each tone overrides it.
pub(crate) const DEFAULT_VOICE_DURATION: f32 = 0.05;

/// Create a connected sender/renderer pair sharing `clock`.
pub fn tone_channel(clock: FrameClock) -> (ToneSender, ToneRenderer) {
    let (tx, rx) = RingBuffer::<Tone>::new(TONE_QUEUE_SIZE);
    let sender = ToneSender {
        tx,
        clock: clock.clone(),
    };
    let renderer = ToneRenderer::new(rx, clock);
    (sender, renderer)
}

/// Control-thread end of the tone queue.
pub struct ToneSender {
    tx: Producer<Tone>,
    clock: FrameClock,
}

impl ToneSender {
    pub fn send(&mut self, tone: Tone) -> Result<(), EngineError> {
        self.tx.push(tone).map_err(|_| EngineError::QueueFull)
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }
}

impl AudioClock for ToneSender {
    fn now(&self) -> f64 {
        self.clock.now()
    }
}

impl AudioEngine for ToneSender {
    fn resume(&mut self) -> Result<(), EngineError> {
        Ok(())
    }

    fn schedule_tone(&mut self, tone: Tone) -> Result<(), EngineError> {
        self.send(tone)
    }
}

/// A tone waiting for its start frame
#[derive(Debug, Clone, Copy)]
struct PendingTone {
    start_frame: u64,
    frequency: f32,
    duration: f32,
}

/// Audio-thread end of the tone queue.
pub struct ToneRenderer {
    rx: Consumer<Tone>,
    clock: FrameClock,
    /// Tones received but not yet started (capacity fixed at construction)
    pending: Vec<PendingTone>,
    voices: Vec<Voice<Click>>,
    scratch: Vec<f32>,
}

impl ToneRenderer {
    fn new(rx: Consumer<Tone>, clock: FrameClock) -> Self {
        let sample_rate = clock.sample_rate() as f32;
        Self {
            rx,
            pending: Vec::with_capacity(TONE_QUEUE_SIZE),
            voices: (0..MAX_VOICES)
                .map(|_| Voice::new(voices::click(DEFAULT_VOICE_DURATION), sample_rate))
                .collect(),
            scratch: vec![0.0; MAX_BLOCK_SIZE],
            clock,
        }
    }

    /// Render one mono block and advance the shared clock by its length.
    ///
    /// Realtime-safe: no allocation, no locks.
    pub fn render(&mut self, out: &mut [f32]) {
        self.drain_queue();
        out.fill(0.0);

        let block_start = self.clock.frames();
        let block_end = block_start + out.len() as u64;
        let mut cursor = 0usize;

        loop {
            // Earliest onset inside this block; late tones start immediately
            let next_onset = self
                .pending
                .iter()
                .map(|p| p.start_frame.max(block_start))
                .filter(|&frame| frame < block_end)
                .min();

            let segment_end = match next_onset {
                Some(frame) => (frame - block_start) as usize,
                None => out.len(),
            };
            if segment_end > cursor {
                self.render_segment(&mut out[cursor..segment_end]);
                cursor = segment_end;
            }

            match next_onset {
                Some(frame) => self.start_due(frame, block_start),
                None => break,
            }
        }

        for sample in out.iter_mut() {
            *sample = sample.clamp(-1.0, 1.0);
        }

        self.clock.advance(out.len() as u64);
    }

    /// Tones received but not yet sounding.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn active_voices(&self) -> usize {
        self.voices.iter().filter(|v| !v.is_free()).count()
    }

    fn drain_queue(&mut self) {
        while let Ok(tone) = self.rx.pop() {
            if self.pending.len() == self.pending.capacity() {
                // Dropping keeps the audio thread allocation-free
                continue;
            }
            self.pending.push(PendingTone {
                start_frame: self.clock.frame_at(tone.start_time),
                frequency: tone.frequency,
                duration: tone.duration,
            });
        }
    }

    fn start_due(&mut self, frame: u64, block_start: u64) {
        let mut i = 0;
        while i < self.pending.len() {
            let tone = self.pending[i];
            if tone.start_frame.max(block_start) <= frame {
                self.pending.swap_remove(i);
                self.allocate_voice()
                    .start(tone.frequency, 1.0, tone.duration, frame);
            } else {
                i += 1;
            }
        }
    }

    fn render_segment(&mut self, out: &mut [f32]) {
        for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
            for voice in self.voices.iter_mut().filter(|v| !v.is_free()) {
                voice.render_into(chunk, &mut self.scratch);
            }
        }
    }

    fn allocate_voice(&mut self) -> &mut Voice<Click> {
        // First pass: free voice; otherwise steal the oldest click
        let idx = self
            .voices
            .iter()
            .position(|v| v.is_free())
            .or_else(|| {
                self.voices
                    .iter()
                    .enumerate()
                    .min_by_key(|(_, v)| v.started_at())
                    .map(|(idx, _)| idx)
            })
            .unwrap_or(0);
        &mut self.voices[idx]
    }
}
