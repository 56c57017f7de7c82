//! cpal output backend for the tone queue

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use saavy_metronome::{
    engine::{
        tone_channel, AudioClock, AudioEngine, EngineError, FrameClock, SystemClock, Tone,
        ToneSender,
    },
    MAX_BLOCK_SIZE,
};

enum Backend {
    /// No stream yet; opened on the first resume
    Closed,
    Open {
        sender: ToneSender,
        /// System-clock time at which the stream's frame 0 was rendered
        offset: f64,
        // Dropping the stream stops playback
        _stream: cpal::Stream,
    },
    /// Opening failed; clicks are dropped for the rest of the session
    Failed(String),
}

/// Audio engine playing clicks on the default output device.
///
/// Until a stream exists the clock runs on the system clock. When the stream
/// opens its frame clock is offset so the reported time never jumps back.
pub struct CpalEngine {
    backend: Backend,
    fallback: SystemClock,
}

impl CpalEngine {
    pub fn new() -> Self {
        Self {
            backend: Backend::Closed,
            fallback: SystemClock::new(),
        }
    }

    /// Output sample rate, once the stream is open.
    pub fn sample_rate(&self) -> Option<f64> {
        match &self.backend {
            Backend::Open { sender, .. } => Some(sender.clock().sample_rate()),
            _ => None,
        }
    }
}

impl Default for CpalEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioClock for CpalEngine {
    fn now(&self) -> f64 {
        match &self.backend {
            Backend::Open { sender, offset, .. } => offset + sender.now(),
            _ => self.fallback.now(),
        }
    }
}

impl AudioEngine for CpalEngine {
    fn resume(&mut self) -> Result<(), EngineError> {
        match &self.backend {
            Backend::Open { .. } => Ok(()),
            Backend::Failed(reason) => Err(EngineError::Device(reason.clone())),
            Backend::Closed => match open_stream() {
                Ok((sender, stream)) => {
                    self.backend = Backend::Open {
                        sender,
                        offset: self.fallback.now(),
                        _stream: stream,
                    };
                    Ok(())
                }
                Err(err) => {
                    let reason = format!("{err:#}");
                    self.backend = Backend::Failed(reason.clone());
                    Err(EngineError::Device(reason))
                }
            },
        }
    }

    fn schedule_tone(&mut self, tone: Tone) -> Result<(), EngineError> {
        match &mut self.backend {
            Backend::Open { sender, offset, .. } => sender.send(Tone {
                start_time: tone.start_time - *offset,
                ..tone
            }),
            _ => Err(EngineError::NotInitialized),
        }
    }
}

fn open_stream() -> EyreResult<(ToneSender, cpal::Stream)> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;
    if config.sample_format() != cpal::SampleFormat::F32 {
        return Err(eyre!(
            "unsupported sample format {:?}, need f32",
            config.sample_format()
        ));
    }

    let sample_rate = config.sample_rate().0 as f64;
    let channels = config.channels() as usize;
    log::info!(
        "audio output: {} at {} Hz, {} channels",
        device.name().unwrap_or_else(|_| "unknown device".into()),
        sample_rate,
        channels
    );

    let (sender, mut renderer) = tone_channel(FrameClock::new(sample_rate));
    let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

    let stream = device
        .build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                let total_frames = data.len() / channels;
                let mut frames_written = 0;
                while frames_written < total_frames {
                    let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                    let block = &mut render_buf[..frames_to_render];
                    renderer.render(block);

                    // Duplicate mono to all channels
                    let out_off = frames_written * channels;
                    for (i, &s) in block.iter().enumerate() {
                        for ch in 0..channels {
                            data[out_off + i * channels + ch] = s;
                        }
                    }

                    frames_written += frames_to_render;
                }
            },
            |err| log::error!("audio stream error: {err}"),
            None,
        )
        .wrap_err("failed to build output stream")?;

    stream.play().wrap_err("failed to start output stream")?;
    Ok((sender, stream))
}
