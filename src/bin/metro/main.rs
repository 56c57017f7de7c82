//! metro - terminal metronome
//!
//! Run with: cargo run --bin metro -- --bpm 96 --beats 3
//!
//! Logs go to stderr and are off unless `RUST_LOG` is set, e.g.
//! `RUST_LOG=debug cargo run --bin metro 2> metro.log`.

mod app;
mod audio;
mod ui;
mod wake;

use clap::Parser;
use color_eyre::eyre::Result as EyreResult;
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange},
    execute,
};

use app::App;
use audio::CpalEngine;
use saavy_metronome::{
    runtime::{NoWakeLock, WakeLock},
    sequencing::transport::{DEFAULT_BEATS, DEFAULT_BPM},
    ClickSound, Metronome, MetronomeConfig,
};
use ui::UiState;
use wake::SystemWakeLock;

#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal metronome with sample-accurate clicks", long_about = None)]
struct Args {
    /// Tempo in beats per minute (clamped to 1-600)
    #[arg(short, long, default_value_t = DEFAULT_BPM as i64, allow_negative_numbers = true)]
    bpm: i64,

    /// Beats per measure (clamped to 1-64)
    #[arg(short = 'n', long, default_value_t = DEFAULT_BEATS as i64, allow_negative_numbers = true)]
    beats: i64,

    /// Pitch of the first beat of each measure, in Hz
    #[arg(long, default_value_t = ClickSound::default().accent_hz)]
    accent_hz: f32,

    /// Pitch of the other beats, in Hz
    #[arg(long, default_value_t = ClickSound::default().regular_hz)]
    regular_hz: f32,

    /// Let the display sleep while playing
    #[arg(long)]
    no_wake_lock: bool,
}

impl Args {
    fn config(&self) -> MetronomeConfig {
        MetronomeConfig::default()
            .bpm(self.bpm)
            .beats(self.beats)
            .accent_hz(self.accent_hz)
            .regular_hz(self.regular_hz)
    }
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    env_logger::init();

    let args = Args::parse();
    let config = args.config();
    log::info!("{config:?}");

    let wake_lock: Box<dyn WakeLock> = if args.no_wake_lock {
        Box::new(NoWakeLock)
    } else {
        Box::new(SystemWakeLock::new())
    };
    let display = UiState::new(config.beats_per_measure);
    let mut app = App::new(Metronome::new(config, CpalEngine::new(), display, wake_lock));

    let mut terminal = ratatui::init();
    execute!(std::io::stdout(), EnableFocusChange)?;

    let res = app.run(&mut terminal);

    let _ = execute!(std::io::stdout(), DisableFocusChange);
    ratatui::restore();
    res
}
