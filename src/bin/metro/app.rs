//! Event loop: keyboard, focus and due metronome tasks on one thread

use std::time::Instant;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::DefaultTerminal;

use saavy_metronome::{
    config::FRAME_INTERVAL,
    runtime::{HostEvent, WakeLock},
    Metronome,
};

use super::{
    audio::CpalEngine,
    ui::{self, Screen, UiState},
};

/// Longest BPM entry ("600")
const MAX_ENTRY_LEN: usize = 3;

pub type MetroCore = Metronome<CpalEngine, UiState, Box<dyn WakeLock>>;

/// BPM text field. Opens holding the current tempo, selected, so the first
/// digit typed replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BpmEntry {
    text: String,
    selected: bool,
}

impl BpmEntry {
    pub fn new(bpm: u32) -> Self {
        Self {
            text: bpm.to_string(),
            selected: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Type one character. Only digits are taken.
    pub fn push(&mut self, c: char) {
        if !c.is_ascii_digit() {
            return;
        }
        if std::mem::take(&mut self.selected) {
            self.text.clear();
        }
        if self.text.len() < MAX_ENTRY_LEN {
            self.text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if std::mem::take(&mut self.selected) {
            self.text.clear();
        } else {
            self.text.pop();
        }
    }
}

pub struct App {
    metronome: MetroCore,
    /// BPM being typed; `None` when not editing
    entry: Option<BpmEntry>,
    show_about: bool,
    should_quit: bool,
}

impl App {
    pub fn new(metronome: MetroCore) -> Self {
        Self {
            metronome,
            entry: None,
            show_about: false,
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            let now = Instant::now();
            self.metronome.poll_host(now);
            self.metronome.run_due(now);

            terminal.draw(|frame| ui::render(frame, &self.screen(now)))?;

            // Sleep until the next task, but keep input responsive
            let timeout = self
                .metronome
                .next_deadline()
                .map(|deadline| deadline.saturating_duration_since(Instant::now()))
                .unwrap_or(FRAME_INTERVAL)
                .min(FRAME_INTERVAL);
            if event::poll(timeout)? {
                self.handle_event(event::read()?);
            }
        }

        self.metronome.stop();
        Ok(())
    }

    fn screen(&self, now: Instant) -> Screen<'_> {
        let transport = self.metronome.transport();
        Screen {
            display: self.metronome.display(),
            bpm: transport.tempo_bpm(),
            marking: self.metronome.tempo_marking(),
            beats_per_measure: transport.beats_per_measure(),
            running: transport.is_running(),
            entry: self.entry.as_ref(),
            sample_rate: self.metronome.engine().sample_rate(),
            show_about: self.show_about,
            now,
        }
    }

    fn handle_event(&mut self, event: Event) {
        let now = Instant::now();
        match event {
            Event::FocusGained => self
                .metronome
                .notify(HostEvent::VisibilityChanged { visible: true }, now),
            Event::FocusLost => self
                .metronome
                .notify(HostEvent::VisibilityChanged { visible: false }, now),
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key, now),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if self.show_about {
            self.show_about = false;
            return;
        }
        if self.entry.is_some() {
            self.handle_entry_key(key.code, now);
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(' ') => self.metronome.toggle(now),
            KeyCode::Up => {
                self.metronome.nudge_tempo(1, now);
            }
            KeyCode::Down => {
                self.metronome.nudge_tempo(-1, now);
            }
            KeyCode::Right => {
                self.metronome.nudge_tempo(5, now);
            }
            KeyCode::Left => {
                self.metronome.nudge_tempo(-5, now);
            }
            KeyCode::Char(']') => {
                self.metronome.nudge_beats(1);
            }
            KeyCode::Char('[') => {
                self.metronome.nudge_beats(-1);
            }
            KeyCode::Char('e') | KeyCode::Char('E') | KeyCode::Enter => {
                self.entry = Some(BpmEntry::new(self.metronome.transport().tempo_bpm()));
            }
            KeyCode::Char('?') => self.show_about = true,
            _ => {}
        }
    }

    fn handle_entry_key(&mut self, code: KeyCode, now: Instant) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };
        match code {
            KeyCode::Char(c) => entry.push(c),
            KeyCode::Backspace => entry.backspace(),
            KeyCode::Enter => {
                let text = std::mem::take(&mut entry.text);
                self.entry = None;
                // Invalid text leaves the tempo as it was
                self.metronome.commit_tempo_input(&text, now);
            }
            KeyCode::Esc => self.entry = None,
            _ => {}
        }
    }
}
