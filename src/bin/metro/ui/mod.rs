//! TUI module for metro
//!
//! Draws the transport bar, the beat indicator and the pendulum. Nothing
//! here decides timing; it only reads what the metronome last reported.

mod beats;
mod pendulum;
pub mod state;
mod transport;

use std::time::Instant;

use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use saavy_metronome::sequencing::TempoMarking;

use crate::app::BpmEntry;

pub use state::UiState;

use beats::render_beats;
use pendulum::render_pendulum;
use transport::render_transport;

/// Snapshot of everything a frame needs
pub struct Screen<'a> {
    pub display: &'a UiState,
    pub bpm: u32,
    pub marking: TempoMarking,
    pub beats_per_measure: u32,
    pub running: bool,
    /// BPM being typed, if editing
    pub entry: Option<&'a BpmEntry>,
    pub sample_rate: Option<f64>,
    pub show_about: bool,
    pub now: Instant,
}

pub fn render(frame: &mut Frame, screen: &Screen) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Transport bar
            Constraint::Length(3), // Beat indicator
            Constraint::Min(6),    // Pendulum
            Constraint::Length(1), // Help bar
        ])
        .split(area);

    render_transport(frame, chunks[0], screen);
    render_beats(frame, chunks[1], screen.display);
    render_pendulum(frame, chunks[2], screen.display, screen.now);

    let help = if screen.entry.is_some() {
        " [0-9] Type BPM  [Enter] Apply  [Esc] Cancel"
    } else {
        " [Space] Start/Stop  [↑↓] ±1  [←→] ±5  [[ ]] Beats  [E] Edit BPM  [?] About  [Q] Quit"
    };
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        chunks[3],
    );

    if screen.show_about {
        render_about(frame, area);
    }
}

fn render_about(frame: &mut Frame, area: Rect) {
    let popup = centered(area, 44, 7);
    let text = vec![
        Line::from(format!("metro {}", env!("CARGO_PKG_VERSION"))),
        Line::from(""),
        Line::from("Clicks are scheduled 100 ms ahead on the"),
        Line::from("audio clock, so timing holds under load."),
        Line::from("Press any key to close."),
    ];
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(text).block(Block::default().title(" About ").borders(Borders::ALL)),
        popup,
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}
