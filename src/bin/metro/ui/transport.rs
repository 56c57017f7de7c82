//! Transport bar widget - tempo, marking, play state and meter

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Screen;

pub fn render_transport(frame: &mut Frame, area: Rect, screen: &Screen) {
    let block = Block::default().title(" metro ").borders(Borders::ALL);

    let tempo = match screen.entry {
        Some(entry) => {
            let mut style = Style::default().fg(Color::Black).bg(Color::Yellow);
            if entry.is_selected() {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Span::styled(format!(" BPM: {:_<3}  ", entry.text()), style)
        }
        None => {
            let mut style = Style::default().fg(Color::Cyan);
            if screen.display.is_pulsing(screen.now) {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            Span::styled(format!(" BPM: {}  ", screen.bpm), style)
        }
    };

    let play_symbol = if screen.running { "▶" } else { "■" };
    let play_state_str = if screen.running { "Playing" } else { "Stopped" };

    let mut spans = vec![
        tempo,
        Span::styled(
            format!("{}  ", screen.marking),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("{play_symbol} {play_state_str}  "),
            Style::default().fg(if screen.running {
                Color::Green
            } else {
                Color::Yellow
            }),
        ),
        Span::styled(
            format!("{} beats  ", screen.beats_per_measure),
            Style::default().fg(Color::White),
        ),
    ];
    match screen.sample_rate {
        Some(rate) => spans.push(Span::styled(
            format!("{:.1}kHz", rate / 1000.0),
            Style::default().fg(Color::DarkGray),
        )),
        None if screen.running => spans.push(Span::styled(
            "no audio",
            Style::default().fg(Color::Red),
        )),
        None => {}
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}
