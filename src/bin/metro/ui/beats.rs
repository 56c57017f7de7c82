//! Beat indicator - one shape per beat, or a counter for long measures

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use saavy_metronome::runtime::IndicatorLayout;

use super::UiState;

pub fn render_beats(frame: &mut Frame, area: Rect, state: &UiState) {
    let block = Block::default().title(" Beat ").borders(Borders::ALL);

    let line = match state.layout {
        IndicatorLayout::Shapes { beats } => {
            let spans: Vec<Span> = (0..beats)
                .map(|beat| {
                    let lit = state.active_beat == Some(beat);
                    // downbeat is square
                    let symbol = match (beat == 0, lit) {
                        (true, true) => "■",
                        (true, false) => "□",
                        (false, true) => "●",
                        (false, false) => "○",
                    };
                    let style = if lit {
                        Style::default()
                            .fg(if beat == 0 { Color::LightRed } else { Color::LightGreen })
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::DarkGray)
                    };
                    Span::styled(format!(" {symbol} "), style)
                })
                .collect();
            Line::from(spans)
        }
        IndicatorLayout::Counter { .. } => {
            let label = state
                .layout
                .counter_label(state.active_beat.unwrap_or(0));
            let style = match state.active_beat {
                Some(0) => Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
                Some(_) => Style::default().fg(Color::LightGreen),
                None => Style::default().fg(Color::DarkGray),
            };
            Line::from(Span::styled(label, style))
        }
    };

    let paragraph = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}
