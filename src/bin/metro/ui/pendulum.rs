//! Pendulum widget - the arm swings from a pivot at the bottom, and each
//! beat sends a ripple out from the pivot

use std::time::Instant;

use ratatui::{
    layout::Rect,
    style::Color,
    symbols,
    widgets::{
        canvas::{Canvas, Circle, Line},
        Block, Borders,
    },
    Frame,
};

use saavy_metronome::runtime::MAX_ANGLE;

use super::UiState;

const ARM_LENGTH: f64 = 0.9;
/// Position of the sliding weight along the arm
const WEIGHT_AT: f64 = 0.65;
/// Radius the ripple reaches before it fades
const RIPPLE_RADIUS: f64 = 0.5;

pub fn render_pendulum(frame: &mut Frame, area: Rect, state: &UiState, now: Instant) {
    let (sin, cos) = state.angle.to_radians().sin_cos();
    let half_width = (MAX_ANGLE * 2.0).to_radians().sin();
    let ripple = state.ripple(now);

    let canvas = Canvas::default()
        .block(Block::default().title(" Pendulum ").borders(Borders::ALL))
        .marker(symbols::Marker::Braille)
        .x_bounds([-half_width, half_width])
        .y_bounds([0.0, 1.0])
        .paint(move |ctx| {
            if let Some(progress) = ripple {
                ctx.draw(&Circle {
                    x: 0.0,
                    y: 0.0,
                    radius: RIPPLE_RADIUS * progress,
                    color: if progress < 0.5 { Color::Cyan } else { Color::DarkGray },
                });
            }
            ctx.draw(&Line {
                x1: 0.0,
                y1: 0.0,
                x2: ARM_LENGTH * sin,
                y2: ARM_LENGTH * cos,
                color: Color::White,
            });
            ctx.draw(&Circle {
                x: ARM_LENGTH * WEIGHT_AT * sin,
                y: ARM_LENGTH * WEIGHT_AT * cos,
                radius: 0.03,
                color: Color::Cyan,
            });
        });

    frame.render_widget(canvas, area);
}
