use ratatui::{
    prelude::Span,
    style::{Color, Modifier, Style},
};

use lifeweeks::{constants::PALETTE, domain::CellState};

pub(super) fn state_color(state: CellState) -> Color {
    match state {
        CellState::Lived => PALETTE.lived,
        CellState::Current => PALETTE.current,
        CellState::Empty | CellState::Placeholder => PALETTE.empty,
    }
}

pub(super) fn cell_style(state: CellState) -> Style {
    let style = Style::default().fg(state_color(state));
    if state == CellState::Current {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

pub(super) fn view_label_span(label: &str, active: bool) -> Span<'static> {
    let style = if active {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    Span::styled(label.to_string(), style)
}

pub(super) fn input_border_color(has_error: bool) -> Color {
    if has_error { Color::Red } else { PALETTE.accent }
}
