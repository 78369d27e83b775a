use ratatui::prelude::{Line, Span};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph},
};

use lifeweeks::{
    constants::{GRID_LAYOUT, PALETTE},
    display,
    domain::ViewMode,
    grid::{legend, suggested_columns},
};

use super::{App, ui_helpers, view_style};

const VIEW_TABS: [(&str, &str); 3] = [
    ("lifetime", "Lifetime"),
    ("year", "Year"),
    ("monthly", "Monthly"),
];

impl App {
    pub(super) fn draw_frame(&mut self, f: &mut Frame) {
        let size = f.size();
        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(size);

        self.render_input(f, sections[0]);
        self.render_stats(f, sections[1]);
        self.render_grid(f, sections[2]);
        self.render_footer(f, sections[3]);
    }

    fn render_input(&self, f: &mut Frame, area: Rect) {
        let error = self.input_error();
        let raw = self.dashboard.raw_input();

        let hint = match (&error, &self.snapshot.input) {
            (Some(e), _) => e.to_string(),
            (None, Some(input)) => display::describe_age(input, self.snapshot.now),
            (None, None) => "type an age or a birth date".to_string(),
        };
        let hint_style = if error.is_some() {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Gray)
        };
        let hint_width = area.width.saturating_sub(4) as usize / 2;

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(
                Line::from(Span::styled(
                    "Age or birth date (YYYY-MM-DD)",
                    Style::default().fg(Color::White),
                ))
                .alignment(Alignment::Left),
            )
            .title(
                Line::from(Span::styled(
                    ui_helpers::truncate_label(&hint, hint_width),
                    hint_style.add_modifier(Modifier::ITALIC),
                ))
                .alignment(Alignment::Right),
            )
            .border_style(Style::default().fg(view_style::input_border_color(error.is_some())));

        let text = Line::from(vec![
            Span::styled(raw.to_string(), Style::default().fg(Color::White)),
            Span::styled("▏", Style::default().fg(PALETTE.current)),
        ]);
        f.render_widget(Paragraph::new(text).block(block), area);
    }

    fn render_stats(&self, f: &mut Frame, area: Rect) {
        let stats = &self.snapshot.stats;
        let year = &stats.year_progress;
        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(area);

        let year_title = format!("{} Progress", self.snapshot.now.format("%Y"));
        let entries = [
            (
                "Weeks Lived",
                stats.life_percentage,
                display::format_count(stats.weeks_lived),
                PALETTE.lived,
            ),
            (
                "Weeks Remaining",
                100 - stats.life_percentage,
                display::format_count(stats.weeks_remaining),
                PALETTE.empty,
            ),
            (
                "Life Progress",
                stats.life_percentage,
                format!("{}%", stats.life_percentage),
                PALETTE.lived,
            ),
            (
                year_title.as_str(),
                year.percentage,
                format!("{}% ({}/{})", year.percentage, year.days_passed, year.total_days),
                PALETTE.year_progress,
            ),
        ];

        for ((title, percent, label, color), card) in entries.into_iter().zip(cards.iter()) {
            let gauge = Gauge::default()
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .title(Line::from(title.to_string()).alignment(Alignment::Center)),
                )
                .gauge_style(Style::default().fg(color).bg(Color::Black))
                .percent(percent.min(100) as u16)
                .label(Span::styled(
                    label,
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ));
            f.render_widget(gauge, *card);
        }
    }

    fn render_grid(&mut self, f: &mut Frame, area: Rect) {
        let grid = &self.snapshot.grid;
        let inner_width = area.width.saturating_sub(2) as usize;
        let inner_height = area.height.saturating_sub(2) as usize;

        let columns = suggested_columns(grid.view, inner_width);
        let days = display::day_numbers(grid);

        let mut lines: Vec<Line<'static>> = Vec::new();
        if matches!(grid.view, ViewMode::Monthly(_)) {
            lines.push(Line::from(Span::styled(
                display::weekday_header(),
                Style::default().fg(Color::Gray),
            )));
        }

        for (row_index, row) in grid.rows(columns).enumerate() {
            let mut spans: Vec<Span<'static>> = Vec::with_capacity(row.len() * 2);
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw(" "));
                }
                let text = display::cell_text(grid.view, cell, days[row_index * columns + i]);
                spans.push(Span::styled(text, view_style::cell_style(cell.state)));
            }
            lines.push(Line::from(spans));
        }

        self.scroll = ui_helpers::clamp_scroll(self.scroll, lines.len(), inner_height);

        let cell_width = match grid.view {
            ViewMode::Monthly(_) => GRID_LAYOUT.day_cell_width,
            _ => GRID_LAYOUT.cell_width,
        };
        let title_width = (columns * cell_width).saturating_sub(12).max(8);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(
                Line::from(Span::styled(
                    ui_helpers::truncate_label(&grid.title, title_width),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Left),
            )
            .title(
                Line::from(Span::styled(
                    self.snapshot.now.format("%H:%M:%S").to_string(),
                    Style::default().fg(Color::White),
                ))
                .alignment(Alignment::Right),
            )
            .border_style(Style::default().fg(PALETTE.accent));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .scroll((self.scroll, 0));
        f.render_widget(paragraph, area);
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let view = self.dashboard.view();
        let mut spans: Vec<Span<'static>> = Vec::new();

        for (key, label) in VIEW_TABS {
            spans.push(view_style::view_label_span(label, key == view.key()));
            spans.push(Span::raw(" "));
        }
        if let ViewMode::Monthly(_) = view {
            spans.push(Span::styled(
                format!("‹ {} › ", view),
                Style::default().fg(Color::Gray),
            ));
        }
        spans.push(Span::raw("│ "));

        for (state, label) in legend(view) {
            spans.push(Span::styled(
                format!("{} ", state.glyph()),
                view_style::cell_style(state),
            ));
            spans.push(Span::styled(
                format!("{}  ", label),
                Style::default().fg(Color::Gray),
            ));
        }
        spans.push(Span::styled(
            "│ Tab view  ←/→ month  ↑/↓ scroll  Esc clear  Ctrl-C quit",
            Style::default().fg(Color::DarkGray),
        ));

        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
