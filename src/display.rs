use chrono::NaiveDateTime;
use itertools::Itertools;

use crate::{
    age::age_breakdown,
    constants::{GLYPHS, GRID_LAYOUT},
    domain::{BirthInput, Cell, CellState, LifeStats, ViewMode},
    grid::{Grid, legend},
};

const WEEKDAY_HEADER: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

pub fn format_count(value: u32) -> String {
    let digits = value.to_string();
    let bytes = digits.as_bytes();
    bytes
        .rchunks(3)
        .rev()
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .join(",")
}

pub fn progress_bar(percentage: u32, width: usize) -> String {
    let filled = (percentage.min(100) as usize * width + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn describe_age(input: &BirthInput, now: NaiveDateTime) -> String {
    match *input {
        BirthInput::BirthDate(birth) => age_breakdown(birth, now.date()).to_string(),
        BirthInput::Age(age) => match input.approximate_birth_date(now) {
            Some(birth) => format!("{} years (born around {})", age, birth.format("%Y-%m-%d")),
            None => format!("{} years", age),
        },
    }
}

pub fn stats_lines(stats: &LifeStats, now: NaiveDateTime, bar_width: usize) -> Vec<String> {
    let year = &stats.year_progress;
    let remaining_pct = 100 - stats.life_percentage;
    vec![
        format!(
            "{:<16}{:>7}  {}  Accomplished",
            "Weeks lived",
            format_count(stats.weeks_lived),
            progress_bar(stats.life_percentage, bar_width)
        ),
        format!(
            "{:<16}{:>7}  {}  Opportunity ahead",
            "Weeks remaining",
            format_count(stats.weeks_remaining),
            progress_bar(remaining_pct, bar_width)
        ),
        format!(
            "{:<16}{:>6}%  {}  Of your journey",
            "Life progress",
            stats.life_percentage,
            progress_bar(stats.life_percentage, bar_width)
        ),
        format!(
            "{:<16}{:>6}%  {}  {}/{} days",
            format!("{} progress", now.format("%Y")),
            year.percentage,
            progress_bar(year.percentage, bar_width),
            year.days_passed,
            year.total_days
        ),
    ]
}

pub fn summary_line(stats: &LifeStats, now: NaiveDateTime) -> String {
    format!(
        "{}  lived {} wk  remaining {} wk  life {}%  year {}% ({}/{})",
        now.format("%Y-%m-%d %H:%M:%S"),
        format_count(stats.weeks_lived),
        format_count(stats.weeks_remaining),
        stats.life_percentage,
        stats.year_progress.percentage,
        stats.year_progress.days_passed,
        stats.year_progress.total_days
    )
}

pub fn cell_text(view: ViewMode, cell: &Cell, day: Option<u32>) -> String {
    match (view, day) {
        (ViewMode::Monthly(_), Some(day)) => {
            let marker = match cell.state {
                CellState::Lived => GLYPHS.lived,
                CellState::Current => GLYPHS.current,
                CellState::Empty | CellState::Placeholder => " ",
            };
            format!("{:>2}{}", day, marker)
        }
        (ViewMode::Monthly(_), None) => " ".repeat(GRID_LAYOUT.day_cell_width),
        _ => cell.state.glyph().to_string(),
    }
}

pub fn day_numbers(grid: &Grid) -> Vec<Option<u32>> {
    if !matches!(grid.view, ViewMode::Monthly(_)) {
        return vec![None; grid.cells.len()];
    }

    let mut day = 0;
    grid.cells
        .iter()
        .map(|cell| {
            if cell.state == CellState::Placeholder {
                None
            } else {
                day += 1;
                Some(day)
            }
        })
        .collect()
}

pub fn weekday_header() -> String {
    WEEKDAY_HEADER
        .iter()
        .map(|name| format!("{:>width$}", name, width = GRID_LAYOUT.day_cell_width))
        .join(" ")
}

pub fn text_grid(grid: &Grid, columns: usize) -> Vec<String> {
    let days = day_numbers(grid);
    let mut lines = Vec::new();

    if matches!(grid.view, ViewMode::Monthly(_)) {
        lines.push(weekday_header());
    }

    let columns = columns.max(1);
    for (row_index, row) in grid.rows(columns).enumerate() {
        let offset = row_index * columns;
        lines.push(
            row.iter()
                .enumerate()
                .map(|(i, cell)| cell_text(grid.view, cell, days[offset + i]))
                .join(" "),
        );
    }

    lines
}

pub fn legend_line(view: ViewMode) -> String {
    legend(view)
        .iter()
        .map(|(state, label)| format!("{} {}", state.glyph(), label))
        .join("   ")
}

#[cfg(test)]
mod tests {
    use chrono::{Month, NaiveDate, NaiveTime};

    use super::*;
    use crate::progress;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_time(NaiveTime::MIN)
    }

    #[test]
    fn test_format_count_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1304), "1,304");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn test_progress_bar_width() {
        assert_eq!(progress_bar(0, 10), "░░░░░░░░░░");
        assert_eq!(progress_bar(100, 10), "██████████");
        assert_eq!(progress_bar(31, 10), "███░░░░░░░");
        assert_eq!(progress_bar(250, 4), "████");
    }

    #[test]
    fn test_describe_age_both_inputs() {
        let now = at(2025, 1, 1);
        let birth = BirthInput::BirthDate(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
        assert_eq!(describe_age(&birth, now), "25 years, 0 months, 0 days");
        assert!(describe_age(&BirthInput::Age(25.0), now).starts_with("25 years (born around"));
        assert_eq!(describe_age(&BirthInput::Age(1e9), now), "1000000000 years");
        assert!(describe_age(&BirthInput::Age(1e300), now).ends_with(" years"));
    }

    #[test]
    fn test_stats_lines_show_counts() {
        let now = at(2025, 1, 1);
        let birth = BirthInput::BirthDate(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
        let stats = progress::compute(Some(&birth), now);
        let lines = stats_lines(&stats, now, 10);
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("1,304"));
        assert!(lines[1].contains("2,856"));
        assert!(lines[2].contains("31%"));
        assert!(lines[3].starts_with("2025 progress"));
        assert!(lines[3].ends_with("1/365 days"));
    }

    #[test]
    fn test_text_grid_monthly_layout() {
        let now = at(2025, 7, 14);
        let stats = progress::compute(None, now);
        let grid = Grid::new(ViewMode::Monthly(Month::July), &stats, now);
        let lines = text_grid(&grid, 7);

        assert_eq!(lines[0], " Su  Mo  Tu  We  Th  Fr  Sa");
        assert_eq!(weekday_header(), lines[0]);
        // Two blanks for Sunday and Monday, then July 1-5.
        assert_eq!(lines[1], "         1✓  2✓  3✓  4✓  5✓");
        assert!(lines[2].contains("12✓"));
        assert!(lines[3].contains("13✓"));
        assert!(lines[3].contains("14●"));
        assert!(lines[3].contains("15 "));
    }

    #[test]
    fn test_text_grid_year_rows() {
        let now = at(2025, 1, 8);
        let stats = progress::compute(None, now);
        let grid = Grid::new(ViewMode::CurrentYear, &stats, now);
        let lines = text_grid(&grid, 26);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("✓ ● ·"));
    }

    #[test]
    fn test_legend_line() {
        assert_eq!(
            legend_line(ViewMode::Lifetime),
            "✓ Weeks lived   ● Current week   · Weeks remaining"
        );
    }
}
