use chrono::{Datelike, Month, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::{
    age::days_in_month,
    constants::{GRID_LAYOUT, LIFE_SPAN},
    domain::{Cell, CellState, LifeStats, ViewMode, month_name},
    progress::day_of_year,
};

const WEEKS_IN_YEAR_VIEW: u32 = 52;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Grid {
    pub view: ViewMode,
    pub title: String,
    pub cells: Vec<Cell>,
}

impl Grid {
    pub fn new(view: ViewMode, stats: &LifeStats, now: NaiveDateTime) -> Self {
        Self {
            view,
            title: grid_title(view, now),
            cells: build(view, stats, now),
        }
    }

    pub fn rows(&self, columns: usize) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(columns.max(1))
    }

    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|cell| cell.state == state).count()
    }
}

pub fn build(view: ViewMode, stats: &LifeStats, now: NaiveDateTime) -> Vec<Cell> {
    match view {
        ViewMode::Lifetime => lifetime_cells(stats),
        ViewMode::CurrentYear => current_year_cells(now),
        ViewMode::Monthly(month) => monthly_cells(month, now),
    }
}

fn lifetime_cells(stats: &LifeStats) -> Vec<Cell> {
    let lived = stats.weeks_lived as usize;
    let per_year = LIFE_SPAN.weeks_per_year as usize;

    (0..LIFE_SPAN.total_life_weeks as usize)
        .map(|i| {
            let state = if i < lived {
                CellState::Lived
            } else if i == lived && lived > 0 {
                CellState::Current
            } else {
                CellState::Empty
            };
            let label = format!("Year {}, Week {}", i / per_year + 1, i % per_year + 1);
            Cell::new(i, state, label)
        })
        .collect()
}

fn current_year_cells(now: NaiveDateTime) -> Vec<Cell> {
    let current = current_week_of_year(now) as usize;
    let year = now.year();

    (0..WEEKS_IN_YEAR_VIEW as usize)
        .map(|i| {
            let state = if i + 1 < current {
                CellState::Lived
            } else if i + 1 == current {
                CellState::Current
            } else {
                CellState::Empty
            };
            Cell::new(i, state, format!("Week {} of {}", i + 1, year))
        })
        .collect()
}

fn monthly_cells(month: Month, now: NaiveDateTime) -> Vec<Cell> {
    let year = now.year();
    let month_number = month.number_from_month();
    let day_count = days_in_month(year, month_number);
    let leading = NaiveDate::from_ymd_opt(year, month_number, 1)
        .map_or(0, |first| first.weekday().num_days_from_sunday()) as usize;

    let mut cells = Vec::with_capacity(leading + day_count as usize);
    cells.extend((0..leading).map(Cell::placeholder));

    for day in 1..=day_count {
        let state = if month_number == now.month() {
            if day < now.day() {
                CellState::Lived
            } else if day == now.day() {
                CellState::Current
            } else {
                CellState::Empty
            }
        } else if month_number < now.month() {
            CellState::Lived
        } else {
            CellState::Empty
        };

        let label = format!("{} {}, {}", month_name(month), day, year);
        cells.push(Cell::new(cells.len(), state, label));
    }

    cells
}

// Dec 30/31 fold into week 52
pub fn current_week_of_year(now: NaiveDateTime) -> u32 {
    day_of_year(now).div_ceil(7).min(WEEKS_IN_YEAR_VIEW)
}

pub fn grid_title(view: ViewMode, now: NaiveDateTime) -> String {
    match view {
        ViewMode::Lifetime => format!(
            "Your Life in Weeks ({} years)",
            LIFE_SPAN.assumed_lifespan_years
        ),
        ViewMode::CurrentYear => format!(
            "{} Progress ({} weeks)",
            now.year(),
            WEEKS_IN_YEAR_VIEW
        ),
        ViewMode::Monthly(month) => format!("{} {}", month_name(month), now.year()),
    }
}

pub fn legend(view: ViewMode) -> [(CellState, &'static str); 3] {
    match view {
        ViewMode::Monthly(_) => [
            (CellState::Lived, "Days lived"),
            (CellState::Current, "Today"),
            (CellState::Empty, "Days remaining"),
        ],
        ViewMode::Lifetime | ViewMode::CurrentYear => [
            (CellState::Lived, "Weeks lived"),
            (CellState::Current, "Current week"),
            (CellState::Empty, "Weeks remaining"),
        ],
    }
}

pub fn suggested_columns(view: ViewMode, width: usize) -> usize {
    let choices = match view {
        ViewMode::Monthly(_) => return GRID_LAYOUT.month_columns,
        ViewMode::Lifetime => GRID_LAYOUT.lifetime_columns,
        ViewMode::CurrentYear => GRID_LAYOUT.year_columns,
    };

    choices
        .iter()
        .copied()
        .find(|columns| columns * GRID_LAYOUT.cell_width <= width)
        .or_else(|| choices.last().copied())
        .unwrap_or(1)
}
