use std::fmt;

use chrono::{Datelike, Month, NaiveDate, NaiveDateTime, TimeDelta};
use serde::Serialize;
use thiserror::Error;

use crate::{
    age::age_breakdown,
    constants::{GLYPHS, LIFE_SPAN, MONTH_NAMES, TIME_SETTINGS},
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("no age or birth date given")]
    Empty,
    #[error("'{0}' is not a valid YYYY-MM-DD date")]
    UnparsableDate(String),
    #[error("'{0}' is not a finite number")]
    UnparsableAge(String),
    #[error("age {0} is outside 0..={max}", max = LIFE_SPAN.max_age_years)]
    AgeOutOfRange(f64),
    #[error("birth date {0} is in the future")]
    FutureBirthDate(NaiveDate),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BirthInput {
    Age(f64),
    BirthDate(NaiveDate),
}

impl BirthInput {
    pub fn parse(raw: &str) -> Result<Self, InputError> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(InputError::Empty);
        }

        if let Ok(age) = value.parse::<f64>() {
            if !age.is_finite() {
                return Err(InputError::UnparsableAge(value.to_string()));
            }
            return Ok(BirthInput::Age(age));
        }

        parse_iso_date(value)
            .map(BirthInput::BirthDate)
            .ok_or_else(|| InputError::UnparsableDate(value.to_string()))
    }

    pub fn validate(&self, now: NaiveDateTime) -> Result<(), InputError> {
        match *self {
            BirthInput::Age(age) => {
                if !(0.0..=LIFE_SPAN.max_age_years as f64).contains(&age) {
                    return Err(InputError::AgeOutOfRange(age));
                }
            }
            BirthInput::BirthDate(birth) => {
                let today = now.date();
                if birth > today {
                    return Err(InputError::FutureBirthDate(birth));
                }
                let age = age_breakdown(birth, today);
                let over_max = age.years > LIFE_SPAN.max_age_years as i32
                    || (age.years == LIFE_SPAN.max_age_years as i32
                        && (age.months > 0 || age.days > 0));
                if over_max {
                    return Err(InputError::AgeOutOfRange(self.approximate_age(now)));
                }
            }
        }
        Ok(())
    }

    pub fn approximate_age(&self, now: NaiveDateTime) -> f64 {
        match *self {
            BirthInput::Age(age) => age,
            BirthInput::BirthDate(birth) => {
                let days = (now.date() - birth).num_days();
                days as f64 / TIME_SETTINGS.days_per_year_approx
            }
        }
    }

    // None past chrono's date range
    pub fn approximate_birth_date(&self, now: NaiveDateTime) -> Option<NaiveDate> {
        match *self {
            BirthInput::BirthDate(birth) => Some(birth),
            BirthInput::Age(age) => {
                let days = (age * TIME_SETTINGS.days_per_year_approx).round() as i64;
                now.date().checked_sub_signed(TimeDelta::try_days(days)?)
            }
        }
    }
}

fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok().or_else(|| {
        ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
            .map(|dt| dt.date())
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearProgress {
    pub total_days: u32,
    pub days_passed: u32,
    pub percentage: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LifeStats {
    pub weeks_lived: u32,
    pub weeks_remaining: u32,
    pub life_percentage: u32,
    pub year_progress: YearProgress,
}

impl LifeStats {
    pub fn not_started(year_progress: YearProgress) -> Self {
        Self {
            weeks_lived: 0,
            weeks_remaining: LIFE_SPAN.total_life_weeks,
            life_percentage: 0,
            year_progress,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "month")]
pub enum ViewMode {
    Lifetime,
    CurrentYear,
    Monthly(#[serde(serialize_with = "serialize_month_index")] Month),
}

fn serialize_month_index<S: serde::Serializer>(month: &Month, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u32(month_index(*month))
}

pub fn month_index(month: Month) -> u32 {
    month.number_from_month() - 1
}

pub fn month_name(month: Month) -> &'static str {
    MONTH_NAMES[month_index(month) as usize]
}

impl ViewMode {
    pub fn monthly_from_index(index: u32) -> Option<Self> {
        if index > 11 {
            return None;
        }
        Month::try_from(index as u8 + 1).ok().map(ViewMode::Monthly)
    }

    pub fn current_month(now: NaiveDateTime) -> Self {
        ViewMode::monthly_from_index(now.month0()).unwrap_or(ViewMode::Monthly(Month::January))
    }

    pub fn key(&self) -> &'static str {
        match self {
            ViewMode::Lifetime => "lifetime",
            ViewMode::CurrentYear => "year",
            ViewMode::Monthly(_) => "monthly",
        }
    }

    pub fn next(self, now: NaiveDateTime) -> Self {
        match self {
            ViewMode::Lifetime => ViewMode::CurrentYear,
            ViewMode::CurrentYear => ViewMode::current_month(now),
            ViewMode::Monthly(_) => ViewMode::Lifetime,
        }
    }

    pub fn prev(self, now: NaiveDateTime) -> Self {
        match self {
            ViewMode::Lifetime => ViewMode::current_month(now),
            ViewMode::CurrentYear => ViewMode::Lifetime,
            ViewMode::Monthly(_) => ViewMode::CurrentYear,
        }
    }

    pub fn with_next_month(self) -> Self {
        match self {
            ViewMode::Monthly(month) => ViewMode::Monthly(month.succ()),
            other => other,
        }
    }

    pub fn with_prev_month(self) -> Self {
        match self {
            ViewMode::Monthly(month) => ViewMode::Monthly(month.pred()),
            other => other,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Lifetime => write!(f, "Lifetime"),
            ViewMode::CurrentYear => write!(f, "Year Progress"),
            ViewMode::Monthly(month) => write!(f, "Monthly ({})", month_name(*month)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CellState {
    Lived,
    Current,
    Empty,
    Placeholder,
}

impl CellState {
    pub fn glyph(self) -> &'static str {
        match self {
            CellState::Lived => GLYPHS.lived,
            CellState::Current => GLYPHS.current,
            CellState::Empty => GLYPHS.empty,
            CellState::Placeholder => GLYPHS.placeholder,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub index: usize,
    pub state: CellState,
    pub label: String,
}

impl Cell {
    pub fn new(index: usize, state: CellState, label: String) -> Self {
        Self {
            index,
            state,
            label,
        }
    }

    pub fn placeholder(index: usize) -> Self {
        Self::new(index, CellState::Placeholder, String::new())
    }
}
