use std::fmt;

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeBreakdown {
    pub years: i32,
    pub months: i32,
    pub days: i32,
}

pub fn age_breakdown(birthdate: NaiveDate, today: NaiveDate) -> AgeBreakdown {
    let mut total_months = (today.year() - birthdate.year()) * 12 + today.month() as i32
        - birthdate.month() as i32;
    if today.day() < birthdate.day() {
        total_months -= 1;
    }
    let total_months = total_months.max(0);

    let anchor = birthdate
        .checked_add_months(Months::new(total_months as u32))
        .unwrap_or(today);

    AgeBreakdown {
        years: total_months / 12,
        months: total_months % 12,
        days: (today - anchor).num_days() as i32,
    }
}

impl fmt::Display for AgeBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} year{}, {} month{}, {} day{}",
            self.years,
            plural(self.years),
            self.months,
            plural(self.months),
            self.days,
            plural(self.days)
        )
    }
}

fn plural(n: i32) -> &'static str {
    if n == 1 { "" } else { "s" }
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
