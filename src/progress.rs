use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

use crate::{
    constants::LIFE_SPAN,
    domain::{BirthInput, InputError, LifeStats, YearProgress},
};

pub fn compute(input: Option<&BirthInput>, now: NaiveDateTime) -> LifeStats {
    let Some(input) = input else {
        return LifeStats::not_started(year_progress(now));
    };

    match try_compute(input, now) {
        Ok(stats) => stats,
        Err(e) => {
            debug!(error = %e, "birth input rejected, using default stats");
            LifeStats::not_started(year_progress(now))
        }
    }
}

pub fn try_compute(input: &BirthInput, now: NaiveDateTime) -> Result<LifeStats, InputError> {
    input.validate(now)?;

    let weeks_lived = match *input {
        BirthInput::Age(age) => weeks_from_age(age),
        BirthInput::BirthDate(birth) => weeks_from_days(days_lived(birth, now)),
    };

    Ok(LifeStats {
        weeks_lived,
        weeks_remaining: LIFE_SPAN.total_life_weeks - weeks_lived,
        life_percentage: life_percentage(weeks_lived),
        year_progress: year_progress(now),
    })
}

fn weeks_from_age(age: f64) -> u32 {
    let weeks = (age * LIFE_SPAN.weeks_per_year as f64).floor();
    weeks.clamp(0.0, LIFE_SPAN.total_life_weeks as f64) as u32
}

fn weeks_from_days(days: i64) -> u32 {
    (days / 7).clamp(0, LIFE_SPAN.total_life_weeks as i64) as u32
}

pub fn days_lived(birth: NaiveDate, now: NaiveDateTime) -> i64 {
    let elapsed = now - birth.and_time(NaiveTime::MIN);
    elapsed.num_seconds().div_euclid(86_400)
}

// 100 only once the lifetime cap is reached
pub fn life_percentage(weeks_lived: u32) -> u32 {
    let total = LIFE_SPAN.total_life_weeks;
    if weeks_lived == 0 {
        return 0;
    }
    if weeks_lived >= total {
        return 100;
    }
    round_percentage(weeks_lived, total).min(99)
}

pub fn year_progress(now: NaiveDateTime) -> YearProgress {
    let total_days = days_in_year(now.year());
    let days_passed = day_of_year(now).min(total_days);

    YearProgress {
        total_days,
        days_passed,
        percentage: round_percentage(days_passed, total_days).min(100),
    }
}

pub fn days_in_year(year: i32) -> u32 {
    let (Some(start), Some(end)) = (
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year, 12, 31),
    ) else {
        return 365;
    };
    (end - start).num_days() as u32 + 1
}

// midnight on Jan 1 is day 1
pub fn day_of_year(now: NaiveDateTime) -> u32 {
    let Some(start) = NaiveDate::from_ymd_opt(now.year(), 1, 1) else {
        return 1;
    };
    days_lived(start, now) as u32 + 1
}

fn round_percentage(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    let (part, whole) = (part as u64, whole as u64);
    ((part * 200 + whole) / (whole * 2)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_time(NaiveTime::MIN)
    }

    fn birth(y: i32, m: u32, d: u32) -> BirthInput {
        BirthInput::BirthDate(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_birth_date_scenario_2000_to_2025() {
        // 25 * 365 plus the 2000..=2024 leap days
        let b = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        assert_eq!(days_lived(b, at(2025, 1, 1)), 9132);

        let stats = compute(Some(&birth(2000, 1, 1)), at(2025, 1, 1));
        assert_eq!(stats.weeks_lived, 1304);
        assert_eq!(stats.weeks_remaining, 2856);
        assert_eq!(stats.life_percentage, 31);
    }

    #[test]
    fn test_days_lived_floors_partial_days() {
        let b = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let now = at(2025, 1, 8) - chrono::Duration::seconds(1);
        assert_eq!(days_lived(b, now), 6);
        assert_eq!(days_lived(b, at(2025, 1, 8)), 7);
    }

    #[test]
    fn test_age_path_floors_weeks() {
        let now = at(2025, 7, 14);
        let stats = compute(Some(&BirthInput::Age(25.5)), now);
        assert_eq!(stats.weeks_lived, 1326);
        assert_eq!(stats.weeks_lived + stats.weeks_remaining, 4160);

        let stats = compute(Some(&BirthInput::Age(0.01)), now);
        assert_eq!(stats.weeks_lived, 0);
        assert_eq!(stats.life_percentage, 0);
    }

    #[test]
    fn test_age_weeks_property_over_valid_range() {
        let now = at(2025, 7, 14);
        let mut tenths = 0u32;
        while tenths <= 1200 {
            let age = tenths as f64 / 10.0;
            let stats = compute(Some(&BirthInput::Age(age)), now);
            let expected = ((age * 52.0).floor() as u32).min(4160);
            assert_eq!(stats.weeks_lived, expected, "age {}", age);
            assert_eq!(stats.weeks_lived + stats.weeks_remaining, 4160);
            tenths += 7;
        }
    }

    #[test]
    fn test_birth_date_weeks_property_over_valid_range() {
        let now = at(2025, 7, 14) + chrono::Duration::hours(13);
        let today = now.date();
        let mut b = NaiveDate::from_ymd_opt(1905, 7, 14).unwrap();
        while b <= today {
            let stats = compute(Some(&BirthInput::BirthDate(b)), now);
            let expected = (((today - b).num_days() / 7) as u32).min(4160);
            assert_eq!(stats.weeks_lived, expected, "birth {}", b);
            assert_eq!(stats.weeks_lived + stats.weeks_remaining, 4160);
            b += chrono::Duration::days(97);
        }
    }

    #[test]
    fn test_birth_date_over_max_age_is_default() {
        let now = at(2025, 7, 14);
        let stats = compute(Some(&birth(1905, 7, 13)), now);
        assert_eq!(stats, LifeStats::not_started(year_progress(now)));
        assert!(matches!(
            try_compute(&birth(1905, 7, 13), now),
            Err(InputError::AgeOutOfRange(_))
        ));

        let stats = compute(Some(&birth(1905, 7, 14)), now);
        assert_eq!(stats.weeks_lived, 4160);
    }

    #[test]
    fn test_lifetime_cap_clamps_weeks() {
        let now = at(2025, 7, 14);
        let stats = compute(Some(&BirthInput::Age(95.0)), now);
        assert_eq!(stats.weeks_lived, 4160);
        assert_eq!(stats.weeks_remaining, 0);
        assert_eq!(stats.life_percentage, 100);

        let stats = compute(Some(&birth(1935, 1, 1)), now);
        assert_eq!(stats.weeks_lived, 4160);
        assert_eq!(stats.weeks_remaining, 0);
    }

    #[test]
    fn test_out_of_range_age_is_default() {
        let now = at(2025, 7, 14);
        let stats = compute(Some(&BirthInput::Age(200.0)), now);
        assert_eq!(stats, LifeStats::not_started(year_progress(now)));
        assert_eq!(stats.weeks_lived, 0);
        assert_eq!(stats.weeks_remaining, 4160);

        let stats = compute(Some(&BirthInput::Age(-3.0)), now);
        assert_eq!(stats.weeks_lived, 0);
        assert!(try_compute(&BirthInput::Age(-3.0), now).is_err());
    }

    #[test]
    fn test_future_birth_date_is_default_with_year_progress() {
        let now = at(2025, 7, 14);
        let stats = compute(Some(&birth(2026, 1, 1)), now);
        assert_eq!(stats.weeks_lived, 0);
        assert_eq!(stats.life_percentage, 0);
        assert_eq!(stats.year_progress, year_progress(now));
        assert_eq!(stats.year_progress.days_passed, 195);
    }

    #[test]
    fn test_absent_input_is_default() {
        let now = at(2025, 7, 14);
        assert_eq!(
            compute(None, now),
            LifeStats::not_started(year_progress(now))
        );
    }

    #[test]
    fn test_life_percentage_monotonic_and_hundred_only_at_cap() {
        let mut previous = 0;
        for weeks in 0..=4160 {
            let pct = life_percentage(weeks);
            assert!(pct >= previous);
            assert!(pct <= 100);
            assert_eq!(pct == 100, weeks == 4160);
            previous = pct;
        }
        assert_eq!(life_percentage(2080), 50);
        assert_eq!(life_percentage(21), 1);
        assert_eq!(life_percentage(20), 0);
    }

    #[test]
    fn test_year_progress_leap_year() {
        let progress = year_progress(at(2024, 3, 1));
        assert_eq!(progress.total_days, 366);
        assert_eq!(progress.days_passed, 61);
        assert_eq!(progress.percentage, 17);
    }

    #[test]
    fn test_year_progress_boundaries() {
        let start = year_progress(at(2025, 1, 1));
        assert_eq!(start.total_days, 365);
        assert_eq!(start.days_passed, 1);
        assert_eq!(start.percentage, 0);

        let end = year_progress(at(2025, 12, 31) + chrono::Duration::hours(23));
        assert_eq!(end.days_passed, 365);
        assert_eq!(end.percentage, 100);
    }

    #[test]
    fn test_days_in_year() {
        assert_eq!(days_in_year(2024), 366);
        assert_eq!(days_in_year(2025), 365);
        assert_eq!(days_in_year(1900), 365);
        assert_eq!(days_in_year(2000), 366);
    }

    #[test]
    fn test_compute_is_idempotent() {
        let now = at(2025, 7, 14) + chrono::Duration::minutes(90);
        let input = birth(1992, 6, 14);
        assert_eq!(compute(Some(&input), now), compute(Some(&input), now));
    }
}
