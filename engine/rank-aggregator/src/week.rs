//! Week resolution
//!
//! The current week is derived from the season start date (the Tuesday before
//! the first regular-season game): days 0-6 are week 1, days 7-13 week 2, and
//! so on, clamped to weeks 1 through 17.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Last regular-season week with rankings
pub const MAX_WEEK: u32 = 17;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonCalendar {
    season_start: NaiveDate,
}

impl Default for SeasonCalendar {
    fn default() -> Self {
        // Tuesday before week 1 of the 2025 season
        Self { season_start: NaiveDate::from_ymd_opt(2025, 9, 2).expect("valid date") }
    }
}

impl SeasonCalendar {
    pub fn new(season_start: NaiveDate) -> Self {
        Self { season_start }
    }

    pub fn season_start(&self) -> NaiveDate {
        self.season_start
    }

    /// Season year, used for `{season}` in source URLs
    pub fn season_year(&self) -> i32 {
        self.season_start.year()
    }

    /// Week in progress on a given date
    pub fn week_on(&self, date: NaiveDate) -> u32 {
        let days = (date - self.season_start).num_days();
        if days < 0 {
            return 1;
        }
        let week = u32::try_from(days / 7 + 1).unwrap_or(MAX_WEEK);
        week.clamp(1, MAX_WEEK)
    }

    /// Week in progress today (local time)
    pub fn current_week(&self) -> u32 {
        self.week_on(Local::now().date_naive())
    }

    /// Requested week if it is a valid regular-season week, otherwise the
    /// week in progress on `today`
    pub fn resolve_week(&self, requested: Option<u32>, today: NaiveDate) -> u32 {
        requested.filter(|week| is_valid_week(*week)).unwrap_or_else(|| self.week_on(today))
    }
}

fn is_valid_week(week: u32) -> bool {
    (1..=MAX_WEEK).contains(&week)
}

/// Parse a `week` query parameter.
///
/// Only plain digit strings for weeks 1 through 17 are accepted; anything
/// else (missing, signed, non-numeric, out of range) gives `None`.
pub fn parse_week_param(raw: Option<&str>) -> Option<u32> {
    let raw = raw?;
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok().filter(|week| is_valid_week(*week))
}
