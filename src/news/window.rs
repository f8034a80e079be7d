//! Publication-date window for article searches.

use std::fmt;

use chrono::{Datelike, Days, Local, NaiveDate};
use serde::Serialize;

/// Default look-back in days.
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// Default floor year.
pub const DEFAULT_FLOOR_YEAR: i32 = 2026;

/// The date range searched: `start ..= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl SearchWindow {
    /// Window ending on `today` reaching back `days` days.
    ///
    /// A start date before `floor_year` is moved to January 1 of `today`'s
    /// year.
    pub fn ending_on(today: NaiveDate, days: u32, floor_year: i32) -> Self {
        let mut start = today
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);

        if start.year() < floor_year {
            start = today.with_ordinal(1).unwrap_or(start);
        }

        SearchWindow { start, end: today }
    }

    /// Window ending on the local date.
    pub fn current(days: u32, floor_year: i32) -> Self {
        Self::ending_on(Local::now().date_naive(), days, floor_year)
    }

    /// Caption shown with results, e.g. `Data Window: Sep 18 - Oct 18, 2026`.
    pub fn caption(&self) -> String {
        format!("Data Window: {self}")
    }

    /// Number of days covered, inclusive of both ends.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for SearchWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format("%b %d"),
            self.end.format("%b %d, %Y")
        )
    }
}
