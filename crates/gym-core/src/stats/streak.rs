//! Longest run of consecutive ISO weeks with at least one attendance

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};

/// Longest weekly streak
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeeklyStreak {
    /// Number of consecutive weeks
    pub weeks: u32,
    /// Last attended date in the week where the maximum was first reached
    pub last_date: Option<NaiveDate>,
}

fn week_monday(year: i32, week: u32) -> Option<NaiveDate> {
    NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)
}

/// Compute the longest weekly streak over a member's record dates
pub fn longest_weekly_streak<I>(dates: I) -> WeeklyStreak
where
    I: IntoIterator<Item = NaiveDate>,
{
    // (iso year, iso week) -> latest date in that week
    let mut weeks: BTreeMap<(i32, u32), NaiveDate> = BTreeMap::new();
    for date in dates {
        let iso = date.iso_week();
        weeks
            .entry((iso.year(), iso.week()))
            .and_modify(|d| *d = (*d).max(date))
            .or_insert(date);
    }

    let mut best = WeeklyStreak::default();
    let mut run = 0u32;
    let mut prev_monday: Option<NaiveDate> = None;

    for (&(year, week), &last_in_week) in &weeks {
        let monday = week_monday(year, week);
        let consecutive = match (prev_monday, monday) {
            (Some(prev), Some(cur)) => (cur - prev).num_days() == 7,
            _ => false,
        };
        run = if consecutive { run + 1 } else { 1 };
        prev_monday = monday;

        if run > best.weeks {
            best = WeeklyStreak {
                weeks: run,
                last_date: Some(last_in_week),
            };
        }
    }

    best
}
