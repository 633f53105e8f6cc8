//! Class-day counting and attendance rate

use chrono::{DateTime, TimeZone};

use crate::policy::AttendanceSchedule;
use crate::value_objects::DateRange;

/// Number of class days in the month that have started by `now`, floored at 1
///
/// A class day counts once its window has opened. Past months count every
/// class day; future months only get the floor.
pub fn valid_class_days<Tz: TimeZone>(
    schedule: &AttendanceSchedule,
    month: DateRange,
    now: &DateTime<Tz>,
) -> u32 {
    let counted = month
        .days()
        .filter(|day| schedule.is_class_day(*day) && schedule.has_started(*day, now))
        .count();
    u32::try_from(counted).unwrap_or(u32::MAX).max(1)
}

/// `round(count / valid_days * 100)`
pub fn attendance_rate(count: u32, valid_days: u32) -> u32 {
    let days = f64::from(valid_days.max(1));
    (f64::from(count) / days * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn kst(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(9 * 3600)
            .unwrap()
            .with_ymd_and_hms(y, mo, d, h, mi, 0)
            .unwrap()
    }

    #[test]
    fn test_today_counts_after_open_start() {
        let schedule = AttendanceSchedule::default();
        let nov = DateRange::month(2024, 11).unwrap();
        // Nov 2024 weekends before the 16th: 2, 3, 9, 10
        assert_eq!(valid_class_days(&schedule, nov, &kst(2024, 11, 16, 12, 0)), 4);
        assert_eq!(valid_class_days(&schedule, nov, &kst(2024, 11, 16, 12, 50)), 5);
        // Monday after: 2, 3, 9, 10, 16, 17
        assert_eq!(valid_class_days(&schedule, nov, &kst(2024, 11, 18, 9, 0)), 6);
    }

    #[test]
    fn test_past_and_future_months() {
        let schedule = AttendanceSchedule::default();
        let now = kst(2024, 11, 18, 9, 0);
        // Oct 2024 has 8 weekend days
        let oct = DateRange::month(2024, 10).unwrap();
        assert_eq!(valid_class_days(&schedule, oct, &now), 8);
        let dec = DateRange::month(2024, 12).unwrap();
        assert_eq!(valid_class_days(&schedule, dec, &now), 1);
    }

    #[test]
    fn test_floor_at_one() {
        let schedule = AttendanceSchedule::default();
        let jun = DateRange::month(2024, 6).unwrap();
        // 2024-06-01 is a Saturday; before the window opens nothing counts
        assert_eq!(valid_class_days(&schedule, jun, &kst(2024, 6, 1, 8, 0)), 1);
    }

    #[test]
    fn test_rate_rounds() {
        assert_eq!(attendance_rate(2, 3), 67);
        assert_eq!(attendance_rate(1, 6), 17);
        assert_eq!(attendance_rate(0, 0), 0);
        assert_eq!(attendance_rate(4, 4), 100);
    }
}
