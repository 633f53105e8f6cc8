//! Weekly check-in windows
//!
//! Each active weekday has one window made of an on-time part
//! `[open_start, open_end]` followed by a late part `(open_end, late_end]`.
//! Every instant is first converted into the club's fixed civil offset.

use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, Offset, TimeZone, Utc, Weekday,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::value_objects::AttendanceStatus;

/// Phase of the check-in window at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Open,
    Late,
    Closed,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Late => "late",
            Self::Closed => "closed",
        }
    }

    /// Status a check-in receives in this phase; `None` when closed
    pub fn attendance_status(self) -> Option<AttendanceStatus> {
        match self {
            Self::Open => Some(AttendanceStatus::Present),
            Self::Late => Some(AttendanceStatus::Late),
            Self::Closed => None,
        }
    }
}

/// Result of classifying an instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowStatus {
    pub phase: Phase,
    pub message: &'static str,
}

pub const MSG_OPEN: &str = "Check-in is open";
pub const MSG_LATE: &str = "Late check-in";
pub const MSG_OUTSIDE_WINDOW: &str = "Not a check-in time";
pub const MSG_NOT_CLASS_DAY: &str = "Today is not a check-in day (weekends only)";

/// Schedule configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("window boundaries must satisfy open_start <= open_end <= late_end ({0})")]
    InvertedBoundaries(String),

    #[error("invalid UTC offset: {0}")]
    InvalidOffset(String),
}

/// One day's window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    open_start: NaiveTime,
    open_end: NaiveTime,
    late_end: NaiveTime,
}

impl DayWindow {
    pub fn new(
        open_start: NaiveTime,
        open_end: NaiveTime,
        late_end: NaiveTime,
    ) -> Result<Self, ScheduleError> {
        if open_start > open_end || open_end > late_end {
            return Err(ScheduleError::InvertedBoundaries(format!(
                "{open_start} / {open_end} / {late_end}"
            )));
        }
        Ok(Self {
            open_start,
            open_end,
            late_end,
        })
    }

    #[inline]
    pub fn open_start(&self) -> NaiveTime {
        self.open_start
    }

    #[inline]
    pub fn open_end(&self) -> NaiveTime {
        self.open_end
    }

    #[inline]
    pub fn late_end(&self) -> NaiveTime {
        self.late_end
    }

    /// Phase of a civil time of day inside this window
    pub fn phase_at(&self, t: NaiveTime) -> Phase {
        if self.open_start <= t && t <= self.open_end {
            Phase::Open
        } else if self.open_end < t && t <= self.late_end {
            Phase::Late
        } else {
            Phase::Closed
        }
    }
}

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN)
}

/// Parse a `+HH:MM` / `-HH:MM` offset
pub fn parse_utc_offset(raw: &str) -> Result<FixedOffset, ScheduleError> {
    let invalid = || ScheduleError::InvalidOffset(raw.to_string());
    let raw_trimmed = raw.trim();
    let (sign, rest) = match raw_trimmed.as_bytes().first() {
        Some(b'+') => (1, &raw_trimmed[1..]),
        Some(b'-') => (-1, &raw_trimmed[1..]),
        _ => return Err(invalid()),
    };
    let (h, m) = rest.split_once(':').ok_or_else(invalid)?;
    let h: i32 = h.parse().map_err(|_| invalid())?;
    let m: i32 = m.parse().map_err(|_| invalid())?;
    if !(0..=14).contains(&h) || !(0..60).contains(&m) {
        return Err(invalid());
    }
    FixedOffset::east_opt(sign * (h * 3600 + m * 60)).ok_or_else(invalid)
}

/// Parse an `HH:MM` time of day
pub fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M").ok()
}

/// Club check-in schedule: Saturday and Sunday windows in a fixed civil offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceSchedule {
    offset: FixedOffset,
    saturday: DayWindow,
    sunday: DayWindow,
}

impl Default for AttendanceSchedule {
    /// UTC+09:00; Saturday 12:50/13:10/13:30, Sunday 15:50/16:10/16:30
    fn default() -> Self {
        Self {
            offset: FixedOffset::east_opt(9 * 3600).unwrap_or_else(|| Utc.fix()),
            saturday: DayWindow {
                open_start: hm(12, 50),
                open_end: hm(13, 10),
                late_end: hm(13, 30),
            },
            sunday: DayWindow {
                open_start: hm(15, 50),
                open_end: hm(16, 10),
                late_end: hm(16, 30),
            },
        }
    }
}

impl AttendanceSchedule {
    pub fn new(offset: FixedOffset, saturday: DayWindow, sunday: DayWindow) -> Self {
        Self {
            offset,
            saturday,
            sunday,
        }
    }

    #[inline]
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Window for a weekday; `None` on non-class days
    pub fn window_for(&self, weekday: Weekday) -> Option<&DayWindow> {
        match weekday {
            Weekday::Sat => Some(&self.saturday),
            Weekday::Sun => Some(&self.sunday),
            _ => None,
        }
    }

    /// Whether the date is a class day
    #[inline]
    pub fn is_class_day(&self, date: NaiveDate) -> bool {
        self.window_for(date.weekday()).is_some()
    }

    /// Convert an instant into the club's civil time
    pub fn local<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DateTime<FixedOffset> {
        now.with_timezone(&self.offset)
    }

    /// Civil date of an instant
    pub fn local_date<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> NaiveDate {
        self.local(now).date_naive()
    }

    /// Classify an instant into open / late / closed
    pub fn classify<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> WindowStatus {
        let local = self.local(now);
        let Some(window) = self.window_for(local.weekday()) else {
            return WindowStatus {
                phase: Phase::Closed,
                message: MSG_NOT_CLASS_DAY,
            };
        };

        let phase = window.phase_at(local.time());
        let message = match phase {
            Phase::Open => MSG_OPEN,
            Phase::Late => MSG_LATE,
            Phase::Closed => MSG_OUTSIDE_WINDOW,
        };
        WindowStatus { phase, message }
    }

    /// Whether the class of `date` has started by civil time `now`
    pub fn has_started<Tz: TimeZone>(&self, date: NaiveDate, now: &DateTime<Tz>) -> bool {
        let local = self.local(now);
        match local.date_naive().cmp(&date) {
            std::cmp::Ordering::Greater => true,
            std::cmp::Ordering::Less => false,
            std::cmp::Ordering::Equal => self
                .window_for(date.weekday())
                .is_some_and(|w| local.time() >= w.open_start()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kst(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(9 * 3600)
            .unwrap()
            .with_ymd_and_hms(y, mo, d, h, mi, s)
            .unwrap()
    }

    // 2024-11-16 is a Saturday, 2024-11-17 a Sunday, 2024-11-18 a Monday

    #[test]
    fn test_saturday_boundaries() {
        let s = AttendanceSchedule::default();
        assert_eq!(s.classify(&kst(2024, 11, 16, 12, 49, 59)).phase, Phase::Closed);
        assert_eq!(s.classify(&kst(2024, 11, 16, 12, 50, 0)).phase, Phase::Open);
        assert_eq!(s.classify(&kst(2024, 11, 16, 13, 0, 0)).phase, Phase::Open);
        assert_eq!(s.classify(&kst(2024, 11, 16, 13, 10, 0)).phase, Phase::Open);
        assert_eq!(s.classify(&kst(2024, 11, 16, 13, 10, 1)).phase, Phase::Late);
        assert_eq!(s.classify(&kst(2024, 11, 16, 13, 30, 0)).phase, Phase::Late);
        assert_eq!(s.classify(&kst(2024, 11, 16, 13, 30, 1)).phase, Phase::Closed);
    }

    #[test]
    fn test_sunday_boundaries() {
        let s = AttendanceSchedule::default();
        assert_eq!(s.classify(&kst(2024, 11, 17, 15, 50, 0)).phase, Phase::Open);
        assert_eq!(s.classify(&kst(2024, 11, 17, 16, 20, 0)).phase, Phase::Late);
        assert_eq!(s.classify(&kst(2024, 11, 17, 13, 0, 0)).phase, Phase::Closed);
    }

    #[test]
    fn test_weekday_closed_with_distinct_message() {
        let s = AttendanceSchedule::default();
        let status = s.classify(&kst(2024, 11, 18, 13, 0, 0));
        assert_eq!(status.phase, Phase::Closed);
        assert_eq!(status.message, MSG_NOT_CLASS_DAY);

        let sat_off = s.classify(&kst(2024, 11, 16, 9, 0, 0));
        assert_eq!(sat_off.message, MSG_OUTSIDE_WINDOW);
    }

    #[test]
    fn test_utc_input_is_converted() {
        let s = AttendanceSchedule::default();
        // 04:00 UTC Saturday is 13:00 KST
        let now = Utc.with_ymd_and_hms(2024, 11, 16, 4, 0, 0).unwrap();
        assert_eq!(s.classify(&now).phase, Phase::Open);
        // 16:00 UTC Friday is 01:00 KST Saturday
        let late_friday = Utc.with_ymd_and_hms(2024, 11, 15, 16, 0, 0).unwrap();
        assert_eq!(s.local_date(&late_friday), NaiveDate::from_ymd_opt(2024, 11, 16).unwrap());
    }

    #[test]
    fn test_inverted_window_rejected() {
        assert!(DayWindow::new(hm(13, 0), hm(12, 0), hm(14, 0)).is_err());
        assert!(DayWindow::new(hm(12, 0), hm(13, 0), hm(12, 30)).is_err());
        assert!(DayWindow::new(hm(12, 0), hm(12, 0), hm(12, 0)).is_ok());
    }

    #[test]
    fn test_has_started() {
        let s = AttendanceSchedule::default();
        let sat = NaiveDate::from_ymd_opt(2024, 11, 16).unwrap();
        assert!(!s.has_started(sat, &kst(2024, 11, 16, 12, 0, 0)));
        assert!(s.has_started(sat, &kst(2024, 11, 16, 12, 50, 0)));
        assert!(s.has_started(sat, &kst(2024, 11, 17, 0, 0, 0)));
        assert!(!s.has_started(sat, &kst(2024, 11, 15, 23, 0, 0)));
    }

    #[test]
    fn test_parse_offset() {
        assert_eq!(parse_utc_offset("+09:00").unwrap().local_minus_utc(), 9 * 3600);
        assert_eq!(parse_utc_offset("-03:30").unwrap().local_minus_utc(), -(3 * 3600 + 1800));
        assert!(parse_utc_offset("09:00").is_err());
        assert!(parse_utc_offset("+9").is_err());
        assert_eq!(parse_time_of_day("12:50"), Some(hm(12, 50)));
        assert_eq!(parse_time_of_day("25:00"), None);
    }

    #[test]
    fn test_phase_to_status() {
        assert_eq!(Phase::Open.attendance_status(), Some(AttendanceStatus::Present));
        assert_eq!(Phase::Late.attendance_status(), Some(AttendanceStatus::Late));
        assert_eq!(Phase::Closed.attendance_status(), None);
    }
}
