//! Check-in policies: when, from where, and who administers

mod admin;
mod location;
mod time_window;

pub use admin::AdminList;
pub use location::LocationPolicy;
pub use time_window::{
    parse_time_of_day, parse_utc_offset, AttendanceSchedule, DayWindow, Phase, ScheduleError,
    WindowStatus, MSG_LATE, MSG_NOT_CLASS_DAY, MSG_OPEN, MSG_OUTSIDE_WINDOW,
};
