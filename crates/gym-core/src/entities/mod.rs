//! Domain entities - core business objects

mod attendance;
mod member;

pub use attendance::{AttendanceRecord, LedgerChange, LedgerOutcome};
pub use member::Member;
