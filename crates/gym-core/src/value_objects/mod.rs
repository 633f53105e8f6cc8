//! Value objects - immutable types that represent domain concepts

mod approval;
mod attendance_status;
mod date_range;
mod member_id;

pub use approval::ApprovalState;
pub use attendance_status::AttendanceStatus;
pub use date_range::DateRange;
pub use member_id::{MemberId, MemberIdParseError};
