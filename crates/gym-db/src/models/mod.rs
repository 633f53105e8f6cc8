//! Database models - SQLx-compatible structs for PostgreSQL tables

mod attendance;
mod member;

pub use attendance::{AttendanceModel, MemberCountModel, MemberLastDateModel};
pub use member::MemberModel;
