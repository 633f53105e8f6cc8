//! # gym-core
//!
//! Domain layer containing entities, value objects, check-in policies,
//! attendance statistics and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod clock;
pub mod entities;
pub mod error;
pub mod policy;
pub mod stats;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use clock::{Clock, FixedClock, SystemClock};
pub use entities::{AttendanceRecord, LedgerChange, LedgerOutcome, Member};
pub use error::DomainError;
pub use policy::{AdminList, AttendanceSchedule, DayWindow, LocationPolicy, Phase, WindowStatus};
pub use stats::{MemberStatus, RankEntry, RankMode, WeeklyStreak};
pub use traits::{AttendanceRepository, LoginStateStore, MemberRepository, RepoResult};
pub use value_objects::{ApprovalState, AttendanceStatus, DateRange, MemberId, MemberIdParseError};
