//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in gym-core.

mod attendance;
mod error;
mod member;

pub use attendance::PgAttendanceRepository;
pub use member::PgMemberRepository;
