//! Repository traits

mod login_state;
mod repositories;

pub use login_state::LoginStateStore;
pub use repositories::{AttendanceRepository, MemberRepository, RepoResult};
