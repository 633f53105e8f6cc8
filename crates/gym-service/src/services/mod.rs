//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] and orchestrates
//! repositories, policies and the identity provider for one area.

pub mod admin;
pub mod attendance;
pub mod auth;
pub mod context;
pub mod error;
pub mod ranking;
pub mod record;

// Re-export all services for convenience
pub use admin::AdminService;
pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use ranking::RankingService;
pub use record::RecordService;
