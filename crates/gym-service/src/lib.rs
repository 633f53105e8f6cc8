//! # gym-service
//!
//! Application layer containing business logic, services, DTOs and the
//! identity-provider client.

pub mod dto;
pub mod identity;
pub mod services;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use identity::{IdentityProvider, KakaoProvider, ProviderProfile};
pub use services::{
    AdminService, AttendanceService, AuthService, RankingService, RecordService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult,
};
