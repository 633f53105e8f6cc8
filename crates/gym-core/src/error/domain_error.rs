//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::policy::Phase;
use crate::value_objects::MemberId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Member not found: {0}")]
    MemberNotFound(MemberId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid month: {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("Invalid login state")]
    InvalidLoginState,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Administrator privileges required")]
    NotAdmin,

    // =========================================================================
    // Policy Rejections
    // =========================================================================
    #[error("Check-in is not allowed from {0}")]
    LocationNotAllowed(String),

    #[error("{message}")]
    WindowClosed { phase: Phase, message: String },

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Already checked in today")]
    AlreadyCheckedIn,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Identity provider error: {0}")]
    IdentityProvider(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::MemberNotFound(_) => "UNKNOWN_MEMBER",

            // Validation
            Self::InvalidMonth { .. } => "INVALID_MONTH",
            Self::InvalidLoginState => "INVALID_LOGIN_STATE",

            // Authorization
            Self::NotAdmin => "NOT_ADMIN",

            // Policy
            Self::LocationNotAllowed(_) => "LOCATION_NOT_ALLOWED",
            Self::WindowClosed { .. } => "WINDOW_CLOSED",

            // Conflict
            Self::AlreadyCheckedIn => "ALREADY_CHECKED_IN",

            // Infrastructure
            Self::IdentityProvider(_) => "IDENTITY_PROVIDER_ERROR",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::MemberNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidMonth { .. } | Self::InvalidLoginState)
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotAdmin)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::AlreadyCheckedIn)
    }

    /// Check if a check-in was refused by the location or time policy
    pub fn is_policy_rejection(&self) -> bool {
        matches!(self, Self::LocationNotAllowed(_) | Self::WindowClosed { .. })
    }
}
