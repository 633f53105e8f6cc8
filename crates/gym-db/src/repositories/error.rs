//! Error handling utilities for repositories

use gym_core::error::DomainError;
use gym_core::value_objects::MemberId;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Create a "member not found" error
pub fn member_not_found(id: &MemberId) -> DomainError {
    DomainError::MemberNotFound(id.clone())
}
