//! Session tokens
//!
//! A session is an HS256 JWT whose subject is the member id. It travels in an
//! HttpOnly cookie (or a Bearer header for API clients). Expired, tampered and
//! malformed tokens are all reported as the same error.

use chrono::{Duration, Utc};
use gym_core::MemberId;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Session token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (member ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Get the member ID
    ///
    /// # Errors
    /// Returns an error if the subject is not a valid member id
    pub fn member_id(&self) -> Result<MemberId, AppError> {
        MemberId::parse(&self.sub).map_err(|_| AppError::Unauthenticated)
    }
}

/// Issues and verifies session tokens
#[derive(Clone)]
pub struct SessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    max_age: i64,
}

impl SessionService {
    /// Create a new session service with the given secret and lifetime in seconds
    #[must_use]
    pub fn new(secret: &str, max_age: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            max_age,
        }
    }

    /// Session lifetime in seconds
    #[inline]
    pub fn max_age(&self) -> i64 {
        self.max_age
    }

    /// Issue a session token for a member
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue(&self, member_id: &MemberId) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: member_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.max_age)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode session token")))
    }

    /// Verify a session token and return the member it belongs to
    ///
    /// # Errors
    /// Returns [`AppError::Unauthenticated`] for any invalid, expired or tampered token
    pub fn verify(&self, token: &str) -> Result<MemberId, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|_| AppError::Unauthenticated)?;

        data.claims.member_id()
    }
}

impl std::fmt::Debug for SessionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionService")
            .field("max_age", &self.max_age)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> SessionService {
        SessionService::new("test-secret-key-that-is-long-enough", 604_800)
    }

    #[test]
    fn test_issue_and_verify() {
        let service = create_test_service();
        let member_id = MemberId::from("3141592653");

        let token = service.issue(&member_id).unwrap();
        assert!(!token.is_empty());
        assert_eq!(service.verify(&token).unwrap(), member_id);
    }

    #[test]
    fn test_expired_token_is_invalid() {
        let service = SessionService::new("test-secret-key-that-is-long-enough", -120);
        let token = service.issue(&MemberId::from("1")).unwrap();
        assert!(matches!(service.verify(&token), Err(AppError::Unauthenticated)));
    }

    #[test]
    fn test_tampered_token_is_invalid() {
        let service = create_test_service();
        let other = SessionService::new("a-completely-different-secret-key", 604_800);
        let token = other.issue(&MemberId::from("1")).unwrap();
        assert!(matches!(service.verify(&token), Err(AppError::Unauthenticated)));
        assert!(matches!(service.verify("invalid.token.here"), Err(AppError::Unauthenticated)));
    }
}
