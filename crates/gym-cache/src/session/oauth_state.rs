//! OAuth login state storage in Redis.
//!
//! Each login attempt stores its `state` value with a short TTL. The callback
//! consumes it with `GETDEL`, so a state can be redeemed at most once.

use async_trait::async_trait;
use gym_core::error::DomainError;
use gym_core::traits::{LoginStateStore, RepoResult};
use serde::{Deserialize, Serialize};

use crate::pool::{RedisPool, RedisPoolError};

/// Key prefix for login states
const OAUTH_STATE_PREFIX: &str = "oauth_state:";

/// Default TTL for login states (10 minutes)
const DEFAULT_STATE_TTL: u64 = 10 * 60;

/// Stored login attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingLogin {
    /// Creation timestamp (Unix epoch seconds)
    pub created_at: i64,
}

impl PendingLogin {
    #[must_use]
    pub fn new() -> Self {
        Self {
            created_at: chrono::Utc::now().timestamp(),
        }
    }
}

impl Default for PendingLogin {
    fn default() -> Self {
        Self::new()
    }
}

/// Login state store
#[derive(Clone)]
pub struct OAuthStateStore {
    pool: RedisPool,
    ttl_seconds: u64,
}

impl OAuthStateStore {
    /// Create a new store with the default TTL
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self {
            pool,
            ttl_seconds: DEFAULT_STATE_TTL,
        }
    }

    /// Create with custom TTL
    #[must_use]
    pub fn with_ttl(pool: RedisPool, ttl_seconds: u64) -> Self {
        Self { pool, ttl_seconds }
    }

    /// Generate Redis key for a state value
    fn key(state: &str) -> String {
        format!("{OAUTH_STATE_PREFIX}{state}")
    }
}

fn cache_error(err: RedisPoolError) -> DomainError {
    tracing::error!(error = %err, "Login state store unavailable");
    DomainError::CacheError(err.to_string())
}

#[async_trait]
impl LoginStateStore for OAuthStateStore {
    async fn save(&self, state: &str) -> RepoResult<()> {
        self.pool
            .set(&Self::key(state), &PendingLogin::new(), Some(self.ttl_seconds))
            .await
            .map_err(cache_error)?;

        tracing::debug!(ttl = self.ttl_seconds, "Stored login state");
        Ok(())
    }

    async fn consume(&self, state: &str) -> RepoResult<bool> {
        let pending: Option<PendingLogin> = self
            .pool
            .take_value(&Self::key(state))
            .await
            .map_err(cache_error)?;

        Ok(pending.is_some())
    }
}
