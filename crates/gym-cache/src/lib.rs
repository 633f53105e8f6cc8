//! # gym-cache
//!
//! Redis layer for short-lived login state.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Login State**: One-time OAuth `state` values with a TTL, consumed atomically
//!
//! ## Example
//!
//! ```ignore
//! use gym_cache::{OAuthStateStore, RedisPool, RedisPoolConfig};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let states = OAuthStateStore::with_ttl(pool, 600);
//!
//! states.save("7d0c...").await?;
//! assert!(states.consume("7d0c...").await?);
//! assert!(!states.consume("7d0c...").await?);
//! ```

pub mod pool;
pub mod session;

// Re-export pool types
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};

// Re-export session types
pub use session::{OAuthStateStore, PendingLogin};
