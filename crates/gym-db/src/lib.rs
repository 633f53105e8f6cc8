//! # gym-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for the repository traits
//! defined in `gym-core`. It handles:
//!
//! - Connection pool management
//! - Schema setup
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers (including approval normalization)
//! - Repository implementations
//! - Demo data for development databases
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gym_db::{create_pool, schema, DatabaseConfig, PgMemberRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::default()).await?;
//!     schema::apply(&pool).await?;
//!     let members = PgMemberRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod schema;
pub mod seed;

// Re-export commonly used types
pub use pool::{create_pool, ping, DatabaseConfig, PgPool};
pub use repositories::{PgAttendanceRepository, PgMemberRepository};
