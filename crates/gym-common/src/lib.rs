//! # gym-common
//!
//! Shared utilities including configuration, error handling, session tokens, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{SessionClaims, SessionService};
pub use config::{
    AdminConfig, AppConfig, AppSettings, AttendanceConfig, ConfigError, CorsConfig,
    DatabaseConfig, Environment, OAuthConfig, RateLimitConfig, RedisConfig, ServerConfig,
    SessionConfig,
};
pub use error::{AppError, AppResult, ErrorResponse};
pub use telemetry::{try_init_tracing, TracingConfig, TracingError};
