//! Configuration structs

mod app_config;

pub use app_config::{
    AdminConfig, AppConfig, AppSettings, AttendanceConfig, ConfigError, CorsConfig,
    DatabaseConfig, Environment, OAuthConfig, RateLimitConfig, RedisConfig, ServerConfig,
    SessionConfig,
};
