//! Application configuration structs
//!
//! Loads configuration from environment variables once at startup. Policy
//! sections are parsed into domain types here so nothing downstream ever
//! reads the environment.

use std::collections::HashMap;
use std::env;

use chrono::NaiveTime;
use gym_core::policy::{parse_time_of_day, parse_utc_offset, DayWindow};
use gym_core::{AdminList, AttendanceSchedule, LocationPolicy, RankMode};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub session: SessionConfig,
    pub oauth: OAuthConfig,
    pub attendance: AttendanceConfig,
    pub admin: AdminConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "default_redis_max_connections")]
    pub max_connections: u32,
}

/// Session cookie configuration
#[derive(Clone, Deserialize)]
pub struct SessionConfig {
    pub secret: String,
    /// Session lifetime in seconds
    #[serde(default = "default_session_max_age")]
    pub max_age: i64,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Mark the cookie `Secure` (HTTPS only)
    #[serde(default)]
    pub secure: bool,
}

impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("max_age", &self.max_age)
            .field("cookie_name", &self.cookie_name)
            .field("secure", &self.secure)
            .finish_non_exhaustive()
    }
}

/// OAuth identity provider configuration
#[derive(Clone, Deserialize)]
pub struct OAuthConfig {
    pub client_id: String,
    #[serde(default)]
    pub client_secret: Option<String>,
    pub redirect_uri: String,
    #[serde(default = "default_authorize_url")]
    pub authorize_url: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
    #[serde(default = "default_userinfo_url")]
    pub userinfo_url: String,
    /// Lifetime of a pending login `state` in seconds
    #[serde(default = "default_state_ttl")]
    pub state_ttl: u64,
    /// Where the browser lands after a successful login
    #[serde(default = "default_post_login_redirect")]
    pub post_login_redirect: String,
    /// Upstream request timeout in seconds
    #[serde(default = "default_provider_timeout")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("client_id", &self.client_id)
            .field("redirect_uri", &self.redirect_uri)
            .field("authorize_url", &self.authorize_url)
            .field("token_url", &self.token_url)
            .field("userinfo_url", &self.userinfo_url)
            .field("state_ttl", &self.state_ttl)
            .finish_non_exhaustive()
    }
}

/// Check-in policy configuration, already parsed
#[derive(Debug, Clone)]
pub struct AttendanceConfig {
    pub schedule: AttendanceSchedule,
    pub allowed_ips: Vec<String>,
    pub rank_mode: RankMode,
}

impl AttendanceConfig {
    pub fn location_policy(&self) -> LocationPolicy {
        LocationPolicy::new(&self.allowed_ips)
    }
}

/// Administrator configuration
#[derive(Debug, Clone, Default)]
pub struct AdminConfig {
    pub member_ids: Vec<String>,
}

impl AdminConfig {
    pub fn admin_list(&self) -> AdminList {
        AdminList::from_csv(&self.member_ids.join(","))
    }
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

// Default value functions
fn default_app_name() -> String {
    "gym-attendance".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    2
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_session_max_age() -> i64 {
    604_800 // 7 days
}

fn default_cookie_name() -> String {
    "gym_session".to_string()
}

fn default_authorize_url() -> String {
    "https://kauth.kakao.com/oauth/authorize".to_string()
}

fn default_token_url() -> String {
    "https://kauth.kakao.com/oauth/token".to_string()
}

fn default_userinfo_url() -> String {
    "https://kapi.kakao.com/v2/user/me".to_string()
}

fn default_state_ttl() -> u64 {
    600 // 10 minutes
}

fn default_post_login_redirect() -> String {
    "/".to_string()
}

fn default_provider_timeout() -> u64 {
    10
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

const DEFAULT_UTC_OFFSET: &str = "+09:00";
const DEFAULT_SATURDAY: [&str; 3] = ["12:50", "13:10", "13:30"];
const DEFAULT_SUNDAY: [&str; 3] = ["15:50", "16:10", "16:30"];

/// Environment lookup used while loading
struct Vars<F> {
    lookup: F,
}

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|v| !v.trim().is_empty())
    }

    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.get(key).ok_or(ConfigError::MissingVar(key))
    }

    fn or(&self, key: &str, default: impl FnOnce() -> String) -> String {
        self.get(key).unwrap_or_else(default)
    }

    /// Parse a value; a present but malformed value is an error
    fn parsed<T: std::str::FromStr>(&self, key: &'static str) -> Result<Option<T>, ConfigError> {
        match self.get(key) {
            None => Ok(None),
            Some(raw) => raw
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| ConfigError::InvalidValue(key, raw)),
        }
    }

    fn list(&self, key: &str) -> Vec<String> {
        self.get(key)
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Cookie name: an RFC 6265 token
    fn cookie_name(
        &self,
        key: &'static str,
        default: impl FnOnce() -> String,
    ) -> Result<String, ConfigError> {
        let name = self.or(key, default);
        let is_token = name
            .bytes()
            .all(|b| b.is_ascii_graphic() && !b"()<>@,;:\\\"/[]?={}".contains(&b));
        if is_token {
            Ok(name)
        } else {
            Err(ConfigError::InvalidValue(key, name))
        }
    }

    fn time(&self, key: &'static str, default: &str) -> Result<NaiveTime, ConfigError> {
        let raw = self.or(key, || default.to_string());
        parse_time_of_day(&raw).ok_or_else(|| ConfigError::InvalidValue(key, raw))
    }

    fn window(&self, keys: [&'static str; 3], defaults: [&str; 3]) -> Result<DayWindow, ConfigError> {
        let open_start = self.time(keys[0], defaults[0])?;
        let open_end = self.time(keys[1], defaults[1])?;
        let late_end = self.time(keys[2], defaults[2])?;
        DayWindow::new(open_start, open_end, late_end)
            .map_err(|e| ConfigError::InvalidValue(keys[0], e.to_string()))
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an explicit map of variables
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars { lookup };

        let env = vars
            .get("APP_ENV")
            .and_then(|s| match s.to_lowercase().as_str() {
                "production" => Some(Environment::Production),
                "staging" => Some(Environment::Staging),
                "development" => Some(Environment::Development),
                _ => None,
            })
            .unwrap_or_default();

        let offset_raw = vars.or("ATTENDANCE_UTC_OFFSET", || DEFAULT_UTC_OFFSET.to_string());
        let offset = parse_utc_offset(&offset_raw)
            .map_err(|_| ConfigError::InvalidValue("ATTENDANCE_UTC_OFFSET", offset_raw.clone()))?;
        let saturday = vars.window(
            [
                "ATTENDANCE_SAT_OPEN_START",
                "ATTENDANCE_SAT_OPEN_END",
                "ATTENDANCE_SAT_LATE_END",
            ],
            DEFAULT_SATURDAY,
        )?;
        let sunday = vars.window(
            [
                "ATTENDANCE_SUN_OPEN_START",
                "ATTENDANCE_SUN_OPEN_END",
                "ATTENDANCE_SUN_LATE_END",
            ],
            DEFAULT_SUNDAY,
        )?;

        Ok(Self {
            app: AppSettings {
                name: vars.or("APP_NAME", default_app_name),
                env,
            },
            api: ServerConfig {
                host: vars.or("API_HOST", default_host),
                port: vars
                    .parsed("API_PORT")?
                    .ok_or(ConfigError::MissingVar("API_PORT"))?,
            },
            database: DatabaseConfig {
                url: vars.required("DATABASE_URL")?,
                max_connections: vars
                    .parsed("DATABASE_MAX_CONNECTIONS")?
                    .unwrap_or_else(default_max_connections),
                min_connections: vars
                    .parsed("DATABASE_MIN_CONNECTIONS")?
                    .unwrap_or_else(default_min_connections),
            },
            redis: RedisConfig {
                url: vars.required("REDIS_URL")?,
                max_connections: vars
                    .parsed("REDIS_MAX_CONNECTIONS")?
                    .unwrap_or_else(default_redis_max_connections),
            },
            session: SessionConfig {
                secret: vars.required("SESSION_SECRET")?,
                max_age: vars
                    .parsed("SESSION_MAX_AGE")?
                    .unwrap_or_else(default_session_max_age),
                cookie_name: vars.cookie_name("SESSION_COOKIE_NAME", default_cookie_name)?,
                secure: vars
                    .parsed("SESSION_COOKIE_SECURE")?
                    .unwrap_or(env.is_production()),
            },
            oauth: OAuthConfig {
                client_id: vars.required("KAKAO_CLIENT_ID")?,
                client_secret: vars.get("KAKAO_CLIENT_SECRET"),
                redirect_uri: vars.required("KAKAO_REDIRECT_URI")?,
                authorize_url: vars.or("KAKAO_AUTHORIZE_URL", default_authorize_url),
                token_url: vars.or("KAKAO_TOKEN_URL", default_token_url),
                userinfo_url: vars.or("KAKAO_USERINFO_URL", default_userinfo_url),
                state_ttl: vars
                    .parsed("OAUTH_STATE_TTL")?
                    .unwrap_or_else(default_state_ttl),
                post_login_redirect: vars.or("LOGIN_REDIRECT_PATH", default_post_login_redirect),
                timeout_secs: vars
                    .parsed("OAUTH_TIMEOUT_SECS")?
                    .unwrap_or_else(default_provider_timeout),
            },
            attendance: AttendanceConfig {
                schedule: AttendanceSchedule::new(offset, saturday, sunday),
                allowed_ips: vars.list("ALLOWED_IPS"),
                rank_mode: vars.parsed("RANKING_TIE_POLICY")?.unwrap_or_default(),
            },
            admin: AdminConfig {
                member_ids: vars.list("ADMIN_IDS"),
            },
            rate_limit: RateLimitConfig {
                requests_per_second: vars
                    .parsed("RATE_LIMIT_REQUESTS_PER_SECOND")?
                    .unwrap_or_else(default_requests_per_second),
                burst: vars
                    .parsed("RATE_LIMIT_BURST")?
                    .unwrap_or_else(default_burst),
            },
            cors: CorsConfig {
                allowed_origins: vars.list("CORS_ALLOWED_ORIGINS"),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
