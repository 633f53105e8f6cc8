//! Application state
//!
//! Holds the shared state for the Axum application: the service context,
//! the cookie settings and the readiness probe.

mod readiness;

use std::sync::Arc;

use gym_common::AppConfig;
use gym_service::ServiceContext;

pub use readiness::{InfraProbe, ReadinessProbe};

/// Session cookie and redirect settings
#[derive(Debug, Clone)]
pub struct WebSettings {
    pub cookie_name: String,
    pub cookie_secure: bool,
    /// Where the browser lands after login and logout
    pub post_login_redirect: String,
}

impl WebSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            cookie_name: config.session.cookie_name.clone(),
            cookie_secure: config.session.secure,
            post_login_redirect: config.oauth.post_login_redirect.clone(),
        }
    }
}

impl Default for WebSettings {
    fn default() -> Self {
        Self {
            cookie_name: "gym_session".to_string(),
            cookie_secure: false,
            post_login_redirect: "/".to_string(),
        }
    }
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    web: Arc<WebSettings>,
    readiness: Arc<dyn ReadinessProbe>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(
        service_context: ServiceContext,
        web: WebSettings,
        readiness: Arc<dyn ReadinessProbe>,
    ) -> Self {
        Self {
            service_context: Arc::new(service_context),
            web: Arc::new(web),
            readiness,
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Cookie and redirect settings
    pub fn web(&self) -> &WebSettings {
        &self.web
    }

    /// Dependency checks for `/health/ready`
    pub fn readiness(&self) -> &dyn ReadinessProbe {
        self.readiness.as_ref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &self.service_context)
            .field("web", &self.web)
            .finish_non_exhaustive()
    }
}
