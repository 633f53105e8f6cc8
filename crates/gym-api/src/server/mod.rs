//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use gym_cache::{OAuthStateStore, RedisPool};
use gym_common::{AppConfig, AppError, SessionService};
use gym_db::{create_pool, schema, PgAttendanceRepository, PgMemberRepository};
use gym_service::{KakaoProvider, ServiceContext};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::{AppState, InfraProbe, WebSettings};

/// Build the application without rate limiting
///
/// Used by tests that drive the router directly, where no peer address is
/// available to key the limiter on.
pub fn create_app(state: AppState) -> Router {
    let router = create_router().merge(health_routes());
    apply_middleware(router).with_state(state)
}

/// Build the complete application with rate limiting and configured CORS
///
/// Health routes are merged after the limiter so probes are never throttled.
pub fn create_app_with_config(state: AppState, config: &AppConfig) -> Result<Router, AppError> {
    let router = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;
    Ok(router.merge(health_routes()).with_state(state))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: &AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let db_config = gym_db::DatabaseConfig::from(&config.database);
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    schema::apply(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    // Create Redis pool
    info!("Connecting to Redis...");
    let redis_pool = RedisPool::from_config(&config.redis).map_err(|e| AppError::Cache(e.to_string()))?;
    redis_pool
        .health_check()
        .await
        .map_err(|e| AppError::Cache(e.to_string()))?;
    info!("Redis connection established");

    let identity = KakaoProvider::new(config.oauth.clone())
        .map_err(|e| AppError::Config(format!("Failed to build identity provider client: {e}")))?;

    let service_context = ServiceContext::builder()
        .member_repo(Arc::new(PgMemberRepository::new(pool.clone())))
        .attendance_repo(Arc::new(PgAttendanceRepository::new(pool.clone())))
        .login_states(Arc::new(OAuthStateStore::with_ttl(
            redis_pool.clone(),
            config.oauth.state_ttl,
        )))
        .identity(Arc::new(identity))
        .sessions(Arc::new(SessionService::new(
            &config.session.secret,
            config.session.max_age,
        )))
        .schedule(config.attendance.schedule)
        .location(config.attendance.location_policy())
        .admins(config.admin.admin_list())
        .rank_mode(config.attendance.rank_mode)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    info!(
        allowed_ips = config.attendance.allowed_ips.len(),
        admins = config.admin.member_ids.len(),
        rank_mode = ?config.attendance.rank_mode,
        "Service context ready"
    );

    Ok(AppState::new(
        service_context,
        WebSettings::from_config(config),
        Arc::new(InfraProbe::new(pool, redis_pool)),
    ))
}

/// Run the HTTP server
///
/// The router is served with `ConnectInfo` so handlers and the rate limiter
/// can see the peer address.
pub async fn run_server(app: Router, listener: TcpListener) -> Result<(), AppError> {
    let addr = listener
        .local_addr()
        .map_err(|e| AppError::Config(format!("Failed to read listener address: {e}")))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    let state = create_app_state(&config).await?;
    let app = create_app_with_config(state, &config)?;

    info!("Starting HTTP server on {}", addr);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    run_server(app, listener).await
}
