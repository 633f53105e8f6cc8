//! Route definitions
//!
//! Login routes live at the root (the provider redirects the browser there);
//! everything else is mounted under /api/v1.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{admin, attendance, auth, health, records};
use crate::state::AppState;

/// Create the main router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Browser login routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/kakao/login", get(auth::kakao_login))
        .route("/auth/kakao/callback", get(auth::kakao_callback))
        .route("/auth/logout", post(auth::logout))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(member_routes())
        .merge(admin_routes())
}

/// Check-in, records and ranking
fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/attendance", post(attendance::check_in))
        .route("/attendance/status", get(attendance::attendance_status))
        .route("/me", get(records::my_records))
        .route("/ranking", get(records::ranking))
}

/// Administrator routes
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/dashboard", get(admin::dashboard))
        .route("/admin/members", get(admin::list_members))
        .route(
            "/admin/members/:id",
            get(admin::get_member)
                .patch(admin::update_member)
                .delete(admin::purge_member),
        )
        .route("/admin/members/:id/attendance", put(admin::edit_ledger))
}
