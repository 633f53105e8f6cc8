//! Check-in handlers

use axum::{extract::State, Json};
use gym_service::dto::{AttendanceStatusResponse, CheckInResponse};
use gym_service::AttendanceService;

use crate::extractors::{AuthUser, ClientIp, OptionalAuthUser};
use crate::response::ApiResult;
use crate::state::AppState;

/// Check in for today
///
/// POST /api/v1/attendance
pub async fn check_in(
    State(state): State<AppState>,
    auth: AuthUser,
    ClientIp(client_ip): ClientIp,
) -> ApiResult<Json<CheckInResponse>> {
    let service = AttendanceService::new(state.service_context());
    let response = service.check_in(&auth.member_id, &client_ip).await?;
    Ok(Json(response))
}

/// Check-in status panel; works without a session
///
/// GET /api/v1/attendance/status
pub async fn attendance_status(
    State(state): State<AppState>,
    OptionalAuthUser(auth): OptionalAuthUser,
    ClientIp(client_ip): ClientIp,
) -> ApiResult<Json<AttendanceStatusResponse>> {
    let service = AttendanceService::new(state.service_context());
    let member_id = auth.map(|a| a.member_id);
    let response = service.status(member_id.as_ref(), &client_ip).await?;
    Ok(Json(response))
}
