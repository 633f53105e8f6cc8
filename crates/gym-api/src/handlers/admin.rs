//! Administrator handlers
//!
//! Every handler passes the caller to the service, which refuses anyone not
//! on the administrator list.

use axum::{extract::State, Json};
use gym_service::dto::{
    DashboardResponse, LedgerEditRequest, LedgerEditResponse, MemberDetailResponse,
    MemberResponse, PurgeResponse, UpdateMemberRequest,
};
use gym_service::AdminService;

use crate::extractors::{AuthUser, MemberIdPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Absence dashboard
///
/// GET /api/v1/admin/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<DashboardResponse>> {
    let service = AdminService::new(state.service_context());
    let response = service.dashboard(&auth.member_id).await?;
    Ok(Json(response))
}

/// All members
///
/// GET /api/v1/admin/members
pub async fn list_members(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<MemberResponse>>> {
    let service = AdminService::new(state.service_context());
    let members = service.list_members(&auth.member_id).await?;
    Ok(Json(members))
}

/// One member with the full ledger
///
/// GET /api/v1/admin/members/{id}
pub async fn get_member(
    State(state): State<AppState>,
    auth: AuthUser,
    MemberIdPath(member_id): MemberIdPath,
) -> ApiResult<Json<MemberDetailResponse>> {
    let service = AdminService::new(state.service_context());
    let detail = service.member_detail(&auth.member_id, &member_id).await?;
    Ok(Json(detail))
}

/// Edit nickname, approval, sick leave, unnotified markers or batch
///
/// PATCH /api/v1/admin/members/{id}
pub async fn update_member(
    State(state): State<AppState>,
    auth: AuthUser,
    MemberIdPath(member_id): MemberIdPath,
    ValidatedJson(request): ValidatedJson<UpdateMemberRequest>,
) -> ApiResult<Json<MemberResponse>> {
    let service = AdminService::new(state.service_context());
    let member = service
        .update_member(&auth.member_id, &member_id, request)
        .await?;
    Ok(Json(member))
}

/// Set or clear ledger entries
///
/// PUT /api/v1/admin/members/{id}/attendance
pub async fn edit_ledger(
    State(state): State<AppState>,
    auth: AuthUser,
    MemberIdPath(member_id): MemberIdPath,
    ValidatedJson(request): ValidatedJson<LedgerEditRequest>,
) -> ApiResult<Json<LedgerEditResponse>> {
    let service = AdminService::new(state.service_context());
    let response = service
        .edit_ledger(&auth.member_id, &member_id, request)
        .await?;
    Ok(Json(response))
}

/// Delete the member and the whole ledger
///
/// DELETE /api/v1/admin/members/{id}
pub async fn purge_member(
    State(state): State<AppState>,
    auth: AuthUser,
    MemberIdPath(member_id): MemberIdPath,
) -> ApiResult<Json<PurgeResponse>> {
    let service = AdminService::new(state.service_context());
    let response = service.purge_member(&auth.member_id, &member_id).await?;
    Ok(Json(response))
}
