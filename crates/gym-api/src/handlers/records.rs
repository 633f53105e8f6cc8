//! Personal records and ranking handlers

use axum::{extract::State, Json};
use gym_service::dto::{MyRecordsResponse, RankingQuery, RankingResponse};
use gym_service::{RankingService, RecordService};

use crate::extractors::{AuthUser, ValidatedQuery};
use crate::response::ApiResult;
use crate::state::AppState;

/// Current member's profile, month summary and records
///
/// GET /api/v1/me
pub async fn my_records(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<MyRecordsResponse>> {
    let service = RecordService::new(state.service_context());
    let response = service.my_records(&auth.member_id).await?;
    Ok(Json(response))
}

/// Monthly leaderboard
///
/// GET /api/v1/ranking?year&month
pub async fn ranking(
    State(state): State<AppState>,
    _auth: AuthUser,
    ValidatedQuery(query): ValidatedQuery<RankingQuery>,
) -> ApiResult<Json<RankingResponse>> {
    let service = RankingService::new(state.service_context());
    let response = service.monthly(query).await?;
    Ok(Json(response))
}
