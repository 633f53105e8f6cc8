//! Path parameter extractors

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use gym_core::MemberId;

use crate::response::ApiError;

/// Member id from the `:id` path segment
#[derive(Debug, Clone)]
pub struct MemberIdPath(pub MemberId);

#[async_trait]
impl<S> FromRequestParts<S> for MemberIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        MemberId::parse(&raw)
            .map(MemberIdPath)
            .map_err(|e| ApiError::invalid_path(format!("Invalid member id: {e}")))
    }
}
