//! Member database model

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Database model for members table
#[derive(Debug, Clone, FromRow)]
pub struct MemberModel {
    pub id: String,
    pub nickname: String,
    pub initial_nickname: String,
    pub profile_image: Option<String>,
    pub approval: String,
    pub sick_leave: bool,
    pub unnotified_absence_1: Option<NaiveDate>,
    pub unnotified_absence_2: Option<NaiveDate>,
    pub batch: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_login_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
