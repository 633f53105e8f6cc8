//! AttendanceRecord entity <-> model mapper

use gym_core::entities::AttendanceRecord;
use gym_core::error::DomainError;
use gym_core::value_objects::{AttendanceStatus, MemberId};

use crate::models::AttendanceModel;

/// Convert AttendanceModel to AttendanceRecord entity
impl TryFrom<AttendanceModel> for AttendanceRecord {
    type Error = DomainError;

    fn try_from(model: AttendanceModel) -> Result<Self, Self::Error> {
        let status = AttendanceStatus::parse(&model.status).ok_or_else(|| {
            DomainError::DatabaseError(format!("Invalid attendance status: {}", model.status))
        })?;

        Ok(AttendanceRecord {
            member_id: MemberId::new(model.member_id),
            date: model.date,
            status,
            point: model.point,
            created_at: model.created_at,
        })
    }
}

/// Convert a batch of rows, failing on the first malformed one
pub fn records_from_models(models: Vec<AttendanceModel>) -> Result<Vec<AttendanceRecord>, DomainError> {
    models.into_iter().map(AttendanceRecord::try_from).collect()
}
