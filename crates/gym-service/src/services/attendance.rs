//! Check-in service
//!
//! A check-in passes three gates in a fixed order: the request must come from
//! an allowed address, the clock must be inside a window, and the conditional
//! insert must find no record for today. Approval is not checked here; it only
//! decides who appears on the leaderboard and the dashboard.

use gym_core::error::DomainError;
use gym_core::value_objects::MemberId;
use tracing::{info, instrument};

use crate::dto::{AttendanceStatusResponse, CheckInResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Check-in service
pub struct AttendanceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AttendanceService<'a> {
    /// Create a new AttendanceService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Check the member in for today
    #[instrument(skip(self))]
    pub async fn check_in(&self, member_id: &MemberId, client_ip: &str) -> ServiceResult<CheckInResponse> {
        // a purged member may still hold a valid session
        self.ctx
            .member_repo()
            .find_by_id(member_id)
            .await?
            .ok_or_else(|| DomainError::MemberNotFound(member_id.clone()))?;

        if !self.ctx.location().is_allowed(client_ip) {
            info!("Check-in refused: address not allowed");
            return Err(DomainError::LocationNotAllowed(client_ip.to_string()).into());
        }

        let now = self.ctx.now();
        let window = self.ctx.schedule().classify(&now);
        let Some(status) = window.phase.attendance_status() else {
            info!(phase = window.phase.as_str(), "Check-in refused: outside window");
            return Err(DomainError::WindowClosed {
                phase: window.phase,
                message: window.message.to_string(),
            }
            .into());
        };

        let date = self.ctx.schedule().local_date(&now);
        let record = self
            .ctx
            .attendance_repo()
            .add_record(member_id, date, status)
            .await?;

        let point = record.point.unwrap_or_else(|| status.legacy_points());
        info!(%date, status = status.as_str(), "Checked in");

        Ok(CheckInResponse {
            date,
            status,
            point,
            message: format!("Checked in: {status} (+{point} points)"),
        })
    }

    /// Status panel: who is asking, from where, and whether the window is open
    #[instrument(skip(self))]
    pub async fn status(
        &self,
        member_id: Option<&MemberId>,
        client_ip: &str,
    ) -> ServiceResult<AttendanceStatusResponse> {
        let now = self.ctx.now();
        let today = self.ctx.schedule().local_date(&now);
        let window = self.ctx.schedule().classify(&now);

        let already_attended = match member_id {
            Some(id) => self.ctx.attendance_repo().has_record(id, today).await?,
            None => false,
        };

        Ok(AttendanceStatusResponse {
            is_authenticated: member_id.is_some(),
            is_ip_valid: self.ctx.location().is_allowed(client_ip),
            client_ip: client_ip.to_string(),
            time_status: window.phase,
            time_message: window.message,
            already_attended,
            today,
        })
    }
}
