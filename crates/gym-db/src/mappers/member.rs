//! Member entity <-> model mapper

use gym_core::entities::Member;
use gym_core::value_objects::{ApprovalState, MemberId};
use tracing::warn;

use crate::models::MemberModel;

/// Convert MemberModel to Member entity
///
/// Approval is normalized here and nowhere else.
impl From<MemberModel> for Member {
    fn from(model: MemberModel) -> Self {
        let approval = ApprovalState::normalize(&model.approval).unwrap_or_else(|| {
            warn!(member_id = %model.id, raw = %model.approval, "Unknown approval value, treating as pending");
            ApprovalState::Pending
        });

        Member {
            id: MemberId::new(model.id),
            nickname: model.nickname,
            initial_nickname: model.initial_nickname,
            profile_image: model.profile_image,
            approval,
            sick_leave: model.sick_leave,
            unnotified_absence_1: model.unnotified_absence_1,
            unnotified_absence_2: model.unnotified_absence_2,
            batch: model.batch,
            created_at: model.created_at,
            last_login_at: model.last_login_at,
            updated_at: model.updated_at,
        }
    }
}

/// Member values for database insertion
pub struct MemberInsert<'a> {
    pub id: &'a str,
    pub nickname: &'a str,
    pub initial_nickname: &'a str,
    pub profile_image: Option<&'a str>,
    pub approval: &'static str,
}

impl<'a> MemberInsert<'a> {
    pub fn new(member: &'a Member) -> Self {
        Self {
            id: member.id.as_str(),
            nickname: &member.nickname,
            initial_nickname: &member.initial_nickname,
            profile_image: member.profile_image.as_deref(),
            approval: member.approval.as_str(),
        }
    }
}

/// Member values for an administrator update
pub struct MemberUpdate<'a> {
    pub id: &'a str,
    pub nickname: &'a str,
    pub approval: &'static str,
    pub sick_leave: bool,
    pub unnotified_absence_1: Option<chrono::NaiveDate>,
    pub unnotified_absence_2: Option<chrono::NaiveDate>,
    pub batch: Option<&'a str>,
}

impl<'a> MemberUpdate<'a> {
    pub fn new(member: &'a Member) -> Self {
        Self {
            id: member.id.as_str(),
            nickname: &member.nickname,
            approval: member.approval.as_str(),
            sick_leave: member.sick_leave,
            unnotified_absence_1: member.unnotified_absence_1,
            unnotified_absence_2: member.unnotified_absence_2,
            batch: member.batch.as_deref(),
        }
    }
}
