//! Test fixtures and data generators
//!
//! Members are seeded straight into the database; logging in through the
//! real provider is not possible from a test.

use anyhow::Result;
use gym_core::traits::MemberRepository;
use gym_core::{ApprovalState, Member, MemberId};
use gym_db::{PgMemberRepository, PgPool};
use serde::{Deserialize, Serialize};

/// Fresh member id that no other test uses
pub fn unique_member_id() -> String {
    format!("it-{}", uuid::Uuid::new_v4().simple())
}

/// Insert a member with the given approval state
pub async fn seed_member(pool: &PgPool, nickname: &str, approval: ApprovalState) -> Result<String> {
    let id = unique_member_id();
    let repo = PgMemberRepository::new(pool.clone());

    let mut member = Member::new(MemberId::from(id.as_str()), nickname, None);
    repo.create(&member).await?;
    if approval != ApprovalState::Pending {
        member.approval = approval;
        repo.update(&member).await?;
    }
    Ok(id)
}

/// Error envelope returned by every failing endpoint
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// Subset of the check-in status panel
#[derive(Debug, Deserialize)]
pub struct StatusPanel {
    pub is_authenticated: bool,
    pub is_ip_valid: bool,
    pub client_ip: String,
    pub time_status: String,
    pub already_attended: bool,
}

/// Subset of a member as returned by admin endpoints
#[derive(Debug, Deserialize)]
pub struct MemberView {
    pub id: String,
    pub nickname: String,
    pub approval: String,
    pub batch: Option<String>,
}

/// Ledger edit body
#[derive(Debug, Serialize)]
pub struct LedgerEdit {
    pub entries: Vec<LedgerLine>,
}

#[derive(Debug, Serialize)]
pub struct LedgerLine {
    pub date: String,
    pub status: String,
}

impl LedgerEdit {
    pub fn mark(entries: &[(&str, &str)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(date, status)| LedgerLine {
                    date: (*date).to_string(),
                    status: (*status).to_string(),
                })
                .collect(),
        }
    }
}
