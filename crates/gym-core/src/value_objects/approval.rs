//! Member approval state
//!
//! Older records carried approval under different field names and spellings
//! (`is_auth` booleans, a free-form `status` string). Everything is folded into
//! [`ApprovalState`] by [`ApprovalState::normalize`] at the data-access
//! boundary; nothing else should look at raw strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Approval state of a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalState {
    /// Logged in at least once, waiting for an administrator
    #[default]
    Pending,
    /// Full member: appears on the leaderboard and the dashboard
    Approved,
    /// Left the club; history is kept but hidden from rankings
    Withdrawn,
}

impl ApprovalState {
    /// Canonical storage representation
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Withdrawn => "withdrawn",
        }
    }

    /// Parse a canonical value (strict)
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "withdrawn" => Some(Self::Withdrawn),
            _ => None,
        }
    }

    /// Normalize any historical spelling into an approval state
    ///
    /// Returns `None` when the value is not recognized at all; callers decide
    /// the fallback.
    pub fn normalize(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "approved" | "approve" | "auth" | "authorized" | "true" | "1" | "active" => {
                Some(Self::Approved)
            }
            "pending" | "wait" | "waiting" | "false" | "0" | "" => Some(Self::Pending),
            "withdrawn" | "withdraw" | "left" | "quit" | "inactive" => Some(Self::Withdrawn),
            _ => None,
        }
    }

    /// Whether the member appears on the leaderboard
    #[inline]
    pub fn is_ranked(self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl fmt::Display for ApprovalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
