//! Monthly leaderboard
//!
//! Only `present` records count; late arrivals are excluded so the board
//! rewards punctuality. Members that are not approved never appear.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::Datelike;
use serde::Serialize;

use super::class_days::attendance_rate;
use crate::entities::{AttendanceRecord, Member};
use crate::value_objects::MemberId;

/// How tied counts are numbered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RankMode {
    /// `[5,5,3,1]` -> `[1,1,2,3]`
    #[default]
    Dense,
    /// `[5,5,3,1]` -> `[1,1,3,4]`
    Competition,
}

impl FromStr for RankMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dense" => Ok(Self::Dense),
            "competition" | "standard" => Ok(Self::Competition),
            other => Err(format!("unknown ranking tie policy: {other}")),
        }
    }
}

/// One leaderboard line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankEntry {
    pub rank: u32,
    pub member_id: MemberId,
    pub nickname: String,
    pub count: u32,
    pub rate: u32,
}

/// Build the leaderboard for a month
///
/// `valid_days` is the month's shared rate denominator.
pub fn rank_month(
    year: i32,
    month: u32,
    records: &[AttendanceRecord],
    members: &[Member],
    valid_days: u32,
    mode: RankMode,
) -> Vec<RankEntry> {
    let mut counts: HashMap<&MemberId, u32> = HashMap::new();
    for record in records {
        if record.date.year() == year && record.date.month() == month && record.is_present() {
            *counts.entry(&record.member_id).or_default() += 1;
        }
    }

    let mut rows: Vec<(&Member, u32)> = members
        .iter()
        .filter(|m| m.approval.is_ranked())
        .filter_map(|m| counts.get(&m.id).map(|&c| (m, c)))
        .collect();

    rows.sort_by(|(a, ca), (b, cb)| {
        cb.cmp(ca)
            .then_with(|| a.nickname.cmp(&b.nickname))
            .then_with(|| a.id.cmp(&b.id))
    });

    let ranks = assign_ranks(rows.iter().map(|(_, c)| *c), mode);

    rows.into_iter()
        .zip(ranks)
        .map(|((member, count), rank)| RankEntry {
            rank,
            member_id: member.id.clone(),
            nickname: member.nickname.clone(),
            count,
            rate: attendance_rate(count, valid_days),
        })
        .collect()
}

/// Rank numbers for counts already sorted in descending order
pub fn assign_ranks<I>(sorted_counts: I, mode: RankMode) -> Vec<u32>
where
    I: IntoIterator<Item = u32>,
{
    let mut ranks = Vec::new();
    let mut prev: Option<u32> = None;
    let mut rank = 0u32;

    for (position, count) in (1u32..).zip(sorted_counts) {
        if prev != Some(count) {
            rank = match mode {
                RankMode::Dense => rank + 1,
                RankMode::Competition => position,
            };
            prev = Some(count);
        }
        ranks.push(rank);
    }

    ranks
}
