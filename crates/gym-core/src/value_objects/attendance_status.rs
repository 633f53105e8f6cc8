//! Attendance status stored on a ledger record

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of an attendance record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Late,
}

impl AttendanceStatus {
    /// Storage representation
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Late => "late",
        }
    }

    /// Parse from storage representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "present" => Some(Self::Present),
            "late" => Some(Self::Late),
            _ => None,
        }
    }

    /// Legacy point value written alongside the record
    pub fn legacy_points(self) -> i32 {
        match self {
            Self::Present => 10,
            Self::Late => 5,
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
