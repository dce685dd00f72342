//! Work-log submission model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::leave_request::UnknownStatus;

/// Work-log submission status
///
/// Unlike leave requests, work logs carry no approver bookkeeping, so
/// status updates may move freely between the three states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkLogStatus {
    Pending,
    Approved,
    Rejected,
}

impl WorkLogStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for WorkLogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkLogStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Approved" => Ok(Self::Approved),
            "Rejected" => Ok(Self::Rejected),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Work-log submission record
///
/// `signature` and `stored_file_reference` are mandatory at creation; a
/// submission without both is rejected before anything is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkLogSubmission {
    pub id: Uuid,
    pub uploader_id: Uuid,
    /// Original file name as supplied by the client
    pub file_name: String,
    /// Opaque handle returned by the blob store
    pub stored_file_reference: String,
    /// PNG/JPEG data URL captured at upload
    pub signature: String,
    pub status: WorkLogStatus,
    pub created_at: DateTime<Utc>,
}
