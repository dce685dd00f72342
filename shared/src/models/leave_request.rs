//! Leave request model and its closed enums

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Leave request status
///
/// `Pending` is the initial state; the others are terminal. `Approved` is
/// enforced as terminal on every transition path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
    Canceled,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Canceled => "Canceled",
        }
    }

    /// Whether no further transition is expected from this status
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for LeaveStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Approved" => Ok(Self::Approved),
            "Rejected" => Ok(Self::Rejected),
            "Canceled" => Ok(Self::Canceled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Closed department set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    /// 개발팀
    #[serde(rename = "개발팀")]
    Development,
    /// 디자인팀
    #[serde(rename = "디자인팀")]
    Design,
    /// 영업팀
    #[serde(rename = "영업팀")]
    Sales,
    /// 경영지원팀
    #[serde(rename = "경영지원팀")]
    Management,
}

impl Department {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "개발팀",
            Self::Design => "디자인팀",
            Self::Sales => "영업팀",
            Self::Management => "경영지원팀",
        }
    }
}

impl FromStr for Department {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "개발팀" => Ok(Self::Development),
            "디자인팀" => Ok(Self::Design),
            "영업팀" => Ok(Self::Sales),
            "경영지원팀" => Ok(Self::Management),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Closed leave type set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeaveType {
    /// 연차 (annual leave)
    #[serde(rename = "연차")]
    Annual,
    /// 반차 (half day)
    #[serde(rename = "반차")]
    HalfDay,
    /// 병가 (sick leave)
    #[serde(rename = "병가")]
    Sick,
    /// 경조 (family event)
    #[serde(rename = "경조")]
    FamilyEvent,
}

impl LeaveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "연차",
            Self::HalfDay => "반차",
            Self::Sick => "병가",
            Self::FamilyEvent => "경조",
        }
    }
}

impl FromStr for LeaveType {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "연차" => Ok(Self::Annual),
            "반차" => Ok(Self::HalfDay),
            "병가" => Ok(Self::Sick),
            "경조" => Ok(Self::FamilyEvent),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Leave request record
///
/// `requester_id` is bound to the authenticated caller at creation and
/// never changes. The three approver fields are unset until the request is
/// approved, then set atomically together.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub request_id: Uuid,
    pub requester_id: Uuid,
    pub date_requested: NaiveDate,
    pub emp_id: String,
    pub name: String,
    pub dept: Department,
    pub position: String,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub note: String,
    pub handover_person: String,
    pub contact: String,
    pub status: LeaveStatus,
    /// PNG/JPEG data URL captured at submission
    pub requester_signature: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approver_signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approver_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!("Pending".parse::<LeaveStatus>().unwrap(), LeaveStatus::Pending);
        assert_eq!(
            "Canceled".parse::<LeaveStatus>().unwrap(),
            LeaveStatus::Canceled
        );
        assert!("pending".parse::<LeaveStatus>().is_err());
        assert!("Done".parse::<LeaveStatus>().is_err());
    }

    #[test]
    fn test_terminal_states() {
        assert!(!LeaveStatus::Pending.is_terminal());
        assert!(LeaveStatus::Approved.is_terminal());
        assert!(LeaveStatus::Rejected.is_terminal());
        assert!(LeaveStatus::Canceled.is_terminal());
    }

    #[test]
    fn test_department_closed_set() {
        assert_eq!("개발팀".parse::<Department>().unwrap(), Department::Development);
        assert!("총무팀".parse::<Department>().is_err());
        assert_eq!(
            serde_json::to_string(&Department::Sales).unwrap(),
            "\"영업팀\""
        );
    }

    #[test]
    fn test_leave_type_closed_set() {
        assert_eq!("연차".parse::<LeaveType>().unwrap(), LeaveType::Annual);
        assert!("월차".parse::<LeaveType>().is_err());
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record = LeaveRequest {
            request_id: Uuid::new_v4(),
            requester_id: Uuid::new_v4(),
            date_requested: NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            emp_id: "E-100".to_string(),
            name: "김철수".to_string(),
            dept: Department::Development,
            position: "사원".to_string(),
            leave_type: LeaveType::Annual,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 1, 12).unwrap(),
            note: String::new(),
            handover_person: "이영희".to_string(),
            contact: "010-1234-5678".to_string(),
            status: LeaveStatus::Pending,
            requester_signature: "data:image/png;base64,AAAA".to_string(),
            approver_signature: None,
            approver_id: None,
            approved_at: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["status"], "Pending");
        assert_eq!(json["startDate"], "2025-01-10");
        assert!(json.get("approverId").is_none());
    }
}
