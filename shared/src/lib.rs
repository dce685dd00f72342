//! Shared types for the leave & work-log service
//!
//! Common types used by the server and its tests: domain models,
//! error codes, and the unified API response envelope.

pub mod error;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{
    Department, LeaveRequest, LeaveStatus, LeaveType, Role, User, UserInfo, WorkLogStatus,
    WorkLogSubmission,
};
