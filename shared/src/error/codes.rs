//! Unified error codes
//!
//! Error codes shared between the server and its clients, organized by
//! category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Leave request errors
//! - 5xxx: Work log errors
//! - 8xxx: User errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,

    // ==================== 4xxx: Leave Request ====================
    /// Leave request not found
    RequestNotFound = 4001,
    /// Leave request already approved
    RequestAlreadyApproved = 4002,
    /// Unknown leave request status
    InvalidRequestStatus = 4003,
    /// Signature payload missing or malformed
    InvalidSignature = 4004,
    /// Signature not found on record
    SignatureNotFound = 4005,

    // ==================== 5xxx: Work Log ====================
    /// Work log submission not found
    WorkLogNotFound = 5001,
    /// Work log file missing from upload
    WorkLogFileMissing = 5002,
    /// Unknown work log status
    InvalidWorkLogStatus = 5003,

    // ==================== 8xxx: User ====================
    /// User not found
    UserNotFound = 8001,
    /// Username already exists
    UsernameExists = 8002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Record store error
    StorageError = 9002,
    /// Blob store error
    BlobError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Whether this code represents success
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::InvalidFormat => "Invalid format",
            Self::RequiredField => "Required field missing",

            // Auth
            Self::NotAuthenticated => "Authentication required",
            Self::InvalidCredentials => "Invalid username or password",
            Self::TokenExpired => "Token has expired",
            Self::TokenInvalid => "Token is invalid",

            // Permission
            Self::PermissionDenied => "Permission denied",
            Self::RoleRequired => "Required role missing",

            // Leave request
            Self::RequestNotFound => "Leave request not found",
            Self::RequestAlreadyApproved => "Leave request already approved",
            Self::InvalidRequestStatus => "Unknown leave request status",
            Self::InvalidSignature => "Signature payload missing or malformed",
            Self::SignatureNotFound => "Signature not found",

            // Work log
            Self::WorkLogNotFound => "Work log submission not found",
            Self::WorkLogFileMissing => "Work log file missing",
            Self::InvalidWorkLogStatus => "Unknown work log status",

            // User
            Self::UserNotFound => "User not found",
            Self::UsernameExists => "Username already exists",

            // System
            Self::InternalError => "Internal server error",
            Self::StorageError => "Record store error",
            Self::BlobError => "Blob store error",
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::RoleRequired),

            // Leave request
            4001 => Ok(ErrorCode::RequestNotFound),
            4002 => Ok(ErrorCode::RequestAlreadyApproved),
            4003 => Ok(ErrorCode::InvalidRequestStatus),
            4004 => Ok(ErrorCode::InvalidSignature),
            4005 => Ok(ErrorCode::SignatureNotFound),

            // Work log
            5001 => Ok(ErrorCode::WorkLogNotFound),
            5002 => Ok(ErrorCode::WorkLogFileMissing),
            5003 => Ok(ErrorCode::InvalidWorkLogStatus),

            // User
            8001 => Ok(ErrorCode::UserNotFound),
            8002 => Ok(ErrorCode::UsernameExists),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::StorageError),
            9003 => Ok(ErrorCode::BlobError),

            other => Err(InvalidErrorCode(other)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
