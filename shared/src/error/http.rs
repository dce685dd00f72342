//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 400 Bad Request
            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::InvalidFormat
            | Self::RequiredField
            | Self::InvalidRequestStatus
            | Self::InvalidWorkLogStatus
            | Self::InvalidSignature
            | Self::WorkLogFileMissing => StatusCode::BAD_REQUEST,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied | Self::RoleRequired => StatusCode::FORBIDDEN,

            // 404 Not Found
            Self::NotFound
            | Self::RequestNotFound
            | Self::SignatureNotFound
            | Self::WorkLogNotFound
            | Self::UserNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists | Self::RequestAlreadyApproved | Self::UsernameExists => {
                StatusCode::CONFLICT
            }

            // 500 Internal Server Error
            Self::Unknown
            | Self::InternalError
            | Self::StorageError
            | Self::BlobError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
