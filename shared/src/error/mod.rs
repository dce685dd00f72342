//! Unified error system
//!
//! - [`ErrorCode`]: standardized error codes for every failure the API can
//!   report
//! - [`ErrorCategory`]: classification of errors by domain
//! - [`AppError`]: error type carrying a code, a message, and structured
//!   field-level details
//! - [`ApiResponse`]: the unified API response envelope
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Leave request errors
//! - 5xxx: Work log errors
//! - 8xxx: User errors
//! - 9xxx: System errors

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
