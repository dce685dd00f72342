//! Server-side field validation
//!
//! The authoritative checks behind every submission payload. Failures are
//! collected per field and reported all at once, never just the first.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::NaiveDate;
use shared::error::{AppError, ErrorCode};
use shared::models::{Department, LeaveType};
use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// Strict `YYYY-MM-DD` date format
pub fn validate_date(value: &str) -> Result<(), ValidationError> {
    if value.len() == 10 && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok() {
        return Ok(());
    }
    Err(ValidationError::new("date_format")
        .with_message(Cow::Borrowed("must be a date in YYYY-MM-DD format")))
}

/// Parse a date already known to be valid
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Phone number: digits, dash, space, parens, plus; length 7–20
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let ok_chars = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '-' | ' ' | '(' | ')' | '+'));
    if ok_chars && (7..=20).contains(&value.len()) {
        return Ok(());
    }
    Err(ValidationError::new("phone_format").with_message(Cow::Borrowed(
        "must contain only digits, dashes, spaces, parens, or plus, length 7-20",
    )))
}

/// Signature payload: a PNG or JPEG base64 data URL
pub fn validate_signature_data_url(value: &str) -> Result<(), ValidationError> {
    let payload = value
        .strip_prefix("data:image/png;base64,")
        .or_else(|| value.strip_prefix("data:image/jpeg;base64,"));

    match payload {
        Some(encoded) if !encoded.is_empty() && BASE64.decode(encoded).is_ok() => Ok(()),
        _ => Err(ValidationError::new("signature_format").with_message(Cow::Borrowed(
            "must be a base64 data URL with MIME type image/png or image/jpeg",
        ))),
    }
}

/// Department must belong to the closed set
pub fn validate_department(value: &str) -> Result<(), ValidationError> {
    value.parse::<Department>().map(|_| ()).map_err(|_| {
        ValidationError::new("department")
            .with_message(Cow::Borrowed("is not a recognized department"))
    })
}

/// Leave type must belong to the closed set
pub fn validate_leave_type(value: &str) -> Result<(), ValidationError> {
    value.parse::<LeaveType>().map(|_| ()).map_err(|_| {
        ValidationError::new("leave_type")
            .with_message(Cow::Borrowed("is not a recognized leave type"))
    })
}

/// Convert collected validator errors into an [`AppError`] whose details
/// map carries one entry per violated field, keyed in camelCase to match
/// the wire format
pub fn into_app_error(errors: &ValidationErrors) -> AppError {
    let mut app_error = AppError::new(ErrorCode::ValidationFailed);

    for (field, kind) in errors.errors() {
        if let ValidationErrorsKind::Field(field_errors) = kind {
            let messages: Vec<String> = field_errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            app_error = app_error.with_detail(camel_case(field), messages.join("; "));
        }
    }

    app_error
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
