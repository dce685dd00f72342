//! Leave request handlers
//!
//! The allowed-role set of every operation is declared here, next to its
//! handler, and checked by the guard before any repository access.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{Department, LeaveRequest, LeaveStatus, LeaveType, Role};
use uuid::Uuid;
use validator::Validate;

use crate::auth::{CurrentUser, guard};
use crate::core::ServerState;
use crate::validation::{
    into_app_error, parse_date, validate_date, validate_department, validate_leave_type,
    validate_phone, validate_signature_data_url,
};

/// Roles allowed to submit a request
const SUBMIT_ROLES: &[Role] = &[Role::Employee, Role::Admin];
/// Roles allowed to change a request's status
const REVIEW_ROLES: &[Role] = &[Role::Manager, Role::Admin];
/// Roles allowed to view the recent-activity listing
const RECENT_ROLES: &[Role] = &[Role::Manager, Role::Hr, Role::Admin];

/// Submission payload
///
/// All fields arrive as strings and are validated together; the response
/// enumerates every violated field at once.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitLeaveRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub emp_id: String,
    #[validate(length(min = 1, message = "is required"))]
    pub name: String,
    #[validate(custom(function = validate_department))]
    pub dept: String,
    #[validate(length(min = 1, message = "is required"))]
    pub position: String,
    #[validate(custom(function = validate_leave_type))]
    pub leave_type: String,
    #[validate(custom(function = validate_date))]
    pub start_date: String,
    #[validate(custom(function = validate_date))]
    pub end_date: String,
    #[serde(default)]
    pub note: String,
    #[validate(length(min = 1, message = "is required"))]
    pub handover_person: String,
    #[validate(custom(function = validate_phone))]
    pub contact: String,
    #[validate(custom(function = validate_signature_data_url))]
    pub signature_data_url: String,
}

/// Fields that survive validation in parsed form
#[derive(Debug)]
struct ParsedFields {
    dept: Department,
    leave_type: LeaveType,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

/// Validate the whole payload, including the cross-field date-range rule
fn validate_submission(payload: &SubmitLeaveRequest) -> Result<ParsedFields, AppError> {
    let mut error = match payload.validate() {
        Ok(()) => None,
        Err(errors) => Some(into_app_error(&errors)),
    };

    if let (Some(start), Some(end)) = (
        parse_date(&payload.start_date),
        parse_date(&payload.end_date),
    ) && end < start
    {
        error = Some(
            error
                .unwrap_or_else(|| AppError::new(ErrorCode::ValidationFailed))
                .with_detail("endDate", "must not be before startDate"),
        );
    }

    if let Some(error) = error {
        return Err(error);
    }

    // every parse below was checked above
    Ok(ParsedFields {
        dept: payload
            .dept
            .parse()
            .map_err(|_| AppError::internal("validated dept failed to parse"))?,
        leave_type: payload
            .leave_type
            .parse()
            .map_err(|_| AppError::internal("validated leave type failed to parse"))?,
        start_date: parse_date(&payload.start_date)
            .ok_or_else(|| AppError::internal("validated start date failed to parse"))?,
        end_date: parse_date(&payload.end_date)
            .ok_or_else(|| AppError::internal("validated end date failed to parse"))?,
    })
}

/// Submit a new leave request [employee, admin]
///
/// `requesterId` is bound to the authenticated caller, never to a
/// client-supplied value.
pub async fn submit(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<SubmitLeaveRequest>,
) -> Result<(StatusCode, Json<ApiResponse<LeaveRequest>>), AppError> {
    guard::require(&user, SUBMIT_ROLES)?;
    let parsed = validate_submission(&payload)?;

    let record = state.leave_requests().create(LeaveRequest {
        request_id: Uuid::new_v4(),
        requester_id: user.id,
        date_requested: Utc::now().date_naive(),
        emp_id: payload.emp_id,
        name: payload.name,
        dept: parsed.dept,
        position: payload.position,
        leave_type: parsed.leave_type,
        start_date: parsed.start_date,
        end_date: parsed.end_date,
        note: payload.note,
        handover_person: payload.handover_person,
        contact: payload.contact,
        status: LeaveStatus::Pending,
        requester_signature: payload.signature_data_url,
        approver_signature: None,
        approver_id: None,
        approved_at: None,
    })?;

    tracing::info!(
        request_id = %record.request_id,
        requester = %user.username,
        "leave request submitted"
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::success(record))))
}

/// List every request [any authenticated]
pub async fn list_all(
    State(state): State<ServerState>,
    _user: CurrentUser,
) -> Result<Json<ApiResponse<Vec<LeaveRequest>>>, AppError> {
    Ok(Json(ApiResponse::success(state.leave_requests().list_all())))
}

/// List the caller's own requests [any authenticated]
pub async fn list_mine(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<Vec<LeaveRequest>>>, AppError> {
    Ok(Json(ApiResponse::success(
        state.leave_requests().list_mine(&user.id),
    )))
}

/// List requests from the last calendar month [manager, hr, admin]
pub async fn list_recent(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<Vec<LeaveRequest>>>, AppError> {
    guard::require(&user, RECENT_ROLES)?;
    Ok(Json(ApiResponse::success(
        state.leave_requests().list_recent(Utc::now().date_naive()),
    )))
}

/// Status update payload
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Generic status transition [manager, admin]
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    user: CurrentUser,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<LeaveRequest>>, AppError> {
    guard::require(&user, REVIEW_ROLES)?;

    let new_status: LeaveStatus = payload.status.parse().map_err(|_| {
        AppError::new(ErrorCode::InvalidRequestStatus).with_detail("status", payload.status.clone())
    })?;

    let record = state.leave_requests().update_status(&id, new_status)?;
    tracing::info!(
        request_id = %id,
        status = %new_status,
        reviewer = %user.username,
        "leave request status updated"
    );
    Ok(Json(ApiResponse::success(record)))
}

/// Approval payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveRequest {
    pub signature_data_url: String,
}

/// Approve with signature [manager, admin]
///
/// Not idempotent: a second approval of the same request yields Conflict.
pub async fn approve(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    user: CurrentUser,
    Json(payload): Json<ApproveRequest>,
) -> Result<Json<ApiResponse<LeaveRequest>>, AppError> {
    guard::require(&user, REVIEW_ROLES)?;

    validate_signature_data_url(&payload.signature_data_url)
        .map_err(|_| AppError::new(ErrorCode::InvalidSignature))?;

    let record = state.leave_requests().approve(
        &id,
        user.id,
        payload.signature_data_url,
        Utc::now(),
    )?;

    tracing::info!(
        request_id = %id,
        approver = %user.username,
        "leave request approved"
    );
    Ok(Json(ApiResponse::success(record)))
}

/// Requester signature payload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureData {
    pub data_url: String,
}

/// Fetch the requester's signature [any authenticated]
pub async fn get_signature(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    _user: CurrentUser,
) -> Result<Json<ApiResponse<SignatureData>>, AppError> {
    let record = state.leave_requests().get(&id)?;
    if record.requester_signature.is_empty() {
        return Err(AppError::new(ErrorCode::SignatureNotFound));
    }
    Ok(Json(ApiResponse::success(SignatureData {
        data_url: record.requester_signature,
    })))
}
