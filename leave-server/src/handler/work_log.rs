//! Work-log submission handlers
//!
//! Upload validation runs to completion before the blob store is touched,
//! so a rejected submission never leaves an orphaned file.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{Role, WorkLogStatus, WorkLogSubmission};
use uuid::Uuid;

use crate::auth::{CurrentUser, guard};
use crate::core::ServerState;
use crate::validation::validate_signature_data_url;

/// Roles allowed to review submissions
const REVIEW_ROLES: &[Role] = &[Role::Manager, Role::Admin];

/// Upload response payload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadData {
    pub id: Uuid,
    pub file_path: String,
}

/// Upload a signed work-log file [any authenticated]
///
/// Multipart form with a `file` part and a `signatureDataUrl` text part.
/// Both are mandatory; violations are enumerated together and nothing is
/// stored on failure.
pub async fn upload(
    State(state): State<ServerState>,
    user: CurrentUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<UploadData>>), AppError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut signature: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("malformed multipart body: {e}")))?
    {
        match field.name() {
            Some("file") => {
                let file_name = field
                    .file_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| "upload".to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("failed to read file: {e}")))?;
                file = Some((file_name, bytes.to_vec()));
            }
            Some("signatureDataUrl") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("failed to read signature: {e}")))?;
                signature = Some(text);
            }
            _ => {}
        }
    }

    // validate everything before any storage side effect
    let mut error: Option<AppError> = None;
    if file.as_ref().is_none_or(|(_, bytes)| bytes.is_empty()) {
        error = Some(
            AppError::new(ErrorCode::ValidationFailed).with_detail("file", "is required"),
        );
    }
    match &signature {
        Some(sig) if validate_signature_data_url(sig).is_ok() => {}
        _ => {
            error = Some(
                error
                    .unwrap_or_else(|| AppError::new(ErrorCode::ValidationFailed))
                    .with_detail(
                        "signatureDataUrl",
                        "must be a base64 data URL with MIME type image/png or image/jpeg",
                    ),
            );
        }
    }
    if let Some(error) = error {
        return Err(error);
    }

    let (file_name, bytes) = file.ok_or_else(|| AppError::new(ErrorCode::WorkLogFileMissing))?;
    let signature = signature.ok_or_else(|| AppError::new(ErrorCode::InvalidSignature))?;

    let stored_file_reference = state.blob_store().store(&file_name, &bytes)?;

    let record = state.work_logs().create(WorkLogSubmission {
        id: Uuid::new_v4(),
        uploader_id: user.id,
        file_name,
        stored_file_reference: stored_file_reference.clone(),
        signature,
        status: WorkLogStatus::Pending,
        created_at: Utc::now(),
    })?;

    tracing::info!(
        work_log_id = %record.id,
        uploader = %user.username,
        file = %record.file_name,
        "work log uploaded"
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UploadData {
            id: record.id,
            file_path: stored_file_reference,
        })),
    ))
}

/// Submission joined with the uploader's display name
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkLogWithUploader {
    #[serde(flatten)]
    pub submission: WorkLogSubmission,
    pub uploader_name: Option<String>,
}

/// List every submission [manager, admin]
pub async fn list_all(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<Vec<WorkLogWithUploader>>>, AppError> {
    guard::require(&user, REVIEW_ROLES)?;

    let users = state.users();
    let rows = state
        .work_logs()
        .list_all()
        .into_iter()
        .map(|submission| {
            let uploader_name = users
                .get(&submission.uploader_id)
                .ok()
                .map(|u| u.display_name);
            WorkLogWithUploader {
                submission,
                uploader_name,
            }
        })
        .collect();

    Ok(Json(ApiResponse::success(rows)))
}

/// Status update payload
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Unconditional status overwrite [manager, admin]
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    user: CurrentUser,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<WorkLogSubmission>>, AppError> {
    guard::require(&user, REVIEW_ROLES)?;

    let new_status: WorkLogStatus = payload.status.parse().map_err(|_| {
        AppError::new(ErrorCode::InvalidWorkLogStatus).with_detail("status", payload.status.clone())
    })?;

    let record = state.work_logs().update_status(&id, new_status)?;
    tracing::info!(
        work_log_id = %id,
        status = %new_status,
        reviewer = %user.username,
        "work log status updated"
    );
    Ok(Json(ApiResponse::success(record)))
}
