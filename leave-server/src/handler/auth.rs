//! Authentication handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use shared::error::{ApiResponse, AppError};
use shared::models::UserInfo;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::validation::into_app_error;

/// Login request payload
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
}

/// Login response with JWT token
#[derive(Debug, Serialize)]
pub struct LoginData {
    pub token: String,
    pub user: UserInfo,
}

/// Login handler
///
/// Verifies credentials against the stored argon2 hash and returns a
/// signed token. The response never distinguishes a missing user from a
/// wrong password.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginData>>, AppError> {
    req.validate().map_err(|e| into_app_error(&e))?;

    let user = state
        .users()
        .find_by_username(&req.username)
        .ok_or_else(AppError::invalid_credentials)?;

    let password_valid = user
        .verify_password(&req.password)
        .map_err(|e| AppError::internal(format!("password verification failed: {e}")))?;
    if !password_valid {
        return Err(AppError::invalid_credentials());
    }

    let token = state
        .jwt_service()
        .generate_token(&user)
        .map_err(|e| AppError::internal(format!("token generation failed: {e}")))?;

    tracing::info!(
        user_id = %user.id,
        username = %user.username,
        role = %user.role,
        "user logged in"
    );

    Ok(Json(ApiResponse::success(LoginData {
        token,
        user: UserInfo::from(&user),
    })))
}

/// Return the authenticated caller's account information
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<UserInfo>>, AppError> {
    let account = state
        .users()
        .get(&user.id)
        .map_err(|_| AppError::unauthorized())?;
    Ok(Json(ApiResponse::success(UserInfo::from(&account))))
}
