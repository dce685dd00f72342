//! Authentication middleware
//!
//! Axum middleware that validates the `Authorization: Bearer <token>`
//! header on every `/api/` request and injects [`CurrentUser`] into the
//! request extensions.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::error::AppError;

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;

/// Paths under `/api/` that do not require authentication
fn is_public_api_route(path: &str) -> bool {
    path == "/api/login" || path == "/api/health"
}

/// Authentication middleware
///
/// Skips CORS preflight requests, non-`/api/` paths, and the public login
/// and health routes. Everything else must carry a valid bearer token.
///
/// | Failure | HTTP status |
/// |---------|-------------|
/// | Missing Authorization header | 401 |
/// | Expired token | 401 |
/// | Invalid token | 401 |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    if !path.starts_with("/api/") || is_public_api_route(path) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            tracing::warn!(uri = %req.uri(), "request without authorization header");
            return Err(AppError::unauthorized());
        }
    };

    match state.jwt_service().validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::try_from(claims)
                .map_err(|_| AppError::invalid_token("Malformed token claims"))?;
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(error = %e, uri = %req.uri(), "token validation failed");
            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}
