//! Extractor for the authenticated caller
//!
//! Lets protected handlers take [`CurrentUser`] as an argument; the value
//! is placed in the request extensions by [`require_auth`].
//!
//! [`require_auth`]: crate::auth::middleware::require_auth

use axum::{extract::FromRequestParts, http::request::Parts};
use shared::error::AppError;

use crate::auth::CurrentUser;
use crate::core::ServerState;

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(AppError::unauthorized)
    }
}
