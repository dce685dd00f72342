//! Authentication routes

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;
use crate::handler::auth;

/// Build the authentication router
/// - /api/login: public (no auth required)
/// - /api/me: protected
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/login", post(auth::login))
        .route("/api/me", get(auth::me))
}
