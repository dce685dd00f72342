//! Leave request routes

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;
use crate::handler::leave_request;

/// Build the leave request router; all routes require authentication, and
/// each handler declares its own allowed-role set
pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/requests",
            get(leave_request::list_all).post(leave_request::submit),
        )
        .route("/api/requests/mine", get(leave_request::list_mine))
        .route("/api/requests/recent", get(leave_request::list_recent))
        .route("/api/requests/{id}/status", put(leave_request::update_status))
        .route("/api/requests/{id}/approve", post(leave_request::approve))
        .route(
            "/api/requests/{id}/signature",
            get(leave_request::get_signature),
        )
}
