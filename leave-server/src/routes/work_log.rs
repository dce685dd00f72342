//! Work-log routes

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;
use crate::handler::work_log;

/// Build the work-log router; all routes require authentication
pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/worklogs",
            get(work_log::list_all).post(work_log::upload),
        )
        .route("/api/worklogs/{id}/status", put(work_log::update_status))
}
