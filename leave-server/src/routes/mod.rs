//! Router assembly

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::middleware::require_auth;
use crate::core::ServerState;

pub mod auth;
pub mod health;
pub mod leave_request;
pub mod work_log;

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Auth API - login public, /api/me protected
        .merge(auth::router())
        // Leave request API - authentication required
        .merge(leave_request::router())
        // Work log API - authentication required
        .merge(work_log::router())
        // Health API - public route
        .merge(health::router())
}

/// Build the fully configured application with all middleware
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router()
        // ========== Tower HTTP Middleware ==========
        // CORS - handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Trace - request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // ========== Application Middleware ==========
        // Request ID - generate a unique ID for each request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        // Propagate request ID to the response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        // JWT authentication - executes before routes, injects CurrentUser
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ))
}
