//! HTTP router setup.

use crate::handlers;
use crate::middleware;
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create(state: Arc<AppState>) -> Router {
    // Leave headroom over the 10MB file cap for multipart framing.
    let body_limit = state.config.max_upload_bytes + 64 * 1024;

    Router::new()
        .route(
            "/agent",
            post(handlers::agent_chat).put(handlers::agent_launch),
        )
        .route(
            "/deploy",
            post(handlers::deploy_contract).get(handlers::deploy_estimate),
        )
        .route(
            "/marketplace",
            post(handlers::marketplace_create).get(handlers::marketplace_info),
        )
        .route(
            "/metadata",
            post(handlers::metadata_create).get(handlers::metadata_fetch),
        )
        .route("/upload", post(handlers::upload_image))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum::middleware::from_fn(middleware::api_key_auth))
        .layer(axum::middleware::from_fn(middleware::inject_request_id))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
