//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/break/start", post(break_start_handler))
        .route("/break/pause", post(break_pause_handler))
        .route("/lunch/start", post(lunch_start_handler))
        .route("/lunch/pause", post(lunch_pause_handler))
        .route("/reset", post(reset_handler))
        .route("/alarm/:minutes", post(alarm_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
