//! HTTP API module
//!
//! This module contains the command surface, endpoint handlers and response
//! structures.

pub mod commands;
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

pub use commands::{execute, Command, CommandReply};

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/state", get(get_state_handler))
        .route("/start", post(start_handler))
        .route("/stop", post(stop_handler))
        .route("/reset", post(reset_handler))
        .route("/time", post(set_time_handler))
        .route("/alarm", post(toggle_alarm_handler))
        .route("/alarm/test", post(test_alarm_handler))
        .route("/badge", get(badge_handler))
        .route("/badge/clear", post(clear_badge_handler))
        .route("/command", post(command_handler))
        .route("/events", get(events_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
