//! calhub HTTP server.
//!
//! Serves users, calendars and events from an in-memory `UserIndex` over a
//! header-driven protocol:
//! - `/users/{username}` registration and lookup
//! - `/calendar[/{id}]` calendar create, list events, delete
//! - `/event/{calendar_id}[/{event_id}]` event create, edit, delete
//! - `/settings` per-user display settings

pub mod config;
pub mod routes;
pub mod singleton;
pub mod state;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router around `state`.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::users::router())
        .merge(routes::calendars::router())
        .merge(routes::events::router())
        .merge(routes::settings::router())
        .route("/health", get(health_check))
        .fallback(routes::fallback)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
