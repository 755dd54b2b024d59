//! HTTP API server for city-explorer.

#![allow(missing_debug_implementations, reason = "Internal types")]

pub mod api_error;
mod handlers;
mod query_types;
mod response_types;

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use city_explorer_service::Coordinator;
use tower_http::cors::CorsLayer;

pub use response_types::VersionResponse;

/// Shared application state for all HTTP handlers.
pub struct AppState {
    pub coordinator: Coordinator,
}

impl AppState {
    #[must_use]
    pub fn new(coordinator: Coordinator) -> Self {
        Self { coordinator }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/version", get(version))
        .route("/location", get(handlers::get_location))
        .route("/weather", get(handlers::get_weather))
        .route("/yelp", get(handlers::get_yelp))
        .route("/movies", get(handlers::get_movies))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION") })
}

#[cfg(test)]
mod router_tests;
