//! # REST Routes
//!
//! Router assembly: API routes under `/api`, static files for everything
//! else, plus CORS and request tracing layers.

use super::handlers::{
    AppState, create_event, get_event, health, init_demo_data, join_event, list_events,
};
use crate::config::ServerConfig;
use axum::Router;
use axum::http::{Method, header::CONTENT_TYPE};
use axum::routing::{get, post};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Builds the `/api` routes.
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route("/events/{id}", get(get_event))
        .route("/events/{id}/join", post(join_event))
        .route("/init-demo-data", post(init_demo_data))
        .route("/health", get(health))
}

/// Builds the full application router.
///
/// Paths outside `/api` are served from `config.static_dir`; unknown paths
/// fall back to its `index.html` so client-side routing works.
pub fn create_router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    let index = config.static_dir.join("index.html");
    let static_files = ServeDir::new(&config.static_dir).fallback(ServeFile::new(index));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(config.cors_max_age_secs));

    Router::new()
        .nest("/api", api_routes())
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
