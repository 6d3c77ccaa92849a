//! # REST Handlers
//!
//! Request handlers for the event endpoints. Each handler extracts its
//! inputs, calls the [`EventRepository`] and serializes the result.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::EventRepository;
use crate::domain::entities::Event;
use crate::infrastructure::persistence::fixtures;
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Shared state for all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Event operations.
    pub repository: EventRepository,
}

impl AppState {
    /// Wraps a repository in shareable state.
    #[must_use]
    pub fn new(repository: EventRepository) -> Arc<Self> {
        Arc::new(Self { repository })
    }
}

/// Query string of `GET /api/events`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListEventsParams {
    /// Free-text search; empty matches everything.
    pub search: String,
    /// Category, or empty / `all` for every category.
    pub category: String,
}

impl ListEventsParams {
    /// Collects the parameters from decoded query pairs.
    ///
    /// The first occurrence of a repeated key wins; unknown keys are ignored.
    #[must_use]
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut search = None;
        let mut category = None;
        for (key, value) in pairs {
            match key.as_str() {
                "search" => {
                    search.get_or_insert(value);
                }
                "category" => {
                    category.get_or_insert(value);
                }
                _ => {}
            }
        }
        Self {
            search: search.unwrap_or_default(),
            category: category.unwrap_or_default(),
        }
    }
}

/// Body of `POST /api/init-demo-data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedResponse {
    /// Summary message.
    pub message: String,
    /// Number of events created.
    pub count: usize,
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok` when the process is serving.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// `GET /api/events`
///
/// Repeated `search` or `category` keys use their first value.
pub async fn list_events(
    State(state): State<Arc<AppState>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApplicationResult<Json<Vec<Event>>> {
    let Query(pairs) = query.map_err(|rejection| {
        ApplicationError::invalid_input(format!("unreadable query string: {rejection}"))
    })?;
    let params = ListEventsParams::from_pairs(pairs);

    let events = state
        .repository
        .list_events(&params.search, &params.category)
        .await?;
    Ok(Json(events))
}

/// `GET /api/events/{id}`
pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApplicationResult<Json<Event>> {
    let event = state.repository.get_event(&id).await?;
    Ok(Json(event))
}

/// `POST /api/events`
///
/// A missing, non-JSON or non-object body is a 400.
pub async fn create_event(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApplicationResult<(StatusCode, Json<Event>)> {
    let payload = match body {
        Ok(Json(value)) => Some(value),
        Err(rejection) => {
            tracing::debug!(%rejection, "Unreadable create payload");
            None
        }
    };

    let event = state.repository.create_event(payload).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// `POST /api/events/{id}/join`
pub async fn join_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApplicationResult<Json<Event>> {
    let event = state.repository.join_event(&id).await?;
    Ok(Json(event))
}

/// `POST /api/init-demo-data`
pub async fn init_demo_data(
    State(state): State<Arc<AppState>>,
) -> ApplicationResult<Json<SeedResponse>> {
    let created = fixtures::seed_demo_events(state.repository.store().as_ref())
        .await
        .map_err(ApplicationError::from)?;

    Ok(Json(SeedResponse {
        message: "Demo data initialized".to_string(),
        count: created.len(),
    }))
}

/// `GET /api/health`
#[allow(clippy::unused_async)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
