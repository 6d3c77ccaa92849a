//! # REST API
//!
//! REST endpoints using axum.
//!
//! # Endpoints
//!
//! ## Events
//! - `GET /api/events?search=&category=` - List events, optionally filtered
//! - `GET /api/events/{id}` - Get event by ID
//! - `POST /api/events` - Create event
//! - `POST /api/events/{id}/join` - Add one attendee
//!
//! ## Operations
//! - `POST /api/init-demo-data` - Create the demo events
//! - `GET /api/health` - Health check endpoint
//!
//! Every other path is served from the static frontend directory.
//!
//! # Usage
//!
//! ```ignore
//! use campus_events::api::rest::{create_router, AppState};
//! use campus_events::application::EventRepository;
//! use campus_events::infrastructure::persistence::InMemoryEventStore;
//! use std::sync::Arc;
//!
//! let repository = EventRepository::new(Arc::new(InMemoryEventStore::new()));
//! let router = create_router(AppState::new(repository), &config.server);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, router).await?;
//! ```

pub mod error;
pub mod handlers;
pub mod routes;

pub use error::ErrorResponse;
pub use handlers::{AppState, HealthResponse, ListEventsParams, SeedResponse};
pub use routes::{api_routes, create_router};
