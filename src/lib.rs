//! # Campus Events
//!
//! REST backend for listing, filtering, creating and joining campus events.
//!
//! # Architecture
//!
//! ```text
//! api::rest            axum router, handlers, error mapping, static files
//!     │
//! application          EventRepository facade
//!     ├── QueryEngine       category pushdown + in-memory search
//!     └── JoinCoordinator   atomic attendee increments
//!     │
//! infrastructure       EventStore port
//!     ├── in_memory
//!     ├── postgres          (sqlx)
//!     └── redis             (hashes + Lua increment)
//!     │
//! domain               Event, NewEvent, EventId, EventQuery
//! ```
//!
//! # Joins
//!
//! Joining an event adds one attendee through the store's atomic increment.
//! Concurrent joins on the same event are never lost: N joins on an event
//! with A attendees always end at A + N.
//!
//! # Configuration
//!
//! See [`config`] for the layered settings (defaults, optional file,
//! `CAMPUS_EVENTS_*` environment variables).

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;
