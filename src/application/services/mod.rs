//! # Application Services
//!
//! Services that orchestrate domain logic and persistence:
//! - [`QueryEngine`]: category and search filtering
//! - [`JoinCoordinator`]: atomic attendee increments
//! - [`EventRepository`]: the facade the HTTP layer calls

pub mod event_repository;
pub mod join_coordinator;
pub mod query_engine;

pub use event_repository::EventRepository;
pub use join_coordinator::{JOIN_INCREMENT, JoinCoordinator};
pub use query_engine::{QueryEngine, category_filter, filter_events};
