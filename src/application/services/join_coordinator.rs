//! # Join Coordinator
//!
//! Records one attendee joining an event.
//!
//! A join is a single atomic [`EventStore::increment_field`] call. There is
//! no separate existence check: the increment itself reports a missing id,
//! so no window exists between checking and writing in which a concurrent
//! join could be lost.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::entities::Event;
use crate::domain::value_objects::{CounterField, EventId};
use crate::infrastructure::persistence::EventStore;
use std::sync::Arc;

/// Attendees added per join.
pub const JOIN_INCREMENT: u64 = 1;

/// Applies joins through the store's atomic increment.
#[derive(Debug, Clone)]
pub struct JoinCoordinator {
    store: Arc<dyn EventStore>,
}

impl JoinCoordinator {
    /// Creates a coordinator over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }

    /// Adds one attendee to the event and returns it with the new count.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotFound` if no event has this id, or
    /// `ApplicationError::StoreUnavailable` if the store cannot be reached;
    /// in both cases the counter is unchanged.
    pub async fn join(&self, id: &EventId) -> ApplicationResult<Event> {
        let event = self
            .store
            .increment_field(id, CounterField::Attendees, JOIN_INCREMENT)
            .await
            .map_err(ApplicationError::from)?;

        tracing::info!(event_id = %id, attendees = event.attendees(), "Attendee joined event");

        Ok(event)
    }
}
