//! # Store Traits
//!
//! Port definition for event persistence.
//!
//! [`EventStore`] abstracts the backing collection so the query and join
//! logic exists once regardless of where events live. Implementations exist
//! for in-memory storage, PostgreSQL and Redis.
//!
//! # Examples
//!
//! ```ignore
//! use campus_events::infrastructure::persistence::{EqualityFilter, EventStore};
//! use campus_events::domain::value_objects::EventField;
//!
//! async fn workshops(store: &dyn EventStore) {
//!     let filter = EqualityFilter::exact(EventField::Category, "Workshop");
//!     let events = store.get_all(Some(&filter)).await.unwrap();
//!     println!("Found {} workshops", events.len());
//! }
//! ```

use crate::domain::entities::{Event, NewEvent};
use crate::domain::value_objects::{CounterField, EventField, EventId};
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found.
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        /// Type of entity.
        entity_type: &'static str,
        /// Entity identifier.
        id: String,
    },

    /// The backing store could not be reached or timed out.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Query error.
    #[error("Query error: {0}")]
    Query(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an unavailable error.
    #[must_use]
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Creates a query error.
    #[must_use]
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if the store could not be reached.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Entity name used in not found errors.
pub const EVENT_ENTITY: &str = "Event";

/// How an [`EqualityFilter`] compares values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Byte-for-byte equality.
    #[default]
    Exact,
    /// Equality after lower-casing both sides.
    IgnoreCase,
}

/// An equality predicate evaluated by the store instead of in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EqualityFilter {
    field: EventField,
    value: String,
    mode: MatchMode,
}

impl EqualityFilter {
    /// Creates a case-sensitive filter.
    #[must_use]
    pub fn exact(field: EventField, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            mode: MatchMode::Exact,
        }
    }

    /// Creates a case-insensitive filter.
    #[must_use]
    pub fn ignore_case(field: EventField, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            mode: MatchMode::IgnoreCase,
        }
    }

    /// Returns the filtered field.
    #[inline]
    #[must_use]
    pub fn field(&self) -> EventField {
        self.field
    }

    /// Returns the value to compare against.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the comparison mode.
    #[inline]
    #[must_use]
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Evaluates the predicate against an event.
    ///
    /// Stores without native filtering use this after loading.
    #[must_use]
    pub fn matches(&self, event: &Event) -> bool {
        let actual = event.field(self.field);
        match self.mode {
            MatchMode::Exact => actual == self.value,
            MatchMode::IgnoreCase => actual.to_lowercase() == self.value.to_lowercase(),
        }
    }
}

/// Store for [`Event`] documents keyed by [`EventId`].
///
/// # Concurrency
///
/// [`increment_field`](Self::increment_field) must be atomic with respect to
/// concurrent callers on the same id: two concurrent increments of one must
/// always leave the counter two higher. A failed increment leaves the
/// counter unchanged.
#[async_trait]
pub trait EventStore: Send + Sync + fmt::Debug {
    /// Returns all events in a stable, store-defined order.
    ///
    /// With a filter, only events satisfying it are returned.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the store cannot be reached.
    async fn get_all(&self, filter: Option<&EqualityFilter>) -> StoreResult<Vec<Event>>;

    /// Gets an event by ID.
    ///
    /// Returns `None` if the event does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the store cannot be reached.
    async fn get_by_id(&self, id: &EventId) -> StoreResult<Option<Event>>;

    /// Persists a new event under a freshly generated id.
    ///
    /// The attendee counter starts at zero.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the store cannot be reached.
    async fn create(&self, draft: NewEvent) -> StoreResult<Event>;

    /// Atomically adds `delta` to a counter and returns the updated event.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no event has this id, or
    /// `StoreError::Internal` if the counter would overflow.
    async fn increment_field(
        &self,
        id: &EventId,
        field: CounterField,
        delta: u64,
    ) -> StoreResult<Event>;
}
