//! # Event Repository
//!
//! The four operations the HTTP layer needs: list, fetch one, create and
//! join. Inputs arrive already parsed; results are plain [`Event`] values.
//!
//! # Examples
//!
//! ```
//! # tokio_test::block_on(async {
//! use campus_events::application::services::EventRepository;
//! use campus_events::infrastructure::persistence::InMemoryEventStore;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let repository = EventRepository::new(Arc::new(InMemoryEventStore::new()));
//!
//! let created = repository
//!     .create_event(Some(json!({ "title": "AI Workshop", "category": "Workshop" })))
//!     .await
//!     .unwrap();
//! assert_eq!(created.attendees(), 0);
//!
//! let joined = repository.join_event(created.id().as_str()).await.unwrap();
//! assert_eq!(joined.attendees(), 1);
//!
//! let workshops = repository.list_events("", "workshop").await.unwrap();
//! assert_eq!(workshops.len(), 1);
//! # });
//! ```

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::join_coordinator::JoinCoordinator;
use crate::application::services::query_engine::QueryEngine;
use crate::domain::entities::{Event, NewEvent};
use crate::domain::value_objects::{EventId, EventQuery};
use crate::infrastructure::persistence::{EVENT_ENTITY, EventStore};
use serde_json::Value;
use std::sync::Arc;

/// Facade over the query engine, join coordinator and store.
#[derive(Debug, Clone)]
pub struct EventRepository {
    store: Arc<dyn EventStore>,
    query_engine: QueryEngine,
    join_coordinator: JoinCoordinator,
}

impl EventRepository {
    /// Creates a repository over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self {
            query_engine: QueryEngine::new(Arc::clone(&store)),
            join_coordinator: JoinCoordinator::new(Arc::clone(&store)),
            store,
        }
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn EventStore> {
        &self.store
    }

    /// Lists events matching `search` and `category`.
    ///
    /// An empty `search` matches everything; an empty `category` or `all`
    /// disables the category filter.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::StoreUnavailable` if the store cannot be
    /// read.
    pub async fn list_events(
        &self,
        search: &str,
        category: &str,
    ) -> ApplicationResult<Vec<Event>> {
        self.query_engine
            .run(&EventQuery::new(search, category))
            .await
    }

    /// Fetches one event.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotFound` if no event has this id.
    pub async fn get_event(&self, id: &str) -> ApplicationResult<Event> {
        let id = parse_id(id)?;
        self.store
            .get_by_id(&id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(EVENT_ENTITY, id.into_inner()))
    }

    /// Creates an event from a client payload.
    ///
    /// The payload must be a JSON object. Its `id` and `attendees` keys, if
    /// present, are ignored: the store assigns the id and the counter
    /// starts at zero.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::InvalidInput` if the payload is absent,
    /// not an object, or puts an array or object where display text or the
    /// spotlight flag belongs.
    pub async fn create_event(&self, payload: Option<Value>) -> ApplicationResult<Event> {
        let draft = parse_draft(payload)?;
        let event = self.store.create(draft).await?;

        tracing::info!(event_id = %event.id(), title = event.title(), "Created event");

        Ok(event)
    }

    /// Adds one attendee to an event.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotFound` if no event has this id.
    pub async fn join_event(&self, id: &str) -> ApplicationResult<Event> {
        let id = parse_id(id)?;
        self.join_coordinator.join(&id).await
    }
}

/// Blank ids can never exist, so they are reported as not found directly.
fn parse_id(raw: &str) -> ApplicationResult<EventId> {
    if raw.trim().is_empty() {
        return Err(ApplicationError::not_found(EVENT_ENTITY, raw));
    }
    Ok(EventId::new(raw))
}

fn parse_draft(payload: Option<Value>) -> ApplicationResult<NewEvent> {
    match payload {
        Some(value @ Value::Object(_)) => serde_json::from_value(value)
            .map_err(|e| ApplicationError::invalid_input(format!("malformed event: {e}"))),
        Some(Value::Null) | None => Err(ApplicationError::invalid_input("missing event payload")),
        Some(_) => Err(ApplicationError::invalid_input(
            "event payload must be a JSON object",
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::CounterField;
    use crate::infrastructure::persistence::{
        EqualityFilter, InMemoryEventStore, StoreError, StoreResult,
    };
    use async_trait::async_trait;
    use serde_json::json;

    fn repository() -> EventRepository {
        EventRepository::new(Arc::new(InMemoryEventStore::with_events([
            Event::from_parts(
                EventId::new("e1"),
                NewEvent::new("AI Workshop").with_category("Workshop"),
                5,
            ),
            Event::from_parts(
                EventId::new("e2"),
                NewEvent::new("Cultural Night").with_category("Cultural"),
                10,
            ),
        ])))
    }

    /// Store whose backend is always down.
    #[derive(Debug)]
    struct UnreachableStore;

    #[async_trait]
    impl EventStore for UnreachableStore {
        async fn get_all(&self, _filter: Option<&EqualityFilter>) -> StoreResult<Vec<Event>> {
            Err(StoreError::unavailable("connection refused"))
        }

        async fn get_by_id(&self, _id: &EventId) -> StoreResult<Option<Event>> {
            Err(StoreError::unavailable("connection refused"))
        }

        async fn create(&self, _draft: NewEvent) -> StoreResult<Event> {
            Err(StoreError::unavailable("connection refused"))
        }

        async fn increment_field(
            &self,
            _id: &EventId,
            _field: CounterField,
            _delta: u64,
        ) -> StoreResult<Event> {
            Err(StoreError::unavailable("connection refused"))
        }
    }

    mod list_events {
        use super::*;

        #[tokio::test]
        async fn example_queries() {
            let repo = repository();

            let ai = repo.list_events("ai", "").await.unwrap();
            assert_eq!(ai.len(), 1);
            assert_eq!(ai[0].id().as_str(), "e1");

            let cultural = repo.list_events("", "cultural").await.unwrap();
            assert_eq!(cultural.len(), 1);
            assert_eq!(cultural[0].id().as_str(), "e2");

            assert_eq!(repo.list_events("", "all").await.unwrap().len(), 2);
        }
    }

    mod get_event {
        use super::*;

        #[tokio::test]
        async fn returns_stored_event() {
            let event = repository().get_event("e2").await.unwrap();
            assert_eq!(event.title(), "Cultural Night");
        }

        #[tokio::test]
        async fn missing_id_is_not_found() {
            let err = repository().get_event("missing").await.unwrap_err();
            assert!(err.is_not_found());
        }

        #[tokio::test]
        async fn blank_id_is_not_found() {
            let err = repository().get_event("  ").await.unwrap_err();
            assert!(err.is_not_found());
        }
    }

    mod create_event {
        use super::*;

        #[tokio::test]
        async fn assigns_fresh_id_and_zero_attendees() {
            let repo = repository();

            let created = repo
                .create_event(Some(json!({
                    "id": "e1",
                    "attendees": 500,
                    "title": "X",
                    "category": "Workshop",
                    "spotlight": true
                })))
                .await
                .unwrap();

            assert!(!created.id().is_empty());
            assert_ne!(created.id().as_str(), "e1");
            assert_eq!(created.attendees(), 0);
            assert_eq!(created.spotlight(), Some(true));

            let fetched = repo.get_event(created.id().as_str()).await.unwrap();
            assert_eq!(fetched, created);
        }

        #[tokio::test]
        async fn rejects_missing_or_non_object_payloads() {
            let repo = repository();

            for payload in [None, Some(Value::Null), Some(json!([1, 2])), Some(json!("x"))] {
                let err = repo.create_event(payload).await.unwrap_err();
                assert!(err.is_invalid_input());
            }
        }

        #[tokio::test]
        async fn null_text_fields_default_to_empty() {
            let created = repository()
                .create_event(Some(json!({ "title": null, "category": "Workshop" })))
                .await
                .unwrap();
            assert_eq!(created.title(), "");
            assert_eq!(created.category(), "Workshop");
        }

        #[tokio::test]
        async fn rejects_structured_text_fields() {
            let err = repository()
                .create_event(Some(json!({ "title": { "en": "X" } })))
                .await
                .unwrap_err();
            assert!(err.is_invalid_input());
        }

        #[tokio::test]
        async fn failed_create_leaves_no_event() {
            let repo = repository();
            let _ = repo.create_event(Some(json!({ "title": [] }))).await;
            assert_eq!(repo.list_events("", "").await.unwrap().len(), 2);
        }
    }

    mod join_event {
        use super::*;

        #[tokio::test]
        async fn increments_and_keeps_other_fields() {
            let repo = repository();
            let before = repo.get_event("e1").await.unwrap();

            let after = repo.join_event("e1").await.unwrap();

            assert_eq!(after.attendees(), 6);
            assert_eq!(after.details(), before.details());
            assert_eq!(after.id(), before.id());
        }

        #[tokio::test]
        async fn missing_id_is_not_found() {
            let err = repository().join_event("missing").await.unwrap_err();
            assert!(err.is_not_found());
        }
    }

    mod store_unavailable {
        use super::*;

        #[tokio::test]
        async fn every_operation_reports_retryable_error() {
            let repo = EventRepository::new(Arc::new(UnreachableStore));

            assert!(repo.list_events("", "").await.unwrap_err().is_retryable());
            assert!(repo.get_event("e1").await.unwrap_err().is_retryable());
            assert!(
                repo.create_event(Some(json!({ "title": "X" })))
                    .await
                    .unwrap_err()
                    .is_retryable()
            );
            assert!(repo.join_event("e1").await.unwrap_err().is_retryable());
        }
    }
}
