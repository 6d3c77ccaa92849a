//! # In-Memory Event Store
//!
//! In-memory implementation of [`EventStore`].
//!
//! Events are kept in insertion order behind a single `tokio` `RwLock`.
//! Increments run entirely under the write lock, which makes each
//! read-modify-write indivisible with respect to other callers.

use crate::domain::entities::{Event, NewEvent};
use crate::domain::value_objects::{CounterField, EventId};
use crate::infrastructure::persistence::traits::{
    EVENT_ENTITY, EqualityFilter, EventStore, StoreError, StoreResult,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Storage {
    order: Vec<EventId>,
    events: HashMap<EventId, Event>,
}

impl Storage {
    fn insert(&mut self, event: Event) {
        let id = event.id().clone();
        if self.events.insert(id.clone(), event).is_none() {
            self.order.push(id);
        }
    }
}

/// In-memory implementation of [`EventStore`].
///
/// Cloning shares the underlying storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventStore {
    storage: Arc<RwLock<Storage>>,
}

impl InMemoryEventStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with already identified events.
    ///
    /// Later duplicates of an id replace earlier ones in place.
    #[must_use]
    pub fn with_events(events: impl IntoIterator<Item = Event>) -> Self {
        let mut storage = Storage::default();
        for event in events {
            storage.insert(event);
        }
        Self {
            storage: Arc::new(RwLock::new(storage)),
        }
    }

    /// Returns the number of stored events.
    ///
    /// Waits for in-flight writes to finish.
    pub async fn len(&self) -> usize {
        self.storage.read().await.order.len()
    }

    /// Returns true if the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn get_all(&self, filter: Option<&EqualityFilter>) -> StoreResult<Vec<Event>> {
        let storage = self.storage.read().await;
        Ok(storage
            .order
            .iter()
            .filter_map(|id| storage.events.get(id))
            .filter(|event| filter.is_none_or(|f| f.matches(event)))
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: &EventId) -> StoreResult<Option<Event>> {
        let storage = self.storage.read().await;
        Ok(storage.events.get(id).cloned())
    }

    async fn create(&self, draft: NewEvent) -> StoreResult<Event> {
        let mut storage = self.storage.write().await;
        let mut id = EventId::generate();
        while storage.events.contains_key(&id) {
            id = EventId::generate();
        }
        let event = Event::new(id, draft);
        storage.insert(event.clone());
        Ok(event)
    }

    async fn increment_field(
        &self,
        id: &EventId,
        field: CounterField,
        delta: u64,
    ) -> StoreResult<Event> {
        let mut storage = self.storage.write().await;
        let event = storage
            .events
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found(EVENT_ENTITY, id.as_str()))?;

        match field {
            CounterField::Attendees => {
                event.add_attendees(delta).ok_or_else(|| {
                    StoreError::internal(format!("{field} overflow on event {id}"))
                })?;
            }
        }

        Ok(event.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::EventField;

    fn event(id: &str, title: &str, category: &str, attendees: u64) -> Event {
        Event::from_parts(
            EventId::new(id),
            NewEvent::new(title).with_category(category),
            attendees,
        )
    }

    fn seeded() -> InMemoryEventStore {
        InMemoryEventStore::with_events([
            event("e1", "AI Workshop", "Workshop", 5),
            event("e2", "Cultural Night", "Cultural", 10),
            event("e3", "Robotics Workshop", "Workshop", 0),
        ])
    }

    #[tokio::test]
    async fn new_store_is_empty() {
        let store = InMemoryEventStore::new();
        assert!(store.is_empty().await);
        assert!(store.get_all(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_all_preserves_insertion_order() {
        let store = seeded();
        let ids: Vec<String> = store
            .get_all(None)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id().to_string())
            .collect();
        assert_eq!(ids, vec!["e1", "e2", "e3"]);
    }

    #[tokio::test]
    async fn get_all_applies_equality_filter() {
        let store = seeded();
        let filter = EqualityFilter::exact(EventField::Category, "Workshop");

        let found = store.get_all(Some(&filter)).await.unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|e| e.category() == "Workshop"));
    }

    #[tokio::test]
    async fn create_assigns_fresh_id_and_zero_attendees() {
        let store = seeded();
        let created = store.create(NewEvent::new("X")).await.unwrap();

        assert!(!created.id().is_empty());
        assert_eq!(created.attendees(), 0);
        assert_eq!(store.len().await, 4);
        assert_eq!(store.get_by_id(created.id()).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn get_nonexistent_returns_none() {
        let store = seeded();
        assert!(store.get_by_id(&EventId::new("missing")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn increment_updates_only_the_counter() {
        let store = seeded();
        let before = store.get_by_id(&EventId::new("e1")).await.unwrap().unwrap();

        let after = store
            .increment_field(before.id(), CounterField::Attendees, 1)
            .await
            .unwrap();

        assert_eq!(after.attendees(), 6);
        assert_eq!(after.details(), before.details());
    }

    #[tokio::test]
    async fn increment_missing_id_is_not_found() {
        let store = seeded();
        let err = store
            .increment_field(&EventId::new("missing"), CounterField::Attendees, 1)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn increment_overflow_leaves_counter_unchanged() {
        let store = InMemoryEventStore::with_events([event("full", "Full", "Misc", u64::MAX)]);
        let id = EventId::new("full");

        let result = store
            .increment_field(&id, CounterField::Attendees, 1)
            .await;

        assert!(result.is_err());
        let event = store.get_by_id(&id).await.unwrap().unwrap();
        assert_eq!(event.attendees(), u64::MAX);
    }

    #[tokio::test]
    async fn len_waits_for_a_held_write_lock() {
        let store = seeded();
        let guard = store.storage.write().await;

        let reader = {
            let store = store.clone();
            tokio::spawn(async move { store.len().await })
        };
        tokio::task::yield_now().await;
        assert!(!reader.is_finished());

        drop(guard);
        assert_eq!(reader.await.unwrap(), 3);
        assert!(!store.is_empty().await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_increments_are_not_lost() {
        let store = seeded();
        let id = EventId::new("e2");

        let tasks: Vec<_> = (0..64)
            .map(|_| {
                let store = store.clone();
                let id = id.clone();
                tokio::spawn(async move {
                    store
                        .increment_field(&id, CounterField::Attendees, 1)
                        .await
                })
            })
            .collect();

        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let event = store.get_by_id(&id).await.unwrap().unwrap();
        assert_eq!(event.attendees(), 74);
    }
}
