//! # Query Engine
//!
//! Filters events by category and free-text search.
//!
//! The category filter is pushed down to the [`EventStore`] as a
//! case-insensitive [`EqualityFilter`]; the search runs in memory over the
//! candidates the store returns. Both filters must hold for an event to be
//! kept, and store order is preserved.
//!
//! # Examples
//!
//! ```
//! use campus_events::application::services::query_engine::filter_events;
//! use campus_events::domain::entities::{Event, NewEvent};
//! use campus_events::domain::value_objects::{EventId, EventQuery};
//!
//! let events = vec![
//!     Event::new(EventId::new("e1"), NewEvent::new("AI Workshop").with_category("Workshop")),
//!     Event::new(EventId::new("e2"), NewEvent::new("Cultural Night").with_category("Cultural")),
//! ];
//!
//! let found = filter_events(events, &EventQuery::new("ai", "all"));
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].id().as_str(), "e1");
//! ```

use crate::application::error::ApplicationResult;
use crate::domain::entities::Event;
use crate::domain::value_objects::{EventField, EventQuery};
use crate::infrastructure::persistence::{EqualityFilter, EventStore};
use std::sync::Arc;

/// Runs [`EventQuery`]s against a store.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    store: Arc<dyn EventStore>,
}

impl QueryEngine {
    /// Creates a query engine over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }

    /// Returns the events matching `query`, in store order.
    ///
    /// An empty result is not an error.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::StoreUnavailable` if the store cannot be
    /// read.
    pub async fn run(&self, query: &EventQuery) -> ApplicationResult<Vec<Event>> {
        let pushdown = category_filter(query);
        let candidates = self.store.get_all(pushdown.as_ref()).await?;
        let total = candidates.len();

        let events = match query.search() {
            Some(term) => search(candidates, term),
            None => candidates,
        };

        tracing::debug!(
            search = query.search().unwrap_or_default(),
            category = query.category().unwrap_or_default(),
            candidates = total,
            matched = events.len(),
            "Listed events"
        );

        Ok(events)
    }
}

/// Builds the store-side predicate for the query's category, if any.
#[must_use]
pub fn category_filter(query: &EventQuery) -> Option<EqualityFilter> {
    query
        .category()
        .map(|category| EqualityFilter::ignore_case(EventField::Category, category))
}

/// Applies both filters of `query` in memory.
///
/// Equivalent to [`QueryEngine::run`] against a store holding `events`.
#[must_use]
pub fn filter_events(events: Vec<Event>, query: &EventQuery) -> Vec<Event> {
    let category = category_filter(query);
    let events: Vec<Event> = events
        .into_iter()
        .filter(|event| category.as_ref().is_none_or(|f| f.matches(event)))
        .collect();

    match query.search() {
        Some(term) => search(events, term),
        None => events,
    }
}

fn search(events: Vec<Event>, folded_term: &str) -> Vec<Event> {
    events
        .into_iter()
        .filter(|event| event.matches_search(folded_term))
        .collect()
}
