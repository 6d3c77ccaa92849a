//! # Event Query
//!
//! Normalized list-events criteria.
//!
//! Raw query-string values are interpreted once here: an empty search means
//! "no search", and an empty category or the sentinel `all` (any case) means
//! "no category filter". Values are otherwise taken verbatim.
//!
//! # Examples
//!
//! ```
//! use campus_events::domain::value_objects::EventQuery;
//!
//! let query = EventQuery::new("AI", "All");
//! assert_eq!(query.search(), Some("ai"));
//! assert_eq!(query.category(), None);
//! ```

/// Sentinel category value meaning "every category".
pub const ALL_CATEGORIES: &str = "all";

/// Search and category criteria for listing events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventQuery {
    /// Case-folded search term, `None` when empty.
    search: Option<String>,
    /// Requested category as given by the caller, `None` when unfiltered.
    category: Option<String>,
}

impl EventQuery {
    /// Builds a query from raw `search` and `category` inputs.
    #[must_use]
    pub fn new(search: &str, category: &str) -> Self {
        Self {
            search: (!search.is_empty()).then(|| search.to_lowercase()),
            category: (!category.is_empty() && !category.eq_ignore_ascii_case(ALL_CATEGORIES))
                .then(|| category.to_string()),
        }
    }

    /// A query matching every event.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Returns the case-folded search term.
    #[inline]
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Returns the category filter.
    #[inline]
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Returns true if the query filters nothing out.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.search.is_none() && self.category.is_none()
    }
}
