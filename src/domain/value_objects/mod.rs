//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! - [`EventId`]: store-assigned event identifier
//! - [`EventField`], [`CounterField`]: attributes stores filter on or increment
//! - [`EventQuery`]: normalized list-events criteria

pub mod fields;
pub mod ids;
pub mod query;

pub use fields::{CounterField, EventField};
pub use ids::EventId;
pub use query::{ALL_CATEGORIES, EventQuery};
