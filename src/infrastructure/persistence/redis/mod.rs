//! # Redis Store
//!
//! [`RedisEventStore`] keeps each event as a Redis hash, giving the
//! document-store layout with a native atomic `HINCRBY` for joins.

mod document;
pub mod event_store;

pub use event_store::RedisEventStore;
