//! # In-Memory Store
//!
//! [`InMemoryEventStore`] keeps events in process memory. It backs the
//! default development configuration and the test suite.
//!
//! ## Thread Safety
//!
//! Storage sits behind `Arc<RwLock<..>>`; clones share it.

pub mod event_store;

pub use event_store::InMemoryEventStore;
