//! # PostgreSQL Store
//!
//! [`PostgresEventStore`] persists events in PostgreSQL through a `sqlx`
//! connection pool.

pub mod event_store;

pub use event_store::PostgresEventStore;
