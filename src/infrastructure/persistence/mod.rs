//! # Persistence Layer
//!
//! Event store port and its implementations.
//!
//! ## Store Trait (Port)
//!
//! - [`EventStore`]: get-all, get-by-id, create and atomic increment
//!
//! ## Implementations
//!
//! - `in_memory`: process memory, for development and tests
//! - `postgres`: PostgreSQL via `sqlx`
//! - `redis`: Redis hashes
//!
//! [`connect`] picks one from [`StoreConfig`].

pub mod fixtures;
pub mod in_memory;
pub mod postgres;
pub mod redis;
pub mod traits;

pub use in_memory::InMemoryEventStore;
pub use postgres::PostgresEventStore;
pub use self::redis::RedisEventStore;
pub use traits::{
    EVENT_ENTITY, EqualityFilter, EventStore, MatchMode, StoreError, StoreResult,
};

use crate::config::{StoreBackend, StoreConfig};
use std::sync::Arc;

/// Opens the store selected by `config`.
///
/// PostgreSQL stores have their schema created if missing.
///
/// # Errors
///
/// Returns `StoreError::Internal` if the selected backend has no URL
/// configured, or `StoreError::Unavailable` if it cannot be reached.
pub async fn connect(config: &StoreConfig) -> StoreResult<Arc<dyn EventStore>> {
    match config.backend {
        StoreBackend::Memory => Ok(Arc::new(InMemoryEventStore::new())),
        StoreBackend::Postgres => {
            let url = config.database_url.as_deref().ok_or_else(|| {
                StoreError::internal("store.database_url is required for the postgres backend")
            })?;
            let store = PostgresEventStore::connect(url, config.max_connections).await?;
            store.ensure_schema().await?;
            Ok(Arc::new(store))
        }
        StoreBackend::Redis => {
            let url = config.redis_url.as_deref().ok_or_else(|| {
                StoreError::internal("store.redis_url is required for the redis backend")
            })?;
            let store = RedisEventStore::connect(url, config.key_prefix.clone()).await?;
            Ok(Arc::new(store))
        }
    }
}
