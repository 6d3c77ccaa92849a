//! # Redis Event Store
//!
//! Redis implementation of [`EventStore`].
//!
//! ## Layout
//!
//! - `{prefix}:event:{id}`: one hash per event (see the `document` codec)
//! - `{prefix}:events`: list of ids in creation order
//!
//! Creation writes the hash and appends to the list in one `MULTI/EXEC`
//! transaction. Joins run a Lua script that checks the key exists,
//! `HINCRBY`s the counter and returns the updated hash, all server-side, so
//! concurrent joins cannot lose updates and a missing event is never
//! resurrected by the increment.

use super::document;
use crate::domain::entities::{Event, NewEvent};
use crate::domain::value_objects::{CounterField, EventId};
use crate::infrastructure::persistence::traits::{
    EVENT_ENTITY, EqualityFilter, EventStore, StoreError, StoreResult,
};
use ::redis::aio::ConnectionManager;
use ::redis::{AsyncCommands, Client, RedisError, Script};
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;

const INCREMENT_SCRIPT: &str = r#"
    if redis.call('EXISTS', KEYS[1]) == 0 then
        return nil
    end
    redis.call('HINCRBY', KEYS[1], ARGV[1], ARGV[2])
    return redis.call('HGETALL', KEYS[1])
"#;

/// Redis implementation of [`EventStore`].
#[derive(Clone)]
pub struct RedisEventStore {
    conn_manager: ConnectionManager,
    key_prefix: String,
    increment: Script,
}

impl fmt::Debug for RedisEventStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisEventStore")
            .field("key_prefix", &self.key_prefix)
            .finish_non_exhaustive()
    }
}

impl RedisEventStore {
    /// Connects to Redis and namespaces every key under `key_prefix`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the server cannot be reached,
    /// or `StoreError::Internal` if the URL is invalid.
    pub async fn connect(redis_url: &str, key_prefix: impl Into<String>) -> StoreResult<Self> {
        let client = Client::open(redis_url)
            .map_err(|e| StoreError::internal(format!("invalid Redis URL: {e}")))?;
        let conn_manager = ConnectionManager::new(client)
            .await
            .map_err(map_redis_error)?;

        Ok(Self {
            conn_manager,
            key_prefix: key_prefix.into(),
            increment: Script::new(INCREMENT_SCRIPT),
        })
    }

    fn event_key(&self, id: &EventId) -> String {
        format!("{}:event:{}", self.key_prefix, id)
    }

    fn index_key(&self) -> String {
        format!("{}:events", self.key_prefix)
    }
}

#[async_trait]
impl EventStore for RedisEventStore {
    async fn get_all(&self, filter: Option<&EqualityFilter>) -> StoreResult<Vec<Event>> {
        let mut conn = self.conn_manager.clone();

        let ids: Vec<String> = conn
            .lrange(self.index_key(), 0, -1)
            .await
            .map_err(map_redis_error)?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut pipe = ::redis::pipe();
        for id in &ids {
            pipe.hgetall(self.event_key(&EventId::new(id.as_str())));
        }
        let hashes: Vec<HashMap<String, String>> =
            pipe.query_async(&mut conn).await.map_err(map_redis_error)?;

        let mut events = Vec::with_capacity(ids.len());
        for (id, hash) in ids.into_iter().zip(hashes) {
            if let Some(event) = document::decode(&EventId::new(id), hash)? {
                if filter.is_none_or(|f| f.matches(&event)) {
                    events.push(event);
                }
            }
        }
        Ok(events)
    }

    async fn get_by_id(&self, id: &EventId) -> StoreResult<Option<Event>> {
        let mut conn = self.conn_manager.clone();
        let hash: HashMap<String, String> = conn
            .hgetall(self.event_key(id))
            .await
            .map_err(map_redis_error)?;

        document::decode(id, hash)
    }

    async fn create(&self, draft: NewEvent) -> StoreResult<Event> {
        let mut conn = self.conn_manager.clone();
        let id = EventId::generate();
        let fields = document::encode(&draft);

        let _: () = ::redis::pipe()
            .atomic()
            .hset_multiple(self.event_key(&id), &fields)
            .ignore()
            .rpush(self.index_key(), id.as_str())
            .ignore()
            .query_async(&mut conn)
            .await
            .map_err(map_redis_error)?;

        tracing::debug!(event_id = %id, "Stored event hash in Redis");

        Ok(Event::new(id, draft))
    }

    async fn increment_field(
        &self,
        id: &EventId,
        field: CounterField,
        delta: u64,
    ) -> StoreResult<Event> {
        let delta = i64::try_from(delta)
            .map_err(|_| StoreError::internal(format!("{field} delta {delta} out of range")))?;
        let mut conn = self.conn_manager.clone();

        let hash: Option<HashMap<String, String>> = self
            .increment
            .key(self.event_key(id))
            .arg(field.as_str())
            .arg(delta)
            .invoke_async(&mut conn)
            .await
            .map_err(map_redis_error)?;

        let hash = hash.ok_or_else(|| StoreError::not_found(EVENT_ENTITY, id.as_str()))?;
        document::decode(id, hash)?
            .ok_or_else(|| StoreError::not_found(EVENT_ENTITY, id.as_str()))
    }
}

/// Classifies Redis failures; connectivity problems become `Unavailable`.
fn map_redis_error(err: RedisError) -> StoreError {
    if err.is_io_error()
        || err.is_timeout()
        || err.is_connection_dropped()
        || err.is_connection_refusal()
    {
        StoreError::unavailable(err.to_string())
    } else {
        StoreError::query(err.to_string())
    }
}
