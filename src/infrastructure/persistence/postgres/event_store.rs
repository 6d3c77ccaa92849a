//! # PostgreSQL Event Store
//!
//! PostgreSQL implementation of [`EventStore`] using sqlx.
//!
//! Events live in a single `events` table ordered by a `BIGSERIAL` sequence.
//! Joins are one `UPDATE ... SET attendees = attendees + $2 ... RETURNING`
//! statement, so concurrent increments are serialized by the row lock.
//!
//! Case-insensitive filters compare `lower(column)` with a value lower-cased
//! in Rust. The column side follows the database's `LC_CTYPE`: with a UTF-8
//! locale (the default of the official `postgres` image) non-ASCII letters
//! fold the same way as in the other stores, while a `C` locale folds ASCII
//! only.

use crate::domain::entities::{Event, NewEvent};
use crate::domain::value_objects::{CounterField, EventField, EventId};
use crate::infrastructure::persistence::traits::{
    EVENT_ENTITY, EqualityFilter, EventStore, MatchMode, StoreError, StoreResult,
};
use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Schema applied by [`PostgresEventStore::ensure_schema`].
pub const SCHEMA: &str = include_str!("../../../../migrations/0001_create_events.sql");

const COLUMNS: &str = "id, title, description, event_date, event_time, location, organizer, \
                       category, attendees, spotlight, image_url";

/// PostgreSQL implementation of [`EventStore`].
///
/// # Examples
///
/// ```ignore
/// use campus_events::infrastructure::persistence::postgres::PostgresEventStore;
///
/// let store = PostgresEventStore::connect("postgres://localhost/events", 5).await?;
/// store.ensure_schema().await?;
/// ```
#[derive(Debug, Clone)]
pub struct PostgresEventStore {
    pool: PgPool,
}

impl PostgresEventStore {
    /// Creates a store over an existing pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the database cannot be reached.
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Creates the `events` table if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the DDL fails.
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    /// Returns a reference to the connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl EventStore for PostgresEventStore {
    async fn get_all(&self, filter: Option<&EqualityFilter>) -> StoreResult<Vec<Event>> {
        let sql = select_all_sql(filter);
        let mut query = sqlx::query_as::<_, EventRow>(&sql);
        if let Some(filter) = filter {
            query = query.bind(filter_bind_value(filter));
        }

        let rows = query.fetch_all(&self.pool).await.map_err(map_sqlx_error)?;
        rows.into_iter().map(EventRow::try_into_event).collect()
    }

    async fn get_by_id(&self, id: &EventId) -> StoreResult<Option<Event>> {
        let sql = format!("SELECT {COLUMNS} FROM events WHERE id = $1");
        let row: Option<EventRow> = sqlx::query_as(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.map(EventRow::try_into_event).transpose()
    }

    async fn create(&self, draft: NewEvent) -> StoreResult<Event> {
        let id = EventId::generate();
        let sql = format!(
            "INSERT INTO events (id, title, description, event_date, event_time, location, \
             organizer, category, attendees, spotlight, image_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 0, $9, $10) \
             RETURNING {COLUMNS}"
        );

        let row: EventRow = sqlx::query_as(&sql)
            .bind(id.as_str())
            .bind(&draft.title)
            .bind(&draft.description)
            .bind(&draft.date)
            .bind(&draft.time)
            .bind(&draft.location)
            .bind(&draft.organizer)
            .bind(&draft.category)
            .bind(draft.spotlight)
            .bind(&draft.image_url)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.try_into_event()
    }

    async fn increment_field(
        &self,
        id: &EventId,
        field: CounterField,
        delta: u64,
    ) -> StoreResult<Event> {
        let delta = i64::try_from(delta)
            .map_err(|_| StoreError::internal(format!("{field} delta {delta} out of range")))?;
        let column = counter_column(field);
        let sql = format!(
            "UPDATE events SET {column} = {column} + $2 WHERE id = $1 RETURNING {COLUMNS}"
        );

        let row: Option<EventRow> = sqlx::query_as(&sql)
            .bind(id.as_str())
            .bind(delta)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.ok_or_else(|| StoreError::not_found(EVENT_ENTITY, id.as_str()))?
            .try_into_event()
    }
}

/// Builds the `get_all` statement; the filter value, if any, binds to `$1`.
fn select_all_sql(filter: Option<&EqualityFilter>) -> String {
    let predicate = match filter {
        None => String::new(),
        Some(filter) => {
            let column = field_column(filter.field());
            match filter.mode() {
                MatchMode::Exact => format!(" WHERE {column} = $1"),
                MatchMode::IgnoreCase => format!(" WHERE lower({column}) = $1"),
            }
        }
    };
    format!("SELECT {COLUMNS} FROM events{predicate} ORDER BY seq ASC")
}

/// Value bound to `$1` by [`select_all_sql`]; ignore-case filters are folded
/// with the same `to_lowercase` the in-memory filter uses.
fn filter_bind_value(filter: &EqualityFilter) -> String {
    match filter.mode() {
        MatchMode::Exact => filter.value().to_string(),
        MatchMode::IgnoreCase => filter.value().to_lowercase(),
    }
}

const fn field_column(field: EventField) -> &'static str {
    match field {
        EventField::Title => "title",
        EventField::Description => "description",
        EventField::Organizer => "organizer",
        EventField::Location => "location",
        EventField::Category => "category",
        EventField::Date => "event_date",
        EventField::Time => "event_time",
    }
}

const fn counter_column(field: CounterField) -> &'static str {
    match field {
        CounterField::Attendees => "attendees",
    }
}

/// Classifies sqlx failures; connectivity problems become `Unavailable`.
fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => StoreError::unavailable(err.to_string()),
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            StoreError::serialization(err.to_string())
        }
        other => StoreError::query(other.to_string()),
    }
}

/// Row type for event queries.
#[derive(Debug, sqlx::FromRow)]
struct EventRow {
    id: String,
    title: String,
    description: String,
    event_date: String,
    event_time: String,
    location: String,
    organizer: String,
    category: String,
    attendees: i64,
    spotlight: Option<bool>,
    image_url: Option<String>,
}

impl EventRow {
    fn try_into_event(self) -> StoreResult<Event> {
        if self.id.is_empty() {
            return Err(StoreError::serialization("event row without id"));
        }
        let attendees = u64::try_from(self.attendees).map_err(|_| {
            StoreError::serialization(format!(
                "negative attendees {} on event {}",
                self.attendees, self.id
            ))
        })?;

        let details = NewEvent {
            title: self.title,
            description: self.description,
            date: self.event_date,
            time: self.event_time,
            location: self.location,
            organizer: self.organizer,
            category: self.category,
            spotlight: self.spotlight,
            image_url: self.image_url,
        };

        Ok(Event::from_parts(EventId::new(self.id), details, attendees))
    }
}
