//! `RedisEventStore` against a real Redis server.
//!
//! Docker must be running. Run with `cargo test -- --ignored`.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use campus_events::application::EventRepository;
use campus_events::domain::entities::NewEvent;
use campus_events::domain::value_objects::{CounterField, EventField, EventId};
use campus_events::infrastructure::persistence::{EqualityFilter, EventStore, RedisEventStore};
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use std::sync::Arc;
use std::time::Duration;
use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage};

const PREFIX: &str = "campus-test";

/// Starts Redis and returns its URL; keep the container alive while in use.
async fn start_redis() -> (ContainerAsync<GenericImage>, String) {
    let container = GenericImage::new("redis", "7")
        .with_exposed_port(6379.tcp())
        .with_wait_for(WaitFor::message_on_stdout("Ready to accept connections"))
        .start()
        .await
        .expect("Failed to start redis container");

    let port = container
        .get_host_port_ipv4(6379)
        .await
        .expect("Failed to get redis port");
    (container, format!("redis://127.0.0.1:{port}"))
}

async fn connect(url: &str) -> RedisEventStore {
    for _ in 0..30 {
        if let Ok(store) = RedisEventStore::connect(url, PREFIX).await {
            return store;
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
    }
    panic!("Redis did not become ready");
}

async fn raw_connection(url: &str) -> ConnectionManager {
    let client = redis::Client::open(url).unwrap();
    ConnectionManager::new(client).await.unwrap()
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn create_writes_hash_and_index_together() {
    let (_container, url) = start_redis().await;
    let store = connect(&url).await;

    let first = store
        .create(NewEvent::new("AI Workshop").with_category("Workshop").with_spotlight(true))
        .await
        .unwrap();
    let second = store.create(NewEvent::new("Cultural Night")).await.unwrap();

    let mut conn = raw_connection(&url).await;
    let index: Vec<String> = conn.lrange(format!("{PREFIX}:events"), 0, -1).await.unwrap();
    assert_eq!(index, [first.id().to_string(), second.id().to_string()]);

    let stored_id: Option<String> = conn
        .hget(format!("{PREFIX}:event:{}", first.id()), "id")
        .await
        .unwrap();
    assert_eq!(stored_id, None);

    assert_eq!(store.get_by_id(first.id()).await.unwrap(), Some(first.clone()));
    assert_eq!(store.get_all(None).await.unwrap(), vec![first, second]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "requires Docker"]
async fn concurrent_joins_are_not_lost() {
    let (_container, url) = start_redis().await;
    let store = Arc::new(connect(&url).await);

    let event = store.create(NewEvent::new("Tech Fest")).await.unwrap();
    let event = store
        .increment_field(event.id(), CounterField::Attendees, 7)
        .await
        .unwrap();
    assert_eq!(event.attendees(), 7);

    let repository = EventRepository::new(store.clone());
    let joins: Vec<_> = (0..50)
        .map(|_| {
            let repository = repository.clone();
            let id = event.id().to_string();
            tokio::spawn(async move { repository.join_event(&id).await })
        })
        .collect();

    let mut observed = Vec::new();
    for join in joins {
        observed.push(join.await.unwrap().unwrap().attendees());
    }
    observed.sort_unstable();
    assert_eq!(observed, (8..=57).collect::<Vec<u64>>());

    let stored = store.get_by_id(event.id()).await.unwrap().unwrap();
    assert_eq!(stored.attendees(), 57);
    assert_eq!(stored.details(), event.details());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn join_on_missing_id_is_not_found_and_creates_no_key() {
    let (_container, url) = start_redis().await;
    let store = connect(&url).await;

    let err = store
        .increment_field(&EventId::new("ghost"), CounterField::Attendees, 1)
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let mut conn = raw_connection(&url).await;
    let exists: bool = conn.exists(format!("{PREFIX}:event:ghost")).await.unwrap();
    assert!(!exists);
    assert!(store.get_all(None).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn category_filters_match_exactly_or_ignoring_case() {
    let (_container, url) = start_redis().await;
    let store = connect(&url).await;
    for category in ["Workshop", "WORKSHOP", "Cultural", "Café Talks"] {
        store
            .create(NewEvent::new(format!("{category} event")).with_category(category))
            .await
            .unwrap();
    }

    let exact = EqualityFilter::exact(EventField::Category, "Workshop");
    assert_eq!(store.get_all(Some(&exact)).await.unwrap().len(), 1);

    let folded = EqualityFilter::ignore_case(EventField::Category, "workshop");
    let found = store.get_all(Some(&folded)).await.unwrap();
    let categories: Vec<&str> = found.iter().map(|e| e.category()).collect();
    assert_eq!(categories, ["Workshop", "WORKSHOP"]);

    let non_ascii = EqualityFilter::ignore_case(EventField::Category, "CAFÉ TALKS");
    assert_eq!(store.get_all(Some(&non_ascii)).await.unwrap().len(), 1);

    let repository = EventRepository::new(Arc::new(store));
    let listed = repository.list_events("event", "cultural").await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].category(), "Cultural");
}
