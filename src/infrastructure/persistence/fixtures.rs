//! # Demo Fixtures
//!
//! Sample campus events for local development and demos.
//!
//! Demo events are created like any other event and then brought to their
//! sample attendee counts through the store's atomic increment, so seeding
//! never writes the counter directly.

use crate::domain::entities::{Event, NewEvent};
use crate::domain::value_objects::CounterField;
use crate::infrastructure::persistence::traits::{EventStore, StoreResult};

/// A demo event and the attendee count it is seeded with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoEvent {
    /// Event details.
    pub draft: NewEvent,
    /// Attendees already signed up.
    pub attendees: u64,
}

/// Returns the built-in demo events.
#[must_use]
pub fn demo_events() -> Vec<DemoEvent> {
    let counts = [54, 142, 258];
    demo_drafts()
        .into_iter()
        .zip(counts)
        .map(|(draft, attendees)| DemoEvent { draft, attendees })
        .collect()
}

fn demo_drafts() -> Vec<NewEvent> {
    vec![
        NewEvent::new("AI Workshop Series")
            .with_description(
                "Learn the fundamentals of AI and machine learning in this hands-on workshop series.",
            )
            .with_date("April 22, 2025")
            .with_time("2:00 PM - 5:00 PM")
            .with_location("Engineering Block, Room 302")
            .with_organizer("AI Club")
            .with_category("Workshop")
            .with_image_url(
                "https://images.unsplash.com/photo-1591453089816-0fbb971b454c?auto=format&fit=crop&w=600&q=80",
            ),
        NewEvent::new("Spring Cultural Night")
            .with_description(
                "Experience diverse cultures through performances, music, food, and more.",
            )
            .with_date("April 25, 2025")
            .with_time("6:00 PM - 10:00 PM")
            .with_location("Student Center")
            .with_organizer("Cultural Committee")
            .with_category("Cultural")
            .with_image_url(
                "https://images.unsplash.com/photo-1516450360452-9312f5e86fc7?auto=format&fit=crop&w=600&q=80",
            ),
        NewEvent::new("Annual Tech Fest 2025")
            .with_description(
                "Join us for the biggest tech event of the year with workshops, hackathons, and \
                 exciting tech talks from industry leaders. Network with professionals and \
                 showcase your skills!",
            )
            .with_date("May 15, 2025")
            .with_time("10:00 AM - 6:00 PM")
            .with_location("Central Campus Auditorium")
            .with_organizer("Computer Science Department")
            .with_category("Technology")
            .with_spotlight(true)
            .with_image_url(
                "https://images.unsplash.com/photo-1488590528505-98d2b5aba04b?auto=format&fit=crop&w=1200&q=80",
            ),
    ]
}

/// Creates every demo event in `store` and returns them as stored.
///
/// Each call adds a fresh copy; ids are assigned by the store.
///
/// # Errors
///
/// Returns the first `StoreError` hit; events created before it remain.
pub async fn seed_demo_events(store: &dyn EventStore) -> StoreResult<Vec<Event>> {
    let mut created = Vec::new();
    for demo in demo_events() {
        let mut event = store.create(demo.draft).await?;
        if demo.attendees > 0 {
            event = store
                .increment_field(event.id(), CounterField::Attendees, demo.attendees)
                .await?;
        }
        created.push(event);
    }
    tracing::info!(count = created.len(), "Seeded demo events");
    Ok(created)
}
