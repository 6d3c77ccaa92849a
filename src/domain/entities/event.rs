//! # Event Entity
//!
//! A campus activity exposed by the API.
//!
//! An [`Event`] is created from a [`NewEvent`] draft by a store, which
//! assigns its [`EventId`] and starts the attendee counter at zero. After
//! creation the only mutation is the attendee increment performed on join.
//!
//! # Examples
//!
//! ```
//! use campus_events::domain::entities::{Event, NewEvent};
//! use campus_events::domain::value_objects::EventId;
//!
//! let draft = NewEvent::new("AI Workshop")
//!     .with_category("Workshop")
//!     .with_organizer("AI Club");
//!
//! let event = Event::new(EventId::new("event-1"), draft);
//!
//! assert_eq!(event.attendees(), 0);
//! assert!(event.matches_search("workshop"));
//! ```

use crate::domain::value_objects::{EventField, EventId};
use serde::{Deserialize, Deserializer, Serialize};

/// Fields supplied by a client when creating an event.
///
/// Missing or `null` text fields default to the empty string, and numbers or
/// booleans given for them are kept as their display text. Keys the draft
/// does not know, including a client-sent `id` or `attendees`, are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewEvent {
    /// Event title.
    #[serde(deserialize_with = "lenient_text")]
    pub title: String,
    /// Free-form description.
    #[serde(deserialize_with = "lenient_text")]
    pub description: String,
    /// Display date, opaque.
    #[serde(deserialize_with = "lenient_text")]
    pub date: String,
    /// Display time range, opaque.
    #[serde(deserialize_with = "lenient_text")]
    pub time: String,
    /// Venue on campus.
    #[serde(deserialize_with = "lenient_text")]
    pub location: String,
    /// Organizing club or department.
    #[serde(deserialize_with = "lenient_text")]
    pub organizer: String,
    /// Category label.
    #[serde(deserialize_with = "lenient_text")]
    pub category: String,
    /// Display hint for featured events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spotlight: Option<bool>,
    /// Cover image location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl NewEvent {
    /// Creates a draft with the given title and every other field empty.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the display date.
    #[must_use]
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Sets the display time.
    #[must_use]
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = time.into();
        self
    }

    /// Sets the location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Sets the organizer.
    #[must_use]
    pub fn with_organizer(mut self, organizer: impl Into<String>) -> Self {
        self.organizer = organizer.into();
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the spotlight flag.
    #[must_use]
    pub fn with_spotlight(mut self, spotlight: bool) -> Self {
        self.spotlight = Some(spotlight);
        self
    }

    /// Sets the image URL.
    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

/// Scalar JSON values accepted for a text field.
#[derive(Deserialize)]
#[serde(untagged)]
enum TextValue {
    Text(String),
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    Flag(bool),
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<TextValue>::deserialize(deserializer)? {
        None => String::new(),
        Some(TextValue::Text(text)) => text,
        Some(TextValue::Signed(n)) => n.to_string(),
        Some(TextValue::Unsigned(n)) => n.to_string(),
        Some(TextValue::Float(n)) => n.to_string(),
        Some(TextValue::Flag(b)) => b.to_string(),
    })
}

/// A stored campus event.
///
/// # Invariants
///
/// - `id` is non-empty and never changes
/// - `attendees` never decreases
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    id: EventId,
    #[serde(flatten)]
    details: NewEvent,
    #[serde(default)]
    attendees: u64,
}

impl Event {
    /// Creates a freshly stored event with no attendees.
    #[must_use]
    pub fn new(id: EventId, details: NewEvent) -> Self {
        Self::from_parts(id, details, 0)
    }

    /// Reassembles an event loaded from a backing store.
    #[must_use]
    pub fn from_parts(id: EventId, details: NewEvent, attendees: u64) -> Self {
        Self {
            id,
            details,
            attendees,
        }
    }

    /// Returns the event id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &EventId {
        &self.id
    }

    /// Returns the client-supplied details.
    #[inline]
    #[must_use]
    pub fn details(&self) -> &NewEvent {
        &self.details
    }

    /// Returns the title.
    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        &self.details.title
    }

    /// Returns the description.
    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.details.description
    }

    /// Returns the organizer.
    #[inline]
    #[must_use]
    pub fn organizer(&self) -> &str {
        &self.details.organizer
    }

    /// Returns the location.
    #[inline]
    #[must_use]
    pub fn location(&self) -> &str {
        &self.details.location
    }

    /// Returns the category.
    #[inline]
    #[must_use]
    pub fn category(&self) -> &str {
        &self.details.category
    }

    /// Returns the display date.
    #[inline]
    #[must_use]
    pub fn date(&self) -> &str {
        &self.details.date
    }

    /// Returns the display time.
    #[inline]
    #[must_use]
    pub fn time(&self) -> &str {
        &self.details.time
    }

    /// Returns the spotlight flag, if set.
    #[inline]
    #[must_use]
    pub fn spotlight(&self) -> Option<bool> {
        self.details.spotlight
    }

    /// Returns the image URL, if set.
    #[inline]
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.details.image_url.as_deref()
    }

    /// Returns the attendee count.
    #[inline]
    #[must_use]
    pub fn attendees(&self) -> u64 {
        self.attendees
    }

    /// Returns the value of a textual field.
    #[must_use]
    pub fn field(&self, field: EventField) -> &str {
        match field {
            EventField::Title => self.title(),
            EventField::Description => self.description(),
            EventField::Organizer => self.organizer(),
            EventField::Location => self.location(),
            EventField::Category => self.category(),
            EventField::Date => self.date(),
            EventField::Time => self.time(),
        }
    }

    /// Returns true if `folded_term` occurs in any searchable field.
    ///
    /// The term must already be lower-cased; field values are lower-cased
    /// here.
    #[must_use]
    pub fn matches_search(&self, folded_term: &str) -> bool {
        EventField::SEARCHABLE
            .iter()
            .any(|field| self.field(*field).to_lowercase().contains(folded_term))
    }

    /// Adds `delta` to the attendee count.
    ///
    /// Returns the new count, or `None` without changing anything if the
    /// counter would overflow.
    pub(crate) fn add_attendees(&mut self, delta: u64) -> Option<u64> {
        let next = self.attendees.checked_add(delta)?;
        self.attendees = next;
        Some(next)
    }
}
