//! # Event Fields
//!
//! Names of the event attributes that stores can filter on or increment.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A textual attribute of an event that can be used in an equality filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventField {
    /// Event title.
    Title,
    /// Free-form description.
    Description,
    /// Organizing club or department.
    Organizer,
    /// Venue on campus.
    Location,
    /// Category label such as `Workshop` or `Cultural`.
    Category,
    /// Display date.
    Date,
    /// Display time range.
    Time,
}

impl EventField {
    /// The fields a free-text search looks at.
    pub const SEARCHABLE: [Self; 5] = [
        Self::Title,
        Self::Description,
        Self::Organizer,
        Self::Category,
        Self::Location,
    ];

    /// Returns the camelCase name used on the wire and in document stores.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Organizer => "organizer",
            Self::Location => "location",
            Self::Category => "category",
            Self::Date => "date",
            Self::Time => "time",
        }
    }
}

impl fmt::Display for EventField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A numeric attribute of an event that stores can increment atomically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CounterField {
    /// Number of people who joined the event.
    Attendees,
}

impl CounterField {
    /// Returns the camelCase name used on the wire and in document stores.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Attendees => "attendees",
        }
    }
}

impl fmt::Display for CounterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
