//! # Event Hash Codec
//!
//! Converts events to and from Redis hash fields.
//!
//! The hash body never stores the id; it is backfilled from the key the
//! hash was read from. Missing string fields decode as empty strings and a
//! missing counter as zero, so sparse documents written by older clients
//! still load.

use crate::domain::entities::{Event, NewEvent};
use crate::domain::value_objects::{CounterField, EventField, EventId};
use crate::infrastructure::persistence::traits::{StoreError, StoreResult};
use std::collections::HashMap;

const SPOTLIGHT: &str = "spotlight";
const IMAGE_URL: &str = "imageUrl";

/// Encodes a draft as hash fields, with the counter initialised to zero.
pub(crate) fn encode(draft: &NewEvent) -> Vec<(&'static str, String)> {
    let mut fields = vec![
        (EventField::Title.as_str(), draft.title.clone()),
        (EventField::Description.as_str(), draft.description.clone()),
        (EventField::Date.as_str(), draft.date.clone()),
        (EventField::Time.as_str(), draft.time.clone()),
        (EventField::Location.as_str(), draft.location.clone()),
        (EventField::Organizer.as_str(), draft.organizer.clone()),
        (EventField::Category.as_str(), draft.category.clone()),
        (CounterField::Attendees.as_str(), "0".to_string()),
    ];
    if let Some(spotlight) = draft.spotlight {
        fields.push((SPOTLIGHT, spotlight.to_string()));
    }
    if let Some(image_url) = &draft.image_url {
        fields.push((IMAGE_URL, image_url.clone()));
    }
    fields
}

/// Decodes a hash read from the key of `id`.
///
/// Returns `None` for an empty hash, which Redis reports for missing keys.
pub(crate) fn decode(id: &EventId, mut hash: HashMap<String, String>) -> StoreResult<Option<Event>> {
    if hash.is_empty() {
        return Ok(None);
    }
    if id.is_empty() {
        return Err(StoreError::serialization("event hash without id"));
    }

    let mut take = |field: EventField| hash.remove(field.as_str()).unwrap_or_default();
    let title = take(EventField::Title);
    let description = take(EventField::Description);
    let date = take(EventField::Date);
    let time = take(EventField::Time);
    let location = take(EventField::Location);
    let organizer = take(EventField::Organizer);
    let category = take(EventField::Category);

    let attendees = match hash.remove(CounterField::Attendees.as_str()) {
        None => 0,
        Some(raw) => raw.parse::<u64>().map_err(|e| {
            StoreError::serialization(format!("invalid attendees {raw:?} on event {id}: {e}"))
        })?,
    };
    let spotlight = hash
        .remove(SPOTLIGHT)
        .map(|raw| {
            raw.parse::<bool>().map_err(|e| {
                StoreError::serialization(format!("invalid spotlight {raw:?} on event {id}: {e}"))
            })
        })
        .transpose()?;
    let image_url = hash.remove(IMAGE_URL);

    let details = NewEvent {
        title,
        description,
        date,
        time,
        location,
        organizer,
        category,
        spotlight,
        image_url,
    };

    Ok(Some(Event::from_parts(id.clone(), details, attendees)))
}
