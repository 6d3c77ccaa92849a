//! # Domain Entities
//!
//! - [`Event`]: a stored campus event
//! - [`NewEvent`]: the client-supplied draft an event is created from

pub mod event;

pub use event::{Event, NewEvent};
