//! # Domain Layer
//!
//! Core types of the campus events service.
//!
//! - [`entities`]: the [`Event`](entities::Event) record and its draft
//! - [`value_objects`]: identifiers, field names and query criteria

pub mod entities;
pub mod value_objects;
