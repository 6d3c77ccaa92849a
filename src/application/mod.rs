//! # Application Layer
//!
//! Use cases over the event store.
//!
//! - [`services`]: query engine, join coordinator and the repository facade
//! - [`error`]: application error taxonomy

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use services::EventRepository;
