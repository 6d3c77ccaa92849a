//! # API Layer
//!
//! External interfaces of the service.
//!
//! - [`rest`]: JSON over HTTP with axum

pub mod rest;
