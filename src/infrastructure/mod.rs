//! # Infrastructure Layer
//!
//! Adapters to external systems.
//!
//! - [`persistence`]: event stores (in-memory, PostgreSQL, Redis)

pub mod persistence;
