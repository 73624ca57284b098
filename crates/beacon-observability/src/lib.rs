//! # beacon-observability
//!
//! Subscriber installation and the structured events shared by the ingest
//! and retrieval paths.

pub mod tracing_setup;

pub use tracing_setup::events;
pub use tracing_setup::init_tracing;
