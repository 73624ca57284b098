//! # beacon-ingest
//!
//! Turns documents into stored, embedded chunks. Re-ingesting a URL replaces
//! its chunks; unchanged content is detected by hash and skipped.

pub mod pipeline;
pub mod report;

pub use pipeline::IngestPipeline;
pub use report::{IngestOutcome, IngestReport};
