//! # beacon-core
//!
//! Foundation crate for the Beacon retrieval engine.
//! Defines the data model, collaborator traits, errors and configuration.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::BeaconConfig;
pub use errors::{BeaconError, BeaconResult};
pub use models::{
    Chunk, ChunkId, DegradationEvent, Document, DocumentMetadata, FilterField, FusionWeights,
    MetadataFilter, Query, RetrievalOutcome, RetrievedChunk, ScoredChunk, Section, Strategy,
    TextChunk, TokenWindow,
};
