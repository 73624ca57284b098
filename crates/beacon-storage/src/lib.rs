//! # beacon-storage
//!
//! SQLite reference implementation of the collaborator traits:
//! `IChunkStore`, `IVectorIndex` (brute-force cosine over stored embeddings)
//! and `ILexicalIndex` (FTS5 BM25).
//!
//! One write connection serializes writes; file-backed databases serve reads
//! from a round-robin pool of read-only connections.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use beacon_core::errors::{BeaconError, StorageError};

pub(crate) fn to_storage_err(message: impl Into<String>) -> BeaconError {
    StorageError::SqliteError {
        message: message.into(),
    }
    .into()
}
