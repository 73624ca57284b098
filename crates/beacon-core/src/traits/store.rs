use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::BeaconResult;
use crate::models::{Chunk, ChunkId, Document};

/// What `replace_document` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaceReport {
    pub chunks_removed: usize,
    pub chunks_inserted: usize,
}

/// Document row as held by a store, without its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub url: String,
    pub title: String,
    pub content_hash: String,
    pub fetched_at: DateTime<Utc>,
    pub chunk_count: usize,
}

/// Persistence of documents and their chunks.
pub trait IChunkStore: Send + Sync {
    /// Atomically replace every chunk of `document.url` with `chunks`.
    fn replace_document(&self, document: &Document, chunks: &[Chunk]) -> BeaconResult<ReplaceReport>;

    /// Resolve ids to chunks. Unknown ids are omitted; order is unspecified.
    fn get_chunks(&self, ids: &[ChunkId]) -> BeaconResult<Vec<Chunk>>;

    fn find_document(&self, url: &str) -> BeaconResult<Option<StoredDocument>>;

    fn chunk_count(&self) -> BeaconResult<usize>;
}
