//! StorageEngine: owns the connection pool and implements the chunk store,
//! vector index and lexical index traits over one SQLite database.

use std::path::Path;

use tracing::debug;

use beacon_core::config::{LexicalMatch, StorageConfig};
use beacon_core::errors::BeaconResult;
use beacon_core::models::{Chunk, ChunkId, Document, MetadataFilter};
use beacon_core::traits::{
    IChunkStore, ILexicalIndex, IVectorIndex, ReplaceReport, StoredDocument,
};

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries::{chunk_ops, document_ops, lexical_search, vector_search};
use crate::to_storage_err;

pub struct StorageEngine {
    pool: ConnectionPool,
    lexical_match: LexicalMatch,
}

impl StorageEngine {
    /// Open a file-backed database, creating and migrating it as needed.
    pub fn open(path: &Path, read_pool_size: usize) -> BeaconResult<Self> {
        let pool = ConnectionPool::open(path, read_pool_size)?;
        Self::initialize(pool)
    }

    pub fn from_config(config: &StorageConfig) -> BeaconResult<Self> {
        Self::open(Path::new(&config.db_path), config.read_pool_size)
    }

    /// In-memory database. Every read goes through the writer.
    pub fn open_in_memory() -> BeaconResult<Self> {
        Self::initialize(ConnectionPool::open_in_memory()?)
    }

    /// How multi-term lexical queries combine their terms.
    pub fn with_lexical_match(mut self, mode: LexicalMatch) -> Self {
        self.lexical_match = mode;
        self
    }

    fn initialize(pool: ConnectionPool) -> BeaconResult<Self> {
        let version = pool.writer.with_conn(migrations::run_migrations)?;
        debug!(version, path = ?pool.db_path, "storage ready");
        Ok(Self {
            pool,
            lexical_match: LexicalMatch::default(),
        })
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    fn with_reader<F, T>(&self, f: F) -> BeaconResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> BeaconResult<T>,
    {
        match &self.pool.readers {
            Some(readers) => readers.with_conn(f),
            None => self.pool.writer.with_conn(f),
        }
    }

    /// Every stored document, ordered by URL.
    pub fn list_documents(&self) -> BeaconResult<Vec<StoredDocument>> {
        self.with_reader(document_ops::list_documents)
    }

    /// Chunks of one document in reading order.
    pub fn chunks_for_document(&self, url: &str) -> BeaconResult<Vec<Chunk>> {
        self.with_reader(|conn| chunk_ops::chunks_for_document(conn, url))
    }

    /// Remove a document and its chunks. Returns `None` if the URL is unknown.
    pub fn delete_document(&self, url: &str) -> BeaconResult<Option<usize>> {
        self.pool.writer.with_conn(|conn| {
            let tx = conn
                .unchecked_transaction()
                .map_err(|e| to_storage_err(e.to_string()))?;
            let removed = document_ops::delete_document(&tx, url)?;
            tx.commit().map_err(|e| to_storage_err(e.to_string()))?;
            Ok(removed)
        })
    }
}

impl IChunkStore for StorageEngine {
    fn replace_document(&self, document: &Document, chunks: &[Chunk]) -> BeaconResult<ReplaceReport> {
        self.pool.writer.with_conn(|conn| {
            let tx = conn
                .unchecked_transaction()
                .map_err(|e| to_storage_err(e.to_string()))?;
            let doc_id = document_ops::upsert_document(&tx, document)?;
            let chunks_removed = chunk_ops::delete_chunks_for_document(&tx, doc_id)?;
            let chunks_inserted = chunk_ops::insert_chunks(&tx, doc_id, chunks)?;
            tx.commit().map_err(|e| to_storage_err(e.to_string()))?;
            Ok(ReplaceReport {
                chunks_removed,
                chunks_inserted,
            })
        })
    }

    fn get_chunks(&self, ids: &[ChunkId]) -> BeaconResult<Vec<Chunk>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.with_reader(|conn| chunk_ops::get_chunks(conn, ids))
    }

    fn find_document(&self, url: &str) -> BeaconResult<Option<StoredDocument>> {
        self.with_reader(|conn| document_ops::find_document(conn, url))
    }

    fn chunk_count(&self) -> BeaconResult<usize> {
        self.with_reader(chunk_ops::count_chunks)
    }
}

impl IVectorIndex for StorageEngine {
    fn nearest_neighbors(
        &self,
        vector: &[f32],
        filter: &MetadataFilter,
        k: usize,
    ) -> BeaconResult<Vec<(ChunkId, f64)>> {
        self.with_reader(|conn| vector_search::nearest_neighbors(conn, vector, filter, k))
    }
}

impl ILexicalIndex for StorageEngine {
    fn rank(
        &self,
        text: &str,
        filter: &MetadataFilter,
        k: usize,
    ) -> BeaconResult<Vec<(ChunkId, f64)>> {
        let mode = self.lexical_match;
        self.with_reader(|conn| lexical_search::rank(conn, text, filter, k, mode))
    }
}
