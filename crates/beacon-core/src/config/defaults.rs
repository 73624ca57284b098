// Single source of truth for all default values.

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "beacon.db";
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "api";
pub const DEFAULT_EMBEDDING_BASE_URL: &str = "http://127.0.0.1:1234/v1";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-nomic-embed-text-v1.5";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 768;
pub const DEFAULT_EMBEDDING_BATCH_SIZE: usize = 32;
pub const DEFAULT_EMBEDDING_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_EMBEDDING_CACHE_SIZE: u64 = 10_000;

// --- Chunking ---
pub const DEFAULT_CHUNK_SIZE_TOKENS: usize = 400;
pub const DEFAULT_OVERLAP_TOKENS: usize = 80;

// --- Retrieval ---
pub const DEFAULT_STRATEGY: &str = "hybrid";
pub const DEFAULT_TOP_K: usize = 5;
pub const DEFAULT_ALPHA: f64 = 0.6;
pub const DEFAULT_BETA: f64 = 0.4;
pub const DEFAULT_CANDIDATE_MULTIPLIER: usize = 5;
pub const DEFAULT_SUB_QUERY_TIMEOUT_MS: u64 = 10_000;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_JSON: bool = false;
