use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Embedding provider: "api" (OpenAI-compatible endpoint) or "tfidf".
    pub provider: String,
    /// Base URL of the OpenAI-compatible server (e.g. LM Studio).
    pub base_url: String,
    /// Model identifier sent to the server and stored with every chunk.
    pub model: String,
    /// Expected embedding dimensions.
    pub dimensions: usize,
    /// Texts per embedding request.
    pub batch_size: usize,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// L1 in-memory cache max entries.
    pub cache_size: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_EMBEDDING_PROVIDER.to_string(),
            base_url: defaults::DEFAULT_EMBEDDING_BASE_URL.to_string(),
            model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            batch_size: defaults::DEFAULT_EMBEDDING_BATCH_SIZE,
            timeout_secs: defaults::DEFAULT_EMBEDDING_TIMEOUT_SECS,
            cache_size: defaults::DEFAULT_EMBEDDING_CACHE_SIZE,
        }
    }
}
