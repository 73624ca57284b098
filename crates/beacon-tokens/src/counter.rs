use std::sync::Arc;

use beacon_core::errors::{BeaconResult, ConfigError};
use moka::sync::Cache;
use tiktoken_rs::CoreBPE;

pub type TokenId = tiktoken_rs::Rank;

const DEFAULT_CACHE_CAPACITY: u64 = 10_000;

/// cl100k token counter with a content-hash keyed count cache.
///
/// Cheap to clone; clones share the BPE tables and the cache.
#[derive(Clone)]
pub struct TokenCounter {
    bpe: Arc<CoreBPE>,
    cache: Cache<String, usize>,
}

impl TokenCounter {
    /// Load the cl100k tables. Fails with `TokenizerUnavailable` instead of panicking.
    pub fn new(cache_capacity: u64) -> BeaconResult<Self> {
        let bpe = tiktoken_rs::cl100k_base().map_err(|e| ConfigError::TokenizerUnavailable {
            reason: e.to_string(),
        })?;
        Ok(Self {
            bpe: Arc::new(bpe),
            cache: Cache::new(cache_capacity),
        })
    }

    pub fn with_default_cache() -> BeaconResult<Self> {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }

    /// Number of tokens in `text`. Special-token text is counted as ordinary text.
    pub fn count(&self, text: &str) -> usize {
        if text.is_empty() {
            return 0;
        }
        self.bpe.encode_ordinary(text).len()
    }

    /// Like [`count`](Self::count), memoized by blake3 of the text.
    pub fn count_cached(&self, text: &str) -> usize {
        let key = blake3::hash(text.as_bytes()).to_hex().to_string();
        self.cache.get_with(key, || self.count(text))
    }

    pub fn encode(&self, text: &str) -> Vec<TokenId> {
        self.bpe.encode_ordinary(text)
    }

    /// Decode tokens, replacing invalid UTF-8 with U+FFFD. A window boundary can
    /// fall inside a multi-byte character, so strict decoding is not an option.
    pub fn decode_lossy(&self, tokens: &[TokenId]) -> String {
        let bytes: Vec<u8> = self
            .bpe
            ._decode_native_and_split(tokens.to_vec())
            .flatten()
            .collect();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    pub fn cache_entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}

impl std::fmt::Debug for TokenCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCounter")
            .field("encoding", &"cl100k_base")
            .field("cached", &self.cache.entry_count())
            .finish()
    }
}
