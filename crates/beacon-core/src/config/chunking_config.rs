use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::{BeaconResult, ConfigError};

/// Chunker sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Upper bound on tokens per chunk.
    pub chunk_size_tokens: usize,
    /// Tokens shared by consecutive windows of an oversized section.
    pub overlap_tokens: usize,
}

impl ChunkingConfig {
    pub fn new(chunk_size_tokens: usize, overlap_tokens: usize) -> Self {
        Self {
            chunk_size_tokens,
            overlap_tokens,
        }
    }

    /// Reject sizings that would make window splitting loop forever.
    pub fn validate(&self) -> BeaconResult<()> {
        if self.chunk_size_tokens == 0 {
            return Err(ConfigError::InvalidChunkSize.into());
        }
        if self.overlap_tokens >= self.chunk_size_tokens {
            return Err(ConfigError::InvalidOverlap {
                overlap: self.overlap_tokens,
                chunk_size: self.chunk_size_tokens,
            }
            .into());
        }
        Ok(())
    }

    /// Distance between the starts of consecutive windows.
    pub fn stride(&self) -> usize {
        self.chunk_size_tokens - self.overlap_tokens
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self::new(
            defaults::DEFAULT_CHUNK_SIZE_TOKENS,
            defaults::DEFAULT_OVERLAP_TOKENS,
        )
    }
}
