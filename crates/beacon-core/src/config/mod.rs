pub mod chunking_config;
pub mod defaults;
pub mod embedding_config;
pub mod observability_config;
pub mod retrieval_config;
pub mod storage_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use chunking_config::ChunkingConfig;
pub use embedding_config::EmbeddingConfig;
pub use observability_config::ObservabilityConfig;
pub use retrieval_config::{LexicalMatch, RetrievalConfig};
pub use storage_config::StorageConfig;

use crate::errors::{BeaconResult, ConfigError};

/// Root configuration. Every section falls back to its defaults when absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BeaconConfig {
    pub storage: StorageConfig,
    pub embedding: EmbeddingConfig,
    pub chunking: ChunkingConfig,
    pub retrieval: RetrievalConfig,
    pub observability: ObservabilityConfig,
}

impl BeaconConfig {
    /// Parse a TOML document. Missing sections and fields take their defaults.
    pub fn from_toml(source: &str) -> BeaconResult<Self> {
        let config: Self = toml::from_str(source).map_err(|e| ConfigError::ParseFailed {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: &Path) -> BeaconResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml(&source)
    }

    /// Validate cross-field invariants.
    pub fn validate(&self) -> BeaconResult<()> {
        self.chunking.validate()?;
        self.retrieval.validate()?;
        Ok(())
    }
}
