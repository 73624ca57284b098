//! Provider registry.
//!
//! - `api`: OpenAI-compatible `/embeddings` endpoint (LM Studio, vLLM, OpenAI).
//! - `tfidf`: hashed term-frequency vectors, always available.

pub mod api_provider;
pub mod tfidf_provider;

pub use api_provider::ApiProvider;
pub use tfidf_provider::TfIdfProvider;

use beacon_core::config::EmbeddingConfig;
use beacon_core::errors::{BeaconResult, ConfigError};
use beacon_core::traits::IEmbeddingProvider;
use tracing::info;

/// Build the configured provider. Unknown names are a configuration error.
pub fn create_provider(config: &EmbeddingConfig) -> BeaconResult<Box<dyn IEmbeddingProvider>> {
    match config.provider.as_str() {
        "api" => {
            let provider = ApiProvider::from_config(config)?;
            info!(
                provider = "api",
                base_url = %config.base_url,
                model = %config.model,
                "embedding provider configured"
            );
            Ok(Box::new(provider))
        }
        "tfidf" => {
            info!(provider = "tfidf", dims = config.dimensions, "using TF-IDF embedding provider");
            Ok(Box::new(TfIdfProvider::new(config.dimensions)))
        }
        other => Err(ConfigError::ParseFailed {
            reason: format!("unknown embedding provider '{other}' (expected 'api' or 'tfidf')"),
        }
        .into()),
    }
}
