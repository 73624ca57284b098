//! EmbeddingEngine, the entry point for beacon-embeddings.
//!
//! Adds an L1 cache, request batching and dimension validation on top of a
//! provider. Implements `IEmbeddingProvider` itself, so retrievers and the
//! ingest pipeline only ever see the trait.

use std::sync::Arc;

use beacon_core::config::EmbeddingConfig;
use beacon_core::errors::BeaconResult;
use beacon_core::traits::IEmbeddingProvider;
use moka::sync::Cache;
use tracing::{debug, info};

use crate::providers;
use crate::vectors::{validate_count, validate_dimensions};

pub struct EmbeddingEngine {
    provider: Box<dyn IEmbeddingProvider>,
    cache: Cache<String, Arc<Vec<f32>>>,
    batch_size: usize,
    dimensions: usize,
}

impl EmbeddingEngine {
    /// Build the configured provider and wrap it.
    pub fn new(config: &EmbeddingConfig) -> BeaconResult<Self> {
        let provider = providers::create_provider(config)?;
        Ok(Self::with_provider(provider, config))
    }

    /// Wrap an existing provider. Batch size and cache capacity come from `config`;
    /// dimensions come from the provider.
    pub fn with_provider(provider: Box<dyn IEmbeddingProvider>, config: &EmbeddingConfig) -> Self {
        info!(
            provider = provider.name(),
            model = provider.model_id(),
            dims = provider.dimensions(),
            batch_size = config.batch_size,
            "EmbeddingEngine initialized"
        );
        Self {
            dimensions: provider.dimensions(),
            provider,
            cache: Cache::new(config.cache_size),
            batch_size: config.batch_size.max(1),
        }
    }

    fn cache_key(&self, text: &str) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.provider.model_id().as_bytes());
        hasher.update(&[0]);
        hasher.update(text.as_bytes());
        hasher.finalize().to_hex().to_string()
    }

    pub fn cached_entries(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }
}

impl IEmbeddingProvider for EmbeddingEngine {
    fn embed_batch(&self, texts: &[String]) -> BeaconResult<Vec<Vec<f32>>> {
        let keys: Vec<String> = texts.iter().map(|t| self.cache_key(t)).collect();
        let mut out: Vec<Option<Vec<f32>>> = keys
            .iter()
            .map(|k| self.cache.get(k).map(|v| Vec::clone(&v)))
            .collect();

        let missing: Vec<usize> = (0..texts.len()).filter(|&i| out[i].is_none()).collect();
        debug!(
            total = texts.len(),
            cache_hits = texts.len() - missing.len(),
            "embedding batch"
        );

        for batch in missing.chunks(self.batch_size) {
            let inputs: Vec<String> = batch.iter().map(|&i| texts[i].clone()).collect();
            let vectors = self.provider.embed_batch(&inputs)?;
            validate_count(&vectors, inputs.len())?;
            for (&i, vector) in batch.iter().zip(vectors) {
                validate_dimensions(&vector, self.dimensions)?;
                self.cache.insert(keys[i].clone(), Arc::new(vector.clone()));
                out[i] = Some(vector);
            }
        }

        Ok(out.into_iter().flatten().collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_id(&self) -> &str {
        self.provider.model_id()
    }

    fn name(&self) -> &str {
        "beacon-embedding-engine"
    }

    fn is_available(&self) -> bool {
        self.provider.is_available()
    }
}
