//! Composition root: builds every heavy resource once from configuration.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use beacon_chunking::HeadingChunker;
use beacon_core::config::BeaconConfig;
use beacon_core::traits::IEmbeddingProvider;
use beacon_embeddings::EmbeddingEngine;
use beacon_retrieval::RetrievalEngine;
use beacon_storage::StorageEngine;
use beacon_tokens::TokenCounter;
use tracing::debug;

use crate::cli::Cli;

pub struct AppContext {
    pub config: BeaconConfig,
    pub store: Arc<StorageEngine>,
    pub embedder: Arc<dyn IEmbeddingProvider>,
}

/// Defaults, then the config file, then command-line overrides.
pub fn load_config(cli: &Cli) -> Result<BeaconConfig> {
    let mut config = match &cli.config {
        Some(path) => BeaconConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => BeaconConfig::default(),
    };
    if let Some(db) = &cli.db {
        config.storage.db_path = db.to_string_lossy().into_owned();
    }
    if let Some(provider) = &cli.provider {
        config.embedding.provider = provider.clone();
    }
    config.validate()?;
    Ok(config)
}

impl AppContext {
    /// Open storage and build the embedding engine. Must run outside any
    /// async runtime: the HTTP provider owns a blocking client.
    pub fn open(config: BeaconConfig) -> Result<Self> {
        let store = StorageEngine::open(Path::new(&config.storage.db_path), config.storage.read_pool_size)
            .with_context(|| format!("opening database {}", config.storage.db_path))?
            .with_lexical_match(config.retrieval.lexical_match);
        let embedder = EmbeddingEngine::new(&config.embedding).context("building embedding engine")?;
        debug!(
            db = %config.storage.db_path,
            provider = embedder.provider_name(),
            "context ready"
        );
        Ok(Self {
            config,
            store: Arc::new(store),
            embedder: Arc::new(embedder),
        })
    }

    pub fn chunker(&self) -> Result<HeadingChunker> {
        let counter = TokenCounter::with_default_cache()?;
        Ok(HeadingChunker::new(counter, self.config.chunking)?)
    }

    pub fn retrieval_engine(&self) -> Result<RetrievalEngine> {
        Ok(RetrievalEngine::new(
            Arc::clone(&self.embedder),
            self.store.clone(),
            self.store.clone(),
            self.store.clone(),
            self.config.retrieval.clone(),
        )?)
    }
}

/// A multi-threaded runtime for the async retrieval facade. Built after the
/// context so the context outlives it.
pub fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting tokio runtime")
}
