//! Dense retriever: embed the query, ask the vector index for neighbours.

use std::sync::Arc;

use tracing::debug;

use beacon_core::errors::{BeaconError, BeaconResult};
use beacon_core::models::{MetadataFilter, ScoredChunk};
use beacon_core::traits::{IEmbeddingProvider, IVectorIndex};

use super::normalize::score_list;

#[derive(Clone)]
pub struct DenseRetriever {
    embedder: Arc<dyn IEmbeddingProvider>,
    index: Arc<dyn IVectorIndex>,
}

impl DenseRetriever {
    pub fn new(embedder: Arc<dyn IEmbeddingProvider>, index: Arc<dyn IVectorIndex>) -> Self {
        Self { embedder, index }
    }

    /// Up to `top_k` chunks scored by `1 - distance`, best first.
    ///
    /// Blocks on the embedding provider and the index.
    pub fn search(
        &self,
        text: &str,
        filter: &MetadataFilter,
        top_k: usize,
    ) -> BeaconResult<Vec<ScoredChunk>> {
        if text.trim().is_empty() || top_k == 0 {
            return Ok(Vec::new());
        }
        let vector = self
            .embedder
            .embed(text)
            .map_err(|e| BeaconError::upstream("embedding", e))?;
        let neighbours = self
            .index
            .nearest_neighbors(&vector, filter, top_k)
            .map_err(|e| BeaconError::upstream("vector-index", e))?;
        debug!(candidates = neighbours.len(), top_k, "dense search");

        let mut pairs: Vec<_> = neighbours
            .into_iter()
            .map(|(id, distance)| (id, 1.0 - distance))
            .collect();
        pairs.truncate(top_k);
        Ok(score_list(pairs))
    }
}
