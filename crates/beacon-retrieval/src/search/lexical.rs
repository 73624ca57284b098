//! Lexical retriever over an inverted index.

use std::sync::Arc;

use tracing::debug;

use beacon_core::errors::{BeaconError, BeaconResult};
use beacon_core::models::{MetadataFilter, ScoredChunk};
use beacon_core::traits::ILexicalIndex;

use super::normalize::score_list;

#[derive(Clone)]
pub struct LexicalRetriever {
    index: Arc<dyn ILexicalIndex>,
}

impl LexicalRetriever {
    pub fn new(index: Arc<dyn ILexicalIndex>) -> Self {
        Self { index }
    }

    /// Up to `top_k` chunks by index score, best first. No matches is an
    /// empty list.
    pub fn search(
        &self,
        text: &str,
        filter: &MetadataFilter,
        top_k: usize,
    ) -> BeaconResult<Vec<ScoredChunk>> {
        if text.trim().is_empty() || top_k == 0 {
            return Ok(Vec::new());
        }
        let mut ranked = self
            .index
            .rank(text, filter, top_k)
            .map_err(|e| BeaconError::upstream("lexical-index", e))?;
        debug!(candidates = ranked.len(), top_k, "lexical search");
        ranked.truncate(top_k);
        Ok(score_list(ranked))
    }
}
