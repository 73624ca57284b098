//! RetrievalEngine: strategy dispatch, concurrent hybrid sources, fusion and
//! chunk resolution.
//!
//! Collaborators are synchronous, so every call into them runs on tokio's
//! blocking pool. Hybrid sources additionally run under a timeout; a source
//! that fails or times out is dropped and recorded as a degradation.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task::JoinError;
use tracing::{debug, warn};

use beacon_core::config::RetrievalConfig;
use beacon_core::errors::{BeaconError, BeaconResult, RetrievalError};
use beacon_core::models::{
    DegradationEvent, Query, RetrievalOutcome, RetrievedChunk, ScoredChunk, Strategy,
};
use beacon_core::traits::{IChunkStore, IEmbeddingProvider, ILexicalIndex, IVectorIndex};
use beacon_observability::events;

use crate::search::{fuse, DenseRetriever, LexicalRetriever};

pub struct RetrievalEngine {
    dense: DenseRetriever,
    lexical: LexicalRetriever,
    store: Arc<dyn IChunkStore>,
    config: RetrievalConfig,
}

/// How one hybrid source ended.
enum SourceOutcome {
    Ok(Vec<ScoredChunk>),
    Failed(String),
}

impl RetrievalEngine {
    pub fn new(
        embedder: Arc<dyn IEmbeddingProvider>,
        vectors: Arc<dyn IVectorIndex>,
        lexical: Arc<dyn ILexicalIndex>,
        store: Arc<dyn IChunkStore>,
        config: RetrievalConfig,
    ) -> BeaconResult<Self> {
        config.validate()?;
        Ok(Self {
            dense: DenseRetriever::new(embedder, vectors),
            lexical: LexicalRetriever::new(lexical),
            store,
            config,
        })
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// A query carrying this engine's configured defaults.
    pub fn query(&self, text: impl Into<String>) -> Query {
        Query::with_config(text, &self.config)
    }

    /// Run one retrieval request.
    pub async fn retrieve(&self, query: &Query) -> BeaconResult<RetrievalOutcome> {
        query.validate()?;
        let started = Instant::now();

        let (scored, degradations) = match query.strategy {
            Strategy::Dense => {
                let dense = self.dense.clone();
                let (text, filter, k) = (query.text.clone(), query.filter.clone(), query.top_k);
                let list = blocking(move || dense.search(&text, &filter, k)).await?;
                (list, Vec::new())
            }
            Strategy::Lexical => {
                let lexical = self.lexical.clone();
                let (text, filter, k) = (query.text.clone(), query.filter.clone(), query.top_k);
                let list = blocking(move || lexical.search(&text, &filter, k)).await?;
                (list, Vec::new())
            }
            Strategy::Hybrid => self.hybrid(query).await?,
        };

        let results = self.resolve(scored).await?;
        events::retrieval_completed(
            query.strategy.as_str(),
            results.len(),
            !degradations.is_empty(),
            started.elapsed().as_millis(),
        );
        Ok(RetrievalOutcome {
            strategy: query.strategy,
            results,
            degradations,
        })
    }

    async fn hybrid(
        &self,
        query: &Query,
    ) -> BeaconResult<(Vec<ScoredChunk>, Vec<DegradationEvent>)> {
        let candidates = query.top_k.saturating_mul(self.config.candidate_multiplier);
        let timeout = Duration::from_millis(self.config.sub_query_timeout_ms);

        let dense = self.dense.clone();
        let (d_text, d_filter) = (query.text.clone(), query.filter.clone());
        let dense_task = tokio::task::spawn_blocking(move || {
            dense.search(&d_text, &d_filter, candidates)
        });

        let lexical = self.lexical.clone();
        let (l_text, l_filter) = (query.text.clone(), query.filter.clone());
        let lexical_task = tokio::task::spawn_blocking(move || {
            lexical.search(&l_text, &l_filter, candidates)
        });

        let (dense_res, lexical_res) = tokio::join!(
            tokio::time::timeout(timeout, dense_task),
            tokio::time::timeout(timeout, lexical_task),
        );
        let dense_out = settle(dense_res, timeout)?;
        let lexical_out = settle(lexical_res, timeout)?;

        let mut degradations = Vec::new();
        let (dense_list, lexical_list) = match (dense_out, lexical_out) {
            (SourceOutcome::Ok(d), SourceOutcome::Ok(l)) => (d, l),
            (SourceOutcome::Ok(d), SourceOutcome::Failed(reason)) => {
                degradations.push(DegradationEvent::now("lexical", reason, "dense-only"));
                (d, Vec::new())
            }
            (SourceOutcome::Failed(reason), SourceOutcome::Ok(l)) => {
                degradations.push(DegradationEvent::now("dense", reason, "lexical-only"));
                (Vec::new(), l)
            }
            (SourceOutcome::Failed(dense), SourceOutcome::Failed(lexical)) => {
                return Err(RetrievalError::BothSourcesFailed { dense, lexical }.into());
            }
        };
        for degradation in &degradations {
            events::source_degraded(degradation);
        }
        debug!(
            dense = dense_list.len(),
            lexical = lexical_list.len(),
            candidates,
            "hybrid candidates gathered"
        );

        let fused = fuse(&dense_list, &lexical_list, query.weights, query.top_k)?;
        Ok((fused, degradations))
    }

    /// Resolve ids to chunks in one lookup, keeping the scored order. Ids the
    /// store no longer has are dropped.
    async fn resolve(&self, scored: Vec<ScoredChunk>) -> BeaconResult<Vec<RetrievedChunk>> {
        if scored.is_empty() {
            return Ok(Vec::new());
        }
        let store = Arc::clone(&self.store);
        let ids: Vec<String> = scored.iter().map(|s| s.chunk_id.clone()).collect();
        let chunks = blocking(move || store.get_chunks(&ids))
            .await
            .map_err(|e| match e {
                BeaconError::RetrievalError(_) => e,
                other => BeaconError::upstream("chunk-store", other),
            })?;

        let mut by_id: HashMap<String, _> =
            chunks.into_iter().map(|c| (c.id.clone(), c)).collect();
        let mut results = Vec::with_capacity(scored.len());
        for score in scored {
            match by_id.remove(&score.chunk_id) {
                Some(chunk) => results.push(RetrievedChunk { score, chunk }),
                None => warn!(chunk_id = %score.chunk_id, "scored chunk missing from store, dropped"),
            }
        }
        Ok(results)
    }
}

/// Run a synchronous collaborator call on the blocking pool.
async fn blocking<F, T>(f: F) -> BeaconResult<T>
where
    F: FnOnce() -> BeaconResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(task_failed)?
}

fn task_failed(e: JoinError) -> BeaconError {
    RetrievalError::TaskFailed {
        reason: e.to_string(),
    }
    .into()
}

/// A panicked task is a bug and fails the request; errors and timeouts degrade.
fn settle(
    result: Result<Result<BeaconResult<Vec<ScoredChunk>>, JoinError>, tokio::time::error::Elapsed>,
    timeout: Duration,
) -> BeaconResult<SourceOutcome> {
    match result {
        Ok(Ok(Ok(list))) => Ok(SourceOutcome::Ok(list)),
        Ok(Ok(Err(e))) => Ok(SourceOutcome::Failed(e.to_string())),
        Ok(Err(join)) => Err(task_failed(join)),
        Err(_) => Ok(SourceOutcome::Failed(format!(
            "timed out after {} ms",
            timeout.as_millis()
        ))),
    }
}
