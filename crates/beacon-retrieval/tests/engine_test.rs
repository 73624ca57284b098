//! Facade behavior against in-memory collaborators.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use beacon_core::config::RetrievalConfig;
use beacon_core::errors::{BeaconError, BeaconResult, ConfigError, RetrievalError};
use beacon_core::models::{
    Chunk, ChunkId, Document, DocumentMetadata, MetadataFilter, Query, Strategy,
};
use beacon_core::traits::{
    IChunkStore, IEmbeddingProvider, ILexicalIndex, IVectorIndex, ReplaceReport, StoredDocument,
};
use beacon_retrieval::RetrievalEngine;

// ---------------------------------------------------------------------------
// Collaborators
// ---------------------------------------------------------------------------

struct UnitEmbedder {
    calls: AtomicUsize,
}

impl IEmbeddingProvider for UnitEmbedder {
    fn embed_batch(&self, texts: &[String]) -> BeaconResult<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect())
    }
    fn dimensions(&self) -> usize {
        2
    }
    fn model_id(&self) -> &str {
        "unit"
    }
    fn name(&self) -> &str {
        "unit"
    }
    fn is_available(&self) -> bool {
        true
    }
}

#[derive(Clone)]
enum Behavior {
    Return(Vec<(&'static str, f64)>),
    Fail,
    Stall(Duration),
}

/// Serves both index traits from a scripted behavior and records requested `k`.
struct ScriptedIndex {
    behavior: Behavior,
    requested_k: Mutex<Vec<usize>>,
}

impl ScriptedIndex {
    fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            requested_k: Mutex::new(Vec::new()),
        })
    }

    fn answer(&self, k: usize) -> BeaconResult<Vec<(ChunkId, f64)>> {
        self.requested_k.lock().unwrap().push(k);
        match &self.behavior {
            Behavior::Return(pairs) => Ok(pairs
                .iter()
                .take(k)
                .map(|(id, s)| (id.to_string(), *s))
                .collect()),
            Behavior::Fail => Err(BeaconError::upstream("scripted", "connection refused")),
            Behavior::Stall(d) => {
                std::thread::sleep(*d);
                Ok(Vec::new())
            }
        }
    }
}

impl IVectorIndex for ScriptedIndex {
    fn nearest_neighbors(
        &self,
        _vector: &[f32],
        _filter: &MetadataFilter,
        k: usize,
    ) -> BeaconResult<Vec<(ChunkId, f64)>> {
        self.answer(k)
    }
}

impl ILexicalIndex for ScriptedIndex {
    fn rank(&self, _text: &str, _filter: &MetadataFilter, k: usize) -> BeaconResult<Vec<(ChunkId, f64)>> {
        self.answer(k)
    }
}

struct MapStore {
    chunks: HashMap<String, Chunk>,
}

impl MapStore {
    fn with_ids(ids: &[&str]) -> Arc<Self> {
        let chunks = ids
            .iter()
            .enumerate()
            .map(|(index, id)| {
                let chunk = Chunk {
                    id: id.to_string(),
                    document_url: format!("https://example.edu/{id}"),
                    index,
                    text: format!("chunk {id}"),
                    token_count: 2,
                    heading_path: Vec::new(),
                    metadata: DocumentMetadata::default(),
                    embedding: Vec::new(),
                    embedding_model: "unit".to_string(),
                };
                (id.to_string(), chunk)
            })
            .collect();
        Arc::new(Self { chunks })
    }
}

impl IChunkStore for MapStore {
    fn replace_document(&self, _document: &Document, _chunks: &[Chunk]) -> BeaconResult<ReplaceReport> {
        unreachable!("retrieval never writes")
    }
    fn get_chunks(&self, ids: &[ChunkId]) -> BeaconResult<Vec<Chunk>> {
        // Reverse to prove the engine restores scored order.
        Ok(ids.iter().rev().filter_map(|id| self.chunks.get(id).cloned()).collect())
    }
    fn find_document(&self, _url: &str) -> BeaconResult<Option<StoredDocument>> {
        Ok(None)
    }
    fn chunk_count(&self) -> BeaconResult<usize> {
        Ok(self.chunks.len())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn config() -> RetrievalConfig {
    RetrievalConfig {
        sub_query_timeout_ms: 200,
        ..Default::default()
    }
}

fn engine(
    vectors: Arc<ScriptedIndex>,
    lexical: Arc<ScriptedIndex>,
    store: Arc<MapStore>,
) -> (RetrievalEngine, Arc<UnitEmbedder>) {
    let embedder = Arc::new(UnitEmbedder {
        calls: AtomicUsize::new(0),
    });
    let engine = RetrievalEngine::new(embedder.clone(), vectors, lexical, store, config()).unwrap();
    (engine, embedder)
}

/// Dense {A: 0.9, B: 0.5} as cosine distances.
fn dense_ab() -> Behavior {
    Behavior::Return(vec![("A", 0.1), ("B", 0.5)])
}

fn lexical_bc() -> Behavior {
    Behavior::Return(vec![("B", 0.8), ("C", 0.2)])
}

fn scores(outcome: &beacon_core::models::RetrievalOutcome) -> Vec<(String, f64)> {
    outcome
        .results
        .iter()
        .map(|r| (r.chunk.id.clone(), r.score.normalized_score))
        .collect()
}

fn assert_scores(actual: Vec<(String, f64)>, expected: &[(&str, f64)]) {
    assert_eq!(actual.len(), expected.len(), "{actual:?}");
    for ((id, score), (eid, escore)) in actual.iter().zip(expected) {
        assert_eq!(id, eid);
        assert!((score - escore).abs() < 1e-9, "{id}: {score} != {escore}");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn hybrid_fuses_weighted_normalized_scores() {
    let (engine, _) = engine(
        ScriptedIndex::new(dense_ab()),
        ScriptedIndex::new(lexical_bc()),
        MapStore::with_ids(&["A", "B", "C"]),
    );
    let outcome = engine
        .retrieve(&Query::new("labs").strategy(Strategy::Hybrid).top_k(3).weights(0.6, 0.4))
        .await
        .unwrap();

    assert_scores(scores(&outcome), &[("A", 0.6), ("B", 0.4), ("C", 0.0)]);
    assert!(!outcome.is_degraded());
    assert_eq!(outcome.strategy, Strategy::Hybrid);
}

#[tokio::test]
async fn hybrid_over_fetches_each_source() {
    let vectors = ScriptedIndex::new(dense_ab());
    let lexical = ScriptedIndex::new(lexical_bc());
    let (engine, _) = engine(vectors.clone(), lexical.clone(), MapStore::with_ids(&["A", "B", "C"]));

    let outcome = engine.retrieve(&Query::new("labs").top_k(2)).await.unwrap();
    assert_eq!(outcome.results.len(), 2);
    assert_eq!(*vectors.requested_k.lock().unwrap(), vec![10]);
    assert_eq!(*lexical.requested_k.lock().unwrap(), vec![10]);
}

#[tokio::test]
async fn hybrid_degrades_to_dense_when_lexical_fails() {
    let (engine, _) = engine(
        ScriptedIndex::new(dense_ab()),
        ScriptedIndex::new(Behavior::Fail),
        MapStore::with_ids(&["A", "B", "C"]),
    );
    let outcome = engine.retrieve(&Query::new("labs").top_k(3)).await.unwrap();

    // Dense-only normalized scores scaled by alpha, same order.
    assert_scores(scores(&outcome), &[("A", 0.6), ("B", 0.0)]);
    assert_eq!(outcome.degradations.len(), 1);
    let event = &outcome.degradations[0];
    assert_eq!(event.component, "lexical");
    assert_eq!(event.fallback_used, "dense-only");
    assert!(event.failure.contains("connection refused"));
}

#[tokio::test]
async fn hybrid_degrades_when_lexical_times_out() {
    let (engine, _) = engine(
        ScriptedIndex::new(dense_ab()),
        ScriptedIndex::new(Behavior::Stall(Duration::from_millis(1000))),
        MapStore::with_ids(&["A", "B", "C"]),
    );
    let outcome = engine.retrieve(&Query::new("labs").top_k(3)).await.unwrap();

    assert_eq!(outcome.chunk_ids(), vec!["A", "B"]);
    assert_eq!(outcome.degradations.len(), 1);
    assert!(outcome.degradations[0].failure.contains("timed out"));
}

#[tokio::test]
async fn hybrid_degrades_to_lexical_when_dense_fails() {
    let (engine, _) = engine(
        ScriptedIndex::new(Behavior::Fail),
        ScriptedIndex::new(lexical_bc()),
        MapStore::with_ids(&["A", "B", "C"]),
    );
    let outcome = engine.retrieve(&Query::new("labs").top_k(3)).await.unwrap();
    assert_scores(scores(&outcome), &[("B", 0.4), ("C", 0.0)]);
    assert_eq!(outcome.degradations[0].component, "dense");
}

#[tokio::test]
async fn hybrid_fails_when_both_sources_fail() {
    let (engine, _) = engine(
        ScriptedIndex::new(Behavior::Fail),
        ScriptedIndex::new(Behavior::Fail),
        MapStore::with_ids(&[]),
    );
    let err = engine.retrieve(&Query::new("labs")).await.unwrap_err();
    assert!(matches!(
        err,
        BeaconError::RetrievalError(RetrievalError::BothSourcesFailed { .. })
    ));
}

#[tokio::test]
async fn dense_strategy_surfaces_vector_index_failure() {
    let (engine, _) = engine(
        ScriptedIndex::new(Behavior::Fail),
        ScriptedIndex::new(lexical_bc()),
        MapStore::with_ids(&["A", "B", "C"]),
    );
    let err = engine
        .retrieve(&Query::new("labs").strategy(Strategy::Dense))
        .await
        .unwrap_err();
    match err {
        BeaconError::UpstreamUnavailable { component, .. } => assert_eq!(component, "vector-index"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn single_source_strategies_keep_source_order() {
    let (engine, _) = engine(
        ScriptedIndex::new(dense_ab()),
        ScriptedIndex::new(lexical_bc()),
        MapStore::with_ids(&["A", "B", "C"]),
    );
    let dense = engine
        .retrieve(&Query::new("labs").strategy(Strategy::Dense))
        .await
        .unwrap();
    assert_eq!(dense.chunk_ids(), vec!["A", "B"]);
    assert!((dense.results[0].score.raw_score - 0.9).abs() < 1e-9);

    let lexical = engine
        .retrieve(&Query::new("labs").strategy(Strategy::Lexical).top_k(1))
        .await
        .unwrap();
    assert_eq!(lexical.chunk_ids(), vec!["B"]);
}

#[tokio::test]
async fn zero_top_k_is_rejected_before_io() {
    let vectors = ScriptedIndex::new(dense_ab());
    let (engine, embedder) = engine(
        vectors.clone(),
        ScriptedIndex::new(lexical_bc()),
        MapStore::with_ids(&["A"]),
    );
    let err = engine.retrieve(&Query::new("labs").top_k(0)).await.unwrap_err();
    assert!(matches!(err, BeaconError::ConfigError(ConfigError::InvalidTopK)));
    assert_eq!(embedder.calls.load(Ordering::SeqCst), 0);
    assert!(vectors.requested_k.lock().unwrap().is_empty());
}

#[tokio::test]
async fn blank_query_returns_nothing_without_embedding() {
    let (engine, embedder) = engine(
        ScriptedIndex::new(dense_ab()),
        ScriptedIndex::new(lexical_bc()),
        MapStore::with_ids(&["A", "B", "C"]),
    );
    let outcome = engine.retrieve(&Query::new("   ")).await.unwrap();
    assert!(outcome.results.is_empty());
    assert_eq!(embedder.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn ids_missing_from_store_are_dropped() {
    let (engine, _) = engine(
        ScriptedIndex::new(dense_ab()),
        ScriptedIndex::new(lexical_bc()),
        MapStore::with_ids(&["A", "C"]),
    );
    let outcome = engine.retrieve(&Query::new("labs").top_k(3)).await.unwrap();
    assert_eq!(outcome.chunk_ids(), vec!["A", "C"]);
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let embedder = Arc::new(UnitEmbedder {
        calls: AtomicUsize::new(0),
    });
    let bad = RetrievalConfig {
        candidate_multiplier: 0,
        ..Default::default()
    };
    let result = RetrievalEngine::new(
        embedder,
        ScriptedIndex::new(dense_ab()),
        ScriptedIndex::new(lexical_bc()),
        MapStore::with_ids(&[]),
        bad,
    );
    assert!(matches!(
        result.err(),
        Some(BeaconError::ConfigError(ConfigError::InvalidCandidateMultiplier))
    ));
}
