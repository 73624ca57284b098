use serde::{Deserialize, Serialize};

use super::{Chunk, ChunkId, DegradationEvent, Strategy};

/// A chunk id with its score. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub chunk_id: ChunkId,
    pub raw_score: f64,
    pub normalized_score: f64,
}

impl ScoredChunk {
    pub fn new(chunk_id: impl Into<ChunkId>, raw_score: f64, normalized_score: f64) -> Self {
        Self {
            chunk_id: chunk_id.into(),
            raw_score,
            normalized_score,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedChunk {
    #[serde(flatten)]
    pub score: ScoredChunk,
    pub chunk: Chunk,
}

/// Result of one retrieval request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalOutcome {
    pub strategy: Strategy,
    pub results: Vec<RetrievedChunk>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub degradations: Vec<DegradationEvent>,
}

impl RetrievalOutcome {
    pub fn chunk_ids(&self) -> Vec<&str> {
        self.results
            .iter()
            .map(|r| r.score.chunk_id.as_str())
            .collect()
    }

    pub fn is_degraded(&self) -> bool {
        !self.degradations.is_empty()
    }
}
