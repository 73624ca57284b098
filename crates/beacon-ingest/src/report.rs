use serde::{Deserialize, Serialize};

/// What happened to one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum IngestOutcome {
    /// Nothing to store: the text was empty or produced no chunks.
    Skipped { reason: String },
    /// Stored content hash matches; nothing was re-embedded.
    Unchanged,
    /// `chunks` stored, `replaced` prior chunks removed.
    Ingested { chunks: usize, replaced: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    pub url: String,
    pub content_hash: String,
    #[serde(flatten)]
    pub outcome: IngestOutcome,
}

impl IngestReport {
    pub fn chunks_stored(&self) -> usize {
        match self.outcome {
            IngestOutcome::Ingested { chunks, .. } => chunks,
            _ => 0,
        }
    }
}
