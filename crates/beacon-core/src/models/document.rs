use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Descriptive metadata attached to a document and copied onto each of its chunks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentMetadata {
    pub campus: Option<String>,
    pub building: Option<String>,
    pub department: Option<String>,
    pub lab: Option<String>,
    pub professors: Vec<String>,
    pub tags: Vec<String>,
}

/// A source document. Re-ingesting the same URL with new text supersedes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub url: String,
    pub title: String,
    pub text: String,
    /// blake3 hex digest of `text`.
    pub content_hash: String,
    pub fetched_at: DateTime<Utc>,
    pub metadata: DocumentMetadata,
}

impl Document {
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        text: impl Into<String>,
        metadata: DocumentMetadata,
    ) -> Self {
        let text = text.into();
        Self {
            url: url.into(),
            title: title.into(),
            content_hash: Self::compute_hash(&text),
            text,
            fetched_at: Utc::now(),
            metadata,
        }
    }

    pub fn compute_hash(text: &str) -> String {
        blake3::hash(text.as_bytes()).to_hex().to_string()
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
