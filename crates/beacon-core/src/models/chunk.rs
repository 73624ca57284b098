use serde::{Deserialize, Serialize};

use super::DocumentMetadata;

pub type ChunkId = String;

/// Token offsets of a window within the text it was cut from. `end` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenWindow {
    pub start: usize,
    pub end: usize,
}

/// Chunker output, before embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextChunk {
    pub index: usize,
    pub text: String,
    pub token_count: usize,
    pub heading_path: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<TokenWindow>,
}

/// A stored, retrievable unit of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: ChunkId,
    pub document_url: String,
    pub index: usize,
    pub text: String,
    pub token_count: usize,
    pub heading_path: Vec<String>,
    pub metadata: DocumentMetadata,
    #[serde(default, skip_serializing)]
    pub embedding: Vec<f32>,
    pub embedding_model: String,
}

impl Chunk {
    pub fn embedding_dim(&self) -> usize {
        self.embedding.len()
    }
}
