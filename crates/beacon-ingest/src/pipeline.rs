//! Ingest pipeline: hash check, chunk, embed in batches, replace.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use beacon_chunking::sections::{parse_markdown_sections, plain_text};
use beacon_chunking::HeadingChunker;
use beacon_core::errors::{BeaconResult, EmbeddingError};
use beacon_core::models::{Chunk, Document, DocumentMetadata, Section, TextChunk};
use beacon_core::traits::{IChunkStore, IEmbeddingProvider};
use beacon_observability::events;

use crate::report::{IngestOutcome, IngestReport};

/// Synchronous: blocks on the embedding provider and the store.
pub struct IngestPipeline {
    chunker: HeadingChunker,
    embedder: Arc<dyn IEmbeddingProvider>,
    store: Arc<dyn IChunkStore>,
    batch_size: usize,
    force: bool,
}

impl IngestPipeline {
    pub fn new(
        chunker: HeadingChunker,
        embedder: Arc<dyn IEmbeddingProvider>,
        store: Arc<dyn IChunkStore>,
        batch_size: usize,
    ) -> Self {
        Self {
            chunker,
            embedder,
            store,
            batch_size: batch_size.max(1),
            force: false,
        }
    }

    /// Re-ingest even when the stored content hash matches.
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Parse markdown into sections, then ingest its plain-text rendering.
    pub fn ingest_markdown(
        &self,
        url: &str,
        title: &str,
        markdown: &str,
        metadata: DocumentMetadata,
    ) -> BeaconResult<IngestReport> {
        let sections = parse_markdown_sections(markdown);
        let document = Document::new(url, title, plain_text(&sections), metadata);
        self.ingest(&document, Some(&sections))
    }

    pub fn ingest(
        &self,
        document: &Document,
        sections: Option<&[Section]>,
    ) -> BeaconResult<IngestReport> {
        let report = |outcome| IngestReport {
            url: document.url.clone(),
            content_hash: document.content_hash.clone(),
            outcome,
        };

        if document.is_empty() {
            events::document_skipped(&document.url, "empty text");
            return Ok(report(IngestOutcome::Skipped {
                reason: "empty text".to_string(),
            }));
        }

        if !self.force {
            if let Some(stored) = self.store.find_document(&document.url)? {
                if stored.content_hash == document.content_hash {
                    events::document_unchanged(&document.url, &document.content_hash);
                    return Ok(report(IngestOutcome::Unchanged));
                }
            }
        }

        let text_chunks = self.chunker.chunk(&document.text, sections);
        if text_chunks.is_empty() {
            events::document_skipped(&document.url, "no chunks");
            return Ok(report(IngestOutcome::Skipped {
                reason: "no chunks".to_string(),
            }));
        }

        let embeddings = self.embed_all(&text_chunks)?;
        let model = self.embedder.model_id().to_string();
        let chunks: Vec<Chunk> = text_chunks
            .into_iter()
            .zip(embeddings)
            .map(|(tc, embedding)| Chunk {
                id: Uuid::new_v4().to_string(),
                document_url: document.url.clone(),
                index: tc.index,
                text: tc.text,
                token_count: tc.token_count,
                heading_path: tc.heading_path,
                metadata: document.metadata.clone(),
                embedding,
                embedding_model: model.clone(),
            })
            .collect();

        let replaced = self.store.replace_document(document, &chunks)?;
        events::document_ingested(&document.url, replaced.chunks_inserted, replaced.chunks_removed);
        Ok(report(IngestOutcome::Ingested {
            chunks: replaced.chunks_inserted,
            replaced: replaced.chunks_removed,
        }))
    }

    fn embed_all(&self, chunks: &[TextChunk]) -> BeaconResult<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(chunks.len());
        for batch in chunks.chunks(self.batch_size) {
            let texts: Vec<String> = batch.iter().map(|c| c.text.clone()).collect();
            let embedded = self.embedder.embed_batch(&texts)?;
            if embedded.len() != texts.len() {
                return Err(EmbeddingError::CountMismatch {
                    expected: texts.len(),
                    actual: embedded.len(),
                }
                .into());
            }
            debug!(batch = texts.len(), "embedded chunk batch");
            vectors.extend(embedded);
        }
        Ok(vectors)
    }
}
