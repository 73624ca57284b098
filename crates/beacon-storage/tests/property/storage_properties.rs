//! Property tests for the vector index and chunk replacement.

use beacon_core::models::{Chunk, Document, DocumentMetadata, MetadataFilter};
use beacon_core::traits::{IChunkStore, IVectorIndex};
use beacon_storage::StorageEngine;
use proptest::prelude::*;

fn chunks_for(doc: &Document, vectors: &[Vec<f32>]) -> Vec<Chunk> {
    vectors
        .iter()
        .enumerate()
        .map(|(index, v)| Chunk {
            id: uuid::Uuid::new_v4().to_string(),
            document_url: doc.url.clone(),
            index,
            text: format!("chunk {index}"),
            token_count: 2,
            heading_path: Vec::new(),
            metadata: DocumentMetadata::default(),
            embedding: v.clone(),
            embedding_model: "prop".to_string(),
        })
        .collect()
}

fn vector() -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-1.0f32..1.0, 4)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn nearest_neighbors_sorted_and_bounded(
        vectors in prop::collection::vec(vector(), 1..20),
        query in vector(),
        k in 1usize..25,
    ) {
        let engine = StorageEngine::open_in_memory().unwrap();
        let doc = Document::new("https://p/doc", "doc", "text", DocumentMetadata::default());
        engine.replace_document(&doc, &chunks_for(&doc, &vectors)).unwrap();

        let hits = engine.nearest_neighbors(&query, &MetadataFilter::new(), k).unwrap();
        prop_assert!(hits.len() <= k);
        prop_assert!(hits.len() <= vectors.len());
        for pair in hits.windows(2) {
            prop_assert!(pair[0].1 <= pair[1].1);
        }
        for (_, distance) in &hits {
            prop_assert!((0.0..=2.0).contains(distance));
        }
    }

    #[test]
    fn replace_leaves_exactly_the_new_chunks(
        first in prop::collection::vec(vector(), 0..10),
        second in prop::collection::vec(vector(), 0..10),
    ) {
        let engine = StorageEngine::open_in_memory().unwrap();
        let doc = Document::new("https://p/doc", "doc", "text", DocumentMetadata::default());
        engine.replace_document(&doc, &chunks_for(&doc, &first)).unwrap();
        let replacement = chunks_for(&doc, &second);
        let report = engine.replace_document(&doc, &replacement).unwrap();

        prop_assert_eq!(report.chunks_removed, first.len());
        prop_assert_eq!(report.chunks_inserted, second.len());
        prop_assert_eq!(engine.chunk_count().unwrap(), second.len());

        let ids: Vec<String> = replacement.iter().map(|c| c.id.clone()).collect();
        prop_assert_eq!(engine.get_chunks(&ids).unwrap().len(), second.len());
    }
}
