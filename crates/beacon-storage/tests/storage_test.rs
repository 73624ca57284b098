//! Integration tests for the SQLite store and its two indexes.

use beacon_core::config::LexicalMatch;
use beacon_core::models::{Chunk, Document, DocumentMetadata, FilterField, MetadataFilter};
use beacon_core::traits::{IChunkStore, ILexicalIndex, IVectorIndex};
use beacon_storage::StorageEngine;

fn metadata(campus: &str, lab: Option<&str>, professors: &[&str]) -> DocumentMetadata {
    DocumentMetadata {
        campus: Some(campus.to_string()),
        lab: lab.map(str::to_string),
        professors: professors.iter().map(|p| p.to_string()).collect(),
        tags: vec!["research".to_string()],
        ..Default::default()
    }
}

fn chunk(doc: &Document, index: usize, text: &str, embedding: Vec<f32>) -> Chunk {
    Chunk {
        id: format!("{}#{index}", doc.url),
        document_url: doc.url.clone(),
        index,
        text: text.to_string(),
        token_count: text.split_whitespace().count(),
        heading_path: vec![doc.title.clone()],
        metadata: doc.metadata.clone(),
        embedding,
        embedding_model: "test-model".to_string(),
    }
}

fn seed(engine: &StorageEngine) -> (Document, Document) {
    let robots = Document::new(
        "https://example.edu/labs/robots",
        "Robotics Lab",
        "robot arms and vision",
        metadata("north", Some("robolab"), &["Ada Lovelace"]),
    );
    let poetry = Document::new(
        "https://example.edu/labs/poetry",
        "Poetry Lab",
        "sonnets and haiku",
        metadata("south", None, &["Basho"]),
    );
    engine
        .replace_document(
            &robots,
            &[
                chunk(&robots, 0, "robot arms for assembly", vec![1.0, 0.0, 0.0]),
                chunk(&robots, 1, "computer vision for robot grasping", vec![0.8, 0.6, 0.0]),
            ],
        )
        .unwrap();
    engine
        .replace_document(
            &poetry,
            &[chunk(&poetry, 0, "sonnets and haiku workshop", vec![0.0, 0.0, 1.0])],
        )
        .unwrap();
    (robots, poetry)
}

#[test]
fn replace_document_reports_removed_and_inserted() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let (robots, _) = seed(&engine);
    assert_eq!(engine.chunk_count().unwrap(), 3);

    let report = engine
        .replace_document(&robots, &[chunk(&robots, 0, "only one now", vec![1.0, 0.0, 0.0])])
        .unwrap();
    assert_eq!(report.chunks_removed, 2);
    assert_eq!(report.chunks_inserted, 1);
    assert_eq!(engine.chunk_count().unwrap(), 2);

    let stored = engine.find_document(&robots.url).unwrap().unwrap();
    assert_eq!(stored.chunk_count, 1);
    assert_eq!(stored.content_hash, robots.content_hash);
}

#[test]
fn replaced_chunks_leave_the_lexical_index() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let (robots, _) = seed(&engine);
    engine
        .replace_document(&robots, &[chunk(&robots, 0, "gardening", vec![1.0, 0.0, 0.0])])
        .unwrap();
    let hits = engine.rank("robot", &MetadataFilter::new(), 10).unwrap();
    assert!(hits.is_empty());
    let hits = engine.rank("gardening", &MetadataFilter::new(), 10).unwrap();
    assert_eq!(hits.len(), 1);
}

#[test]
fn get_chunks_round_trips_fields_and_skips_unknown_ids() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let (robots, _) = seed(&engine);
    let ids = vec![format!("{}#1", robots.url), "missing".to_string()];
    let chunks = engine.get_chunks(&ids).unwrap();
    assert_eq!(chunks.len(), 1);
    let c = &chunks[0];
    assert_eq!(c.index, 1);
    assert_eq!(c.embedding, vec![0.8, 0.6, 0.0]);
    assert_eq!(c.metadata.professors, vec!["Ada Lovelace".to_string()]);
    assert_eq!(c.metadata.lab.as_deref(), Some("robolab"));
    assert_eq!(c.heading_path, vec!["Robotics Lab".to_string()]);
    assert_eq!(c.embedding_model, "test-model");
}

#[test]
fn unknown_document_is_none() {
    let engine = StorageEngine::open_in_memory().unwrap();
    assert!(engine.find_document("https://nowhere").unwrap().is_none());
    assert_eq!(engine.delete_document("https://nowhere").unwrap(), None);
}

#[test]
fn delete_document_removes_chunks() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let (robots, _) = seed(&engine);
    assert_eq!(engine.delete_document(&robots.url).unwrap(), Some(2));
    assert_eq!(engine.chunk_count().unwrap(), 1);
    assert!(engine.find_document(&robots.url).unwrap().is_none());
}

#[test]
fn vector_search_orders_by_distance() {
    let engine = StorageEngine::open_in_memory().unwrap();
    seed(&engine);
    let hits = engine
        .nearest_neighbors(&[1.0, 0.0, 0.0], &MetadataFilter::new(), 3)
        .unwrap();
    assert_eq!(hits.len(), 3);
    assert!(hits[0].0.ends_with("robots#0"));
    assert!(hits[0].1.abs() < 1e-9);
    assert!(hits[1].0.ends_with("robots#1"));
    assert!((hits[1].1 - 0.2).abs() < 1e-6);
    assert!((hits[2].1 - 1.0).abs() < 1e-6);
}

#[test]
fn vector_search_ignores_other_dimensions_and_zero_queries() {
    let engine = StorageEngine::open_in_memory().unwrap();
    seed(&engine);
    let hits = engine
        .nearest_neighbors(&[1.0, 0.0], &MetadataFilter::new(), 3)
        .unwrap();
    assert!(hits.is_empty());
    let hits = engine
        .nearest_neighbors(&[0.0, 0.0, 0.0], &MetadataFilter::new(), 3)
        .unwrap();
    assert!(hits.is_empty());
}

#[test]
fn filters_apply_to_both_indexes() {
    let engine = StorageEngine::open_in_memory().unwrap();
    seed(&engine);

    let south = MetadataFilter::new().with(FilterField::Campus, "south");
    let hits = engine.nearest_neighbors(&[1.0, 0.0, 0.0], &south, 10).unwrap();
    assert_eq!(hits.len(), 1);
    assert!(hits[0].0.contains("poetry"));

    let ada = MetadataFilter::new().with(FilterField::Professor, "Ada Lovelace");
    let hits = engine.rank("robot", &ada, 10).unwrap();
    assert_eq!(hits.len(), 2);

    let basho = MetadataFilter::new().with(FilterField::Professor, "Basho");
    assert!(engine.rank("robot", &basho, 10).unwrap().is_empty());

    let tagged = MetadataFilter::new().with(FilterField::Tag, "research");
    assert_eq!(
        engine.nearest_neighbors(&[0.0, 0.0, 1.0], &tagged, 10).unwrap().len(),
        3
    );
}

#[test]
fn lexical_rank_prefers_stronger_matches() {
    let engine = StorageEngine::open_in_memory().unwrap();
    seed(&engine);
    let hits = engine.rank("robot", &MetadataFilter::new(), 10).unwrap();
    assert_eq!(hits.len(), 2);
    assert!(hits[0].1 >= hits[1].1);
    assert!(hits.iter().all(|(_, score)| score.is_finite()));
}

#[test]
fn lexical_match_mode_changes_recall() {
    let all = StorageEngine::open_in_memory().unwrap();
    seed(&all);
    assert!(all.rank("robot haiku", &MetadataFilter::new(), 10).unwrap().is_empty());

    let any = StorageEngine::open_in_memory()
        .unwrap()
        .with_lexical_match(LexicalMatch::Any);
    seed(&any);
    assert_eq!(any.rank("robot haiku", &MetadataFilter::new(), 10).unwrap().len(), 3);
}

#[test]
fn lexical_query_with_operators_does_not_error() {
    let engine = StorageEngine::open_in_memory().unwrap();
    seed(&engine);
    let hits = engine
        .rank("robot* (\"vision", &MetadataFilter::new(), 10)
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert!(engine.rank("???", &MetadataFilter::new(), 10).unwrap().is_empty());
}

#[test]
fn file_backed_reads_see_committed_writes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("beacon.db");
    {
        let engine = StorageEngine::open(&path, 2).unwrap();
        seed(&engine);
        assert_eq!(engine.pool().readers.as_ref().map(|r| r.size()), Some(2));
        assert_eq!(engine.chunk_count().unwrap(), 3);
        assert_eq!(engine.list_documents().unwrap().len(), 2);
    }
    let reopened = StorageEngine::open(&path, 1).unwrap();
    assert_eq!(reopened.chunk_count().unwrap(), 3);
    let chunks = reopened
        .chunks_for_document("https://example.edu/labs/robots")
        .unwrap();
    assert_eq!(chunks.iter().map(|c| c.index).collect::<Vec<_>>(), vec![0, 1]);
}
