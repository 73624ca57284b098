use crate::errors::BeaconResult;
use crate::models::{ChunkId, MetadataFilter};

/// Nearest-neighbour search over chunk embeddings.
pub trait IVectorIndex: Send + Sync {
    /// Up to `k` `(chunk_id, distance)` pairs matching `filter`, nearest first.
    /// Distance is cosine distance, so similarity is `1 - distance`.
    fn nearest_neighbors(
        &self,
        vector: &[f32],
        filter: &MetadataFilter,
        k: usize,
    ) -> BeaconResult<Vec<(ChunkId, f64)>>;
}

/// Inverted-index keyword ranking over chunk text.
pub trait ILexicalIndex: Send + Sync {
    /// Up to `k` `(chunk_id, score)` pairs matching `filter`, higher is better.
    fn rank(
        &self,
        text: &str,
        filter: &MetadataFilter,
        k: usize,
    ) -> BeaconResult<Vec<(ChunkId, f64)>>;
}
