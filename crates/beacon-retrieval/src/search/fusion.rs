//! Weighted-sum fusion of dense and lexical result lists.
//!
//! `combined = alpha * norm_dense + beta * norm_lexical`, where each list is
//! min-max normalized on its own and an id missing from one list contributes
//! zero from that side.

use std::collections::HashMap;

use beacon_core::errors::BeaconResult;
use beacon_core::models::{ChunkId, FusionWeights, ScoredChunk};

use super::normalize::{min_max, sort_scored};

/// Fuse two ranked lists into at most `top_k` results.
///
/// Inputs are normalized from their `raw_score`. Both fields of each output
/// carry the combined score. Ordering is descending by score, then ascending
/// chunk id.
pub fn fuse(
    dense: &[ScoredChunk],
    lexical: &[ScoredChunk],
    weights: FusionWeights,
    top_k: usize,
) -> BeaconResult<Vec<ScoredChunk>> {
    weights.validate()?;

    let mut combined: HashMap<&ChunkId, f64> = HashMap::new();
    accumulate(&mut combined, dense, weights.alpha);
    accumulate(&mut combined, lexical, weights.beta);

    let mut fused: Vec<ScoredChunk> = combined
        .into_iter()
        .map(|(id, score)| ScoredChunk::new(id.clone(), score, score))
        .collect();
    sort_scored(&mut fused, |c| c.raw_score);
    fused.truncate(top_k);
    Ok(fused)
}

fn accumulate<'a>(into: &mut HashMap<&'a ChunkId, f64>, list: &'a [ScoredChunk], weight: f64) {
    let raw: Vec<f64> = list.iter().map(|c| c.raw_score).collect();
    for (chunk, norm) in list.iter().zip(min_max(&raw)) {
        *into.entry(&chunk.chunk_id).or_insert(0.0) += weight * norm;
    }
}
