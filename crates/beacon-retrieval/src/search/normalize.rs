//! Min-max normalization and the shared result ordering.

use std::cmp::Ordering;

use beacon_core::models::{ChunkId, ScoredChunk};

/// Map scores onto `[0, 1]` via `(s - min) / (max - min)`.
///
/// A list whose scores are all equal (including a single score) maps to 1.0
/// everywhere.
pub fn min_max(scores: &[f64]) -> Vec<f64> {
    let Some(first) = scores.first() else {
        return Vec::new();
    };
    let (min, max) = scores
        .iter()
        .fold((*first, *first), |(lo, hi), &s| (lo.min(s), hi.max(s)));
    let range = max - min;
    if range <= 0.0 || !range.is_finite() {
        return vec![1.0; scores.len()];
    }
    scores.iter().map(|s| (s - min) / range).collect()
}

/// Turn `(id, raw)` pairs into ordered `ScoredChunk`s with normalized scores.
pub fn score_list(pairs: Vec<(ChunkId, f64)>) -> Vec<ScoredChunk> {
    let raw: Vec<f64> = pairs.iter().map(|(_, s)| *s).collect();
    let normalized = min_max(&raw);
    let mut scored: Vec<ScoredChunk> = pairs
        .into_iter()
        .zip(normalized)
        .map(|((id, raw), norm)| ScoredChunk::new(id, raw, norm))
        .collect();
    sort_scored(&mut scored, |c| c.raw_score);
    scored
}

/// Descending by `key`, ties broken by ascending chunk id.
pub fn sort_scored(list: &mut [ScoredChunk], key: impl Fn(&ScoredChunk) -> f64) {
    list.sort_by(|a, b| {
        key(b)
            .partial_cmp(&key(a))
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.chunk_id.cmp(&b.chunk_id))
    });
}
