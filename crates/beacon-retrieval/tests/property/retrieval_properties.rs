//! Property tests for normalization and fusion.

use std::collections::BTreeMap;

use beacon_core::models::{FusionWeights, ScoredChunk};
use beacon_retrieval::fuse;
use beacon_retrieval::search::normalize::min_max;
use proptest::prelude::*;

/// A list of unique ids with arbitrary finite scores.
fn scored_list() -> impl Strategy<Value = Vec<ScoredChunk>> {
    prop::collection::btree_map(0u16..60, -50.0f64..50.0, 0..30).prop_map(|m: BTreeMap<u16, f64>| {
        m.into_iter()
            .map(|(id, s)| ScoredChunk::new(format!("c{id:03}"), s, 0.0))
            .collect()
    })
}

fn weights() -> impl Strategy<Value = FusionWeights> {
    (0.0f64..5.0, 0.0f64..5.0).prop_map(|(alpha, beta)| FusionWeights { alpha, beta })
}

proptest! {
    #[test]
    fn min_max_lands_in_unit_interval(scores in prop::collection::vec(-1e6f64..1e6, 1..50)) {
        let normalized = min_max(&scores);
        prop_assert_eq!(normalized.len(), scores.len());
        prop_assert!(normalized.iter().all(|s| (0.0..=1.0).contains(s)));
    }

    #[test]
    fn min_max_is_idempotent_on_normalized_lists(scores in prop::collection::vec(-1e3f64..1e3, 2..50)) {
        let once = min_max(&scores);
        let twice = min_max(&once);
        for (a, b) in once.iter().zip(&twice) {
            prop_assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn fusion_is_deterministic(dense in scored_list(), lexical in scored_list(), w in weights(), k in 1usize..40) {
        let first = fuse(&dense, &lexical, w, k).unwrap();
        let second = fuse(&dense, &lexical, w, k).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn fusion_is_sorted_bounded_and_unique(dense in scored_list(), lexical in scored_list(), w in weights(), k in 1usize..40) {
        let fused = fuse(&dense, &lexical, w, k).unwrap();
        prop_assert!(fused.len() <= k);
        for pair in fused.windows(2) {
            prop_assert!(
                pair[0].raw_score > pair[1].raw_score
                    || (pair[0].raw_score == pair[1].raw_score && pair[0].chunk_id < pair[1].chunk_id)
            );
        }
        let mut ids: Vec<&str> = fused.iter().map(|c| c.chunk_id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), fused.len());
        prop_assert!(fused.iter().all(|c| c.raw_score <= w.alpha + w.beta + 1e-9));
    }

    #[test]
    fn raising_alpha_never_lowers_a_dense_score(
        dense in scored_list(),
        lexical in scored_list(),
        beta in 0.0f64..2.0,
        alpha in 0.0f64..2.0,
        bump in 0.0f64..2.0,
    ) {
        let n = dense.len() + lexical.len();
        prop_assume!(n > 0);
        let low = fuse(&dense, &lexical, FusionWeights { alpha, beta }, n).unwrap();
        let high = fuse(&dense, &lexical, FusionWeights { alpha: alpha + bump, beta }, n).unwrap();
        let score = |list: &[ScoredChunk], id: &str| {
            list.iter().find(|c| c.chunk_id == id).map(|c| c.raw_score)
        };
        for chunk in &dense {
            let before = score(&low, &chunk.chunk_id).unwrap();
            let after = score(&high, &chunk.chunk_id).unwrap();
            prop_assert!(after + 1e-12 >= before);
        }
    }
}
