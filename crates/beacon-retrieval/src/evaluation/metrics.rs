//! Ranking metrics. Labels are opaque strings compared for equality.

use std::collections::{BTreeMap, HashSet};

/// 1.0 if any relevant label appears in the first `k` retrieved, else 0.0.
pub fn recall_at_k(retrieved: &[String], relevant: &[String], k: usize) -> f64 {
    if relevant.is_empty() {
        return 0.0;
    }
    let relevant: HashSet<&str> = relevant.iter().map(String::as_str).collect();
    if retrieved.iter().take(k).any(|r| relevant.contains(r.as_str())) {
        1.0
    } else {
        0.0
    }
}

/// Reciprocal rank of the first relevant label within the first `k`, else 0.0.
pub fn mrr_at_k(retrieved: &[String], relevant: &[String], k: usize) -> f64 {
    let relevant: HashSet<&str> = relevant.iter().map(String::as_str).collect();
    retrieved
        .iter()
        .take(k)
        .position(|r| relevant.contains(r.as_str()))
        .map_or(0.0, |rank| 1.0 / (rank + 1) as f64)
}

/// Category assigned to queries that carry none.
pub const UNCATEGORIZED: &str = "unknown";

/// Mean `recall@k` and `mrr@k` over every query in `results`.
///
/// A query with no entry in `gold` has nothing relevant and scores 0.0. Gold
/// entries that were never run do not enter the mean. With no results every
/// metric is 0.0.
pub fn calculate_metrics(
    results: &BTreeMap<String, Vec<String>>,
    gold: &BTreeMap<String, Vec<String>>,
    ks: &[usize],
) -> BTreeMap<String, f64> {
    let mut metrics = BTreeMap::new();
    for &k in ks {
        let (mut recall, mut mrr) = (0.0, 0.0);
        for (id, retrieved) in results {
            let relevant = gold.get(id).map(Vec::as_slice).unwrap_or(&[]);
            recall += recall_at_k(retrieved, relevant, k);
            mrr += mrr_at_k(retrieved, relevant, k);
        }
        let n = results.len().max(1) as f64;
        metrics.insert(format!("recall@{k}"), recall / n);
        metrics.insert(format!("mrr@{k}"), mrr / n);
    }
    metrics
}

/// `calculate_metrics` per category. Queries without a category are grouped
/// under [`UNCATEGORIZED`].
pub fn calculate_metrics_by_category(
    results: &BTreeMap<String, Vec<String>>,
    gold: &BTreeMap<String, Vec<String>>,
    categories: &BTreeMap<String, String>,
    ks: &[usize],
) -> BTreeMap<String, BTreeMap<String, f64>> {
    let mut grouped: BTreeMap<&str, BTreeMap<String, Vec<String>>> = BTreeMap::new();
    for (id, retrieved) in results {
        let category = categories.get(id).map_or(UNCATEGORIZED, String::as_str);
        grouped
            .entry(category)
            .or_default()
            .insert(id.clone(), retrieved.clone());
    }
    grouped
        .into_iter()
        .map(|(category, results)| (category.to_string(), calculate_metrics(&results, gold, ks)))
        .collect()
}
