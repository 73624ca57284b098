//! Run gold-labelled queries through a `RetrievalEngine` and report metrics.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use beacon_core::errors::BeaconResult;
use beacon_core::models::{MetadataFilter, RetrievedChunk, Strategy};

use super::metrics::{calculate_metrics, calculate_metrics_by_category};
use crate::engine::RetrievalEngine;

/// One gold-labelled query. `relevant` holds document URLs, or `url#index`
/// for a specific chunk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalCase {
    pub id: String,
    pub query: String,
    #[serde(default)]
    pub category: Option<String>,
    pub relevant: Vec<String>,
    #[serde(default)]
    pub filter: MetadataFilter,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryReport {
    pub id: String,
    pub category: Option<String>,
    pub retrieved: Vec<String>,
    pub relevant: Vec<String>,
    pub degraded: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalReport {
    pub strategy: Strategy,
    pub ks: Vec<usize>,
    pub overall: BTreeMap<String, f64>,
    pub by_category: BTreeMap<String, BTreeMap<String, f64>>,
    pub queries: Vec<QueryReport>,
}

/// Read a JSON array of cases.
pub fn load_cases(path: &Path) -> BeaconResult<Vec<EvalCase>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub struct Evaluator {
    ks: Vec<usize>,
}

impl Evaluator {
    /// Cutoffs are deduplicated and sorted; zero is ignored. No cutoffs means `[5]`.
    pub fn new(ks: impl IntoIterator<Item = usize>) -> Self {
        let mut ks: Vec<usize> = ks.into_iter().filter(|&k| k > 0).collect();
        ks.sort_unstable();
        ks.dedup();
        if ks.is_empty() {
            ks.push(5);
        }
        Self { ks }
    }

    pub fn ks(&self) -> &[usize] {
        &self.ks
    }

    /// Execute every case with `strategy`, retrieving `max(ks)` chunks each.
    pub async fn run(
        &self,
        engine: &RetrievalEngine,
        cases: &[EvalCase],
        strategy: Strategy,
    ) -> BeaconResult<EvalReport> {
        let depth = self.ks.iter().copied().max().unwrap_or(5);
        let mut results = BTreeMap::new();
        let mut gold = BTreeMap::new();
        let mut categories = BTreeMap::new();
        let mut queries = Vec::with_capacity(cases.len());

        for case in cases {
            let query = engine
                .query(case.query.as_str())
                .strategy(strategy)
                .top_k(depth)
                .filter(case.filter.clone());
            let outcome = engine.retrieve(&query).await?;
            let retrieved = label_results(&outcome.results, &case.relevant);

            results.insert(case.id.clone(), retrieved.clone());
            gold.insert(case.id.clone(), case.relevant.clone());
            if let Some(category) = &case.category {
                categories.insert(case.id.clone(), category.clone());
            }
            queries.push(QueryReport {
                id: case.id.clone(),
                category: case.category.clone(),
                retrieved,
                relevant: case.relevant.clone(),
                degraded: outcome.is_degraded(),
            });
        }

        let overall = calculate_metrics(&results, &gold, &self.ks);
        let by_category = calculate_metrics_by_category(&results, &gold, &categories, &self.ks);
        info!(
            strategy = strategy.as_str(),
            cases = cases.len(),
            ?overall,
            "evaluation complete"
        );
        Ok(EvalReport {
            strategy,
            ks: self.ks.clone(),
            overall,
            by_category,
            queries,
        })
    }
}

/// Label each chunk with its document URL when that URL is a gold label,
/// otherwise with `url#index`. Chunk ids change on every ingest, so they are
/// never used as labels.
fn label_results(results: &[RetrievedChunk], relevant: &[String]) -> Vec<String> {
    let relevant: HashSet<&str> = relevant.iter().map(String::as_str).collect();
    results
        .iter()
        .map(|r| {
            let url = r.chunk.document_url.as_str();
            if relevant.contains(url) {
                url.to_string()
            } else {
                format!("{url}#{}", r.chunk.index)
            }
        })
        .collect()
}
