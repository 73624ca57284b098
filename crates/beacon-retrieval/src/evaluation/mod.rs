//! Offline evaluation against gold relevance labels.

pub mod metrics;
pub mod runner;

pub use metrics::{
    calculate_metrics, calculate_metrics_by_category, mrr_at_k, recall_at_k, UNCATEGORIZED,
};
pub use runner::{load_cases, EvalCase, EvalReport, Evaluator, QueryReport};
