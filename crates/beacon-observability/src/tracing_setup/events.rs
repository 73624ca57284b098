//! Named structured events. Each carries an `event` field for log queries.

use beacon_core::models::DegradationEvent;

pub fn document_ingested(url: &str, chunks: usize, replaced: usize) {
    tracing::info!(
        event = "document_ingested",
        url = %url,
        chunks,
        replaced,
        "document ingested"
    );
}

pub fn document_unchanged(url: &str, content_hash: &str) {
    tracing::info!(
        event = "document_unchanged",
        url = %url,
        content_hash = %content_hash,
        "document unchanged, skipping"
    );
}

pub fn document_skipped(url: &str, reason: &str) {
    tracing::warn!(
        event = "document_skipped",
        url = %url,
        reason = %reason,
        "document skipped"
    );
}

/// Log a completed retrieval request.
pub fn retrieval_completed(strategy: &str, results: usize, degraded: bool, elapsed_ms: u128) {
    tracing::info!(
        event = "retrieval_completed",
        strategy = %strategy,
        results,
        degraded,
        elapsed_ms = elapsed_ms as u64,
        "retrieval completed"
    );
}

/// Log a retrieval source dropped from a hybrid request.
pub fn source_degraded(degradation: &DegradationEvent) {
    tracing::warn!(
        event = "source_degraded",
        component = %degradation.component,
        failure = %degradation.failure,
        fallback = %degradation.fallback_used,
        "retrieval source degraded"
    );
}
