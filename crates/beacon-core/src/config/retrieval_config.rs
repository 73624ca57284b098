use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::{BeaconResult, ConfigError};
use crate::models::FusionWeights;

/// How lexical query terms are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LexicalMatch {
    /// Every query term must appear (plain-query semantics).
    #[default]
    All,
    /// Any query term may appear.
    Any,
}

/// Retrieval subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Strategy used when a query does not name one.
    pub default_strategy: String,
    /// Default number of results.
    pub top_k: usize,
    /// Dense weight for hybrid fusion.
    pub alpha: f64,
    /// Lexical weight for hybrid fusion.
    pub beta: f64,
    /// Over-fetch factor applied to each source before fusion.
    pub candidate_multiplier: usize,
    /// Timeout for each sub-query, in milliseconds.
    pub sub_query_timeout_ms: u64,
    /// Lexical term combination.
    pub lexical_match: LexicalMatch,
}

impl RetrievalConfig {
    pub fn weights(&self) -> FusionWeights {
        FusionWeights {
            alpha: self.alpha,
            beta: self.beta,
        }
    }

    pub fn validate(&self) -> BeaconResult<()> {
        if self.top_k == 0 {
            return Err(ConfigError::InvalidTopK.into());
        }
        if self.candidate_multiplier == 0 {
            return Err(ConfigError::InvalidCandidateMultiplier.into());
        }
        self.weights().validate()?;
        self.default_strategy.parse::<crate::models::Strategy>()?;
        Ok(())
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_strategy: defaults::DEFAULT_STRATEGY.to_string(),
            top_k: defaults::DEFAULT_TOP_K,
            alpha: defaults::DEFAULT_ALPHA,
            beta: defaults::DEFAULT_BETA,
            candidate_multiplier: defaults::DEFAULT_CANDIDATE_MULTIPLIER,
            sub_query_timeout_ms: defaults::DEFAULT_SUB_QUERY_TIMEOUT_MS,
            lexical_match: LexicalMatch::default(),
        }
    }
}
