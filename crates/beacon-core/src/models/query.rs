use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::MetadataFilter;
use crate::config::RetrievalConfig;
use crate::errors::{BeaconError, BeaconResult, ConfigError};

/// Retrieval strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Dense,
    Lexical,
    Hybrid,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dense => "dense",
            Self::Lexical => "lexical",
            Self::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = BeaconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dense" | "prefilter_dense" => Ok(Self::Dense),
            "lexical" => Ok(Self::Lexical),
            "hybrid" => Ok(Self::Hybrid),
            _ => Err(BeaconError::InvalidStrategy {
                name: s.to_string(),
            }),
        }
    }
}

/// Relative weights of the dense (`alpha`) and lexical (`beta`) signals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FusionWeights {
    pub alpha: f64,
    pub beta: f64,
}

impl FusionWeights {
    pub fn validate(&self) -> BeaconResult<()> {
        let ok = |w: f64| w.is_finite() && w >= 0.0;
        if !ok(self.alpha) || !ok(self.beta) {
            return Err(ConfigError::InvalidWeights {
                alpha: self.alpha,
                beta: self.beta,
            }
            .into());
        }
        Ok(())
    }
}

impl Default for FusionWeights {
    fn default() -> Self {
        RetrievalConfig::default().weights()
    }
}

/// A retrieval request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Query {
    pub text: String,
    #[serde(default)]
    pub filter: MetadataFilter,
    pub strategy: Strategy,
    pub top_k: usize,
    pub weights: FusionWeights,
}

impl Query {
    /// Build a query from the default retrieval configuration.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_config(text, &RetrievalConfig::default())
    }

    /// Build a query from a retrieval configuration. A default strategy that fails
    /// to parse falls back to hybrid; `RetrievalConfig::validate` reports it.
    pub fn with_config(text: impl Into<String>, config: &RetrievalConfig) -> Self {
        Self {
            text: text.into(),
            filter: MetadataFilter::default(),
            strategy: config.default_strategy.parse().unwrap_or(Strategy::Hybrid),
            top_k: config.top_k,
            weights: config.weights(),
        }
    }

    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn weights(mut self, alpha: f64, beta: f64) -> Self {
        self.weights = FusionWeights { alpha, beta };
        self
    }

    pub fn filter(mut self, filter: MetadataFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Checks made before any I/O.
    pub fn validate(&self) -> BeaconResult<()> {
        if self.top_k == 0 {
            return Err(ConfigError::InvalidTopK.into());
        }
        self.weights.validate()
    }
}
