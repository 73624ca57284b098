mod config_error;
mod embedding_error;
mod retrieval_error;
mod storage_error;

pub use config_error::ConfigError;
pub use embedding_error::EmbeddingError;
pub use retrieval_error::RetrievalError;
pub use storage_error::StorageError;

/// Top-level error for every Beacon subsystem.
#[derive(Debug, thiserror::Error)]
pub enum BeaconError {
    #[error("configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("retrieval error: {0}")]
    RetrievalError(#[from] RetrievalError),

    #[error("upstream unavailable: {component}: {reason}")]
    UpstreamUnavailable { component: String, reason: String },

    #[error("invalid strategy: {name}")]
    InvalidStrategy { name: String },

    #[error("document not found: {url}")]
    DocumentNotFound { url: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BeaconError {
    /// Wrap any collaborator failure as an upstream outage of `component`.
    pub fn upstream(component: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::UpstreamUnavailable {
            component: component.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the error was raised by configuration validation (before any I/O).
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError(_))
    }

    /// Whether the error comes from a collaborator (embedding client or index).
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::UpstreamUnavailable { .. } | Self::EmbeddingError(_) | Self::StorageError(_)
        )
    }
}

pub type BeaconResult<T> = Result<T, BeaconError>;
