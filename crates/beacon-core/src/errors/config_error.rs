/// Configuration and validation errors. Always raised before any I/O.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("chunk_size_tokens must be greater than zero")]
    InvalidChunkSize,

    #[error("overlap_tokens ({overlap}) must be smaller than chunk_size_tokens ({chunk_size})")]
    InvalidOverlap { overlap: usize, chunk_size: usize },

    #[error("fusion weights must be finite and non-negative: alpha={alpha}, beta={beta}")]
    InvalidWeights { alpha: f64, beta: f64 },

    #[error("top_k must be at least 1")]
    InvalidTopK,

    #[error("candidate_multiplier must be at least 1")]
    InvalidCandidateMultiplier,

    #[error("unknown filter field: {field}")]
    UnknownFilterField { field: String },

    #[error("config parse failed: {reason}")]
    ParseFailed { reason: String },

    #[error("tokenizer unavailable: {reason}")]
    TokenizerUnavailable { reason: String },
}
