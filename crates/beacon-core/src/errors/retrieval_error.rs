/// Retrieval subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("both retrieval sources failed: dense: {dense}; lexical: {lexical}")]
    BothSourcesFailed { dense: String, lexical: String },

    #[error("retrieval task failed: {reason}")]
    TaskFailed { reason: String },
}
