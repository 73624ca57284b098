use crate::errors::BeaconResult;

/// Opaque text-to-vector function.
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed a batch of texts. The output has one vector per input, in input order.
    fn embed_batch(&self, texts: &[String]) -> BeaconResult<Vec<Vec<f32>>>;

    /// Embed a single text.
    fn embed(&self, text: &str) -> BeaconResult<Vec<f32>> {
        let mut vectors = self.embed_batch(&[text.to_string()])?;
        vectors.pop().ok_or_else(|| {
            crate::errors::EmbeddingError::CountMismatch {
                expected: 1,
                actual: 0,
            }
            .into()
        })
    }

    /// The dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;

    /// Model identifier recorded with every stored embedding.
    fn model_id(&self) -> &str;

    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Whether this provider is currently available.
    fn is_available(&self) -> bool;
}
