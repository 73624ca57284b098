//! Vector checks shared by the engine and providers.

use beacon_core::errors::{BeaconResult, EmbeddingError};

/// Validate that an embedding has the expected dimensions.
pub fn validate_dimensions(embedding: &[f32], expected: usize) -> BeaconResult<()> {
    if embedding.len() != expected {
        return Err(EmbeddingError::DimensionMismatch {
            expected,
            actual: embedding.len(),
        }
        .into());
    }
    Ok(())
}

/// Validate that a provider returned one vector per input.
pub fn validate_count(vectors: &[Vec<f32>], expected: usize) -> BeaconResult<()> {
    if vectors.len() != expected {
        return Err(EmbeddingError::CountMismatch {
            expected,
            actual: vectors.len(),
        }
        .into());
    }
    Ok(())
}

/// Scale to unit length in place. Zero vectors are left unchanged.
pub fn l2_normalize(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > f32::EPSILON {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}
