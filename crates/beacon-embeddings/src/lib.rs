//! # beacon-embeddings
//!
//! Text-to-vector providers and the [`EmbeddingEngine`] that wraps them.
//!
//! ```text
//! EmbeddingEngine (IEmbeddingProvider)
//! ├── L1 cache (moka, keyed by blake3(model ∥ text))
//! ├── batching (embedding.batch_size)
//! └── provider
//!     ├── ApiProvider   (OpenAI-compatible /embeddings)
//!     └── TfIdfProvider (hashed term frequencies, offline)
//! ```

pub mod engine;
pub mod providers;
pub mod vectors;

pub use engine::EmbeddingEngine;
pub use providers::{create_provider, ApiProvider, TfIdfProvider};
