mod embedding;
mod index;
mod store;

pub use embedding::IEmbeddingProvider;
pub use index::{ILexicalIndex, IVectorIndex};
pub use store::{IChunkStore, ReplaceReport, StoredDocument};
