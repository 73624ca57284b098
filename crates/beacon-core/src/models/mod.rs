mod chunk;
mod degradation_event;
mod document;
mod filter;
mod query;
mod scored;
mod section;

pub use chunk::{Chunk, ChunkId, TextChunk, TokenWindow};
pub use degradation_event::DegradationEvent;
pub use document::{Document, DocumentMetadata};
pub use filter::{FilterField, MetadataFilter};
pub use query::{FusionWeights, Query, Strategy};
pub use scored::{RetrievalOutcome, RetrievedChunk, ScoredChunk};
pub use section::Section;
