//! # beacon-chunking
//!
//! Splits documents into retrievable chunks that respect a token budget and
//! follow the document's heading structure where they can.
//!
//! - [`HeadingChunker`]: greedy section merging with token-window fallback.
//! - [`sections`]: markdown heading extraction.
//! - [`normalize`]: whitespace normalization applied to extracted text.

mod chunker;
mod heading_stack;
pub mod normalize;
pub mod sections;
mod window;

pub use chunker::{chunk, HeadingChunker};
pub use heading_stack::HeadingStack;
pub use window::token_windows;
