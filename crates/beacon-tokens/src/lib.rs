//! # beacon-tokens
//!
//! Token counting for chunk sizing. Wraps tiktoken's `cl100k_base` encoding
//! and caches counts by content hash.

mod counter;

pub use counter::{TokenCounter, TokenId};
