//! # beacon-retrieval
//!
//! Query-time half of Beacon: a dense retriever over an `IVectorIndex`, a
//! lexical retriever over an `ILexicalIndex`, min-max normalization with
//! weighted-sum fusion, and the async `RetrievalEngine` facade that runs the
//! hybrid sources concurrently and degrades when one of them fails.

pub mod engine;
pub mod evaluation;
pub mod search;

pub use engine::RetrievalEngine;
pub use evaluation::{EvalCase, EvalReport, Evaluator};
pub use search::{fuse, DenseRetriever, LexicalRetriever};
