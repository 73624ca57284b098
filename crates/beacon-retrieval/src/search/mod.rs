//! Single-source retrievers and score fusion.

pub mod dense;
pub mod fusion;
pub mod lexical;
pub mod normalize;

pub use dense::DenseRetriever;
pub use fusion::fuse;
pub use lexical::LexicalRetriever;
