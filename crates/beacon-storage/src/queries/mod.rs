pub mod chunk_ops;
pub mod document_ops;
pub mod filter_sql;
pub mod lexical_search;
pub mod vector_search;
