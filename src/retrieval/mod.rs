//! Similarity-ranked retrieval over the fitted vector index.

pub mod engine;

pub use engine::{Retriever, RetrievalResult, SearchParams};
