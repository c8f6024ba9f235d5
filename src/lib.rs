//! Retrieval-augmented question answering over a local literary corpus.
//!
//! The engine loads plain-text documents, splits them into sentence-aligned
//! chunks, builds a TF-IDF vector index over jieba-segmented terms, and
//! answers questions by retrieving the most similar chunks and handing them
//! to an external generation service as grounding context. Chunks and the
//! fitted index persist to disk so later runs skip preprocessing.

pub mod cache;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod errors;
pub mod generation;
pub mod index;
pub mod repl;
pub mod retrieval;
pub mod session;

pub use errors::{RagError, Result};
