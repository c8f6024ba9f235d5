//! Corpus loading: plain-text documents from a configured directory.

pub mod loader;

pub use loader::{load_documents, Document};
