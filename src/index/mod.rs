//! The sparse retrieval index: segmentation, chunking, and TF-IDF
//! vectorization.

pub mod chunker;
pub mod stopwords;
pub mod tokenizer;
pub mod vectorizer;

pub use chunker::{chunk_document, split_text, Chunk};
pub use stopwords::StopwordList;
pub use tokenizer::Tokenizer;
pub use vectorizer::{fit_artifact, IndexArtifact, IndexOptions, SparseVector, VectorIndex};
