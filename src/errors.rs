//! Error types for the retrieval engine and session orchestrator.
//!
//! The taxonomy separates fatal initialization failures from per-query
//! conditions: generation failures are recovered into answer text by the
//! session, and an empty retrieval result is a normal outcome, not an error.

use thiserror::Error;

/// Main error type for the question-answering engine
#[derive(Error, Debug)]
pub enum RagError {
    /// Fatal initialization problems (missing corpus, bad paths)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Index build invoked on an empty chunk sequence
    #[error("Cannot build a vector index from an empty chunk sequence")]
    NotBuilt,

    /// Search attempted before the vector index was fitted or restored
    #[error("Vector index is not ready; build or restore it before searching")]
    IndexNotReady,

    /// `ask` called before the session reached the Ready state
    #[error("Session is not initialized (current state: {state}); call initialize() first")]
    NotInitialized { state: String },

    /// Invalid session state transition
    #[error("Invalid session state transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    /// External generation service failure
    #[error("Generation service error: {kind} - {message}")]
    Generation { kind: String, message: String },

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary cache serialization errors
    #[error("Cache serialization error: {0}")]
    Cache(#[from] bincode::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RagError {
    /// Short machine-readable tag for user-visible failure strings
    pub fn kind(&self) -> &'static str {
        match self {
            RagError::Configuration(_) => "configuration",
            RagError::NotBuilt => "not_built",
            RagError::IndexNotReady => "index_not_ready",
            RagError::NotInitialized { .. } => "not_initialized",
            RagError::InvalidTransition { .. } => "invalid_transition",
            RagError::Generation { .. } => "generation",
            RagError::Http(_) => "http",
            RagError::Json(_) => "json",
            RagError::Cache(_) => "cache",
            RagError::Io(_) => "io",
        }
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, RagError>;
