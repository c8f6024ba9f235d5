//! Session lifecycle state machine.
//!
//! Initialization is a linear, run-to-completion pipeline; each phase has
//! exactly one successor and `ask` is only valid in `Ready`. A failed
//! phase leaves the session parked in that phase, never partially Ready.

use serde::{Deserialize, Serialize};

use crate::errors::{RagError, Result};

/// Session lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    /// Session constructed, corpus untouched
    Uninitialized,
    /// Reading documents from the corpus directory
    Loading,
    /// Splitting documents into chunks (or restoring them from cache)
    Chunking,
    /// Fitting the vector index (or restoring it from cache)
    Indexing,
    /// Index available; queries accepted
    Ready,
}

impl SessionState {
    /// The unique next phase, if any
    pub fn successor(&self) -> Option<SessionState> {
        match self {
            SessionState::Uninitialized => Some(SessionState::Loading),
            SessionState::Loading => Some(SessionState::Chunking),
            SessionState::Chunking => Some(SessionState::Indexing),
            SessionState::Indexing => Some(SessionState::Ready),
            SessionState::Ready => None,
        }
    }

    /// Validate a transition to `next`
    pub fn transition_to(&self, next: SessionState) -> Result<SessionState> {
        if self.successor() == Some(next) {
            Ok(next)
        } else {
            Err(RagError::InvalidTransition {
                from: format!("{:?}", self),
                to: format!("{:?}", next),
            })
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, SessionState::Ready)
    }

    /// Human-readable phase name
    pub fn display_name(&self) -> &'static str {
        match self {
            SessionState::Uninitialized => "Uninitialized",
            SessionState::Loading => "Loading",
            SessionState::Chunking => "Chunking",
            SessionState::Indexing => "Indexing",
            SessionState::Ready => "Ready",
        }
    }
}
