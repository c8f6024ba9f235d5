//! Session orchestration: corpus loading, cache-aware preprocessing, and
//! the `ask` entry point.

pub mod orchestrator;
pub mod state;

pub use orchestrator::{Answer, AnswerSource, InitSummary, RagSession};
pub use state::SessionState;
