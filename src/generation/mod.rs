//! The external answer-generation collaborator.
//!
//! The engine treats generation as a black box behind the
//! [`GenerationService`] trait: grounding context plus question in, answer
//! text out. The concrete client speaks the OpenAI-compatible chat
//! completions protocol.

pub mod client;
pub mod prompt;

pub use client::{ChatCompletionsClient, GenerationService};
