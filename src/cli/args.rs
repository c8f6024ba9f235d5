//! Command-line argument parsing.
//!
//! Clap-based CLI with an optional one-shot question plus subcommands for
//! the interactive session, cache maintenance, and configuration display.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// rmrag - ask questions about a local document corpus
#[derive(Parser, Debug)]
#[command(name = "rmrag")]
#[command(version)]
#[command(about = "Retrieval-augmented question answering over a local corpus", long_about = None)]
pub struct Args {
    /// Question to answer in one shot (omit to enter the interactive session)
    #[arg(value_name = "QUESTION")]
    pub question: Option<String>,

    /// Directory containing the .txt corpus
    #[arg(long)]
    pub docs_dir: Option<PathBuf>,

    /// Number of chunks to retrieve per question
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Minimum similarity a chunk must exceed to be used
    #[arg(short, long)]
    pub threshold: Option<f32>,

    /// Generation model name
    #[arg(short, long)]
    pub model: Option<String>,

    /// Generation service base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive question session
    Start,

    /// Delete cached chunks and the vector index, forcing a rebuild
    Clean,

    /// Display current configuration
    Config,
}

impl Args {
    /// Reject a positional question combined with a subcommand
    pub fn validate(&self) -> Result<(), String> {
        if self.command.is_some() && self.question.is_some() {
            return Err("A question cannot be combined with a subcommand.".to_string());
        }
        Ok(())
    }
}
