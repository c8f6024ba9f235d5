//! Command-line interface: argument parsing and config overrides.

pub mod args;

pub use args::{Args, Commands};

use crate::config::Config;

/// Fold command-line overrides into the loaded configuration
pub fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(docs_dir) = &args.docs_dir {
        config.corpus.docs_dir = docs_dir.clone();
    }
    if let Some(top_k) = args.top_k {
        config.search.top_k = top_k;
    }
    if let Some(threshold) = args.threshold {
        config.search.similarity_threshold = threshold;
    }
    if let Some(model) = &args.model {
        config.generation.model = model.clone();
    }
    if let Some(base_url) = &args.base_url {
        config.generation.base_url = base_url.clone();
    }
}
