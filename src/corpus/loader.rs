//! Document source: a flat listing of `.txt` files in one directory.
//!
//! Each readable file becomes one [`Document`]. Unreadable files are
//! skipped with a warning rather than aborting the load; an empty result
//! is left for the caller to treat as a configuration error.

use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{RagError, Result};

/// A loaded corpus document, immutable after creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// File name, used as the document identifier
    pub filename: String,
    /// Full raw text
    pub content: String,
    /// Absolute or configured path the content was read from
    pub path: PathBuf,
}

/// Load every `.txt` file in `docs_dir`, sorted by file name.
///
/// Sorting keeps chunk ordering (and therefore cache artifacts) stable
/// across runs regardless of directory iteration order.
pub fn load_documents(docs_dir: &Path) -> Result<Vec<Document>> {
    let entries = fs::read_dir(docs_dir).map_err(|e| {
        RagError::Configuration(format!(
            "cannot read documents directory {}: {}",
            docs_dir.display(),
            e
        ))
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some("txt")
        })
        .collect();
    paths.sort();

    let mut documents = Vec::new();

    for path in paths {
        match fs::read_to_string(&path) {
            Ok(content) => {
                let content = content.trim().to_string();
                if content.is_empty() {
                    continue;
                }
                let filename = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                documents.push(Document {
                    filename,
                    content,
                    path,
                });
            }
            Err(e) => {
                eprintln!(
                    "{} skipping unreadable file {}: {}",
                    "Warning:".yellow(),
                    path.display(),
                    e
                );
            }
        }
    }

    Ok(documents)
}
