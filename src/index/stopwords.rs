//! Stop-word list loading with a built-in fallback.
//!
//! The external word list is one term per line. When it is missing the
//! engine still works: a small set of the most common Chinese function
//! words stands in, and the caller is expected to surface that condition
//! to the operator (it is not an error).

use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Built-in fallback: high-frequency function words
const FALLBACK_STOPWORDS: &[&str] = &[
    "的", "了", "在", "是", "我", "有", "和", "就", "不", "人", "都", "一", "一个", "上", "也",
    "很", "到", "说", "要", "去", "你", "会", "着", "没有", "看", "好", "自己", "这",
];

/// A loaded stop-word set, tracking whether the fallback was used
#[derive(Debug, Clone)]
pub struct StopwordList {
    words: HashSet<String>,
    used_fallback: bool,
}

impl StopwordList {
    /// Load from `path` if it exists and is readable; otherwise fall back
    /// to the built-in list.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => {
                let words: HashSet<String> = contents
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(str::to_string)
                    .collect();
                Self {
                    words,
                    used_fallback: false,
                }
            }
            Err(_) => Self::fallback(),
        }
    }

    /// The built-in fallback list
    pub fn fallback() -> Self {
        Self {
            words: FALLBACK_STOPWORDS.iter().map(|w| w.to_string()).collect(),
            used_fallback: true,
        }
    }

    /// Empty set, useful for tests that want no filtering
    pub fn empty() -> Self {
        Self {
            words: HashSet::new(),
            used_fallback: false,
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// True when the external list was absent and the fallback engaged
    pub fn used_fallback(&self) -> bool {
        self.used_fallback
    }
}
