//! CJK-aware word segmentation with noise filtering.
//!
//! Segmentation is delegated to jieba (required for scripts without
//! explicit word boundaries). Post-segmentation filtering drops terms
//! that carry no ranking signal: whitespace, single characters,
//! punctuation-only terms, and configured stop words.

use jieba_rs::Jieba;

use crate::index::stopwords::StopwordList;

/// CJK punctuation that jieba emits as standalone terms
const CJK_PUNCTUATION: &str = "，。！？；：“”（）【】《》、";

/// Stateless tokenizer: the same input and stop-word set always yield the
/// same term sequence.
pub struct Tokenizer {
    jieba: Jieba,
    stopwords: StopwordList,
}

impl Tokenizer {
    pub fn new(stopwords: StopwordList) -> Self {
        Self {
            jieba: Jieba::new(),
            stopwords,
        }
    }

    /// Segment `text` into filtered word-level terms.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.jieba
            .cut(text, true)
            .into_iter()
            .map(str::trim)
            .filter(|word| self.keep(word))
            .map(str::to_string)
            .collect()
    }

    fn keep(&self, word: &str) -> bool {
        if word.is_empty() || word.chars().all(char::is_whitespace) {
            return false;
        }
        // Single characters are rarely discriminative; they inflate the
        // vocabulary without aiding ranking.
        if word.chars().count() <= 1 {
            return false;
        }
        if word
            .chars()
            .all(|c| CJK_PUNCTUATION.contains(c) || c.is_ascii_punctuation())
        {
            return false;
        }
        !self.stopwords.contains(word)
    }

    pub fn stopwords(&self) -> &StopwordList {
        &self.stopwords
    }
}
