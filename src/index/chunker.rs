//! Sentence-aligned document chunking.
//!
//! Text is split on sentence-terminal punctuation, then sentences are
//! greedily accumulated into chunks bounded by `max_chars`. The bound is
//! soft: a sentence is never truncated, so a single long sentence may
//! produce an oversized chunk. Each emitted chunk is re-terminated with a
//! sentence-ending marker for readability.
//!
//! The `overlap` parameter is part of the public contract but the splitter
//! emits disjoint chunks; adjacent chunks share no content. Callers should
//! not rely on overlap being applied.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::corpus::Document;

/// Sentence-terminal punctuation for the supported corpus language
const SENTENCE_TERMINALS: [char; 3] = ['。', '！', '？'];

/// Terminator re-inserted on every emitted chunk
const CHUNK_TERMINATOR: char = '。';

/// A bounded passage of text, the atomic unit of retrieval
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Trimmed, non-empty passage text
    pub content: String,
    /// Identifier of the owning document (its file name)
    pub source: String,
    /// Position within the owning document, increasing monotonically
    pub chunk_index: usize,
    /// Path the owning document was loaded from
    pub path: PathBuf,
}

/// Split `text` into chunk strings.
///
/// Length accounting is in characters, never bytes. `_overlap` is unused;
/// see the module documentation.
pub fn split_text(text: &str, max_chars: usize, _overlap: usize) -> Vec<String> {
    let sentences = text
        .split(SENTENCE_TERMINALS)
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for sentence in sentences {
        let sentence_chars = sentence.chars().count();

        if current_chars + sentence_chars <= max_chars {
            current.push_str(sentence);
            current.push(CHUNK_TERMINATOR);
            current_chars += sentence_chars + 1;
        } else {
            if !current.is_empty() {
                chunks.push(current.trim().to_string());
            }
            current = String::from(sentence);
            current.push(CHUNK_TERMINATOR);
            current_chars = sentence_chars + 1;
        }
    }

    if !current.is_empty() {
        chunks.push(current.trim().to_string());
    }

    chunks
}

/// Chunk one document, carrying forward its identifier and a local index.
pub fn chunk_document(document: &Document, max_chars: usize, overlap: usize) -> Vec<Chunk> {
    split_text(&document.content, max_chars, overlap)
        .into_iter()
        .enumerate()
        .map(|(chunk_index, content)| Chunk {
            content,
            source: document.filename.clone(),
            chunk_index,
            path: document.path.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(filename: &str, content: &str) -> Document {
        Document {
            filename: filename.to_string(),
            content: content.to_string(),
            path: PathBuf::from(format!("docs/{}", filename)),
        }
    }

    /// Sentence content of a text, ignoring terminators
    fn sentence_content(text: &str) -> Vec<String> {
        text.split(SENTENCE_TERMINALS)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_short_text_single_chunk() {
        let chunks = split_text("甄士隐是姑苏城的乡绅。他梦见一僧一道。", 300, 50);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], "甄士隐是姑苏城的乡绅。他梦见一僧一道。");
    }

    #[test]
    fn test_no_sentence_dropped_or_duplicated() {
        let text = "第一句话。第二句话！第三句话？第四句话。第五句话。";
        let chunks = split_text(text, 8, 0);

        let reconstructed: Vec<String> = chunks
            .iter()
            .flat_map(|c| sentence_content(c))
            .collect();
        assert_eq!(reconstructed, sentence_content(text));
    }

    #[test]
    fn test_no_chunk_empty_after_trim() {
        let text = "。。！？一句。  。另一句！";
        for chunk in split_text(text, 4, 0) {
            assert!(!chunk.trim().is_empty());
        }
    }

    #[test]
    fn test_chunks_respect_soft_bound() {
        let text = "四个字符。五个字符了。六个字符的话。";
        let chunks = split_text(text, 6, 0);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            // One sentence plus terminator per chunk at this bound
            assert!(chunk.chars().count() <= 7);
        }
    }

    #[test]
    fn test_oversized_sentence_kept_whole() {
        let long_sentence = "這".repeat(50);
        let text = format!("{}。短句。", long_sentence);
        let chunks = split_text(&text, 10, 0);

        assert!(chunks[0].chars().count() > 10);
        assert!(chunks[0].starts_with(&long_sentence));
    }

    #[test]
    fn test_chunks_are_terminated() {
        for chunk in split_text("甲句。乙句！丙句？", 4, 0) {
            assert!(chunk.ends_with('。'));
        }
    }

    #[test]
    fn test_adjacent_chunks_share_no_content() {
        let text = "春天来了。夏天到了。秋天近了。冬天冷了。";
        let chunks = split_text(text, 5, 50);
        assert!(chunks.len() > 1);

        for pair in chunks.windows(2) {
            let left = sentence_content(&pair[0]);
            let right = sentence_content(&pair[1]);
            for sentence in &left {
                assert!(
                    !right.contains(sentence),
                    "chunks unexpectedly overlap on: {}",
                    sentence
                );
            }
        }
    }

    #[test]
    fn test_chunk_document_indices_monotonic() {
        let document = doc("chapter1.txt", &"一句话。".repeat(40));
        let chunks = chunk_document(&document, 10, 0);

        assert!(chunks.len() > 1);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.chunk_index, i);
            assert_eq!(chunk.source, "chapter1.txt");
        }
    }

    #[test]
    fn test_two_document_scenario_one_chunk_each() {
        let doc_a = doc("a.txt", "甄士隐是姑苏城的乡绅。他梦见一僧一道。");
        let doc_b = doc("b.txt", "贾雨村原是个穷书生。他后来中了进士。");

        assert_eq!(chunk_document(&doc_a, 300, 50).len(), 1);
        assert_eq!(chunk_document(&doc_b, 300, 50).len(), 1);
    }

    #[test]
    fn test_empty_text_no_chunks() {
        assert!(split_text("", 300, 50).is_empty());
        assert!(split_text("。！？", 300, 50).is_empty());
    }
}
