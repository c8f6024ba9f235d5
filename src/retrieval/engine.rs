//! Cosine-similarity search with threshold and top-k cutoffs.
//!
//! Rows and query vectors are L2-normalized by the index, so cosine
//! similarity is a plain dot product. An empty result set is a normal
//! outcome meaning "no relevant content", never an error.

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::index::chunker::Chunk;
use crate::index::vectorizer::VectorIndex;

fn default_top_k() -> usize {
    10
}

fn default_similarity_threshold() -> f32 {
    0.01
}

/// Search parameters for retrieval
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SearchParams {
    /// Maximum number of results to return
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Results must score strictly above this value
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            similarity_threshold: default_similarity_threshold(),
        }
    }
}

/// A retrieved chunk with its query similarity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalResult {
    pub chunk: Chunk,
    pub similarity: f32,
}

/// Retrieval engine: ranks chunks against a query
pub struct Retriever {
    default_params: SearchParams,
}

impl Retriever {
    pub fn new() -> Self {
        Self {
            default_params: SearchParams::default(),
        }
    }

    pub fn with_params(params: SearchParams) -> Self {
        Self {
            default_params: params,
        }
    }

    pub fn default_params(&self) -> &SearchParams {
        &self.default_params
    }

    /// Search with the engine's default parameters.
    pub fn search(
        &self,
        index: &VectorIndex,
        chunks: &[Chunk],
        query: &str,
    ) -> Result<Vec<RetrievalResult>> {
        self.search_with_params(index, chunks, query, &self.default_params)
    }

    /// Rank every chunk by cosine similarity to `query`, keep scores
    /// strictly above the threshold, sort descending (ties keep original
    /// chunk order), and truncate to `top_k`.
    pub fn search_with_params(
        &self,
        index: &VectorIndex,
        chunks: &[Chunk],
        query: &str,
        params: &SearchParams,
    ) -> Result<Vec<RetrievalResult>> {
        let query_vector = index.transform(query);
        if query_vector.is_empty() {
            return Ok(Vec::new());
        }

        let mut results: Vec<RetrievalResult> = index
            .rows()
            .iter()
            .zip(chunks)
            .filter_map(|(row, chunk)| {
                let similarity = query_vector.dot(row);
                (similarity > params.similarity_threshold).then(|| RetrievalResult {
                    chunk: chunk.clone(),
                    similarity,
                })
            })
            .collect();

        // Stable sort preserves chunk order among equal scores.
        results.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(params.top_k);

        Ok(results)
    }
}

impl Default for Retriever {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::stopwords::StopwordList;
    use crate::index::tokenizer::Tokenizer;
    use crate::index::vectorizer::IndexOptions;
    use std::path::PathBuf;

    fn chunk(content: &str, source: &str, index: usize) -> Chunk {
        Chunk {
            content: content.to_string(),
            source: source.to_string(),
            chunk_index: index,
            path: PathBuf::from(format!("docs/{}", source)),
        }
    }

    fn build_index(chunks: &[Chunk]) -> VectorIndex {
        VectorIndex::fit(
            Tokenizer::new(StopwordList::empty()),
            chunks,
            &IndexOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_search_params_default() {
        let params = SearchParams::default();
        assert_eq!(params.top_k, 10);
        assert!((params.similarity_threshold - 0.01).abs() < 1e-9);
    }

    #[test]
    fn test_results_sorted_and_above_threshold() {
        let chunks = vec![
            chunk("storage engine compaction strategy", "a.txt", 0),
            chunk("storage layout to disk", "b.txt", 0),
            chunk("unrelated cooking recipes entirely", "c.txt", 0),
        ];
        let index = build_index(&chunks);
        let retriever = Retriever::new();

        let results = retriever.search(&index, &chunks, "storage engine").unwrap();

        assert!(!results.is_empty());
        for result in &results {
            assert!(result.similarity > 0.01);
        }
        for pair in results.windows(2) {
            assert!(pair[0].similarity >= pair[1].similarity);
        }
    }

    #[test]
    fn test_top_k_truncation() {
        let chunks = vec![
            chunk("alpha common term here", "a.txt", 0),
            chunk("beta common term here", "b.txt", 0),
            chunk("gamma common term here", "c.txt", 0),
            chunk("delta unrelated words entirely", "d.txt", 0),
        ];
        let index = build_index(&chunks);
        let retriever = Retriever::with_params(SearchParams {
            top_k: 1,
            similarity_threshold: 0.01,
        });

        let results = retriever.search(&index, &chunks, "common term").unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_out_of_vocabulary_query_returns_empty() {
        let chunks = vec![chunk("alpha beta gamma", "a.txt", 0)];
        let index = build_index(&chunks);

        let results = Retriever::new()
            .search(&index, &chunks, "совершенно unrelated запрос")
            .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_high_threshold_yields_empty_not_error() {
        let chunks = vec![
            chunk("alpha beta gamma", "a.txt", 0),
            chunk("delta epsilon zeta", "b.txt", 0),
        ];
        let index = build_index(&chunks);
        let retriever = Retriever::with_params(SearchParams {
            top_k: 10,
            similarity_threshold: 0.999,
        });

        let results = retriever.search(&index, &chunks, "alpha delta").unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_two_document_ranking_scenario() {
        let chunks = vec![
            chunk("甄士隐是姑苏城的乡绅。他梦见一僧一道。", "a.txt", 0),
            chunk("贾雨村原是个穷书生。他后来中了进士。", "b.txt", 0),
        ];
        let index = build_index(&chunks);

        let results = Retriever::new().search(&index, &chunks, "甄士隐").unwrap();

        assert!(!results.is_empty(), "query term should match document A");
        assert_eq!(results[0].chunk.source, "a.txt");
        if let Some(second) = results.get(1) {
            assert!(second.similarity <= results[0].similarity);
        }
    }
}
