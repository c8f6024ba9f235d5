//! TF-IDF vector index over unigrams and bigrams.
//!
//! Weighting follows scikit-learn's TfidfVectorizer conventions: raw term
//! counts, smoothed inverse document frequency
//! `ln((1 + n) / (1 + df)) + 1`, and L2-normalized rows so that cosine
//! similarity reduces to a dot product.
//!
//! The vocabulary is capped by total corpus frequency. Terms appearing in
//! a single chunk are eligible, while terms present in more than
//! `max_df` of all chunks are dropped as uninformative. Column indices are
//! assigned in lexicographic term order, which keeps rebuilds bit-for-bit
//! reproducible.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::{RagError, Result};
use crate::index::chunker::Chunk;
use crate::index::tokenizer::Tokenizer;

/// Vocabulary construction parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IndexOptions {
    /// Maximum vocabulary size, selected by global frequency
    pub max_features: usize,
    /// Minimum number of chunks a term must appear in
    pub min_df: usize,
    /// Fraction of chunks above which a term is excluded
    pub max_df: f64,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            max_features: 5000,
            min_df: 1,
            max_df: 0.95,
        }
    }
}

/// A sparse vector with entries sorted by column index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SparseVector {
    pub entries: Vec<(u32, f32)>,
}

impl SparseVector {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dot product of two index-sorted sparse vectors
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let mut sum = 0.0;
        let mut i = 0;
        let mut j = 0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_val) = self.entries[i];
            let (b_idx, b_val) = other.entries[j];
            match a_idx.cmp(&b_idx) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_val * b_val;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    pub fn norm(&self) -> f32 {
        self.entries
            .iter()
            .map(|(_, v)| v * v)
            .sum::<f32>()
            .sqrt()
    }

    /// Scale to unit length; a zero vector is left unchanged
    pub fn l2_normalize(&mut self) {
        let norm = self.norm();
        if norm > f32::EPSILON {
            for (_, v) in &mut self.entries {
                *v /= norm;
            }
        }
    }
}

/// Serializable index state: vocabulary, IDF weights, and document vectors
/// persisted together as one unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexArtifact {
    pub vocabulary: HashMap<String, u32>,
    pub idf: Vec<f32>,
    pub rows: Vec<SparseVector>,
}

/// A fitted TF-IDF index. Immutable once built; row `i` corresponds by
/// position to chunk `i` of the sequence it was fitted on.
pub struct VectorIndex {
    tokenizer: Tokenizer,
    vocabulary: HashMap<String, u32>,
    idf: Vec<f32>,
    rows: Vec<SparseVector>,
}

impl VectorIndex {
    /// Build the index from the full chunk sequence.
    pub fn fit(tokenizer: Tokenizer, chunks: &[Chunk], options: &IndexOptions) -> Result<Self> {
        let artifact = fit_artifact(&tokenizer, chunks, options)?;
        Ok(Self::from_artifact(tokenizer, artifact))
    }

    /// Vectorize a query against the already-fitted vocabulary.
    /// Out-of-vocabulary terms contribute nothing.
    pub fn transform(&self, text: &str) -> SparseVector {
        let terms = ngram_terms(&self.tokenizer.tokenize(text));
        let mut counts: HashMap<String, u32> = HashMap::new();
        for term in terms {
            *counts.entry(term).or_insert(0) += 1;
        }
        vectorize_counts(&counts, &self.vocabulary, &self.idf)
    }

    /// Reconstruct a fitted index from a persisted artifact. The restored
    /// index transforms any text exactly as the originally fitted one did,
    /// provided the tokenizer uses the same stop-word set.
    pub fn from_artifact(tokenizer: Tokenizer, artifact: IndexArtifact) -> Self {
        Self {
            tokenizer,
            vocabulary: artifact.vocabulary,
            idf: artifact.idf,
            rows: artifact.rows,
        }
    }

    /// Snapshot the fitted state for persistence.
    pub fn to_artifact(&self) -> IndexArtifact {
        IndexArtifact {
            vocabulary: self.vocabulary.clone(),
            idf: self.idf.clone(),
            rows: self.rows.clone(),
        }
    }

    /// Document vectors, row `i` matching chunk `i` by position
    pub fn rows(&self) -> &[SparseVector] {
        &self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn vocabulary(&self) -> &HashMap<String, u32> {
        &self.vocabulary
    }

    pub fn idf(&self) -> &[f32] {
        &self.idf
    }
}

/// Fit the vocabulary, IDF weights, and document vectors without taking
/// ownership of the tokenizer. Used by the cache layer so a restore and a
/// fresh fit can share the same tokenizer instance.
pub fn fit_artifact(
    tokenizer: &Tokenizer,
    chunks: &[Chunk],
    options: &IndexOptions,
) -> Result<IndexArtifact> {
    if chunks.is_empty() {
        return Err(RagError::NotBuilt);
    }

    let num_chunks = chunks.len();

    // Per-chunk term counts plus global document/corpus frequencies.
    let mut chunk_counts: Vec<HashMap<String, u32>> = Vec::with_capacity(num_chunks);
    let mut document_frequency: HashMap<String, u32> = HashMap::new();
    let mut corpus_frequency: HashMap<String, u64> = HashMap::new();

    for chunk in chunks {
        let terms = ngram_terms(&tokenizer.tokenize(&chunk.content));
        let mut counts: HashMap<String, u32> = HashMap::new();
        for term in terms {
            *counts.entry(term).or_insert(0) += 1;
        }
        for (term, count) in &counts {
            *document_frequency.entry(term.clone()).or_insert(0) += 1;
            *corpus_frequency.entry(term.clone()).or_insert(0) += u64::from(*count);
        }
        chunk_counts.push(counts);
    }

    // Document-frequency bounds, then the global-frequency cap.
    let df_ceiling = options.max_df * num_chunks as f64;
    let mut candidates: Vec<&String> = document_frequency
        .iter()
        .filter(|(_, df)| **df as usize >= options.min_df && f64::from(**df) <= df_ceiling)
        .map(|(term, _)| term)
        .collect();

    if candidates.len() > options.max_features {
        candidates.sort_by(|a, b| {
            corpus_frequency[*b]
                .cmp(&corpus_frequency[*a])
                .then_with(|| a.cmp(b))
        });
        candidates.truncate(options.max_features);
    }

    // Column order is lexicographic over the selected terms.
    candidates.sort();
    let vocabulary: HashMap<String, u32> = candidates
        .iter()
        .enumerate()
        .map(|(index, term)| ((*term).clone(), index as u32))
        .collect();

    let mut idf = vec![0.0f32; vocabulary.len()];
    for (term, index) in &vocabulary {
        let df = f64::from(document_frequency[term]);
        let weight = ((1.0 + num_chunks as f64) / (1.0 + df)).ln() + 1.0;
        idf[*index as usize] = weight as f32;
    }

    let rows = chunk_counts
        .iter()
        .map(|counts| vectorize_counts(counts, &vocabulary, &idf))
        .collect();

    Ok(IndexArtifact {
        vocabulary,
        idf,
        rows,
    })
}

/// Unigrams plus bigrams of adjacent terms, joined with a single space
fn ngram_terms(tokens: &[String]) -> Vec<String> {
    let mut terms = Vec::with_capacity(tokens.len().saturating_mul(2));
    terms.extend(tokens.iter().cloned());
    for pair in tokens.windows(2) {
        terms.push(format!("{} {}", pair[0], pair[1]));
    }
    terms
}

/// Weight raw counts by IDF and L2-normalize
fn vectorize_counts(
    counts: &HashMap<String, u32>,
    vocabulary: &HashMap<String, u32>,
    idf: &[f32],
) -> SparseVector {
    let mut entries: Vec<(u32, f32)> = counts
        .iter()
        .filter_map(|(term, count)| {
            vocabulary
                .get(term)
                .map(|&index| (index, *count as f32 * idf[index as usize]))
        })
        .collect();
    entries.sort_by_key(|(index, _)| *index);

    let mut vector = SparseVector { entries };
    vector.l2_normalize();
    vector
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::stopwords::StopwordList;
    use std::path::PathBuf;

    fn chunk(content: &str, index: usize) -> Chunk {
        Chunk {
            content: content.to_string(),
            source: "test.txt".to_string(),
            chunk_index: index,
            path: PathBuf::from("docs/test.txt"),
        }
    }

    fn fit(contents: &[&str], options: &IndexOptions) -> Result<VectorIndex> {
        let chunks: Vec<Chunk> = contents
            .iter()
            .enumerate()
            .map(|(i, c)| chunk(c, i))
            .collect();
        VectorIndex::fit(Tokenizer::new(StopwordList::empty()), &chunks, options)
    }

    #[test]
    fn test_fit_empty_chunks_fails() {
        let result = VectorIndex::fit(
            Tokenizer::new(StopwordList::empty()),
            &[],
            &IndexOptions::default(),
        );
        assert!(matches!(result, Err(RagError::NotBuilt)));
    }

    #[test]
    fn test_rows_match_chunks_by_position() {
        let index = fit(
            &["storage engine design", "network protocol parser", "query planner"],
            &IndexOptions::default(),
        )
        .unwrap();
        assert_eq!(index.num_rows(), 3);
    }

    #[test]
    fn test_rows_are_unit_length() {
        let index = fit(
            &["alpha beta gamma", "delta epsilon"],
            &IndexOptions::default(),
        )
        .unwrap();
        for row in index.rows() {
            if !row.is_empty() {
                assert!((row.norm() - 1.0).abs() < 1e-5, "norm = {}", row.norm());
            }
        }
    }

    #[test]
    fn test_vocabulary_contains_bigrams() {
        let index = fit(
            &["alpha beta", "alpha gamma", "delta epsilon"],
            &IndexOptions::default(),
        )
        .unwrap();
        assert!(index.vocabulary().contains_key("alpha beta"));
        assert!(index.vocabulary().contains_key("alpha"));
    }

    #[test]
    fn test_transform_deterministic() {
        let index = fit(
            &["alpha beta gamma", "beta gamma delta", "epsilon zeta"],
            &IndexOptions::default(),
        )
        .unwrap();
        let a = index.transform("beta gamma");
        let b = index.transform("beta gamma");
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn test_transform_drops_out_of_vocabulary_terms() {
        let index = fit(&["alpha beta", "gamma delta"], &IndexOptions::default()).unwrap();
        let vector = index.transform("omega sigma unknown");
        assert!(vector.is_empty());
    }

    #[test]
    fn test_refit_is_reproducible() {
        let contents = ["alpha beta gamma", "beta gamma delta", "delta epsilon alpha"];
        let first = fit(&contents, &IndexOptions::default()).unwrap();
        let second = fit(&contents, &IndexOptions::default()).unwrap();

        assert_eq!(first.vocabulary(), second.vocabulary());
        for (a, b) in first.idf().iter().zip(second.idf()) {
            assert!((a - b).abs() < 1e-7);
        }
        assert_eq!(first.rows(), second.rows());
    }

    #[test]
    fn test_artifact_roundtrip_preserves_transform() {
        let index = fit(
            &["alpha beta gamma", "beta gamma delta"],
            &IndexOptions::default(),
        )
        .unwrap();
        let before = index.transform("alpha gamma");

        let bytes = bincode::serialize(&index.to_artifact()).unwrap();
        let artifact: IndexArtifact = bincode::deserialize(&bytes).unwrap();
        let restored = VectorIndex::from_artifact(Tokenizer::new(StopwordList::empty()), artifact);

        assert_eq!(restored.transform("alpha gamma"), before);
        assert_eq!(restored.vocabulary(), index.vocabulary());
        assert_eq!(restored.rows(), index.rows());
    }

    #[test]
    fn test_max_features_caps_vocabulary() {
        let options = IndexOptions {
            max_features: 3,
            ..Default::default()
        };
        let index = fit(
            &["alpha beta gamma delta", "epsilon zeta eta theta"],
            &options,
        )
        .unwrap();
        assert_eq!(index.vocabulary_size(), 3);
    }

    #[test]
    fn test_max_df_excludes_ubiquitous_terms() {
        // "common" appears in every chunk; with three chunks the 0.95
        // ceiling is 2.85, so df = 3 is excluded.
        let index = fit(
            &["common alpha", "common beta", "common gamma"],
            &IndexOptions::default(),
        )
        .unwrap();
        assert!(!index.vocabulary().contains_key("common"));
        assert!(index.vocabulary().contains_key("alpha"));
    }

    #[test]
    fn test_smoothed_idf_values() {
        // Two chunks, term in one: ln(3/2) + 1
        let index = fit(&["alpha beta", "beta gamma"], &IndexOptions::default()).unwrap();
        let idx = index.vocabulary()["alpha"] as usize;
        let expected = ((1.0f64 + 2.0) / (1.0 + 1.0)).ln() + 1.0;
        assert!((index.idf()[idx] - expected as f32).abs() < 1e-6);
    }

    #[test]
    fn test_sparse_dot_product() {
        let a = SparseVector {
            entries: vec![(0, 1.0), (2, 2.0), (5, 3.0)],
        };
        let b = SparseVector {
            entries: vec![(2, 4.0), (5, 0.5), (7, 9.0)],
        };
        assert!((a.dot(&b) - 9.5).abs() < 1e-6);
    }

    #[test]
    fn test_zero_vector_normalization_is_noop() {
        let mut v = SparseVector::default();
        v.l2_normalize();
        assert!(v.is_empty());
    }
}
