//! The long-lived question-answering session.
//!
//! One initialized session owns the chunk sequence and the fitted vector
//! index, and answers successive independent queries. Initialization
//! sequences load → chunk → index with a cache short-circuit for the two
//! expensive stages; `ask` retrieves, then delegates to the generation
//! collaborator, converting any generation failure into a user-visible
//! answer string instead of propagating it.

use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::cache::{CacheStore, ChunkSequence};
use crate::config::Config;
use crate::corpus::{load_documents, Document};
use crate::errors::{RagError, Result};
use crate::generation::prompt;
use crate::generation::GenerationService;
use crate::index::chunker::chunk_document;
use crate::index::vectorizer::{fit_artifact, IndexOptions, VectorIndex};
use crate::index::{Chunk, StopwordList, Tokenizer};
use crate::retrieval::{RetrievalResult, Retriever, SearchParams};
use crate::session::state::SessionState;

/// Canned reply when no chunk clears the similarity threshold
pub const NOT_FOUND_ANSWER: &str = "抱歉，在文档中没有找到与您问题相关的内容。";

/// Source previews are capped at this many characters
const PREVIEW_CHARS: usize = 100;

/// One source backing an answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerSource {
    /// Originating document name
    pub source: String,
    /// Cosine similarity of the backing chunk to the question
    pub similarity: f32,
    /// Chunk content capped at 100 characters, with an ellipsis when cut
    pub content_preview: String,
}

/// The `ask` response payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub question: String,
    pub answer: String,
    pub sources: Vec<AnswerSource>,
}

/// What initialization did, for operator display
#[derive(Debug, Clone, Copy)]
pub struct InitSummary {
    pub documents: usize,
    pub chunks: usize,
    pub vocabulary_terms: usize,
    pub chunks_from_cache: bool,
    pub index_from_cache: bool,
}

/// A question-answering session over one corpus
pub struct RagSession {
    config: Config,
    generator: Arc<dyn GenerationService>,
    cache: CacheStore,
    retriever: Retriever,
    state: SessionState,
    documents: Vec<Document>,
    chunks: Vec<Chunk>,
    index: Option<VectorIndex>,
}

impl RagSession {
    /// Create an uninitialized session. No corpus I/O happens here.
    pub fn new(config: Config, generator: Arc<dyn GenerationService>) -> Result<Self> {
        let cache = CacheStore::new(&config.corpus.cache_dir)?;
        let retriever = Retriever::with_params(config.search);

        Ok(Self {
            config,
            generator,
            cache,
            retriever,
            state: SessionState::Uninitialized,
            documents: Vec::new(),
            chunks: Vec::new(),
            index: None,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the full load → chunk → index pipeline. Chunking and indexing
    /// restore from cache artifacts when present instead of recomputing.
    pub fn initialize(&mut self) -> Result<InitSummary> {
        self.state = self.state.transition_to(SessionState::Loading)?;
        self.documents = load_documents(&self.config.corpus.docs_dir)?;
        if self.documents.is_empty() {
            return Err(RagError::Configuration(format!(
                "no documents found in {}",
                self.config.corpus.docs_dir.display()
            )));
        }
        for document in &self.documents {
            println!("{}", format!("  loaded {}", document.filename).dimmed());
        }
        println!(
            "Loaded {} documents from {}",
            self.documents.len(),
            self.config.corpus.docs_dir.display()
        );

        self.state = self.state.transition_to(SessionState::Chunking)?;
        let chunking = self.config.chunking;
        let documents = &self.documents;
        let (sequence, chunks_from_cache) = self.cache.load_or_build(|| {
            let chunks = documents
                .iter()
                .flat_map(|doc| chunk_document(doc, chunking.max_chars, chunking.overlap))
                .collect();
            Ok(ChunkSequence { chunks })
        })?;
        self.chunks = sequence.chunks;
        if chunks_from_cache {
            println!("Restored {} chunks from cache", self.chunks.len());
        } else {
            println!("Split corpus into {} chunks", self.chunks.len());
        }

        self.state = self.state.transition_to(SessionState::Indexing)?;
        let stopwords = StopwordList::load(&self.config.corpus.stopwords_file);
        if stopwords.used_fallback() {
            eprintln!(
                "{} stop-word list {} not found, using built-in fallback ({} words)",
                "Warning:".yellow(),
                self.config.corpus.stopwords_file.display(),
                stopwords.len()
            );
        }
        let tokenizer = Tokenizer::new(stopwords);
        let options = IndexOptions::default();
        let chunks = &self.chunks;
        let (artifact, index_from_cache) = self
            .cache
            .load_or_build(|| fit_artifact(&tokenizer, chunks, &options))?;
        let index = VectorIndex::from_artifact(tokenizer, artifact);
        if index_from_cache {
            println!(
                "Restored vector index from cache ({} terms)",
                index.vocabulary_size()
            );
        } else {
            println!("Built vector index ({} terms)", index.vocabulary_size());
        }
        self.index = Some(index);

        self.state = self.state.transition_to(SessionState::Ready)?;

        Ok(InitSummary {
            documents: self.documents.len(),
            chunks: self.chunks.len(),
            vocabulary_terms: self.index.as_ref().map_or(0, VectorIndex::vocabulary_size),
            chunks_from_cache,
            index_from_cache,
        })
    }

    /// Rank chunks against a query. Valid only in `Ready`.
    pub fn search(&self, query: &str, params: &SearchParams) -> Result<Vec<RetrievalResult>> {
        if !self.state.is_ready() {
            return Err(RagError::NotInitialized {
                state: self.state.display_name().to_string(),
            });
        }
        let index = self.index.as_ref().ok_or(RagError::IndexNotReady)?;
        self.retriever
            .search_with_params(index, &self.chunks, query, params)
    }

    /// Answer a question with the session's default search parameters.
    pub async fn ask(&self, question: &str) -> Result<Answer> {
        let params = *self.retriever.default_params();
        self.ask_with_params(question, &params).await
    }

    /// Answer a question: retrieve, then generate against the grounding
    /// context. An empty retrieval returns the canned not-found answer
    /// without contacting the generation service.
    pub async fn ask_with_params(&self, question: &str, params: &SearchParams) -> Result<Answer> {
        let results = self.search(question, params)?;

        if results.is_empty() {
            return Ok(Answer {
                question: question.to_string(),
                answer: NOT_FOUND_ANSWER.to_string(),
                sources: Vec::new(),
            });
        }

        let context = prompt::build_context(&results);
        let user_prompt = prompt::build_user_prompt(&context, question);

        let answer = match self
            .generator
            .generate(prompt::SYSTEM_PROMPT, &user_prompt)
            .await
        {
            Ok(text) => text,
            Err(RagError::Generation { kind, message }) => {
                format!("生成答案时出错: {} - {}", kind, message)
            }
            Err(other) => format!("生成答案时出错: {} - {}", other.kind(), other),
        };

        let sources = results
            .iter()
            .map(|result| AnswerSource {
                source: result.chunk.source.clone(),
                similarity: result.similarity,
                content_preview: preview(&result.chunk.content),
            })
            .collect();

        Ok(Answer {
            question: question.to_string(),
            answer,
            sources,
        })
    }
}

/// First 100 characters of the content, with an ellipsis when truncated
fn preview(content: &str) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
