use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use super::chunker::Chunk;
use super::index::VectorIndex;
use crate::llm_client::embeddings::{EmbeddingError, Embedder};

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("query embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("query embedding has {got} dims, index has {expected}")]
    DimensionMismatch { expected: usize, got: usize },
}

/// Chunks returned for one query, most similar first.
#[derive(Debug, Clone, Default)]
pub struct RetrievalResult {
    pub chunks: Vec<Chunk>,
}

impl RetrievalResult {
    /// Joins chunk texts with blank lines into one context block.
    pub fn format_context(&self) -> String {
        self.chunks
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Similarity search over a corpus. Carried in `AppState` as `Arc<dyn Retriever>`.
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn retrieve(&self, query: &str, k: usize) -> Result<RetrievalResult, RetrievalError>;
}

/// Embeds the query and searches a shared, immutable index.
pub struct VectorRetriever {
    index: Arc<VectorIndex>,
    embedder: Arc<dyn Embedder>,
}

impl VectorRetriever {
    pub fn new(index: Arc<VectorIndex>, embedder: Arc<dyn Embedder>) -> Self {
        Self { index, embedder }
    }
}

#[async_trait]
impl Retriever for VectorRetriever {
    async fn retrieve(&self, query: &str, k: usize) -> Result<RetrievalResult, RetrievalError> {
        if self.index.is_empty() {
            return Ok(RetrievalResult::default());
        }
        let vector = self.embedder.embed_query(query).await?;
        if vector.len() != self.index.dims() {
            return Err(RetrievalError::DimensionMismatch {
                expected: self.index.dims(),
                got: vector.len(),
            });
        }
        let hits = self.index.search(&vector, k);
        debug!(
            "Retrieved {} chunks (top score {:?})",
            hits.len(),
            hits.first().map(|h| h.score)
        );
        Ok(RetrievalResult {
            chunks: hits.into_iter().map(|h| h.chunk).collect(),
        })
    }
}
