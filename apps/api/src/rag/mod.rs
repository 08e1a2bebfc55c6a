// Retrieval layer: corpus loading, chunking, embedding index, top-k search.
// Everything here is built once at startup and never mutated afterwards.

pub mod chunker;
pub mod index;
pub mod loader;
pub mod retriever;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::llm_client::embeddings::{EmbeddingError, Embedder};
use chunker::TextSplitter;
use index::VectorIndex;
use loader::{load_documents, Document};
use retriever::{Retriever, VectorRetriever};

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("Missing corpus file: {}", path.display())]
    MissingFile { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to embed the {corpus} corpus: {source}")]
    Embedding {
        corpus: &'static str,
        #[source]
        source: EmbeddingError,
    },
}

/// Which files make up a corpus and how they are chunked.
#[derive(Debug, Clone, Copy)]
pub struct CorpusSpec {
    pub name: &'static str,
    pub files: &'static [&'static str],
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

/// Platform guides answering chat questions.
pub const GUIDES: CorpusSpec = CorpusSpec {
    name: "guides",
    files: &["student_guide.txt", "business_guide.txt", "faq.txt"],
    chunk_size: 1500,
    chunk_overlap: 200,
};

/// Job postings; backs job recommendations and rate benchmarks.
pub const JOBS: CorpusSpec = CorpusSpec {
    name: "jobs",
    files: &["jobs_dataset.json"],
    chunk_size: 1000,
    chunk_overlap: 200,
};

/// Freelancer profiles; backs user recommendations.
pub const USERS: CorpusSpec = CorpusSpec {
    name: "users",
    files: &["users_dataset.json"],
    chunk_size: 1000,
    chunk_overlap: 200,
};

/// The three searchable corpora shared by every request.
#[derive(Clone)]
pub struct Corpora {
    pub guides: Arc<dyn Retriever>,
    pub jobs: Arc<dyn Retriever>,
    pub users: Arc<dyn Retriever>,
}

impl Corpora {
    /// Loads, chunks and embeds every corpus under `data_dir`.
    ///
    /// All files are read before the first embedding call, so a missing file
    /// fails startup without touching the provider.
    pub async fn build(data_dir: &Path, embedder: Arc<dyn Embedder>) -> Result<Self, CorpusError> {
        let guides_docs = load_documents(data_dir, GUIDES.files)?;
        let jobs_docs = load_documents(data_dir, JOBS.files)?;
        let users_docs = load_documents(data_dir, USERS.files)?;

        Ok(Self {
            guides: build_retriever(&GUIDES, &guides_docs, &embedder).await?,
            jobs: build_retriever(&JOBS, &jobs_docs, &embedder).await?,
            users: build_retriever(&USERS, &users_docs, &embedder).await?,
        })
    }
}

async fn build_retriever(
    spec: &CorpusSpec,
    docs: &[Document],
    embedder: &Arc<dyn Embedder>,
) -> Result<Arc<dyn Retriever>, CorpusError> {
    let chunks = TextSplitter::new(spec.chunk_size, spec.chunk_overlap).split_documents(docs);
    info!("Corpus '{}': {} chunks", spec.name, chunks.len());

    let index = VectorIndex::build(chunks, embedder.as_ref())
        .await
        .map_err(|source| CorpusError::Embedding {
            corpus: spec.name,
            source,
        })?;

    Ok(Arc::new(VectorRetriever::new(
        Arc::new(index),
        Arc::clone(embedder),
    )))
}
