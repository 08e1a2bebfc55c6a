//! In-memory vector index. Built once at startup, read-only afterwards.

use tracing::info;

use super::chunker::Chunk;
use crate::llm_client::embeddings::{EmbeddingError, Embedder};

#[derive(Debug, Clone)]
struct IndexedChunk {
    chunk: Chunk,
    vector: Vec<f32>,
    norm: f32,
}

/// A chunk paired with its cosine similarity to the query.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub score: f32,
}

#[derive(Debug, Clone, Default)]
pub struct VectorIndex {
    entries: Vec<IndexedChunk>,
    dims: usize,
}

impl VectorIndex {
    /// Embeds every chunk and stores the vectors alongside the text.
    pub async fn build(chunks: Vec<Chunk>, embedder: &dyn Embedder) -> Result<Self, EmbeddingError> {
        if chunks.is_empty() {
            return Ok(Self::default());
        }
        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let vectors = embedder.embed_documents(&texts).await?;
        if vectors.len() != chunks.len() {
            return Err(EmbeddingError::CountMismatch {
                expected: chunks.len(),
                got: vectors.len(),
            });
        }
        let index = Self::from_vectors(chunks.into_iter().zip(vectors).collect())?;
        info!("Indexed {} chunks ({} dims)", index.len(), index.dims);
        Ok(index)
    }

    /// Assembles an index from precomputed vectors. All vectors must share one dimension.
    pub fn from_vectors(pairs: Vec<(Chunk, Vec<f32>)>) -> Result<Self, EmbeddingError> {
        let dims = pairs.first().map(|(_, v)| v.len()).unwrap_or(0);
        let mut entries = Vec::with_capacity(pairs.len());
        for (chunk, vector) in pairs {
            if vector.len() != dims {
                return Err(EmbeddingError::CountMismatch {
                    expected: dims,
                    got: vector.len(),
                });
            }
            let norm = l2_norm(&vector);
            entries.push(IndexedChunk {
                chunk,
                vector,
                norm,
            });
        }
        Ok(Self { entries, dims })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Top `k` chunks by cosine similarity, highest first. Ties keep insertion order.
    /// Zero-norm vectors never match.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<ScoredChunk> {
        let qnorm = l2_norm(query);
        if qnorm == 0.0 || k == 0 {
            return Vec::new();
        }

        let mut hits: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.norm > 0.0)
            .map(|(i, e)| (i, cosine_similarity(query, &e.vector, qnorm, e.norm)))
            .collect();

        hits.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        hits.truncate(k);

        hits.into_iter()
            .map(|(i, score)| ScoredChunk {
                chunk: self.entries[i].chunk.clone(),
                score,
            })
            .collect()
    }
}

fn l2_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

fn cosine_similarity(a: &[f32], b: &[f32], a_norm: f32, b_norm: f32) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    dot / (a_norm * b_norm)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(text: &str) -> Chunk {
        Chunk {
            text: text.to_string(),
            source: "test".to_string(),
        }
    }

    fn sample_index() -> VectorIndex {
        VectorIndex::from_vectors(vec![
            (chunk("design"), vec![1.0, 0.0]),
            (chunk("rust"), vec![0.0, 1.0]),
            (chunk("mixed"), vec![1.0, 1.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_search_ranks_by_cosine_similarity() {
        let hits = sample_index().search(&[0.1, 1.0], 3);
        let order: Vec<&str> = hits.iter().map(|h| h.chunk.text.as_str()).collect();
        assert_eq!(order, vec!["rust", "mixed", "design"]);
        assert!(hits[0].score > hits[1].score);
    }

    #[test]
    fn test_search_truncates_to_k() {
        assert_eq!(sample_index().search(&[1.0, 1.0], 2).len(), 2);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let index = VectorIndex::from_vectors(vec![
            (chunk("first"), vec![1.0, 0.0]),
            (chunk("second"), vec![2.0, 0.0]),
        ])
        .unwrap();
        let hits = index.search(&[1.0, 0.0], 2);
        assert_eq!(hits[0].chunk.text, "first");
        assert_eq!(hits[1].chunk.text, "second");
    }

    #[test]
    fn test_zero_query_returns_nothing() {
        assert!(sample_index().search(&[0.0, 0.0], 4).is_empty());
    }

    #[test]
    fn test_mixed_dimensions_are_rejected() {
        let err = VectorIndex::from_vectors(vec![
            (chunk("a"), vec![1.0, 0.0]),
            (chunk("b"), vec![1.0]),
        ])
        .unwrap_err();
        assert!(matches!(err, EmbeddingError::CountMismatch { expected: 2, got: 1 }));
    }
}
