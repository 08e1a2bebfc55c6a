//! Embedding backend. Startup embeds every corpus chunk once; each retrieval
//! embeds its query.

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use super::{api_error, LlmError, GEMINI_API_BASE, HTTP_TIMEOUT_SECS};

/// Embedding model used when `EMBEDDING_MODEL` is not set.
pub const DEFAULT_EMBEDDING_MODEL: &str = "models/embedding-001";
/// `batchEmbedContents` accepts at most 100 requests per call.
const MAX_BATCH: usize = 100;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error(transparent)]
    Provider(#[from] LlmError),

    #[error("expected {expected} embeddings, provider returned {got}")]
    CountMismatch { expected: usize, got: usize },

    #[error("provider returned an empty embedding")]
    Empty,
}

impl From<reqwest::Error> for EmbeddingError {
    fn from(e: reqwest::Error) -> Self {
        EmbeddingError::Provider(LlmError::Http(e))
    }
}

/// Maps text to vectors. Documents and queries use different task types.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedContentRequest<'a> {
    model: &'a str,
    content: EmbedContent<'a>,
    task_type: &'static str,
}

#[derive(Debug, Serialize)]
struct EmbedContent<'a> {
    parts: [EmbedPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct EmbedPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct BatchEmbedRequest<'a> {
    requests: Vec<EmbedContentRequest<'a>>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingValues {
    #[serde(default)]
    values: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct EmbedContentResponse {
    embedding: EmbeddingValues,
}

#[derive(Debug, Deserialize)]
struct BatchEmbedResponse {
    #[serde(default)]
    embeddings: Vec<EmbeddingValues>,
}

/// Gemini embedding client.
#[derive(Clone)]
pub struct GeminiEmbedder {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiEmbedder {
    pub fn new(api_key: String, model: String) -> Result<Self, EmbeddingError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(HTTP_TIMEOUT_SECS))
                .build()?,
            api_key,
            model: qualify_model(&model),
            base_url: GEMINI_API_BASE.to_string(),
        })
    }

    async fn post<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<R, EmbeddingError> {
        let url = format!("{}/{}:{}", self.base_url, self.model, method);
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await.into());
        }
        Ok(response.json::<R>().await?)
    }
}

#[async_trait]
impl Embedder for GeminiEmbedder {
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut out = Vec::with_capacity(texts.len());
        for batch in texts.chunks(MAX_BATCH) {
            let body = BatchEmbedRequest {
                requests: batch
                    .iter()
                    .map(|text| EmbedContentRequest {
                        model: &self.model,
                        content: EmbedContent {
                            parts: [EmbedPart { text }],
                        },
                        task_type: "RETRIEVAL_DOCUMENT",
                    })
                    .collect(),
            };
            let response: BatchEmbedResponse = self.post("batchEmbedContents", &body).await?;
            if response.embeddings.len() != batch.len() {
                return Err(EmbeddingError::CountMismatch {
                    expected: batch.len(),
                    got: response.embeddings.len(),
                });
            }
            for embedding in response.embeddings {
                if embedding.values.is_empty() {
                    return Err(EmbeddingError::Empty);
                }
                out.push(embedding.values);
            }
        }
        Ok(out)
    }

    async fn embed_query(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let body = EmbedContentRequest {
            model: &self.model,
            content: EmbedContent {
                parts: [EmbedPart { text }],
            },
            task_type: "RETRIEVAL_QUERY",
        };
        let response: EmbedContentResponse = self.post("embedContent", &body).await?;
        if response.embedding.values.is_empty() {
            return Err(EmbeddingError::Empty);
        }
        Ok(response.embedding.values)
    }
}

/// The REST API addresses models as `models/<name>`.
fn qualify_model(model: &str) -> String {
    if model.starts_with("models/") {
        model.to_string()
    } else {
        format!("models/{model}")
    }
}
