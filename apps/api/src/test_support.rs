//! In-process stand-ins for the model and the retrievers, shared by handler tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt;

use crate::llm_client::embeddings::EmbeddingError;
use crate::llm_client::{ChatModel, LlmError, Prompt};
use crate::rag::chunker::Chunk;
use crate::rag::retriever::{RetrievalError, RetrievalResult, Retriever};
use crate::rag::Corpora;
use crate::routes::build_router;
use crate::state::AppState;

/// Returns a canned reply (or an API error) and records every prompt.
pub struct StubModel {
    reply: Option<String>,
    prompts: Mutex<Vec<Prompt>>,
}

impl StubModel {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Some(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> Option<Prompt> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ChatModel for StubModel {
    async fn complete(&self, prompt: &Prompt) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.clone());
        self.reply.clone().ok_or(LlmError::Api {
            status: 503,
            message: "model unavailable".to_string(),
        })
    }
}

/// Returns fixed chunks (or an error) regardless of the query; records `k`.
pub struct StubRetriever {
    texts: Option<Vec<String>>,
    ks: Mutex<Vec<usize>>,
}

impl StubRetriever {
    pub fn with(texts: &[&str]) -> Self {
        Self {
            texts: Some(texts.iter().map(|t| t.to_string()).collect()),
            ks: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            texts: None,
            ks: Mutex::new(Vec::new()),
        }
    }

    pub fn ks(&self) -> Vec<usize> {
        self.ks.lock().unwrap().clone()
    }
}

#[async_trait]
impl Retriever for StubRetriever {
    async fn retrieve(&self, _query: &str, k: usize) -> Result<RetrievalResult, RetrievalError> {
        self.ks.lock().unwrap().push(k);
        let texts = self
            .texts
            .as_ref()
            .ok_or(RetrievalError::Embedding(EmbeddingError::Empty))?;
        Ok(RetrievalResult {
            chunks: texts
                .iter()
                .take(k)
                .map(|t| Chunk {
                    text: t.clone(),
                    source: "stub".to_string(),
                })
                .collect(),
        })
    }
}

/// A context block comfortably above the sufficiency threshold.
pub const RICH_CONTEXT: &str = "{\"title\": \"Rust backend developer\", \"company\": \"Acme\", \
\"budget\": \"$45/hr\", \"skills\": [\"Rust\", \"PostgreSQL\"]}";

pub fn state(model: Arc<StubModel>, retriever: Arc<StubRetriever>) -> AppState {
    AppState {
        llm: model,
        corpora: Corpora {
            guides: retriever.clone(),
            jobs: retriever.clone(),
            users: retriever,
        },
    }
}

/// Sends one request through the full router and decodes the JSON body.
pub async fn send(state: AppState, method: &str, path: &str, body: Option<Value>) -> (StatusCode, Value) {
    let body = match body {
        Some(json) => Body::from(json.to_string()),
        None => Body::empty(),
    };
    dispatch(state, method, path, body).await
}

pub async fn post(state: AppState, path: &str, body: Value) -> (StatusCode, Value) {
    send(state, "POST", path, Some(body)).await
}

/// Posts `body` verbatim, for bodies that are not valid JSON.
pub async fn post_raw(state: AppState, path: &str, body: &'static str) -> (StatusCode, Value) {
    dispatch(state, "POST", path, Body::from(body)).await
}

async fn dispatch(state: AppState, method: &str, path: &str, body: Body) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(path)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();

    let response = build_router(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, json)
}
