/// LLM Client: the single point of entry for all generation calls in the assistant.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// Handlers depend on the `ChatModel` trait; `LlmClient` is the production backend.
///
/// One attempt per request. A failed call resolves straight into an `LlmError`
/// which the handler boundary turns into an `{error}` body.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::conversation::{ConversationTurn, Role};

pub mod embeddings;
pub mod prompts;

pub(crate) const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Generation model used when `CHAT_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";
const MAX_OUTPUT_TOKENS: u32 = 4096;
pub(crate) const HTTP_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// A role-structured prompt: system instructions, prior turns, then the user message.
#[derive(Debug, Clone)]
pub struct Prompt {
    pub system: String,
    pub history: Vec<ConversationTurn>,
    pub user: String,
    pub temperature: f32,
}

impl Prompt {
    pub fn new(system: impl Into<String>, user: impl Into<String>, temperature: f32) -> Self {
        Self {
            system: system.into(),
            history: Vec::new(),
            user: user.into(),
            temperature,
        }
    }

    pub fn with_history(mut self, history: Vec<ConversationTurn>) -> Self {
        self.history = history;
        self
    }
}

/// Text-completion backend. Carried in `AppState` as `Arc<dyn ChatModel>`.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Sends the prompt and returns the model's raw text output.
    async fn complete(&self, prompt: &Prompt) -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl LlmResponse {
    /// Concatenates the text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// Reads a non-success response into `LlmError::Api`, preferring the API's own message.
pub(crate) async fn api_error(response: reqwest::Response) -> LlmError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<GeminiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    LlmError::Api { status, message }
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// The generation client used by all agents.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl LlmClient {
    pub fn new(api_key: String, model: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(HTTP_TIMEOUT_SECS))
                .build()?,
            api_key,
            model,
            base_url: GEMINI_API_BASE.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Makes a raw call to `generateContent`, returning the full response object.
    pub async fn call(&self, prompt: &Prompt) -> Result<LlmResponse, LlmError> {
        let request_body = build_request(prompt);
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let llm_response: LlmResponse = response.json().await?;

        if let Some(usage) = &llm_response.usage_metadata {
            debug!(
                "LLM call succeeded: input_tokens={}, output_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(llm_response)
    }
}

#[async_trait]
impl ChatModel for LlmClient {
    async fn complete(&self, prompt: &Prompt) -> Result<String, LlmError> {
        let response = self.call(prompt).await?;
        response.text().ok_or(LlmError::EmptyContent)
    }
}

fn build_request(prompt: &Prompt) -> GenerateContentRequest<'_> {
    let mut contents: Vec<Content<'_>> = prompt
        .history
        .iter()
        .filter(|turn| !turn.text.trim().is_empty())
        .map(|turn| Content {
            role: Some(match turn.role {
                Role::User => "user",
                Role::Assistant => "model",
            }),
            parts: vec![Part { text: &turn.text }],
        })
        .collect();
    contents.push(Content {
        role: Some("user"),
        parts: vec![Part { text: &prompt.user }],
    });

    GenerateContentRequest {
        system_instruction: Content {
            role: None,
            parts: vec![Part {
                text: &prompt.system,
            }],
        },
        contents,
        generation_config: GenerationConfig {
            temperature: prompt.temperature,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        },
    }
}
