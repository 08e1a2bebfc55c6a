use std::sync::Arc;

use crate::llm_client::ChatModel;
use crate::rag::Corpora;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Generation backend. Default: `LlmClient` against Gemini.
    pub llm: Arc<dyn ChatModel>,
    /// Startup-built, read-only indexes over the guides, jobs and users corpora.
    pub corpora: Corpora,
}
