// Marketplace agents: job and freelancer recommendations, rate benchmarks,
// cover letters. The three retrieval-backed agents share `gather`.

pub mod cover_letter;
pub mod handlers;
pub mod jobs;
pub mod prompts;
pub mod rates;
pub mod users;

use tracing::{info, warn};

use crate::rag::retriever::Retriever;

/// Sampling temperature for the analytical agents.
pub(crate) const ANALYST_TEMPERATURE: f32 = 0.2;

/// Trimmed context shorter than this (chars) cannot ground an answer.
/// Unlike chat routing, exactly this many chars is enough.
pub(crate) const MIN_MARKETPLACE_CONTEXT_CHARS: usize = 50;

pub(crate) fn is_sufficient_context(context: &str) -> bool {
    context.trim().chars().count() >= MIN_MARKETPLACE_CONTEXT_CHARS
}

/// Outcome of the retrieval step for one marketplace request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Grounding {
    Context(String),
    /// Retrieval worked but found too little to ground an answer.
    Insufficient,
    /// Retrieval itself failed; the cause has already been logged.
    Unavailable,
}

pub(crate) async fn gather(
    corpus: &str,
    retriever: &dyn Retriever,
    query: &str,
    k: usize,
) -> Grounding {
    match retriever.retrieve(query, k).await {
        Ok(result) => {
            let context = result.format_context();
            if is_sufficient_context(&context) {
                info!("{corpus}: context length {}", context.chars().count());
                Grounding::Context(context)
            } else {
                info!("{corpus}: insufficient context for query");
                Grounding::Insufficient
            }
        }
        Err(e) => {
            warn!("{corpus}: retrieval failed: {e}");
            Grounding::Unavailable
        }
    }
}
