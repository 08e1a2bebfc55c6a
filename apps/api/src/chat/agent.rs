//! Conversational assistant over the platform guides.

use tracing::debug;

use super::prompts::{FALLBACK_SYSTEM, RAG_SYSTEM, RAG_USER_TEMPLATE};
use super::router::{route, RouteDecision, RoutingRules};
use crate::errors::AppError;
use crate::llm_client::prompts::{fill, PLATFORM_NAME};
use crate::llm_client::{ChatModel, Prompt};
use crate::models::conversation::ConversationTurn;
use crate::normalizer::normalize;
use crate::rag::retriever::Retriever;

const CHAT_TEMPERATURE: f32 = 0.2;

/// Builds the prompt for a routing decision. Pure; no I/O.
pub fn compose(decision: &RouteDecision, message: &str, history: Vec<ConversationTurn>) -> Prompt {
    let platform = [("platform", PLATFORM_NAME)];
    let prompt = match decision {
        RouteDecision::RetrievalAugmented { context } => Prompt::new(
            fill(RAG_SYSTEM, &platform),
            fill(
                RAG_USER_TEMPLATE,
                &[("context", context.as_str()), ("question", message)],
            ),
            CHAT_TEMPERATURE,
        ),
        RouteDecision::Fallback(_) => {
            Prompt::new(fill(FALLBACK_SYSTEM, &platform), message, CHAT_TEMPERATURE)
        }
    };
    prompt.with_history(history)
}

/// Answers one chat message. Retrieval problems degrade to the fallback
/// path; only a failed model call is an error.
pub async fn respond(
    message: &str,
    history: Vec<ConversationTurn>,
    retriever: &dyn Retriever,
    llm: &dyn ChatModel,
    rules: &RoutingRules,
) -> Result<String, AppError> {
    let decision = route(message, retriever, rules).await;
    debug!("Chat decision: {decision:?}");

    let prompt = compose(&decision, message, history);
    let raw = llm.complete(&prompt).await?;
    Ok(normalize(&raw, false).into_text()?)
}
