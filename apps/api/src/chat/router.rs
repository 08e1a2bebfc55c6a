//! Chat routing: decide per message between a grounded answer and a plain
//! conversational reply.
//!
//! Rules, in order:
//! 1. greeting / general-help substring, or a very short message → fallback
//! 2. retrieval error → fallback (logged, never surfaced)
//! 3. trimmed context of `min_context_chars` chars or fewer → fallback
//! 4. otherwise → retrieval-augmented

use tracing::{info, warn};

use crate::rag::retriever::Retriever;

/// Chunks retrieved for a chat question.
pub const CHAT_TOP_K: usize = 4;

/// Data-driven routing heuristics.
#[derive(Debug, Clone, Copy)]
pub struct RoutingRules {
    pub greetings: &'static [&'static str],
    pub general_queries: &'static [&'static str],
    /// Messages with at most this many whitespace-separated tokens skip retrieval.
    pub max_short_tokens: usize,
    /// Context must be strictly longer than this (chars, after trimming).
    pub min_context_chars: usize,
}

pub const DEFAULT_RULES: RoutingRules = RoutingRules {
    greetings: &[
        "hello",
        "hi",
        "hey",
        "good morning",
        "good afternoon",
        "good evening",
    ],
    general_queries: &["help", "what can you do", "how are you"],
    max_short_tokens: 2,
    min_context_chars: 50,
};

impl Default for RoutingRules {
    fn default() -> Self {
        DEFAULT_RULES
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    GreetingOrGeneral,
    RetrievalFailed,
    InsufficientContext,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Fallback(FallbackReason),
    RetrievalAugmented { context: String },
}

impl RoutingRules {
    pub fn is_greeting_or_general(&self, message: &str) -> bool {
        let msg = message.trim().to_lowercase();
        self.greetings.iter().any(|g| msg.contains(g))
            || self.general_queries.iter().any(|q| msg.contains(q))
            || msg.split_whitespace().count() <= self.max_short_tokens
    }

    pub fn is_sufficient_context(&self, context: &str) -> bool {
        context.trim().chars().count() > self.min_context_chars
    }
}

/// Chooses the answer path for one message. Never fails: every problem
/// degrades to `Fallback`.
pub async fn route(message: &str, retriever: &dyn Retriever, rules: &RoutingRules) -> RouteDecision {
    if rules.is_greeting_or_general(message) {
        info!("Chat route: fallback (greeting/general query)");
        return RouteDecision::Fallback(FallbackReason::GreetingOrGeneral);
    }

    let context = match retriever.retrieve(message, CHAT_TOP_K).await {
        Ok(result) => result.format_context(),
        Err(e) => {
            warn!("Chat retrieval failed, using fallback: {e}");
            return RouteDecision::Fallback(FallbackReason::RetrievalFailed);
        }
    };

    if !rules.is_sufficient_context(&context) {
        info!(
            "Chat route: fallback (context too short: {} chars)",
            context.trim().chars().count()
        );
        return RouteDecision::Fallback(FallbackReason::InsufficientContext);
    }

    info!("Chat route: RAG with context length {}", context.chars().count());
    RouteDecision::RetrievalAugmented { context }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::llm_client::embeddings::EmbeddingError;
    use crate::rag::chunker::Chunk;
    use crate::rag::retriever::{RetrievalError, RetrievalResult};

    /// Returns fixed chunks (or an error) and counts calls.
    struct FixedRetriever {
        texts: Option<Vec<String>>,
        calls: AtomicUsize,
    }

    impl FixedRetriever {
        fn with(texts: &[&str]) -> Self {
            Self {
                texts: Some(texts.iter().map(|t| t.to_string()).collect()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                texts: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Retriever for FixedRetriever {
        async fn retrieve(&self, _query: &str, k: usize) -> Result<RetrievalResult, RetrievalError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(k, CHAT_TOP_K);
            match &self.texts {
                Some(texts) => Ok(RetrievalResult {
                    chunks: texts
                        .iter()
                        .map(|t| Chunk {
                            text: t.clone(),
                            source: "faq.txt".to_string(),
                        })
                        .collect(),
                }),
                None => Err(RetrievalError::Embedding(EmbeddingError::Empty)),
            }
        }
    }

    const QUESTION: &str = "How does escrow protect my payment on a project?";

    #[tokio::test]
    async fn test_greetings_and_short_messages_skip_retrieval() {
        let long_context = "x".repeat(500);
        let retriever = FixedRetriever::with(&[&long_context]);
        for message in ["hi", "help", "ok", "Hello there, I need something", "Good evening!"] {
            let decision = route(message, &retriever, &DEFAULT_RULES).await;
            assert_eq!(
                decision,
                RouteDecision::Fallback(FallbackReason::GreetingOrGeneral),
                "message {message:?}"
            );
        }
        assert_eq!(retriever.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_context_of_exactly_fifty_chars_falls_back() {
        let retriever = FixedRetriever::with(&[&"a".repeat(50)]);
        let decision = route(QUESTION, &retriever, &DEFAULT_RULES).await;
        assert_eq!(decision, RouteDecision::Fallback(FallbackReason::InsufficientContext));
    }

    #[tokio::test]
    async fn test_context_of_fifty_one_chars_uses_rag() {
        let context = "a".repeat(51);
        let retriever = FixedRetriever::with(&[&context]);
        let decision = route(QUESTION, &retriever, &DEFAULT_RULES).await;
        assert_eq!(decision, RouteDecision::RetrievalAugmented { context });
    }

    #[tokio::test]
    async fn test_context_length_ignores_surrounding_whitespace() {
        let padded = format!("   {}   ", "a".repeat(50));
        let retriever = FixedRetriever::with(&[&padded]);
        let decision = route(QUESTION, &retriever, &DEFAULT_RULES).await;
        assert_eq!(decision, RouteDecision::Fallback(FallbackReason::InsufficientContext));
    }

    #[tokio::test]
    async fn test_chunks_are_joined_with_blank_lines() {
        let first = "Escrow holds the client's payment until work is approved.";
        let second = "Disputes are reviewed by the support team within 48 hours.";
        let retriever = FixedRetriever::with(&[first, second]);
        let decision = route(QUESTION, &retriever, &DEFAULT_RULES).await;
        assert_eq!(
            decision,
            RouteDecision::RetrievalAugmented {
                context: format!("{first}\n\n{second}")
            }
        );
    }

    #[tokio::test]
    async fn test_retrieval_error_degrades_to_fallback() {
        let retriever = FixedRetriever::failing();
        let decision = route(QUESTION, &retriever, &DEFAULT_RULES).await;
        assert_eq!(decision, RouteDecision::Fallback(FallbackReason::RetrievalFailed));
        assert_eq!(retriever.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_rules_are_data_driven() {
        let rules = RoutingRules {
            greetings: &["yo"],
            general_queries: &[],
            max_short_tokens: 0,
            min_context_chars: 10,
        };
        assert!(rules.is_greeting_or_general("yo what's up"));
        assert!(!rules.is_greeting_or_general("ok"));
        assert!(rules.is_sufficient_context("eleven char"));
        assert!(!rules.is_sufficient_context("ten chars!"));
    }
}
