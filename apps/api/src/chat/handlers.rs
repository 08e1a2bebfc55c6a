use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use super::agent::respond;
use super::router::DEFAULT_RULES;
use crate::errors::AppError;
use crate::models::conversation::{convert_history, WireTurn};
use crate::normalizer::lenient;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default, deserialize_with = "lenient::string")]
    pub message: String,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub history: Vec<WireTurn>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// POST /chat
pub async fn handle_chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(request) = payload?;
    let message = request.message.trim();
    if message.is_empty() {
        return Err(AppError::Validation("Message is required".to_string()));
    }

    let reply = respond(
        message,
        convert_history(&request.history),
        state.corpora.guides.as_ref(),
        state.llm.as_ref(),
        &DEFAULT_RULES,
    )
    .await?;

    Ok(Json(ChatResponse { reply }))
}
