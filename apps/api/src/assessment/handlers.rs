//! Axum route handlers for the skills assessment.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;

use super::descriptive::{
    evaluate_descriptive, generate_descriptive, DescriptiveEvaluation, DescriptiveQuestion,
};
use super::mcq::{evaluate_mcqs, generate_mcqs, McqEvaluation, McqQuestion};
use super::{EvaluateRequest, GenerateRequest};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct QuestionsResponse<Q> {
    pub questions: Vec<Q>,
}

#[derive(Debug, Serialize)]
pub struct EvaluationResponse<E> {
    pub evaluation: E,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /generate-mcqs
pub async fn handle_generate_mcqs(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<QuestionsResponse<McqQuestion>>, AppError> {
    let Json(request) = payload?;
    request.validate()?;
    let questions = generate_mcqs(
        &request.skills,
        request.variant.as_deref(),
        state.llm.as_ref(),
    )
    .await?;
    Ok(Json(QuestionsResponse { questions }))
}

/// POST /evaluate-mcqs
pub async fn handle_evaluate_mcqs(
    State(state): State<AppState>,
    payload: Result<Json<EvaluateRequest>, JsonRejection>,
) -> Result<Json<EvaluationResponse<McqEvaluation>>, AppError> {
    let Json(request) = payload?;
    request.validate()?;
    let evaluation = evaluate_mcqs(&request, state.llm.as_ref()).await?;
    Ok(Json(EvaluationResponse { evaluation }))
}

/// POST /generate-descriptive
pub async fn handle_generate_descriptive(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<QuestionsResponse<DescriptiveQuestion>>, AppError> {
    let Json(request) = payload?;
    request.validate()?;
    let questions = generate_descriptive(&request.skills, state.llm.as_ref()).await?;
    Ok(Json(QuestionsResponse { questions }))
}

/// POST /evaluate-descriptive
pub async fn handle_evaluate_descriptive(
    State(state): State<AppState>,
    payload: Result<Json<EvaluateRequest>, JsonRejection>,
) -> Result<Json<EvaluationResponse<DescriptiveEvaluation>>, AppError> {
    let Json(request) = payload?;
    request.validate()?;
    let evaluation = evaluate_descriptive(&request, state.llm.as_ref()).await?;
    Ok(Json(EvaluationResponse { evaluation }))
}
