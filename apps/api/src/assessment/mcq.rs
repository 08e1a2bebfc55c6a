//! Multiple-choice stage: ten questions on a fixed difficulty ramp, then
//! per-question grading against the stored correct options.

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use super::prompts::{MCQ_EVAL_SYSTEM, MCQ_SYSTEM};
use super::{evaluation_prompt, generation_prompt, EvaluateRequest};
use crate::errors::AppError;
use crate::llm_client::ChatModel;
use crate::models::skills::Skills;
use crate::normalizer::{decode, lenient};

pub const MCQ_COUNT: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct McqQuestion {
    #[serde(deserialize_with = "lenient::string")]
    pub question: String,
    #[serde(deserialize_with = "lenient::string_list")]
    pub options: Vec<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub correct_option: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct McqResult {
    #[serde(deserialize_with = "lenient::string")]
    pub question: String,
    #[serde(deserialize_with = "lenient::string")]
    pub user_answer: String,
    #[serde(deserialize_with = "lenient::string")]
    pub correct_answer: String,
    #[serde(deserialize_with = "lenient::boolean")]
    pub is_correct: bool,
    #[serde(deserialize_with = "lenient::string")]
    pub feedback: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct McqEvaluation {
    pub score: u32,
    pub details: Vec<McqResult>,
}

impl McqEvaluation {
    /// The score is always recounted from the per-question flags.
    pub fn from_details(details: Vec<McqResult>) -> Self {
        let score = details.iter().filter(|d| d.is_correct).count() as u32;
        Self { score, details }
    }
}

/// Short random style seed, four hex digits.
pub fn new_variant_id() -> String {
    Uuid::new_v4().simple().to_string()[..4].to_string()
}

pub async fn generate_mcqs(
    skills: &Skills,
    variant: Option<&str>,
    llm: &dyn ChatModel,
) -> Result<Vec<McqQuestion>, AppError> {
    let variant = match variant.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => v.to_string(),
        None => new_variant_id(),
    };

    let raw = llm
        .complete(&generation_prompt(MCQ_SYSTEM, skills, &variant))
        .await?;
    let mut questions: Vec<McqQuestion> = decode(&raw)?;

    if questions.len() != MCQ_COUNT {
        warn!(
            "Model returned {} MCQs (variant {variant}), expected {MCQ_COUNT}",
            questions.len()
        );
        questions.truncate(MCQ_COUNT);
    }
    Ok(questions)
}

pub async fn evaluate_mcqs(
    request: &EvaluateRequest,
    llm: &dyn ChatModel,
) -> Result<McqEvaluation, AppError> {
    let raw = llm
        .complete(&evaluation_prompt(MCQ_EVAL_SYSTEM, request)?)
        .await?;
    let details: Vec<McqResult> = decode(&raw)?;
    Ok(McqEvaluation::from_details(details))
}
