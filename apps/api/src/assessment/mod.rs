// Skills assessment: MCQ and descriptive question generation and grading.
//
// Unlike the marketplace agents, an unreadable model reply is surfaced to the
// caller as `{error: "Failed to parse", raw}`; there is no useful zero value
// for a question set.

pub mod descriptive;
pub mod handlers;
pub mod mcq;
pub mod prompts;

use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::llm_client::prompts::{fill, JSON_ONLY_RULES};
use crate::llm_client::Prompt;
use crate::models::skills::Skills;
use crate::normalizer::lenient;
use prompts::{EVAL_USER, SKILLS_USER};

pub(crate) const ASSESSMENT_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GenerateRequest {
    pub skills: Skills,
    /// MCQ style seed; generated when absent.
    pub variant: Option<String>,
}

impl GenerateRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.skills.is_empty() {
            return Err(AppError::Validation("Skills are required".to_string()));
        }
        Ok(())
    }
}

/// Questions as previously returned to the caller, plus the caller's answers
/// in whatever shape the frontend keeps them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EvaluateRequest {
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub questions: Vec<Value>,
    pub user_answers: Value,
}

impl EvaluateRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.questions.is_empty() {
            return Err(AppError::Validation("Questions are required".to_string()));
        }
        Ok(())
    }
}

pub(crate) fn generation_prompt(system: &str, skills: &Skills, variant: &str) -> Prompt {
    let skills = skills.joined();
    Prompt::new(
        fill(system, &[("variant", variant), ("rules", JSON_ONLY_RULES)]),
        fill(SKILLS_USER, &[("skills", skills.as_str())]),
        ASSESSMENT_TEMPERATURE,
    )
}

pub(crate) fn evaluation_prompt(system: &str, request: &EvaluateRequest) -> Result<Prompt, AppError> {
    let questions = serde_json::to_string_pretty(&request.questions).map_err(anyhow::Error::from)?;
    let answers = serde_json::to_string_pretty(&request.user_answers).map_err(anyhow::Error::from)?;
    Ok(Prompt::new(
        fill(system, &[("rules", JSON_ONLY_RULES)]),
        fill(
            EVAL_USER,
            &[
                ("questions", questions.as_str()),
                ("user_answers", answers.as_str()),
            ],
        ),
        ASSESSMENT_TEMPERATURE,
    ))
}
