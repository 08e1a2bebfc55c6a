//! Descriptive stage: three open questions, graded 0-10 each.
//!
//! Graders tend to answer with the per-question array followed by a separate
//! `{"total_score": n}` object, sometimes in two fenced blocks. All of those
//! layouts are accepted; a missing total is rebuilt from the scores.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use super::prompts::{DESCRIPTIVE_EVAL_SYSTEM, DESCRIPTIVE_SYSTEM};
use super::{evaluation_prompt, generation_prompt, EvaluateRequest};
use crate::errors::AppError;
use crate::llm_client::ChatModel;
use crate::models::skills::Skills;
use crate::normalizer::fence::Raw;
use crate::normalizer::{decode, lenient, ParseFailure};

pub const DESCRIPTIVE_COUNT: usize = 3;
pub const MAX_QUESTION_SCORE: u32 = 10;
pub const MAX_TOTAL_SCORE: u32 = 30;

const TOTAL_KEY: &str = "total_score";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DescriptiveQuestion {
    #[serde(deserialize_with = "lenient::string")]
    pub question: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DescriptiveResult {
    #[serde(deserialize_with = "lenient::string")]
    pub question: String,
    #[serde(deserialize_with = "lenient::string")]
    pub user_answer: String,
    #[serde(deserialize_with = "question_score")]
    pub score: u32,
    #[serde(deserialize_with = "lenient::string")]
    pub feedback: String,
}

fn question_score<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    Ok(lenient::to_count(lenient::as_number(&Value::deserialize(d)?)).min(MAX_QUESTION_SCORE))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveEvaluation {
    pub total_score: u32,
    pub details: Vec<DescriptiveResult>,
}

impl DescriptiveEvaluation {
    /// Uses the grader's aggregate when it sent one, otherwise the sum of
    /// the per-question scores. Either way capped at `MAX_TOTAL_SCORE`.
    pub fn new(details: Vec<DescriptiveResult>, aggregate: Option<u32>) -> Self {
        let total = aggregate.unwrap_or_else(|| details.iter().map(|d| d.score).sum());
        Self {
            total_score: total.min(MAX_TOTAL_SCORE),
            details,
        }
    }
}

pub async fn generate_descriptive(
    skills: &Skills,
    llm: &dyn ChatModel,
) -> Result<Vec<DescriptiveQuestion>, AppError> {
    let raw = llm
        .complete(&generation_prompt(DESCRIPTIVE_SYSTEM, skills, ""))
        .await?;
    let mut questions: Vec<DescriptiveQuestion> = decode(&raw)?;
    if questions.len() != DESCRIPTIVE_COUNT {
        warn!(
            "Model returned {} descriptive questions, expected {DESCRIPTIVE_COUNT}",
            questions.len()
        );
        questions.truncate(DESCRIPTIVE_COUNT);
    }
    Ok(questions)
}

pub async fn evaluate_descriptive(
    request: &EvaluateRequest,
    llm: &dyn ChatModel,
) -> Result<DescriptiveEvaluation, AppError> {
    let raw = llm
        .complete(&evaluation_prompt(DESCRIPTIVE_EVAL_SYSTEM, request)?)
        .await?;
    Ok(parse_evaluation(&raw)?)
}

/// Splits the grader's reply into per-question results and the optional aggregate.
pub fn parse_evaluation(raw: &str) -> Result<DescriptiveEvaluation, ParseFailure> {
    let values = parse_values(raw).ok_or_else(|| ParseFailure::new(raw))?;

    let mut details = Vec::new();
    let mut aggregate = None;
    for item in flatten(values) {
        let Value::Object(fields) = &item else {
            continue;
        };
        if !fields.contains_key("question") {
            if let Some(total) = fields.get(TOTAL_KEY) {
                aggregate = Some(lenient::to_count(lenient::as_number(total)));
            }
            continue;
        }
        if let Ok(result) = serde_json::from_value::<DescriptiveResult>(item) {
            details.push(result);
        }
    }

    if details.is_empty() && aggregate.is_none() {
        return Err(ParseFailure::new(raw));
    }
    Ok(DescriptiveEvaluation::new(details, aggregate))
}

/// Tries, in order: the fence-stripped text as a stream of JSON values, the
/// same with every fence line removed, and the text wrapped in brackets
/// (for `[...], {...}`).
fn parse_values(raw: &str) -> Option<Vec<Value>> {
    let stripped = Raw::new(raw).strip_fence();
    if let Ok(values) = stripped.parse_stream() {
        if !values.is_empty() {
            return Some(values);
        }
    }

    let unfenced: String = raw
        .lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n");
    if let Ok(values) = Raw::new(&unfenced).strip_fence().parse_stream() {
        if !values.is_empty() {
            return Some(values);
        }
    }

    serde_json::from_str::<Value>(&format!("[{}]", unfenced.trim()))
        .ok()
        .map(|v| vec![v])
}

fn flatten(values: Vec<Value>) -> Vec<Value> {
    let mut out = Vec::new();
    for value in values {
        match value {
            Value::Array(items) => out.extend(flatten(items)),
            other => out.push(other),
        }
    }
    out
}
