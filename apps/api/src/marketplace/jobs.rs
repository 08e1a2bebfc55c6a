//! Job recommender: matches a student's profile or query against posted jobs.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::prompts::{JOBS_SYSTEM, JOBS_USER};
use super::{gather, Grounding, ANALYST_TEMPERATURE};
use crate::errors::AppError;
use crate::llm_client::prompts::{fill, JSON_ONLY_RULES, PLATFORM_NAME};
use crate::llm_client::{ChatModel, Prompt};
use crate::normalizer::{decode, lenient};
use crate::rag::retriever::Retriever;

pub const JOBS_TOP_K: usize = 4;

pub const NOT_ENOUGH_JOB_INFO: &str = "I couldn't find enough info in the guides. \
Please give me more details about your skills or career goals.";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobListing {
    #[serde(deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(deserialize_with = "lenient::string")]
    pub company: String,
    #[serde(deserialize_with = "lenient::string")]
    pub rate: String,
    #[serde(deserialize_with = "lenient::string_list")]
    pub skills_required: Vec<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(deserialize_with = "lenient::string")]
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum JobRecommendation {
    Jobs { jobs: Vec<JobListing> },
    Error { error: String },
}

pub fn compose(query: &str, context: &str) -> Prompt {
    Prompt::new(
        fill(
            JOBS_SYSTEM,
            &[("platform", PLATFORM_NAME), ("rules", JSON_ONLY_RULES)],
        ),
        fill(JOBS_USER, &[("context", context), ("query", query)]),
        ANALYST_TEMPERATURE,
    )
}

pub async fn recommend_jobs(
    query: &str,
    retriever: &dyn Retriever,
    llm: &dyn ChatModel,
) -> Result<JobRecommendation, AppError> {
    let context = match gather("jobs", retriever, query, JOBS_TOP_K).await {
        Grounding::Context(context) => context,
        Grounding::Insufficient => {
            return Ok(JobRecommendation::Error {
                error: NOT_ENOUGH_JOB_INFO.to_string(),
            })
        }
        Grounding::Unavailable => return Ok(JobRecommendation::Jobs { jobs: Vec::new() }),
    };

    let raw = llm.complete(&compose(query, &context)).await?;
    let jobs = decode::<Vec<JobListing>>(&raw).unwrap_or_else(|failure| {
        warn!("Job recommendations unparseable ({} chars)", failure.raw.len());
        Vec::new()
    });
    Ok(JobRecommendation::Jobs { jobs })
}
