//! Freelancer recommender for clients describing a job.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::prompts::{USERS_SYSTEM, USERS_USER};
use super::{gather, Grounding, ANALYST_TEMPERATURE};
use crate::errors::AppError;
use crate::llm_client::prompts::{fill, JSON_ONLY_RULES, PLATFORM_NAME};
use crate::llm_client::{ChatModel, Prompt};
use crate::normalizer::{decode, lenient};
use crate::rag::retriever::Retriever;

pub const USERS_TOP_K: usize = 6;

pub const NOT_ENOUGH_USER_DATA: &str =
    "Not enough user data found. Please provide a more detailed job description.";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioLinks {
    #[serde(deserialize_with = "lenient::string")]
    pub github: String,
    #[serde(deserialize_with = "lenient::string")]
    pub linkedin: String,
    #[serde(deserialize_with = "lenient::string")]
    pub website: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    #[serde(deserialize_with = "lenient::string")]
    pub fullname: String,
    #[serde(deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(deserialize_with = "lenient::string")]
    pub headline: String,
    #[serde(deserialize_with = "lenient::string_list")]
    pub skills: Vec<String>,
    #[serde(rename = "hourlyRate", deserialize_with = "lenient::number")]
    pub hourly_rate: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub stars: f64,
    #[serde(rename = "portfolioLinks", deserialize_with = "portfolio_links")]
    pub portfolio_links: PortfolioLinks,
}

/// A non-object `portfolioLinks` (null, a bare URL) becomes empty links.
fn portfolio_links<'de, D: serde::Deserializer<'de>>(d: D) -> Result<PortfolioLinks, D::Error> {
    let value = serde_json::Value::deserialize(d)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum UserRecommendation {
    Users { users: Vec<UserProfile> },
    Error { error: String },
}

pub fn compose(query: &str, context: &str) -> Prompt {
    Prompt::new(
        fill(
            USERS_SYSTEM,
            &[("platform", PLATFORM_NAME), ("rules", JSON_ONLY_RULES)],
        ),
        fill(USERS_USER, &[("context", context), ("query", query)]),
        ANALYST_TEMPERATURE,
    )
}

pub async fn recommend_users(
    query: &str,
    retriever: &dyn Retriever,
    llm: &dyn ChatModel,
) -> Result<UserRecommendation, AppError> {
    let context = match gather("users", retriever, query, USERS_TOP_K).await {
        Grounding::Context(context) => context,
        Grounding::Insufficient => {
            return Ok(UserRecommendation::Error {
                error: NOT_ENOUGH_USER_DATA.to_string(),
            })
        }
        Grounding::Unavailable => return Ok(UserRecommendation::Users { users: Vec::new() }),
    };

    let raw = llm.complete(&compose(query, &context)).await?;
    let users = decode::<Vec<UserProfile>>(&raw).unwrap_or_else(|failure| {
        warn!("User recommendations unparseable ({} chars)", failure.raw.len());
        Vec::new()
    });
    Ok(UserRecommendation::Users { users })
}
