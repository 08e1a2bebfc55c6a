//! Rate benchmark: descriptive statistics over rates found in job postings.
//!
//! Always answers with a complete benchmark. When the model cannot be
//! grounded or its output cannot be read, every figure is zero and the
//! recommendation says why.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::prompts::{RATES_SYSTEM, RATES_USER};
use super::{gather, Grounding, ANALYST_TEMPERATURE};
use crate::errors::AppError;
use crate::llm_client::prompts::{fill, JSON_ONLY_RULES, PLATFORM_NAME};
use crate::llm_client::{ChatModel, Prompt};
use crate::normalizer::{decode, lenient};
use crate::rag::retriever::Retriever;

pub const RATES_TOP_K: usize = 6;

pub const NO_RECOMMENDATION: &str = "No recommendation generated.";
pub const NOT_ENOUGH_RATE_DATA: &str = "Not enough data to benchmark rates. Try a more specific role.";
pub const BENCHMARK_FAILED: &str = "Failed to generate benchmark. Please try again.";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestedRange {
    #[serde(deserialize_with = "lenient::number")]
    pub floor: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub ceiling: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub point: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateBenchmark {
    #[serde(deserialize_with = "lenient::string")]
    pub searched_role: String,
    #[serde(deserialize_with = "lenient::number")]
    pub avg_rate: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub median_rate: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub min_rate: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub max_rate: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub p10_rate: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub p90_rate: f64,
    #[serde(deserialize_with = "suggested_range")]
    pub suggested_range: SuggestedRange,
    #[serde(deserialize_with = "lenient::string")]
    pub recommendation: String,
}

fn suggested_range<'de, D: serde::Deserializer<'de>>(d: D) -> Result<SuggestedRange, D::Error> {
    let value = serde_json::Value::deserialize(d)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

impl RateBenchmark {
    /// All-zero benchmark for `query` carrying `recommendation`.
    pub fn empty(query: &str, recommendation: &str) -> Self {
        Self {
            searched_role: query.to_string(),
            recommendation: recommendation.to_string(),
            ..Self::default()
        }
    }

    /// Fills `searched_role` and `recommendation` when they are absent,
    /// null or blank. An empty string from the model counts as missing.
    fn with_defaults(mut self, query: &str) -> Self {
        if self.searched_role.is_empty() {
            self.searched_role = query.to_string();
        }
        if self.recommendation.is_empty() {
            self.recommendation = NO_RECOMMENDATION.to_string();
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkResponse {
    pub data: RateBenchmark,
}

pub fn compose(query: &str, context: &str) -> Prompt {
    Prompt::new(
        fill(
            RATES_SYSTEM,
            &[("platform", PLATFORM_NAME), ("rules", JSON_ONLY_RULES)],
        ),
        fill(RATES_USER, &[("context", context), ("query", query)]),
        ANALYST_TEMPERATURE,
    )
}

pub async fn benchmark(
    query: &str,
    retriever: &dyn Retriever,
    llm: &dyn ChatModel,
) -> Result<RateBenchmark, AppError> {
    let context = match gather("rates", retriever, query, RATES_TOP_K).await {
        Grounding::Context(context) => context,
        Grounding::Insufficient => return Ok(RateBenchmark::empty(query, NOT_ENOUGH_RATE_DATA)),
        Grounding::Unavailable => return Ok(RateBenchmark::empty(query, BENCHMARK_FAILED)),
    };

    let raw = llm.complete(&compose(query, &context)).await?;
    Ok(match decode::<RateBenchmark>(&raw) {
        Ok(result) => result.with_defaults(query),
        Err(failure) => {
            warn!("Rate benchmark unparseable ({} chars)", failure.raw.len());
            RateBenchmark::empty(query, BENCHMARK_FAILED)
        }
    })
}
