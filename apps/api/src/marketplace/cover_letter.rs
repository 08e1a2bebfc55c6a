//! Cover-letter writer. No retrieval: the request carries everything the
//! letter needs.

use serde::{Deserialize, Serialize};

use super::prompts::{COVER_LETTER_SYSTEM, COVER_LETTER_USER};
use crate::errors::AppError;
use crate::llm_client::prompts::{fill, PLATFORM_NAME};
use crate::llm_client::{ChatModel, Prompt};
use crate::models::skills::Skills;
use crate::normalizer::{lenient, normalize};

const COVER_LETTER_TEMPERATURE: f32 = 0.7;
const DEFAULT_CLIENT_NAME: &str = "Hiring Manager";
const DEFAULT_CLIENT_COMPANY: &str = "the company";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CoverLetterRequest {
    #[serde(deserialize_with = "lenient::string")]
    pub job_title: String,
    pub skills: Skills,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(deserialize_with = "lenient::string")]
    pub client_name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub client_company: String,
}

impl CoverLetterRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.job_title.trim().is_empty() || self.skills.is_empty() {
            return Err(AppError::Validation(
                "Both job_title and skills are required".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverLetterResponse {
    pub cover_letter: String,
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    let value = value.trim();
    if value.is_empty() {
        default
    } else {
        value
    }
}

pub fn compose(request: &CoverLetterRequest) -> Prompt {
    let skills = request.skills.joined();
    Prompt::new(
        fill(COVER_LETTER_SYSTEM, &[("platform", PLATFORM_NAME)]),
        fill(
            COVER_LETTER_USER,
            &[
                ("job_title", request.job_title.trim()),
                ("description", request.description.trim()),
                ("client_name", or_default(&request.client_name, DEFAULT_CLIENT_NAME)),
                (
                    "client_company",
                    or_default(&request.client_company, DEFAULT_CLIENT_COMPANY),
                ),
                ("name", request.name.trim()),
                ("email", request.email.trim()),
                ("skills", skills.as_str()),
            ],
        ),
        COVER_LETTER_TEMPERATURE,
    )
}

pub async fn write_cover_letter(
    request: &CoverLetterRequest,
    llm: &dyn ChatModel,
) -> Result<String, AppError> {
    let raw = llm.complete(&compose(request)).await?;
    Ok(normalize(&raw, false).into_text()?)
}
