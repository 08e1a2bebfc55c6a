//! Axum route handlers for the marketplace agents.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;

use super::cover_letter::{write_cover_letter, CoverLetterRequest, CoverLetterResponse};
use super::jobs::{recommend_jobs, JobRecommendation};
use super::rates::{benchmark, BenchmarkResponse};
use super::users::{recommend_users, UserRecommendation};
use crate::errors::AppError;
use crate::normalizer::lenient;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct QueryRequest {
    #[serde(deserialize_with = "lenient::string")]
    pub query: String,
}

impl QueryRequest {
    fn query(&self) -> Result<&str, AppError> {
        let query = self.query.trim();
        if query.is_empty() {
            return Err(AppError::Validation("Query is required".to_string()));
        }
        Ok(query)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /recommend
pub async fn handle_recommend_jobs(
    State(state): State<AppState>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<JobRecommendation>, AppError> {
    let Json(request) = payload?;
    let query = request.query()?;
    let result = recommend_jobs(query, state.corpora.jobs.as_ref(), state.llm.as_ref()).await?;
    Ok(Json(result))
}

/// POST /recommend-users
pub async fn handle_recommend_users(
    State(state): State<AppState>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<UserRecommendation>, AppError> {
    let Json(request) = payload?;
    let query = request.query()?;
    let result = recommend_users(query, state.corpora.users.as_ref(), state.llm.as_ref()).await?;
    Ok(Json(result))
}

/// POST /benchmark
///
/// Rates are benchmarked against the job postings corpus.
pub async fn handle_benchmark(
    State(state): State<AppState>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<BenchmarkResponse>, AppError> {
    let Json(request) = payload?;
    let query = request.query()?;
    let data = benchmark(query, state.corpora.jobs.as_ref(), state.llm.as_ref()).await?;
    Ok(Json(BenchmarkResponse { data }))
}

/// POST /generate-proposal
pub async fn handle_generate_proposal(
    State(state): State<AppState>,
    payload: Result<Json<CoverLetterRequest>, JsonRejection>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    let Json(request) = payload?;
    request.validate()?;
    let cover_letter = write_cover_letter(&request, state.llm.as_ref()).await?;
    Ok(Json(CoverLetterResponse { cover_letter }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use serde_json::json;

    use crate::marketplace::jobs::NOT_ENOUGH_JOB_INFO;
    use crate::marketplace::rates::BENCHMARK_FAILED;
    use crate::test_support::{post, post_raw, state, StubModel, StubRetriever, RICH_CONTEXT};

    #[tokio::test]
    async fn test_blank_query_is_rejected_on_every_query_route() {
        for path in ["/recommend", "/recommend-users", "/benchmark"] {
            let model = Arc::new(StubModel::replying("[]"));
            let (status, body) = post(
                state(model.clone(), Arc::new(StubRetriever::with(&[RICH_CONTEXT]))),
                path,
                json!({"query": "   "}),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{path}");
            assert_eq!(body, json!({"error": "Query is required"}), "{path}");
            assert_eq!(model.calls(), 0);
        }
    }

    #[tokio::test]
    async fn test_recommend_returns_jobs() {
        let model = Arc::new(StubModel::replying(
            r#"[{"title": "API developer", "company": "Acme", "rate": "$40/hr",
                 "skills_required": ["Rust"], "description": "Build APIs", "link": "https://acme.dev/jobs/1"}]"#,
        ));
        let (status, body) = post(
            state(model, Arc::new(StubRetriever::with(&[RICH_CONTEXT]))),
            "/recommend",
            json!({"query": "rust backend"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["jobs"][0]["title"], "API developer");
        assert_eq!(body["jobs"][0]["skills_required"], json!(["Rust"]));
    }

    #[tokio::test]
    async fn test_recommend_with_thin_context_returns_error_body() {
        let (status, body) = post(
            state(
                Arc::new(StubModel::replying("[]")),
                Arc::new(StubRetriever::with(&["short"])),
            ),
            "/recommend",
            json!({"query": "rust backend"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"error": NOT_ENOUGH_JOB_INFO}));
    }

    #[tokio::test]
    async fn test_benchmark_wraps_result_in_data() {
        let (status, body) = post(
            state(
                Arc::new(StubModel::replying("not json {{{")),
                Arc::new(StubRetriever::with(&[RICH_CONTEXT])),
            ),
            "/benchmark",
            json!({"query": "Rust developer"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["searched_role"], "Rust developer");
        assert_eq!(body["data"]["avg_rate"], 0.0);
        assert_eq!(body["data"]["recommendation"], BENCHMARK_FAILED);
    }

    #[tokio::test]
    async fn test_recommend_users_returns_users() {
        let (status, body) = post(
            state(
                Arc::new(StubModel::replying(r#"[{"fullname": "Lee", "stars": 5}]"#)),
                Arc::new(StubRetriever::with(&[RICH_CONTEXT])),
            ),
            "/recommend-users",
            json!({"query": "Need a Flutter dev"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["users"][0]["fullname"], "Lee");
        assert_eq!(body["users"][0]["stars"], 5.0);
    }

    #[tokio::test]
    async fn test_generate_proposal_accepts_comma_skills() {
        let model = Arc::new(StubModel::replying("Dear Dana,\n\nI would love to help."));
        let (status, body) = post(
            state(model.clone(), Arc::new(StubRetriever::with(&[]))),
            "/generate-proposal",
            json!({
                "job_title": "Logo design",
                "skills": "Illustrator, Figma",
                "name": "Kim",
                "client_name": "Dana"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"cover_letter": "Dear Dana,\n\nI would love to help."}));
        assert!(model.last_prompt().unwrap().user.contains("Illustrator, Figma"));
    }

    #[tokio::test]
    async fn test_generate_proposal_requires_skills() {
        let (status, body) = post(
            state(
                Arc::new(StubModel::replying("unused")),
                Arc::new(StubRetriever::with(&[])),
            ),
            "/generate-proposal",
            json!({"job_title": "Logo design", "skills": []}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Both job_title and skills are required"}));
    }

    #[tokio::test]
    async fn test_malformed_body_renders_json_error() {
        let (status, body) = post_raw(
            state(
                Arc::new(StubModel::replying("unused")),
                Arc::new(StubRetriever::with(&[])),
            ),
            "/recommend",
            "{\"query\": ",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_mistyped_skills_render_json_error() {
        let model = Arc::new(StubModel::replying("unused"));
        let (status, body) = post(
            state(model.clone(), Arc::new(StubRetriever::with(&[]))),
            "/generate-proposal",
            json!({"job_title": "Logo design", "skills": 42}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_null_client_details_fall_back_to_defaults() {
        let model = Arc::new(StubModel::replying("Dear Hiring Manager,"));
        let (status, body) = post(
            state(model.clone(), Arc::new(StubRetriever::with(&[]))),
            "/generate-proposal",
            json!({
                "job_title": "Logo design",
                "skills": ["Figma"],
                "name": null,
                "email": null,
                "description": null,
                "client_name": null,
                "client_company": null
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"cover_letter": "Dear Hiring Manager,"}));
        let prompt = model.last_prompt().unwrap();
        assert!(prompt.user.contains("- Client Name: Hiring Manager"));
        assert!(prompt.user.contains("- Company: the company"));
    }

    #[tokio::test]
    async fn test_null_query_is_reported_as_missing() {
        for path in ["/recommend", "/recommend-users", "/benchmark"] {
            let (status, body) = post(
                state(
                    Arc::new(StubModel::replying("[]")),
                    Arc::new(StubRetriever::with(&[RICH_CONTEXT])),
                ),
                path,
                json!({"query": null}),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{path}");
            assert_eq!(body, json!({"error": "Query is required"}), "{path}");
        }
    }
}
