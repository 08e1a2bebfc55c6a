pub mod health;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::warn;

use crate::assessment::handlers as assessment;
use crate::chat::handlers as chat;
use crate::marketplace::handlers as marketplace;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Chat assistant
        .route("/chat", post(chat::handle_chat))
        // Marketplace
        .route("/recommend", post(marketplace::handle_recommend_jobs))
        .route("/recommend-users", post(marketplace::handle_recommend_users))
        .route("/benchmark", post(marketplace::handle_benchmark))
        .route("/generate-proposal", post(marketplace::handle_generate_proposal))
        // Skills assessment
        .route("/generate-mcqs", post(assessment::handle_generate_mcqs))
        .route("/evaluate-mcqs", post(assessment::handle_evaluate_mcqs))
        .route("/generate-descriptive", post(assessment::handle_generate_descriptive))
        .route("/evaluate-descriptive", post(assessment::handle_evaluate_descriptive))
        .with_state(state)
}

/// CORS for the configured frontend origins, with credentials. Methods and
/// headers mirror the preflight request. Unparseable origins are skipped.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {origin:?}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use serde_json::json;

    use super::*;
    use crate::test_support::{send, state, StubModel, StubRetriever};

    fn app_state() -> crate::state::AppState {
        state(
            Arc::new(StubModel::replying("unused")),
            Arc::new(StubRetriever::with(&[])),
        )
    }

    #[tokio::test]
    async fn test_root_reports_running() {
        let (status, body) = send(app_state(), "GET", "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "running"}));
    }

    #[tokio::test]
    async fn test_health_names_service() {
        let (status, body) = send(app_state(), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "workhive-api");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_cors_allows_configured_origin_only() {
        use axum::body::Body;
        use axum::http::{header, Method, Request};
        use tower::ServiceExt;

        let app = build_router(app_state()).layer(cors_layer(&[
            "http://localhost:5173".to_string(),
            "not a header\n".to_string(),
        ]));

        let preflight = |origin: &'static str| {
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/chat")
                .header(header::ORIGIN, origin)
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap()
        };

        let allowed = app.clone().oneshot(preflight("http://localhost:5173")).await.unwrap();
        assert_eq!(
            allowed.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:5173"
        );
        assert_eq!(
            allowed.headers().get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
            "true"
        );

        let denied = app.oneshot(preflight("http://evil.test")).await.unwrap();
        assert!(denied.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let (status, _) = send(app_state(), "POST", "/resumes", Some(json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
