pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::generation::handlers;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route("/api/v1/resumes/generate", post(handlers::handle_generate))
        .route("/api/v1/resumes/keywords", post(handlers::handle_keywords))
        .route("/api/v1/resumes/fit-score", post(handlers::handle_fit_score))
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::generation::fit_scoring::KeywordFitScorer;
    use crate::generation::generator::GenerationSettings;
    use crate::llm_client::{GenerationClient, GenerationParams, LlmError};

    struct GarbageClient;

    #[async_trait]
    impl GenerationClient for GarbageClient {
        async fn generate(&self, _prompt: &str, _params: &GenerationParams) -> Result<String, LlmError> {
            Ok("this is not json at all".to_string())
        }

        fn model(&self) -> &str {
            "garbage-model"
        }
    }

    fn state(with_client: bool) -> AppState {
        let generation: Option<Arc<dyn GenerationClient>> = if with_client {
            Some(Arc::new(GarbageClient))
        } else {
            None
        };
        AppState {
            generation,
            fit_scorer: Arc::new(KeywordFitScorer),
            settings: GenerationSettings::default(),
        }
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn generate_body() -> Value {
        json!({
            "job": {
                "jobDescription": "Senior Python engineer with AWS and Docker",
                "jobTitle": "Senior Engineer"
            },
            "candidate": {
                "name": "Barbara Liskov",
                "email": "barbara@example.com",
                "technicalSkills": ["Python", "AWS"]
            }
        })
    }

    #[tokio::test]
    async fn test_health_returns_ok() {
        let app = build_router(state(true));
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_generate_survives_garbage_model_output() {
        let (status, body) =
            post_json(build_router(state(true)), "/api/v1/resumes/generate", generate_body()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["resume"]["contactInformation"]["name"], "Barbara Liskov");
        assert_eq!(body["resume"]["skills"]["technical"], json!(["Python", "AWS"]));
        assert_eq!(body["resume"]["workExperience"].as_array().unwrap().len(), 1);
        assert_eq!(body["resume"]["metadata"]["model"], "garbage-model");
        assert!(body["fitScore"]["score"].as_u64().unwrap() <= 100);
        assert!(body["metadata"]["generatedAt"].is_string());
    }

    #[tokio::test]
    async fn test_generate_without_credentials_is_server_error() {
        let (status, body) =
            post_json(build_router(state(false)), "/api/v1/resumes/generate", generate_body()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "CONFIGURATION_ERROR");
    }

    #[tokio::test]
    async fn test_generate_missing_fields_is_bad_request() {
        let body = json!({"job": {"jobTitle": "Engineer"}, "candidate": {"name": "X"}});
        let (status, body) = post_json(build_router(state(true)), "/api/v1/resumes/generate", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_keywords_endpoint() {
        let body = json!({"jobDescription": "Kubernetes and Go platform work", "jobTitle": "SRE"});
        let (status, body) = post_json(build_router(state(true)), "/api/v1/resumes/keywords", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["keywords"][0], "kubernetes");
    }

    #[tokio::test]
    async fn test_keywords_endpoint_rejects_blank_input() {
        let (status, _) =
            post_json(build_router(state(true)), "/api/v1/resumes/keywords", json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_fit_score_endpoint() {
        let resume = json!({
            "summary": "Python and Docker specialist",
            "workExperience": [],
            "skills": {"technical": [], "soft": []},
            "education": [],
            "certifications": [],
            "projects": [],
            "contactInformation": {"name": "A", "email": "a@example.com", "phone": "", "linkedin": ""},
            "languages": [],
            "achievements": []
        });
        let body = json!({"resume": resume, "jobDescription": "python docker"});
        let (status, body) = post_json(build_router(state(true)), "/api/v1/resumes/fit-score", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 100);
        assert_eq!(body["scorerBackend"], "keyword");
    }

    #[tokio::test]
    async fn test_wrong_typed_body_is_json_validation_error() {
        let mut body = generate_body();
        body["candidate"]["technicalSkills"] = json!("Rust");
        let (status, body) = post_json(build_router(state(true)), "/api/v1/resumes/generate", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"].is_string());
    }

    #[tokio::test]
    async fn test_malformed_body_is_json_validation_error() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/resumes/fit-score")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = build_router(state(true)).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let (status, body) = post_json(build_router(state(true)), "/api/v1/nope", json!({})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
