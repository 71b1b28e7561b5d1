//! Axum route handlers for the Generation API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::generator::{generate_resume, GenerateRequest, GenerateResponse};
use crate::generation::keywords::extract_keywords;
use crate::models::resume::{FitScore, GeneratedResume};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordsRequest {
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub job_title: String,
}

#[derive(Debug, Serialize)]
pub struct KeywordsResponse {
    pub keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitScoreRequest {
    pub resume: GeneratedResume,
    #[serde(default)]
    pub job_description: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/generate
///
/// Full pipeline: keywords → prompt → model → recovery → completion → fit score.
/// Always returns a schema-complete resume unless configuration or input is missing.
pub async fn handle_generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let Json(request) = payload?;
    let response = generate_resume(
        state.generation.as_deref(),
        state.fit_scorer.as_ref(),
        &state.settings,
        request,
    )
    .await?;

    Ok(Json(response))
}

/// POST /api/v1/resumes/keywords
///
/// Previews the keywords that would steer generation and scoring.
pub async fn handle_keywords(
    payload: Result<Json<KeywordsRequest>, JsonRejection>,
) -> Result<Json<KeywordsResponse>, AppError> {
    let Json(request) = payload?;
    if request.job_description.trim().is_empty() && request.job_title.trim().is_empty() {
        return Err(AppError::Validation(
            "jobDescription or jobTitle is required".to_string(),
        ));
    }

    let keywords = extract_keywords(&request.job_description, &request.job_title);
    Ok(Json(KeywordsResponse { keywords }))
}

/// POST /api/v1/resumes/fit-score
///
/// Re-scores a (possibly user-edited) resume against a job description.
pub async fn handle_fit_score(
    State(state): State<AppState>,
    payload: Result<Json<FitScoreRequest>, JsonRejection>,
) -> Result<Json<FitScore>, AppError> {
    let Json(request) = payload?;
    Ok(Json(state.fit_scorer.score(&request.resume, &request.job_description)))
}
