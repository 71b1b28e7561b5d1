//! Resume Generation: orchestrates the full synthesis pipeline.
//!
//! Flow: validate → extract keywords → compose prompt → model call (bounded by
//!       timeout) → recover → complete → stamp metadata → fit score.
//!
//! Only configuration and input errors escape. Model failures, timeouts and
//! malformed output all degrade to profile-derived or canned content.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::completer::complete;
use crate::generation::fit_scoring::FitScorer;
use crate::generation::keywords::extract_keywords;
use crate::generation::prompts::compose_prompt;
use crate::generation::recovery::recover;
use crate::llm_client::{GenerationClient, GenerationParams, LlmError};
use crate::models::profile::{CandidateProfile, JobPosting};
use crate::models::resume::{FitScore, GeneratedResume, GenerationMetadata};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Job block of the generate request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobInput {
    pub job_description: String,
    pub job_title: String,
    pub job_location: Option<String>,
    pub company_name: Option<String>,
}

/// Request body for resume generation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GenerateRequest {
    pub job: JobInput,
    pub candidate: CandidateProfile,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    pub experience_level: String,
    pub target_industry: String,
    pub generated_at: DateTime<Utc>,
}

/// Response from the generation pipeline.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub resume: GeneratedResume,
    pub fit_score: FitScore,
    pub metadata: ResponseMetadata,
}

/// Per-call knobs for the model call.
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub timeout: Duration,
    pub params: GenerationParams,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            params: GenerationParams::default(),
        }
    }
}

impl JobInput {
    fn into_posting(self) -> JobPosting {
        JobPosting {
            title: self.job_title,
            description: self.job_description,
            location: self.job_location,
            company: self.company_name,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Generation pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs the full resume generation pipeline.
///
/// `client` is `None` when no generation credentials are configured, which is
/// reported as a configuration error before any input is inspected.
pub async fn generate_resume(
    client: Option<&dyn GenerationClient>,
    fit_scorer: &dyn FitScorer,
    settings: &GenerationSettings,
    request: GenerateRequest,
) -> Result<GenerateResponse, AppError> {
    let client = client.ok_or_else(|| {
        AppError::Configuration("GEMINI_API_KEY is not set; cannot call the model".to_string())
    })?;

    validate_request(&request)?;

    let candidate = request.candidate;
    let job = request.job.into_posting();

    // Step 1: Keywords
    let keywords = extract_keywords(&job.description, &job.title);
    info!("Extracted {} keywords for '{}'", keywords.len(), job.title);

    // Step 2: Prompt
    let prompt = compose_prompt(&job, &candidate, &keywords);

    // Step 3: Model call; any failure becomes empty text
    let raw_text = match call_with_timeout(client, &prompt, settings).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Generation failed, falling back to profile data: {e}");
            String::new()
        }
    };

    // Step 4: Recover
    let recovered = recover(&raw_text);
    if recovered.is_empty() {
        info!("No usable model output; building resume from profile and defaults");
    }

    // Step 5: Complete and stamp metadata
    let generated_at = Utc::now();
    let mut resume = complete(&recovered, &candidate, &job);
    debug_assert!(resume.has_no_empty_sequences());
    resume.metadata = Some(GenerationMetadata {
        job_title: job.title.clone(),
        company: job.company.clone(),
        generated_at,
        model: client.model().to_string(),
    });

    // Step 6: Fit score
    let fit_score = fit_scorer.score(&resume, &job.description);
    info!(
        "Generated resume for '{}' with fit score {}/100",
        job.title, fit_score.score
    );

    Ok(GenerateResponse {
        resume,
        fit_score,
        metadata: ResponseMetadata {
            experience_level: candidate.experience_level,
            target_industry: candidate.target_industry,
            generated_at,
        },
    })
}

/// Required: jobDescription, jobTitle, candidate name, candidate email.
fn validate_request(request: &GenerateRequest) -> Result<(), AppError> {
    let required = [
        ("job.jobDescription", &request.job.job_description),
        ("job.jobTitle", &request.job.job_title),
        ("candidate.name", &request.candidate.name),
        ("candidate.email", &request.candidate.email),
    ];

    let missing: Vec<&str> = required
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}

async fn call_with_timeout(
    client: &dyn GenerationClient,
    prompt: &str,
    settings: &GenerationSettings,
) -> Result<String, LlmError> {
    tokio::time::timeout(settings.timeout, client.generate(prompt, &settings.params))
        .await
        .unwrap_or_else(|_| Err(LlmError::Timeout(settings.timeout.as_secs())))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
