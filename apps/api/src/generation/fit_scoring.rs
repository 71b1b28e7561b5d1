//! Fit Scoring: pluggable, trait-based scorer that measures a resume against a job description.
//!
//! Default: `KeywordFitScorer` (pure-Rust, fast, deterministic, fully testable).
//!
//! `AppState` holds an `Arc<dyn FitScorer>`, so backends can be swapped at startup.

use crate::generation::keywords::extract_keywords;
use crate::models::resume::{FitScore, GeneratedResume};

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The fit scorer trait. Implement this to swap backends without touching
/// the pipeline, handlers, or caller code.
pub trait FitScorer: Send + Sync {
    fn score(&self, resume: &GeneratedResume, job_description: &str) -> FitScore;
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordFitScorer
// ────────────────────────────────────────────────────────────────────────────

/// Keyword coverage scorer. No model call.
///
/// Algorithm:
/// 1. Extract keywords from the job description (same extractor as generation)
/// 2. A keyword matches when it occurs, case-insensitively, as a substring of
///    the summary, work history (descriptions, achievements, technologies) or skills
/// 3. score = round(100 × matched / total), 0 when there are no keywords
pub struct KeywordFitScorer;

impl FitScorer for KeywordFitScorer {
    fn score(&self, resume: &GeneratedResume, job_description: &str) -> FitScore {
        compute_keyword_fit(resume, job_description)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core keyword fit algorithm
// ────────────────────────────────────────────────────────────────────────────

fn compute_keyword_fit(resume: &GeneratedResume, job_description: &str) -> FitScore {
    let keywords = extract_keywords(job_description, "");

    if keywords.is_empty() {
        return FitScore {
            score: 0,
            matched_keywords: vec![],
            missing_keywords: vec![],
            recommendation: "No keywords found in the job description; cannot score fit."
                .to_string(),
            scorer_backend: "keyword".to_string(),
        };
    }

    let haystack = searchable_text(resume);
    let (matched_keywords, missing_keywords): (Vec<String>, Vec<String>) = keywords
        .into_iter()
        .partition(|kw| haystack.contains(kw.as_str()));

    let total = matched_keywords.len() + missing_keywords.len();
    let ratio = matched_keywords.len() as f64 / total as f64;
    let score = (ratio * 100.0).round().clamp(0.0, 100.0) as u32;

    let recommendation = build_recommendation(score, &missing_keywords);

    FitScore {
        score,
        matched_keywords,
        missing_keywords,
        recommendation,
        scorer_backend: "keyword".to_string(),
    }
}

/// Lowercased concatenation of every section the scorer searches.
fn searchable_text(resume: &GeneratedResume) -> String {
    let mut parts: Vec<&str> = vec![resume.summary.as_str()];
    for role in &resume.work_experience {
        parts.push(&role.description);
        parts.extend(role.achievements.iter().map(String::as_str));
        parts.extend(role.technologies.iter().map(String::as_str));
    }
    parts.extend(resume.skills.technical.iter().map(String::as_str));
    parts.extend(resume.skills.soft.iter().map(String::as_str));
    parts.join("\n").to_lowercase()
}

/// Builds a human-readable recommendation string from score and missing keywords.
fn build_recommendation(score: u32, missing: &[String]) -> String {
    let top_gaps: Vec<&str> = missing.iter().take(3).map(String::as_str).collect();

    if score >= 80 {
        "Strong fit. The resume covers the key terms of the job description.".to_string()
    } else if score >= 60 {
        format!(
            "Moderate fit ({score}/100). Consider highlighting: {}.",
            top_gaps.join(", ")
        )
    } else {
        format!(
            "Low fit ({score}/100). Significant gaps: {}. Consider tailoring the resume further.",
            top_gaps.join(", ")
        )
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::WorkExperience;
    use crate::models::resume::{ContactInformation, Skills};

    const JD: &str = "Python developer with Docker and Kubernetes experience";

    fn make_resume(summary: &str) -> GeneratedResume {
        GeneratedResume {
            summary: summary.to_string(),
            work_experience: vec![WorkExperience::default()],
            skills: Skills::default(),
            education: vec![],
            certifications: vec![],
            projects: vec![],
            contact_information: ContactInformation::default(),
            languages: vec![],
            achievements: vec![],
            metadata: None,
        }
    }

    #[test]
    fn test_summary_containing_every_keyword_scores_100() {
        let keywords = extract_keywords(JD, "");
        let resume = make_resume(&keywords.join(" "));
        let fit = KeywordFitScorer.score(&resume, JD);
        assert_eq!(fit.score, 100);
        assert!(fit.missing_keywords.is_empty());
        assert_eq!(fit.matched_keywords, keywords);
    }

    #[test]
    fn test_empty_job_description_scores_zero() {
        let fit = KeywordFitScorer.score(&make_resume("anything at all"), "");
        assert_eq!(fit.score, 0);
        assert!(fit.matched_keywords.is_empty());
        assert!(fit.missing_keywords.is_empty());
    }

    #[test]
    fn test_partial_match_rounds_to_nearest() {
        // Keywords: python, docker, kubernetes, developer, experience
        let resume = make_resume("Shipped Python services");
        let fit = KeywordFitScorer.score(&resume, JD);
        assert_eq!(fit.matched_keywords, vec!["python".to_string()]);
        assert_eq!(fit.missing_keywords.len(), 4);
        assert_eq!(fit.score, 20);
    }

    #[test]
    fn test_matching_is_case_insensitive_substring() {
        let mut resume = make_resume("");
        resume.skills.technical = vec!["DOCKERFILE authoring".to_string()];
        let fit = KeywordFitScorer.score(&resume, "docker");
        assert_eq!(fit.score, 100);
    }

    #[test]
    fn test_work_history_sections_are_searched() {
        let mut resume = make_resume("");
        resume.work_experience = vec![WorkExperience {
            description: "Ran clusters".to_string(),
            achievements: vec!["Cut Kubernetes spend".to_string()],
            technologies: vec!["Docker".to_string()],
            ..Default::default()
        }];
        let fit = KeywordFitScorer.score(&resume, "kubernetes docker");
        assert_eq!(fit.score, 100);
    }

    #[test]
    fn test_education_is_not_searched() {
        let mut resume = make_resume("");
        resume.education = vec![crate::models::profile::Education {
            degree: "Kubernetes Studies".to_string(),
            ..Default::default()
        }];
        let fit = KeywordFitScorer.score(&resume, "kubernetes");
        assert_eq!(fit.score, 0);
    }

    #[test]
    fn test_score_bounded_0_to_100() {
        for summary in ["", "python", "python docker kubernetes developer experience"] {
            let fit = KeywordFitScorer.score(&make_resume(summary), JD);
            assert!(fit.score <= 100);
        }
    }

    #[test]
    fn test_scorer_backend_label_is_keyword() {
        let fit = KeywordFitScorer.score(&make_resume(""), JD);
        assert_eq!(fit.scorer_backend, "keyword");
    }

    #[test]
    fn test_recommendation_high_score() {
        assert!(build_recommendation(85, &[]).contains("Strong fit"));
    }

    #[test]
    fn test_recommendation_moderate_score_lists_gaps() {
        let rec = build_recommendation(65, &["kafka".to_string()]);
        assert!(rec.contains("kafka"));
        assert!(rec.contains("65"));
    }

    #[test]
    fn test_recommendation_low_score_lists_at_most_three_gaps() {
        let missing: Vec<String> = ["rust", "go", "zig", "nim"].iter().map(|s| s.to_string()).collect();
        let rec = build_recommendation(30, &missing);
        assert!(rec.contains("30"));
        assert!(rec.contains("zig"));
        assert!(!rec.contains("nim"));
    }
}
