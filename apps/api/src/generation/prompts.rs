//! Prompt composition for resume generation.
//!
//! The output schema contract is spelled out in the prompt text. It is advisory
//! only, which is why every response still goes through `recovery`.

use crate::llm_client::prompts::{GROUNDING_INSTRUCTION, JSON_ONLY_INSTRUCTION};
use crate::models::profile::{CandidateProfile, JobPosting};

/// Job descriptions are clipped to this many characters to bound prompt size.
pub const MAX_DESCRIPTION_CHARS: usize = 1200;
/// Number of extracted keywords surfaced to the model as hints.
pub const MAX_KEYWORD_HINTS: usize = 10;

/// Resume generation prompt template.
/// Replace: {candidate_block}, {target_block}, {job_description}, {keywords},
///          {history_block}, {json_only_instruction}, {grounding_instruction}
pub const RESUME_PROMPT_TEMPLATE: &str = r#"You are an expert resume writer specializing in ATS-optimized resumes.
Write a tailored resume for the candidate below, aimed at the target role.

CANDIDATE:
{candidate_block}

TARGET ROLE:
{target_block}

JOB DESCRIPTION:
{job_description}

KEY TERMS TO INCORPORATE NATURALLY:
{keywords}

CANDIDATE BACKGROUND:
{history_block}

{grounding_instruction}

Return a JSON object with this EXACT schema (no extra fields):
{
  "summary": "2-3 sentence professional summary tailored to the role",
  "workExperience": [
    {
      "jobTitle": "string",
      "company": "string",
      "startDate": "string",
      "endDate": "string",
      "description": "string",
      "achievements": ["quantified achievement"],
      "technologies": ["string"]
    }
  ],
  "skills": {
    "technical": ["string"],
    "soft": ["string"]
  },
  "education": [
    {
      "degree": "string",
      "institution": "string",
      "graduationDate": "string",
      "gpa": "string or null",
      "relevantCoursework": ["string"]
    }
  ],
  "certifications": [
    {
      "name": "string",
      "issuer": "string",
      "date": "string",
      "expiryDate": "string or null",
      "credentialId": "string or null"
    }
  ],
  "projects": [
    {
      "name": "string",
      "description": "string",
      "technologies": ["string"],
      "link": "string or null",
      "achievements": ["string"]
    }
  ],
  "contactInformation": {
    "name": "string",
    "email": "string",
    "phone": "string",
    "linkedin": "string"
  },
  "languages": ["string"],
  "achievements": ["string"]
}

{json_only_instruction}"#;

/// Builds the single generation request for a job/candidate pair.
pub fn compose_prompt(job: &JobPosting, candidate: &CandidateProfile, keywords: &[String]) -> String {
    let keyword_hints = keywords
        .iter()
        .take(MAX_KEYWORD_HINTS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    RESUME_PROMPT_TEMPLATE
        .replace("{candidate_block}", &render_candidate(candidate))
        .replace("{target_block}", &render_target(job, candidate))
        .replace("{keywords}", or_none(&keyword_hints))
        .replace("{history_block}", &render_history(candidate))
        .replace("{grounding_instruction}", GROUNDING_INSTRUCTION)
        .replace("{json_only_instruction}", JSON_ONLY_INSTRUCTION)
        // Last, so placeholder-like text inside the description is never expanded.
        .replace("{job_description}", &clip_description(&job.description))
}

/// First [`MAX_DESCRIPTION_CHARS`] characters of the description.
pub fn clip_description(description: &str) -> String {
    description.chars().take(MAX_DESCRIPTION_CHARS).collect()
}

fn render_candidate(candidate: &CandidateProfile) -> String {
    [
        format!("Name: {}", candidate.name),
        format!("Email: {}", candidate.email),
        format!("Phone: {}", or_none(candidate.phone.as_deref().unwrap_or_default())),
        format!("LinkedIn: {}", or_none(candidate.linkedin.as_deref().unwrap_or_default())),
        format!("Experience level: {}", or_none(&candidate.experience_level)),
    ]
    .join("\n")
}

fn render_target(job: &JobPosting, candidate: &CandidateProfile) -> String {
    [
        format!("Title: {}", job.title),
        format!("Company: {}", or_none(job.company.as_deref().unwrap_or_default())),
        format!("Location: {}", or_none(job.location.as_deref().unwrap_or_default())),
        format!("Industry: {}", or_none(&candidate.target_industry)),
        format!("Tone: {}", or_default_tone(&candidate.tone)),
    ]
    .join("\n")
}

fn render_history(candidate: &CandidateProfile) -> String {
    let mut sections = Vec::new();

    let work = candidate
        .work_experience
        .iter()
        .map(|w| {
            format!(
                "- {} at {} ({} - {})\n  Description: {}\n  Achievements: {}\n  Technologies: {}",
                w.job_title,
                w.company,
                w.start_date,
                w.end_date,
                w.description,
                join_or_none(&w.achievements, "; "),
                join_or_none(&w.technologies, ", "),
            )
        })
        .collect::<Vec<_>>();
    sections.push(labeled("Work experience", &work));

    sections.push(format!(
        "Technical skills: {}",
        join_or_none(&candidate.technical_skills, ", ")
    ));
    sections.push(format!(
        "Soft skills: {}",
        join_or_none(&candidate.soft_skills, ", ")
    ));

    let education = candidate
        .education
        .iter()
        .map(|e| {
            let gpa = e.gpa.as_deref().map(|g| format!(", GPA {g}")).unwrap_or_default();
            format!(
                "- {}, {} ({}{gpa})\n  Coursework: {}",
                e.degree,
                e.institution,
                e.graduation_date,
                join_or_none(&e.relevant_coursework, ", "),
            )
        })
        .collect::<Vec<_>>();
    sections.push(labeled("Education", &education));

    let certifications = candidate
        .certifications
        .iter()
        .map(|c| {
            let expiry = c.expiry_date.as_deref().map(|d| format!(", expires {d}")).unwrap_or_default();
            format!("- {} from {} ({}{expiry})", c.name, c.issuer, c.date)
        })
        .collect::<Vec<_>>();
    sections.push(labeled("Certifications", &certifications));

    let projects = candidate
        .projects
        .iter()
        .map(|p| {
            format!(
                "- {}: {}\n  Technologies: {}\n  Achievements: {}",
                p.name,
                p.description,
                join_or_none(&p.technologies, ", "),
                join_or_none(&p.achievements, "; "),
            )
        })
        .collect::<Vec<_>>();
    sections.push(labeled("Projects", &projects));

    sections.push(format!("Languages: {}", join_or_none(&candidate.languages, ", ")));
    sections.push(format!(
        "Achievements: {}",
        join_or_none(&candidate.achievements, "; ")
    ));

    sections.join("\n\n")
}

fn labeled(label: &str, lines: &[String]) -> String {
    if lines.is_empty() {
        format!("{label}: none provided")
    } else {
        format!("{label}:\n{}", lines.join("\n"))
    }
}

fn join_or_none(items: &[String], sep: &str) -> String {
    if items.is_empty() {
        "none provided".to_string()
    } else {
        items.join(sep)
    }
}

fn or_none(value: &str) -> &str {
    if value.trim().is_empty() {
        "not provided"
    } else {
        value
    }
}

fn or_default_tone(value: &str) -> &str {
    if value.trim().is_empty() {
        "professional"
    } else {
        value
    }
}
