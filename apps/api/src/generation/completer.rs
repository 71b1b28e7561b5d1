//! Resume completion: merges recovered model output with the candidate profile
//! and canned defaults into a schema-complete `GeneratedResume`.
//!
//! Every field is resolved independently through the same three tiers:
//! model output, then candidate profile, then a deterministic canned value.
//! Contact details always come from the candidate.
//!
//! `complete` is a pure function of its inputs. Generation metadata (which
//! carries a timestamp) is attached later by the pipeline.

use crate::models::profile::{
    CandidateProfile, Certification, Education, JobPosting, Project, WorkExperience,
};
use crate::models::resume::{ContactInformation, GeneratedResume, RecoveredResume, Skills};

/// Stand-in technologies used when the candidate lists no technical skills.
pub const GENERIC_TECHNOLOGIES: &[&str] = &[
    "JavaScript",
    "Python",
    "SQL",
    "Git",
    "Cloud Platforms",
];

pub const GENERIC_SOFT_SKILLS: &[&str] = &[
    "Communication",
    "Problem Solving",
    "Teamwork",
    "Adaptability",
    "Time Management",
];

pub const DEFAULT_LANGUAGES: &[&str] = &["English (Native)"];

pub const DEFAULT_ACHIEVEMENTS: &[&str] = &[
    "Consistently delivered projects on time and within scope",
    "Improved team productivity by 20% through process optimization",
    "Recognized for excellence in cross-functional collaboration",
];

// ────────────────────────────────────────────────────────────────────────────
// Tier combinator
// ────────────────────────────────────────────────────────────────────────────

/// Whether a value carries usable content.
pub trait Fillable {
    fn is_filled(&self) -> bool;
}

impl Fillable for String {
    fn is_filled(&self) -> bool {
        !self.trim().is_empty()
    }
}

impl<T> Fillable for Vec<T> {
    fn is_filled(&self) -> bool {
        !self.is_empty()
    }
}

/// Returns the first filled value among `tiers`, or the canned fallback.
pub fn first_filled<T: Fillable>(
    tiers: impl IntoIterator<Item = Option<T>>,
    canned: impl FnOnce() -> T,
) -> T {
    tiers
        .into_iter()
        .flatten()
        .find(|value| value.is_filled())
        .unwrap_or_else(canned)
}

// ────────────────────────────────────────────────────────────────────────────
// Completion
// ────────────────────────────────────────────────────────────────────────────

/// Builds a schema-complete resume. Never fails.
pub fn complete(
    recovered: &RecoveredResume,
    candidate: &CandidateProfile,
    job: &JobPosting,
) -> GeneratedResume {
    let recovered_skills = recovered.skills.clone().unwrap_or_default();

    let technical = first_filled(
        [recovered_skills.technical, Some(candidate.technical_skills.clone())],
        || to_strings(GENERIC_TECHNOLOGIES),
    );
    let soft = first_filled(
        [recovered_skills.soft, Some(candidate.soft_skills.clone())],
        || to_strings(GENERIC_SOFT_SKILLS),
    );

    let summary = first_filled([recovered.summary.clone()], || {
        canned_summary(candidate, job, &technical, &soft)
    });

    let work_experience = first_filled(
        [
            recovered.work_experience.clone(),
            Some(candidate.work_experience.clone()),
        ],
        || vec![canned_work_experience(job, &technical)],
    );
    let education = first_filled(
        [recovered.education.clone(), Some(candidate.education.clone())],
        || vec![canned_education()],
    );
    let certifications = first_filled(
        [
            recovered.certifications.clone(),
            Some(candidate.certifications.clone()),
        ],
        || vec![canned_certification(candidate)],
    );
    let projects = first_filled(
        [recovered.projects.clone(), Some(candidate.projects.clone())],
        || vec![canned_project(&technical)],
    );
    let languages = first_filled(
        [recovered.languages.clone(), Some(candidate.languages.clone())],
        || to_strings(DEFAULT_LANGUAGES),
    );
    let achievements = first_filled(
        [
            recovered.achievements.clone(),
            Some(candidate.achievements.clone()),
        ],
        || to_strings(DEFAULT_ACHIEVEMENTS),
    );

    GeneratedResume {
        summary,
        work_experience,
        skills: Skills { technical, soft },
        education,
        certifications,
        projects,
        contact_information: contact_from(candidate),
        languages,
        achievements,
        metadata: None,
    }
}

/// Contact details are never taken from the model.
fn contact_from(candidate: &CandidateProfile) -> ContactInformation {
    ContactInformation {
        name: candidate.name.clone(),
        email: candidate.email.clone(),
        phone: candidate.phone.clone().unwrap_or_default(),
        linkedin: candidate.linkedin.clone().unwrap_or_default(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Canned defaults
// ────────────────────────────────────────────────────────────────────────────

fn canned_summary(
    candidate: &CandidateProfile,
    job: &JobPosting,
    technical: &[String],
    soft: &[String],
) -> String {
    let level = match candidate.experience_level.trim() {
        "" => "Experienced".to_string(),
        level => capitalize(level),
    };
    let title = match job.title.trim() {
        "" => "professional",
        title => title,
    };
    let industry = match candidate.target_industry.trim() {
        "" => String::new(),
        industry => format!(" in the {industry} industry"),
    };

    format!(
        "{level} {title} with proven expertise in {}, combining strong {} skills to deliver measurable results{industry}.",
        join_natural(&technical[..technical.len().min(3)]),
        join_natural(&soft[..soft.len().min(2)]).to_lowercase(),
    )
}

fn canned_work_experience(job: &JobPosting, technical: &[String]) -> WorkExperience {
    let technologies: Vec<String> = technical.iter().take(5).cloned().collect();
    let title = match job.title.trim() {
        "" => "Software Professional",
        title => title,
    };

    WorkExperience {
        job_title: title.to_string(),
        company: "Technology Solutions Inc.".to_string(),
        start_date: "2021-01".to_string(),
        end_date: "Present".to_string(),
        description: format!(
            "Designed, built and maintained production systems using {}.",
            join_natural(&technologies)
        ),
        achievements: vec![
            "Increased system performance by 30% through targeted optimizations".to_string(),
            "Reduced deployment time by 40% by automating release workflows".to_string(),
            "Mentored 3 junior team members and standardized code review practices".to_string(),
        ],
        technologies,
    }
}

fn canned_education() -> Education {
    Education {
        degree: "Bachelor of Science in Computer Science".to_string(),
        institution: "State University".to_string(),
        graduation_date: "2020".to_string(),
        gpa: None,
        relevant_coursework: to_strings(&[
            "Data Structures",
            "Algorithms",
            "Software Engineering",
        ]),
    }
}

fn canned_certification(candidate: &CandidateProfile) -> Certification {
    let name = match candidate.target_industry.trim() {
        "" => "Professional Development Certificate".to_string(),
        industry => format!("{industry} Professional Certificate"),
    };
    Certification {
        name,
        issuer: "Professional Certification Board".to_string(),
        date: "2023".to_string(),
        expiry_date: None,
        credential_id: None,
    }
}

fn canned_project(technical: &[String]) -> Project {
    let technologies: Vec<String> = technical.iter().take(4).cloned().collect();
    Project {
        name: "Portfolio Application".to_string(),
        description: format!(
            "End-to-end application showcasing {}.",
            join_natural(&technologies)
        ),
        technologies,
        link: None,
        achievements: vec![
            "Implemented automated testing with 90% code coverage".to_string(),
            "Deployed with a CI/CD pipeline for zero-downtime releases".to_string(),
        ],
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// "a", "a and b", "a, b and c".
fn join_natural(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
