use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::profile::{Certification, Education, Project, WorkExperience};

/// Partial resume recovered from model output. Every field is optional.
///
/// Ephemeral: only `ResumeCompleter` consumes it, and it is never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveredResume {
    pub summary: Option<String>,
    pub work_experience: Option<Vec<WorkExperience>>,
    pub skills: Option<RecoveredSkills>,
    pub education: Option<Vec<Education>>,
    pub certifications: Option<Vec<Certification>>,
    pub projects: Option<Vec<Project>>,
    pub contact_information: Option<ContactInformation>,
    pub languages: Option<Vec<String>>,
    pub achievements: Option<Vec<String>>,
}

impl RecoveredResume {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecoveredSkills {
    pub technical: Option<Vec<String>>,
    pub soft: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skills {
    pub technical: Vec<String>,
    pub soft: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInformation {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationMetadata {
    pub job_title: String,
    pub company: Option<String>,
    pub generated_at: DateTime<Utc>,
    pub model: String,
}

/// Schema-complete resume. Every sequence field holds at least one entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedResume {
    pub summary: String,
    pub work_experience: Vec<WorkExperience>,
    pub skills: Skills,
    pub education: Vec<Education>,
    pub certifications: Vec<Certification>,
    pub projects: Vec<Project>,
    pub contact_information: ContactInformation,
    pub languages: Vec<String>,
    pub achievements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<GenerationMetadata>,
}

impl GeneratedResume {
    /// True when every sequence field, including both skill lists, is non-empty.
    pub fn has_no_empty_sequences(&self) -> bool {
        !self.work_experience.is_empty()
            && !self.skills.technical.is_empty()
            && !self.skills.soft.is_empty()
            && !self.education.is_empty()
            && !self.certifications.is_empty()
            && !self.projects.is_empty()
            && !self.languages.is_empty()
            && !self.achievements.is_empty()
    }
}

/// Job-fit score in [0, 100] with the keyword breakdown behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitScore {
    pub score: u32,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub recommendation: String,
    pub scorer_backend: String,
}
