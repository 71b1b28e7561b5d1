use serde::{Deserialize, Serialize};

use crate::models::lenient;

/// The target role. Caller-supplied per request and never mutated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub company: Option<String>,
}

/// Candidate data as supplied by the profile store. Every collection may be empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CandidateProfile {
    #[serde(alias = "fullName")]
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub tone: String,
    pub target_industry: String,
    pub experience_level: String,
    pub work_experience: Vec<WorkExperience>,
    pub education: Vec<Education>,
    pub certifications: Vec<Certification>,
    pub projects: Vec<Project>,
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub languages: Vec<String>,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkExperience {
    #[serde(deserialize_with = "lenient::string")]
    pub job_title: String,
    #[serde(deserialize_with = "lenient::string")]
    pub company: String,
    #[serde(deserialize_with = "lenient::string")]
    pub start_date: String,
    #[serde(deserialize_with = "lenient::string")]
    pub end_date: String,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(deserialize_with = "lenient::string_list")]
    pub achievements: Vec<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    #[serde(deserialize_with = "lenient::string")]
    pub degree: String,
    #[serde(deserialize_with = "lenient::string")]
    pub institution: String,
    #[serde(deserialize_with = "lenient::string")]
    pub graduation_date: String,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub gpa: Option<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub relevant_coursework: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certification {
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub issuer: String,
    #[serde(deserialize_with = "lenient::string")]
    pub date: String,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub expiry_date: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub credential_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(deserialize_with = "lenient::string_list")]
    pub technologies: Vec<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub link: Option<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub achievements: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_accepts_full_name_alias() {
        let json = r#"{"fullName": "Ada Lovelace", "email": "ada@example.com"}"#;
        let candidate: CandidateProfile = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.name, "Ada Lovelace");
        assert!(candidate.work_experience.is_empty());
        assert!(candidate.phone.is_none());
    }

    #[test]
    fn test_work_experience_missing_members_default_to_empty() {
        let json = r#"{"jobTitle": "Engineer", "technologies": ["Rust"]}"#;
        let entry: WorkExperience = serde_json::from_str(json).unwrap();
        assert_eq!(entry.job_title, "Engineer");
        assert_eq!(entry.company, "");
        assert!(entry.achievements.is_empty());
        assert_eq!(entry.technologies, vec!["Rust".to_string()]);
    }

    #[test]
    fn test_candidate_serializes_camel_case() {
        let candidate = CandidateProfile {
            target_industry: "Fintech".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&candidate).unwrap();
        assert_eq!(value["targetIndustry"], "Fintech");
        assert!(value.get("technicalSkills").is_some());
    }
}
