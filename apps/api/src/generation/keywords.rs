//! Keyword extraction: derives a ranked, deduplicated term list from a job posting.
//!
//! Pure and deterministic: curated vocabulary matches come first (technical, then
//! action/business terms, in list order), followed by free tokens in text order.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Upper bound on the number of keywords returned.
pub const MAX_KEYWORDS: usize = 15;

/// Languages, platforms, protocols and methodologies. Matched as substrings.
const TECHNICAL_TERMS: &[&str] = &[
    "javascript",
    "typescript",
    "python",
    "java",
    "react",
    "node",
    "angular",
    "vue",
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "sql",
    "nosql",
    "mongodb",
    "postgresql",
    "rest",
    "api",
    "graphql",
    "microservices",
    "agile",
    "scrum",
    "devops",
    "ci/cd",
    "git",
    "machine learning",
    "data analysis",
    "cloud",
    "security",
];

/// Leadership and impact vocabulary. Matched as substrings.
const ACTION_TERMS: &[&str] = &[
    "leadership",
    "management",
    "communication",
    "collaboration",
    "strategy",
    "optimization",
    "innovation",
    "analytics",
    "development",
    "implementation",
    "design",
    "architecture",
    "problem solving",
];

const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "any", "can", "had", "her", "was",
    "one", "our", "out", "has", "have", "with", "this", "that", "from", "they", "will", "would",
    "there", "their", "what", "about", "which", "when", "your", "into", "than", "then", "them",
    "these", "some", "were", "been", "also", "such", "who", "its", "may",
];

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-z]{3,}\b").expect("word pattern is valid"));

/// Extracts up to [`MAX_KEYWORDS`] lowercase keywords from a description/title pair.
///
/// Never fails; an empty or stop-word-only input yields an empty list.
pub fn extract_keywords(description: &str, title: &str) -> Vec<String> {
    let text = format!("{description} {title}").to_lowercase();

    let curated = TECHNICAL_TERMS
        .iter()
        .chain(ACTION_TERMS)
        .filter(|term| text.contains(*term))
        .map(|term| term.to_string());

    let tokens = WORD_RE
        .find_iter(&text)
        .map(|m| m.as_str())
        .filter(|word| !STOP_WORDS.contains(word))
        .map(str::to_string);

    let mut seen = HashSet::new();
    curated
        .chain(tokens)
        .filter(|kw| seen.insert(kw.clone()))
        .take(MAX_KEYWORDS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BACKEND_JD: &str = "We are hiring a backend engineer to build microservices on AWS \
        with Python and Docker. You will own CI/CD pipelines and collaborate on architecture.";

    #[test]
    fn test_curated_terms_come_first_in_list_order() {
        let keywords = extract_keywords(BACKEND_JD, "Backend Engineer");
        assert_eq!(&keywords[..4], &["python", "aws", "docker", "microservices"]);
        assert!(keywords.contains(&"ci/cd".to_string()));
        assert!(keywords.contains(&"architecture".to_string()));
    }

    #[test]
    fn test_stop_words_and_short_tokens_are_dropped() {
        let keywords = extract_keywords("the and for with an to of be hiring", "");
        assert_eq!(keywords, vec!["hiring".to_string()]);
    }

    #[test]
    fn test_short_curated_terms_survive() {
        let keywords = extract_keywords("Strong SQL and GCP background", "");
        assert!(keywords.contains(&"sql".to_string()));
        assert!(keywords.contains(&"gcp".to_string()));
    }

    #[test]
    fn test_no_duplicates() {
        let keywords = extract_keywords("python python python kubernetes python", "Python");
        let unique: HashSet<_> = keywords.iter().collect();
        assert_eq!(unique.len(), keywords.len());
        assert_eq!(keywords[0], "python");
    }

    #[test]
    fn test_capped_at_fifteen() {
        let description = "alpha bravo charlie delta echo foxtrot golf hotel india juliet \
            kilo lima mike november oscar papa quebec romeo sierra tango";
        let keywords = extract_keywords(description, "");
        assert_eq!(keywords.len(), MAX_KEYWORDS);
        assert_eq!(keywords[0], "alpha");
    }

    #[test]
    fn test_deterministic_for_identical_input() {
        let first = extract_keywords(BACKEND_JD, "Backend Engineer");
        let second = extract_keywords(BACKEND_JD, "Backend Engineer");
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input_yields_empty_set() {
        assert!(extract_keywords("", "").is_empty());
    }

    #[test]
    fn test_keywords_are_lowercase() {
        let keywords = extract_keywords("Senior KUBERNETES Platform Engineer", "");
        assert!(keywords.iter().all(|k| k == &k.to_lowercase()));
    }
}
