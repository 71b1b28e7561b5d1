//! Response recovery: coerces untrusted model text into a partial resume.
//!
//! Ordered fallback chain, each stage tried only if the previous one failed:
//! 1. parse the raw text as a JSON object
//! 2. strip markdown code fences and parse again
//! 3. parse the greedy `{ ... }` block (first `{` to last `}`)
//! 4. give up and return an empty `RecoveredResume`
//!
//! `recover` never fails. A failed parse is an expected outcome here.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::models::resume::{RecoveredResume, RecoveredSkills};

static BRACE_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("brace block pattern is valid"));

/// Which stage produced the recovered object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryStage {
    Direct,
    Fenced,
    BraceBlock,
    Empty,
}

/// Recovers a partial resume from raw model output.
pub fn recover(raw_text: &str) -> RecoveredResume {
    let (recovered, stage) = recover_with_stage(raw_text);
    debug!("Recovered model output via {:?} stage", stage);
    recovered
}

/// Like [`recover`], but also reports the stage that succeeded.
pub fn recover_with_stage(raw_text: &str) -> (RecoveredResume, RecoveryStage) {
    if raw_text.trim().is_empty() {
        debug!("Model returned no text; recovering to empty resume");
        return (RecoveredResume::default(), RecoveryStage::Empty);
    }

    if let Some(object) = parse_object(raw_text) {
        return (from_object(&object), RecoveryStage::Direct);
    }

    if let Some(object) = strip_json_fences(raw_text).and_then(parse_object) {
        return (from_object(&object), RecoveryStage::Fenced);
    }

    if let Some(object) = BRACE_BLOCK_RE
        .find(raw_text)
        .and_then(|m| parse_object(m.as_str()))
    {
        return (from_object(&object), RecoveryStage::BraceBlock);
    }

    warn!(
        "Could not recover JSON from model output ({} chars); continuing with empty resume",
        raw_text.len()
    );
    (RecoveredResume::default(), RecoveryStage::Empty)
}

/// Parses `text` as JSON, accepting only objects.
fn parse_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text.trim()) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Returns the body of a ```json ... ``` or ``` ... ``` fence, if the text is fenced.
fn strip_json_fences(text: &str) -> Option<&str> {
    let text = text.trim();
    let inner = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))?
        .trim_start();
    Some(inner.strip_suffix("```").map(str::trim).unwrap_or(inner))
}

/// Decodes each known field independently; a mistyped field is dropped, not fatal.
fn from_object(object: &Map<String, Value>) -> RecoveredResume {
    RecoveredResume {
        summary: field(object, "summary"),
        work_experience: entries(object, "workExperience"),
        skills: object.get("skills").and_then(|v| v.as_object()).map(|skills| RecoveredSkills {
            technical: field(skills, "technical"),
            soft: field(skills, "soft"),
        }),
        education: entries(object, "education"),
        certifications: entries(object, "certifications"),
        projects: entries(object, "projects"),
        contact_information: field(object, "contactInformation"),
        languages: field(object, "languages"),
        achievements: field(object, "achievements"),
    }
}

/// Decodes an array of entries one element at a time, skipping only the bad ones.
fn entries<T: DeserializeOwned>(object: &Map<String, Value>, key: &str) -> Option<Vec<T>> {
    let Some(items) = object.get(key)?.as_array() else {
        debug!("Dropping malformed field '{key}': not an array");
        return None;
    };
    let decoded = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item.clone()) {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("Dropping malformed '{key}' entry {index}: {e}");
                None
            }
        })
        .collect();
    Some(decoded)
}

fn field<T: DeserializeOwned>(object: &Map<String, Value>, key: &str) -> Option<T> {
    let value = object.get(key)?;
    match serde_json::from_value(value.clone()) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            debug!("Dropping malformed field '{key}': {e}");
            None
        }
    }
}
