// Shared prompt fragments.
// Each service that needs model calls defines its own prompts.rs alongside it.
// This file contains cross-cutting fragments.

/// Instruction that enforces JSON-only output.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction that keeps the model from inventing credentials or contact details.
pub const GROUNDING_INSTRUCTION: &str = "Base every entry on the candidate data provided. \
    Rephrase and emphasize, but do NOT invent employers, degrees, certifications, \
    dates or contact details that are not present in the candidate data.";
