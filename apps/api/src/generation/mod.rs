// Resume synthesis and repair pipeline.
// Implements: keyword extraction, prompt composition, response recovery,
// field-level completion, fit scoring, and the orchestrating generator.
// All model calls go through llm_client.

pub mod completer;
pub mod fit_scoring;
pub mod generator;
pub mod handlers;
pub mod keywords;
pub mod prompts;
pub mod recovery;
