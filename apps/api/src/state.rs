use std::sync::Arc;

use crate::generation::fit_scoring::FitScorer;
use crate::generation::generator::GenerationSettings;
use crate::llm_client::GenerationClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no API key is configured; generate requests then fail fast.
    pub generation: Option<Arc<dyn GenerationClient>>,
    /// Pluggable fit scorer. Default: KeywordFitScorer.
    pub fit_scorer: Arc<dyn FitScorer>,
    pub settings: GenerationSettings,
}
