use std::sync::Arc;

use crate::llm_client::TextGenerator;
use crate::report::orchestrator::GenerationSettings;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no API key is configured; report generation then fails with 500.
    pub generator: Option<Arc<dyn TextGenerator>>,
    pub generation: GenerationSettings,
}
