use std::sync::Arc;

use crate::corpus::Corpus;
use crate::llm_client::ProviderRegistry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Loaded once in `main`; never mutated afterwards.
    pub corpus: Arc<Corpus>,
    pub providers: Arc<ProviderRegistry>,
}
