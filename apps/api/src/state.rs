use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup; nothing here carries per-user data.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable generator. Default: GeminiClient. Tests use a scripted fake.
    pub generator: Arc<dyn TextGenerator>,
    pub config: Config,
}
