use std::sync::Arc;

use md_layout::LayoutConfig;

use crate::extract::TextExtractor;
use crate::llm_client::Rewriter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<dyn TextExtractor>,
    /// `None` until GEMINI_API_KEY is configured; requests then fail with 500.
    pub rewriter: Option<Arc<dyn Rewriter>>,
    /// Page geometry and palette for every rendered CV
    pub layout: LayoutConfig,
}
