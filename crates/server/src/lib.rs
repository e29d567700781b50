//! CV optimizer service
//!
//! `POST /api/process-cv` takes a PDF CV and a job offer, asks Gemini for a
//! tailored markdown CV and answers with the rendered PDF.

pub mod config;
pub mod errors;
pub mod extract;
pub mod llm_client;
pub mod routes;
pub mod state;

pub use config::{Config, PageFormat};
pub use errors::AppError;
pub use extract::{ExtractError, LopdfExtractor, TextExtractor};
pub use llm_client::{GeminiClient, LlmError, Rewriter};
pub use routes::build_router;
pub use state::AppState;
