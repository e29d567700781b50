//! Plain-text extraction from uploaded CVs

use lopdf::Document;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Could not read PDF: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("PDF has no pages")]
    NoPages,
}

/// Turns an uploaded document into text for the rewriting prompt
pub trait TextExtractor: Send + Sync {
    fn extract(&self, pdf: &[u8]) -> Result<String, ExtractError>;
}

/// Extracts the text of every page with lopdf
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfExtractor;

impl TextExtractor for LopdfExtractor {
    fn extract(&self, pdf: &[u8]) -> Result<String, ExtractError> {
        let doc = Document::load_mem(pdf)?;
        let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
        if pages.is_empty() {
            return Err(ExtractError::NoPages);
        }

        let text = doc.extract_text(&pages)?;
        if text.trim().is_empty() {
            warn!(pages = pages.len(), "PDF contains no extractable text");
        }
        debug!(pages = pages.len(), chars = text.len(), "extracted CV text");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use md_layout::{render_markdown, LayoutConfig};

    #[test]
    fn test_extracts_rendered_text() {
        let pdf = render_markdown("# Jane Doe\n\nRust developer", &LayoutConfig::default()).unwrap();
        let text = LopdfExtractor.extract(&pdf).unwrap();
        assert!(text.contains("Jane"));
        assert!(text.contains("Rust"));
    }

    #[test]
    fn test_rejects_non_pdf() {
        let err = LopdfExtractor.extract(b"not a pdf").unwrap_err();
        assert!(matches!(err, ExtractError::Pdf(_)));
    }
}
