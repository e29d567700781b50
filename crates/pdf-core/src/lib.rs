//! PDF Core - Low-level PDF writing
//!
//! This crate provides functionality for:
//! - Creating PDF documents page by page
//! - Placing text with the standard Helvetica/Courier fonts
//! - Measuring text with the fonts' real glyph widths
//! - Drawing filled/stroked rectangles and lines
//!
//! # Example
//!
//! ```ignore
//! use pdf_core::{Align, PageSize, PdfDocument, StandardFont};
//!
//! let mut doc = PdfDocument::new(PageSize::A4)?;
//! doc.set_font(StandardFont::HelveticaBold, 24.0);
//! doc.insert_text("Jane Doe", 1, 297.64, 80.0, Align::Center)?;
//! let bytes = doc.to_bytes()?;
//! ```

mod document;
mod font;
mod graphics;
mod text;

pub use document::{Color, PageSize, PdfDocument};
pub use font::{decode_win_ansi, encode_text_hex, encode_win_ansi, to_win_ansi, StandardFont};
pub use graphics::{generate_line_operators, generate_rect_operators, RectStyle};
pub use text::TextRun;

use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Invalid page number: {0} (document has {1} pages)")]
    InvalidPage(usize, usize),

    #[error("Invalid page size: {0} x {1}")]
    InvalidPageSize(f64, f64),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Text alignment options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_default() {
        assert_eq!(Align::default(), Align::Left);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            PdfError::InvalidPage(3, 2).to_string(),
            "Invalid page number: 3 (document has 2 pages)"
        );
    }
}
