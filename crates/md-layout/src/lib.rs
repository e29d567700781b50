//! Markdown layout engine - renders CV markdown to paginated PDF
//!
//! This crate provides:
//! - Page geometry and palette configuration
//! - Line classification (headings, lists, rules, tables, paragraphs)
//! - Pipe table parsing and paginated table rendering
//! - The block layout pass that drives `pdf-core`
//!
//! # Example
//!
//! ```ignore
//! use md_layout::{render_markdown, LayoutConfig};
//!
//! let pdf_bytes = render_markdown("# Jane Doe\n\n## Experience\n- Led team of 5", &LayoutConfig::default())?;
//! ```

pub mod blocks;
mod canvas;
mod config;
mod cursor;
mod renderer;
pub mod style;
pub mod table;

pub use blocks::{classify_line, Block};
pub use config::{LayoutConfig, Palette, Rgb};
pub use cursor::Cursor;
pub use renderer::{render_markdown, MarkdownRenderer};
pub use style::{RoleMeasure, TextRole};
pub use table::{is_table_line, TableModel};

use thiserror::Error;

/// Errors that can occur during layout
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Invalid layout config: {0}")]
    InvalidConfig(String),

    #[error("PDF error: {0}")]
    PdfError(#[from] pdf_core::PdfError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type for layout operations
pub type Result<T> = std::result::Result<T, LayoutError>;
