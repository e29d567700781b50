//! Markdown text processing
//!
//! This crate provides the text side of CV rendering:
//! - Inline segmentation of `**bold**`, `*italic*` and `` `code` `` runs
//! - Width-bounded word wrapping across styled spans
//! - Stripping of markdown code fences from model output
//!
//! Rendering itself lives in `md-layout`; everything here is pure string work.
//!
//! # Example
//!
//! ```
//! use md_text::{segment, SpanStyle};
//!
//! let spans = segment("Led **12** engineers");
//! assert_eq!(spans[1].text, "12");
//! assert_eq!(spans[1].style, SpanStyle::Bold);
//! ```

mod fence;
mod inline;
mod wrap;

pub use fence::strip_code_fences;
pub use inline::{check_markup, plain_text, segment, SpanStyle, StyledSpan};
pub use wrap::{line_count, wrap_spans, TextMeasure, WrappedLine};

use thiserror::Error;

/// Errors reported when inline markup is not well formed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    #[error("Unbalanced bold marker in: {0}")]
    UnbalancedBold(String),

    #[error("Unbalanced italic marker in: {0}")]
    UnbalancedItalic(String),

    #[error("Unbalanced code marker in: {0}")]
    UnbalancedCode(String),
}

/// Result type for markup checks
pub type Result<T> = std::result::Result<T, MarkupError>;
