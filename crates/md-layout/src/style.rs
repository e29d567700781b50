//! Font lookup for every kind of text the layout draws
//!
//! One table maps (`TextRole`, `SpanStyle`) to a standard font so headings,
//! body text and table cells stay consistent.

use md_text::{SpanStyle, TextMeasure};
use pdf_core::StandardFont;

/// What a piece of text is, which fixes its size and base weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextRole {
    /// H1, centered document title
    Title,
    /// H2 section heading
    Section,
    /// H3 sub-heading
    Subsection,
    /// Paragraphs and list items
    Body,
    TableHeader,
    TableCell,
}

use pdf_core::StandardFont::{
    Courier, Helvetica, HelveticaBold, HelveticaBoldOblique, HelveticaOblique,
};

/// Fonts indexed by `SpanStyle` in declaration order: plain, bold, italic, code
const REGULAR_FACES: [StandardFont; 4] = [Helvetica, HelveticaBold, HelveticaOblique, Courier];
const BOLD_FACES: [StandardFont; 4] = [HelveticaBold, HelveticaBold, HelveticaBoldOblique, Courier];

impl TextRole {
    pub fn font_size(self) -> f64 {
        match self {
            TextRole::Title => 24.0,
            TextRole::Section => 14.0,
            TextRole::Subsection => 12.0,
            TextRole::Body => 11.0,
            TextRole::TableHeader => 10.0,
            TextRole::TableCell => 9.0,
        }
    }

    /// Baseline-to-baseline distance
    pub fn line_height(self) -> f64 {
        match self {
            TextRole::Title => 30.0,
            TextRole::Section => 18.0,
            TextRole::Subsection => 16.0,
            TextRole::Body => 15.0,
            TextRole::TableHeader | TextRole::TableCell => 12.0,
        }
    }

    pub fn font(self, style: SpanStyle) -> StandardFont {
        let faces = match self {
            TextRole::Title | TextRole::Section | TextRole::Subsection | TextRole::TableHeader => {
                &BOLD_FACES
            }
            TextRole::Body | TextRole::TableCell => &REGULAR_FACES,
        };
        let index = match style {
            SpanStyle::Plain => 0,
            SpanStyle::Bold => 1,
            SpanStyle::Italic => 2,
            SpanStyle::Code => 3,
        };
        faces[index]
    }
}

/// Measures spans with the real glyph widths of a role's fonts
#[derive(Debug, Clone, Copy)]
pub struct RoleMeasure(pub TextRole);

impl TextMeasure for RoleMeasure {
    fn measure(&self, text: &str, style: SpanStyle, font_size: f64) -> f64 {
        self.0.font(style).text_width(text, font_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_font_table() {
        assert_eq!(TextRole::Body.font(SpanStyle::Plain), Helvetica);
        assert_eq!(TextRole::Body.font(SpanStyle::Bold), HelveticaBold);
        assert_eq!(TextRole::TableCell.font(SpanStyle::Italic), HelveticaOblique);
        assert_eq!(TextRole::TableHeader.font(SpanStyle::Plain), HelveticaBold);
        assert_eq!(TextRole::Title.font(SpanStyle::Italic), HelveticaBoldOblique);
        assert_eq!(TextRole::Section.font(SpanStyle::Code), Courier);
    }

    #[test]
    fn test_measure_uses_style_font() {
        let measure = RoleMeasure(TextRole::Body);
        let plain = measure.measure("Rust", SpanStyle::Plain, 11.0);
        let bold = measure.measure("Rust", SpanStyle::Bold, 11.0);
        let code = measure.measure("Rust", SpanStyle::Code, 11.0);
        assert!(bold > plain);
        assert!((code - 4.0 * 0.6 * 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_line_height_exceeds_font_size() {
        for role in [
            TextRole::Title,
            TextRole::Section,
            TextRole::Subsection,
            TextRole::Body,
            TextRole::TableHeader,
            TextRole::TableCell,
        ] {
            assert!(role.line_height() > role.font_size());
        }
    }
}
