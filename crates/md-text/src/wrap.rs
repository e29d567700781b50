//! Width-bounded word wrapping over styled spans
//!
//! Words are whitespace-delimited and may cross span boundaries, so
//! `**Go**,` is one unbreakable word made of a bold and a plain fragment.
//! A run of whitespace becomes a single space carrying the style of the span
//! it was found in.

use crate::{SpanStyle, StyledSpan};

/// Measures rendered text width
pub trait TextMeasure {
    /// Width of `text` drawn in `style` at `font_size`, in points
    fn measure(&self, text: &str, style: SpanStyle, font_size: f64) -> f64;
}

/// One output line of the wrapper
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedLine {
    /// Fragments in drawing order; neighbours never share a style
    pub spans: Vec<StyledSpan>,
    /// Measured width of the whole line
    pub width: f64,
}

impl WrappedLine {
    fn empty() -> Self {
        Self {
            spans: Vec::new(),
            width: 0.0,
        }
    }

    fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    fn push(&mut self, text: &str, style: SpanStyle) {
        match self.spans.last_mut() {
            Some(last) if last.style == style => last.text.push_str(text),
            _ => self.spans.push(StyledSpan::new(text, style)),
        }
    }

    /// Text of the line without styling
    pub fn text(&self) -> String {
        crate::plain_text(&self.spans)
    }
}

#[derive(Debug, Default)]
struct Word {
    fragments: Vec<StyledSpan>,
    /// Style of the whitespace preceding this word, `None` at line start
    space_before: Option<SpanStyle>,
}

impl Word {
    fn push_char(&mut self, c: char, style: SpanStyle) {
        match self.fragments.last_mut() {
            Some(last) if last.style == style => last.text.push(c),
            _ => self.fragments.push(StyledSpan::new(c.to_string(), style)),
        }
    }

    fn width<M: TextMeasure + ?Sized>(&self, font_size: f64, measure: &M) -> f64 {
        self.fragments
            .iter()
            .map(|f| measure.measure(&f.text, f.style, font_size))
            .sum()
    }
}

fn split_words(spans: &[StyledSpan]) -> Vec<Word> {
    let mut words = Vec::new();
    let mut current = Word::default();
    let mut pending_space: Option<SpanStyle> = None;

    for span in spans {
        for c in span.text.chars() {
            if c.is_whitespace() {
                if !current.fragments.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
                if pending_space.is_none() && !words.is_empty() {
                    pending_space = Some(span.style);
                }
            } else {
                if current.fragments.is_empty() {
                    current.space_before = pending_space.take();
                }
                current.push_char(c, span.style);
            }
        }
    }

    if !current.fragments.is_empty() {
        words.push(current);
    }
    words
}

/// Greedily wrap `spans` into lines no wider than `max_width`
///
/// A word wider than `max_width` is placed alone on its own line and allowed
/// to overflow. Pure: the same input always gives the same lines.
pub fn wrap_spans<M: TextMeasure + ?Sized>(
    spans: &[StyledSpan],
    max_width: f64,
    font_size: f64,
    measure: &M,
) -> Vec<WrappedLine> {
    let mut lines = Vec::new();
    let mut line = WrappedLine::empty();

    for word in split_words(spans) {
        let word_width = word.width(font_size, measure);

        if !line.is_empty() {
            let space_style = word.space_before.unwrap_or_default();
            let space_width = measure.measure(" ", space_style, font_size);

            if line.width + space_width + word_width <= max_width {
                line.push(" ", space_style);
                line.width += space_width;
            } else {
                lines.push(std::mem::replace(&mut line, WrappedLine::empty()));
            }
        }

        for fragment in &word.fragments {
            line.push(&fragment.text, fragment.style);
        }
        line.width += word_width;
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Number of lines `spans` would occupy, without keeping the lines
pub fn line_count<M: TextMeasure + ?Sized>(
    spans: &[StyledSpan],
    max_width: f64,
    font_size: f64,
    measure: &M,
) -> usize {
    wrap_spans(spans, max_width, font_size, measure).len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Half an em per character, bold and code slightly wider
    struct FixedMeasure;

    impl TextMeasure for FixedMeasure {
        fn measure(&self, text: &str, style: SpanStyle, font_size: f64) -> f64 {
            let factor = match style {
                SpanStyle::Plain | SpanStyle::Italic => 0.5,
                SpanStyle::Bold | SpanStyle::Code => 0.6,
            };
            text.chars().count() as f64 * factor * font_size
        }
    }

    fn plain(text: &str) -> StyledSpan {
        StyledSpan::plain(text)
    }

    fn texts(lines: &[WrappedLine]) -> Vec<String> {
        lines.iter().map(|l| l.text()).collect()
    }

    #[test]
    fn test_greedy_breaks() {
        let lines = wrap_spans(&[plain("aaa bbb ccc")], 40.0, 10.0, &FixedMeasure);
        assert_eq!(texts(&lines), vec!["aaa bbb", "ccc"]);
        assert_eq!(lines[0].width, 35.0);
        assert_eq!(lines[1].width, 15.0);
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(wrap_spans(&[], 100.0, 10.0, &FixedMeasure).is_empty());
        assert!(wrap_spans(&[plain("   ")], 100.0, 10.0, &FixedMeasure).is_empty());
    }

    #[test]
    fn test_whitespace_collapses() {
        let lines = wrap_spans(&[plain("  a \t  b  ")], 100.0, 10.0, &FixedMeasure);
        assert_eq!(texts(&lines), vec!["a b"]);
    }

    #[test]
    fn test_style_change_does_not_break() {
        let spans = vec![
            plain("Built "),
            StyledSpan::new("Rust", SpanStyle::Bold),
            plain(" services"),
        ];
        let lines = wrap_spans(&spans, 500.0, 10.0, &FixedMeasure);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].spans, spans);
    }

    #[test]
    fn test_adjacent_spans_form_one_word() {
        let spans = vec![
            StyledSpan::new("Go", SpanStyle::Bold),
            plain(","),
            plain(" Rust"),
        ];
        // Room for "Go," but not for "Go, Rust"
        let lines = wrap_spans(&spans, 20.0, 10.0, &FixedMeasure);
        assert_eq!(texts(&lines), vec!["Go,", "Rust"]);
        assert_eq!(
            lines[0].spans,
            vec![StyledSpan::new("Go", SpanStyle::Bold), plain(",")]
        );
    }

    #[test]
    fn test_long_word_overflows_alone() {
        let lines = wrap_spans(
            &[plain("a supercalifragilistic b")],
            30.0,
            10.0,
            &FixedMeasure,
        );
        assert_eq!(texts(&lines), vec!["a", "supercalifragilistic", "b"]);
        assert!(lines[1].width > 30.0);
    }

    #[test]
    fn test_space_takes_surrounding_style() {
        let spans = vec![StyledSpan::new("one two", SpanStyle::Code)];
        let lines = wrap_spans(&spans, 500.0, 10.0, &FixedMeasure);
        assert_eq!(lines[0].spans, spans);
        assert!((lines[0].width - 42.0).abs() < 1e-9);
    }

    #[test]
    fn test_line_count() {
        let spans = [plain("one two three four five six")];
        assert_eq!(line_count(&spans, 1000.0, 10.0, &FixedMeasure), 1);
        assert_eq!(line_count(&spans, 50.0, 10.0, &FixedMeasure), 3);
    }
}
