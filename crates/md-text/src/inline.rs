//! Inline markdown segmentation
//!
//! Splits a run of text into bold/italic/code/plain spans with a single
//! left-to-right scan. Markers are tried in priority order `**` > `*` > `` ` ``.
//! Anything that does not form a clean pair stays literal.

use crate::MarkupError;
use serde::Serialize;

/// Inline style of a span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanStyle {
    #[default]
    Plain,
    Bold,
    Italic,
    Code,
}

/// A contiguous run of text sharing one inline style
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledSpan {
    pub text: String,
    pub style: SpanStyle,
}

impl StyledSpan {
    pub fn new(text: impl Into<String>, style: SpanStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, SpanStyle::Plain)
    }
}

/// Characters that open or close an inline marker
fn is_marker(c: char) -> bool {
    c == '*' || c == '`'
}

/// Split `text` into styled spans
///
/// Concatenating the returned texts yields the input with the delimiters of
/// every recognized pair removed. An empty input yields no spans.
pub fn segment(text: &str) -> Vec<StyledSpan> {
    let mut spans: Vec<StyledSpan> = Vec::new();
    let mut plain = String::new();
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        if let Some((span, consumed)) = match_pair(rest) {
            flush_plain(&mut spans, &mut plain);
            spans.push(span);
            rest = &rest[consumed..];
            continue;
        }

        // Unmatched opener: keep the whole marker run literal so `**` is
        // never re-read as two italics
        if c == '*' && rest.starts_with("**") {
            plain.push_str("**");
            rest = &rest[2..];
        } else {
            plain.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }

    flush_plain(&mut spans, &mut plain);
    spans
}

fn flush_plain(spans: &mut Vec<StyledSpan>, plain: &mut String) {
    if plain.is_empty() {
        return;
    }
    let text = std::mem::take(plain);
    match spans.last_mut() {
        Some(last) if last.style == SpanStyle::Plain => last.text.push_str(&text),
        _ => spans.push(StyledSpan::plain(text)),
    }
}

/// Try to read a delimited span at the start of `rest`
///
/// Returns the span and the number of bytes consumed, markers included.
fn match_pair(rest: &str) -> Option<(StyledSpan, usize)> {
    if let Some(body) = rest.strip_prefix("**") {
        let end = body.find("**")?;
        let inner = &body[..end];
        if inner.is_empty() || inner.contains(is_marker) {
            return None;
        }
        return Some((StyledSpan::new(inner, SpanStyle::Bold), end + 4));
    }

    if let Some(body) = rest.strip_prefix('*') {
        let end = body.find('*')?;
        let inner = &body[..end];
        // A closing `*` that begins `**` belongs to a bold marker
        if body[end + 1..].starts_with('*') {
            return None;
        }
        if inner.is_empty()
            || inner.contains('`')
            || inner.starts_with(char::is_whitespace)
            || inner.ends_with(char::is_whitespace)
        {
            return None;
        }
        return Some((StyledSpan::new(inner, SpanStyle::Italic), end + 2));
    }

    if let Some(body) = rest.strip_prefix('`') {
        let end = body.find('`')?;
        let inner = &body[..end];
        if inner.is_empty() {
            return None;
        }
        return Some((StyledSpan::new(inner, SpanStyle::Code), end + 2));
    }

    None
}

/// Check that every marker type appears an even number of times
///
/// Used to decide whether a table cell is valid inline markdown. The first
/// imbalance found is reported, bold before italic before code.
pub fn check_markup(text: &str) -> Result<(), MarkupError> {
    let bold = text.matches("**").count();
    if bold % 2 != 0 {
        return Err(MarkupError::UnbalancedBold(text.to_string()));
    }

    let single = text.replace("**", "").matches('*').count();
    if single % 2 != 0 {
        return Err(MarkupError::UnbalancedItalic(text.to_string()));
    }

    let code = text.matches('`').count();
    if code % 2 != 0 {
        return Err(MarkupError::UnbalancedCode(text.to_string()));
    }

    Ok(())
}

/// Concatenate the text of every span
pub fn plain_text(spans: &[StyledSpan]) -> String {
    spans.iter().map(|s| s.text.as_str()).collect()
}
