//! Line classification
//!
//! Each source line maps to exactly one `Block`. Rules are tried in order and
//! the first matching predicate wins, so the order of `RULES` is the
//! precedence of the markdown dialect.

use crate::table::is_table_line;

/// A classified source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Part of a pipe table; buffered until the table ends
    TableLine(String),
    Blank,
    /// `#`, `##` or `###` heading with its text
    Heading { level: u8, text: String },
    /// `---`, `***` or `___`
    HorizontalRule,
    Bullet { indent: usize, text: String },
    Ordered { indent: usize, number: u32, text: String },
    Paragraph(String),
}

type Predicate = fn(&str) -> bool;
type Builder = fn(&str) -> Block;

const RULES: &[(Predicate, Builder)] = &[
    (is_table_line, table_line),
    (is_blank, blank),
    (is_h1, h1),
    (is_h2, h2),
    (is_h3, h3),
    (is_horizontal_rule, horizontal_rule),
    (is_bullet, bullet),
    (is_ordered, ordered),
];

/// Classify one source line
pub fn classify_line(line: &str) -> Block {
    RULES
        .iter()
        .find(|(matches, _)| matches(line))
        .map(|(_, build)| build(line))
        .unwrap_or_else(|| Block::Paragraph(line.trim().to_string()))
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn blank(_: &str) -> Block {
    Block::Blank
}

fn table_line(line: &str) -> Block {
    Block::TableLine(line.trim().to_string())
}

fn heading_text<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    line.trim_start().strip_prefix(prefix).map(str::trim)
}

fn is_h1(line: &str) -> bool {
    heading_text(line, "# ").is_some()
}

fn is_h2(line: &str) -> bool {
    heading_text(line, "## ").is_some()
}

fn is_h3(line: &str) -> bool {
    heading_text(line, "### ").is_some()
}

fn heading(level: u8, line: &str, prefix: &str) -> Block {
    Block::Heading {
        level,
        text: heading_text(line, prefix).unwrap_or_default().to_string(),
    }
}

fn h1(line: &str) -> Block {
    heading(1, line, "# ")
}

fn h2(line: &str) -> Block {
    heading(2, line, "## ")
}

fn h3(line: &str) -> Block {
    heading(3, line, "### ")
}

fn is_horizontal_rule(line: &str) -> bool {
    let marks: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
    match marks.first() {
        Some(&first) if matches!(first, '-' | '*' | '_') => {
            marks.len() >= 3 && marks.iter().all(|&c| c == first)
        }
        _ => false,
    }
}

fn horizontal_rule(_: &str) -> Block {
    Block::HorizontalRule
}

/// Nesting level from leading whitespace: two spaces or one tab per level
fn indent_level(line: &str) -> usize {
    let columns: usize = line
        .chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { 2 } else { 1 })
        .sum();
    columns / 2
}

fn is_bullet(line: &str) -> bool {
    let body = line.trim_start();
    body.starts_with("- ") || body.starts_with("* ")
}

fn bullet(line: &str) -> Block {
    Block::Bullet {
        indent: indent_level(line),
        text: line.trim_start()[2..].trim().to_string(),
    }
}

/// Split `12. text` into its number and text
fn ordered_parts(line: &str) -> Option<(u32, &str)> {
    let body = line.trim_start();
    let digits = body.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let text = body[digits..].strip_prefix(". ")?;
    let number = body[..digits].parse().ok()?;
    Some((number, text.trim()))
}

fn is_ordered(line: &str) -> bool {
    ordered_parts(line).is_some()
}

fn ordered(line: &str) -> Block {
    let (number, text) = ordered_parts(line).unwrap_or((1, line.trim()));
    Block::Ordered {
        indent: indent_level(line),
        number,
        text: text.to_string(),
    }
}
