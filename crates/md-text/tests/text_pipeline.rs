//! Segment-then-wrap tests over realistic CV lines

use md_text::{
    check_markup, plain_text, segment, strip_code_fences, wrap_spans, SpanStyle, TextMeasure,
};
use pretty_assertions::assert_eq;

/// Character-count measure with a wider bold face
struct CharMeasure;

impl TextMeasure for CharMeasure {
    fn measure(&self, text: &str, style: SpanStyle, font_size: f64) -> f64 {
        let per_char = match style {
            SpanStyle::Bold => 0.625,
            _ => 0.5,
        };
        text.chars().count() as f64 * per_char * font_size
    }
}

const LINES: &[&str] = &[
    "Led **12** engineers across *three* time zones",
    "Migrated `billing-api` to **Rust** and cut p99 latency by 40%",
    "Plain sentence with no markup at all",
    "**Skills:** Go, Rust, `SQL`, *Kubernetes*",
    "Diseñé la **arquitectura** de pagos en *tiempo real*",
];

fn strip_markers(text: &str) -> String {
    text.replace("**", "").replace(['*', '`'], "")
}

#[test]
fn span_text_round_trips_without_delimiters() {
    for line in LINES {
        assert_eq!(plain_text(&segment(line)), strip_markers(line), "{line}");
    }
}

#[test]
fn balanced_lines_pass_markup_check() {
    for line in LINES {
        assert_eq!(check_markup(line), Ok(()), "{line}");
    }
}

#[test]
fn wrapped_lines_respect_width_bound() {
    for line in LINES {
        let spans = segment(line);
        for max_width in [80.0, 120.0, 200.0, 400.0] {
            let wrapped = wrap_spans(&spans, max_width, 10.0, &CharMeasure);
            for out in &wrapped {
                let measured: f64 = out
                    .spans
                    .iter()
                    .map(|s| CharMeasure.measure(&s.text, s.style, 10.0))
                    .sum();
                assert!(measured <= max_width + 1e-9, "{line} @ {max_width}");
                assert!((measured - out.width).abs() < 1e-9);
            }
        }
    }
}

#[test]
fn wrapping_keeps_every_word_in_order() {
    let line = LINES[1];
    let spans = segment(line);
    let wrapped = wrap_spans(&spans, 90.0, 10.0, &CharMeasure);

    let rejoined: Vec<String> = wrapped.iter().map(|l| l.text()).collect();
    assert_eq!(rejoined.join(" "), strip_markers(line));
}

#[test]
fn fenced_model_output_segments_cleanly() {
    let raw = "```markdown\n**Jane Doe** - *Backend*\n```";
    let spans = segment(&strip_code_fences(raw));
    assert_eq!(spans[0].style, SpanStyle::Bold);
    assert_eq!(spans[0].text, "Jane Doe");
    assert_eq!(spans.last().map(|s| s.style), Some(SpanStyle::Italic));
}
