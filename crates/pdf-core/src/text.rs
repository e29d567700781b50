//! Text content stream operators

use crate::document::Color;
use crate::font::StandardFont;
use crate::Align;

/// Format a coordinate for a content stream
///
/// Two decimals are plenty at 1/72 inch and keep streams small.
pub(crate) fn fmt_num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == rounded.trunc() {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded}")
    }
}

/// Text state for one shown string
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextRun {
    pub font: StandardFont,
    pub font_size: f64,
    pub color: Color,
    /// Measured width, used to shift centered and right-aligned text
    pub width: f64,
}

impl TextRun {
    /// Emit `BT rg Tf Td Tj ET` for hex-encoded text with its baseline at
    /// PDF coordinates (`x`, `y`)
    pub fn operators(&self, text_hex: &str, x: f64, y: f64, align: Align) -> Vec<u8> {
        let start = match align {
            Align::Left => x,
            Align::Center => x - self.width / 2.0,
            Align::Right => x - self.width,
        };

        format!(
            "BT\n{} rg\n/{} {} Tf\n{} {} Td\n{} Tj\nET\n",
            self.color.to_operands(),
            self.font.resource_name(),
            fmt_num(self.font_size),
            fmt_num(start),
            fmt_num(y),
            text_hex
        )
        .into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(font: StandardFont, font_size: f64, width: f64) -> TextRun {
        TextRun {
            font,
            font_size,
            color: Color::black(),
            width,
        }
    }

    fn render(run: &TextRun, x: f64, align: Align) -> String {
        String::from_utf8(run.operators("<476F>", x, 700.0, align)).unwrap()
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(100.0), "100");
        assert_eq!(fmt_num(56.6929), "56.69");
        assert_eq!(fmt_num(-3.5), "-3.5");
        assert_eq!(fmt_num(0.004), "0");
    }

    #[test]
    fn test_left_aligned_run() {
        let ops = render(&run(StandardFont::Helvetica, 12.0, 100.0), 100.0, Align::Left);
        assert_eq!(ops, "BT\n0 0 0 rg\n/F1 12 Tf\n100 700 Td\n<476F> Tj\nET\n");
    }

    #[test]
    fn test_alignment_shifts_start() {
        let bold = run(StandardFont::HelveticaBold, 24.0, 100.0);
        assert!(render(&bold, 200.0, Align::Center).contains("/F2 24 Tf\n150 700 Td"));
        assert!(render(&bold, 200.0, Align::Right).contains("100 700 Td"));
    }

    #[test]
    fn test_fractional_size_and_color() {
        let mut courier = run(StandardFont::Courier, 9.5, 10.0);
        courier.color = Color::from_rgb(255, 0, 0);
        let ops = render(&courier, 10.0, Align::Left);
        assert!(ops.contains("1 0 0 rg"));
        assert!(ops.contains("/F5 9.5 Tf"));
    }
}
