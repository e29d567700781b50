//! Vector graphics operators (rectangles and lines)

use crate::document::Color;
use crate::text::fmt_num;

/// Paint mode for a rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RectStyle {
    /// Fill only
    Fill(Color),
    /// Stroke only, with line width
    Stroke(Color, f64),
}

/// Generate operators for a rectangle
///
/// `x`/`y` is the lower-left corner in PDF coordinates. The graphics state is
/// saved and restored around the path so colors don't leak into later text.
pub fn generate_rect_operators(x: f64, y: f64, width: f64, height: f64, style: RectStyle) -> Vec<u8> {
    let mut ops = String::from("q\n");

    let paint = match style {
        RectStyle::Fill(color) => {
            ops.push_str(&format!("{} rg\n", color.to_operands()));
            "f"
        }
        RectStyle::Stroke(color, line_width) => {
            ops.push_str(&format!("{} RG\n", color.to_operands()));
            ops.push_str(&format!("{} w\n", fmt_num(line_width)));
            "S"
        }
    };

    ops.push_str(&format!(
        "{} {} {} {} re\n{paint}\nQ\n",
        fmt_num(x),
        fmt_num(y),
        fmt_num(width),
        fmt_num(height)
    ));

    ops.into_bytes()
}

/// Generate operators for a straight line segment in PDF coordinates
pub fn generate_line_operators(
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    color: Color,
    line_width: f64,
) -> Vec<u8> {
    format!(
        "q\n{} RG\n{} w\n{} {} m\n{} {} l\nS\nQ\n",
        color.to_operands(),
        fmt_num(line_width),
        fmt_num(x1),
        fmt_num(y1),
        fmt_num(x2),
        fmt_num(y2)
    )
    .into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_rect() {
        let ops = generate_rect_operators(10.0, 20.0, 30.0, 40.0, RectStyle::Fill(Color::from_rgb(255, 0, 0)));
        let ops = String::from_utf8(ops).unwrap();
        assert_eq!(ops, "q\n1 0 0 rg\n10 20 30 40 re\nf\nQ\n");
    }

    #[test]
    fn test_stroke_rect() {
        let ops = generate_rect_operators(
            0.0,
            0.0,
            5.5,
            5.0,
            RectStyle::Stroke(Color::black(), 0.5),
        );
        let ops = String::from_utf8(ops).unwrap();
        assert!(ops.contains("0 0 0 RG"));
        assert!(ops.contains("0.5 w"));
        assert!(ops.contains("0 0 5.5 5 re\nS"));
    }

    #[test]
    fn test_line() {
        let ops = generate_line_operators(0.0, 100.0, 200.0, 100.0, Color::black(), 1.5);
        let ops = String::from_utf8(ops).unwrap();
        assert_eq!(ops, "q\n0 0 0 RG\n1.5 w\n0 100 m\n200 100 l\nS\nQ\n");
    }
}
