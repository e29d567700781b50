//! Pipe tables: detection, parsing and paginated rendering

use crate::canvas::Canvas;
use crate::style::{RoleMeasure, TextRole};
use crate::Result;
use md_text::{check_markup, segment, wrap_spans, StyledSpan, WrappedLine};
use pdf_core::{Color, RectStyle};
use tracing::debug;

/// Total horizontal space left outside the table
const SIDE_PADDING: f64 = 10.0;
/// Space between a cell border and its text
const CELL_PADDING: f64 = 4.0;
/// Added to every row on top of its text lines
const VERTICAL_PADDING: f64 = 6.0;
/// Space after the last row
const TABLE_GAP: f64 = 8.0;
const GRID_WIDTH: f64 = 0.5;

/// Whether a line belongs to a pipe table
///
/// Two pipes are needed, which always splits the line into at least three
/// fields.
pub fn is_table_line(line: &str) -> bool {
    line.trim().matches('|').count() >= 2
}

/// Parsed table: header plus data rows, all the header's width
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableModel {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Split one table line into trimmed fields
fn split_row(line: &str) -> Vec<String> {
    let line = line.trim();
    let mut fields: Vec<&str> = line.split('|').collect();
    if line.starts_with('|') && !fields.is_empty() {
        fields.remove(0);
    }
    if line.ends_with('|') && !fields.is_empty() {
        fields.pop();
    }
    fields.into_iter().map(|f| f.trim().to_string()).collect()
}

impl TableModel {
    /// Build a table from buffered lines
    ///
    /// The second line is the separator row and is always skipped. Returns
    /// `None` for a buffer without a separator or a header without columns.
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Option<Self> {
        if lines.len() < 2 {
            return None;
        }

        let header = split_row(lines[0].as_ref());
        if header.iter().all(|field| field.is_empty()) {
            return None;
        }
        let columns = header.len();

        let rows = lines[2..]
            .iter()
            .map(|line| split_row(line.as_ref()))
            .filter(|fields| fields.iter().any(|f| !f.is_empty()))
            .map(|mut fields| {
                fields.resize(columns, String::new());
                fields
            })
            .collect();

        Some(Self { header, rows })
    }

    pub fn column_count(&self) -> usize {
        self.header.len()
    }
}

/// Inline spans for a cell, or its literal text when the markup is broken
fn cell_spans(text: &str) -> Vec<StyledSpan> {
    match check_markup(text) {
        Ok(()) => segment(text),
        Err(err) => {
            debug!(error = %err, "table cell rendered as plain text");
            vec![StyledSpan::plain(text)]
        }
    }
}

/// A row with its cells already wrapped
struct LaidOutRow {
    cells: Vec<Vec<WrappedLine>>,
    role: TextRole,
    height: f64,
}

impl LaidOutRow {
    fn new(fields: &[String], role: TextRole, cell_text_width: f64) -> Self {
        let measure = RoleMeasure(role);
        let cells: Vec<Vec<WrappedLine>> = fields
            .iter()
            .map(|field| {
                wrap_spans(&cell_spans(field), cell_text_width, role.font_size(), &measure)
            })
            .collect();

        let max_lines = cells.iter().map(Vec::len).max().unwrap_or(0).max(1);
        let height = max_lines as f64 * role.line_height() + VERTICAL_PADDING;

        Self {
            cells,
            role,
            height,
        }
    }
}

/// Column geometry shared by every row of one table
struct Columns {
    left: f64,
    width: f64,
    count: usize,
}

impl Columns {
    fn x(&self, column: usize) -> f64 {
        self.left + column as f64 * self.width
    }

    fn total_width(&self) -> f64 {
        self.width * self.count as f64
    }
}

/// Render a table at the cursor, breaking pages between rows
pub(crate) fn render_table(canvas: &mut Canvas<'_>, table: &TableModel) -> Result<()> {
    let config = canvas.config;
    let count = table.column_count();
    let columns = Columns {
        left: config.margin + SIDE_PADDING / 2.0,
        width: (config.content_width() - SIDE_PADDING) / count as f64,
        count,
    };
    let text_width = columns.width - CELL_PADDING * 2.0;

    let header = LaidOutRow::new(&table.header, TextRole::TableHeader, text_width);
    let rows: Vec<LaidOutRow> = table
        .rows
        .iter()
        .map(|fields| LaidOutRow::new(fields, TextRole::TableCell, text_width))
        .collect();

    debug!(columns = count, rows = rows.len(), "rendering table");

    // Keep the header with the first data row
    let first = rows.first().map(|row| row.height).unwrap_or(0.0);
    canvas.ensure_space(header.height + first);
    draw_row(canvas, &header, &columns, None)?;

    for (index, row) in rows.iter().enumerate() {
        if canvas.ensure_space(row.height) {
            draw_row(canvas, &header, &columns, None)?;
        }
        let shade = (index % 2 == 1).then(|| Color::from_rgb(245, 247, 250));
        draw_row(canvas, row, &columns, shade)?;
    }

    canvas.cursor.advance(TABLE_GAP);
    Ok(())
}

fn draw_row(
    canvas: &mut Canvas<'_>,
    row: &LaidOutRow,
    columns: &Columns,
    shade: Option<Color>,
) -> Result<()> {
    let page = canvas.cursor.page;
    let top = canvas.cursor.y;
    let config = canvas.config;
    let palette = &config.palette;

    let (background, text_color): (Option<Color>, Color) = match row.role {
        TextRole::TableHeader => (Some(Color::from_rgb(230, 236, 242)), palette.primary.into()),
        _ => (shade, palette.text.into()),
    };
    let grid: Color = palette.secondary.into();

    if let Some(fill) = background {
        canvas
            .doc
            .fill_rect(page, columns.left, top, columns.total_width(), row.height, fill)?;
    }

    let size = row.role.font_size();
    for (column, lines) in row.cells.iter().enumerate() {
        let x = columns.x(column);
        canvas.doc.draw_rect(
            page,
            x,
            top,
            columns.width,
            row.height,
            RectStyle::Stroke(grid, GRID_WIDTH),
        )?;

        for (i, line) in lines.iter().enumerate() {
            let baseline = top + VERTICAL_PADDING / 2.0 + i as f64 * row.role.line_height() + size;
            canvas.draw_spans(&line.spans, row.role, x + CELL_PADDING, baseline, text_color)?;
        }
    }

    canvas.cursor.advance(row.height);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    #[test]
    fn test_is_table_line() {
        assert!(is_table_line("| Skill | Level |"));
        assert!(is_table_line("a | b | c"));
        assert!(is_table_line("  |---|---|  "));
        assert!(!is_table_line("a | b"));
        assert!(!is_table_line("no pipes"));
    }

    #[test]
    fn test_split_row() {
        assert_eq!(split_row("| Go | Expert |"), vec!["Go", "Expert"]);
        assert_eq!(split_row("Go | Expert | 5y"), vec!["Go", "Expert", "5y"]);
        assert_eq!(split_row("| a || c |"), vec!["a", "", "c"]);
    }

    #[test]
    fn test_parse_skips_separator() {
        let table = TableModel::parse(&lines(
            "| Skill | Level |\n|---|---|\n| Go | Expert |\n| SQL | Intermediate |",
        ))
        .unwrap();
        assert_eq!(table.header, vec!["Skill", "Level"]);
        assert_eq!(
            table.rows,
            vec![vec!["Go", "Expert"], vec!["SQL", "Intermediate"]]
        );
    }

    #[test]
    fn test_parse_truncates_and_pads_rows() {
        let table = TableModel::parse(&lines(
            "| A | B |\n|---|---|\n| 1 | 2 | 3 |\n| only |\n|  |  |",
        ))
        .unwrap();
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.rows, vec![vec!["1", "2"], vec!["only", ""]]);
        assert!(table.rows.iter().all(|row| row.len() <= table.header.len()));
    }

    #[test]
    fn test_degenerate_tables() {
        assert_eq!(TableModel::parse(&lines("| A | B |")), None);
        assert_eq!(TableModel::parse(&lines("|  |  |\n|---|---|")), None);
        assert_eq!(TableModel::parse::<&str>(&[]), None);
    }

    #[test]
    fn test_cell_spans_fall_back_on_broken_markup() {
        assert_eq!(cell_spans("**Go"), vec![StyledSpan::plain("**Go")]);
        assert_eq!(
            cell_spans("**Go**"),
            vec![StyledSpan::new("Go", md_text::SpanStyle::Bold)]
        );
    }

    #[test]
    fn test_row_height_follows_tallest_cell() {
        let fields = vec![
            "short".to_string(),
            "a much longer cell that has to wrap onto several lines".to_string(),
        ];
        let row = LaidOutRow::new(&fields, TextRole::TableCell, 60.0);
        let tallest = row.cells.iter().map(Vec::len).max().unwrap();
        assert!(tallest > 1);
        assert_eq!(row.height, tallest as f64 * 12.0 + VERTICAL_PADDING);
    }

    #[test]
    fn test_empty_cell_still_has_one_line_of_height() {
        let row = LaidOutRow::new(&[String::new()], TextRole::TableCell, 60.0);
        assert_eq!(row.height, 12.0 + VERTICAL_PADDING);
    }
}
