//! Block layout pass
//!
//! Walks the markdown one line at a time, classifies each line and draws it
//! at the cursor, breaking pages before any block that would cross the
//! bottom margin.

use crate::blocks::{classify_line, Block};
use crate::canvas::Canvas;
use crate::style::{RoleMeasure, TextRole};
use crate::table::{render_table, TableModel};
use crate::{LayoutConfig, Result};
use chrono::{DateTime, Utc};
use md_text::{
    plain_text, segment, strip_code_fences, wrap_spans, SpanStyle, StyledSpan, WrappedLine,
};
use pdf_core::Color;
use tracing::debug;

/// Vertical space for a blank source line
const BLANK_SPACING: f64 = 6.0;
/// Extra room demanded below a heading so it never ends a page
const HEADING_KEEP: f64 = 30.0;
const PARAGRAPH_GAP: f64 = 4.0;
const LIST_ITEM_GAP: f64 = 2.0;
/// Horizontal step per list nesting level (5 mm)
const LIST_INDENT: f64 = 14.17;
const MAX_LIST_DEPTH: usize = 4;
const BULLET_OFFSET: f64 = 4.0;
const LIST_TEXT_OFFSET: f64 = 16.0;
const BULLET: &str = "•";

const TITLE_RULE_WIDTH: f64 = 80.0;
const TITLE_RULE_OFFSET: f64 = 2.0;
const TITLE_AFTER: f64 = 14.0;
const SECTION_BEFORE: f64 = 10.0;
const SECTION_RULE_OFFSET: f64 = 3.0;
const SECTION_AFTER: f64 = 8.0;
const SUBSECTION_BEFORE: f64 = 6.0;
const SUBSECTION_AFTER: f64 = 2.0;
const RULE_BLOCK: f64 = 12.0;

/// Renders CV markdown into a PDF
///
/// # Example
/// ```ignore
/// let bytes = MarkdownRenderer::new(LayoutConfig::default())
///     .with_title("Jane Doe - CV")
///     .render("# Jane Doe\n\n## Experience\n- Led team of 5")?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer {
    config: LayoutConfig,
    title: Option<String>,
    creation_date: Option<DateTime<Utc>>,
}

impl MarkdownRenderer {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            title: None,
            creation_date: None,
        }
    }

    /// Document title; defaults to the first `#` heading
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_creation_date(mut self, date: DateTime<Utc>) -> Self {
        self.creation_date = Some(date);
        self
    }

    /// Lay out `markdown` and serialize the document
    ///
    /// Code fences around the whole text are removed first. Each call works
    /// on its own canvas and cursor.
    pub fn render(&self, markdown: &str) -> Result<Vec<u8>> {
        self.config.validate()?;
        let markdown = strip_code_fences(markdown);

        let mut engine = LayoutEngine::new(Canvas::new(&self.config)?);
        engine.run(&markdown)?;

        let title = self.title.clone().or(engine.first_title);
        let mut doc = engine.canvas.into_document();
        if let Some(title) = title {
            doc.set_title(&title);
        }
        if let Some(date) = self.creation_date {
            doc.set_creation_date(date);
        }

        let bytes = doc.to_bytes()?;
        debug!(pages = doc.page_count(), bytes = bytes.len(), "rendered markdown");
        Ok(bytes)
    }
}

/// Render `markdown` with `config` and default metadata
pub fn render_markdown(markdown: &str, config: &LayoutConfig) -> Result<Vec<u8>> {
    MarkdownRenderer::new(config.clone()).render(markdown)
}

/// State of one top-to-bottom pass
struct LayoutEngine<'a> {
    canvas: Canvas<'a>,
    /// Number of the last ordered item while a list is running
    list_counter: Option<u32>,
    /// Table lines waiting for the table to end
    table_lines: Vec<String>,
    first_title: Option<String>,
}

impl<'a> LayoutEngine<'a> {
    fn new(canvas: Canvas<'a>) -> Self {
        Self {
            canvas,
            list_counter: None,
            table_lines: Vec::new(),
            first_title: None,
        }
    }

    fn run(&mut self, markdown: &str) -> Result<()> {
        for line in markdown.lines() {
            match classify_line(line) {
                Block::TableLine(row) => self.table_lines.push(row),
                block => {
                    self.flush_table()?;
                    self.render_block(block)?;
                }
            }
        }
        self.flush_table()
    }

    fn flush_table(&mut self) -> Result<()> {
        if self.table_lines.is_empty() {
            return Ok(());
        }
        let lines = std::mem::take(&mut self.table_lines);
        self.list_counter = None;

        match TableModel::parse(&lines) {
            Some(table) => render_table(&mut self.canvas, &table),
            None => {
                debug!(lines = lines.len(), "skipping degenerate table");
                Ok(())
            }
        }
    }

    fn render_block(&mut self, block: Block) -> Result<()> {
        if !matches!(block, Block::Ordered { .. }) {
            self.list_counter = None;
        }

        match block {
            Block::Ordered {
                indent,
                number,
                text,
            } => {
                let number = self
                    .list_counter
                    .map_or(number, |previous| previous.saturating_add(1));
                self.list_counter = Some(number);
                self.render_list_item(indent, &format!("{number}."), &text)
            }
            Block::Blank => {
                self.canvas.cursor.advance(BLANK_SPACING);
                Ok(())
            }
            Block::Heading { level, text } => {
                let text = plain_text(&segment(&text));
                match level {
                    1 => self.render_title(&text),
                    2 => self.render_section(&text),
                    _ => self.render_subsection(&text),
                }
            }
            Block::HorizontalRule => self.render_rule(),
            Block::Bullet { indent, text } => self.render_list_item(indent, BULLET, &text),
            Block::Paragraph(text) => self.render_paragraph(&text),
            Block::TableLine(_) => Ok(()),
        }
    }

    fn config(&self) -> &'a LayoutConfig {
        self.canvas.config
    }

    /// Wrap single-style heading text
    fn wrap_heading(&self, text: &str, role: TextRole) -> Vec<WrappedLine> {
        wrap_spans(
            &[StyledSpan::plain(text)],
            self.config().content_width(),
            role.font_size(),
            &RoleMeasure(role),
        )
    }

    /// Draw lines at `x`, one page check per line
    fn draw_lines(
        &mut self,
        lines: &[WrappedLine],
        role: TextRole,
        x: f64,
        color: Color,
    ) -> Result<()> {
        for line in lines {
            self.canvas.ensure_space(role.line_height());
            let baseline = self.canvas.cursor.y + role.font_size();
            self.canvas.draw_spans(&line.spans, role, x, baseline, color)?;
            self.canvas.cursor.advance(role.line_height());
        }
        Ok(())
    }

    fn render_title(&mut self, text: &str) -> Result<()> {
        if self.first_title.is_none() && !text.is_empty() {
            self.first_title = Some(text.to_string());
        }

        let role = TextRole::Title;
        let lines = self.wrap_heading(text, role);
        if lines.is_empty() {
            return Ok(());
        }
        let config = self.config();
        let palette = &config.palette;

        let height = lines.len() as f64 * role.line_height() + TITLE_RULE_OFFSET + TITLE_AFTER;
        self.canvas.ensure_space(height + HEADING_KEEP);

        let center = config.page_width / 2.0;
        for line in &lines {
            let baseline = self.canvas.cursor.y + role.font_size();
            let x = center - line.width / 2.0;
            self.canvas
                .draw_spans(&line.spans, role, x, baseline, palette.primary.into())?;
            self.canvas.cursor.advance(role.line_height());
        }

        let y = self.canvas.cursor.y + TITLE_RULE_OFFSET;
        self.canvas.rule(
            center - TITLE_RULE_WIDTH / 2.0,
            center + TITLE_RULE_WIDTH / 2.0,
            y,
            palette.accent.into(),
            2.0,
        )?;
        self.canvas.cursor.advance(TITLE_RULE_OFFSET + TITLE_AFTER);
        Ok(())
    }

    fn render_section(&mut self, text: &str) -> Result<()> {
        let role = TextRole::Section;
        let lines = self.wrap_heading(&text.to_uppercase(), role);
        if lines.is_empty() {
            return Ok(());
        }
        let config = self.config();
        let color: Color = config.palette.secondary.into();

        let height = SECTION_BEFORE
            + lines.len() as f64 * role.line_height()
            + SECTION_RULE_OFFSET
            + SECTION_AFTER;
        self.canvas.ensure_space(height + HEADING_KEEP);
        if !self.canvas.at_page_top() {
            self.canvas.cursor.advance(SECTION_BEFORE);
        }

        self.draw_lines(&lines, role, self.canvas.left(), color)?;

        let y = self.canvas.cursor.y + SECTION_RULE_OFFSET;
        self.canvas
            .rule(self.canvas.left(), self.canvas.right(), y, color, 0.75)?;
        self.canvas.cursor.advance(SECTION_RULE_OFFSET + SECTION_AFTER);
        Ok(())
    }

    fn render_subsection(&mut self, text: &str) -> Result<()> {
        let role = TextRole::Subsection;
        let lines = self.wrap_heading(text, role);
        if lines.is_empty() {
            return Ok(());
        }

        let height = SUBSECTION_BEFORE + lines.len() as f64 * role.line_height() + SUBSECTION_AFTER;
        self.canvas.ensure_space(height + HEADING_KEEP);
        if !self.canvas.at_page_top() {
            self.canvas.cursor.advance(SUBSECTION_BEFORE);
        }

        let color = self.config().palette.accent.into();
        self.draw_lines(&lines, role, self.canvas.left(), color)?;
        self.canvas.cursor.advance(SUBSECTION_AFTER);
        Ok(())
    }

    fn render_rule(&mut self) -> Result<()> {
        self.canvas.ensure_space(RULE_BLOCK);
        let y = self.canvas.cursor.y + RULE_BLOCK / 2.0;
        let color = self.config().palette.secondary.into();
        self.canvas
            .rule(self.canvas.left(), self.canvas.right(), y, color, 0.5)?;
        self.canvas.cursor.advance(RULE_BLOCK);
        Ok(())
    }

    /// Paragraphs move to the next page whole unless they are taller than a page
    fn render_paragraph(&mut self, text: &str) -> Result<()> {
        let role = TextRole::Body;
        let config = self.config();
        let lines = wrap_spans(
            &segment(text),
            config.content_width(),
            role.font_size(),
            &RoleMeasure(role),
        );

        let height = lines.len() as f64 * role.line_height();
        if height <= config.content_height() {
            self.canvas.ensure_space(height);
        }

        self.draw_lines(&lines, role, self.canvas.left(), config.palette.text.into())?;
        self.canvas.cursor.advance(PARAGRAPH_GAP);
        Ok(())
    }

    /// Bullet or numbered item: `label` hangs left of the wrapped text
    fn render_list_item(&mut self, indent: usize, label: &str, text: &str) -> Result<()> {
        let role = TextRole::Body;
        let config = self.config();
        let color: Color = config.palette.text.into();

        let item_x = self.canvas.left() + indent.min(MAX_LIST_DEPTH) as f64 * LIST_INDENT;
        let label_width = role.font(SpanStyle::Plain).text_width(label, role.font_size());
        let text_x = item_x + LIST_TEXT_OFFSET.max(BULLET_OFFSET + label_width + 6.0);
        let width = (self.canvas.right() - text_x).max(role.font_size());

        let mut lines = wrap_spans(&segment(text), width, role.font_size(), &RoleMeasure(role));
        if lines.is_empty() {
            lines.push(WrappedLine {
                spans: Vec::new(),
                width: 0.0,
            });
        }

        for (i, line) in lines.iter().enumerate() {
            self.canvas.ensure_space(role.line_height());
            let baseline = self.canvas.cursor.y + role.font_size();
            if i == 0 {
                self.canvas.draw_spans(
                    &[StyledSpan::plain(label)],
                    role,
                    item_x + BULLET_OFFSET,
                    baseline,
                    color,
                )?;
            }
            self.canvas
                .draw_spans(&line.spans, role, text_x, baseline, color)?;
            self.canvas.cursor.advance(role.line_height());
        }

        self.canvas.cursor.advance(LIST_ITEM_GAP);
        Ok(())
    }
}
