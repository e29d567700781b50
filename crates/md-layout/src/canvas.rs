//! Drawing context threaded through every block renderer

use crate::cursor::Cursor;
use crate::style::TextRole;
use crate::{LayoutConfig, Result};
use md_text::StyledSpan;
use pdf_core::{Align, Color, PdfDocument};
use tracing::debug;

/// The document being written plus the shared cursor
pub(crate) struct Canvas<'a> {
    pub doc: PdfDocument,
    pub cursor: Cursor,
    pub config: &'a LayoutConfig,
}

impl<'a> Canvas<'a> {
    pub fn new(config: &'a LayoutConfig) -> Result<Self> {
        let doc = PdfDocument::new(config.page_size())?;
        Ok(Self {
            doc,
            cursor: Cursor::new(config.margin),
            config,
        })
    }

    pub fn left(&self) -> f64 {
        self.config.margin
    }

    pub fn right(&self) -> f64 {
        self.config.page_width - self.config.margin
    }

    /// Nothing has been drawn on the current page yet
    pub fn at_page_top(&self) -> bool {
        self.cursor.y <= self.config.margin + 1e-6
    }

    pub fn new_page(&mut self) {
        let page = self.doc.add_blank_page();
        self.cursor.reset_to(page, self.config.margin);
        debug!(page, "page break");
    }

    /// Break the page unless `height` fits below the cursor
    ///
    /// Content taller than a whole page is drawn from the top of the current
    /// page rather than breaking forever. Returns whether a break happened.
    pub fn ensure_space(&mut self, height: f64) -> bool {
        if self.cursor.fits(height, self.config.bottom()) || self.at_page_top() {
            return false;
        }
        self.new_page();
        true
    }

    /// Draw styled spans left to right starting at `x` on the current page
    pub fn draw_spans(
        &mut self,
        spans: &[StyledSpan],
        role: TextRole,
        x: f64,
        baseline: f64,
        color: Color,
    ) -> Result<()> {
        let size = role.font_size();
        let mut x = x;

        self.doc.set_text_color(color);
        for span in spans {
            let font = role.font(span.style);
            self.doc.set_font(font, size);
            self.doc
                .insert_text(&span.text, self.cursor.page, x, baseline, Align::Left)?;
            x += font.text_width(&span.text, size);
        }

        Ok(())
    }

    /// Horizontal rule at `y` on the current page
    pub fn rule(&mut self, x1: f64, x2: f64, y: f64, color: Color, width: f64) -> Result<()> {
        self.doc
            .draw_line(self.cursor.page, x1, y, x2, y, color, width)?;
        Ok(())
    }

    pub fn into_document(self) -> PdfDocument {
        self.doc
    }
}
