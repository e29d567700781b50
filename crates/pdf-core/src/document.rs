//! PDF Document writer

use crate::font::{encode_text_hex, StandardFont};
use crate::graphics::{generate_line_operators, generate_rect_operators, RectStyle};
use crate::text::TextRun;
use crate::{Align, PdfError, Result};
use chrono::{DateTime, Utc};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::collections::HashMap;
use std::io::Write;
use tracing::debug;

/// Producer string written to the Info dictionary
const PRODUCER: &str = concat!("cvforge pdf-core ", env!("CARGO_PKG_VERSION"));

/// RGB Color (values 0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Create a new RGB color (values 0.0 - 1.0)
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create color from RGB values (0-255)
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Black color
    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// Color components formatted as content stream operands ("r g b")
    pub fn to_operands(&self) -> String {
        format!(
            "{} {} {}",
            crate::text::fmt_num(self.r as f64),
            crate::text::fmt_num(self.g as f64),
            crate::text::fmt_num(self.b as f64)
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// Page dimensions in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    /// ISO A4 (210 x 297 mm)
    pub const A4: PageSize = PageSize {
        width: 595.28,
        height: 841.89,
    };

    /// US Letter (8.5 x 11 in)
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

/// PDF document built from scratch, one content buffer per page
///
/// All coordinates taken by the drawing methods are measured from the top-left
/// corner of the page; they are converted to PDF's bottom-left origin here.
pub struct PdfDocument {
    /// The underlying lopdf document
    inner: Document,
    /// Root Pages node
    pages_id: ObjectId,
    /// Resources dictionary shared by every page
    resources_id: ObjectId,
    /// Page objects in order (page 1 first)
    page_ids: Vec<ObjectId>,
    /// Size applied to every page
    page_size: PageSize,
    /// Current font
    current_font: StandardFont,
    /// Current font size
    current_font_size: f64,
    /// Current text color
    current_text_color: Color,
    /// Buffered content operators per page (page number -> operators)
    page_content_buffer: HashMap<usize, Vec<u8>>,
    /// Document title for the Info dictionary
    title: Option<String>,
    /// Creation timestamp for the Info dictionary
    creation_date: Option<DateTime<Utc>>,
}

impl PdfDocument {
    /// Create a new document with a single blank page
    ///
    /// # Example
    /// ```ignore
    /// let mut doc = PdfDocument::new(PageSize::A4)?;
    /// doc.set_font(StandardFont::Helvetica, 11.0);
    /// doc.insert_text("Hello", 1, 56.0, 80.0, Align::Left)?;
    /// let bytes = doc.to_bytes()?;
    /// ```
    pub fn new(page_size: PageSize) -> Result<Self> {
        if !(page_size.width > 0.0 && page_size.height > 0.0) {
            return Err(PdfError::InvalidPageSize(page_size.width, page_size.height));
        }

        let mut inner = Document::with_version("1.5");
        let pages_id = inner.new_object_id();

        let mut fonts = Dictionary::new();
        for font in StandardFont::ALL {
            let font_id = inner.add_object(font.to_pdf_dictionary());
            fonts.set(font.resource_name(), Object::Reference(font_id));
        }
        let resources_id = inner.add_object(dictionary! {
            "Font" => fonts,
            "ProcSet" => vec!["PDF".into(), "Text".into()],
        });

        let catalog_id = inner.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        inner.trailer.set("Root", catalog_id);

        let mut doc = Self {
            inner,
            pages_id,
            resources_id,
            page_ids: Vec::new(),
            page_size,
            current_font: StandardFont::default(),
            current_font_size: 12.0,
            current_text_color: Color::default(),
            page_content_buffer: HashMap::new(),
            title: None,
            creation_date: None,
        };
        doc.add_blank_page();

        Ok(doc)
    }

    /// Get the number of pages in the document
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Size shared by every page
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Add a blank page to the end of the document
    ///
    /// # Returns
    /// New page number (1-indexed)
    pub fn add_blank_page(&mut self) -> usize {
        let page_id = self.inner.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                Object::Real(self.page_size.width as _),
                Object::Real(self.page_size.height as _),
            ],
            "Resources" => self.resources_id,
        });
        self.page_ids.push(page_id);

        let page = self.page_ids.len();
        debug!(page, "added page");
        page
    }

    /// Set the current font and size
    pub fn set_font(&mut self, font: StandardFont, size: f64) {
        self.current_font = font;
        self.current_font_size = size;
    }

    /// Set the text color
    pub fn set_text_color(&mut self, color: Color) {
        self.current_text_color = color;
    }

    /// Set the document title (Info dictionary)
    pub fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    /// Set the creation date (Info dictionary)
    pub fn set_creation_date(&mut self, date: DateTime<Utc>) {
        self.creation_date = Some(date);
    }

    /// Get current font's text width for a string
    ///
    /// # Returns
    /// Width in points
    pub fn get_text_width(&self, text: &str) -> f64 {
        self.current_font.text_width(text, self.current_font_size)
    }

    /// Insert text with its baseline at a specific position
    ///
    /// # Arguments
    /// * `text` - Text to insert
    /// * `page` - Page number (1-indexed)
    /// * `x` - X coordinate in points
    /// * `y` - Baseline Y coordinate in points (from top)
    /// * `align` - Alignment relative to `x`
    pub fn insert_text(
        &mut self,
        text: &str,
        page: usize,
        x: f64,
        y: f64,
        align: Align,
    ) -> Result<()> {
        self.check_page(page)?;

        // Skip empty text - nothing to render
        if text.is_empty() {
            return Ok(());
        }

        let run = TextRun {
            font: self.current_font,
            font_size: self.current_font_size,
            color: self.current_text_color,
            width: self.get_text_width(text),
        };
        let operators = run.operators(&encode_text_hex(text), x, self.page_size.height - y, align);
        self.buffer_content(page, &operators);

        Ok(())
    }

    /// Draw a rectangle whose top-left corner is at (`x`, `y`)
    pub fn draw_rect(
        &mut self,
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        style: RectStyle,
    ) -> Result<()> {
        self.check_page(page)?;

        let pdf_y = self.page_size.height - y - height;
        let operators = generate_rect_operators(x, pdf_y, width, height, style);
        self.buffer_content(page, &operators);

        Ok(())
    }

    /// Fill a rectangle whose top-left corner is at (`x`, `y`)
    pub fn fill_rect(
        &mut self,
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    ) -> Result<()> {
        self.draw_rect(page, x, y, width, height, RectStyle::Fill(color))
    }

    /// Stroke a line between two points (top-origin coordinates)
    #[allow(clippy::too_many_arguments)]
    pub fn draw_line(
        &mut self,
        page: usize,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Color,
        line_width: f64,
    ) -> Result<()> {
        self.check_page(page)?;

        let height = self.page_size.height;
        let operators = generate_line_operators(x1, height - y1, x2, height - y2, color, line_width);
        self.buffer_content(page, &operators);

        Ok(())
    }

    /// Save the document to bytes
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        // 1. Flush buffered content streams to pages
        self.flush_content_buffers()?;

        // 2. Write the page tree now that every page exists
        self.write_page_tree();

        // 3. Document metadata
        self.write_info();

        let mut buffer = Vec::new();
        self.inner
            .save_to(&mut buffer)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;

        debug!(
            pages = self.page_count(),
            bytes = buffer.len(),
            "serialized document"
        );
        Ok(buffer)
    }

    fn check_page(&self, page: usize) -> Result<()> {
        let page_count = self.page_count();
        if page == 0 || page > page_count {
            return Err(PdfError::InvalidPage(page, page_count));
        }
        Ok(())
    }

    /// Buffer content operators for a page (written at save time)
    fn buffer_content(&mut self, page: usize, content: &[u8]) {
        self.page_content_buffer
            .entry(page)
            .or_default()
            .extend_from_slice(content);
    }

    /// Flush all buffered content to page streams
    ///
    /// Each flush adds one compressed stream per page; pages flushed more than
    /// once end up with a Contents array.
    fn flush_content_buffers(&mut self) -> Result<()> {
        let mut buffers: Vec<(usize, Vec<u8>)> = self.page_content_buffer.drain().collect();
        buffers.sort_by_key(|(page, _)| *page);

        for (page, content) in buffers {
            if !content.is_empty() {
                self.append_content_stream(page, &content)?;
            }
        }

        Ok(())
    }

    fn append_content_stream(&mut self, page: usize, content: &[u8]) -> Result<()> {
        let page_id = self.page_ids[page - 1];

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(content)?;
        let compressed = encoder.finish()?;

        let stream = Stream::new(dictionary! { "Filter" => "FlateDecode" }, compressed);
        let stream_id = self.inner.add_object(stream);

        let page_dict = self
            .inner
            .get_object_mut(page_id)?
            .as_dict_mut()
            .map_err(|_| PdfError::SaveError("Page object is not a dictionary".to_string()))?;

        let contents = match page_dict.get(b"Contents") {
            Ok(Object::Reference(existing)) => Object::Array(vec![
                Object::Reference(*existing),
                Object::Reference(stream_id),
            ]),
            Ok(Object::Array(existing)) => {
                let mut refs = existing.clone();
                refs.push(Object::Reference(stream_id));
                Object::Array(refs)
            }
            _ => Object::Reference(stream_id),
        };
        page_dict.set("Contents", contents);

        Ok(())
    }

    fn write_page_tree(&mut self) {
        let kids: Vec<Object> = self.page_ids.iter().map(|id| (*id).into()).collect();
        self.inner.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => self.page_ids.len() as i64,
            }),
        );
    }

    fn write_info(&mut self) {
        let mut info = dictionary! {
            "Producer" => Object::string_literal(PRODUCER),
        };
        if let Some(title) = &self.title {
            info.set("Title", pdf_text_string(title));
        }
        if let Some(date) = &self.creation_date {
            let stamp = date.format("D:%Y%m%d%H%M%SZ").to_string();
            info.set("CreationDate", Object::string_literal(stamp));
        }

        let info_id = match self.inner.trailer.get(b"Info") {
            Ok(Object::Reference(id)) => *id,
            _ => self.inner.new_object_id(),
        };
        self.inner.objects.insert(info_id, Object::Dictionary(info));
        self.inner.trailer.set("Info", info_id);
    }
}

/// Encode a PDF text string: literal for ASCII, UTF-16BE with BOM otherwise
fn pdf_text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_has_one_page() {
        let doc = PdfDocument::new(PageSize::A4).unwrap();
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.page_size(), PageSize::A4);
    }

    #[test]
    fn test_invalid_page_size() {
        let result = PdfDocument::new(PageSize::new(0.0, 100.0));
        assert!(matches!(result, Err(PdfError::InvalidPageSize(_, _))));
    }

    #[test]
    fn test_add_blank_page_numbers() {
        let mut doc = PdfDocument::new(PageSize::LETTER).unwrap();
        assert_eq!(doc.add_blank_page(), 2);
        assert_eq!(doc.add_blank_page(), 3);
        assert_eq!(doc.page_count(), 3);
    }

    #[test]
    fn test_insert_text_invalid_page() {
        let mut doc = PdfDocument::new(PageSize::A4).unwrap();
        let result = doc.insert_text("x", 2, 0.0, 0.0, Align::Left);
        assert!(matches!(result, Err(PdfError::InvalidPage(2, 1))));

        let result = doc.insert_text("x", 0, 0.0, 0.0, Align::Left);
        assert!(matches!(result, Err(PdfError::InvalidPage(0, 1))));
    }

    #[test]
    fn test_empty_text_is_not_buffered() {
        let mut doc = PdfDocument::new(PageSize::A4).unwrap();
        doc.insert_text("", 1, 10.0, 10.0, Align::Left).unwrap();
        assert!(doc.page_content_buffer.is_empty());
    }

    #[test]
    fn test_text_width_uses_current_font() {
        let mut doc = PdfDocument::new(PageSize::A4).unwrap();
        doc.set_font(StandardFont::Courier, 10.0);
        assert!((doc.get_text_width("abcd") - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_y_is_converted_to_bottom_origin() {
        let mut doc = PdfDocument::new(PageSize::new(200.0, 300.0)).unwrap();
        doc.set_font(StandardFont::Helvetica, 10.0);
        doc.insert_text("A", 1, 20.0, 100.0, Align::Left).unwrap();

        let ops = String::from_utf8(doc.page_content_buffer[&1].clone()).unwrap();
        assert!(ops.contains("20 200 Td"));
    }

    #[test]
    fn test_rect_is_converted_to_bottom_origin() {
        let mut doc = PdfDocument::new(PageSize::new(200.0, 300.0)).unwrap();
        doc.fill_rect(1, 10.0, 50.0, 100.0, 20.0, Color::from_rgb(255, 0, 0)).unwrap();

        let ops = String::from_utf8(doc.page_content_buffer[&1].clone()).unwrap();
        assert!(ops.contains("10 230 100 20 re"));
    }

    #[test]
    fn test_pdf_text_string_ascii_and_unicode() {
        match pdf_text_string("Jane") {
            Object::String(bytes, StringFormat::Literal) => assert_eq!(bytes, b"Jane".to_vec()),
            other => panic!("unexpected object {other:?}"),
        }
        match pdf_text_string("José") {
            Object::String(bytes, StringFormat::Hexadecimal) => {
                assert_eq!(&bytes[..2], &[0xFE, 0xFF]);
                assert_eq!(bytes.len(), 2 + 4 * 2);
            }
            other => panic!("unexpected object {other:?}"),
        }
    }
}
