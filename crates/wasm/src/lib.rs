//! WASM bindings for the CV renderer
//!
//! This crate provides JavaScript-friendly API for:
//! - Rendering CV markdown to PDF bytes in the browser
//! - Stripping code fences from model output
//! - Inspecting how a line is split into styled spans
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { renderMarkdown, stripCodeFences } from 'cv-wasm';
//!
//! await init();
//!
//! const markdown = stripCodeFences(modelOutput);
//! const pdf = renderMarkdown(markdown, { pageSize: 'letter', title: 'Jane Doe' });
//! const blob = new Blob([pdf], { type: 'application/pdf' });
//! ```

use md_layout::{LayoutConfig, MarkdownRenderer, Palette};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Page format accepted from JavaScript
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum PageFormat {
    #[default]
    A4,
    Letter,
}

/// Options object for `renderMarkdown`; every field is optional
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RenderOptions {
    page_size: PageFormat,
    /// Margin in points
    margin: Option<f64>,
    palette: Option<Palette>,
    title: Option<String>,
}

impl RenderOptions {
    fn into_renderer(self) -> Result<MarkdownRenderer, String> {
        let mut config = match self.page_size {
            PageFormat::A4 => LayoutConfig::default(),
            PageFormat::Letter => LayoutConfig::letter(),
        };
        if let Some(margin) = self.margin {
            config.margin = margin;
        }
        if let Some(palette) = self.palette {
            config.palette = palette;
        }
        config.validate().map_err(|e| e.to_string())?;

        let renderer = MarkdownRenderer::new(config);
        Ok(match self.title {
            Some(title) => renderer.with_title(title),
            None => renderer,
        })
    }
}

/// Render CV markdown to a PDF
///
/// @param markdown - Markdown text
/// @param options - Optional `{ pageSize, margin, palette, title }`
/// @returns PDF bytes (Uint8Array)
#[wasm_bindgen(js_name = renderMarkdown)]
pub fn render_markdown(markdown: &str, options: JsValue) -> Result<Vec<u8>, JsValue> {
    let options: RenderOptions = if options.is_undefined() || options.is_null() {
        RenderOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)?
    };

    let renderer = options
        .into_renderer()
        .map_err(|e| JsValue::from_str(&e))?;

    renderer
        .render(markdown)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Remove ```` ```markdown ```` fences from model output
///
/// @param text - Raw model output
/// @returns Cleaned markdown
#[wasm_bindgen(js_name = stripCodeFences)]
pub fn strip_code_fences(text: &str) -> String {
    md_text::strip_code_fences(text)
}

/// Split a line into styled spans
///
/// @param text - One line of markdown
/// @returns Array of `{ text, style }` where style is plain/bold/italic/code
#[wasm_bindgen(js_name = segmentInline)]
pub fn segment_inline(text: &str) -> Result<JsValue, JsValue> {
    let spans = md_text::segment(text);
    Ok(serde_wasm_bindgen::to_value(&spans)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```markdown\n# CV\n```"), "# CV");
    }

    #[test]
    fn test_default_options_render_a4() {
        let renderer = RenderOptions::default().into_renderer().unwrap();
        let bytes = renderer.render("# Jane Doe").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_letter_and_margin_options() {
        let options = RenderOptions {
            page_size: PageFormat::Letter,
            margin: Some(36.0),
            ..RenderOptions::default()
        };
        assert!(options.into_renderer().is_ok());
    }

    #[test]
    fn test_margin_too_large_is_rejected() {
        let options = RenderOptions {
            margin: Some(500.0),
            ..RenderOptions::default()
        };
        let err = options.into_renderer().unwrap_err();
        assert!(err.contains("margin"));
    }
}
