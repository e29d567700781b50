//! Page geometry and colors

use crate::{LayoutError, Result};
use pdf_core::{Color, PageSize};
use serde::{Deserialize, Serialize};

/// Points per millimetre
const MM: f64 = 72.0 / 25.4;

/// 8-bit RGB triple, serialized as `[r, g, b]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::from_rgb(rgb.0, rgb.1, rgb.2)
    }
}

/// Fixed document palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Title and table header text
    pub primary: Rgb,
    /// Section headings and separator rules
    pub secondary: Rgb,
    /// Sub-headings and the title underline
    pub accent: Rgb,
    /// Body text
    pub text: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: Rgb(44, 62, 80),
            secondary: Rgb(52, 73, 94),
            accent: Rgb(41, 128, 185),
            text: Rgb(33, 33, 33),
        }
    }
}

/// Page geometry for one document, in points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub page_width: f64,
    pub page_height: f64,
    /// Applied on all four sides
    pub margin: f64,
    pub palette: Palette,
}

impl Default for LayoutConfig {
    /// A4 with a 20 mm margin
    fn default() -> Self {
        Self::for_page(PageSize::A4)
    }
}

impl LayoutConfig {
    /// Default margin and palette on an arbitrary page size
    pub fn for_page(size: PageSize) -> Self {
        Self {
            page_width: size.width,
            page_height: size.height,
            margin: 20.0 * MM,
            palette: Palette::default(),
        }
    }

    /// US Letter with the default margin
    pub fn letter() -> Self {
        Self::for_page(PageSize::LETTER)
    }

    /// Parse a (possibly partial) JSON config; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the geometry leaves a usable content area
    pub fn validate(&self) -> Result<()> {
        if !(self.page_width > 0.0 && self.page_height > 0.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "page size must be positive, got {} x {}",
                self.page_width, self.page_height
            )));
        }
        if self.margin.is_nan()
            || self.margin < 0.0
            || self.margin * 2.0 >= self.page_width
            || self.margin * 2.0 >= self.page_height
        {
            return Err(LayoutError::InvalidConfig(format!(
                "margin {} leaves no content area",
                self.margin
            )));
        }
        Ok(())
    }

    pub fn page_size(&self) -> PageSize {
        PageSize::new(self.page_width, self.page_height)
    }

    /// Width between the left and right margins
    pub fn content_width(&self) -> f64 {
        self.page_width - self.margin * 2.0
    }

    /// Height between the top and bottom margins
    pub fn content_height(&self) -> f64 {
        self.page_height - self.margin * 2.0
    }

    /// Lowest y (top origin) content may reach
    pub fn bottom(&self) -> f64 {
        self.page_height - self.margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_is_a4_with_20mm_margin() {
        let config = LayoutConfig::default();
        assert_eq!(config.page_width, 595.28);
        assert_eq!(config.page_height, 841.89);
        assert!((config.margin - 56.69).abs() < 0.01);
        assert!((config.content_width() - 481.9).abs() < 0.01);
    }

    #[test]
    fn test_letter() {
        let config = LayoutConfig::letter();
        assert_eq!(config.page_size(), PageSize::LETTER);
        assert_eq!(config.palette, Palette::default());
    }

    #[test]
    fn test_from_partial_json() {
        let config = LayoutConfig::from_json(r#"{"margin": 36, "palette": {"accent": [200, 0, 0]}}"#)
            .unwrap();
        assert_eq!(config.margin, 36.0);
        assert_eq!(config.page_width, 595.28);
        assert_eq!(config.palette.accent, Rgb(200, 0, 0));
        assert_eq!(config.palette.text, Palette::default().text);
    }

    #[test]
    fn test_from_json_rejects_bad_geometry() {
        assert!(matches!(
            LayoutConfig::from_json(r#"{"margin": 400}"#),
            Err(LayoutError::InvalidConfig(_))
        ));
        assert!(matches!(
            LayoutConfig::from_json(r#"{"pageWidth": 0}"#),
            Err(LayoutError::InvalidConfig(_))
        ));
        assert!(matches!(
            LayoutConfig::from_json("not json"),
            Err(LayoutError::JsonError(_))
        ));
    }

    #[test]
    fn test_rgb_to_color() {
        let color: Color = Rgb(255, 0, 0).into();
        assert_eq!(color, Color::from_rgb(255, 0, 0));
    }
}
