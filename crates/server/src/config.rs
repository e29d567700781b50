use anyhow::{bail, Context, Result};
use md_layout::LayoutConfig;
use std::env;

const DEFAULT_MODEL: &str = "gemini-flash-latest";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Page format for every rendered CV
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFormat {
    A4,
    Letter,
}

impl std::str::FromStr for PageFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a4" => Ok(PageFormat::A4),
            "letter" => Ok(PageFormat::Letter),
            other => bail!("PAGE_SIZE must be 'a4' or 'letter', got '{other}'"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Checked per request so the server can start without it
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub port: u16,
    pub page_format: PageFormat,
    pub max_upload_bytes: usize,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the config from any variable source
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let gemini_api_key = var("GEMINI_API_KEY").filter(|key| !key.trim().is_empty());
        let gemini_model = var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let port = match var("PORT") {
            Some(port) => port.parse().context("PORT must be a valid port number")?,
            None => 3000,
        };

        let page_format = match var("PAGE_SIZE") {
            Some(size) => size.parse()?,
            None => PageFormat::A4,
        };

        let max_upload_bytes = match var("MAX_UPLOAD_BYTES") {
            Some(bytes) => bytes
                .parse()
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let rust_log = var("RUST_LOG").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            gemini_api_key,
            gemini_model,
            port,
            page_format,
            max_upload_bytes,
            rust_log,
        })
    }

    pub fn layout_config(&self) -> LayoutConfig {
        match self.page_format {
            PageFormat::A4 => LayoutConfig::default(),
            PageFormat::Letter => LayoutConfig::letter(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.gemini_api_key, None);
        assert_eq!(config.gemini_model, "gemini-flash-latest");
        assert_eq!(config.port, 3000);
        assert_eq!(config.page_format, PageFormat::A4);
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.layout_config(), LayoutConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("GEMINI_API_KEY", "secret"),
            ("GEMINI_MODEL", "gemini-pro"),
            ("PORT", "8080"),
            ("PAGE_SIZE", "Letter"),
            ("MAX_UPLOAD_BYTES", "1024"),
        ])
        .unwrap();
        assert_eq!(config.gemini_api_key.as_deref(), Some("secret"));
        assert_eq!(config.gemini_model, "gemini-pro");
        assert_eq!(config.port, 8080);
        assert_eq!(config.page_format, PageFormat::Letter);
        assert_eq!(config.max_upload_bytes, 1024);
        assert_eq!(config.layout_config(), LayoutConfig::letter());
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let config = config(&[("GEMINI_API_KEY", "  ")]).unwrap();
        assert_eq!(config.gemini_api_key, None);
    }

    #[test]
    fn test_invalid_values() {
        assert!(config(&[("PORT", "http")]).is_err());
        assert!(config(&[("PAGE_SIZE", "a3")]).is_err());
        assert!(config(&[("MAX_UPLOAD_BYTES", "-1")]).is_err());
    }
}
