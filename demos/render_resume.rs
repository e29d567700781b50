//! Render a markdown CV to PDF
//! Run with: cargo run -p md-layout --example render_resume [input.md] [output.pdf]
//!
//! Without arguments the bundled `demos/sample_cv.md` is rendered to
//! `output/cv.pdf`.

use md_layout::{LayoutConfig, MarkdownRenderer};
use std::fs;
use std::path::PathBuf;

const SAMPLE: &str = include_str!("sample_cv.md");

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let markdown = match args.next() {
        Some(path) => fs::read_to_string(path)?,
        None => SAMPLE.to_string(),
    };
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("output/cv.pdf"));

    let config = match std::env::var("PAGE_SIZE").as_deref() {
        Ok("letter") => LayoutConfig::letter(),
        _ => LayoutConfig::default(),
    };

    let bytes = MarkdownRenderer::new(config).render(&markdown)?;

    if let Some(dir) = output.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(&output, &bytes)?;
    println!("Wrote {} bytes -> {}", bytes.len(), output.display());

    Ok(())
}
