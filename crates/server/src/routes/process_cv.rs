use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use chrono::Utc;
use md_layout::MarkdownRenderer;
use md_text::strip_code_fences;
use tracing::info;

use crate::errors::AppError;
use crate::state::AppState;

const DOWNLOAD_NAME: &str = "cv-optimizado.pdf";

/// Fields read from the upload form
#[derive(Debug, Default)]
struct Upload {
    file: Option<Bytes>,
    job_offer: Option<String>,
}

impl Upload {
    async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut upload = Upload::default();
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some("file") => upload.file = Some(field.bytes().await?),
                Some("jobOffer") => upload.job_offer = Some(field.text().await?),
                _ => {}
            }
        }
        Ok(upload)
    }

    /// Both fields, present and non-empty
    fn into_parts(self) -> Result<(Bytes, String), AppError> {
        match (self.file, self.job_offer) {
            (Some(file), Some(offer)) if !file.is_empty() && !offer.trim().is_empty() => {
                Ok((file, offer))
            }
            _ => Err(AppError::MissingFields),
        }
    }
}

/// POST /api/process-cv
/// Rewrites the uploaded CV for the job offer and answers with the PDF.
pub async fn handle_process_cv(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let (file, job_offer) = Upload::read(multipart).await?.into_parts()?;
    info!(
        file_bytes = file.len(),
        offer_chars = job_offer.chars().count(),
        "Processing CV"
    );

    let extractor = state.extractor.clone();
    let cv_text = tokio::task::spawn_blocking(move || extractor.extract(&file))
        .await
        .map_err(anyhow::Error::from)??;

    let rewriter = state.rewriter.as_ref().ok_or(AppError::MissingApiKey)?;
    let markdown = rewriter.rewrite(&cv_text, &job_offer).await?;
    let markdown = strip_code_fences(&markdown);

    let renderer = MarkdownRenderer::new(state.layout.clone()).with_creation_date(Utc::now());
    let pdf = tokio::task::spawn_blocking(move || renderer.render(&markdown))
        .await
        .map_err(anyhow::Error::from)??;

    info!(pdf_bytes = pdf.len(), "CV rendered");

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{DOWNLOAD_NAME}\""),
            ),
        ],
        pdf,
    )
        .into_response())
}
