use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cv_server::{build_router, AppState, Config, GeminiClient, LopdfExtractor, Rewriter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "cv_server={0},md_layout={0},tower_http={0}",
                config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cv-server v{}", env!("CARGO_PKG_VERSION"));

    let rewriter: Option<Arc<dyn Rewriter>> = match &config.gemini_api_key {
        Some(key) => {
            let client = GeminiClient::new(key.clone(), config.gemini_model.clone())
                .context("Failed to build HTTP client")?;
            info!("Using Gemini model {}", client.model());
            Some(Arc::new(client) as Arc<dyn Rewriter>)
        }
        None => {
            warn!("GEMINI_API_KEY is not set, CV processing requests will fail");
            None
        }
    };

    let state = AppState {
        extractor: Arc::new(LopdfExtractor),
        rewriter,
        layout: config.layout_config(),
    };

    let app = build_router(state, config.max_upload_bytes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
