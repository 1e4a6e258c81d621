mod config;
mod error;
mod export;
mod metrics;
mod routes;
mod upload;

use anyhow::{Context, Result};
use extract::Extractor;
use ingest::FileReader;
use pipeline::Pipeline;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::metrics::Metrics;
use crate::routes::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = AppConfig::load(Some(&AppConfig::default_path()))?;

    let reader = FileReader::with_ocr(config.ocr.clone());
    let extractor = Extractor::from_settings(&config.llm, &config.retry, &config.cache)
        .context("Failed to create extraction backend")?;
    tracing::info!(
        backend = extractor.backend_name(),
        model = %config.llm.model,
        strict = config.pipeline.strict,
        "Extraction backend ready"
    );

    let state = Arc::new(AppState {
        pipeline: Pipeline::new(reader, extractor, config.pipeline.clone()),
        upload: config.upload.clone(),
        metrics: Metrics::new(),
    });
    let app = routes::router(state, &config.cors);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    tracing::info!("Server listening on http://{}", address);

    axum::serve(listener, app).await?;
    Ok(())
}

/// `RUST_LOG` filters (default `info`); `ORGCHART_LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("ORGCHART_LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
