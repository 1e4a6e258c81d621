use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    http::{HeaderValue, Method, header},
    response::IntoResponse,
    routing::{get, post},
};
use extract::CompanyRecord;
use hierarchy::{OwnershipNode, StructureStats, build_forest};
use ingest::{Document, DocumentKind};
use pipeline::{Pipeline, RecordSource};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::{CorsConfig, UploadConfig};
use crate::error::ApiError;
use crate::export::to_csv;
use crate::metrics::{Metrics, MetricsSnapshot, TimedOperation};
use crate::upload::{StoredUpload, extension_of, secure_filename};

pub struct AppState {
    pub pipeline: Pipeline,
    pub upload: UploadConfig,
    pub metrics: Arc<Metrics>,
}

#[derive(Serialize)]
struct UploadResponse {
    success: bool,
    companies: Vec<CompanyRecord>,
    extracted_text: String,
    stats: StructureStats,
    source: RecordSource,
}

#[derive(Deserialize)]
struct CompaniesRequest {
    #[serde(default)]
    companies: Vec<CompanyRecord>,
}

pub fn router(state: Arc<AppState>, cors: &CorsConfig) -> Router {
    let body_limit = state.upload.max_bytes;

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/upload", post(upload_file))
        .route("/export/csv", post(export_csv))
        .route("/tree", post(company_tree))
        .route("/metrics", get(get_metrics))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors_layer(cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

async fn index() -> Json<Value> {
    Json(json!({
        "message": "Company Structure API",
        "version": "1.0",
        "endpoints": ["/upload", "/health", "/export/csv", "/tree", "/metrics"],
    }))
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

async fn get_metrics(State(state): State<Arc<AppState>>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}

async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let result = process_upload(&state, multipart).await;
    state.metrics.record_request(result.is_ok());
    result.map(Json)
}

async fn process_upload(
    state: &AppState,
    mut multipart: Multipart,
) -> Result<UploadResponse, ApiError> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        upload = Some((filename, bytes));
        break;
    }

    let (filename, bytes) =
        upload.ok_or_else(|| ApiError::BadRequest("No file provided".to_string()))?;
    if filename.is_empty() {
        return Err(ApiError::BadRequest("No file selected".to_string()));
    }

    let filename = secure_filename(&filename);
    let (extension, kind) = extension_of(&filename)
        .filter(|ext| state.upload.allows(ext))
        .and_then(|ext| DocumentKind::from_extension(&ext).map(|kind| (ext, kind)))
        .ok_or_else(|| ApiError::BadRequest("Invalid file type".to_string()))?;

    info!(filename = %filename, bytes = bytes.len(), kind = kind.as_str(), "Received upload");

    let stored = StoredUpload::save(&state.upload.dir, &extension, &bytes)
        .await
        .map_err(|e| ApiError::internal(format!("{:#}", e)))?;

    let timer = TimedOperation::start();
    let result = state
        .pipeline
        .run(&Document::new(stored.path(), kind))
        .await;
    stored.remove().await;
    let output = result?;

    state
        .metrics
        .record_pipeline(timer.elapsed(), output.source, output.companies.len());

    Ok(UploadResponse {
        success: true,
        stats: StructureStats::from_records(&output.companies),
        companies: output.companies,
        extracted_text: output.extracted_text,
        source: output.source,
    })
}

async fn export_csv(Json(request): Json<CompaniesRequest>) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"company_structure.csv\"",
            ),
        ],
        to_csv(&request.companies),
    )
}

async fn company_tree(Json(request): Json<CompaniesRequest>) -> Json<Vec<OwnershipNode>> {
    let companies = hierarchy::build_hierarchy(request.companies);
    Json(build_forest(&companies))
}
