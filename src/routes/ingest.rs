use axum::extract::{Multipart, State};
use axum::routing::post;
use axum::{Json, Router};
use reqwest::Method;
use std::sync::Arc;
use tracing::{error, info};

use crate::app::AppState;
use crate::error::ApiError;
use crate::models::api::IngestResult;
use crate::normalize::normalize;
use crate::upstream::{Payload, UploadItem};

/// Document ingestion routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/documents/ingest", post(ingest_files))
}

/// POST /documents/ingest - Forward uploaded files to the upstream ingest
/// endpoint, one upstream call per file.
///
/// Partial failure is surfaced as a mixed-result list: each element carries
/// its own success state, and result order matches upload order. A failed
/// file does not abort the remaining files.
async fn ingest_files(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<Vec<IngestResult>>, ApiError> {
    let mut items: Vec<UploadItem> = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::Validation(format!("Failed to read multipart field: {e}"))
    })? {
        // File parts carry a filename; anything else is ignored.
        let Some(filename) = field.file_name().map(|s| s.to_string()) else {
            continue;
        };
        let content_type = field.content_type().map(|s| s.to_string());
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::Validation(format!("Failed to read file: {e}")))?
            .to_vec();
        items.push(UploadItem {
            filename,
            bytes,
            content_type,
        });
    }

    if items.is_empty() {
        return Err(ApiError::Validation("No files provided".to_string()));
    }

    let mut results = Vec::with_capacity(items.len());
    for item in items {
        let filename = item.filename.clone();
        info!("Uploading file: {filename}");

        let raw = state
            .backend
            .call(
                Method::POST,
                "/v2/ingest_files",
                Payload::Multipart(vec![item]),
                &[],
            )
            .await;

        let result = match normalize::<serde_json::Value>(raw) {
            Ok(detail) => IngestResult {
                filename,
                success: true,
                message: None,
                detail: Some(detail),
            },
            Err(failure) => {
                error!("Upload failed for {filename}: {}", failure.message);
                IngestResult {
                    filename,
                    success: false,
                    message: Some(failure.message),
                    detail: None,
                }
            }
        };
        results.push(result);
    }

    Ok(Json(results))
}
