use axum::extract::{Path, State};
use axum::routing::{delete, get};
use axum::{Json, Router};
use reqwest::Method;
use std::sync::Arc;
use tracing::{error, info};

use crate::app::AppState;
use crate::error::ApiError;
use crate::filter;
use crate::models::api::{DeleteOutcome, DocumentsResponse, HealthResponse};
use crate::normalize::normalize;
use crate::upstream::Payload;

/// Document management routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/documents", get(list_documents))
        .route("/documents/{document_id}", delete(delete_document))
}

/// GET /documents - Overview of all upstream documents.
async fn list_documents(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DocumentsResponse>, ApiError> {
    info!("Fetching documents overview");

    let raw = state
        .backend
        .call(Method::GET, "/v2/documents_overview", Payload::Empty, &[])
        .await;

    let response = normalize::<DocumentsResponse>(raw).map_err(|failure| {
        error!("Failed to fetch documents: {}", failure.message);
        ApiError::from(failure)
    })?;

    Ok(Json(response))
}

/// DELETE /documents/:document_id - Delete a document by ID.
///
/// Deleting a nonexistent id is not an error: any upstream response that
/// passes normalization yields `success: true`. The outcome body is the
/// contract; the HTTP status is always 200.
async fn delete_document(
    State(state): State<Arc<AppState>>,
    Path(document_id): Path<String>,
) -> Json<DeleteOutcome> {
    info!("Deleting document: {document_id}");

    let filters = filter::equals("document_id", &document_id);
    let query = [("filters", filter::to_query_param(&filters))];

    let raw = state
        .backend
        .call(Method::DELETE, "/v2/delete", Payload::Empty, &query)
        .await;

    match normalize::<serde_json::Value>(raw) {
        Ok(_) => Json(DeleteOutcome {
            success: true,
            message: format!("{document_id} deleted"),
            status_code: 200,
        }),
        Err(failure) => {
            error!("Failed to delete document {document_id}: {}", failure.message);
            Json(DeleteOutcome {
                success: false,
                message: format!("Failed to delete document: {}", failure.message),
                status_code: failure.status_code,
            })
        }
    }
}

/// GET /health - Liveness probe against the upstream backend.
///
/// Issues a lightweight documents-overview call; no caching, no rate
/// limiting, no other side effects.
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let raw = state
        .backend
        .call(Method::GET, "/v2/documents_overview", Payload::Empty, &[])
        .await;

    match normalize::<serde_json::Value>(raw) {
        Ok(_) => Json(HealthResponse {
            status: "healthy".to_string(),
            rag_server: "connected".to_string(),
            error: None,
        }),
        Err(failure) => {
            error!("Health check failed: {}", failure.message);
            Json(HealthResponse {
                status: "unhealthy".to_string(),
                rag_server: "disconnected".to_string(),
                error: Some(failure.message),
            })
        }
    }
}
