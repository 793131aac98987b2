use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use reqwest::Method;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

use crate::app::AppState;
use crate::error::ApiError;
use crate::models::api::{RagRequest, RagResponse, SearchRequest, SearchResponse};
use crate::normalize::normalize;
use crate::upstream::Payload;

/// Search and RAG query routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/search", post(search))
        .route("/rag", post(rag_query))
}

/// POST /search - Vector / knowledge-graph search against the upstream
/// backend. Only fields the caller actually set are forwarded; unset
/// optional settings are omitted from the payload, not sent as null.
async fn search(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    info!("Processing search request: {}", request.query);

    let payload = serde_json::to_value(&request)
        .map_err(|e| ApiError::Internal(format!("Failed to serialize search request: {e}")))?;

    let raw = state
        .backend
        .call(Method::POST, "/v2/search", Payload::Json(payload), &[])
        .await;

    let response = normalize::<SearchResponse>(raw).map_err(|failure| {
        error!("Search request failed: {}", failure.message);
        ApiError::from(failure)
    })?;

    info!("Search request completed successfully");
    Ok(Json(response))
}

/// POST /rag - Forward a query to the upstream RAG endpoint. The completion
/// payload comes back untouched.
async fn rag_query(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RagRequest>,
) -> Result<Json<RagResponse>, ApiError> {
    info!("Sending query to RAG server");

    let raw = state
        .backend
        .call(
            Method::POST,
            "/v2/rag",
            Payload::Json(json!({ "query": request.query })),
            &[],
        )
        .await;

    let response = normalize::<RagResponse>(raw).map_err(|failure| {
        error!("RAG query failed: {}", failure.message);
        ApiError::from(failure)
    })?;

    Ok(Json(response))
}
