use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

// ──────────────────────────── Documents ────────────────────────────

/// Metadata snapshot of a document owned by the upstream backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentItem {
    pub id: String,
    pub title: String,
    pub user_id: String,
    pub document_type: String,
    pub created_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentsResponse {
    pub results: Vec<DocumentItem>,
}

/// Always constructed by the gateway, never forwarded from upstream.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteOutcome {
    pub success: bool,
    pub message: String,
    pub status_code: u16,
}

// ──────────────────────────── Ingest ────────────────────────────

/// Per-file ingest outcome. A mixed list is the normal result of a
/// multi-file upload: each element carries its own success state.
#[derive(Debug, Serialize)]
pub struct IngestResult {
    pub filename: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
}

// ──────────────────────────── Search ────────────────────────────

/// Vector retrieval tuning. Every field is optional; unset fields are
/// omitted from the upstream payload rather than sent as null.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct VectorSearchSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_vector_search: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_hybrid_search: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_filters: Option<HashMap<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_collection_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_measure: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ef_search: Option<u32>,
}

/// Knowledge-graph search tuning, same omit-unset rule.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct KgSearchSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_kg_search: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kg_search_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kg_search_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graphrag_map_system_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graphrag_reduce_system_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_community_description_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_llm_queries_for_global_search: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_search_limits: Option<HashMap<String, Value>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector_search_settings: Option<VectorSearchSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kg_search_settings: Option<KgSearchSettings>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VectorSearchResult {
    pub extraction_id: String,
    pub document_id: String,
    pub user_id: String,
    pub collection_ids: Vec<String>,
    pub score: f64,
    pub text: String,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResults {
    pub vector_search_results: Vec<VectorSearchResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kg_search_results: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: SearchResults,
}

// ──────────────────────────── RAG ────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct RagRequest {
    pub query: String,
}

/// Chat-model completion envelope. The gateway passes this through without
/// reinterpretation; unknown fields survive the round trip via `extra`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatCompletion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Value>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RagResults {
    pub completion: ChatCompletion,
    pub search_results: SearchResults,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RagResponse {
    pub results: RagResults,
}

// ──────────────────────────── Health ────────────────────────────

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub rag_server: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ──────────────────────────── Signup ────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    /// The upstream backend's user id; account rows reuse it as primary key.
    pub external_user_id: String,
    #[serde(default = "default_tier")]
    pub subscription_tier: String,
}

fn default_tier() -> String {
    "free".to_string()
}

#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: String,
    pub email: String,
    pub subscription_tier: String,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: String,
    pub user: UserView,
}
