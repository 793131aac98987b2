pub mod http;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

/// A file forwarded to the upstream ingest endpoint. Lives only for the
/// duration of one call; the gateway never persists it.
#[derive(Debug, Clone)]
pub struct UploadItem {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// Request body handed to the transport.
#[derive(Debug)]
pub enum Payload {
    Empty,
    Json(Value),
    /// Re-encoded as multipart form data, one `files` part per item.
    Multipart(Vec<UploadItem>),
}

/// What a single upstream call produced. The three cases cover the
/// backend's inconsistent signaling: structured bodies (which may still
/// embed a failure flag), non-JSON bodies, and transport-level failures.
/// Decoded exactly once, in the normalizer.
#[derive(Debug, Clone)]
pub enum RawResult {
    Parsed(Value),
    Text(String),
    TransportFailure { message: String },
}

/// Abstract upstream RAG backend interface. One outbound network call per
/// `call` invocation; no retry.
#[async_trait]
pub trait RagBackend: Send + Sync {
    async fn call(
        &self,
        method: Method,
        path: &str,
        payload: Payload,
        query: &[(&str, String)],
    ) -> RawResult;
}
