use async_trait::async_trait;
use reqwest::Method;
use tracing::{error, info};

use super::{Payload, RagBackend, RawResult};

/// HTTP transport to the upstream RAG backend.
///
/// Owns a single `reqwest::Client`; connection reuse comes from the
/// client's internal pool. Every transport-level error is converted into
/// `RawResult::TransportFailure` here so route handlers never see a raw
/// reqwest error.
pub struct HttpRagBackend {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpRagBackend {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
        }
    }

    fn multipart_form(
        items: Vec<super::UploadItem>,
    ) -> Result<reqwest::multipart::Form, reqwest::Error> {
        let mut form = reqwest::multipart::Form::new();
        for item in items {
            let mut part =
                reqwest::multipart::Part::bytes(item.bytes).file_name(item.filename);
            if let Some(content_type) = item.content_type {
                part = part.mime_str(&content_type)?;
            }
            form = form.part("files", part);
        }
        Ok(form)
    }
}

#[async_trait]
impl RagBackend for HttpRagBackend {
    async fn call(
        &self,
        method: Method,
        path: &str,
        payload: Payload,
        query: &[(&str, String)],
    ) -> RawResult {
        let url = format!("{}{}", self.base_url, path);
        info!("Upstream {method} {url}");

        let mut request = self.http_client.request(method, &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        request = match payload {
            Payload::Empty => request,
            Payload::Json(body) => request.json(&body),
            Payload::Multipart(items) => match Self::multipart_form(items) {
                Ok(form) => request.multipart(form),
                Err(e) => {
                    error!("Failed to encode multipart payload: {e}");
                    return RawResult::TransportFailure {
                        message: format!("Failed to encode multipart payload: {e}"),
                    };
                }
            },
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Upstream request failed: {e}");
                return RawResult::TransportFailure {
                    message: format!("Request failed: {e}"),
                };
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                error!("Failed to read upstream body: {e}");
                return RawResult::TransportFailure {
                    message: format!("Failed to read upstream response: {e}"),
                };
            }
        };

        match serde_json::from_str(&body) {
            Ok(value) => RawResult::Parsed(value),
            Err(_) if status.is_success() => RawResult::Text(body),
            Err(_) => RawResult::TransportFailure {
                message: format!("Upstream returned {status} with unparseable body"),
            },
        }
    }
}
