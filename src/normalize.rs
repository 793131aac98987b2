use serde::de::DeserializeOwned;

use crate::upstream::RawResult;

/// A normalized upstream failure: the status code to forward to the caller
/// plus a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamFailure {
    pub status_code: u16,
    pub message: String,
}

/// Decide whether a raw upstream result is a success and coerce it into the
/// expected response type.
///
/// The order of the checks is load-bearing: the backend frequently answers
/// HTTP 200 with an embedded `success: false` flag, so the flag check must
/// run before structural validation.
pub fn normalize<T: DeserializeOwned>(raw: RawResult) -> Result<T, UpstreamFailure> {
    match raw {
        RawResult::TransportFailure { message } => Err(UpstreamFailure {
            status_code: 500,
            message,
        }),
        RawResult::Parsed(value) => {
            if let Some(map) = value.as_object() {
                if map.get("success").and_then(|v| v.as_bool()) == Some(false) {
                    let status_code = map
                        .get("status_code")
                        .and_then(|v| v.as_u64())
                        .map(|v| v as u16)
                        .unwrap_or(500);
                    let message = map
                        .get("message")
                        .and_then(|v| v.as_str())
                        .unwrap_or("operation failed")
                        .to_string();
                    return Err(UpstreamFailure {
                        status_code,
                        message,
                    });
                }
            }
            serde_json::from_value(value).map_err(|_| UpstreamFailure {
                status_code: 500,
                message: "malformed upstream response".to_string(),
            })
        }
        RawResult::Text(_) => Err(UpstreamFailure {
            status_code: 500,
            message: "unexpected non-JSON upstream response".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::api::DocumentsResponse;
    use serde_json::json;

    #[test]
    fn transport_failure_maps_to_500() {
        let raw = RawResult::TransportFailure {
            message: "connection refused".to_string(),
        };
        let err = normalize::<serde_json::Value>(raw).unwrap_err();
        assert_eq!(err.status_code, 500);
        assert_eq!(err.message, "connection refused");
    }

    #[test]
    fn embedded_failure_flag_wins_over_structure() {
        // Body would coerce into Value just fine; the flag check must run first.
        let raw = RawResult::Parsed(json!({
            "success": false,
            "message": "index unavailable",
            "status_code": 503
        }));
        let err = normalize::<serde_json::Value>(raw).unwrap_err();
        assert_eq!(err.status_code, 503);
        assert_eq!(err.message, "index unavailable");
    }

    #[test]
    fn embedded_failure_defaults_when_fields_missing() {
        let raw = RawResult::Parsed(json!({"success": false}));
        let err = normalize::<serde_json::Value>(raw).unwrap_err();
        assert_eq!(err.status_code, 500);
        assert_eq!(err.message, "operation failed");
    }

    #[test]
    fn body_without_failure_flag_coerces_into_expected_shape() {
        let raw = RawResult::Parsed(json!({
            "results": [{
                "id": "doc1",
                "title": "t",
                "user_id": "u",
                "document_type": "txt",
                "created_at": "2024-03-21T10:00:00Z"
            }]
        }));
        let resp: DocumentsResponse = normalize(raw).unwrap();
        assert_eq!(resp.results[0].id, "doc1");
    }

    #[test]
    fn coercion_failure_is_malformed_response() {
        let raw = RawResult::Parsed(json!({"results": [{"id": 42}]}));
        let err = normalize::<DocumentsResponse>(raw).unwrap_err();
        assert_eq!(err.status_code, 500);
        assert_eq!(err.message, "malformed upstream response");
    }

    #[test]
    fn text_body_is_rejected() {
        let raw = RawResult::Text("<html>504 Gateway Timeout</html>".to_string());
        let err = normalize::<serde_json::Value>(raw).unwrap_err();
        assert_eq!(err.status_code, 500);
        assert_eq!(err.message, "unexpected non-JSON upstream response");
    }
}
