//! Shared test doubles for route handler tests: a scripted upstream
//! backend and an in-memory account store.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use reqwest::Method;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use crate::accounts::{AccountError, AccountStore, NewUser, User};
use crate::app::AppState;
use crate::config::Settings;
use crate::upstream::{Payload, RagBackend, RawResult};

// ──────────────────────────── Mock backend ────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedPayload {
    Empty,
    Json(Value),
    /// Filenames of the multipart parts.
    Multipart(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub payload: RecordedPayload,
    pub query: Vec<(String, String)>,
}

/// Upstream backend double that replays scripted results in order and
/// records every call it receives.
pub struct MockBackend {
    responses: Mutex<VecDeque<RawResult>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockBackend {
    pub fn with_responses(responses: Vec<RawResult>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RagBackend for MockBackend {
    async fn call(
        &self,
        method: Method,
        path: &str,
        payload: Payload,
        query: &[(&str, String)],
    ) -> RawResult {
        let recorded = match &payload {
            Payload::Empty => RecordedPayload::Empty,
            Payload::Json(value) => RecordedPayload::Json(value.clone()),
            Payload::Multipart(items) => {
                RecordedPayload::Multipart(items.iter().map(|i| i.filename.clone()).collect())
            }
        };
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            path: path.to_string(),
            payload: recorded,
            query: query.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
        });

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| RawResult::TransportFailure {
                message: "mock backend exhausted".to_string(),
            })
    }
}

// ──────────────────────────── Memory account store ────────────────────────────

/// In-memory account store. The mutex makes check-then-insert atomic, the
/// same guarantee the Postgres store gets from its uniqueness constraints.
#[derive(Default)]
pub struct MemoryAccountStore {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_email_or_id(
        &self,
        email: &str,
        id: &str,
    ) -> anyhow::Result<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.email == email || u.id == id)
            .cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, AccountError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email || u.id == user.id) {
            return Err(AccountError::Conflict);
        }
        let created = User {
            id: user.id,
            email: user.email,
            subscription_tier: user.subscription_tier,
            created_at: Utc::now(),
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn initialize(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

// ──────────────────────────── Router helpers ────────────────────────────

fn test_settings() -> Settings {
    Settings {
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: "test".to_string(),
        rag_base_url: "http://localhost:7272".to_string(),
        upstream_timeout_secs: 5,
        postgres_uri: String::new(),
        db_pool_size: 1,
    }
}

pub fn test_router(backend: Arc<MockBackend>) -> Router {
    test_router_with_accounts(backend, Arc::new(MemoryAccountStore::default()))
}

pub fn test_router_with_accounts(
    backend: Arc<MockBackend>,
    accounts: Arc<MemoryAccountStore>,
) -> Router {
    super::build_router(Arc::new(AppState {
        settings: test_settings(),
        backend,
        accounts,
    }))
}

/// Send one request through the router and decode the JSON response body.
pub async fn request_json(
    router: Router,
    method: Method,
    path: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method.as_str())
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method.as_str())
            .uri(path)
            .body(Body::empty())
            .unwrap(),
    };

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Build a multipart/form-data request body with one `files` part per
/// (filename, content) pair.
pub fn multipart_request(path: &str, files: &[(&str, &str)]) -> Request<Body> {
    let boundary = "gateway-test-boundary";
    let mut body = String::new();
    for (filename, content) in files {
        body.push_str(&format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"{filename}\"\r\nContent-Type: text/plain\r\n\r\n{content}\r\n"
        ));
    }
    body.push_str(&format!("--{boundary}--\r\n"));

    Request::builder()
        .method("POST")
        .uri(path)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Send a prebuilt request and decode the JSON response body.
pub async fn send_request(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
