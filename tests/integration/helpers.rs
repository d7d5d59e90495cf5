//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, Bytes};
use http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use docstore_api::AppState;
use docstore_core::config::{AppConfig, DatabaseBackend, StorageBackend};
use docstore_database::{MemoryUserStore, MemoryVersionStore, VersionStore};
use docstore_storage::MemoryStorageProvider;

const BOUNDARY: &str = "docstore-test-boundary";

/// Password given to every test user.
pub const PASSWORD: &str = "correct-horse-battery";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for registering users directly
    pub state: AppState,
    /// Version store handle, for toggling permission flags
    pub versions: Arc<MemoryVersionStore>,
}

impl TestApp {
    /// Create a new test application over in-memory backends
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.database.backend = DatabaseBackend::Memory;
        config.storage.backend = StorageBackend::Memory;
        config.auth.jwt_secret = "integration-test-secret".to_string();
        Self::with_config(config)
    }

    /// Create a test application with an explicit configuration
    pub fn with_config(config: AppConfig) -> Self {
        let versions = Arc::new(MemoryVersionStore::new());
        let state = AppState::new(
            config,
            versions.clone(),
            Arc::new(MemoryUserStore::new()),
            Arc::new(MemoryStorageProvider::new()),
        );
        let router = docstore_api::build_app(state.clone());

        Self {
            router,
            state,
            versions,
        }
    }

    /// Register a user and return their ID
    pub async fn create_user(&self, email: &str) -> Uuid {
        self.state
            .tokens
            .register(email, "Test User", PASSWORD)
            .await
            .expect("Failed to register test user")
            .id
    }

    /// Exchange credentials for a bearer token through the API
    pub async fn login(&self, email: &str) -> String {
        let body = serde_json::json!({ "email": email, "password": PASSWORD });
        let response = self
            .request("POST", "/api/auth-token", Some(body), None)
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response
            .body
            .get("token")
            .and_then(|v| v.as_str())
            .expect("No token in login response")
            .to_string()
    }

    /// Register a user and log them in
    pub async fn user_with_token(&self, email: &str) -> (Uuid, String) {
        let id = self.create_user(email).await;
        let token = self.login(email).await;
        (id, token)
    }

    /// Upload `content` as a new version of `parent_url`
    pub async fn upload(
        &self,
        token: &str,
        parent_url: &str,
        file_name: &str,
        content: &[u8],
    ) -> TestResponse {
        let body = multipart_body(Some(parent_url), Some((file_name, content)));
        self.upload_raw(Some(token), body).await
    }

    /// POST a prebuilt multipart body to the upload endpoint
    pub async fn upload_raw(&self, token: Option<&str>, body: Vec<u8>) -> TestResponse {
        let mut req = Request::builder()
            .method("POST")
            .uri("/api/files/upload/")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            );

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body))
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Set a version's permission flags directly in the store
    pub async fn set_permissions(&self, id: Uuid, can_read: Option<bool>, can_write: Option<bool>) {
        self.versions
            .set_permissions(id, can_read, can_write)
            .await
            .expect("Failed to update permissions");
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");
        self.send(req).await
    }

    /// GET `path` with an optional bearer token
    pub async fn get(&self, path: &str, token: Option<&str>) -> TestResponse {
        self.request("GET", path, None, token).await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            bytes,
            body,
        }
    }
}

/// Build a multipart/form-data body with optional `parent_url` and `file` parts
pub fn multipart_body(parent_url: Option<&str>, file: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();

    if let Some(parent_url) = parent_url {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"parent_url\"\r\n\r\n{parent_url}\r\n"
            )
            .as_bytes(),
        );
    }

    if let Some((file_name, content)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body
    pub bytes: Bytes,
    /// Parsed JSON body, `Null` when the body is not JSON
    pub body: Value,
}

impl TestResponse {
    /// The `error` message of a JSON error body
    pub fn error(&self) -> &str {
        self.body
            .get("error")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
    }

    /// A header value as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
