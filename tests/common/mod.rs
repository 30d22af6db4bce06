use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::util::ServiceExt;

use vidhive::config::AuthConfig;
use vidhive::server::{AppState, create_router};
use vidhive::store::{SqliteStore, Store};

pub struct TestApp {
    router: Router,
    _temp_dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let store = SqliteStore::new(temp_dir.path().join("test.db")).expect("open store");
        store.initialize().expect("initialize schema");

        let auth = AuthConfig::new(
            "test-access-secret".to_string(),
            "test-refresh-secret".to_string(),
        );
        let state = Arc::new(AppState::new(Arc::new(store), auth));

        Self {
            router: create_router(state),
            _temp_dir: temp_dir,
        }
    }

    /// Sends a request through the in-process router and returns
    /// (status, parsed body, response headers).
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value, HeaderMap) {
        let mut builder = Request::builder().method(method).uri(path);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, body, headers)
    }

    pub async fn register(&self, username: &str) -> Value {
        let (status, body, _) = self
            .request(
                "POST",
                "/api/v1/users/register",
                None,
                Some(json!({
                    "username": username,
                    "email": format!("{username}@example.com"),
                    "fullname": format!("User {username}"),
                    "password": format!("{username}-password"),
                    "avatar": "https://cdn.example.com/avatar.png",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        body["data"].clone()
    }

    /// Registers (if needed) and logs in, returning (access, refresh) tokens.
    pub async fn login(&self, username: &str) -> (String, String) {
        let (status, body, _) = self
            .request(
                "POST",
                "/api/v1/users/login",
                None,
                Some(json!({
                    "username": username,
                    "password": format!("{username}-password"),
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");

        let access = body["data"]["access_token"].as_str().expect("access token");
        let refresh = body["data"]["refresh_token"]
            .as_str()
            .expect("refresh token");
        (access.to_string(), refresh.to_string())
    }

    pub async fn signup(&self, username: &str) -> (String, String) {
        self.register(username).await;
        self.login(username).await
    }

    pub async fn publish_video(&self, token: &str, title: &str) -> Value {
        let (status, body, _) = self
            .request(
                "POST",
                "/api/v1/videos",
                Some(token),
                Some(json!({
                    "title": title,
                    "description": "a test video",
                    "video_file": "https://cdn.example.com/video.mp4",
                    "thumbnail": "https://cdn.example.com/thumb.png",
                    "duration": 42.0,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "publish failed: {body}");
        body["data"].clone()
    }
}

/// Collects Set-Cookie values from a response.
pub fn set_cookies(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(|v| v.to_string())
        .collect()
}
