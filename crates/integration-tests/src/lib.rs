//! Integration tests for Salesboard.
//!
//! The full router is driven in-process with `tower::ServiceExt::oneshot`
//! over a [`MemoryStore`], so no database or running server is needed.
//!
//! ```bash
//! cargo test -p salesboard-integration-tests
//! ```

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;

use salesboard_web::config::{DEFAULT_JWT_TTL, WebConfig};
use salesboard_web::db::MemoryStore;
use salesboard_web::{AppState, app};

/// Multipart boundary used by [`TestContext::upload`].
pub const BOUNDARY: &str = "salesboard-test-boundary";

/// Signing secret for test tokens.
pub const TEST_JWT_SECRET: &str = "aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6";

/// A sample upload with one missing price and one missing rating.
pub const SAMPLE_CSV: &str = "name,category,price,quantity_sold,rating\n\
Lamp,Home,10,5,4.5\n\
Lamp,Home,,3,4.0\n\
Rug,Home,30,8,\n\
Pen,Office,2,100,3.0\n";

/// A response with its body read to completion.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Parse the body as JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }

    /// The `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }
}

/// Router plus a handle on its in-memory store.
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    router: Router,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// Fresh router over an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_upload_bytes(1024 * 1024)
    }

    /// Fresh router with a custom request body limit.
    #[must_use]
    pub fn with_max_upload_bytes(max_upload_bytes: usize) -> Self {
        Self::with_config(test_config(max_upload_bytes, DEFAULT_JWT_TTL))
    }

    /// Fresh router over an empty store with the given configuration.
    #[must_use]
    pub fn with_config(config: WebConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(config, store.clone(), store.clone());

        Self {
            store,
            router: app(state),
        }
    }

    /// Send a request through the router.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    /// `GET` a path, optionally with a bearer token.
    pub async fn get(&self, path: &str, token: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method("GET").uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    /// `POST` a JSON body.
    pub async fn post_json(&self, path: &str, body: &Value) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// `POST /summary` as a multipart form.
    ///
    /// `file` is `(filename, contents)`; `None` leaves the file part out.
    pub async fn upload(&self, file: Option<(&str, &str)>, action: Option<&str>) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri("/summary")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(file, action)))
            .unwrap();
        self.send(request).await
    }

    /// Sign up and log in, returning the bearer token.
    pub async fn login_as(&self, username: &str, password: &str) -> String {
        let credentials = serde_json::json!({ "username": username, "password": password });

        let signup = self.post_json("/signup", &credentials).await;
        assert_eq!(signup.status, StatusCode::CREATED, "{}", signup.body);

        let login = self.post_json("/login", &credentials).await;
        assert_eq!(login.status, StatusCode::OK, "{}", login.body);

        login.json()["token"].as_str().unwrap().to_owned()
    }
}

/// Configuration for tests. The database URL is never used.
#[must_use]
pub fn test_config(max_upload_bytes: usize, jwt_ttl: Duration) -> WebConfig {
    WebConfig {
        database_url: SecretString::from("postgres://unused@localhost/unused"),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        jwt_secret: SecretString::from(TEST_JWT_SECRET),
        jwt_ttl,
        max_upload_bytes,
        log_json: false,
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// Encode the upload form as `multipart/form-data`.
#[must_use]
pub fn multipart_body(file: Option<(&str, &str)>, action: Option<&str>) -> String {
    let mut body = String::new();

    if let Some((filename, contents)) = file {
        body.push_str(&format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: text/csv\r\n\r\n\
             {contents}\r\n"
        ));
    }

    if let Some(action) = action {
        body.push_str(&format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"action\"\r\n\r\n\
             {action}\r\n"
        ));
    }

    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    body
}
