//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /               - Upload form
//! GET  /summary        - Summary of stored records (HTML)
//! POST /summary        - Upload (action=upload_csv) or summarize a CSV file
//! POST /signup         - Create an account (JSON)
//! POST /login          - Exchange credentials for a bearer token (JSON)
//! GET  /api/summary    - Summary of stored records (JSON, bearer token)
//! GET  /health         - Liveness
//! GET  /health/ready   - Readiness (store reachable)
//! ```

pub mod api;
pub mod auth;
pub mod health;
pub mod home;
pub mod summary;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Page and API routes, without state or layers.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route(
            "/summary",
            get(summary::stored_summary).post(summary::upload),
        )
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/api/summary", get(api::summary))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
}

/// The complete application: routes, body limit, request IDs and tracing.
///
/// Sentry layers are added by the binary so tests can build the router
/// without a Sentry client.
pub fn app(state: AppState) -> Router {
    let max_upload_bytes = state.config().max_upload_bytes;

    routes()
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_upload_bytes))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}
