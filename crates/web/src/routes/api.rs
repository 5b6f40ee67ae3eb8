//! Token-protected JSON API.

use axum::{Json, extract::State};
use serde::Serialize;

use salesboard_core::CategorySummary;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::services::upload::UploadService;
use crate::state::AppState;

/// Response of `GET /api/summary`.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub categories: Vec<CategorySummary>,
}

/// Summary of every stored record, for authenticated callers.
pub async fn summary(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<SummaryResponse>> {
    let categories = UploadService::new(state.products()).stored_summary().await?;

    tracing::debug!(username = %user.username, categories = categories.len(), "API summary");
    Ok(Json(SummaryResponse { categories }))
}
