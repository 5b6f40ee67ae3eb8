//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

use crate::filters;

/// Upload form page.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub error: Option<String>,
}

/// Display the upload form.
pub async fn home() -> impl IntoResponse {
    HomeTemplate { error: None }
}
