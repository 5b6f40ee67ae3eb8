//! Summary page and CSV upload handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    body::Bytes,
    extract::{Multipart, State, multipart::MultipartError},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use salesboard_core::CategorySummary;

use crate::error::{AppError, add_breadcrumb};
use crate::filters;
use crate::routes::home::HomeTemplate;
use crate::services::upload::{UploadError, UploadService};
use crate::state::AppState;

/// Form value that stores the upload instead of only summarizing it.
pub const ACTION_UPLOAD: &str = "upload_csv";

/// Per-category summary table.
#[derive(Template, WebTemplate)]
#[template(path = "summary.html")]
pub struct SummaryTemplate {
    /// Where the rows came from, shown above the table.
    pub source: String,
    pub rows: Vec<CategorySummary>,
}

/// Upload confirmation page.
#[derive(Template, WebTemplate)]
#[template(path = "upload_success.html")]
pub struct UploadSuccessTemplate {
    pub filename: String,
    pub rows: u64,
}

/// The parts of the upload form we care about.
#[derive(Default)]
struct UploadForm {
    file: Option<(String, Bytes)>,
    action: Option<String>,
}

async fn read_form(mut multipart: Multipart) -> Result<UploadForm, MultipartError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_owned();
                let data = field.bytes().await?;
                form.file = Some((filename, data));
            }
            Some("action") => form.action = Some(field.text().await?),
            _ => {}
        }
    }

    Ok(form)
}

fn is_csv_filename(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .is_some_and(|(stem, ext)| !stem.is_empty() && ext.eq_ignore_ascii_case("csv"))
}

/// Re-render the upload form with an error and a 400 status.
fn rejected(message: String) -> Response {
    (StatusCode::BAD_REQUEST, HomeTemplate { error: Some(message) }).into_response()
}

/// Display the summary of every stored record.
pub async fn stored_summary(State(state): State<AppState>) -> Result<SummaryTemplate, AppError> {
    let rows = UploadService::new(state.products()).stored_summary().await?;

    Ok(SummaryTemplate {
        source: "All uploaded data".to_string(),
        rows,
    })
}

/// Handle the upload form.
///
/// With `action=upload_csv` the cleaned rows are stored; any other action
/// summarizes the file without storing it.
pub async fn upload(State(state): State<AppState>, multipart: Multipart) -> Response {
    let form = match read_form(multipart).await {
        Ok(form) => form,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read upload form");
            return (e.status(), e.body_text()).into_response();
        }
    };

    let Some((filename, data)) = form.file else {
        tracing::warn!("Upload form has no file part");
        return Redirect::to("/").into_response();
    };

    if filename.is_empty() {
        tracing::warn!("Upload has an empty filename");
        return Redirect::to("/").into_response();
    }

    if !is_csv_filename(&filename) {
        tracing::warn!(filename = %filename, "Rejected non-CSV upload");
        return rejected(format!("{filename} is not a .csv file"));
    }

    add_breadcrumb("upload", "Received CSV", Some(&[("filename", filename.as_str())]));

    if form.action.as_deref() == Some(ACTION_UPLOAD) {
        match UploadService::new(state.products()).import(&data).await {
            Ok(rows) => UploadSuccessTemplate { filename, rows }.into_response(),
            Err(UploadError::Ingest(e)) => {
                tracing::warn!(filename = %filename, error = %e, "Rejected upload");
                rejected(e.to_string())
            }
            Err(e) => AppError::from(e).into_response(),
        }
    } else {
        match UploadService::preview(&data) {
            Ok(rows) => SummaryTemplate {
                source: filename,
                rows,
            }
            .into_response(),
            Err(e) => {
                tracing::warn!(filename = %filename, error = %e, "Rejected summary request");
                rejected(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_csv_filename() {
        assert!(is_csv_filename("sales.csv"));
        assert!(is_csv_filename("SALES.CSV"));
        assert!(is_csv_filename("q1.sales.csv"));
        assert!(!is_csv_filename("sales.xlsx"));
        assert!(!is_csv_filename("csv"));
        assert!(!is_csv_filename(".csv"));
    }
}
