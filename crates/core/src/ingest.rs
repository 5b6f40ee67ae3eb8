//! The full CSV-to-records pipeline.

use thiserror::Error;

use crate::reader::{ParseError, read_csv};
use crate::sanitize::{SanitizeError, sanitize};
use crate::summary::SummaryError;
use crate::types::ProductRecord;

/// Errors from turning an upload into clean records and summaries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IngestError {
    /// The input is not a readable table.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The table was read but could not be cleaned.
    #[error(transparent)]
    Sanitize(#[from] SanitizeError),

    /// The cleaned rows could not be summarized.
    #[error(transparent)]
    Summary(#[from] SummaryError),
}

/// Read CSV bytes and sanitize them into product records.
///
/// # Errors
///
/// Returns `IngestError::Parse` for structural problems and
/// `IngestError::Sanitize` when a missing value cannot be imputed.
pub fn sanitize_csv(input: &[u8]) -> Result<Vec<ProductRecord>, IngestError> {
    let rows = read_csv(input)?;
    Ok(sanitize(&rows)?)
}
