//! CSV upload service.
//!
//! Glues the pure cleaning pipeline in `salesboard-core` to a
//! [`ProductStore`].

use thiserror::Error;

use salesboard_core::{CategorySummary, IngestError, SummaryError, sanitize_csv, summarize};

use crate::db::{ProductStore, RepositoryError};

/// Errors from importing an upload.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The file could not be read or cleaned.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// The cleaned rows could not be stored.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// The stored rows could not be summarized.
    #[error("stored data cannot be summarized: {0}")]
    Summary(#[from] SummaryError),
}

/// Upload operations over a product store.
pub struct UploadService<'a> {
    products: &'a dyn ProductStore,
}

impl<'a> UploadService<'a> {
    /// Create a new upload service.
    #[must_use]
    pub const fn new(products: &'a dyn ProductStore) -> Self {
        Self { products }
    }

    /// Clean a CSV file and append every row to the store.
    ///
    /// Returns the number of rows stored. Nothing is stored if any step fails.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::Ingest` if the file cannot be parsed or cleaned.
    /// Returns `UploadError::Repository` if the write fails.
    pub async fn import(&self, bytes: &[u8]) -> Result<u64, UploadError> {
        let records = sanitize_csv(bytes)?;
        let written = self.products.append(&records).await?;

        tracing::info!(rows = written, "Imported CSV upload");
        Ok(written)
    }

    /// Clean a CSV file and summarize it without storing anything.
    ///
    /// # Errors
    ///
    /// Returns `IngestError` if the file cannot be parsed, cleaned or
    /// summarized.
    pub fn preview(bytes: &[u8]) -> Result<Vec<CategorySummary>, IngestError> {
        let records = sanitize_csv(bytes)?;
        Ok(summarize(&records)?)
    }

    /// Summarize every stored record.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::Repository` if the store cannot be read and
    /// `UploadError::Summary` if the stored rows overflow a category total.
    pub async fn stored_summary(&self) -> Result<Vec<CategorySummary>, UploadError> {
        let records = self.products.read_all().await?;
        Ok(summarize(&records)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::db::MemoryStore;

    const CSV: &[u8] = b"name,category,price,quantity_sold,rating\n\
        Lamp,Home,10,5,4.5\n\
        Rug,Home,30,1,\n\
        Pen,Office,2,100,3.0\n";

    #[tokio::test]
    async fn test_import_then_stored_summary() {
        let store = MemoryStore::new();
        let service = UploadService::new(&store);

        assert_eq!(service.import(CSV).await.unwrap(), 3);
        let summary = service.stored_summary().await.unwrap();

        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].category, "Home");
        assert_eq!(summary[0].total_revenue, Decimal::from(40));
        assert_eq!(summary[1].top_product, "Pen");
    }

    #[tokio::test]
    async fn test_failed_import_stores_nothing() {
        let store = MemoryStore::new();
        let service = UploadService::new(&store);

        let err = service.import(b"name,price\nLamp,1\n").await.unwrap_err();

        assert!(matches!(err, UploadError::Ingest(IngestError::Parse(_))));
        assert!(store.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_preview_does_not_store() {
        let store = MemoryStore::new();
        let service = UploadService::new(&store);

        let summary = UploadService::preview(CSV).unwrap();

        assert_eq!(summary.len(), 2);
        assert!(service.stored_summary().await.unwrap().is_empty());
    }

    #[test]
    fn test_preview_overflow_is_an_ingest_error() {
        let csv = b"name,category,price,quantity_sold,rating\n\
            A,X,50000000000000000000000000000,1,4\n\
            B,X,50000000000000000000000000000,1,4\n";

        let err = UploadService::preview(csv).unwrap_err();
        assert!(matches!(err, IngestError::Summary(_)));
    }

    #[tokio::test]
    async fn test_stored_overflow_is_a_summary_error() {
        let store = MemoryStore::new();
        let service = UploadService::new(&store);
        let csv = b"name,category,price,quantity_sold,rating\n\
            A,X,50000000000000000000000000000,1,4\n";

        // Each upload is fine on its own; together they overflow.
        service.import(csv).await.unwrap();
        service.import(csv).await.unwrap();

        let err = service.stored_summary().await.unwrap_err();
        assert!(matches!(err, UploadError::Summary(_)));
    }
}
