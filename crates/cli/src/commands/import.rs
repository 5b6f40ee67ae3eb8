//! Offline CSV import.
//!
//! ```bash
//! sb-cli import sales.csv
//! ```

use salesboard_web::db::{self, PgProductStore};
use salesboard_web::services::upload::UploadService;

use super::{CommandError, database_url, read_file};

/// Clean a CSV file and append it to the `product` table.
///
/// Returns the number of rows stored. Nothing is stored if any row fails.
///
/// # Errors
///
/// Returns `CommandError` if the file cannot be read or cleaned, or the
/// database write fails.
pub async fn run(path: &str) -> Result<u64, CommandError> {
    let bytes = read_file(path)?;
    let database_url = database_url()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;
    let store = PgProductStore::new(pool);

    let rows = UploadService::new(&store).import(&bytes).await?;
    tracing::info!(rows, path, "Import complete");

    Ok(rows)
}
