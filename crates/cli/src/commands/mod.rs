//! `sb-cli` subcommands.

pub mod import;
pub mod migrate;
pub mod summarize;

use secrecy::SecretString;
use thiserror::Error;

/// Errors shared by the database-backed commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Input file could not be read.
    #[error("Cannot read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// The CSV file could not be parsed or cleaned.
    #[error("Invalid CSV: {0}")]
    Ingest(#[from] salesboard_core::IngestError),

    /// Rows could not be stored.
    #[error("Store error: {0}")]
    Store(#[from] salesboard_web::db::RepositoryError),
}

impl From<salesboard_web::services::upload::UploadError> for CommandError {
    fn from(err: salesboard_web::services::upload::UploadError) -> Self {
        use salesboard_web::services::upload::UploadError;

        match err {
            UploadError::Ingest(e) => Self::Ingest(e),
            UploadError::Repository(e) => Self::Store(e),
            UploadError::Summary(e) => Self::Ingest(e.into()),
        }
    }
}

/// Database URL from `SALESBOARD_DATABASE_URL`, falling back to `DATABASE_URL`.
fn database_url() -> Result<SecretString, CommandError> {
    dotenvy::dotenv().ok();

    std::env::var("SALESBOARD_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CommandError::MissingEnvVar("SALESBOARD_DATABASE_URL"))
}

/// Read a whole input file.
fn read_file(path: &str) -> Result<Vec<u8>, CommandError> {
    std::fs::read(path).map_err(|source| CommandError::Io {
        path: path.to_owned(),
        source,
    })
}
