//! Salesboard Core - sales data cleaning and aggregation.
//!
//! This crate holds the data pipeline shared by the web server and the CLI:
//!
//! - [`reader`] - Read uploaded CSV bytes into raw, untyped rows
//! - [`sanitize`] - Coerce numeric columns and impute missing values
//! - [`summary`] - Group cleaned records by category
//! - [`types`] - Product records, summaries, usernames and IDs
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no database
//! access, no HTTP. Persistence lives behind the store traits in
//! `salesboard-web`.
//!
//! ```
//! use salesboard_core::{sanitize_csv, summarize};
//!
//! let input = b"name,category,price,quantity_sold,rating\n\
//!               Lamp,Home,10,5,4.0\n\
//!               Lamp,Home,,3,\n";
//!
//! let records = sanitize_csv(input).unwrap();
//! let summary = summarize(&records).unwrap();
//! assert_eq!(summary.len(), 1);
//! assert_eq!(summary[0].top_product, "Lamp");
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod ingest;
pub mod reader;
pub mod sanitize;
pub mod summary;
pub mod types;

pub use ingest::{IngestError, sanitize_csv};
pub use reader::{ParseError, REQUIRED_COLUMNS, read_csv};
pub use sanitize::{SanitizeError, sanitize};
pub use summary::{SummaryError, summarize};
pub use types::*;
