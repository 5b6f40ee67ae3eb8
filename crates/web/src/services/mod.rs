//! Business logic services for the web layer.
//!
//! # Services
//!
//! - `auth` - Signup, login and bearer tokens
//! - `upload` - CSV ingestion, persistence and summaries

pub mod auth;
pub mod upload;
