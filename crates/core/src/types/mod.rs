//! Core types for Salesboard.
//!
//! This module provides the records that flow through the pipeline and
//! validated wrappers for usernames and row IDs.

pub mod id;
pub mod product;
pub mod raw;
pub mod username;

pub use id::UserId;
pub use product::{CategorySummary, ProductRecord};
pub use raw::{RawRow, RawValue};
pub use username::{Username, UsernameError};
