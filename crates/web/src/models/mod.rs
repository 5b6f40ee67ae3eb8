//! Domain models for the web layer.

pub mod user;

pub use user::{CurrentUser, User};
