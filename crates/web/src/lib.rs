//! Salesboard web library.
//!
//! CSV uploads, per-category sales summaries and user accounts over axum.
//! The binary in `main.rs` wires [`routes::app`] to `PostgreSQL`; tests wire
//! it to [`db::MemoryStore`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use config::WebConfig;
pub use routes::app;
pub use state::AppState;
