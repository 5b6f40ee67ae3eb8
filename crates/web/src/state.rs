//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::WebConfig;
use crate::db::{ProductStore, UserStore};
use crate::services::auth::TokenKeys;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Stores are injected as trait
/// objects so the same router runs over `PostgreSQL` or the in-memory store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: WebConfig,
    products: Arc<dyn ProductStore>,
    users: Arc<dyn UserStore>,
    tokens: TokenKeys,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Web server configuration
    /// * `products` - Store for uploaded sales rows
    /// * `users` - Store for user accounts
    #[must_use]
    pub fn new(
        config: WebConfig,
        products: Arc<dyn ProductStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        let tokens = TokenKeys::new(&config.jwt_secret, config.jwt_ttl);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                products,
                users,
                tokens,
            }),
        }
    }

    /// Get a reference to the web configuration.
    #[must_use]
    pub fn config(&self) -> &WebConfig {
        &self.inner.config
    }

    /// Get a reference to the product store.
    #[must_use]
    pub fn products(&self) -> &dyn ProductStore {
        self.inner.products.as_ref()
    }

    /// Get a reference to the user store.
    #[must_use]
    pub fn users(&self) -> &dyn UserStore {
        self.inner.users.as_ref()
    }

    /// Get a reference to the token keys.
    #[must_use]
    pub fn tokens(&self) -> &TokenKeys {
        &self.inner.tokens
    }
}
