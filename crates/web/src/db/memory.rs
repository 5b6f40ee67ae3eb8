//! In-memory store.
//!
//! Backs both [`ProductStore`] and [`UserStore`] with process-local vectors.
//! Used by the test suites to drive the full router without `PostgreSQL`.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use salesboard_core::{ProductRecord, UserId, Username};

use super::{ProductStore, RepositoryError, UserStore};
use crate::models::User;

/// Process-local store for products and users.
#[derive(Debug)]
pub struct MemoryStore {
    products: RwLock<Vec<ProductRecord>>,
    users: RwLock<Vec<User>>,
    available: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            products: RwLock::new(Vec::new()),
            users: RwLock::new(Vec::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Simulate losing (or regaining) the backing store.
    ///
    /// While unavailable every operation fails with
    /// `RepositoryError::Database`.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), RepositoryError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(RepositoryError::Database(sqlx::Error::PoolTimedOut))
        }
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn append(&self, records: &[ProductRecord]) -> Result<u64, RepositoryError> {
        self.check_available()?;
        let mut products = self.products.write().await;
        products.extend_from_slice(records);
        Ok(records.len() as u64)
    }

    async fn read_all(&self) -> Result<Vec<ProductRecord>, RepositoryError> {
        self.check_available()?;
        Ok(self.products.read().await.clone())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        self.check_available()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(
        &self,
        username: &Username,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        self.check_available()?;
        let mut users = self.users.write().await;

        if users.iter().any(|u| &u.username == username) {
            return Err(RepositoryError::Conflict(
                "username already exists".to_owned(),
            ));
        }

        let id = i32::try_from(users.len() + 1)
            .map_err(|_| RepositoryError::DataCorruption("user id overflow".to_owned()))?;
        let user = User {
            id: UserId::new(id),
            username: username.clone(),
            password_hash: password_hash.to_owned(),
        };
        users.push(user.clone());

        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, RepositoryError> {
        self.check_available()?;
        let users = self.users.read().await;
        Ok(users.iter().find(|u| &u.username == username).cloned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn record(name: &str) -> ProductRecord {
        ProductRecord::new(name, "Home", Decimal::from(10), 2, Decimal::from(4))
    }

    #[tokio::test]
    async fn test_append_preserves_insertion_order() {
        let store = MemoryStore::new();

        store.append(&[record("A"), record("B")]).await.unwrap();
        let written = store.append(&[record("C")]).await.unwrap();

        assert_eq!(written, 1);
        let names: Vec<String> = store
            .read_all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let store = MemoryStore::new();
        let name = Username::parse("alice").unwrap();

        let user = store.create(&name, "hash").await.unwrap();
        assert_eq!(user.id.as_i32(), 1);

        let err = store.create(&name, "other").await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_find_by_username_is_exact() {
        let store = MemoryStore::new();
        store
            .create(&Username::parse("alice").unwrap(), "hash")
            .await
            .unwrap();

        let found = store
            .find_by_username(&Username::parse("alice").unwrap())
            .await
            .unwrap();
        let missing = store
            .find_by_username(&Username::parse("Alice").unwrap())
            .await
            .unwrap();

        assert_eq!(found.unwrap().password_hash, "hash");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_unavailable_store_fails() {
        let store = MemoryStore::new();
        store.set_available(false);

        assert!(store.ping().await.is_err());
        assert!(store.append(&[record("A")]).await.is_err());

        store.set_available(true);
        assert!(store.ping().await.is_ok());
        assert!(store.read_all().await.unwrap().is_empty());
    }
}
