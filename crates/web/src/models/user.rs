//! User domain types.
//!
//! These types represent validated domain objects separate from database row types.

use salesboard_core::{UserId, Username};

/// A registered account.
///
/// `Debug` is implemented manually so the password hash never reaches logs.
#[derive(Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login name.
    pub username: Username,
    /// Argon2 PHC string.
    pub password_hash: String,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

/// The caller identified by a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    /// Username from the token subject.
    pub username: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_password_hash() {
        let user = User {
            id: UserId::new(1),
            username: Username::parse("alice").unwrap(),
            password_hash: "$argon2id$v=19$secret-hash".to_owned(),
        };

        let debug_output = format!("{user:?}");
        assert!(debug_output.contains("alice"));
        assert!(!debug_output.contains("secret-hash"));
    }
}
