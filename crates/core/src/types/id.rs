//! Row identifiers.

/// Primary key of an `app_user` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type), sqlx(transparent))]
pub struct UserId(i32);

impl UserId {
    /// Wrap a raw key.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Get the underlying key.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }
}
