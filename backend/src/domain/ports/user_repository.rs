//! Port for user persistence.

use async_trait::async_trait;

use crate::domain::{NewUser, User, UserId, UserPatch};

use super::RepositoryError;

/// Store operations for users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Every live user, ordered by identifier.
    async fn list(&self) -> Result<Vec<User>, RepositoryError>;

    /// Exactly one user.
    async fn find_by_id(&self, id: UserId) -> Result<User, RepositoryError>;

    /// Insert a user and return it with its assigned identifier.
    ///
    /// Fails with [`RepositoryError::ConstraintViolation`] when the name or
    /// email is taken or the group reference names no live group.
    async fn create(&self, user: &NewUser) -> Result<User, RepositoryError>;

    /// Merge `patch` over the stored user in one atomic read-modify-write.
    ///
    /// A merged result violating uniqueness or referential integrity fails
    /// with [`RepositoryError::ConstraintViolation`] and leaves the stored
    /// user unchanged.
    async fn update(&self, id: UserId, patch: &UserPatch) -> Result<(), RepositoryError>;

    /// Physically remove a user.
    async fn delete(&self, id: UserId) -> Result<(), RepositoryError>;
}
