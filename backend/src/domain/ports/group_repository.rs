//! Port for group persistence.

use async_trait::async_trait;

use crate::domain::{Group, GroupId, GroupPatch, NewGroup};

use super::RepositoryError;

/// Store operations for groups.
///
/// Groups returned by [`list`](Self::list) and [`find_by_id`](Self::find_by_id)
/// carry the users that reference them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Every live group, ordered by identifier.
    async fn list(&self) -> Result<Vec<Group>, RepositoryError>;

    /// Exactly one group.
    ///
    /// Fails with [`RepositoryError::NotFound`] when no group has `id`.
    async fn find_by_id(&self, id: GroupId) -> Result<Group, RepositoryError>;

    /// Insert a group and return it with its assigned identifier.
    ///
    /// Fails with [`RepositoryError::ConstraintViolation`] when the name is
    /// already taken.
    async fn create(&self, group: &NewGroup) -> Result<Group, RepositoryError>;

    /// Merge `patch` over the stored group in one atomic read-modify-write.
    ///
    /// Fails with [`RepositoryError::NotFound`] when no group has `id` and
    /// [`RepositoryError::ConstraintViolation`] when the merged name clashes;
    /// the stored group is unchanged on failure.
    async fn update(&self, id: GroupId, patch: &GroupPatch) -> Result<(), RepositoryError>;

    /// Physically remove a group.
    ///
    /// Fails with [`RepositoryError::ConstraintViolation`] while any user
    /// still references the group.
    async fn delete(&self, id: GroupId) -> Result<(), RepositoryError>;
}
