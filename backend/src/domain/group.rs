//! Group records, creation payloads and patches.

use serde::{Deserialize, Serialize};

use super::{GroupName, User, record_id};

record_id! {
    /// Store-assigned group identifier.
    GroupId
}

/// A persisted group.
///
/// ## Invariants
/// - `name` is unique across live groups (enforced by the store).
/// - `users` is derived from the users referencing this group; it is never
///   written back and is omitted from JSON when empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    id: GroupId,
    name: GroupName,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    users: Vec<User>,
}

impl Group {
    /// Build a group without loaded members.
    pub fn new(id: GroupId, name: GroupName) -> Self {
        Self {
            id,
            name,
            users: Vec::new(),
        }
    }

    /// Materialise a freshly inserted group.
    pub fn from_new(id: GroupId, group: NewGroup) -> Self {
        Self::new(id, group.name)
    }

    /// Attach the users that reference this group.
    #[must_use]
    pub fn with_users(mut self, users: Vec<User>) -> Self {
        self.users = users;
        self
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn name(&self) -> &GroupName {
        &self.name
    }

    /// Users referencing this group, when loaded.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Overwrite only the fields present in `patch`.
    pub fn apply(&mut self, patch: &GroupPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
    }
}

/// Payload for creating a group; the store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGroup {
    pub name: GroupName,
}

/// Partial update for a group. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupPatch {
    pub name: Option<GroupName>,
}

impl GroupPatch {
    /// True when applying the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}
