//! User records, creation payloads and patches.

use serde::{Deserialize, Serialize};

use super::{Email, GroupId, Password, UserName, record_id};

record_id! {
    /// Store-assigned user identifier.
    UserId
}

/// A persisted user.
///
/// ## Invariants
/// - `name` and `email` are each unique across live users.
/// - `group_id` names a live group (referential integrity, enforced by the
///   store).
///
/// Serialises as `{"id","name","email","password","groupID"}`; the resolved
/// group is never embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: UserName,
    email: Email,
    password: Password,
    #[serde(rename = "groupID", alias = "groupId")]
    group_id: GroupId,
}

impl User {
    /// Materialise a user from its identifier and field values.
    pub fn from_new(id: UserId, user: NewUser) -> Self {
        let NewUser {
            name,
            email,
            password,
            group_id,
        } = user;
        Self {
            id,
            name,
            email,
            password,
            group_id,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    pub fn group_id(&self) -> GroupId {
        self.group_id
    }

    /// Overwrite only the fields present in `patch`.
    pub fn apply(&mut self, patch: &UserPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
        if let Some(password) = &patch.password {
            self.password = password.clone();
        }
        if let Some(group_id) = patch.group_id {
            self.group_id = group_id;
        }
    }
}

/// Payload for creating a user; the store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: UserName,
    pub email: Email,
    pub password: Password,
    pub group_id: GroupId,
}

/// Partial update for a user. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<UserName>,
    pub email: Option<Email>,
    pub password: Option<Password>,
    pub group_id: Option<GroupId>,
}

impl UserPatch {
    /// True when applying the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.group_id.is_none()
    }
}
