//! Process-local store implementing both repository ports.
//!
//! All state sits behind one mutex, so every operation (including the
//! read-modify-write of a partial update) is atomic with respect to the
//! others. Identifiers are assigned sequentially from 1 and never reused,
//! matching a PostgreSQL `serial` column.
//!
//! The adapter enforces the same rules as the relational schema:
//! unique group names, unique user names and emails, users referencing a
//! live group, and no deletion of a group that still has users.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{GroupRepository, RepositoryError, UserRepository};
use crate::domain::{
    Email, Group, GroupId, GroupName, GroupPatch, NewGroup, NewUser, User, UserId, UserName,
    UserPatch,
};

use super::messages;

#[derive(Debug, Default)]
struct StoreState {
    groups: BTreeMap<GroupId, GroupName>,
    users: BTreeMap<UserId, User>,
    last_group_id: i32,
    last_user_id: i32,
}

impl StoreState {
    fn members(&self, group_id: GroupId) -> Vec<User> {
        self.users
            .values()
            .filter(|user| user.group_id() == group_id)
            .cloned()
            .collect()
    }

    fn group(&self, id: GroupId) -> Result<Group, RepositoryError> {
        let name = self
            .groups
            .get(&id)
            .ok_or_else(|| messages::group_not_found(id))?;
        Ok(Group::new(id, name.clone()).with_users(self.members(id)))
    }

    fn ensure_group_name_free(
        &self,
        name: &GroupName,
        except: Option<GroupId>,
    ) -> Result<(), RepositoryError> {
        let taken = self
            .groups
            .iter()
            .any(|(id, existing)| Some(*id) != except && existing == name);
        if taken {
            return Err(messages::group_name_taken());
        }
        Ok(())
    }

    /// Check a prospective user row against every constraint on `users`.
    fn ensure_user_valid(
        &self,
        name: &UserName,
        email: &Email,
        group_id: GroupId,
        except: Option<UserId>,
    ) -> Result<(), RepositoryError> {
        let others = || {
            self.users
                .iter()
                .filter(move |(id, _)| Some(**id) != except)
                .map(|(_, user)| user)
        };
        if others().any(|user| user.name() == name) {
            return Err(messages::user_name_taken());
        }
        if others().any(|user| user.email() == email) {
            return Err(messages::user_email_taken());
        }
        if !self.groups.contains_key(&group_id) {
            return Err(messages::group_missing(group_id));
        }
        Ok(())
    }

    fn next_group_id(&mut self) -> Result<GroupId, RepositoryError> {
        let next = next_sequence_value(self.last_group_id)?;
        let id = GroupId::new(next).map_err(|err| RepositoryError::fault(err.to_string()))?;
        self.last_group_id = next;
        Ok(id)
    }

    fn next_user_id(&mut self) -> Result<UserId, RepositoryError> {
        let next = next_sequence_value(self.last_user_id)?;
        let id = UserId::new(next).map_err(|err| RepositoryError::fault(err.to_string()))?;
        self.last_user_id = next;
        Ok(id)
    }
}

fn next_sequence_value(last: i32) -> Result<i32, RepositoryError> {
    last.checked_add(1)
        .ok_or_else(|| RepositoryError::fault("identifier sequence exhausted"))
}

/// In-memory implementation of [`GroupRepository`] and [`UserRepository`].
///
/// Clones share the same underlying state.
///
/// # Examples
/// ```
/// use roster::domain::ports::GroupRepository;
/// use roster::domain::{GroupName, NewGroup};
/// use roster::outbound::memory::InMemoryStore;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let store = InMemoryStore::new();
/// let name = GroupName::new("group 1").expect("valid name");
/// let created = store.create(&NewGroup { name }).await.expect("created");
/// assert_eq!(created.id().get(), 1);
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<T>(
        &self,
        op: impl FnOnce(&mut StoreState) -> Result<T, RepositoryError>,
    ) -> Result<T, RepositoryError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| RepositoryError::fault("in-memory store lock poisoned"))?;
        op(&mut state)
    }
}

#[async_trait]
impl GroupRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Group>, RepositoryError> {
        self.with_state(|state| {
            Ok(state
                .groups
                .iter()
                .map(|(id, name)| Group::new(*id, name.clone()).with_users(state.members(*id)))
                .collect())
        })
    }

    async fn find_by_id(&self, id: GroupId) -> Result<Group, RepositoryError> {
        self.with_state(|state| state.group(id))
    }

    async fn create(&self, group: &NewGroup) -> Result<Group, RepositoryError> {
        self.with_state(|state| {
            state.ensure_group_name_free(&group.name, None)?;
            let id = state.next_group_id()?;
            state.groups.insert(id, group.name.clone());
            debug!(group_id = %id, "group stored in memory");
            Ok(Group::from_new(id, group.clone()))
        })
    }

    async fn update(&self, id: GroupId, patch: &GroupPatch) -> Result<(), RepositoryError> {
        self.with_state(|state| {
            let mut merged = state.group(id)?;
            merged.apply(patch);
            state.ensure_group_name_free(merged.name(), Some(id))?;
            state.groups.insert(id, merged.name().clone());
            Ok(())
        })
    }

    async fn delete(&self, id: GroupId) -> Result<(), RepositoryError> {
        self.with_state(|state| {
            if !state.groups.contains_key(&id) {
                return Err(messages::group_not_found(id));
            }
            if state.users.values().any(|user| user.group_id() == id) {
                return Err(messages::group_still_referenced(id));
            }
            state.groups.remove(&id);
            Ok(())
        })
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        self.with_state(|state| Ok(state.users.values().cloned().collect()))
    }

    async fn find_by_id(&self, id: UserId) -> Result<User, RepositoryError> {
        self.with_state(|state| {
            state
                .users
                .get(&id)
                .cloned()
                .ok_or_else(|| messages::user_not_found(id))
        })
    }

    async fn create(&self, user: &NewUser) -> Result<User, RepositoryError> {
        self.with_state(|state| {
            state.ensure_user_valid(&user.name, &user.email, user.group_id, None)?;
            let id = state.next_user_id()?;
            let stored = User::from_new(id, user.clone());
            state.users.insert(id, stored.clone());
            debug!(user_id = %id, "user stored in memory");
            Ok(stored)
        })
    }

    async fn update(&self, id: UserId, patch: &UserPatch) -> Result<(), RepositoryError> {
        self.with_state(|state| {
            let mut merged = state
                .users
                .get(&id)
                .cloned()
                .ok_or_else(|| messages::user_not_found(id))?;
            merged.apply(patch);
            state.ensure_user_valid(merged.name(), merged.email(), merged.group_id(), Some(id))?;
            state.users.insert(id, merged);
            Ok(())
        })
    }

    async fn delete(&self, id: UserId) -> Result<(), RepositoryError> {
        self.with_state(|state| {
            state
                .users
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| messages::user_not_found(id))
        })
    }
}
