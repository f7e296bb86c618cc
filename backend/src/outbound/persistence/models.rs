//! Internal Diesel row structs. Never exposed to the domain.

use diesel::prelude::*;

use crate::domain::ports::RepositoryError;
use crate::domain::{
    Email, Group, GroupId, GroupName, NewGroup, NewUser, Password, User, UserId, UserName,
};

use super::schema::{groups, users};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = groups)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct GroupRow {
    pub id: i32,
    pub name: String,
}

impl GroupRow {
    /// Rebuild the domain group together with its members.
    pub(crate) fn into_domain(self, members: Vec<User>) -> Result<Group, RepositoryError> {
        let id = GroupId::new(self.id).map_err(corrupt_row)?;
        let name = GroupName::new(self.name).map_err(corrupt_row)?;
        Ok(Group::new(id, name).with_users(members))
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = groups)]
pub(crate) struct NewGroupRow<'a> {
    pub name: &'a str,
}

impl<'a> From<&'a NewGroup> for NewGroupRow<'a> {
    fn from(group: &'a NewGroup) -> Self {
        Self {
            name: group.name.as_str(),
        }
    }
}

/// Full-row changeset; partial updates are merged in the domain first.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = groups)]
pub(crate) struct GroupChangeset<'a> {
    pub name: &'a str,
}

impl<'a> From<&'a Group> for GroupChangeset<'a> {
    fn from(group: &'a Group) -> Self {
        Self {
            name: group.name().as_str(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = users)]
#[diesel(belongs_to(GroupRow, foreign_key = group_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password: String,
    pub group_id: i32,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = UserId::new(row.id).map_err(corrupt_row)?;
        let user = NewUser {
            name: UserName::new(row.name).map_err(corrupt_row)?,
            email: Email::new(row.email).map_err(corrupt_row)?,
            password: Password::new(row.password).map_err(corrupt_row)?,
            group_id: GroupId::new(row.group_id).map_err(corrupt_row)?,
        };
        Ok(User::from_new(id, user))
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub group_id: i32,
}

impl<'a> From<&'a NewUser> for NewUserRow<'a> {
    fn from(user: &'a NewUser) -> Self {
        Self {
            name: user.name.as_str(),
            email: user.email.as_str(),
            password: user.password.as_str(),
            group_id: user.group_id.get(),
        }
    }
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChangeset<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub group_id: i32,
}

impl<'a> From<&'a User> for UserChangeset<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            name: user.name().as_str(),
            email: user.email().as_str(),
            password: user.password().as_str(),
            group_id: user.group_id().get(),
        }
    }
}

fn corrupt_row(error: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::fault(format!("stored row is invalid: {error}"))
}
