//! Failure constructors shared by every store adapter so both report the
//! same wording for the same condition.

use crate::domain::ports::RepositoryError;
use crate::domain::{GroupId, UserId};

pub(crate) fn group_not_found(id: GroupId) -> RepositoryError {
    RepositoryError::not_found(format!("group {id} not found"))
}

pub(crate) fn user_not_found(id: UserId) -> RepositoryError {
    RepositoryError::not_found(format!("user {id} not found"))
}

pub(crate) fn group_name_taken() -> RepositoryError {
    RepositoryError::constraint_violation("group name is already taken")
}

pub(crate) fn user_name_taken() -> RepositoryError {
    RepositoryError::constraint_violation("user name is already taken")
}

pub(crate) fn user_email_taken() -> RepositoryError {
    RepositoryError::constraint_violation("user email is already taken")
}

pub(crate) fn group_missing(id: GroupId) -> RepositoryError {
    RepositoryError::constraint_violation(format!("group {id} does not exist"))
}

pub(crate) fn group_still_referenced(id: GroupId) -> RepositoryError {
    RepositoryError::constraint_violation(format!("group {id} is still referenced by users"))
}
