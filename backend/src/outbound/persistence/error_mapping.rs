//! Diesel and pool error classification for the roster repositories.
//!
//! Every store failure becomes exactly one [`RepositoryError`] kind:
//! `NotFound` for missing rows, `ConstraintViolation` for unique and
//! foreign-key violations, `Fault` for everything else.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, warn};

use crate::domain::ports::RepositoryError;

use super::pool::PoolError;

const GROUPS_NAME_KEY: &str = "groups_name_key";
const USERS_NAME_KEY: &str = "users_name_key";
const USERS_EMAIL_KEY: &str = "users_email_key";
const USERS_GROUP_ID_FKEY: &str = "users_group_id_fkey";

/// Pool exhaustion or a bad connection string is an unclassified fault.
pub(super) fn map_pool_error(error: PoolError) -> RepositoryError {
    debug!(%error, "database pool checkout failed");
    RepositoryError::fault(error.message())
}

/// Classify a Diesel error.
///
/// `NotFound` carries a generic message; callers that know the identifier
/// produce their own wording instead.
pub(super) fn map_diesel_error(error: DieselError) -> RepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            %error,
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => RepositoryError::not_found("record not found"),
        DieselError::DatabaseError(
            kind @ (DatabaseErrorKind::UniqueViolation | DatabaseErrorKind::ForeignKeyViolation),
            info,
        ) => RepositoryError::constraint_violation(constraint_message(
            kind,
            info.constraint_name(),
        )),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RepositoryError::fault("database connection error")
        }
        DieselError::QueryBuilderError(_) => RepositoryError::fault("database query error"),
        _ => RepositoryError::fault("database error"),
    }
}

impl From<DieselError> for RepositoryError {
    fn from(error: DieselError) -> Self {
        map_diesel_error(error)
    }
}

/// True when the write was rejected by a foreign key.
pub(super) fn is_foreign_key_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)
    )
}

fn constraint_message(kind: DatabaseErrorKind, constraint: Option<&str>) -> &'static str {
    match constraint {
        Some(GROUPS_NAME_KEY) => "group name is already taken",
        Some(USERS_NAME_KEY) => "user name is already taken",
        Some(USERS_EMAIL_KEY) => "user email is already taken",
        Some(USERS_GROUP_ID_FKEY) => "referenced group does not exist",
        other => {
            warn!(
                constraint = ?other,
                ?kind,
                "unrecognised constraint violation"
            );
            match kind {
                DatabaseErrorKind::UniqueViolation => "value is already taken",
                _ => "referential integrity violation",
            }
        }
    }
}
