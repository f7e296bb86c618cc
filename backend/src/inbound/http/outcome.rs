//! Repository outcome to HTTP status table.
//!
//! Every handler failure coming from a repository is rendered through
//! [`failure`], so the status contract for both resources lives here.
//!
//! | Failure             | list | get | create | update | delete (group) | delete (user) |
//! |---------------------|------|-----|--------|--------|----------------|---------------|
//! | NotFound            | 500  | 404 | 500    | 404    | 404            | 404           |
//! | ConstraintViolation | 500  | 500 | 400    | 404    | 400            | 500           |
//! | Fault               | 500  | 500 | 500    | 500    | 500            | 500           |
//!
//! Update-path constraint violations are reported as 404, which is what
//! existing clients observe.

use actix_web::http::StatusCode;
use tracing::{error, warn};

use crate::domain::Error;
use crate::domain::ports::RepositoryError;

use super::error::ApiError;

/// Resource family a handler serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Group,
    User,
}

impl Resource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::User => "user",
        }
    }
}

/// Repository operation a handler performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Get => "get",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Status served for a failed repository call.
pub fn status_for(resource: Resource, operation: Operation, error: &RepositoryError) -> StatusCode {
    use Operation::{Create, Delete, Get, List, Update};

    match (error, operation) {
        (RepositoryError::NotFound { .. }, Get | Update | Delete) => StatusCode::NOT_FOUND,
        (RepositoryError::ConstraintViolation { .. }, Create) => StatusCode::BAD_REQUEST,
        (RepositoryError::ConstraintViolation { .. }, Update) => StatusCode::NOT_FOUND,
        (RepositoryError::ConstraintViolation { .. }, Delete) if resource == Resource::Group => {
            StatusCode::BAD_REQUEST
        }
        (RepositoryError::NotFound { .. }, List | Create)
        | (RepositoryError::ConstraintViolation { .. }, List | Get | Delete)
        | (RepositoryError::Fault { .. }, _) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Log a failed repository call and build the client response.
///
/// Failures that end up as 500 are logged at `error` and their message is
/// redacted on the wire; everything else is logged at `warn`.
pub fn failure(resource: Resource, operation: Operation, err: RepositoryError) -> ApiError {
    let status = status_for(resource, operation, &err);
    let message = err.to_string();

    if status.is_server_error() {
        error!(
            resource = resource.as_str(),
            operation = operation.as_str(),
            error = %message,
            "repository operation failed"
        );
        return ApiError::new(status, Error::internal(message));
    }

    warn!(
        resource = resource.as_str(),
        operation = operation.as_str(),
        error = %message,
        status = status.as_u16(),
        "repository operation rejected"
    );
    let error = match err {
        RepositoryError::NotFound { message } => Error::not_found(message),
        RepositoryError::ConstraintViolation { message } => Error::constraint_violation(message),
        RepositoryError::Fault { message } => Error::internal(message),
    };
    ApiError::new(status, error)
}
