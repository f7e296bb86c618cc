//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay free of `utoipa`; these mirrors describe their wire
//! shape and are registered under the domain type names.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The path identifier or request body could not be decoded or validated.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// No record exists for the requested identifier.
    #[schema(rename = "not_found")]
    NotFound,
    /// A uniqueness or referential-integrity rule blocked the write.
    #[schema(rename = "constraint_violation")]
    ConstraintViolation,
    /// An unexpected store failure; the message is redacted.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = Error, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ErrorSchema {
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    #[schema(example = "group 7 not found")]
    message: String,
    /// Correlation identifier, also sent as the `Trace-Id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field-level context for validation failures.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = User)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct UserSchema {
    #[schema(example = 1, minimum = 1)]
    id: i32,
    #[schema(example = "ada", max_length = 255)]
    name: String,
    #[schema(example = "ada@example.com", max_length = 255)]
    email: String,
    #[schema(example = "correct horse battery staple", max_length = 255)]
    password: String,
    #[schema(rename = "groupID", example = 1, minimum = 1)]
    group_id: i32,
}

/// OpenAPI schema for [`crate::domain::Group`].
#[derive(ToSchema)]
#[schema(as = Group)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct GroupSchema {
    #[schema(example = 1, minimum = 1)]
    id: i32,
    #[schema(example = "group 1", min_length = 1, max_length = 255)]
    name: String,
    /// Members of the group; omitted when the group has none.
    users: Option<Vec<UserSchema>>,
}
