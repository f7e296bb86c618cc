//! Domain primitives and ports.
//!
//! Purpose: define the strongly typed records served by the API (groups and
//! users), the typed patches that merge over them, and the repository ports
//! inbound adapters depend on. Nothing here knows about HTTP or SQL.
//!
//! Public surface:
//! - [`Group`], [`User`] and their identifiers, payloads and patches.
//! - [`Error`] / [`ErrorCode`]: client-facing error payload.
//! - [`ports`]: repository traits and the [`ports::RepositoryError`] taxonomy.

mod record_id;
pub(crate) use record_id::record_id;

pub mod error;
pub mod fields;
pub mod group;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::fields::{Email, FieldError, GroupName, MAX_FIELD_LENGTH, Password, UserName};
pub use self::group::{Group, GroupId, GroupPatch, NewGroup};
pub use self::trace_id::TraceId;
pub use self::user::{NewUser, User, UserId, UserPatch};

/// HTTP header used to expose the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Validation failures for store-assigned record identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdValidationError {
    /// Identifiers start at 1.
    #[error("identifier must be a positive integer, got {0}")]
    NotPositive(i32),
}
