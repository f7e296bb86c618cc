//! Request body decoding and validation helpers.
//!
//! Every body failure becomes a 400 `invalid_request` carrying a `details`
//! object that names the field and a stable reason code.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, web};
use serde_json::json;
use tracing::debug;

use crate::domain::{Error, FieldError, GroupId};

use super::error::ApiError;

/// Machine-readable reasons attached to request validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidBody,
    InvalidId,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::InvalidBody => "invalid_body",
            Self::InvalidId => "invalid_id",
        }
    }
}

/// Validate a text field, turning the domain failure into a client error.
pub(crate) fn text_field<T>(value: String) -> Result<T, Error>
where
    T: TryFrom<String, Error = FieldError>,
{
    T::try_from(value).map_err(field_error)
}

/// Validate an optional text field from a patch.
pub(crate) fn optional_text_field<T>(value: Option<String>) -> Result<Option<T>, Error>
where
    T: TryFrom<String, Error = FieldError>,
{
    value.map(text_field).transpose()
}

fn field_error(err: FieldError) -> Error {
    debug!(field = err.field(), reason = err.code(), "rejected request field");
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": err.field(),
        "code": err.code(),
    }))
}

/// Validate a group reference carried in a user body.
pub(crate) fn group_reference(field: &'static str, raw: i32) -> Result<GroupId, Error> {
    GroupId::new(raw).map_err(|_| {
        debug!(field, value = raw, "rejected group reference");
        Error::invalid_request(format!("{field} must be a positive integer")).with_details(
            json!({
                "field": field,
                "value": raw,
                "code": ErrorCode::InvalidId.as_str(),
            }),
        )
    })
}

/// JSON extractor configuration shared by every handler.
///
/// Bodies are decoded regardless of `Content-Type`; decode failures use the
/// service error body instead of Actix's plain-text default.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(json_error)
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected request body");
    let message = match &err {
        JsonPayloadError::Deserialize(inner) => format!("invalid request body: {inner}"),
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            "request body is too large".to_owned()
        }
        _ => "invalid request body".to_owned(),
    };
    let error = Error::invalid_request(message).with_details(json!({
        "code": ErrorCode::InvalidBody.as_str(),
    }));
    ApiError::from(error).into()
}
