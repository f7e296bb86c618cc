//! Path identifier extraction.
//!
//! `ResourceId<T>` reads the `{id}` path segment and converts it into a
//! typed record identifier. Anything other than a base-10 positive 32-bit
//! integer is rejected with a 400 before the handler body runs.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{Ready, ready};
use serde_json::json;
use tracing::debug;

use crate::domain::{Error, IdValidationError};

use super::error::ApiError;

const ID_SEGMENT: &str = "id";

/// Typed identifier taken from the `{id}` path segment.
///
/// # Examples
/// ```
/// use actix_web::{HttpResponse, get};
/// use roster::domain::GroupId;
/// use roster::inbound::http::resource_id::ResourceId;
///
/// #[get("/groups/{id}")]
/// async fn show(id: ResourceId<GroupId>) -> HttpResponse {
///     HttpResponse::Ok().body(id.into_inner().to_string())
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceId<T>(T);

impl<T> ResourceId<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> ResourceId<T>
where
    T: TryFrom<i32, Error = IdValidationError>,
{
    /// Parse a raw path segment.
    ///
    /// Signs, whitespace, zero and values beyond `i32::MAX` are rejected.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let digits_only = !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit());
        digits_only
            .then(|| raw.parse::<i32>().ok())
            .flatten()
            .and_then(|value| T::try_from(value).ok())
            .map(Self)
            .ok_or_else(|| invalid_id(raw))
    }
}

fn invalid_id(raw: &str) -> Error {
    debug!(value = raw, "rejected path identifier");
    Error::invalid_request("id must be a positive integer").with_details(json!({
        "field": ID_SEGMENT,
        "value": raw,
        "code": "invalid_id",
    }))
}

impl<T> FromRequest for ResourceId<T>
where
    T: TryFrom<i32, Error = IdValidationError> + 'static,
{
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let raw = req.match_info().get(ID_SEGMENT).unwrap_or_default();
        ready(Self::parse(raw).map_err(ApiError::from))
    }
}
