//! Roster service library: groups and users over HTTP.
//!
//! Layout follows a ports-and-adapters split:
//! - [`domain`]: records, patches, errors and repository ports.
//! - [`inbound`]: Actix handlers translating HTTP into port calls.
//! - [`outbound`]: Diesel/PostgreSQL and in-memory port implementations.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
