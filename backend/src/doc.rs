//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every groups, users and health endpoint together with
//! the schema mirrors from [`crate::inbound::http::schemas`]. The document is
//! served by Swagger UI in debug builds and exported by the `openapi-dump`
//! binary.

use crate::inbound::http::groups::{CreateGroupRequest, UpdateGroupRequest};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, GroupSchema, UserSchema};
use crate::inbound::http::users::{CreateUserRequest, UpdateUserRequest};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Roster API",
        description = "CRUD interface for groups and the users that belong to them."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::groups::list_groups,
        crate::inbound::http::groups::get_group,
        crate::inbound::http::groups::create_group,
        crate::inbound::http::groups::update_group,
        crate::inbound::http::groups::delete_group,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        GroupSchema,
        UserSchema,
        ErrorSchema,
        ErrorCodeSchema,
        CreateGroupRequest,
        UpdateGroupRequest,
        CreateUserRequest,
        UpdateUserRequest,
    )),
    tags(
        (name = "groups", description = "Groups and their members"),
        (name = "users", description = "Users and their group reference"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
