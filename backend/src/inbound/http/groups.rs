//! Groups API handlers.
//!
//! ```text
//! GET    /groups
//! GET    /groups/{id}
//! POST   /groups        {"name":"admins"}
//! PUT    /groups/{id}   {"name":"operators"}
//! DELETE /groups/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Group, GroupId, GroupPatch, NewGroup};
use crate::inbound::http::ApiResult;
use crate::inbound::http::outcome::{Operation, Resource, failure};
use crate::inbound::http::resource_id::ResourceId;
use crate::inbound::http::schemas::{ErrorSchema, GroupSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{optional_text_field, text_field};

/// Body for `POST /groups`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateGroupRequest {
    #[schema(example = "admins")]
    pub name: String,
}

impl TryFrom<CreateGroupRequest> for NewGroup {
    type Error = Error;

    fn try_from(value: CreateGroupRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: text_field(value.name)?,
        })
    }
}

/// Body for `PUT /groups/{id}`. Omitted fields keep their stored value.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateGroupRequest {
    #[serde(default)]
    #[schema(example = "operators")]
    pub name: Option<String>,
}

impl TryFrom<UpdateGroupRequest> for GroupPatch {
    type Error = Error;

    fn try_from(value: UpdateGroupRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: optional_text_field(value.name)?,
        })
    }
}

/// List every group with its members.
#[utoipa::path(
    get,
    path = "/groups",
    responses(
        (status = 200, description = "All groups", body = [GroupSchema]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["groups"],
    operation_id = "listGroups"
)]
#[get("/groups")]
pub async fn list_groups(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Group>>> {
    let groups = state
        .groups
        .list()
        .await
        .map_err(|err| failure(Resource::Group, Operation::List, err))?;
    Ok(web::Json(groups))
}

/// Fetch one group with its members.
#[utoipa::path(
    get,
    path = "/groups/{id}",
    params(("id" = i32, Path, description = "Group identifier")),
    responses(
        (status = 200, description = "The group", body = GroupSchema),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "No such group", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["groups"],
    operation_id = "getGroup"
)]
#[get("/groups/{id}")]
pub async fn get_group(
    state: web::Data<HttpState>,
    id: ResourceId<GroupId>,
) -> ApiResult<web::Json<Group>> {
    let group = state
        .groups
        .find_by_id(id.into_inner())
        .await
        .map_err(|err| failure(Resource::Group, Operation::Get, err))?;
    Ok(web::Json(group))
}

/// Create a group.
#[utoipa::path(
    post,
    path = "/groups",
    request_body = CreateGroupRequest,
    responses(
        (status = 200, description = "The created group", body = GroupSchema),
        (status = 400, description = "Invalid body or name already taken", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["groups"],
    operation_id = "createGroup"
)]
#[post("/groups")]
pub async fn create_group(
    state: web::Data<HttpState>,
    payload: web::Json<CreateGroupRequest>,
) -> ApiResult<web::Json<Group>> {
    let group = NewGroup::try_from(payload.into_inner())?;
    let created = state
        .groups
        .create(&group)
        .await
        .map_err(|err| failure(Resource::Group, Operation::Create, err))?;
    Ok(web::Json(created))
}

/// Partially update a group.
#[utoipa::path(
    put,
    path = "/groups/{id}",
    params(("id" = i32, Path, description = "Group identifier")),
    request_body = UpdateGroupRequest,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Malformed identifier or body", body = ErrorSchema),
        (status = 404, description = "No such group, or the new name is taken", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["groups"],
    operation_id = "updateGroup"
)]
#[put("/groups/{id}")]
pub async fn update_group(
    state: web::Data<HttpState>,
    id: ResourceId<GroupId>,
    payload: web::Json<UpdateGroupRequest>,
) -> ApiResult<HttpResponse> {
    let patch = GroupPatch::try_from(payload.into_inner())?;
    state
        .groups
        .update(id.into_inner(), &patch)
        .await
        .map_err(|err| failure(Resource::Group, Operation::Update, err))?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a group that no user references.
#[utoipa::path(
    delete,
    path = "/groups/{id}",
    params(("id" = i32, Path, description = "Group identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Malformed identifier, or users still reference the group", body = ErrorSchema),
        (status = 404, description = "No such group", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["groups"],
    operation_id = "deleteGroup"
)]
#[delete("/groups/{id}")]
pub async fn delete_group(
    state: web::Data<HttpState>,
    id: ResourceId<GroupId>,
) -> ApiResult<HttpResponse> {
    state
        .groups
        .delete(id.into_inner())
        .await
        .map_err(|err| failure(Resource::Group, Operation::Delete, err))?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests;
