//! Users API handlers.
//!
//! ```text
//! GET    /users
//! GET    /users/{id}
//! POST   /users        {"name":"ada","email":"ada@example.com","password":"pw","groupID":1}
//! PUT    /users/{id}   {"email":"countess@example.com"}
//! DELETE /users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, NewUser, User, UserId, UserPatch};
use crate::inbound::http::ApiResult;
use crate::inbound::http::outcome::{Operation, Resource, failure};
use crate::inbound::http::resource_id::ResourceId;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{group_reference, optional_text_field, text_field};

const GROUP_FIELD: &str = "groupID";

/// Body for `POST /users`. `groupId` is accepted as an alias of `groupID`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "ada")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "correct horse battery staple")]
    pub password: String,
    #[serde(rename = "groupID", alias = "groupId")]
    #[schema(example = 1)]
    pub group_id: i32,
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = Error;

    fn try_from(value: CreateUserRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: text_field(value.name)?,
            email: text_field(value.email)?,
            password: text_field(value.password)?,
            group_id: group_reference(GROUP_FIELD, value.group_id)?,
        })
    }
}

/// Body for `PUT /users/{id}`. Omitted fields keep their stored value.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default, rename = "groupID", alias = "groupId")]
    pub group_id: Option<i32>,
}

impl TryFrom<UpdateUserRequest> for UserPatch {
    type Error = Error;

    fn try_from(value: UpdateUserRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: optional_text_field(value.name)?,
            email: optional_text_field(value.email)?,
            password: optional_text_field(value.password)?,
            group_id: value
                .group_id
                .map(|raw| group_reference(GROUP_FIELD, raw))
                .transpose()?,
        })
    }
}

/// List every user.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All users", body = [UserSchema]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state
        .users
        .list()
        .await
        .map_err(|err| failure(Resource::User, Operation::List, err))?;
    Ok(web::Json(users))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 200, description = "The user", body = UserSchema),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "No such user", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    id: ResourceId<UserId>,
) -> ApiResult<web::Json<User>> {
    let user = state
        .users
        .find_by_id(id.into_inner())
        .await
        .map_err(|err| failure(Resource::User, Operation::Get, err))?;
    Ok(web::Json(user))
}

/// Create a user in an existing group.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "The created user", body = UserSchema),
        (status = 400, description = "Invalid body, duplicate name or email, or unknown group", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<web::Json<User>> {
    let user = NewUser::try_from(payload.into_inner())?;
    let created = state
        .users
        .create(&user)
        .await
        .map_err(|err| failure(Resource::User, Operation::Create, err))?;
    Ok(web::Json(created))
}

/// Partially update a user.
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    request_body = UpdateUserRequest,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Malformed identifier or body", body = ErrorSchema),
        (status = 404, description = "No such user, or the merged record violates a constraint", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    id: ResourceId<UserId>,
    payload: web::Json<UpdateUserRequest>,
) -> ApiResult<HttpResponse> {
    let patch = UserPatch::try_from(payload.into_inner())?;
    state
        .users
        .update(id.into_inner(), &patch)
        .await
        .map_err(|err| failure(Resource::User, Operation::Update, err))?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "No such user", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    id: ResourceId<UserId>,
) -> ApiResult<HttpResponse> {
    state
        .users
        .delete(id.into_inner())
        .await
        .map_err(|err| failure(Resource::User, Operation::Delete, err))?;
    Ok(HttpResponse::NoContent().finish())
}
