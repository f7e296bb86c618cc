//! Tests for groups API handlers.

use super::*;
use crate::domain::ports::{MockGroupRepository, MockUserRepository, RepositoryError};
use crate::domain::{GroupName, NewUser, User, UserId};
use crate::inbound::http::configure;
use crate::inbound::http::test_logs::CapturedLogs;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};
use std::sync::Arc;

fn test_app(
    groups: MockGroupRepository,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::new(Arc::new(groups), Arc::new(MockUserRepository::new()));
    App::new()
        .app_data(web::Data::new(state))
        .configure(configure)
}

fn group(id: i32, name: &str) -> Group {
    Group::new(
        GroupId::new(id).expect("valid id"),
        GroupName::new(name).expect("valid name"),
    )
}

async fn send(
    groups: MockGroupRepository,
    request: actix_test::TestRequest,
) -> (StatusCode, Option<Value>) {
    let app = actix_test::init_service(test_app(groups)).await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = (!body.is_empty())
        .then(|| serde_json::from_slice(&body).expect("JSON body"));
    (status, value)
}

fn code(body: &Option<Value>) -> Option<&str> {
    body.as_ref()
        .and_then(|value| value.get("code"))
        .and_then(Value::as_str)
}

#[actix_web::test]
async fn list_returns_every_group() {
    let mut groups = MockGroupRepository::new();
    groups
        .expect_list()
        .times(1)
        .returning(|| Ok(vec![group(1, "admins"), group(2, "operators")]));

    let (status, body) = send(groups, actix_test::TestRequest::get().uri("/groups")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        Some(json!([{"id": 1, "name": "admins"}, {"id": 2, "name": "operators"}]))
    );
}

#[actix_web::test]
async fn empty_store_lists_an_empty_array() {
    let mut groups = MockGroupRepository::new();
    groups.expect_list().returning(|| Ok(Vec::new()));

    let (status, body) = send(groups, actix_test::TestRequest::get().uri("/groups")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Some(json!([])));
}

#[actix_web::test]
async fn get_embeds_members() {
    let member = User::from_new(
        UserId::new(4).expect("valid id"),
        NewUser {
            name: "ada".to_owned().try_into().expect("valid name"),
            email: "ada@example.com".to_owned().try_into().expect("valid email"),
            password: "pw".to_owned().try_into().expect("valid password"),
            group_id: GroupId::new(7).expect("valid id"),
        },
    );
    let mut groups = MockGroupRepository::new();
    groups
        .expect_find_by_id()
        .withf(|id| id.get() == 7)
        .times(1)
        .returning(move |_| Ok(group(7, "admins").with_users(vec![member.clone()])));

    let (status, body) = send(groups, actix_test::TestRequest::get().uri("/groups/7")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        Some(json!({
            "id": 7,
            "name": "admins",
            "users": [{
                "id": 4,
                "name": "ada",
                "email": "ada@example.com",
                "password": "pw",
                "groupID": 7
            }]
        }))
    );
}

#[rstest]
#[case("abc")]
#[case("0")]
#[case("-3")]
#[case("+3")]
#[case("1.5")]
#[case("2147483648")]
#[actix_web::test]
async fn malformed_ids_never_reach_the_store(
    #[case] raw: &str,
    #[values("GET", "PUT", "DELETE")] method: &str,
) {
    let mut groups = MockGroupRepository::new();
    groups.expect_find_by_id().never();
    groups.expect_update().never();
    groups.expect_delete().never();
    let uri = format!("/groups/{raw}");
    let request = match method {
        "GET" => actix_test::TestRequest::get().uri(&uri),
        "PUT" => actix_test::TestRequest::put()
            .uri(&uri)
            .set_json(json!({"name": "x"})),
        _ => actix_test::TestRequest::delete().uri(&uri),
    };

    let (status, body) = send(groups, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code(&body), Some("invalid_request"));
    let value = body
        .as_ref()
        .and_then(|value| value.pointer("/details/value"))
        .and_then(Value::as_str);
    assert_eq!(value, Some(raw));
}

#[rstest]
#[case(RepositoryError::not_found("group 9 not found"), StatusCode::NOT_FOUND, "not_found")]
#[case(
    RepositoryError::fault("connection reset"),
    StatusCode::INTERNAL_SERVER_ERROR,
    "internal_error"
)]
#[actix_web::test]
async fn get_failures_follow_the_status_table(
    #[case] failure: RepositoryError,
    #[case] expected: StatusCode,
    #[case] expected_code: &str,
) {
    let mut groups = MockGroupRepository::new();
    groups
        .expect_find_by_id()
        .times(1)
        .returning(move |_| Err(failure.clone()));

    let (status, body) = send(groups, actix_test::TestRequest::get().uri("/groups/9")).await;

    assert_eq!(status, expected);
    assert_eq!(code(&body), Some(expected_code));
}

#[actix_web::test]
async fn internal_failures_are_redacted() {
    let mut groups = MockGroupRepository::new();
    groups
        .expect_list()
        .returning(|| Err(RepositoryError::fault("password authentication failed")));

    let (status, body) = send(groups, actix_test::TestRequest::get().uri("/groups")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body
        .as_ref()
        .and_then(|value| value.get("message"))
        .and_then(Value::as_str);
    assert_eq!(message, Some("Internal server error"));
}

#[actix_web::test]
async fn create_returns_the_stored_group() {
    let mut groups = MockGroupRepository::new();
    groups
        .expect_create()
        .withf(|new| new.name.as_str() == "admins")
        .times(1)
        .returning(|new| Ok(Group::from_new(GroupId::new(1).expect("valid id"), new.clone())));

    let (status, body) = send(
        groups,
        actix_test::TestRequest::post()
            .uri("/groups")
            .set_json(json!({"name": "admins"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Some(json!({"id": 1, "name": "admins"})));
}

#[actix_web::test]
async fn duplicate_names_are_bad_requests() {
    let mut groups = MockGroupRepository::new();
    groups
        .expect_create()
        .times(1)
        .returning(|_| Err(RepositoryError::constraint_violation("group name is already taken")));

    let (status, body) = send(
        groups,
        actix_test::TestRequest::post()
            .uri("/groups")
            .set_json(json!({"name": "admins"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code(&body), Some("constraint_violation"));
}

#[rstest]
#[case::not_json("{")]
#[case::missing_name("{}")]
#[case::wrong_type(r#"{"name": 5}"#)]
#[case::empty_name(r#"{"name": ""}"#)]
#[actix_web::test]
async fn invalid_create_bodies_are_rejected(#[case] payload: &'static str) {
    let mut groups = MockGroupRepository::new();
    groups.expect_create().never();

    let (status, body) = send(
        groups,
        actix_test::TestRequest::post()
            .uri("/groups")
            .insert_header(("content-type", "application/json"))
            .set_payload(payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code(&body), Some("invalid_request"));
}

#[actix_web::test]
async fn update_forwards_the_patch_and_returns_no_content() {
    let mut groups = MockGroupRepository::new();
    groups
        .expect_update()
        .withf(|id, patch| {
            id.get() == 3 && patch.name.as_ref().map(GroupName::as_str) == Some("operators")
        })
        .times(1)
        .returning(|_, _| Ok(()));

    let (status, body) = send(
        groups,
        actix_test::TestRequest::put()
            .uri("/groups/3")
            .set_json(json!({"name": "operators"})),
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, None);
}

#[actix_web::test]
async fn empty_patch_is_forwarded_as_a_no_op() {
    let mut groups = MockGroupRepository::new();
    groups
        .expect_update()
        .withf(|_, patch| patch.is_empty())
        .times(1)
        .returning(|_, _| Ok(()));

    let (status, _) = send(
        groups,
        actix_test::TestRequest::put().uri("/groups/3").set_json(json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn unknown_patch_fields_are_rejected() {
    let mut groups = MockGroupRepository::new();
    groups.expect_update().never();

    let (status, body) = send(
        groups,
        actix_test::TestRequest::put()
            .uri("/groups/3")
            .set_json(json!({"title": "operators"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code(&body), Some("invalid_request"));
}

#[rstest]
#[case(RepositoryError::not_found("group 3 not found"), StatusCode::NOT_FOUND)]
#[case(
    RepositoryError::constraint_violation("group name is already taken"),
    StatusCode::NOT_FOUND
)]
#[case(RepositoryError::fault("timeout"), StatusCode::INTERNAL_SERVER_ERROR)]
#[actix_web::test]
async fn update_failures_follow_the_status_table(
    #[case] failure: RepositoryError,
    #[case] expected: StatusCode,
) {
    let mut groups = MockGroupRepository::new();
    groups
        .expect_update()
        .times(1)
        .returning(move |_, _| Err(failure.clone()));

    let (status, _) = send(
        groups,
        actix_test::TestRequest::put()
            .uri("/groups/3")
            .set_json(json!({"name": "operators"})),
    )
    .await;

    assert_eq!(status, expected);
}

#[rstest]
#[case(Ok(()), StatusCode::NO_CONTENT)]
#[case(Err(RepositoryError::not_found("group 3 not found")), StatusCode::NOT_FOUND)]
#[case(
    Err(RepositoryError::constraint_violation("group 3 still has users")),
    StatusCode::BAD_REQUEST
)]
#[case(Err(RepositoryError::fault("timeout")), StatusCode::INTERNAL_SERVER_ERROR)]
#[actix_web::test]
async fn delete_outcomes_follow_the_status_table(
    #[case] outcome: Result<(), RepositoryError>,
    #[case] expected: StatusCode,
) {
    let mut groups = MockGroupRepository::new();
    groups
        .expect_delete()
        .withf(|id| id.get() == 3)
        .times(1)
        .returning(move |_| outcome.clone());

    let (status, _) = send(groups, actix_test::TestRequest::delete().uri("/groups/3")).await;

    assert_eq!(status, expected);
}

#[actix_web::test]
async fn whitespace_names_are_stored_verbatim() {
    let mut groups = MockGroupRepository::new();
    groups
        .expect_create()
        .withf(|new| new.name.as_str() == "   ")
        .times(1)
        .returning(|new| Ok(Group::from_new(GroupId::new(1).expect("valid id"), new.clone())));

    let (status, body) = send(
        groups,
        actix_test::TestRequest::post()
            .uri("/groups")
            .set_json(json!({"name": "   "})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Some(json!({"id": 1, "name": "   "})));
}

#[actix_web::test]
async fn field_rejections_are_logged_before_any_store_call() {
    let (logs, _guard) = CapturedLogs::install();
    let mut groups = MockGroupRepository::new();
    groups.expect_create().never();

    let (status, body) = send(
        groups,
        actix_test::TestRequest::post()
            .uri("/groups")
            .set_json(json!({"name": "x".repeat(256)})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code(&body), Some("invalid_request"));
    let output = logs.contents();
    assert!(output.contains("rejected request field"), "{output}");
    assert!(output.contains("field_too_long"), "{output}");
}
