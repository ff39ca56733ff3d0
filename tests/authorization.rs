mod common;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use gecko_gateway::{
    authz::{PolicyClients, PolicyError},
    middleware::AuthError,
    state::AppState,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

use common::{FakePolicy, Listing, MemoryStore, app, error_message, full_policy, request, send};

const PROJECT: &str = "/programs/ohsu/projects/test";

fn explorer_doc() -> serde_json::Value {
    json!({ "explorerConfig": [{ "tabTitle": "Files" }] })
}

fn state_with(fake: &Arc<FakePolicy>) -> AppState {
    AppState::new(full_policy(fake)).with_config_store(MemoryStore::seeded(&[
        ("explorer", "ohsu-test", explorer_doc()),
        ("apps_page", "main", json!({ "appCards": [{ "title": "Home", "href": "/" }] })),
    ]))
}

#[tokio::test]
async fn missing_token_is_rejected_before_the_policy_service() {
    let fake = FakePolicy::granting(&[PROJECT]);
    let app = app(&state_with(&fake));

    let (status, body) = send(&app, request(Method::GET, "/config/explorer/ohsu-test", None, None)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Authorization token not provided");
    assert_eq!(body["error"]["code"], 400);
    assert_eq!(fake.calls(), 0);
}

#[rstest]
#[case("Bearer")]
#[case("bearer ")]
#[tokio::test]
async fn scheme_without_token_is_missing_token(#[case] header: &str) {
    let fake = FakePolicy::granting(&[PROJECT]);
    let app = app(&state_with(&fake));

    let req = axum::http::Request::get("/config/explorer/ohsu-test")
        .header("authorization", header)
        .body(axum::body::Body::empty())
        .unwrap();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Authorization token not provided");
    assert_eq!(fake.calls(), 0);
}

#[tokio::test]
async fn head_is_checked_like_get() {
    let fake = FakePolicy::granting(&[PROJECT]);
    let app = app(&state_with(&fake));

    let (status, _) = send(&app, request(Method::HEAD, "/config/explorer/ohsu-test", Some("t"), None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fake.calls(), 1);
}

#[rstest]
#[case("ohsu")]
#[case("a-b-c")]
#[tokio::test]
async fn malformed_project_id_is_not_found_without_policy_call(#[case] id: &str) {
    let fake = FakePolicy::granting(&[PROJECT]);
    let app = app(&state_with(&fake));

    let uri = format!("/config/explorer/{id}");
    let (status, body) = send(&app, request(Method::GET, &uri, Some("t"), None)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        error_message(&body),
        format!("Failed to parse project id: incorrect path {id}")
    );
    assert_eq!(fake.calls(), 0);
}

#[tokio::test]
async fn granted_project_reaches_the_handler() {
    let fake = FakePolicy::granting(&["/programs/other/projects/x", PROJECT]);
    let app = app(&state_with(&fake));

    let (status, body) = send(&app, request(Method::GET, "/config/explorer/ohsu-test", Some("t"), None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["explorerConfig"][0]["tabTitle"], "Files");
    assert_eq!(fake.calls(), 1);
}

#[tokio::test]
async fn repeated_allowed_requests_stay_allowed() {
    let fake = FakePolicy::granting(&[PROJECT]);
    let app = app(&state_with(&fake));

    let first = send(&app, request(Method::GET, "/config/explorer/ohsu-test", Some("t"), None)).await;
    let second = send(&app, request(Method::GET, "/config/explorer/ohsu-test", Some("t"), None)).await;

    assert_eq!(first.0, StatusCode::OK);
    assert_eq!(first, second);
    assert_eq!(fake.calls(), 2);
}

#[tokio::test]
async fn empty_grant_set_is_forbidden() {
    let fake = FakePolicy::granting(&[]);
    let app = app(&state_with(&fake));

    let (status, body) = send(&app, request(Method::GET, "/config/explorer/ohsu-test", Some("t"), None)).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_message(&body), "User is not allowed to read on any resource path");
}

#[tokio::test]
async fn mismatched_grant_names_action_and_target() {
    let fake = FakePolicy::granting(&["/programs/ohsu/projects/*"]);
    let app = app(&state_with(&fake));

    let (status, body) = send(
        &app,
        request(Method::PUT, "/config/explorer/ohsu-test", Some("t"), Some(explorer_doc())),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        error_message(&body),
        "User is not allowed to create on resource path: /programs/ohsu/projects/test"
    );
}

#[rstest]
#[case::structured(
    Listing::Fail(PolicyError::service(StatusCode::UNAUTHORIZED, "token expired")),
    StatusCode::UNAUTHORIZED,
    "token expired"
)]
#[case::unstructured(
    Listing::Fail(PolicyError::Unexpected("connection reset".into())),
    StatusCode::NOT_FOUND,
    "expecting error to be serverError type"
)]
#[case::non_string_grant(
    Listing::Fail(PolicyError::NonStringElement { value: "123".into() }),
    StatusCode::INTERNAL_SERVER_ERROR,
    "Element 123 is not a string"
)]
#[case::slow_policy(
    Listing::Hang,
    StatusCode::SERVICE_UNAVAILABLE,
    "policy service timed out"
)]
#[tokio::test]
async fn policy_failures_map_to_statuses(
    #[case] listing: Listing,
    #[case] expected_status: StatusCode,
    #[case] expected_message: &str,
) {
    let fake = FakePolicy::with(listing, Ok(true));
    let app = app(&state_with(&fake));

    let (status, body) = send(&app, request(Method::GET, "/config/explorer/ohsu-test", Some("t"), None)).await;

    assert_eq!(status, expected_status);
    assert_eq!(error_message(&body), expected_message);
}

#[tokio::test]
async fn global_config_types_use_the_coarse_check() {
    let allowed = FakePolicy::with(Listing::Grants(vec![]), Ok(true));
    let (status, body) = send(
        &app(&state_with(&allowed)),
        request(Method::GET, "/config/apps_page/main", Some("t"), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["appCards"][0]["title"], "Home");

    let denied = FakePolicy::with(Listing::Grants(vec![PROJECT.into()]), Ok(false));
    let (status, body) = send(
        &app(&state_with(&denied)),
        request(Method::DELETE, "/config/apps_page/main", Some("t"), None),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        error_message(&body),
        "User does not have required delete permission on resource /programs"
    );
}

#[tokio::test]
async fn list_route_requires_coarse_read() {
    let denied = FakePolicy::with(Listing::Grants(vec![PROJECT.into()]), Ok(false));
    let (status, _) = send(
        &app(&state_with(&denied)),
        request(Method::GET, "/config/explorer/list", Some("t"), None),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let allowed = FakePolicy::granting(&[]);
    let (status, body) = send(
        &app(&state_with(&allowed)),
        request(Method::GET, "/config/explorer/list", Some("t"), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["ohsu-test"]));
}

#[tokio::test]
async fn unsupported_method_checks_the_token_first() {
    let fake = FakePolicy::granting(&[PROJECT]);
    let app = app(&state_with(&fake));

    let (status, _) = send(&app, request(Method::PATCH, "/config/explorer/ohsu-test", None, None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, request(Method::PATCH, "/config/explorer/ohsu-test", Some("t"), None)).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(error_message(&body), "Unsupported HTTP method: PATCH");
}

#[test]
fn config_routes_need_the_service_access_capability() {
    let fake = FakePolicy::granting(&[PROJECT]);
    let listing_only = PolicyClients::new(fake);
    let state = AppState::new(listing_only).with_config_store(MemoryStore::seeded(&[]));

    let err = gecko_gateway::api::routes(&state).unwrap_err();
    assert_eq!(err, AuthError::MisconfiguredPolicyClient);
}

#[test]
fn routes_without_config_store_need_only_listing() {
    let fake = FakePolicy::granting(&[PROJECT]);
    let state = AppState::new(PolicyClients::new(fake));
    assert!(gecko_gateway::api::routes(&state).is_ok());
}
