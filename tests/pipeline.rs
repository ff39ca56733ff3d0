mod common;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use gecko_gateway::{authz::PolicyClients, middleware::http::REQUEST_ID_HEADER, state::AppState};
use pretty_assertions::assert_eq;
use serde_json::json;
use tower::ServiceExt;

use common::{
    FakePolicy, MemoryStore, RecordingSink, app, app_with_sink, error_message, full_policy, request,
    send,
};

fn bare_state() -> AppState {
    AppState::new(PolicyClients::new(FakePolicy::granting(&[])))
}

#[tokio::test]
async fn health_reports_healthy() {
    let (status, body) = send(&app(&bare_state()), request(Method::GET, "/health", None, None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("Healthy"));
}

#[tokio::test]
async fn unknown_routes_get_the_error_shape() {
    let (status, body) = send(&app(&bare_state()), request(Method::GET, "/nope", None, None)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": { "code": 404, "message": "not found" } }));
}

#[tokio::test]
async fn disabled_backends_leave_their_routes_unmounted() {
    let app = app(&bare_state());

    for uri in ["/dir", "/vector/collections", "/config/nav/list"] {
        let (status, _) = send(&app, request(Method::GET, uri, Some("t"), None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
async fn trailing_slash_is_ignored() {
    let fake = FakePolicy::granting(&["/programs/ohsu/projects/test"]);
    let state = AppState::new(full_policy(&fake)).with_config_store(MemoryStore::seeded(&[(
        "explorer",
        "ohsu-test",
        json!({ "explorerConfig": [{ "tabTitle": "Files" }] }),
    )]));
    let app = app(&state);

    let (status, body) = send(&app, request(Method::GET, "/config/explorer/ohsu-test/", Some("t"), None)).await;
    assert_eq!(status, StatusCode::OK, "{}", error_message(&body));

    let (status, _) = send(&app, request(Method::GET, "/health/", None, None)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let res = app(&bare_state())
        .oneshot(request(Method::GET, "/health", None, None))
        .await
        .unwrap();

    let id = res.headers().get(REQUEST_ID_HEADER).and_then(|v| v.to_str().ok());
    assert!(id.is_some_and(|id| !id.is_empty()));
}

#[tokio::test]
async fn rejections_are_written_to_the_request_log() {
    let sink = Arc::new(RecordingSink::default());
    let fake = FakePolicy::granting(&[]);
    let state = AppState::new(full_policy(&fake)).with_config_store(MemoryStore::seeded(&[]));
    let app = app_with_sink(&state, sink.clone());

    let (status, _) = send(&app, request(Method::GET, "/config/explorer/ohsu-test", Some("t"), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let entries = sink.entries.lock().unwrap();
    assert!(
        entries
            .iter()
            .any(|m| m == "User is not allowed to read on any resource path"),
        "{entries:?}"
    );
}
