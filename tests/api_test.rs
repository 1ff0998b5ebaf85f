use std::{io::Write, path::Path, sync::Arc, time::Duration};

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use nursedir::{config::AppState, server, MemoryDiagnostics, QueryService, Record, RecordStore};

const NURSES: &str = r#"[
    {"id": 1, "user": "ana", "pw": "p1", "name": "Ana", "specialty": "Pediatrics"},
    {"id": 2, "user": "bob", "pw": "p2", "name": "Bob"}
]"#;

fn source(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn app(path: &Path) -> Router {
    let diagnostics = MemoryDiagnostics::new();
    let store = RecordStore::new(path, diagnostics.clone());
    let state = Arc::new(AppState {
        service: QueryService::new(store, diagnostics),
    });

    server::router(state, Duration::from_secs(5))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, req).await
}

async fn login(app: Router, body: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(Method::POST)
        .uri("/nurse/login")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_check() {
    let file = source(NURSES);
    let (status, body) = get(app(file.path()), "/v1/api").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
}

#[tokio::test]
async fn list_nurses() {
    let file = source(NURSES);
    let (status, body) = get(app(file.path()), "/nurse").await;

    assert_eq!(status, StatusCode::OK);
    let records: Vec<Record> = serde_json::from_value(body.clone()).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, Some(1));
    assert_eq!(records[1].id, Some(2));
    // absent keys stay absent
    assert!(body[1].get("specialty").is_none());
}

#[tokio::test]
async fn empty_directory_is_not_found() {
    let file = source("[]");
    let (status, body) = get(app(file.path()), "/nurse").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "No nurses found"}));
}

#[tokio::test]
async fn find_by_name() {
    let file = source(NURSES);

    let (status, body) = get(app(file.path()), "/nurse/name/ANA").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["specialty"], "Pediatrics");

    let (status, body) = get(app(file.path()), "/nurse/name/carla").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Nurse not found"}));
}

#[tokio::test]
async fn find_by_user() {
    let file = source(NURSES);

    let (status, body) = get(app(file.path()), "/nurse/user/Bob").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 2);

    let (status, _) = get(app(file.path()), "/nurse/user/carla").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn login_outcomes() {
    let file = source(NURSES);

    let (status, body) = login(app(file.path()), r#"{"user": "ana", "pw": "p1"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, wrong_pw) = login(app(file.path()), r#"{"user": "ana", "pw": "p2"}"#).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, unknown) = login(app(file.path()), r#"{"user": "zed", "pw": "p1"}"#).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_pw, unknown);

    for body in [r#"{"user": "ana"}"#, r#"{"user": "", "pw": "p1"}"#, "not json"] {
        let (status, _) = login(app(file.path()), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
    }
}

#[tokio::test]
async fn unavailable_store() {
    let file = source("{broken");

    let (status, _) = get(app(file.path()), "/nurse").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(app(file.path()), "/nurse/name/ana").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = login(app(file.path()), r#"{"user": "ana", "pw": "p1"}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Internal server error"}));
}

#[tokio::test]
async fn missing_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nurse.json");

    let (status, _) = get(app(&path), "/nurse/user/ana").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = login(app(&path), r#"{"user": "ana", "pw": "p1"}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.to_string().contains("nurse.json"));
}
