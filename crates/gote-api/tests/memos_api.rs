use axum::{
    body::{self, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use gote_api::{app, AppState};
use gote_core::{ApiConfig, MemoStore};

fn test_app() -> Router {
    let store = MemoStore::in_memory().unwrap();
    app(AppState::new(store), &ApiConfig::default())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(text) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(text.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };

    (status, value)
}

async fn create(app: &Router, title: &str, content: &str) -> Value {
    let payload = json!({ "title": title, "content": content }).to_string();
    let (status, body) = send(app, Method::POST, "/api/memos", Some(&payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn memo_lifecycle_end_to_end() {
    let app = test_app();

    let created = create(&app, "A", "B").await;
    assert_eq!(created["title"], "A");
    assert_eq!(created["content"], "B");
    assert!(created["deleted_at"].is_null());
    let id = created["id"].as_u64().unwrap();

    let (status, fetched) = send(&app, Method::GET, &format!("/api/memos/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/memos/{id}"),
        Some(r#"{"title":"C","content":"D"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["title"], "C");
    assert_eq!(updated["content"], "D");
    assert_eq!(updated["created_at"], created["created_at"]);

    let (status, body) = send(&app, Method::DELETE, &format!("/api/memos/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Memo deleted successfully" }));

    let (status, body) = send(&app, Method::GET, &format!("/api/memos/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Memo not found" }));
}

#[tokio::test]
async fn list_memos_returns_all_live_memos() {
    let app = test_app();

    let (status, body) = send(&app, Method::GET, "/api/memos", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    create(&app, "one", "").await;
    let two = create(&app, "two", "").await;
    create(&app, "three", "").await;

    let (status, body) = send(&app, Method::GET, "/api/memos", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);

    let id = two["id"].as_u64().unwrap();
    send(&app, Method::DELETE, &format!("/api/memos/{id}"), None).await;

    let (_, body) = send(&app, Method::GET, "/api/memos", None).await;
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|memo| memo["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["one", "three"]);
}

#[tokio::test]
async fn unknown_and_invalid_ids() {
    let app = test_app();
    create(&app, "first", "").await;

    let (status, body) = send(&app, Method::GET, "/api/memos/999999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Memo not found");

    for uri in ["/api/memos/abc", "/api/memos/0", "/api/memos/-1", "/api/memos/+1"] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error"], "Invalid memo ID");
    }

    let (status, _) = send(&app, Method::DELETE, "/api/memos/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::PUT, "/api/memos/abc", Some(r#"{"title":"x"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_rejects_bad_payloads() {
    let app = test_app();

    let (status, body) = send(&app, Method::POST, "/api/memos", Some("{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(&app, Method::POST, "/api/memos", Some(r#"{"title":""}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "title must not be empty");

    let (status, _) = send(&app, Method::POST, "/api/memos", Some(r#"{"content":"no title"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, Method::GET, "/api/memos", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn update_checks_existence_before_body() {
    let app = test_app();

    let (status, _) = send(&app, Method::PUT, "/api/memos/42", Some("{broken")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let created = create(&app, "keep", "me").await;
    let id = created["id"].as_u64().unwrap();

    let (status, body) = send(&app, Method::PUT, &format!("/api/memos/{id}"), Some("{broken")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/memos/{id}"),
        Some(r#"{"title":"","content":"x"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, fetched) = send(&app, Method::GET, &format!("/api/memos/{id}"), None).await;
    assert_eq!(fetched["title"], "keep");
}

#[tokio::test]
async fn delete_twice_is_not_found() {
    let app = test_app();
    let created = create(&app, "once", "").await;
    let uri = format!("/api/memos/{}", created["id"]);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Memo not found");

    let (status, _) = send(&app, Method::PUT, &uri, Some(r#"{"title":"revive"}"#)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_check() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".to_string()));
}

#[tokio::test]
async fn file_backed_store_survives_new_app() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gote.db");

    let id = {
        let app = app(
            AppState::new(MemoStore::open(&path).unwrap()),
            &ApiConfig::default(),
        );
        create(&app, "persisted", "yes").await["id"].as_u64().unwrap()
    };

    let app = app(
        AppState::new(MemoStore::open(&path).unwrap()),
        &ApiConfig::default(),
    );
    let (status, body) = send(&app, Method::GET, &format!("/api/memos/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "persisted");
}

#[tokio::test]
async fn json_body_without_content_type_is_accepted() {
    let app = test_app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/memos")
        .body(Body::from(r#"{"title":"A","content":"B"}"#))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let created: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(created["title"], "A");
    let id = created["id"].as_u64().unwrap();

    let request = Request::builder()
        .method(Method::PUT)
        .uri(format!("/api/memos/{id}"))
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(r#"{"title":"C","content":"D"}"#))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/memos")
        .body(Body::from("{broken"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

async fn allow_origin_for(app: &Router, origin: &str) -> Option<String> {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/memos")
        .header(header::ORIGIN, origin)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .map(|value| value.to_str().unwrap().to_string())
}

#[tokio::test]
async fn cors_allows_only_configured_origins() {
    let config = ApiConfig {
        port: 8080,
        allowed_origins: Some(vec![
            "http://localhost:3000".to_string(),
            "bad\norigin".to_string(),
        ]),
    };
    let app = app(AppState::new(MemoStore::in_memory().unwrap()), &config);

    assert_eq!(
        allow_origin_for(&app, "http://localhost:3000").await.as_deref(),
        Some("http://localhost:3000")
    );
    assert_eq!(allow_origin_for(&app, "http://evil.test").await, None);
}

#[tokio::test]
async fn cors_is_permissive_without_configured_origins() {
    let app = test_app();
    assert_eq!(
        allow_origin_for(&app, "http://anywhere.test").await.as_deref(),
        Some("*")
    );
}
