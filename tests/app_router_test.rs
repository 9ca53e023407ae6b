use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use ecommerce_platform::{handler::AppRouter, state::AppState};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use std::fs;
use std::path::PathBuf;

// The pool is lazy, so nothing here needs a running database: these tests
// only exercise routing, validation, and error shaping. Handlers that would
// actually query hit a connect error, which is exactly what the 500 test
// wants to observe.
fn test_state() -> AppState {
    let pool = PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect_lazy("postgres://postgres@127.0.0.1:1/unreachable")
        .expect("lazy pool");

    AppState::new(pool)
}

fn temp_static_dir(label: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "ecommerce-static-{}-{label}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create static dir");
    fs::write(dir.join("index.html"), "<!doctype html><h1>storefront</h1>").expect("index");
    fs::write(dir.join("app.js"), "console.log('ready');").expect("asset");
    dir
}

fn test_app(label: &str) -> Router {
    AppRouter::build(test_state(), &temp_static_dir(label))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

#[tokio::test]
async fn health_always_reports_ok() {
    use tower::ServiceExt;

    let response = test_app("health")
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "OK");
}

#[tokio::test]
async fn user_create_with_missing_email_is_a_client_error() {
    use tower::ServiceExt;

    let response = test_app("user-create")
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/users")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"username": "knight", "password": "hunter22"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(
        response.status().is_client_error(),
        "expected 4xx, got {}",
        response.status()
    );
}

#[tokio::test]
async fn review_with_out_of_range_rating_is_rejected_before_any_query() {
    use tower::ServiceExt;

    let response = test_app("review")
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/products/1/reviews")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"user_id": 1, "rating": 9}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Validation failed");
}

#[tokio::test]
async fn unknown_api_routes_return_json_not_the_index_page() {
    use tower::ServiceExt;

    let response = test_app("api-404")
        .oneshot(
            Request::builder()
                .uri("/api/does/not/exist")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["status"], "error");
}

#[tokio::test]
async fn existing_static_files_are_served_under_both_path_spaces() {
    use tower::ServiceExt;

    for uri in ["/app.js", "/static/app.js"] {
        let response = test_app("static")
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "uri: {uri}");

        let body = body_text(response).await;
        assert!(body.contains("console.log"), "uri: {uri}");
    }
}

#[tokio::test]
async fn non_api_paths_fall_back_to_the_index_document() {
    use tower::ServiceExt;

    for uri in ["/", "/checkout", "/account/settings", "/no/such/file.png"] {
        let response = test_app("fallback")
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "uri: {uri}");

        let body = body_text(response).await;
        assert!(body.contains("storefront"), "uri: {uri}");
    }
}

#[tokio::test]
async fn internal_failures_never_leak_details_to_the_client() {
    use tower::ServiceExt;

    // The lazy pool points at an unreachable server, so the first real query
    // errors deep in the repository layer.
    let response = test_app("internal")
        .oneshot(
            Request::builder()
                .uri("/api/products")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["status"], "error");
    assert_eq!(json["message"], "Internal server error");
}

#[tokio::test]
async fn cors_reflects_the_request_origin_with_credentials() {
    use tower::ServiceExt;

    let response = test_app("cors")
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/products")
                .header(header::ORIGIN, "https://shop.example.com")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("https://shop.example.com")
    );
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .and_then(|v| v.to_str().ok()),
        Some("true")
    );
}
