//! Router-level validation tests
//!
//! These drive the real router with `tower::ServiceExt::oneshot` against a
//! lazy pool pointing at a dead address: any handler that reached the
//! database would surface a 500, so a 400 here proves the request was
//! rejected by validation before any database work.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use ecoleta_server::uploads::UploadStore;
use ecoleta_server::{router, AppState};
use sqlx::PgPool;
use tower::ServiceExt;

const BOUNDARY: &str = "ecoleta-test-boundary";

fn test_state(uploads_root: &std::path::Path) -> AppState {
    AppState {
        // port 1 is never listening; connect_lazy defers until first query
        pool: PgPool::connect_lazy("postgres://127.0.0.1:1/ecoleta").expect("lazy pool"),
        uploads: UploadStore::new(uploads_root).expect("upload store"),
        public_url: "http://127.0.0.1:3333".into(),
    }
}

async fn response_message(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    body["message"].as_str().unwrap_or_default().to_owned()
}

/// Multipart body with the given text fields plus an image part.
fn multipart_body(fields: &[(&str, &str)]) -> String {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"store.jpg\"\r\n\
         Content-Type: image/jpeg\r\n\r\nfake image bytes\r\n--{BOUNDARY}--\r\n"
    ));
    body
}

fn post_points(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/points")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn registration_fields<'a>(whatsapp: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![
        ("name", "Mercado do Bairro"),
        ("email", "contato@mercado.com"),
        ("whatsapp", whatsapp),
        ("city", "Rio do Sul"),
        ("uf", "SC"),
        ("latitude", "-27.2"),
        ("longitude", "-49.6"),
        ("items", "1,2"),
    ]
}

#[tokio::test]
async fn health_works_without_database() {
    let dir = tempfile::tempdir().unwrap();
    let app = router(test_state(dir.path()), false);

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn non_numeric_point_id_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = router(test_state(dir.path()), false);

    let response = app
        .oneshot(Request::get("/points/abc").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let message = response_message(response).await;
    assert!(message.contains("id must be a number"), "got: {message}");
}

#[tokio::test]
async fn malformed_items_in_search_is_rejected_before_query() {
    let dir = tempfile::tempdir().unwrap();
    let app = router(test_state(dir.path()), false);

    let response = app
        .oneshot(
            Request::get("/points?city=Rio%20do%20Sul&uf=SC&items=1,foo")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let message = response_message(response).await;
    assert!(message.contains("items must be a number"), "got: {message}");
}

#[tokio::test]
async fn missing_search_params_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = router(test_state(dir.path()), false);

    let response = app
        .oneshot(Request::get("/points").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_numeric_whatsapp_is_rejected_before_any_write() {
    let dir = tempfile::tempdir().unwrap();
    let app = router(test_state(dir.path()), false);

    let body = multipart_body(&registration_fields("not-a-number"));
    let response = app.oneshot(post_points(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let message = response_message(response).await;
    assert!(message.contains("whatsapp must be a number"), "got: {message}");

    // validation ran before the upload store too
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn invalid_email_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = router(test_state(dir.path()), false);

    let mut fields = registration_fields("11987654321");
    fields[1] = ("email", "not-an-email");
    let response = app.oneshot(post_points(multipart_body(&fields))).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let message = response_message(response).await;
    assert!(message.contains("email"), "got: {message}");
}

#[tokio::test]
async fn missing_image_part_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = router(test_state(dir.path()), false);

    // text fields only, no image part
    let mut body = String::new();
    for (name, value) in registration_fields("11987654321") {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));

    let response = app.oneshot(post_points(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let message = response_message(response).await;
    assert!(message.contains("image"), "got: {message}");
}

#[tokio::test]
async fn oversized_uf_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = router(test_state(dir.path()), false);

    let mut fields = registration_fields("11987654321");
    fields[4] = ("uf", "SCX");
    let response = app.oneshot(post_points(multipart_body(&fields))).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let message = response_message(response).await;
    assert!(message.contains("uf"), "got: {message}");
}
