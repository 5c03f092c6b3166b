//! API integration tests
//!
//! The in-process tests drive the real router against the in-memory store.
//! Tests marked `#[ignore]` expect a running server.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use library_server::{api, repository::Repository, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

const BASE_URL: &str = "http://localhost:5000";

fn app() -> Router {
    api::create_router(AppState::new(Repository::in_memory()))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| json!({ "raw": String::from_utf8_lossy(&bytes).to_string() }));
    (status, value)
}

fn sample_book() -> Value {
    json!({
        "title": "A",
        "author": "B",
        "category": "Fiction",
        "publishedYear": 2020,
        "availableCopies": 3
    })
}

#[tokio::test]
async fn test_root_banner() {
    let app = app();
    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["raw"], "Library Management System API Running");
}

#[tokio::test]
async fn test_delete_guard_scenario() {
    let app = app();

    let (status, body) = send(&app, "POST", "/add-book", Some(sample_book())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Book added successfully");
    assert_eq!(body["book"]["availableCopies"], 3);
    let id = body["book"]["id"].as_i64().expect("No book ID");

    let (status, body) = send(&app, "DELETE", &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Cannot delete book with available copies");

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/books/update-count/{}", id),
        Some(json!({ "availableCopies": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Book count updated");
    assert_eq!(body["book"]["availableCopies"], 0);

    let (status, body) = send(&app, "DELETE", &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Book deleted successfully");

    let (status, body) = send(&app, "GET", &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Book not found");
}

#[tokio::test]
async fn test_add_book_requires_all_fields() {
    let app = app();
    for field in ["title", "author", "category", "publishedYear", "availableCopies"] {
        let mut book = sample_book();
        book.as_object_mut().unwrap().remove(field);

        let (status, body) = send(&app, "POST", "/add-book", Some(book)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "missing {}", field);
        assert_eq!(body["message"], "All fields are required");
    }

    let (status, body) = send(&app, "GET", "/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_add_book_with_zero_copies() {
    let app = app();
    let mut book = sample_book();
    book["availableCopies"] = json!(0);

    let (status, body) = send(&app, "POST", "/add-book", Some(book)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["book"]["availableCopies"], 0);
}

#[tokio::test]
async fn test_numeric_strings_are_accepted() {
    let app = app();
    let mut book = sample_book();
    book["publishedYear"] = json!("2020");
    book["availableCopies"] = json!("3");

    let (status, body) = send(&app, "POST", "/add-book", Some(book)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["book"]["publishedYear"], 2020);
    assert_eq!(body["book"]["availableCopies"], 3);
    let id = body["book"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/books/update-count/{}", id),
        Some(json!({ "availableCopies": "0" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["book"]["availableCopies"], 0);

    let (_, year) = send(&app, "GET", "/books/year/2020", None).await;
    assert_eq!(year.as_array().unwrap().len(), 1);

    let mut book = sample_book();
    book["publishedYear"] = json!("last year");
    let (status, body) = send(&app, "POST", "/add-book", Some(book)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 18);
}

#[tokio::test]
async fn test_round_trip_and_filters() {
    let app = app();
    let (_, created) = send(&app, "POST", "/add-book", Some(sample_book())).await;
    let mut other = sample_book();
    other["category"] = json!("History");
    other["publishedYear"] = json!(1999);
    send(&app, "POST", "/add-book", Some(other)).await;

    let id = created["book"]["id"].as_i64().unwrap();
    let (status, fetched) = send(&app, "GET", &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created["book"]);

    let (_, all) = send(&app, "GET", "/books", None).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (_, fiction) = send(&app, "GET", "/books/category/Fiction", None).await;
    assert_eq!(fiction.as_array().unwrap().len(), 1);
    let (_, lower) = send(&app, "GET", "/books/category/fiction", None).await;
    assert!(lower.as_array().unwrap().is_empty());

    let (_, year) = send(&app, "GET", "/books/year/1999", None).await;
    assert_eq!(year.as_array().unwrap().len(), 1);
    assert_eq!(year[0]["category"], "History");

    let (status, _) = send(&app, "GET", "/books/year/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_category() {
    let app = app();
    let (_, created) = send(&app, "POST", "/add-book", Some(sample_book())).await;
    let id = created["book"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/books/update-category/{}", id),
        Some(json!({ "category": "Poetry" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Book category updated");
    assert_eq!(body["book"]["category"], "Poetry");
    assert_eq!(body["book"]["availableCopies"], 3);

    let (status, _) = send(
        &app,
        "PATCH",
        "/books/update-category/9999",
        Some(json!({ "category": "Poetry" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_requests() {
    let app = app();

    let (status, _) = send(&app, "GET", "/books/not-an-id", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/books/not-an-id", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "PATCH",
        "/books/update-count/1",
        Some(json!({ "availableCopies": "many" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, created) = send(&app, "POST", "/add-book", Some(sample_book())).await;
    let id = created["book"]["id"].as_i64().unwrap();
    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/books/update-count/{}", id),
        Some(json!({ "availableCopies": -1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_and_ready() {
    let app = app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, "GET", "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_live_server_lists_books() {
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.is_array());
}

#[tokio::test]
#[ignore]
async fn test_live_server_add_and_delete() {
    let client = reqwest::Client::new();

    let mut book = sample_book();
    book["availableCopies"] = json!(0);
    let response = client
        .post(format!("{}/add-book", BASE_URL))
        .json(&book)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let id = body["book"]["id"].as_i64().expect("No book ID");

    let response = client
        .delete(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
}
