//! Tests against a running server backed by PostgreSQL

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:3000/api";

async fn create_book(client: &Client, stock: i64) -> i64 {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("x-user-role", "admin")
        .json(&json!({ "title": "Dune", "author": "Herbert", "stock": stock }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["data"]["id"].as_i64().expect("No book ID")
}

async fn borrow(client: &Client, book_id: i64) -> StatusCode {
    client
        .post(format!("{}/borrow", BASE_URL))
        .header("x-user-role", "user")
        .header("x-user-id", "live-reader")
        .json(&json!({ "bookId": book_id }))
        .send()
        .await
        .expect("Failed to send request")
        .status()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_list_books() {
    let client = Client::new();

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
async fn test_borrow_and_delete() {
    let client = Client::new();
    let id = create_book(&client, 2).await;

    assert_eq!(borrow(&client, id).await, StatusCode::CREATED);

    let book: Value = client
        .get(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(book["stock"], 1);

    let response = client
        .delete(format!("{}/books/{}", BASE_URL, id))
        .header("x-user-role", "admin")
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let logs: Value = client
        .get(format!("{}/borrows", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert!(logs
        .as_array()
        .unwrap()
        .iter()
        .any(|log| log["bookId"] == id));
}

#[tokio::test]
#[ignore]
async fn test_concurrent_borrows_of_last_copy() {
    let client = Client::new();
    let id = create_book(&client, 1).await;

    let (first, second) = tokio::join!(borrow(&client, id), borrow(&client, id));
    let mut statuses = vec![first, second];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::BAD_REQUEST]);

    let book: Value = client
        .get(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(book["stock"], 0);
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_create() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({ "title": "Dune", "author": "Herbert" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
