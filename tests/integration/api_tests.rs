//! API integration tests against a running server and seeded database

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_reaches_database() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_search_books() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books/search", BASE_URL))
        .json(&json!({
            "search": {"keyword": "a"},
            "sort": {"field": "latest", "order_by": "desc"},
            "page": 1
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["items"].is_array());
    assert!(body["total"].is_number());
    assert_eq!(body["page"], 1);
}

#[tokio::test]
#[ignore]
async fn test_total_is_the_same_on_every_page() {
    let client = Client::new();
    let mut totals = Vec::new();

    for page in [1, 2, 99] {
        let response = client
            .post(format!("{}/books/search", BASE_URL))
            .json(&json!({ "page": page }))
            .send()
            .await
            .expect("Failed to send request");
        let body: Value = response.json().await.expect("Failed to parse response");
        totals.push(body["total"].as_i64().expect("No total"));
    }

    assert!(totals.windows(2).all(|w| w[0] == w[1]));
}

#[tokio::test]
#[ignore]
async fn test_search_unknown_sort_key() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books/search", BASE_URL))
        .json(&json!({"sort": {"field": "bogus"}}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "InvalidSortKey");
}

#[tokio::test]
#[ignore]
async fn test_waiting_ranking_is_descending() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books/waiting?limit=10", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let counts: Vec<i64> = body["items"]
        .as_array()
        .expect("No items")
        .iter()
        .map(|item| item["waiting_count"].as_i64().expect("No waiting_count"))
        .collect();

    assert!(counts.len() <= 10);
    assert!(counts.iter().all(|c| *c > 0));
    assert!(counts.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
#[ignore]
async fn test_homepage_sections() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books/home", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let keys: Vec<&str> = body
        .as_array()
        .expect("No sections")
        .iter()
        .map(|section| section["key"].as_str().expect("No key"))
        .collect();
    assert_eq!(keys, vec!["latest", "view", "rating", "waiting"]);
}

#[tokio::test]
#[ignore]
async fn test_unknown_section() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books/sections/trending", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}
