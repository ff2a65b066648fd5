//! Router tests driving the axum app with `oneshot`.

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use common::*;
use matchday_odds::routes::{app, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn get(server: &MockServer, uri: &str) -> (StatusCode, String) {
    let state = AppState::new(test_client(server), 100);
    let response = app(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn get_json(server: &MockServer, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(server, uri).await;
    (status, serde_json::from_str(&body).expect("body should be JSON"))
}

#[tokio::test]
async fn test_matches_success_body() {
    let server = MockServer::start().await;
    mount_fixtures(
        &server,
        vec![
            fixture_item(1, "Arsenal", "Chelsea", "2024-05-04T13:30:00+02:00"),
            fixture_item(2, "Liverpool", "Everton", "2024-05-04T16:00:00+02:00"),
        ],
    )
    .await;
    mount_odds(&server, 1, "1.80").await;
    Mock::given(method("GET"))
        .and(path("/odds"))
        .and(query_param("fixture", "2"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let (status, body) = get_json(&server, "/api/matches?date=2024-05-04").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["count"], json!(2));
    assert_eq!(body["matches"][0]["id"], json!("1"));
    assert_eq!(body["matches"][0]["odds"]["1X2"]["1"], json!("1.80"));
    assert_eq!(body["matches"][1]["odds"], json!({}));
    assert_eq!(
        body["matches"][1]["score"],
        json!({"home": null, "away": null})
    );
}

#[tokio::test]
async fn test_matches_passes_live_flag() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fixtures"))
        .and(query_param("live", "all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = get_json(&server, "/api/matches?live=true&status=NS").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "count": 0, "matches": []}));
}

#[tokio::test]
async fn test_matches_upstream_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fixtures"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "Internal Server Error"})),
        )
        .mount(&server)
        .await;

    let (status, body) = get_json(&server, "/api/matches?date=2024-05-04").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["matches"], json!([]));
    assert!(body["error"].as_str().unwrap().contains("Internal Server Error"));
    assert!(body.get("count").is_none());
}

#[tokio::test]
async fn test_live_matches_ignore_malformed_date() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fixtures"))
        .and(query_param("live", "all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            fixture_item(9, "Inter", "Milan", "2024-05-01T20:45:00+02:00"),
        ]))))
        .expect(1)
        .mount(&server)
        .await;
    mount_odds(&server, 9, "2.20").await;

    let (status, body) = get_json(&server, "/api/matches?live=true&date=today").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["count"], json!(1));
    assert_eq!(body["matches"][0]["id"], json!("9"));
}

#[tokio::test]
async fn test_live_dashboard_ignores_malformed_date() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fixtures"))
        .and(query_param("live", "all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            fixture_item(9, "Inter", "Milan", "2024-05-01T20:45:00+02:00"),
        ]))))
        .expect(1)
        .mount(&server)
        .await;
    mount_odds(&server, 9, "2.20").await;

    let (status, html) = get(&server, "/?status=live&date=bad").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Inter"));
    assert!(!html.contains("class=\"error\""));
}

#[tokio::test]
async fn test_matches_bad_date() {
    let server = MockServer::start().await;
    let (status, body) = get_json(&server, "/api/matches?date=tomorrow").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["matches"], json!([]));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_dashboard_renders_filtered_matches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fixtures"))
        .and(query_param("status", "NS"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            fixture_item(1, "Arsenal", "Chelsea", "2024-05-04T13:30:00+02:00"),
        ]))))
        .expect(1)
        .mount(&server)
        .await;
    mount_odds(&server, 1, "1.80").await;

    let (status, html) = get(&server, "/?date=2024-05-04&status=prematch&league=premier").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Arsenal"));
    assert!(html.contains("England - Premier League"));
    assert!(html.contains("1: 1.80"));
    assert!(html.contains("API calls: 2/100"));
}

#[tokio::test]
async fn test_dashboard_shows_error_instead_of_failing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fixtures"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (status, html) = get(&server, "/?date=2024-05-04").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("class=\"error\""));
    assert!(!html.contains("No matches for the selected filters."));
}

#[tokio::test]
async fn test_health() {
    let server = MockServer::start().await;
    let (status, body) = get(&server, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}
