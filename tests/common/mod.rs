#![allow(dead_code)]

use matchday_odds::{ApiFootballClient, Config};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_KEY: &str = "test-key";

/// Create a client pointing at a mock server
pub fn test_client(server: &MockServer) -> ApiFootballClient {
    let config = Config::default()
        .with_base_url(&server.uri())
        .with_api_key(TEST_KEY);
    ApiFootballClient::new(&config).expect("client should build")
}

pub fn test_client_with_timeout(server: &MockServer, timeout: Duration) -> ApiFootballClient {
    let mut config = Config::default()
        .with_base_url(&server.uri())
        .with_api_key(TEST_KEY);
    config.timeout = timeout;
    ApiFootballClient::new(&config).expect("client should build")
}

pub fn envelope(response: Value) -> Value {
    json!({
        "get": "test",
        "parameters": {},
        "errors": [],
        "results": response.as_array().map(|a| a.len()).unwrap_or(1),
        "response": response
    })
}

pub fn fixture_item(id: u64, home: &str, away: &str, date: &str) -> Value {
    json!({
        "fixture": {
            "id": id,
            "referee": null,
            "timezone": "Europe/Warsaw",
            "date": date,
            "status": {"long": "Not Started", "short": "NS", "elapsed": null}
        },
        "league": {"id": 39, "name": "Premier League", "country": "England", "season": 2023},
        "teams": {
            "home": {"id": id * 10, "name": home, "winner": null},
            "away": {"id": id * 10 + 1, "name": away, "winner": null}
        },
        "goals": {"home": null, "away": null},
        "score": {"halftime": {"home": null, "away": null}}
    })
}

pub fn odds_item(fixture_id: u64, home_odd: &str) -> Value {
    json!({
        "fixture": {"id": fixture_id},
        "bookmakers": [{
            "id": 8,
            "name": "Bet365",
            "bets": [{
                "id": 1,
                "name": "Match Winner",
                "values": [
                    {"value": "Home", "odd": home_odd},
                    {"value": "Draw", "odd": "3.40"},
                    {"value": "Away", "odd": "4.20"}
                ]
            }]
        }]
    })
}

/// Mount a `/fixtures` response for any query
pub async fn mount_fixtures(server: &MockServer, fixtures: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/fixtures"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(Value::Array(fixtures))))
        .mount(server)
        .await;
}

pub async fn mount_odds(server: &MockServer, fixture_id: u64, home_odd: &str) {
    Mock::given(method("GET"))
        .and(path("/odds"))
        .and(query_param("fixture", fixture_id.to_string()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(json!([odds_item(fixture_id, home_odd)]))),
        )
        .mount(server)
        .await;
}
