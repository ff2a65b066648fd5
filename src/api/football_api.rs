use crate::config::Config;
use crate::error::ApiError;
use crate::models::{BttsOdds, Fixture, MatchCriteria, MatchWinnerOdds, OddsMarket, Score};
use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::{debug, warn};

const PREFERRED_BOOKMAKER: &str = "Bet365";

/// Every API-Football payload is wrapped like this. Rejected requests
/// (bad key, exhausted plan) still come back as 200 with `errors` filled in.
#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    errors: Option<serde_json::Value>,
    response: Option<serde_json::Value>,
}

impl ApiEnvelope {
    /// Upstream error text, if the provider reported any
    fn error_message(&self) -> Option<String> {
        let messages: Vec<String> = match self.errors.as_ref()? {
            serde_json::Value::Array(items) => items.iter().map(value_text).collect(),
            serde_json::Value::Object(fields) => fields
                .iter()
                .map(|(key, value)| format!("{}: {}", key, value_text(value)))
                .collect(),
            serde_json::Value::Null => Vec::new(),
            other => vec![value_text(other)],
        };

        if messages.is_empty() {
            None
        } else {
            Some(messages.join("; "))
        }
    }
}

fn value_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Some numeric-looking fields arrive as strings, some as numbers
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum StringOrNum {
    String(String),
    Number(serde_json::Number),
}

impl StringOrNum {
    fn into_string(self) -> String {
        match self {
            StringOrNum::String(s) => s,
            StringOrNum::Number(n) => n.to_string(),
        }
    }

    fn as_str(&self) -> Option<&str> {
        match self {
            StringOrNum::String(s) => Some(s.as_str()),
            StringOrNum::Number(_) => None,
        }
    }
}

/// One entry of `/fixtures`
#[derive(Debug, Deserialize)]
struct ApiFixtureItem {
    fixture: ApiFixtureInfo,
    league: ApiLeague,
    teams: ApiTeams,
    goals: ApiGoals,
}

#[derive(Debug, Deserialize)]
struct ApiFixtureInfo {
    id: u64,
    date: DateTime<FixedOffset>,
    status: ApiFixtureStatus,
}

#[derive(Debug, Deserialize)]
struct ApiFixtureStatus {
    short: String,
}

#[derive(Debug, Deserialize)]
struct ApiLeague {
    name: String,
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiTeams {
    home: ApiTeam,
    away: ApiTeam,
}

#[derive(Debug, Deserialize)]
struct ApiTeam {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ApiGoals {
    home: Option<u32>,
    away: Option<u32>,
}

/// One entry of `/odds`
#[derive(Debug, Deserialize)]
struct ApiOddsItem {
    #[serde(default)]
    bookmakers: Vec<ApiBookmaker>,
}

#[derive(Debug, Deserialize)]
struct ApiBookmaker {
    name: String,
    #[serde(default)]
    bets: Vec<ApiBet>,
}

#[derive(Debug, Deserialize)]
struct ApiBet {
    name: String,
    #[serde(default)]
    values: Vec<ApiBetValue>,
}

#[derive(Debug, Deserialize)]
struct ApiBetValue {
    value: StringOrNum,
    odd: StringOrNum,
}

/// Payload of `/status`
#[derive(Debug, Default, Deserialize)]
struct ApiStatus {
    #[serde(default)]
    subscription: Option<ApiSubscription>,
    #[serde(default)]
    requests: Option<ApiRequests>,
}

#[derive(Debug, Deserialize)]
struct ApiSubscription {
    plan: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiRequests {
    current: u32,
    limit_day: u32,
}

/// Account usage as reported by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageReport {
    pub plan: Option<String>,
    pub requests_today: u32,
    pub daily_limit: u32,
}

/// Client for API-Football (api-sports.io).
///
/// Built once per process and shared; nothing in it changes after construction
/// except the request counter.
pub struct ApiFootballClient {
    client: reqwest::Client,
    api_key: String,
    host: String,
    base_url: String,
    timezone: String,
    requests_made: AtomicU64,
}

impl ApiFootballClient {
    /// Create a client from the loaded configuration.
    ///
    /// A missing API key is only a warning: the client is still built and every
    /// call will come back as an upstream rejection.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        if config.api_key.is_empty() {
            let err =
                ApiError::Configuration("API_FOOTBALL_KEY is not set, API calls will fail".into());
            warn!("{}", err);
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            host: config.host.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timezone: config.timezone.clone(),
            requests_made: AtomicU64::new(0),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Number of upstream requests issued since startup
    pub fn requests_made(&self) -> u64 {
        self.requests_made.load(Ordering::Relaxed)
    }

    /// List fixtures for a date (optionally filtered by upstream status code),
    /// or every match currently in play when `criteria.live` is set.
    /// Order is whatever the provider returns.
    pub async fn fetch_matches(&self, criteria: &MatchCriteria) -> Result<Vec<Fixture>, ApiError> {
        let query = fixtures_query(criteria, &self.timezone);
        let items: Vec<ApiFixtureItem> = self.get("/fixtures", &query).await?;
        Ok(transform_fixtures(items))
    }

    /// Odds for a single fixture, from Bet365 when it quotes the match
    pub async fn fetch_odds(&self, fixture_id: &str) -> Result<OddsMarket, ApiError> {
        let query = [("fixture", fixture_id.to_string())];
        let items: Vec<ApiOddsItem> = self.get("/odds", &query).await?;
        Ok(transform_odds(items))
    }

    /// Ask the provider how many requests the account has used today
    pub async fn check_usage(&self) -> Result<UsageReport, ApiError> {
        let status: ApiStatus = self.get("/status", &[]).await?;
        let requests = status
            .requests
            .ok_or_else(|| ApiError::Decode("status response has no request counters".into()))?;

        Ok(UsageReport {
            plan: status.subscription.and_then(|s| s.plan),
            requests_today: requests.current,
            daily_limit: requests.limit_day,
        })
    }

    async fn get<T: DeserializeOwned + Default>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let before = Instant::now();
        self.requests_made.fetch_add(1, Ordering::Relaxed);

        let sent = self
            .client
            .get(&url)
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", &self.host)
            .query(query)
            .send()
            .await;

        let response = match sent {
            Ok(response) => {
                debug!(
                    "[API-FOOTBALL] GET {} {} {:.2?}",
                    url,
                    response.status(),
                    before.elapsed()
                );
                response
            }
            Err(e) => {
                debug!("[API-FOOTBALL] GET {} failed {:.2?}: {}", url, before.elapsed(), e);
                return Err(ApiError::Upstream(format!("request to {} failed: {}", url, e)));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Upstream(format!(
                "API-Football returned {}: {}",
                status,
                rejection_message(&body).unwrap_or_else(|| {
                    status.canonical_reason().unwrap_or("request failed").to_string()
                })
            )));
        }

        let envelope: ApiEnvelope = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        if let Some(message) = envelope.error_message() {
            return Err(ApiError::Upstream(format!(
                "API-Football rejected the request: {}",
                message
            )));
        }

        match envelope.response {
            None | Some(serde_json::Value::Null) => Ok(T::default()),
            Some(payload) => {
                serde_json::from_value(payload).map_err(|e| ApiError::Decode(e.to_string()))
            }
        }
    }
}

fn fixtures_query(criteria: &MatchCriteria, timezone: &str) -> Vec<(&'static str, String)> {
    if criteria.live {
        return vec![("live", "all".to_string()), ("timezone", timezone.to_string())];
    }

    let mut query = vec![
        ("date", criteria.date.format("%Y-%m-%d").to_string()),
        ("timezone", timezone.to_string()),
    ];
    if let Some(status) = criteria.status.as_deref().filter(|s| !s.is_empty()) {
        query.push(("status", status.to_string()));
    }
    query
}

/// Pull a readable message out of an error body, if it has one
fn rejection_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(json) => json
            .get("message")
            .map(value_text)
            .or_else(|| {
                serde_json::from_value::<ApiEnvelope>(json)
                    .ok()
                    .and_then(|envelope| envelope.error_message())
            })
            .or_else(|| Some(body.to_string())),
        Err(_) => Some(body.to_string()),
    }
}

fn transform_fixtures(items: Vec<ApiFixtureItem>) -> Vec<Fixture> {
    items
        .into_iter()
        .map(|item| Fixture {
            id: item.fixture.id.to_string(),
            home: item.teams.home.name,
            away: item.teams.away.name,
            league: item.league.name,
            country: item.league.country.unwrap_or_default(),
            time: item.fixture.date,
            status: item.fixture.status.short,
            score: Score {
                home: item.goals.home,
                away: item.goals.away,
            },
        })
        .collect()
}

fn transform_odds(items: Vec<ApiOddsItem>) -> OddsMarket {
    let Some(item) = items.into_iter().next() else {
        return OddsMarket::default();
    };

    let mut bookmakers = item.bookmakers;
    let chosen = match bookmakers.iter().position(|b| b.name == PREFERRED_BOOKMAKER) {
        Some(index) => bookmakers.swap_remove(index),
        None if !bookmakers.is_empty() => bookmakers.remove(0),
        None => return OddsMarket::default(),
    };

    let mut odds = OddsMarket::default();
    // A market listed twice keeps its last occurrence
    for bet in chosen.bets {
        match bet.name.as_str() {
            "Match Winner" => {
                odds.match_winner = Some(MatchWinnerOdds {
                    home: find_price(&bet.values, "Home"),
                    draw: find_price(&bet.values, "Draw"),
                    away: find_price(&bet.values, "Away"),
                });
            }
            "Goals Over/Under" => {
                let lines: IndexMap<String, String> = bet
                    .values
                    .into_iter()
                    .map(|v| (v.value.into_string(), v.odd.into_string()))
                    .collect();
                odds.over_under = Some(lines);
            }
            "Both Teams To Score" => {
                odds.btts = Some(BttsOdds {
                    yes: find_price(&bet.values, "Yes"),
                    no: find_price(&bet.values, "No"),
                });
            }
            _ => {}
        }
    }

    odds
}

fn find_price(values: &[ApiBetValue], label: &str) -> Option<String> {
    values
        .iter()
        .find(|v| v.value.as_str() == Some(label))
        .map(|v| v.odd.clone().into_string())
}
