use crate::{
    fetch_enriched_matches, filter_by_league, ApiError, ApiFootballClient, EnrichedFixture,
    MatchCriteria, MatchesResponse, StatusFilter,
};
use askama::Template;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{Local, NaiveDate, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::error;

// Custom filters for formatting
mod filters {
    use chrono::{DateTime, FixedOffset};

    pub fn kickoff(time: &DateTime<FixedOffset>) -> ::askama::Result<String> {
        Ok(time.format("%H:%M").to_string())
    }

    pub fn goals(value: &Option<u32>) -> ::askama::Result<String> {
        Ok(value.map_or_else(|| "-".to_string(), |g| g.to_string()))
    }

    pub fn price(value: &Option<String>) -> ::askama::Result<String> {
        Ok(value.clone().unwrap_or_else(|| "-".to_string()))
    }
}

/// Shared by every handler. The client is read-only apart from its request counter.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<ApiFootballClient>,
    pub daily_limit: u32,
}

impl AppState {
    pub fn new(client: ApiFootballClient, daily_limit: u32) -> Self {
        Self {
            client: Arc::new(client),
            daily_limit,
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        // This will serve files from the "static" directory at the "/static" URL path
        .nest_service("/static", ServeDir::new("static"))
        .route("/", get(dashboard))
        .route("/api/matches", get(list_matches))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Query string of `GET /api/matches`
#[derive(Debug, Default, Deserialize)]
pub struct MatchesQuery {
    pub date: Option<String>,
    /// Upstream status code(s), passed through as-is
    pub status: Option<String>,
    /// Only the literal `"true"` enables live mode
    pub live: Option<String>,
}

impl MatchesQuery {
    /// Live mode ignores `date` and `status`, so neither is validated then
    pub fn criteria(&self) -> Result<MatchCriteria, ApiError> {
        if self.live.as_deref() == Some("true") {
            return Ok(MatchCriteria::for_date(Utc::now().date_naive()).live());
        }

        let mut criteria = MatchCriteria::for_date(parse_date(self.date.as_deref())?);
        if let Some(status) = self.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            criteria = criteria.with_status(status);
        }
        Ok(criteria)
    }
}

/// `YYYY-MM-DD`, or today's UTC date when missing
fn parse_date(raw: Option<&str>) -> Result<NaiveDate, ApiError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(Utc::now().date_naive()),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
            ApiError::InvalidRequest(format!("date must be in YYYY-MM-DD format, got {:?}", s))
        }),
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(MatchesResponse::failed(self.to_string()))).into_response()
    }
}

async fn list_matches(
    State(state): State<AppState>,
    query: Result<Query<MatchesQuery>, QueryRejection>,
) -> Result<Json<MatchesResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;
    let criteria = query.criteria()?;

    let matches = fetch_enriched_matches(&state.client, &criteria)
        .await
        .map_err(|e| {
            error!("[API /matches] Failed to fetch matches: {}", e);
            e
        })?;

    Ok(Json(MatchesResponse::ok(matches)))
}

async fn health() -> &'static str {
    "ok"
}

/// Query string of the dashboard page; `status` uses the dashboard vocabulary
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub date: Option<String>,
    pub status: Option<String>,
    pub league: Option<String>,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    active_page: String,
    date: String,
    status: String,
    league: String,
    matches: Vec<EnrichedFixture>,
    error: Option<String>,
    api_calls: u64,
    daily_limit: u32,
    last_update: String,
}

struct HtmlTemplate<T>(T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render template: {}", err),
            )
                .into_response(),
        }
    }
}

async fn dashboard(
    State(state): State<AppState>,
    query: Result<Query<DashboardQuery>, QueryRejection>,
) -> impl IntoResponse {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    let status = StatusFilter::parse(query.status.as_deref().unwrap_or_default());
    let league = query.league.unwrap_or_default();

    let date = match parse_date(query.date.as_deref()) {
        Err(_) if status == StatusFilter::Live => Ok(Utc::now().date_naive()),
        parsed => parsed,
    };

    let (date, matches, error) = match date {
        Ok(date) => match fetch_enriched_matches(&state.client, &status.criteria(date)).await {
            Ok(matches) => (date, filter_by_league(matches, &league), None),
            Err(e) => {
                error!("[DASHBOARD] Failed to fetch matches: {}", e);
                (date, Vec::new(), Some(e.to_string()))
            }
        },
        Err(e) => (Utc::now().date_naive(), Vec::new(), Some(e.to_string())),
    };

    let template = DashboardTemplate {
        active_page: "matches".to_string(),
        date: date.format("%Y-%m-%d").to_string(),
        status: status.as_str().to_string(),
        league,
        matches,
        error,
        api_calls: state.client.requests_made(),
        daily_limit: state.daily_limit,
        last_update: Local::now().format("%H:%M:%S").to_string(),
    };

    HtmlTemplate(template)
}
