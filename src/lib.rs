pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod utils;

pub use api::*;
pub use config::Config;
pub use error::ApiError;
pub use models::*;
pub use utils::*;

use futures::future::join_all;
use tracing::warn;

/// List fixtures matching `criteria` and attach odds to each one.
///
/// Odds are requested for every fixture concurrently. A failed odds lookup is
/// logged and leaves that fixture with empty odds; only a failure to list the
/// fixtures fails the whole call. Output order matches the fixture list.
pub async fn fetch_enriched_matches(
    client: &ApiFootballClient,
    criteria: &MatchCriteria,
) -> Result<Vec<EnrichedFixture>, ApiError> {
    let fixtures = client.fetch_matches(criteria).await?;

    let outcomes = join_all(fixtures.iter().map(|f| client.fetch_odds(&f.id))).await;

    Ok(fixtures
        .into_iter()
        .zip(outcomes)
        .map(|(fixture, outcome)| {
            let odds = outcome.unwrap_or_else(|e| {
                warn!("Could not fetch odds for match {}: {}", fixture.id, e);
                OddsMarket::default()
            });
            EnrichedFixture { fixture, odds }
        })
        .collect())
}
