use chrono::{DateTime, FixedOffset, NaiveDate};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Final score, or the running score of a match in progress.
/// Both sides are `None` until the provider reports goals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub home: Option<u32>,
    pub away: Option<u32>,
}

/// A football match as reported by the data provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    /// Provider id, also the key used to look up odds for this match
    pub id: String,
    pub home: String,
    pub away: String,
    pub league: String,
    pub country: String,
    /// Kickoff, in the timezone the fixtures were requested in
    pub time: DateTime<FixedOffset>,
    /// Short status code, e.g. "NS", "1H", "FT"
    pub status: String,
    pub score: Score,
}

impl Fixture {
    /// Calendar date of kickoff in the fixture's own offset
    pub fn kickoff_date(&self) -> NaiveDate {
        self.time.date_naive()
    }
}

/// Home / draw / away prices
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchWinnerOdds {
    #[serde(rename = "1", default, skip_serializing_if = "Option::is_none")]
    pub home: Option<String>,
    #[serde(rename = "X", default, skip_serializing_if = "Option::is_none")]
    pub draw: Option<String>,
    #[serde(rename = "2", default, skip_serializing_if = "Option::is_none")]
    pub away: Option<String>,
}

/// Both-teams-to-score prices
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BttsOdds {
    #[serde(rename = "Yes", default, skip_serializing_if = "Option::is_none")]
    pub yes: Option<String>,
    #[serde(rename = "No", default, skip_serializing_if = "Option::is_none")]
    pub no: Option<String>,
}

/// Decimal odds for the markets we display, taken from a single bookmaker.
///
/// Serializes to `{}` when nothing is available, which is also what callers
/// see when the odds lookup failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OddsMarket {
    #[serde(rename = "1X2", default, skip_serializing_if = "Option::is_none")]
    pub match_winner: Option<MatchWinnerOdds>,
    /// Line label ("Over 2.5", "Under 2.5", ...) to price
    #[serde(rename = "Over/Under", default, skip_serializing_if = "Option::is_none")]
    pub over_under: Option<IndexMap<String, String>>,
    #[serde(rename = "BTTS", default, skip_serializing_if = "Option::is_none")]
    pub btts: Option<BttsOdds>,
}

impl OddsMarket {
    pub fn is_empty(&self) -> bool {
        self.match_winner.is_none() && self.over_under.is_none() && self.btts.is_none()
    }

    /// Price for one over/under line, e.g. `"Over 2.5"`
    pub fn over_under_line(&self, label: &str) -> Option<&str> {
        self.over_under
            .as_ref()
            .and_then(|lines| lines.get(label))
            .map(String::as_str)
    }
}

/// A fixture together with its odds. `odds` is always present, possibly empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedFixture {
    #[serde(flatten)]
    pub fixture: Fixture,
    #[serde(default)]
    pub odds: OddsMarket,
}

/// What to ask the provider for when listing fixtures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCriteria {
    pub date: NaiveDate,
    /// Upstream status code(s), e.g. "NS" or "FT-AET-PEN"
    pub status: Option<String>,
    /// When set, date and status are ignored and every match in play is returned
    pub live: bool,
}

impl MatchCriteria {
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            date,
            status: None,
            live: false,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn live(mut self) -> Self {
        self.live = true;
        self
    }
}

/// Body of `GET /api/matches`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchesResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub matches: Vec<EnrichedFixture>,
}

impl MatchesResponse {
    pub fn ok(matches: Vec<EnrichedFixture>) -> Self {
        Self {
            success: true,
            count: Some(matches.len()),
            error: None,
            matches,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            count: None,
            error: Some(error.into()),
            matches: Vec::new(),
        }
    }
}
