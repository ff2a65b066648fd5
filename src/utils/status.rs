use crate::models::MatchCriteria;
use chrono::NaiveDate;

/// Status choices offered by the dashboard, mapped onto what API-Football understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Live,
    Prematch,
    Finished,
}

impl StatusFilter {
    /// Unknown values mean "no filter"
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "live" => StatusFilter::Live,
            "prematch" => StatusFilter::Prematch,
            "finished" => StatusFilter::Finished,
            _ => StatusFilter::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Live => "live",
            StatusFilter::Prematch => "prematch",
            StatusFilter::Finished => "finished",
        }
    }

    /// Upstream status code(s) for this choice, if it maps to one
    pub fn upstream_code(&self) -> Option<&'static str> {
        match self {
            StatusFilter::Prematch => Some("NS"),
            StatusFilter::Finished => Some("FT-AET-PEN"),
            StatusFilter::All | StatusFilter::Live => None,
        }
    }

    pub fn criteria(&self, date: NaiveDate) -> MatchCriteria {
        let criteria = MatchCriteria::for_date(date);
        match self {
            StatusFilter::Live => criteria.live(),
            other => match other.upstream_code() {
                Some(code) => criteria.with_status(code),
                None => criteria,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 4).unwrap()
    }

    #[test]
    fn test_parse() {
        assert_eq!(StatusFilter::parse("LIVE"), StatusFilter::Live);
        assert_eq!(StatusFilter::parse("prematch"), StatusFilter::Prematch);
        assert_eq!(StatusFilter::parse("finished"), StatusFilter::Finished);
        assert_eq!(StatusFilter::parse("postponed"), StatusFilter::All);
        assert_eq!(StatusFilter::parse(""), StatusFilter::All);
    }

    #[test]
    fn test_criteria() {
        assert_eq!(StatusFilter::All.criteria(day()), MatchCriteria::for_date(day()));
        assert_eq!(
            StatusFilter::Prematch.criteria(day()),
            MatchCriteria::for_date(day()).with_status("NS")
        );
        assert_eq!(
            StatusFilter::Finished.criteria(day()).status.as_deref(),
            Some("FT-AET-PEN")
        );

        let live = StatusFilter::Live.criteria(day());
        assert!(live.live);
        assert_eq!(live.status, None);
    }
}
