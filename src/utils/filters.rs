use crate::models::EnrichedFixture;

/// Keep fixtures whose league name contains `needle`, ignoring case.
/// A blank needle keeps everything.
pub fn filter_by_league(matches: Vec<EnrichedFixture>, needle: &str) -> Vec<EnrichedFixture> {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return matches;
    }

    matches
        .into_iter()
        .filter(|m| m.fixture.league.to_lowercase().contains(&needle))
        .collect()
}
