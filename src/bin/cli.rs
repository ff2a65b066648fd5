use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::Parser;
use matchday_odds::{
    fetch_enriched_matches, filter_by_league, ApiFootballClient, Config, EnrichedFixture,
    MatchCriteria,
};

/// Print today's football fixtures with their odds
#[derive(Debug, Parser)]
#[command(name = "cli", version, about)]
struct Args {
    /// Match day in YYYY-MM-DD (defaults to today, UTC)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Upstream status code(s), e.g. NS or FT-AET-PEN
    #[arg(long)]
    status: Option<String>,

    /// Only matches currently in play (ignores --date and --status)
    #[arg(long)]
    live: bool,

    /// Case-insensitive league name filter
    #[arg(long)]
    league: Option<String>,

    /// Print API-Football account usage and exit
    #[arg(long)]
    usage: bool,
}

fn format_match(m: &EnrichedFixture) -> String {
    let score = |goals: Option<u32>| goals.map_or_else(|| "-".to_string(), |g| g.to_string());
    let mut line = format!(
        "{} {} - {} {}:{} [{}] ({} - {})",
        m.fixture.time.format("%H:%M"),
        m.fixture.home,
        m.fixture.away,
        score(m.fixture.score.home),
        score(m.fixture.score.away),
        m.fixture.status,
        m.fixture.country,
        m.fixture.league,
    );

    if let Some(winner) = &m.odds.match_winner {
        let price = |p: &Option<String>| p.clone().unwrap_or_else(|| "-".to_string());
        line.push_str(&format!(
            " | 1X2 {}/{}/{}",
            price(&winner.home),
            price(&winner.draw),
            price(&winner.away)
        ));
    }
    if let Some(over) = m.odds.over_under_line("Over 2.5") {
        line.push_str(&format!(" | O2.5 {}", over));
    }
    if let Some(btts) = &m.odds.btts {
        line.push_str(&format!(
            " | BTTS {}/{}",
            btts.yes.as_deref().unwrap_or("-"),
            btts.no.as_deref().unwrap_or("-")
        ));
    }
    line
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let config = Config::from_env();
    let client = ApiFootballClient::new(&config).context("Failed to create API-Football client")?;

    if args.usage {
        let usage = client
            .check_usage()
            .await
            .context("Failed to fetch API usage")?;
        println!(
            "API-Football requests today: {}/{} (plan: {})",
            usage.requests_today,
            usage.daily_limit,
            usage.plan.as_deref().unwrap_or("unknown")
        );
        return Ok(());
    }

    let date = args.date.unwrap_or_else(|| Utc::now().date_naive());
    let mut criteria = MatchCriteria::for_date(date);
    if let Some(status) = args.status {
        criteria = criteria.with_status(status);
    }
    if args.live {
        criteria = criteria.live();
    }

    let matches = fetch_enriched_matches(&client, &criteria)
        .await
        .context("Failed to fetch matches")?;
    let matches = filter_by_league(matches, args.league.as_deref().unwrap_or_default());

    if matches.is_empty() {
        println!("No matches for the selected filters.");
    } else {
        println!("{} matches:\n", matches.len());
        for (i, m) in matches.iter().enumerate() {
            println!("{}. {}", i + 1, format_match(m));
        }
    }

    println!(
        "\nAPI calls this run: {}/{}",
        client.requests_made(),
        config.daily_limit
    );

    Ok(())
}
