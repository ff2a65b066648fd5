use anyhow::{Context, Result};
use matchday_odds::routes::{app, AppState};
use matchday_odds::{ApiFootballClient, Config};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = Config::from_env();
    let client = ApiFootballClient::new(&config).context("Failed to create API-Football client")?;
    let state = AppState::new(client, config.daily_limit);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    info!("Starting web server at http://{}", config.bind_addr);
    info!("Press Ctrl+C to stop");

    axum::serve(listener, app(state))
        .await
        .context("Web server stopped unexpectedly")?;

    Ok(())
}
