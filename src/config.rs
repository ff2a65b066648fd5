use std::time::Duration;
use tracing::warn;

pub const DEFAULT_BASE_URL: &str = "https://v3.football.api-sports.io";
pub const DEFAULT_HOST: &str = "v3.football.api-sports.io";
pub const DEFAULT_TIMEZONE: &str = "Europe/Warsaw";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_DAILY_LIMIT: u32 = 100;
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Runtime settings, read once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub host: String,
    pub timezone: String,
    /// Bound on every outbound request
    pub timeout: Duration,
    /// Request quota shown next to the usage counter
    pub daily_limit: u32,
    pub bind_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            host: DEFAULT_HOST.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            daily_limit: DEFAULT_DAILY_LIMIT,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

impl Config {
    /// Load settings from the process environment (call `dotenv` first to pick up `.env`)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str, default: String| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
        };

        let timeout_secs = parse_or(&lookup, "UPSTREAM_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS);
        let daily_limit = parse_or(&lookup, "API_FOOTBALL_DAILY_LIMIT", DEFAULT_DAILY_LIMIT);

        Self {
            api_key: text("API_FOOTBALL_KEY", defaults.api_key),
            base_url: text("API_FOOTBALL_BASE_URL", defaults.base_url)
                .trim_end_matches('/')
                .to_string(),
            host: text("API_FOOTBALL_HOST", defaults.host),
            timezone: text("API_FOOTBALL_TIMEZONE", defaults.timezone),
            timeout: Duration::from_secs(timeout_secs),
            daily_limit,
            bind_addr: text("BIND_ADDR", defaults.bind_addr),
        }
    }

    /// Point the client somewhere else, e.g. a mock server
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring {}={:?}, using default {}", key, raw, default);
            default
        }),
        _ => default,
    }
}
