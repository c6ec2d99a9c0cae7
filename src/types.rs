use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub website: String,
    pub name: String,
    pub url: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>, // "YYYY-MM-DD", or raw source text when unparseable
    pub end_date: Option<String>,
    pub location: String, // "Online" / "Various" when the source has nothing better
    pub tags: Vec<String>,
    pub prize: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunMode {
    Concurrent,
    Sequential,
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,       // per HTTP request
    pub fetch_timeout_seconds: u64, // per source, rendering included
    pub webdriver_url: String,
    pub render_wait_seconds: u64,
    pub mode: RunMode,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "HackathonAggregator/0.1".to_string(),
            timeout_seconds: 20,
            fetch_timeout_seconds: 60,
            webdriver_url: "http://localhost:9515".to_string(),
            render_wait_seconds: 2,
            mode: RunMode::Concurrent,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceOutcome {
    pub website: String,
    pub events: usize,
    pub error: Option<String>, // None for empty-but-clean fetches
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregateStats {
    pub succeeded: usize, // sources that contributed at least one event
    pub failed: usize,    // errored or came back empty
    pub outcomes: Vec<SourceOutcome>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
    pub total_fetched: usize,
    pub unique: usize,
    pub stats: AggregateStats,
}

#[derive(Debug, thiserror::Error)]
pub enum AggregatorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parse error: {0}")]
    Feed(String),

    #[error("Browser error: {0}")]
    Browser(#[from] thirtyfour::error::WebDriverError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Fetch timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    #[error("General error: {0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, AggregatorError>;
