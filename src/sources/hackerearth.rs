use crate::fetcher::Fetcher;
use crate::sources::MAX_EVENTS_PER_SOURCE;
use crate::traits::EventSource;
use crate::types::{Event, Result};
use crate::utils::{date, text};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

const WEBSITE: &str = "HackerEarth";
const API_URL: &str = "https://www.hackerearth.com/chrome-extension/events/";

/// HackerEarth's challenge listing API. Schedules arrive as epoch seconds,
/// with a textual timestamp alongside for older records.
pub struct HackerEarthSource {
    fetcher: Arc<Fetcher>,
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    #[serde(default)]
    response: Vec<ApiChallenge>,
}

#[derive(Debug, Deserialize)]
struct ApiChallenge {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    challenge_type: Option<String>,
    #[serde(default)]
    start_timestamp: Option<i64>,
    #[serde(default)]
    end_timestamp: Option<i64>,
    #[serde(default)]
    start_utc_tz: Option<String>,
    #[serde(default)]
    end_utc_tz: Option<String>,
}

impl HackerEarthSource {
    pub fn new(fetcher: Arc<Fetcher>) -> Self {
        Self { fetcher }
    }

    fn map_envelope(envelope: ApiEnvelope) -> Vec<Event> {
        envelope
            .response
            .into_iter()
            .filter_map(map_challenge)
            .take(MAX_EVENTS_PER_SOURCE)
            .collect()
    }
}

#[async_trait]
impl EventSource for HackerEarthSource {
    fn website(&self) -> &'static str {
        WEBSITE
    }

    async fn fetch(&self) -> Result<Vec<Event>> {
        info!("Pulling HackerEarth listings");

        let payload = self.fetcher.fetch_json(API_URL).await?;
        let envelope: ApiEnvelope = serde_json::from_value(payload)?;
        let events = Self::map_envelope(envelope);

        info!("Pulled {} listings from HackerEarth", events.len());
        Ok(events)
    }
}

fn map_challenge(challenge: ApiChallenge) -> Option<Event> {
    let name = text::clean(&challenge.title);
    if name.is_empty() {
        return None;
    }

    let start_date = challenge_date(challenge.start_timestamp, challenge.start_utc_tz.as_deref());
    let end_date = challenge_date(challenge.end_timestamp, challenge.end_utc_tz.as_deref());

    let mut tags = vec!["Hackathon".to_string()];
    if let Some(kind) = challenge
        .challenge_type
        .map(|k| text::clean(&k))
        .filter(|k| !k.is_empty() && !k.eq_ignore_ascii_case("hackathon"))
    {
        tags.push(kind);
    }

    Some(Event {
        website: WEBSITE.to_string(),
        name,
        url: challenge.url,
        description: challenge
            .description
            .as_deref()
            .map(|d| text::smart_truncate(&text::clean(d), text::DESCRIPTION_MAX))
            .filter(|d| !d.is_empty()),
        start_date,
        end_date,
        location: "Online".to_string(),
        tags,
        prize: None,
    })
}

/// Epoch seconds win; the textual timestamp is the fallback, passed through
/// raw when unparseable.
fn challenge_date(stamp: Option<i64>, text_form: Option<&str>) -> Option<String> {
    if let Some(day) = stamp.and_then(date::from_timestamp) {
        return Some(day);
    }
    text_form
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(|raw| date::normalize(raw).unwrap_or_else(|| raw.to_string()))
}
