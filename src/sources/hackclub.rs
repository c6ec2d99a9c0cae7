use crate::fetcher::Fetcher;
use crate::sources::MAX_EVENTS_PER_SOURCE;
use crate::traits::EventSource;
use crate::types::{Event, Result};
use crate::utils::{date, text};
use async_trait::async_trait;
use feed_rs::model::Entry;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

const WEBSITE: &str = "Hack Club";
const FEED_URL: &str = "https://hackathons.hackclub.com/feed.xml";
const FALLBACK_URL: &str = "https://hackathons.hackclub.com/api/events/upcoming";

/// Hack Club's high school hackathon list. The Atom feed is the primary
/// endpoint; the JSON API only runs when the feed fetch or parse fails.
pub struct HackClubSource {
    fetcher: Arc<Fetcher>,
}

#[derive(Debug, Deserialize)]
struct ApiEvent {
    #[serde(default)]
    name: String,
    #[serde(default)]
    website: Option<String>,
    #[serde(default)]
    start: Option<String>,
    #[serde(default)]
    end: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default, rename = "virtual")]
    is_virtual: bool,
}

impl HackClubSource {
    pub fn new(fetcher: Arc<Fetcher>) -> Self {
        Self { fetcher }
    }

    async fn fetch_from_feed(&self) -> Result<Vec<Event>> {
        let feed = self.fetcher.fetch_feed(FEED_URL).await?;
        Ok(feed
            .entries
            .into_iter()
            .filter_map(map_entry)
            .take(MAX_EVENTS_PER_SOURCE)
            .collect())
    }

    async fn fetch_from_api(&self) -> Result<Vec<Event>> {
        let payload = self.fetcher.fetch_json(FALLBACK_URL).await?;
        let items: Vec<ApiEvent> = serde_json::from_value(payload)?;
        Ok(items
            .into_iter()
            .filter_map(map_api_event)
            .take(MAX_EVENTS_PER_SOURCE)
            .collect())
    }
}

#[async_trait]
impl EventSource for HackClubSource {
    fn website(&self) -> &'static str {
        WEBSITE
    }

    async fn fetch(&self) -> Result<Vec<Event>> {
        info!("Pulling Hack Club listings");

        let events = match self.fetch_from_feed().await {
            Ok(events) => events,
            Err(feed_err) => {
                warn!("Hack Club feed failed ({}), falling back to JSON API", feed_err);
                self.fetch_from_api().await?
            }
        };

        info!("Pulled {} listings from Hack Club", events.len());
        Ok(events)
    }
}

fn map_entry(entry: Entry) -> Option<Event> {
    let name = entry
        .title
        .map(|t| text::clean(&t.content))
        .filter(|t| !t.is_empty())?;

    let url = entry.links.first().map(|l| l.href.clone());
    let summary = entry
        .summary
        .map(|s| text::clean(&s.content))
        .filter(|s| !s.is_empty());

    // Feed entries carry no structured schedule; scan the summary text for
    // one and leave the event undated otherwise.
    let start_date = summary.as_deref().and_then(date::find);

    Some(Event {
        website: WEBSITE.to_string(),
        name,
        url,
        description: summary.map(|s| text::smart_truncate(&s, text::DESCRIPTION_MAX)),
        start_date,
        end_date: None,
        location: "Various".to_string(),
        tags: vec!["Hackathon".to_string()],
        prize: None,
    })
}

fn map_api_event(item: ApiEvent) -> Option<Event> {
    let name = text::clean(&item.name);
    if name.is_empty() {
        return None;
    }

    let location = if item.is_virtual {
        "Online".to_string()
    } else {
        let city = item.city.map(|c| text::clean(&c)).filter(|c| !c.is_empty());
        let state = item.state.map(|s| text::clean(&s)).filter(|s| !s.is_empty());
        match (city, state) {
            (Some(city), Some(state)) => format!("{}, {}", city, state),
            (Some(city), None) => city,
            (None, Some(state)) => state,
            (None, None) => "Various".to_string(),
        }
    };

    Some(Event {
        website: WEBSITE.to_string(),
        name,
        url: item.website,
        description: None,
        start_date: item.start.as_deref().map(normalize_or_raw),
        end_date: item.end.as_deref().map(normalize_or_raw),
        location,
        tags: vec!["Hackathon".to_string()],
        prize: None,
    })
}

fn normalize_or_raw(raw: &str) -> String {
    date::normalize(raw).unwrap_or_else(|| raw.to_string())
}
