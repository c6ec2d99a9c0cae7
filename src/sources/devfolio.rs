use crate::fetcher::Fetcher;
use crate::sources::MAX_EVENTS_PER_SOURCE;
use crate::traits::EventSource;
use crate::types::{Event, Result};
use crate::utils::{date, text};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

const WEBSITE: &str = "Devfolio";
const API_URL: &str = "https://api.devfolio.co/api/search/hackathons";

/// Devfolio's hackathon search endpoint. A POST query returns
/// Elasticsearch-style hits with the listing under `_source`.
pub struct DevfolioSource {
    fetcher: Arc<Fetcher>,
}

#[derive(Debug, Deserialize)]
struct SearchReply {
    #[serde(default)]
    hits: HitsEnvelope,
}

#[derive(Debug, Default, Deserialize)]
struct HitsEnvelope {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "_source", default)]
    source: HackathonDoc,
}

#[derive(Debug, Default, Deserialize)]
struct HackathonDoc {
    #[serde(default)]
    name: String,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    desc: Option<String>,
    #[serde(default)]
    starts_at: Option<String>,
    #[serde(default)]
    ends_at: Option<String>,
    #[serde(default)]
    is_online: bool,
    #[serde(default)]
    city: Option<String>,
}

impl DevfolioSource {
    pub fn new(fetcher: Arc<Fetcher>) -> Self {
        Self { fetcher }
    }

    fn search_body() -> Value {
        json!({
            "type": "application_open",
            "from": 0,
            "size": MAX_EVENTS_PER_SOURCE,
        })
    }

    fn map_reply(reply: SearchReply) -> Vec<Event> {
        reply
            .hits
            .hits
            .into_iter()
            .filter_map(|hit| map_doc(hit.source))
            .take(MAX_EVENTS_PER_SOURCE)
            .collect()
    }
}

#[async_trait]
impl EventSource for DevfolioSource {
    fn website(&self) -> &'static str {
        WEBSITE
    }

    async fn fetch(&self) -> Result<Vec<Event>> {
        info!("Pulling Devfolio listings");

        let payload = self.fetcher.post_json(API_URL, &Self::search_body()).await?;
        let reply: SearchReply = serde_json::from_value(payload)?;
        let events = Self::map_reply(reply);

        info!("Pulled {} listings from Devfolio", events.len());
        Ok(events)
    }
}

fn map_doc(doc: HackathonDoc) -> Option<Event> {
    let name = text::clean(&doc.name);
    if name.is_empty() {
        return None;
    }

    let location = if doc.is_online {
        "Online".to_string()
    } else {
        doc.city
            .map(|city| text::clean(&city))
            .filter(|city| !city.is_empty())
            .unwrap_or_else(|| "Various".to_string())
    };

    Some(Event {
        website: WEBSITE.to_string(),
        name,
        url: doc.slug.map(|slug| format!("https://{}.devfolio.co/", slug)),
        description: doc
            .desc
            .as_deref()
            .map(|d| text::smart_truncate(&text::clean(d), text::DESCRIPTION_MAX))
            .filter(|d| !d.is_empty()),
        start_date: doc.starts_at.as_deref().map(normalize_or_raw),
        end_date: doc.ends_at.as_deref().map(normalize_or_raw),
        location,
        tags: vec!["Hackathon".to_string()],
        prize: None,
    })
}

fn normalize_or_raw(raw: &str) -> String {
    date::normalize(raw).unwrap_or_else(|| raw.to_string())
}
