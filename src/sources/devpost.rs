use crate::fetcher::Fetcher;
use crate::sources::MAX_EVENTS_PER_SOURCE;
use crate::traits::EventSource;
use crate::types::{Event, Result};
use crate::utils::{date, text};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

const WEBSITE: &str = "Devpost";
const API_URL: &str = "https://devpost.com/api/hackathons?status[]=upcoming&status[]=open&page=1";

/// Devpost's public hackathon search API
pub struct DevpostSource {
    fetcher: Arc<Fetcher>,
}

#[derive(Debug, Deserialize)]
struct ApiPage {
    #[serde(default)]
    hackathons: Vec<ApiHackathon>,
}

#[derive(Debug, Deserialize)]
struct ApiHackathon {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    tagline: Option<String>,
    #[serde(default)]
    submission_period_dates: Option<String>,
    #[serde(default)]
    displayed_location: Option<ApiLocation>,
    #[serde(default)]
    themes: Vec<ApiTheme>,
    #[serde(default)]
    prize_amount: Option<PrizePool>,
}

// Prize pools arrive either as markup-wrapped text
// (`$<span data-currency-value>10,000</span>`) or as a bare number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PrizePool {
    Text(String),
    Amount(serde_json::Number),
}

#[derive(Debug, Deserialize)]
struct ApiLocation {
    #[serde(default)]
    location: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiTheme {
    #[serde(default)]
    name: String,
}

impl DevpostSource {
    pub fn new(fetcher: Arc<Fetcher>) -> Self {
        Self { fetcher }
    }

    fn map_page(page: ApiPage) -> Vec<Event> {
        page.hackathons
            .into_iter()
            .filter_map(map_hackathon)
            .take(MAX_EVENTS_PER_SOURCE)
            .collect()
    }
}

#[async_trait]
impl EventSource for DevpostSource {
    fn website(&self) -> &'static str {
        WEBSITE
    }

    async fn fetch(&self) -> Result<Vec<Event>> {
        info!("Pulling Devpost listings");

        let payload = self.fetcher.fetch_json(API_URL).await?;
        let page: ApiPage = serde_json::from_value(payload)?;
        let events = Self::map_page(page);

        info!("Pulled {} listings from Devpost", events.len());
        Ok(events)
    }
}

fn map_hackathon(hackathon: ApiHackathon) -> Option<Event> {
    let name = text::clean(&hackathon.title);
    if name.is_empty() {
        return None;
    }

    let (start_date, end_date) = hackathon
        .submission_period_dates
        .as_deref()
        .map(parse_period)
        .unwrap_or((None, None));

    let mut tags = vec!["Hackathon".to_string()];
    tags.extend(
        hackathon
            .themes
            .into_iter()
            .map(|theme| text::clean(&theme.name))
            .filter(|name| !name.is_empty()),
    );

    Some(Event {
        website: WEBSITE.to_string(),
        name,
        url: hackathon.url,
        description: hackathon
            .tagline
            .as_deref()
            .map(|tagline| text::smart_truncate(tagline, text::DESCRIPTION_MAX))
            .filter(|tagline| !tagline.is_empty()),
        start_date,
        end_date,
        location: hackathon
            .displayed_location
            .and_then(|loc| loc.location)
            .map(|loc| text::clean(&loc))
            .filter(|loc| !loc.is_empty())
            .unwrap_or_else(|| "Online".to_string()),
        tags,
        prize: hackathon.prize_amount.and_then(prize_text),
    })
}

fn prize_text(pool: PrizePool) -> Option<String> {
    let text = match pool {
        PrizePool::Text(raw) => strip_markup(&raw),
        PrizePool::Amount(n) => n.to_string(),
    };
    (!text.is_empty()).then_some(text)
}

/// Split Devpost's submission period ("Aug 20 - Sep 25, 2025") into start and
/// end dates. The start half usually omits the year, so it borrows the end
/// half's. Text that resists parsing rides along as the raw start date.
fn parse_period(raw: &str) -> (Option<String>, Option<String>) {
    let cleaned = text::clean(raw);
    if cleaned.is_empty() {
        return (None, None);
    }

    let halves = cleaned
        .split_once(" - ")
        .or_else(|| cleaned.split_once(" \u{2013} "));

    if let Some((first, second)) = halves {
        // Borrow the end half's year first so "Aug 20" in "Aug 20 - Sep 25,
        // 2025" lands in 2025 rather than being inferred from today.
        let start = trailing_year(second)
            .and_then(|year| date::normalize(&format!("{}, {}", first, year)))
            .or_else(|| date::normalize(first))
            .or_else(|| Some(first.trim().to_string()));
        let end = date::normalize(second);
        return (start, end);
    }

    (date::normalize(&cleaned).or(Some(cleaned)), None)
}

fn trailing_year(s: &str) -> Option<&str> {
    let (_, tail) = s.trim().rsplit_once(' ')?;
    (tail.len() == 4 && tail.chars().all(|c| c.is_ascii_digit())).then_some(tail)
}

/// Devpost wraps prize figures in markup: `$<span data-currency-value>10,000</span>`
fn strip_markup(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_tag = false;
    for c in raw.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    text::clean(&out)
}
