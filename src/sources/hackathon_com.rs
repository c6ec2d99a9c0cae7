use crate::fetcher::Fetcher;
use crate::sources::MAX_EVENTS_PER_SOURCE;
use crate::traits::EventSource;
use crate::types::{Event, Result};
use crate::utils::{date, text, url};
use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use std::sync::Arc;
use tracing::{debug, info};

const WEBSITE: &str = "Hackathon.com";
const URL: &str = "https://www.hackathon.com/online";
const WAIT_CSS: &str = "div.ht-eb-card";

// The site reshuffles its markup between releases. Candidates are tried in
// order and the first selector with any matches wins.
const CARD_SELECTORS: &[&str] = &[
    "div.ht-eb-card",
    "div.ht-idt-card",
    "article[class*='event']",
];
const TITLE_SELECTORS: &[&str] = &[
    "a.ht-eb-card__title",
    ".ht-eb-card__title a",
    "h4 a",
    "h3 a",
];
const DATE_SELECTORS: &[&str] = &[".ht-eb-card__date", ".date", "time"];
const LOCATION_SELECTORS: &[&str] = &[".ht-eb-card__location", ".location", ".city"];

/// hackathon.com's listing page. The cards are assembled client-side, so the
/// fetch goes through the headless browser.
pub struct HackathonComSource {
    fetcher: Arc<Fetcher>,
}

impl HackathonComSource {
    pub fn new(fetcher: Arc<Fetcher>) -> Self {
        Self { fetcher }
    }

    fn parse_document(html: &str) -> Vec<Event> {
        let document = Html::parse_document(html);

        for card_css in CARD_SELECTORS {
            let Ok(card_selector) = Selector::parse(card_css) else {
                continue;
            };
            let cards: Vec<ElementRef> = document.select(&card_selector).collect();
            if cards.is_empty() {
                continue;
            }

            debug!("Matched {} cards with selector {}", cards.len(), card_css);
            return cards
                .into_iter()
                .filter_map(map_card)
                .take(MAX_EVENTS_PER_SOURCE)
                .collect();
        }

        Vec::new()
    }
}

#[async_trait]
impl EventSource for HackathonComSource {
    fn website(&self) -> &'static str {
        WEBSITE
    }

    async fn fetch(&self) -> Result<Vec<Event>> {
        info!("Pulling Hackathon.com listings");

        let html = self.fetcher.fetch_rendered_html(URL, WAIT_CSS).await?;
        let events = Self::parse_document(&html);

        info!("Pulled {} listings from Hackathon.com", events.len());
        Ok(events)
    }
}

fn map_card(card: ElementRef<'_>) -> Option<Event> {
    let title_el = select_first(&card, TITLE_SELECTORS)?;
    let name = element_text(&title_el)?;

    let link = title_el
        .value()
        .attr("href")
        .map(str::to_string)
        .or_else(|| first_href(&card))
        .and_then(|href| url::absolutize(URL, &href));

    let start_date = select_first(&card, DATE_SELECTORS)
        .and_then(|el| element_text(&el))
        .map(|raw| date::normalize(&raw).unwrap_or(raw));

    let location = select_first(&card, LOCATION_SELECTORS)
        .and_then(|el| element_text(&el))
        .unwrap_or_else(|| "Online".to_string());

    Some(Event {
        website: WEBSITE.to_string(),
        name,
        url: link,
        description: None,
        start_date,
        end_date: None,
        location,
        tags: vec!["Hackathon".to_string()],
        prize: None,
    })
}

fn select_first<'a>(card: &ElementRef<'a>, candidates: &[&str]) -> Option<ElementRef<'a>> {
    for css in candidates {
        if let Ok(selector) = Selector::parse(css) {
            if let Some(el) = card.select(&selector).next() {
                return Some(el);
            }
        }
    }
    None
}

fn element_text(el: &ElementRef<'_>) -> Option<String> {
    let cleaned = text::clean(&el.text().collect::<Vec<_>>().join(" "));
    (!cleaned.is_empty()).then_some(cleaned)
}

fn first_href(card: &ElementRef<'_>) -> Option<String> {
    let selector = Selector::parse("a[href]").ok()?;
    card.select(&selector)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string)
}
