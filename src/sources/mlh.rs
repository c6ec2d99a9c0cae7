use crate::fetcher::Fetcher;
use crate::sources::MAX_EVENTS_PER_SOURCE;
use crate::traits::EventSource;
use crate::types::{Event, Result};
use crate::utils::{date, text, url};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::sync::Arc;
use tracing::info;

const WEBSITE: &str = "MLH";
const URL: &str = "https://mlh.io/seasons/2026/events";

static CARD_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.event").expect("mlh card selector"));
static NAME_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h3.event-name").expect("mlh name selector"));
static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.event-link").expect("mlh link selector"));
static START_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("meta[itemprop='startDate']").expect("mlh start date selector")
});
static END_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("meta[itemprop='endDate']").expect("mlh end date selector"));
static LOCATION_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.event-location").expect("mlh location selector"));

/// MLH's season calendar. Server-rendered HTML with schema.org Event markup;
/// the ISO dates live in `<meta itemprop>` attributes, not the visible text.
pub struct MlhSource {
    fetcher: Arc<Fetcher>,
}

impl MlhSource {
    pub fn new(fetcher: Arc<Fetcher>) -> Self {
        Self { fetcher }
    }

    fn parse_document(html: &str) -> Vec<Event> {
        let document = Html::parse_document(html);
        let mut events = Vec::new();

        for card in document.select(&CARD_SELECTOR) {
            if events.len() == MAX_EVENTS_PER_SOURCE {
                break;
            }

            let Some(name) = first_text(&card, &NAME_SELECTOR) else {
                continue;
            };

            let link = card
                .select(&LINK_SELECTOR)
                .next()
                .and_then(|a| a.value().attr("href"))
                .and_then(|href| url::absolutize(URL, href));

            let start_date = meta_content(&card, &START_SELECTOR).map(normalize_or_raw);
            let end_date = meta_content(&card, &END_SELECTOR).map(normalize_or_raw);

            let location = first_text(&card, &LOCATION_SELECTOR)
                .map(|loc| loc.replace(" ,", ","))
                .unwrap_or_else(|| "Various".to_string());

            events.push(Event {
                website: WEBSITE.to_string(),
                name,
                url: link,
                description: None,
                start_date,
                end_date,
                location,
                tags: vec!["Hackathon".to_string()],
                prize: None,
            });
        }

        events
    }
}

#[async_trait]
impl EventSource for MlhSource {
    fn website(&self) -> &'static str {
        WEBSITE
    }

    async fn fetch(&self) -> Result<Vec<Event>> {
        info!("Pulling MLH listings");

        let html = self.fetcher.fetch_html(URL).await?;
        let events = Self::parse_document(&html);

        info!("Pulled {} listings from MLH", events.len());
        Ok(events)
    }
}

fn first_text(card: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    card.select(selector)
        .next()
        .map(|el| text::clean(&el.text().collect::<Vec<_>>().join(" ")))
        .filter(|t| !t.is_empty())
}

fn meta_content(card: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    card.select(selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(str::to_string)
        .filter(|c| !c.is_empty())
}

fn normalize_or_raw(raw: String) -> String {
    date::normalize(&raw).unwrap_or(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
    <div class="row">
        <div class="event-wrapper col-md-3">
            <div class="event" itemscope itemtype="http://schema.org/Event">
                <a class="event-link" href="https://hackmit.org" title="HackMIT" itemprop="url"></a>
                <h3 class="event-name" itemprop="name">HackMIT</h3>
                <p class="event-date">Sep 13th - 14th</p>
                <meta itemprop="startDate" content="2025-09-13" />
                <meta itemprop="endDate" content="2025-09-14" />
                <div class="event-location" itemprop="location">
                    <span itemprop="city">Cambridge</span>,
                    <span itemprop="state">MA</span>
                </div>
            </div>
        </div>
        <div class="event-wrapper col-md-3">
            <div class="event" itemscope itemtype="http://schema.org/Event">
                <a class="event-link" href="/events/global-hack-week" itemprop="url"></a>
                <h3 class="event-name" itemprop="name">Global Hack Week: AI</h3>
                <p class="event-date">Oct 3rd - 9th</p>
                <meta itemprop="startDate" content="2025-10-03" />
                <div class="event-location" itemprop="location">
                    <span itemprop="city">Everywhere</span>,
                    <span itemprop="state">Worldwide</span>
                </div>
            </div>
        </div>
        <div class="event-wrapper col-md-3">
            <div class="event" itemscope itemtype="http://schema.org/Event">
                <a class="event-link" href="https://nameless.example.com"></a>
                <h3 class="event-name"></h3>
            </div>
        </div>
    </div>
    "#;

    #[test]
    fn parses_event_cards() {
        let events = MlhSource::parse_document(SAMPLE_HTML);

        assert_eq!(events.len(), 2);

        let first = &events[0];
        assert_eq!(first.website, "MLH");
        assert_eq!(first.name, "HackMIT");
        assert_eq!(first.url.as_deref(), Some("https://hackmit.org"));
        assert_eq!(first.start_date.as_deref(), Some("2025-09-13"));
        assert_eq!(first.end_date.as_deref(), Some("2025-09-14"));
        assert_eq!(first.location, "Cambridge, MA");
    }

    #[test]
    fn relative_links_become_absolute() {
        let events = MlhSource::parse_document(SAMPLE_HTML);
        assert_eq!(
            events[1].url.as_deref(),
            Some("https://mlh.io/events/global-hack-week")
        );
    }

    #[test]
    fn missing_end_date_stays_none() {
        let events = MlhSource::parse_document(SAMPLE_HTML);
        assert_eq!(events[1].start_date.as_deref(), Some("2025-10-03"));
        assert_eq!(events[1].end_date, None);
    }

    #[test]
    fn cards_without_a_name_are_skipped() {
        let events = MlhSource::parse_document(SAMPLE_HTML);
        assert!(events.iter().all(|e| !e.name.is_empty()));
    }

    #[test]
    fn empty_page_yields_no_events() {
        let events = MlhSource::parse_document("<html><body></body></html>");
        assert!(events.is_empty());
    }

    #[test]
    fn respects_the_per_source_cap() {
        let cards: String = (0..MAX_EVENTS_PER_SOURCE + 5)
            .map(|i| {
                format!(
                    r#"<div class="event"><h3 class="event-name">Hack {}</h3></div>"#,
                    i
                )
            })
            .collect();
        let page = format!(r#"<div class="row">{}</div>"#, cards);

        let events = MlhSource::parse_document(&page);
        assert_eq!(events.len(), MAX_EVENTS_PER_SOURCE);
    }
}
