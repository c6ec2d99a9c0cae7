#![allow(dead_code)]

use async_trait::async_trait;
use hackathon_aggregator::types::{AggregatorError, Event, Result};
use hackathon_aggregator::EventSource;
use std::time::Duration;

pub fn sample_event(website: &str, name: &str, start_date: Option<&str>) -> Event {
    Event {
        website: website.to_string(),
        name: name.to_string(),
        url: Some(format!(
            "https://example.com/{}",
            name.to_lowercase().replace(' ', "-")
        )),
        description: None,
        start_date: start_date.map(str::to_string),
        end_date: None,
        location: "Online".to_string(),
        tags: vec!["Hackathon".to_string()],
        prize: None,
    }
}

/// Source that yields a fixed set of events, optionally after a delay.
pub struct StaticSource {
    website: &'static str,
    events: Vec<Event>,
    delay: Duration,
}

impl StaticSource {
    pub fn new(website: &'static str, events: Vec<Event>) -> Self {
        Self {
            website,
            events,
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl EventSource for StaticSource {
    fn website(&self) -> &'static str {
        self.website
    }

    async fn fetch(&self) -> Result<Vec<Event>> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.events.clone())
    }
}

/// Source that always fails.
pub struct FailingSource {
    pub website: &'static str,
}

#[async_trait]
impl EventSource for FailingSource {
    fn website(&self) -> &'static str {
        self.website
    }

    async fn fetch(&self) -> Result<Vec<Event>> {
        Err(AggregatorError::General("upstream exploded".to_string()))
    }
}

/// Source that never finishes on its own; only the fetch timeout stops it.
pub struct HangingSource {
    pub website: &'static str,
}

#[async_trait]
impl EventSource for HangingSource {
    fn website(&self) -> &'static str {
        self.website
    }

    async fn fetch(&self) -> Result<Vec<Event>> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(Vec::new())
    }
}
