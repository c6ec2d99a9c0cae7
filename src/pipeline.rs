use crate::aggregator::Aggregator;
use crate::dedupe;
use crate::fetcher::Fetcher;
use crate::sort;
use crate::sources;
use crate::traits::EventSource;
use crate::types::{Event, FetchConfig, Result, RunReport};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;
use uuid::Uuid;

/// The full collection pass: fan out to every source, merge, dedupe, sort.
pub struct Pipeline {
    aggregator: Aggregator,
    sources: Vec<Box<dyn EventSource>>,
}

impl Pipeline {
    /// Pipeline over the built-in source registry
    pub fn new(config: FetchConfig) -> Result<Self> {
        let aggregator = Aggregator::new(&config);
        let fetcher = Arc::new(Fetcher::new(config)?);

        Ok(Self {
            aggregator,
            sources: sources::default_sources(fetcher),
        })
    }

    /// Pipeline over a caller-supplied source list
    pub fn with_sources(config: &FetchConfig, sources: Vec<Box<dyn EventSource>>) -> Self {
        Self {
            aggregator: Aggregator::new(config),
            sources,
        }
    }

    /// Collect the current listings: every source fetched, duplicates
    /// dropped (first in wins), events ordered by start date with undated
    /// ones last.
    ///
    /// The report is a side channel for logs and callers; nothing in it
    /// feeds back into the event list.
    pub async fn run(&self) -> (Vec<Event>, RunReport) {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let started = Instant::now();

        info!(
            "Starting collection run {} across {} sources",
            run_id,
            self.sources.len()
        );

        let (fetched, stats) = self.aggregator.run_all(&self.sources).await;
        let total_fetched = fetched.len();

        let mut events = dedupe::dedupe(fetched);
        sort::sort_by_start_date(&mut events);

        let report = RunReport {
            run_id,
            started_at,
            elapsed_ms: started.elapsed().as_millis() as u64,
            total_fetched,
            unique: events.len(),
            stats,
        };

        info!(
            "Run {} finished: {} fetched, {} unique, {} sources ok, {} failed, {}ms",
            report.run_id,
            report.total_fetched,
            report.unique,
            report.stats.succeeded,
            report.stats.failed,
            report.elapsed_ms
        );

        (events, report)
    }
}
