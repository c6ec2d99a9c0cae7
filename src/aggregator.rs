use crate::traits::EventSource;
use crate::types::{
    AggregateStats, AggregatorError, Event, FetchConfig, Result, RunMode, SourceOutcome,
};
use futures::future;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Runs every registered source and merges whatever they produce. One
/// source failing, hanging, or coming back empty never affects the others.
pub struct Aggregator {
    fetch_timeout: Duration,
    mode: RunMode,
}

struct FetchOutcome {
    website: String,
    result: Result<Vec<Event>>,
    elapsed_ms: u64,
}

impl Aggregator {
    pub fn new(config: &FetchConfig) -> Self {
        Self {
            fetch_timeout: Duration::from_secs(config.fetch_timeout_seconds),
            mode: config.mode,
        }
    }

    /// Fetch all sources and concatenate their events in registration order.
    ///
    /// Every source settles before this returns; errors are converted into
    /// stats entries rather than propagated.
    pub async fn run_all(&self, sources: &[Box<dyn EventSource>]) -> (Vec<Event>, AggregateStats) {
        info!("Fetching {} sources ({:?})", sources.len(), self.mode);

        let outcomes = match self.mode {
            RunMode::Concurrent => {
                // join_all keeps registration order in its output no matter
                // which fetch finishes first.
                future::join_all(
                    sources.iter().map(|source| self.fetch_one(source.as_ref())),
                )
                .await
            }
            RunMode::Sequential => {
                let mut outcomes = Vec::with_capacity(sources.len());
                for source in sources {
                    outcomes.push(self.fetch_one(source.as_ref()).await);
                }
                outcomes
            }
        };

        self.settle(outcomes)
    }

    async fn fetch_one(&self, source: &dyn EventSource) -> FetchOutcome {
        let website = source.website().to_string();
        let started = Instant::now();

        let result = match tokio::time::timeout(self.fetch_timeout, source.fetch()).await {
            Ok(result) => result,
            Err(_) => Err(AggregatorError::Timeout {
                seconds: self.fetch_timeout.as_secs(),
            }),
        };

        FetchOutcome {
            website,
            result,
            elapsed_ms: started.elapsed().as_millis() as u64,
        }
    }

    fn settle(&self, outcomes: Vec<FetchOutcome>) -> (Vec<Event>, AggregateStats) {
        let mut combined = Vec::new();
        let mut stats = AggregateStats::default();

        for outcome in outcomes {
            let FetchOutcome { website, result, elapsed_ms } = outcome;
            match result {
                Ok(events) if !events.is_empty() => {
                    info!("{}: {} events in {}ms", website, events.len(), elapsed_ms);
                    stats.succeeded += 1;
                    stats.outcomes.push(SourceOutcome {
                        website,
                        events: events.len(),
                        error: None,
                        elapsed_ms,
                    });
                    combined.extend(events);
                }
                // An empty result is clean (no error string) but counts as a
                // failure: the source contributed nothing.
                Ok(_) => {
                    info!("{}: no events in {}ms", website, elapsed_ms);
                    stats.failed += 1;
                    stats.outcomes.push(SourceOutcome {
                        website,
                        events: 0,
                        error: None,
                        elapsed_ms,
                    });
                }
                Err(e) => {
                    warn!("{} failed after {}ms: {}", website, elapsed_ms, e);
                    stats.failed += 1;
                    stats.outcomes.push(SourceOutcome {
                        website,
                        events: 0,
                        error: Some(e.to_string()),
                        elapsed_ms,
                    });
                }
            }
        }

        info!(
            "Successfully fetched {}/{} sources ({} events)",
            stats.succeeded,
            stats.outcomes.len(),
            combined.len()
        );

        (combined, stats)
    }
}
