mod common;

use common::{sample_event, FailingSource, HangingSource, StaticSource};
use hackathon_aggregator::{Aggregator, EventSource, FetchConfig, RunMode};
use std::sync::Once;
use std::time::{Duration, Instant};
use tracing::info;

static INIT: Once = Once::new();

fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .try_init()
            .ok();
    });
}

fn test_config() -> FetchConfig {
    FetchConfig {
        fetch_timeout_seconds: 2,
        ..FetchConfig::default()
    }
}

#[tokio::test]
async fn test_mixed_outcomes_settle_without_aborting() {
    init_tracing();

    info!("Testing settle-all over mixed source outcomes");

    let sources: Vec<Box<dyn EventSource>> = vec![
        Box::new(StaticSource::new(
            "A",
            vec![
                sample_event("A", "Alpha Hack", Some("2025-03-01")),
                sample_event("A", "Beta Jam", Some("2025-04-01")),
                sample_event("A", "Gamma Sprint", None),
            ],
        )),
        Box::new(FailingSource { website: "B" }),
        Box::new(StaticSource::new("C", Vec::new())),
    ];

    let aggregator = Aggregator::new(&test_config());
    let (events, stats) = aggregator.run_all(&sources).await;

    assert_eq!(events.len(), 3);
    assert_eq!(stats.succeeded, 1);
    assert_eq!(stats.failed, 2);
    assert_eq!(stats.outcomes.len(), 3);

    // The error keeps its reason; the empty-but-clean source records none.
    assert_eq!(stats.outcomes[1].website, "B");
    assert!(stats.outcomes[1].error.is_some());
    assert_eq!(stats.outcomes[2].website, "C");
    assert!(stats.outcomes[2].error.is_none());
    assert_eq!(stats.outcomes[2].events, 0);
}

#[tokio::test]
async fn test_concatenation_follows_registration_order() {
    init_tracing();

    // The first source finishes last; its events must still come first.
    let sources: Vec<Box<dyn EventSource>> = vec![
        Box::new(
            StaticSource::new("Slow", vec![sample_event("Slow", "Slow Hack", None)])
                .with_delay(Duration::from_millis(300)),
        ),
        Box::new(StaticSource::new(
            "Fast",
            vec![sample_event("Fast", "Fast Hack", None)],
        )),
    ];

    let aggregator = Aggregator::new(&test_config());
    let (events, stats) = aggregator.run_all(&sources).await;

    assert_eq!(events[0].website, "Slow");
    assert_eq!(events[1].website, "Fast");
    assert_eq!(stats.outcomes[0].website, "Slow");
    assert_eq!(stats.outcomes[1].website, "Fast");
}

#[tokio::test]
async fn test_hanging_source_times_out_as_ordinary_failure() {
    init_tracing();

    let sources: Vec<Box<dyn EventSource>> = vec![
        Box::new(HangingSource { website: "Stuck" }),
        Box::new(StaticSource::new(
            "Live",
            vec![sample_event("Live", "Live Hack", Some("2025-05-01"))],
        )),
    ];

    let config = FetchConfig {
        fetch_timeout_seconds: 1,
        ..FetchConfig::default()
    };
    let aggregator = Aggregator::new(&config);

    let started = Instant::now();
    let (events, stats) = aggregator.run_all(&sources).await;

    assert!(
        started.elapsed() < Duration::from_secs(5),
        "run must not hang on a stuck source"
    );
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].website, "Live");
    assert_eq!(stats.succeeded, 1);
    assert_eq!(stats.failed, 1);

    let stuck = &stats.outcomes[0];
    assert_eq!(stuck.website, "Stuck");
    assert!(stuck
        .error
        .as_deref()
        .unwrap_or_default()
        .contains("timed out"));
}

#[tokio::test]
async fn test_sequential_mode_matches_concurrent_results() {
    init_tracing();

    let build = || -> Vec<Box<dyn EventSource>> {
        vec![
            Box::new(StaticSource::new(
                "A",
                vec![sample_event("A", "Alpha Hack", Some("2025-03-01"))],
            )),
            Box::new(FailingSource { website: "B" }),
            Box::new(StaticSource::new(
                "C",
                vec![sample_event("C", "Campus Jam", None)],
            )),
        ]
    };

    let concurrent = Aggregator::new(&test_config());
    let sequential_config = FetchConfig {
        mode: RunMode::Sequential,
        ..test_config()
    };
    let sequential = Aggregator::new(&sequential_config);

    let (events_a, stats_a) = concurrent.run_all(&build()).await;
    let (events_b, stats_b) = sequential.run_all(&build()).await;

    let names_a: Vec<&str> = events_a.iter().map(|e| e.name.as_str()).collect();
    let names_b: Vec<&str> = events_b.iter().map(|e| e.name.as_str()).collect();

    assert_eq!(names_a, names_b);
    assert_eq!(stats_a.succeeded, stats_b.succeeded);
    assert_eq!(stats_a.failed, stats_b.failed);
}

#[tokio::test]
async fn test_all_sources_failing_is_an_empty_run_not_an_error() {
    init_tracing();

    let sources: Vec<Box<dyn EventSource>> = vec![
        Box::new(FailingSource { website: "A" }),
        Box::new(FailingSource { website: "B" }),
        Box::new(FailingSource { website: "C" }),
    ];

    let aggregator = Aggregator::new(&test_config());
    let (events, stats) = aggregator.run_all(&sources).await;

    assert!(events.is_empty());
    assert_eq!(stats.succeeded, 0);
    assert_eq!(stats.failed, 3);
    assert!(stats.outcomes.iter().all(|o| o.error.is_some()));
}
