use clap::Parser;
use hackathon_aggregator::{report, FetchConfig, Pipeline, RunMode};
use std::env;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "hackathon-aggregator",
    about = "Collect hackathon listings from every configured source"
)]
struct Args {
    /// Fetch sources one at a time instead of all at once
    #[arg(long)]
    sequential: bool,

    /// Per-source time budget in seconds, rendering included
    #[arg(long, default_value_t = 60)]
    fetch_timeout: u64,

    /// Print the final list as JSON instead of plain-text messages
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    info!("Starting hackathon aggregator");

    let mut config = FetchConfig {
        fetch_timeout_seconds: args.fetch_timeout,
        ..FetchConfig::default()
    };
    if args.sequential {
        config.mode = RunMode::Sequential;
    }
    // The rendered-DOM source needs a chromedriver; point at a remote one via env
    if let Ok(webdriver_url) = env::var("WEBDRIVER_URL") {
        config.webdriver_url = webdriver_url;
    }

    let pipeline = Pipeline::new(config)?;
    let (events, run_report) = pipeline.run().await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&events)?);
    } else {
        for event in &events {
            println!("{}\n", report::chat_message(event));
        }
    }

    info!(
        "Collected {} unique events; {} sources ok, {} failed",
        run_report.unique, run_report.stats.succeeded, run_report.stats.failed
    );

    Ok(())
}
