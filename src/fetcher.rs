use crate::render;
use crate::types::{AggregatorError, FetchConfig, Result};
use feed_rs::model::Feed;
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client, config })
    }

    /// Fetch and parse an RSS/Atom document
    pub async fn fetch_feed(&self, url: &str) -> Result<Feed> {
        debug!("Fetching feed: {}", url);

        let body = self.fetch_html(url).await?;
        feed_rs::parser::parse(body.as_bytes())
            .map_err(|e| AggregatorError::Feed(format!("{}: {}", url, e)))
    }

    /// GET a JSON endpoint
    pub async fn fetch_json(&self, url: &str) -> Result<Value> {
        debug!("Fetching JSON: {}", url);

        let response = self.client.get(url).send().await?;
        let response = ensure_success(response)?;
        Ok(response.json().await?)
    }

    /// POST a JSON body (search-style endpoints) and parse the JSON reply
    pub async fn post_json(&self, url: &str, body: &Value) -> Result<Value> {
        debug!("Posting JSON query to: {}", url);

        let response = self.client.post(url).json(body).send().await?;
        let response = ensure_success(response)?;
        Ok(response.json().await?)
    }

    /// GET a page body as delivered, without running any JavaScript
    pub async fn fetch_html(&self, url: &str) -> Result<String> {
        debug!("Fetching page: {}", url);

        let response = self.client.get(url).send().await?;
        let response = ensure_success(response)?;
        let content = response.text().await?;
        Ok(content)
    }

    /// Load a page in the headless browser, wait for `wait_css` to appear,
    /// and return the rendered DOM
    pub async fn fetch_rendered_html(&self, url: &str, wait_css: &str) -> Result<String> {
        render::fetch_rendered_html(&self.config, url, wait_css).await
    }
}

fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if !status.is_success() {
        return Err(AggregatorError::General(format!(
            "HTTP {}: {}",
            status,
            status.canonical_reason().unwrap_or("Unknown")
        )));
    }
    Ok(response)
}
