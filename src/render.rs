use crate::types::{AggregatorError, FetchConfig, Result};
use std::time::Duration;
use thirtyfour::prelude::*;
use tracing::{debug, warn};

// Sessions are not closed on drop, so the page work must give up early
// enough for the quit below to still run within the per-source fetch budget.
const QUIT_GRACE_SECS: u64 = 5;

/// Load a JavaScript-heavy page through a WebDriver session and return the
/// rendered DOM.
///
/// One browser session per call. The session is quit before returning,
/// whichever way the page work ends; the work itself runs under a budget
/// below the per-source timeout so the quit cannot be cancelled from above.
pub async fn fetch_rendered_html(config: &FetchConfig, url: &str, wait_css: &str) -> Result<String> {
    debug!("Rendering page: {}", url);

    let mut caps = DesiredCapabilities::chrome();
    caps.add_chrome_option(
        "args",
        vec![
            "--headless=new",
            "--no-sandbox",
            "--disable-dev-shm-usage",
            "--disable-gpu",
            "--window-size=1920,1080",
        ],
    )?;

    let driver = WebDriver::new(&config.webdriver_url, caps).await?;

    let budget = Duration::from_secs(config.fetch_timeout_seconds.saturating_sub(QUIT_GRACE_SECS));
    let result = tokio::time::timeout(budget, async {
        driver.goto(url).await?;

        // Wait for the content container, then give scripts a moment to
        // finish filling it in.
        driver.query(By::Css(wait_css)).first().await?;
        tokio::time::sleep(Duration::from_secs(config.render_wait_seconds)).await;

        driver.source().await
    })
    .await;

    if let Err(e) = driver.quit().await {
        warn!("Failed to quit browser session: {}", e);
    }

    match result {
        Ok(rendered) => Ok(rendered?),
        Err(_) => Err(AggregatorError::Timeout {
            seconds: config.fetch_timeout_seconds,
        }),
    }
}
