use crate::types::{Event, Result};
use async_trait::async_trait;

/// Trait for pulling hackathon listings from various sources (JSON APIs,
/// HTML pages, feeds, rendered DOM)
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Canonical source name, stamped into every event's `website` field
    fn website(&self) -> &'static str;

    /// Fetch the source's current listings, normalized into events
    ///
    /// Listings without a usable title are skipped, not errors. At most
    /// [`MAX_EVENTS_PER_SOURCE`](crate::sources::MAX_EVENTS_PER_SOURCE)
    /// events come back per call.
    async fn fetch(&self) -> Result<Vec<Event>>;
}
