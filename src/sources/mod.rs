pub mod devfolio;
pub mod devpost;
pub mod hackathon_com;
pub mod hackclub;
pub mod hackerearth;
pub mod mlh;

pub use devfolio::DevfolioSource;
pub use devpost::DevpostSource;
pub use hackathon_com::HackathonComSource;
pub use hackclub::HackClubSource;
pub use hackerearth::HackerEarthSource;
pub use mlh::MlhSource;

use crate::fetcher::Fetcher;
use crate::traits::EventSource;
use std::sync::Arc;

/// Upper bound on how many events a single source contributes per run
pub const MAX_EVENTS_PER_SOURCE: usize = 20;

/// The built-in sources in registration order. Aggregate output concatenates
/// per-source results in this order, whatever order the fetches finish in.
pub fn default_sources(fetcher: Arc<Fetcher>) -> Vec<Box<dyn EventSource>> {
    vec![
        Box::new(DevpostSource::new(fetcher.clone())),
        Box::new(MlhSource::new(fetcher.clone())),
        Box::new(HackerEarthSource::new(fetcher.clone())),
        Box::new(DevfolioSource::new(fetcher.clone())),
        Box::new(HackClubSource::new(fetcher.clone())),
        Box::new(HackathonComSource::new(fetcher)),
    ]
}
