pub mod types;
pub mod traits;
pub mod utils;
pub mod fetcher;
pub mod render;
pub mod sources;
pub mod dedupe;
pub mod sort;
pub mod aggregator;
pub mod pipeline;
pub mod report;

pub use types::*;
pub use traits::EventSource;
pub use fetcher::Fetcher;
pub use aggregator::Aggregator;
pub use pipeline::Pipeline;
