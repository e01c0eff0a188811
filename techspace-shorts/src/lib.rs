pub mod types;
pub mod traits;
pub mod config;
pub mod fetcher;
pub mod parser;
pub mod aggregator;
pub mod ranking;
pub mod composer;
pub mod pipeline;
pub mod utils;

pub use types::*;
pub use traits::FeedRetriever;
pub use config::ShortsConfig;
pub use fetcher::Fetcher;
pub use parser::FeedParser;
pub use aggregator::FeedAggregator;
pub use composer::ScriptComposer;
pub use pipeline::ShortsPipeline;
