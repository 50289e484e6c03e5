pub mod aggregator;

pub use crate::domain::model::{AggregateResult, ApodRecord, FeedDate, MarsPhoto, NeoFeed};
pub use crate::domain::ports::{Clock, ConfigProvider, FeedSource};
pub use aggregator::FeedAggregator;
