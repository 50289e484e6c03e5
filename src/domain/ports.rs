use crate::domain::model::{ApodRecord, FeedDate, MarsPhoto, NeoFeed};
use crate::utils::error::UpstreamResult;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn api_key(&self) -> &str;
    fn api_base(&self) -> &str;
    fn request_timeout(&self) -> Option<Duration>;
}

/// Raw access to the three upstream feeds. Every call reports its own
/// failure; deciding what a failure means for the page is not its job.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn apod(&self, date: Option<FeedDate>) -> UpstreamResult<ApodRecord>;

    async fn rover_photos(&self, rover: &str, earth_date: FeedDate)
        -> UpstreamResult<Vec<MarsPhoto>>;

    async fn latest_rover_photos(&self, rover: &str) -> UpstreamResult<Vec<MarsPhoto>>;

    async fn neo_feed(&self, start_date: FeedDate, end_date: FeedDate) -> UpstreamResult<NeoFeed>;
}

pub trait Clock: Send + Sync {
    fn today_utc(&self) -> FeedDate;
}
