use crate::domain::model::FeedDate;
use crate::domain::ports::Clock;
use chrono::Utc;

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today_utc(&self) -> FeedDate {
        FeedDate::new(Utc::now().date_naive())
    }
}
