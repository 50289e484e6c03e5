use crate::domain::model::{AggregateResult, ApodRecord, FeedDate, MarsPhoto, NeoFeed};
use crate::domain::ports::{Clock, FeedSource};
use crate::utils::error::UpstreamError;

/// Every Mars query goes to this rover, whatever the caller asked for.
pub const FIXED_ROVER: &str = "curiosity";

pub const APOD_ERROR: &str = "Could not fetch Astronomy Picture of the Day.";
pub const MARS_PHOTOS_ERROR: &str = "Could not fetch Mars Rover photos.";
pub const NEO_ERROR: &str = "Could not fetch Near-Earth Objects data.";

/// One entry of the page error policy.
pub struct ErrorRule {
    pub message: &'static str,
    pub enabled: bool,
    pub failed: fn(&AggregateResult) -> bool,
}

/// Checked top to bottom; the first enabled rule that fails names the page
/// error. The Mars rule is switched off: an empty photo list is common and
/// is not reported to the user.
pub static ERROR_POLICY: [ErrorRule; 3] = [
    ErrorRule {
        message: APOD_ERROR,
        enabled: true,
        failed: apod_missing,
    },
    ErrorRule {
        message: MARS_PHOTOS_ERROR,
        enabled: false,
        failed: no_mars_photos,
    },
    ErrorRule {
        message: NEO_ERROR,
        enabled: true,
        failed: neo_empty,
    },
];

fn apod_missing(result: &AggregateResult) -> bool {
    result.apod.is_none()
}

fn no_mars_photos(result: &AggregateResult) -> bool {
    result.mars_photos.is_empty()
}

fn neo_empty(result: &AggregateResult) -> bool {
    result.neo.is_empty()
}

pub fn first_error(result: &AggregateResult) -> Option<&'static str> {
    ERROR_POLICY
        .iter()
        .find(|rule| rule.enabled && (rule.failed)(result))
        .map(|rule| rule.message)
}

/// Fetches the three feeds for one page request, one after another, and
/// turns every upstream failure into an empty or absent value.
pub struct FeedAggregator<S: FeedSource, K: Clock> {
    source: S,
    clock: K,
}

impl<S: FeedSource, K: Clock> FeedAggregator<S, K> {
    pub fn new(source: S, clock: K) -> Self {
        Self { source, clock }
    }

    pub async fn fetch_apod(&self, date: Option<FeedDate>) -> Option<ApodRecord> {
        match self.source.apod(date).await {
            Ok(record) if record.is_empty() => {
                tracing::warn!("APOD returned an empty body");
                None
            }
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("APOD unavailable: {}", e);
                None
            }
        }
    }

    /// Dated photos first when a date is given, then the rover's latest
    /// photos. A transport failure or a non-JSON body on the dated call gives up
    /// without trying the latest endpoint.
    pub async fn fetch_mars_photos(
        &self,
        rover: Option<&str>,
        date: Option<FeedDate>,
    ) -> Vec<MarsPhoto> {
        if let Some(requested) = rover.filter(|r| *r != FIXED_ROVER) {
            tracing::debug!("Rover '{}' requested, using '{}'", requested, FIXED_ROVER);
        }
        let rover = FIXED_ROVER;

        if let Some(date) = date {
            match self.source.rover_photos(rover, date).await {
                Ok(photos) if !photos.is_empty() => {
                    tracing::debug!("Date photos: {} for {}", photos.len(), date);
                    return photos;
                }
                Ok(_) => {
                    tracing::debug!("No {} photos on {}, trying latest", rover, date);
                }
                Err(UpstreamError::Status { status, body, .. }) => {
                    tracing::error!("Date request failed with {}: {}", status, body);
                }
                Err(e) => {
                    tracing::error!("Request failed: {}", e);
                    return Vec::new();
                }
            }
        }

        match self.source.latest_rover_photos(rover).await {
            Ok(photos) => {
                tracing::debug!("Latest photos: {}", photos.len());
                photos
            }
            Err(UpstreamError::Status { status, body, .. }) => {
                tracing::error!("Latest request failed with {}: {}", status, body);
                Vec::new()
            }
            Err(UpstreamError::Decode { source, .. }) => {
                tracing::error!("Could not parse latest photos JSON: {}", source);
                Vec::new()
            }
            Err(e @ UpstreamError::Transport(_)) => {
                tracing::error!("Request failed: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn fetch_neo_today(&self) -> NeoFeed {
        let today = self.clock.today_utc();
        match self.source.neo_feed(today, today).await {
            Ok(feed) => feed,
            Err(e) => {
                tracing::warn!("NEO feed for {} unavailable: {}", today, e);
                NeoFeed::default()
            }
        }
    }

    pub async fn aggregate(&self, form_date: Option<FeedDate>) -> AggregateResult {
        let apod = self.fetch_apod(form_date).await;
        let mars_photos = self.fetch_mars_photos(None, form_date).await;
        let neo = self.fetch_neo_today().await;

        let mut result = AggregateResult {
            apod,
            mars_photos,
            neo,
            error: None,
        };
        result.error = first_error(&result).map(str::to_string);
        result
    }
}
