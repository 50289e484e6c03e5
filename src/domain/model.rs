use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar date rendered as `YYYY-MM-DD` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeedDate(NaiveDate);

impl FeedDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Blank input means "no date"; anything else has to be a real calendar day.
    pub fn parse_optional(input: Option<&str>) -> Result<Option<Self>, chrono::ParseError> {
        match input.map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse().map(Some),
        }
    }
}

impl FromStr for FeedDate {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, DATE_FORMAT).map(Self)
    }
}

impl fmt::Display for FeedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

/// One "picture of the day" entry. The schema belongs to the upstream, so
/// the fields are kept as an opaque JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApodRecord(pub Map<String, Value>);

impl ApodRecord {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

/// One rover photograph, opaque like [`ApodRecord`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarsPhoto(pub Map<String, Value>);

impl MarsPhoto {
    pub fn img_src(&self) -> Option<&str> {
        self.0.get("img_src").and_then(Value::as_str)
    }

    pub fn earth_date(&self) -> Option<&str> {
        self.0.get("earth_date").and_then(Value::as_str)
    }

    pub fn camera_name(&self) -> Option<&str> {
        let camera = self.0.get("camera")?;
        camera
            .get("full_name")
            .or_else(|| camera.get("name"))
            .and_then(Value::as_str)
    }
}

/// Near-earth-object feed body. Empty means the fetch failed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NeoFeed(pub Map<String, Value>);

impl NeoFeed {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Objects grouped by date, in date order.
    pub fn objects_by_date(&self) -> Vec<(&str, &[Value])> {
        let Some(Value::Object(by_date)) = self.0.get("near_earth_objects") else {
            return Vec::new();
        };

        let mut days: Vec<(&str, &[Value])> = by_date
            .iter()
            .map(|(day, objects)| {
                let objects = objects.as_array().map(Vec::as_slice).unwrap_or(&[]);
                (day.as_str(), objects)
            })
            .collect();
        days.sort_by(|a, b| a.0.cmp(b.0));
        days
    }
}

/// Everything the page needs for one request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateResult {
    pub apod: Option<ApodRecord>,
    pub mars_photos: Vec<MarsPhoto>,
    pub neo: NeoFeed,
    pub error: Option<String>,
}
