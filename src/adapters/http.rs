use crate::domain::model::{ApodRecord, FeedDate, MarsPhoto, NeoFeed};
use crate::domain::ports::{ConfigProvider, FeedSource};
use crate::utils::error::{Result, UpstreamError, UpstreamResult};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

const APOD_PATH: &str = "/planetary/apod";
const ROVERS_PATH: &str = "/mars-photos/api/v1/rovers";
const NEO_FEED_PATH: &str = "/neo/rest/v1/feed";

#[derive(Debug, Deserialize)]
struct PhotosPage {
    #[serde(default)]
    photos: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct LatestPhotosPage {
    #[serde(default)]
    latest_photos: Option<Value>,
}

/// A missing, null or non-array photo list is an empty one; entries that are
/// not JSON objects are dropped.
fn photo_list(value: Option<Value>) -> Vec<MarsPhoto> {
    match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(fields) => Some(MarsPhoto(fields)),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Talks to the NASA open APIs. Every request carries the access key as the
/// `api_key` query parameter.
#[derive(Debug, Clone)]
pub struct NasaClient {
    client: Client,
    api_base: String,
    api_key: String,
}

impl NasaClient {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            api_base: config.api_base().trim_end_matches('/').to_string(),
            api_key: config.api_key().to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        path: &str,
        params: &[(&str, String)],
    ) -> UpstreamResult<T> {
        let url = format!("{}{}", self.api_base, path);
        tracing::debug!("Requesting {} from {}", endpoint, url);

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("{} response status: {}", endpoint, status);

        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                endpoint,
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|source| UpstreamError::Decode { endpoint, source })
    }
}

#[async_trait]
impl FeedSource for NasaClient {
    async fn apod(&self, date: Option<FeedDate>) -> UpstreamResult<ApodRecord> {
        let mut params = Vec::new();
        if let Some(date) = date {
            params.push(("date", date.to_string()));
        }
        self.get_json("apod", APOD_PATH, &params).await
    }

    async fn rover_photos(
        &self,
        rover: &str,
        earth_date: FeedDate,
    ) -> UpstreamResult<Vec<MarsPhoto>> {
        let path = format!("{}/{}/photos", ROVERS_PATH, rover);
        let page: PhotosPage = self
            .get_json("rover photos", &path, &[("earth_date", earth_date.to_string())])
            .await?;
        Ok(photo_list(page.photos))
    }

    async fn latest_rover_photos(&self, rover: &str) -> UpstreamResult<Vec<MarsPhoto>> {
        let path = format!("{}/{}/latest_photos", ROVERS_PATH, rover);
        let page: LatestPhotosPage = self.get_json("latest rover photos", &path, &[]).await?;
        Ok(photo_list(page.latest_photos))
    }

    async fn neo_feed(&self, start_date: FeedDate, end_date: FeedDate) -> UpstreamResult<NeoFeed> {
        let params = [
            ("start_date", start_date.to_string()),
            ("end_date", end_date.to_string()),
        ];
        self.get_json("neo feed", NEO_FEED_PATH, &params).await
    }
}
