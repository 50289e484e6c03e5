use astro_feed::{FeedAggregator, FeedDate, NasaClient, ServerConfig, SystemClock, APOD_ERROR, NEO_ERROR};
use httpmock::prelude::*;
use serde_json::json;

const APOD_PATH: &str = "/planetary/apod";
const DATED_PATH: &str = "/mars-photos/api/v1/rovers/curiosity/photos";
const LATEST_PATH: &str = "/mars-photos/api/v1/rovers/curiosity/latest_photos";
const NEO_PATH: &str = "/neo/rest/v1/feed";

fn aggregator_for(server: &MockServer) -> FeedAggregator<NasaClient, SystemClock> {
    let config = ServerConfig::for_api_base(server.base_url());
    let client = NasaClient::new(&config).unwrap();
    FeedAggregator::new(client, SystemClock)
}

fn neo_body() -> serde_json::Value {
    json!({
        "element_count": 1,
        "near_earth_objects": {
            "2024-01-01": [{"name": "(2024 AA)", "is_potentially_hazardous_asteroid": false}]
        }
    })
}

#[tokio::test]
async fn test_default_key_used_for_every_upstream() {
    let server = MockServer::start();

    let apod_mock = server.mock(|when, then| {
        when.method(GET).path(APOD_PATH).query_param("api_key", "DEMO_KEY");
        then.status(200).json_body(json!({"title": "Orion"}));
    });
    let latest_mock = server.mock(|when, then| {
        when.method(GET).path(LATEST_PATH).query_param("api_key", "DEMO_KEY");
        then.status(200)
            .json_body(json!({"latest_photos": [{"id": 7, "img_src": "https://mars/7.jpg"}]}));
    });
    let neo_mock = server.mock(|when, then| {
        when.method(GET)
            .path(NEO_PATH)
            .query_param("api_key", "DEMO_KEY")
            .query_param_exists("start_date")
            .query_param_exists("end_date");
        then.status(200).json_body(neo_body());
    });

    let result = aggregator_for(&server).aggregate(None).await;

    apod_mock.assert();
    latest_mock.assert();
    neo_mock.assert();
    assert_eq!(result.error, None);
    assert_eq!(result.mars_photos.len(), 1);
}

#[tokio::test]
async fn test_dated_request_with_all_upstreams_healthy() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path(APOD_PATH).query_param("date", "2024-01-01");
        then.status(200)
            .json_body(json!({"title": "Pillars", "date": "2024-01-01", "media_type": "image"}));
    });
    let dated_mock = server.mock(|when, then| {
        when.method(GET)
            .path(DATED_PATH)
            .query_param("earth_date", "2024-01-01");
        then.status(200).json_body(json!({"photos": [{"id": 1}, {"id": 2}]}));
    });
    let latest_mock = server.mock(|when, then| {
        when.method(GET).path(LATEST_PATH);
        then.status(200).json_body(json!({"latest_photos": []}));
    });
    server.mock(|when, then| {
        when.method(GET).path(NEO_PATH);
        then.status(200).json_body(neo_body());
    });

    let date: FeedDate = "2024-01-01".parse().unwrap();
    let result = aggregator_for(&server).aggregate(Some(date)).await;

    dated_mock.assert();
    assert_eq!(latest_mock.hits(), 0);
    assert_eq!(result.error, None);
    assert_eq!(result.apod.unwrap().str_field("title"), Some("Pillars"));
    assert_eq!(result.mars_photos.len(), 2);
    assert!(!result.neo.is_empty());
}

#[tokio::test]
async fn test_empty_dated_photos_fall_back_to_latest() {
    let server = MockServer::start();

    let dated_mock = server.mock(|when, then| {
        when.method(GET).path(DATED_PATH);
        then.status(200).json_body(json!({"photos": []}));
    });
    let latest_mock = server.mock(|when, then| {
        when.method(GET).path(LATEST_PATH);
        then.status(200)
            .json_body(json!({"latest_photos": [{"id": 9, "img_src": "https://mars/9.jpg"}]}));
    });

    let date: FeedDate = "2012-08-05".parse().unwrap();
    let photos = aggregator_for(&server).fetch_mars_photos(None, Some(date)).await;

    dated_mock.assert();
    latest_mock.assert();
    assert_eq!(photos.len(), 1);
    assert_eq!(photos[0].img_src(), Some("https://mars/9.jpg"));
}

#[tokio::test]
async fn test_null_dated_photos_fall_back_to_latest() {
    let server = MockServer::start();

    let dated_mock = server.mock(|when, then| {
        when.method(GET)
            .path(DATED_PATH)
            .query_param("earth_date", "2024-01-01");
        then.status(200).json_body(json!({"photos": null}));
    });
    let latest_mock = server.mock(|when, then| {
        when.method(GET).path(LATEST_PATH);
        then.status(200)
            .json_body(json!({"latest_photos": [{"id": 4, "img_src": "https://mars/4.jpg"}]}));
    });

    let date: FeedDate = "2024-01-01".parse().unwrap();
    let photos = aggregator_for(&server).fetch_mars_photos(None, Some(date)).await;

    dated_mock.assert();
    latest_mock.assert();
    assert_eq!(photos.len(), 1);
    assert_eq!(photos[0].img_src(), Some("https://mars/4.jpg"));
}

#[tokio::test]
async fn test_dated_photos_without_objects_fall_back_to_latest() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path(DATED_PATH);
        then.status(200).json_body(json!({"photos": [1, 2, 3]}));
    });
    let latest_mock = server.mock(|when, then| {
        when.method(GET).path(LATEST_PATH);
        then.status(200)
            .json_body(json!({"latest_photos": [{"id": 8, "img_src": "https://mars/8.jpg"}]}));
    });

    let date: FeedDate = "2024-01-01".parse().unwrap();
    let photos = aggregator_for(&server).fetch_mars_photos(None, Some(date)).await;

    latest_mock.assert();
    assert_eq!(photos.len(), 1);
}

#[tokio::test]
async fn test_unparseable_dated_body_skips_latest() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path(DATED_PATH);
        then.status(200).body("<html>gateway</html>");
    });
    let latest_mock = server.mock(|when, then| {
        when.method(GET).path(LATEST_PATH);
        then.status(200).json_body(json!({"latest_photos": [{"id": 1}]}));
    });

    let date: FeedDate = "2024-01-01".parse().unwrap();
    let photos = aggregator_for(&server).fetch_mars_photos(None, Some(date)).await;

    assert_eq!(latest_mock.hits(), 0);
    assert!(photos.is_empty());
}

#[tokio::test]
async fn test_latest_photos_unparseable_body_is_empty() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path(LATEST_PATH);
        then.status(200).body("not json");
    });

    let photos = aggregator_for(&server).fetch_mars_photos(None, None).await;
    assert!(photos.is_empty());
}

#[tokio::test]
async fn test_apod_failure_wins_over_neo_failure() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path(APOD_PATH);
        then.status(500);
    });
    server.mock(|when, then| {
        when.method(GET).path(LATEST_PATH);
        then.status(500);
    });
    server.mock(|when, then| {
        when.method(GET).path(NEO_PATH);
        then.status(500);
    });

    let result = aggregator_for(&server).aggregate(None).await;

    assert_eq!(result.apod, None);
    assert!(result.mars_photos.is_empty());
    assert!(result.neo.is_empty());
    assert_eq!(result.error.as_deref(), Some(APOD_ERROR));
}

#[tokio::test]
async fn test_neo_failure_reported_when_apod_succeeds() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path(APOD_PATH);
        then.status(200).json_body(json!({"title": "Saturn"}));
    });
    server.mock(|when, then| {
        when.method(GET).path(LATEST_PATH);
        then.status(502);
    });
    server.mock(|when, then| {
        when.method(GET).path(NEO_PATH);
        then.status(429).body("OVER_RATE_LIMIT");
    });

    let result = aggregator_for(&server).aggregate(None).await;

    assert!(result.apod.is_some());
    assert_eq!(result.error.as_deref(), Some(NEO_ERROR));
}

#[tokio::test]
async fn test_unreachable_upstream_degrades_to_sentinels() {
    // nothing listens on the discard port
    let config = ServerConfig::for_api_base("http://127.0.0.1:9");
    let aggregator = FeedAggregator::new(NasaClient::new(&config).unwrap(), SystemClock);

    let date: FeedDate = "2024-01-01".parse().unwrap();
    let result = aggregator.aggregate(Some(date)).await;

    assert_eq!(result.apod, None);
    assert!(result.mars_photos.is_empty());
    assert!(result.neo.is_empty());
    assert_eq!(result.error.as_deref(), Some(APOD_ERROR));
}
