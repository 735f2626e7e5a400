use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use serde_json::json;

use pronunciation_relay::application::ports::{LookupError, PhoneticDataSource};
use pronunciation_relay::domain::Reading;
use pronunciation_relay::infrastructure::phonetics::{
    HttpPhoneticDataSource, parse_reading_map, parse_shard,
};

use crate::helpers::mock_server::start_mock_server;

fn reading(sound: &str, tone: &str) -> Reading {
    Reading {
        sound: sound.to_string(),
        tone: tone.to_string(),
    }
}

#[tokio::test]
async fn given_reading_and_shard_documents_when_loading_then_both_are_parsed() {
    let app = Router::new()
        .route(
            "/readings.json",
            get(|| async {
                (
                    StatusCode::OK,
                    r#"{"马": [{"sound": "ma", "tone": "3"}], "行": ["xing2", "hang2"]}"#,
                )
            }),
        )
        .route(
            "/shards/ma.json",
            get(|| async { (StatusCode::OK, r#"["马", "吗", "妈"]"#) }),
        );
    let (base_url, shutdown_tx) = start_mock_server(app).await;
    let source = HttpPhoneticDataSource::new(
        &format!("{}/readings.json", base_url),
        &format!("{}/shards/", base_url),
        Duration::from_secs(5),
    );

    let readings = source.load_readings().await.unwrap();
    let shard = source.fetch_homophone_shard("ma").await.unwrap();

    assert_eq!(readings["马"], vec![reading("ma", "3")]);
    assert_eq!(readings["行"], vec![reading("xing", "2"), reading("hang", "2")]);
    assert_eq!(shard, vec!["马", "吗", "妈"]);
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_missing_shard_when_fetching_then_status_error_is_returned() {
    let app = Router::new();
    let (base_url, shutdown_tx) = start_mock_server(app).await;
    let source = HttpPhoneticDataSource::new("", &base_url, Duration::from_secs(5));

    let result = source.fetch_homophone_shard("zzz").await;

    assert!(matches!(result, Err(LookupError::Status(404))));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_unconfigured_urls_when_loading_then_not_configured_is_returned() {
    let source = HttpPhoneticDataSource::new("", "", Duration::from_secs(1));

    assert!(matches!(
        source.load_readings().await,
        Err(LookupError::NotConfigured(_))
    ));
    assert!(matches!(
        source.fetch_homophone_shard("ma").await,
        Err(LookupError::NotConfigured(_))
    ));
}

#[test]
fn given_compact_reading_without_tone_when_parsing_then_neutral_tone_is_used() {
    let map = parse_reading_map(&json!({"吗": ["ma"], "?": [42, null]})).unwrap();

    assert_eq!(map["吗"], vec![reading("ma", "5")]);
    assert!(map["?"].is_empty());
}

#[test]
fn given_numeric_tone_when_parsing_then_reading_is_kept() {
    let map = parse_reading_map(&json!({"马": [{"sound": "ma", "tone": 3}]})).unwrap();

    assert_eq!(map["马"], vec![reading("ma", "3")]);
}

#[test]
fn given_non_object_reading_map_when_parsing_then_malformed_is_returned() {
    assert!(matches!(
        parse_reading_map(&json!(["ma3"])),
        Err(LookupError::Malformed(_))
    ));
}

#[test]
fn given_string_shard_when_parsing_then_each_character_is_an_entry() {
    assert_eq!(parse_shard(&json!("马吗")).unwrap(), vec!["马", "吗"]);
    assert!(matches!(parse_shard(&json!(3)), Err(LookupError::Malformed(_))));
}
