use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use base64::{Engine as _, engine::general_purpose};
use serde_json::Value;

use pronunciation_relay::application::ports::{AssessmentError, PronunciationAssessor};
use pronunciation_relay::domain::LanguageTag;
use pronunciation_relay::infrastructure::audio::{
    AzurePronunciationAssessor, AzureSpeechEndpoint, assessment_header,
};

use crate::helpers::mock_server::start_mock_server;
use crate::helpers::mocks::wav_clip;

#[test]
fn given_reference_text_when_building_header_then_config_is_base64_json() {
    let header = assessment_header("马");

    let decoded = general_purpose::STANDARD.decode(header).unwrap();
    let config: Value = serde_json::from_slice(&decoded).unwrap();

    assert_eq!(config["ReferenceText"], "马");
    assert_eq!(config["GradingSystem"], "HundredMark");
    assert_eq!(config["Granularity"], "Phoneme");
    assert_eq!(config["EnableMiscue"], true);
}

#[tokio::test]
async fn given_assessment_reply_when_assessing_then_document_is_returned() {
    let header_seen: Arc<Mutex<Option<String>>> = Arc::default();
    let sink = header_seen.clone();
    let app = Router::new().route(
        "/speech/recognition/conversation/cognitiveservices/v1",
        post(move |headers: HeaderMap| async move {
            *sink.lock().unwrap() = headers
                .get("pronunciation-assessment")
                .and_then(|v| v.to_str().ok())
                .map(String::from);
            (
                StatusCode::OK,
                r#"{"RecognitionStatus": "Success", "NBest": [{"PronunciationAssessment": {"AccuracyScore": 88.0}}]}"#,
            )
                .into_response()
        }),
    );
    let (base_url, shutdown_tx) = start_mock_server(app).await;
    let assessor = AzurePronunciationAssessor::new(
        AzureSpeechEndpoint::new(&base_url),
        "speech-key",
        Duration::from_secs(5),
    );

    let document = assessor
        .assess(&wav_clip(), "hello", &LanguageTag::default())
        .await
        .unwrap();

    assert_eq!(
        document.pointer("/NBest/0/PronunciationAssessment/AccuracyScore"),
        Some(&Value::from(88.0))
    );
    assert_eq!(
        header_seen.lock().unwrap().as_deref(),
        Some(assessment_header("hello").as_str())
    );
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_quota_error_when_assessing_then_message_is_extracted() {
    let app = Router::new().route(
        "/speech/recognition/conversation/cognitiveservices/v1",
        post(|| async {
            (
                StatusCode::FORBIDDEN,
                r#"{"error": {"code": "403", "message": "Quota exceeded"}}"#,
            )
        }),
    );
    let (base_url, shutdown_tx) = start_mock_server(app).await;
    let assessor = AzurePronunciationAssessor::new(
        AzureSpeechEndpoint::new(&base_url),
        "speech-key",
        Duration::from_secs(5),
    );

    let result = assessor
        .assess(&wav_clip(), "hello", &LanguageTag::default())
        .await;

    match result {
        Err(AssessmentError::Upstream { status, message }) => {
            assert_eq!(status, 403);
            assert_eq!(message, "Quota exceeded");
        }
        other => panic!("unexpected result: {:?}", other),
    }
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_empty_key_when_assessing_then_missing_credentials_is_returned() {
    let assessor = AzurePronunciationAssessor::new(
        AzureSpeechEndpoint::for_region("eastus"),
        "",
        Duration::from_secs(1),
    );

    let result = assessor
        .assess(&wav_clip(), "hello", &LanguageTag::default())
        .await;

    assert!(matches!(result, Err(AssessmentError::MissingCredentials(_))));
}
