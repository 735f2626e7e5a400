use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};

use pronunciation_relay::application::ports::{InputAudio, JudgeClient, JudgeError, JudgePrompt};
use pronunciation_relay::infrastructure::llm::OpenAiJudgeClient;

use crate::helpers::mock_server::start_mock_server;

async fn start_mock_chat(
    status: u16,
    reply: Value,
) -> (String, tokio::sync::oneshot::Sender<()>, Arc<Mutex<Value>>) {
    let seen: Arc<Mutex<Value>> = Arc::default();
    let sink = seen.clone();
    let app = Router::new().route(
        "/chat/completions",
        post(move |Json(request): Json<Value>| async move {
            *sink.lock().unwrap() = request;
            (StatusCode::from_u16(status).unwrap(), Json(reply)).into_response()
        }),
    );
    let (base_url, shutdown_tx) = start_mock_server(app).await;
    (base_url, shutdown_tx, seen)
}

fn client(base_url: &str, model: &str) -> OpenAiJudgeClient {
    OpenAiJudgeClient::new(
        "sk-test".to_string(),
        base_url,
        model.to_string(),
        Duration::from_secs(5),
    )
}

fn text_prompt() -> JudgePrompt {
    JudgePrompt {
        system: "grade".to_string(),
        user: "Target: \"seven\"".to_string(),
        audio: None,
    }
}

#[tokio::test]
async fn given_text_prompt_when_completing_then_json_mode_is_requested() {
    let reply = json!({"choices": [{"message": {"role": "assistant", "content": "{\"pass\": true}"}}]});
    let (base_url, shutdown_tx, seen) = start_mock_chat(200, reply).await;

    let content = client(&base_url, "gpt-4o-mini")
        .complete_json(&text_prompt())
        .await
        .unwrap();

    assert_eq!(content, "{\"pass\": true}");
    let request = seen.lock().unwrap().clone();
    assert_eq!(request["model"], "gpt-4o-mini");
    assert_eq!(request["temperature"], 0.0);
    assert_eq!(request["response_format"]["type"], "json_object");
    assert_eq!(request["messages"][0]["role"], "system");
    assert_eq!(request["messages"][1]["content"], "Target: \"seven\"");
    assert!(request.get("modalities").is_none());
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_audio_prompt_when_completing_then_input_audio_part_is_sent() {
    let reply = json!({"choices": [{"message": {"content": "{}"}}]});
    let (base_url, shutdown_tx, seen) = start_mock_chat(200, reply).await;
    let prompt = JudgePrompt {
        audio: Some(InputAudio {
            base64_data: "UklGRg==".to_string(),
            format: "wav",
        }),
        ..text_prompt()
    };

    client(&base_url, "gpt-4o-audio-preview")
        .complete_json(&prompt)
        .await
        .unwrap();

    let request = seen.lock().unwrap().clone();
    let parts = &request["messages"][1]["content"];
    assert_eq!(parts[0]["type"], "text");
    assert_eq!(parts[1]["type"], "input_audio");
    assert_eq!(parts[1]["input_audio"]["format"], "wav");
    assert_eq!(parts[1]["input_audio"]["data"], "UklGRg==");
    assert_eq!(request["modalities"], json!(["text"]));
    assert!(request.get("response_format").is_none());
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_rate_limit_when_completing_then_rate_limited_is_returned() {
    let (base_url, shutdown_tx, _) =
        start_mock_chat(429, json!({"error": {"message": "slow down"}})).await;

    let result = client(&base_url, "gpt-4o-mini")
        .complete_json(&text_prompt())
        .await;

    let error = result.unwrap_err();
    assert!(matches!(error, JudgeError::RateLimited));
    assert_eq!(error.upstream_status(), Some(429));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_server_error_when_completing_then_upstream_message_is_surfaced() {
    let (base_url, shutdown_tx, _) =
        start_mock_chat(500, json!({"error": {"message": "The server had an error"}})).await;

    let result = client(&base_url, "gpt-4o-mini")
        .complete_json(&text_prompt())
        .await;

    match result {
        Err(JudgeError::Upstream { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "The server had an error");
        }
        other => panic!("unexpected result: {:?}", other),
    }
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_empty_choices_when_completing_then_empty_content_is_returned() {
    let (base_url, shutdown_tx, _) = start_mock_chat(200, json!({"choices": []})).await;

    let content = client(&base_url, "gpt-4o-mini")
        .complete_json(&text_prompt())
        .await
        .unwrap();

    assert_eq!(content, "");
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_null_content_when_completing_then_empty_content_is_returned() {
    let (base_url, shutdown_tx, _) =
        start_mock_chat(200, json!({"choices": [{"message": {"content": null}}]})).await;

    let content = client(&base_url, "gpt-4o-mini")
        .complete_json(&text_prompt())
        .await
        .unwrap();

    assert_eq!(content, "");
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_undecodable_body_when_completing_then_invalid_response_is_returned() {
    let (base_url, shutdown_tx, _) = start_mock_chat(200, json!({"unexpected": true})).await;

    let result = client(&base_url, "gpt-4o-mini")
        .complete_json(&text_prompt())
        .await;

    assert!(matches!(result, Err(JudgeError::InvalidResponse(_))));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_empty_key_when_completing_then_missing_credentials_is_returned() {
    let judge = OpenAiJudgeClient::new(
        String::new(),
        "http://127.0.0.1:9",
        "gpt-4o-mini".to_string(),
        Duration::from_secs(1),
    );

    let result = judge.complete_json(&text_prompt()).await;

    assert!(!judge.is_configured());
    assert!(matches!(result, Err(JudgeError::MissingCredentials(_))));
}
