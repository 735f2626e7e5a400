use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::application::ports::{JudgeClient, JudgeError, JudgePrompt};
use crate::domain::extract_error_message;

pub const DEFAULT_JUDGE_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_AUDIO_JUDGE_MODEL: &str = "gpt-4o-audio-preview";
const MAX_JUDGE_TOKENS: usize = 300;

pub struct OpenAiJudgeClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: usize,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    modalities: Option<Vec<&'static str>>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: Value,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiJudgeClient {
    pub fn new(api_key: String, base_url: &str, model: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("reqwest client build never fails with valid TLS config");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
        }
    }

    fn build_request(&self, prompt: &JudgePrompt) -> ChatCompletionRequest {
        let user_content = match &prompt.audio {
            Some(audio) => json!([
                { "type": "text", "text": prompt.user },
                {
                    "type": "input_audio",
                    "input_audio": { "data": audio.base64_data, "format": audio.format }
                }
            ]),
            None => Value::String(prompt.user.clone()),
        };

        // Audio chat models reject JSON mode, the system prompt carries the schema instead.
        let (response_format, modalities) = match prompt.audio {
            Some(_) => (None, Some(vec!["text"])),
            None => (Some(json!({ "type": "json_object" })), None),
        };

        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: Value::String(prompt.system.clone()),
                },
                ChatMessage {
                    role: "user",
                    content: user_content,
                },
            ],
            max_tokens: MAX_JUDGE_TOKENS,
            temperature: 0.0,
            response_format,
            modalities,
        }
    }
}

#[async_trait]
impl JudgeClient for OpenAiJudgeClient {
    async fn complete_json(&self, prompt: &JudgePrompt) -> Result<String, JudgeError> {
        if !self.is_configured() {
            return Err(JudgeError::MissingCredentials("OPENAI_API_KEY"));
        }
        let request_body = self.build_request(prompt);

        tracing::debug!(
            model = %self.model,
            with_audio = prompt.audio.is_some(),
            "Sending judge request"
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| JudgeError::ApiRequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(JudgeError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(JudgeError::Upstream {
                status,
                message: extract_error_message(&body),
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| JudgeError::InvalidResponse(e.to_string()))?;

        // A judge that answers without content still yields the default verdict downstream.
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content);
        if content.is_none() {
            tracing::warn!(model = %self.model, "Judge reply carried no content");
        }
        Ok(content.unwrap_or_default())
    }

    fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}
