use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;
use serde_json::Value;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::domain::{AudioClip, LanguageTag, UpstreamReply};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TRANSCRIPTION_MODEL: &str = "whisper-1";

pub struct OpenAiWhisperEngine {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiWhisperEngine {
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        model: Option<String>,
        timeout: Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("reqwest client build never fails with valid TLS config");
        Self {
            client,
            api_key,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: model.unwrap_or_else(|| DEFAULT_TRANSCRIPTION_MODEL.to_string()),
        }
    }
}

#[async_trait]
impl TranscriptionEngine for OpenAiWhisperEngine {
    async fn transcribe(
        &self,
        clip: &AudioClip,
        language: &LanguageTag,
    ) -> Result<Vec<String>, TranscriptionError> {
        if !self.is_configured() {
            return Err(TranscriptionError::MissingCredentials("OPENAI_API_KEY"));
        }
        let url = format!("{}/audio/transcriptions", self.base_url);

        let file_part = multipart::Part::bytes(clip.bytes.clone())
            .file_name(clip.file_name_hint())
            .mime_str(clip.upload_mime())
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("mime: {}", e)))?;

        let mut form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "verbose_json")
            .part("file", file_part);
        let language_hint = language.iso639_1();
        if !language_hint.is_empty() {
            form = form.text("language", language_hint.clone());
        }

        tracing::debug!(
            model = %self.model,
            language = %language_hint,
            file_name = clip.file_name_hint(),
            "Sending audio to OpenAI transcription API"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("request: {}", e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("body: {}", e)))?;

        match UpstreamReply::from_response_parts(status, &body) {
            UpstreamReply::Ok(document) => {
                let candidates = extract_transcripts(&document);
                tracing::info!(
                    candidates = candidates.len(),
                    "OpenAI transcription completed"
                );
                Ok(candidates)
            }
            UpstreamReply::Error { status, message } => {
                tracing::warn!(status, message = %message, "OpenAI transcription rejected");
                Err(TranscriptionError::Upstream { status, message })
            }
        }
    }

    fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// `text`, else the joined segment texts, else a plain-text body.
pub fn extract_transcripts(document: &Value) -> Vec<String> {
    if let Some(text) = document.get("text").and_then(Value::as_str) {
        return vec![text.trim().to_string()];
    }

    if let Some(segments) = document.get("segments").and_then(Value::as_array) {
        let joined = segments
            .iter()
            .filter_map(|s| s.get("text").and_then(Value::as_str))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        return vec![joined];
    }

    match document {
        Value::String(text) => vec![text.trim().to_string()],
        _ => Vec::new(),
    }
}
