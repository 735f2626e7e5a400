use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::application::ports::{ModalTranscriptionEngine, TranscriptionError};
use crate::domain::{AudioClip, LanguageTag, RecognitionMode, UpstreamReply};

use super::azure_speech_endpoint::AzureSpeechEndpoint;

pub struct AzureSpeechEngine {
    client: reqwest::Client,
    endpoint: AzureSpeechEndpoint,
    api_key: String,
}

impl AzureSpeechEngine {
    pub fn new(endpoint: AzureSpeechEndpoint, api_key: &str, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("reqwest client build never fails with valid TLS config");
        Self {
            client,
            endpoint,
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl ModalTranscriptionEngine for AzureSpeechEngine {
    async fn transcribe_mode(
        &self,
        clip: &AudioClip,
        language: &LanguageTag,
        mode: RecognitionMode,
    ) -> Result<Vec<String>, TranscriptionError> {
        if !self.is_configured() {
            return Err(TranscriptionError::MissingCredentials("AZURE_SPEECH_KEY"));
        }
        let url = self.endpoint.recognition_url(mode, language);

        tracing::debug!(
            mode = %mode,
            content_type = clip.speech_content_type(),
            "Sending audio to Azure Speech"
        );

        let response = self
            .client
            .post(&url)
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .header(reqwest::header::CONTENT_TYPE, clip.speech_content_type())
            .header(reqwest::header::ACCEPT, "application/json")
            .body(clip.bytes.clone())
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
                let candidates = extract_nbest(&document);
                tracing::info!(
                    mode = %mode,
                    candidates = candidates.len(),
                    "Azure Speech recognition completed"
                );
                Ok(candidates)
            }
            UpstreamReply::Error { status, message } => {
                Err(TranscriptionError::Upstream { status, message })
            }
        }
    }

    fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// Candidates from a detailed-format response: `NBest[*].Display`
/// (or `Lexical`), then `DisplayText`. Non-success statuses yield nothing.
pub fn extract_nbest(document: &Value) -> Vec<String> {
    let status = document
        .get("RecognitionStatus")
        .and_then(Value::as_str)
        .unwrap_or("Success");
    if status != "Success" {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let mut candidates: Vec<String> = document
        .get("NBest")
        .and_then(Value::as_array)
        .map(|nbest| {
            nbest
                .iter()
                .filter_map(|entry| {
                    entry
                        .get("Display")
                        .or_else(|| entry.get("Lexical"))
                        .and_then(Value::as_str)
                })
                .map(str::to_string)
                .filter(|text| seen.insert(text.clone()))
                .collect()
        })
        .unwrap_or_default();

    if candidates.is_empty() {
        if let Some(text) = document.get("DisplayText").and_then(Value::as_str) {
            candidates.push(text.to_string());
        }
    }
    candidates
}
