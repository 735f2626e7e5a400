use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use serde_json::{Value, json};

use crate::application::ports::{AssessmentError, PronunciationAssessor};
use crate::domain::{AudioClip, LanguageTag, RecognitionMode, UpstreamReply};

use super::azure_speech_endpoint::AzureSpeechEndpoint;

pub struct AzurePronunciationAssessor {
    client: reqwest::Client,
    endpoint: AzureSpeechEndpoint,
    api_key: String,
}

impl AzurePronunciationAssessor {
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

/// Value of the `Pronunciation-Assessment` header: base64 of the JSON config.
pub fn assessment_header(reference_text: &str) -> String {
    let config = json!({
        "ReferenceText": reference_text,
        "GradingSystem": "HundredMark",
        "Granularity": "Phoneme",
        "Dimension": "Comprehensive",
        "EnableMiscue": true,
    });
    general_purpose::STANDARD.encode(config.to_string())
}

#[async_trait]
impl PronunciationAssessor for AzurePronunciationAssessor {
    async fn assess(
        &self,
        clip: &AudioClip,
        reference_text: &str,
        language: &LanguageTag,
    ) -> Result<Value, AssessmentError> {
        if !self.is_configured() {
            return Err(AssessmentError::MissingCredentials("AZURE_SPEECH_KEY"));
        }
        let url = self
            .endpoint
            .recognition_url(RecognitionMode::Conversation, language);

        tracing::debug!(language = %language, "Sending audio to Azure pronunciation assessment");

        let response = self
            .client
            .post(&url)
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .header("Pronunciation-Assessment", assessment_header(reference_text))
            .header(reqwest::header::CONTENT_TYPE, clip.speech_content_type())
            .header(reqwest::header::ACCEPT, "application/json")
            .body(clip.bytes.clone())
            .send()
            .await
            .map_err(|e| AssessmentError::ApiRequestFailed(format!("request: {}", e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AssessmentError::ApiRequestFailed(format!("body: {}", e)))?;

        // Unparseable bodies come back as a JSON string; the verdict
        // normalizer then falls through to its zero defaults.
        match UpstreamReply::from_response_parts(status, &body) {
            UpstreamReply::Ok(document) => Ok(document),
            UpstreamReply::Error { status, message } => {
                tracing::warn!(status, message = %message, "Pronunciation assessment rejected");
                Err(AssessmentError::Upstream { status, message })
            }
        }
    }

    fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}
