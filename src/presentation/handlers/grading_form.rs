use axum::extract::Multipart;

use crate::domain::{AudioClip, LanguageTag, RecognitionProvider};

use super::error_response::ApiError;

/// Validated multipart body shared by the grading endpoints.
#[derive(Debug)]
pub struct GradingForm {
    pub clip: AudioClip,
    pub expected: String,
    pub language: LanguageTag,
    pub provider: RecognitionProvider,
}

impl GradingForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut audio = None;
        let mut expected = None;
        let mut language = None;
        let mut provider = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read multipart: {}", e)))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "audio" => {
                    let content_type = field.content_type().map(str::to_string);
                    let data = field.bytes().await.map_err(|e| {
                        ApiError::bad_request(format!("Failed to read audio: {}", e))
                    })?;
                    audio = Some(AudioClip::new(data.to_vec(), content_type.as_deref()));
                }
                "expected" | "language" | "provider" => {
                    let value = field.text().await.map_err(|e| {
                        ApiError::bad_request(format!("Failed to read field {}: {}", name, e))
                    })?;
                    match name.as_str() {
                        "expected" => expected = Some(value),
                        "language" => language = Some(value),
                        _ => provider = Some(value),
                    }
                }
                other => tracing::debug!(field = %other, "Ignoring unknown form field"),
            }
        }

        let clip = audio
            .filter(|clip| !clip.is_empty())
            .ok_or_else(|| ApiError::bad_request("Missing audio".to_string()))?;
        let expected = expected
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .ok_or_else(|| ApiError::bad_request("Missing expected".to_string()))?;

        Ok(Self {
            clip,
            expected,
            language: LanguageTag::parse(language.as_deref()),
            provider: RecognitionProvider::parse(provider.as_deref()),
        })
    }
}
