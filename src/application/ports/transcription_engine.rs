use async_trait::async_trait;

use crate::domain::{AudioClip, LanguageTag, RecognitionMode};

/// Single-shot transcription backend. Returns raw candidates, best first.
#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    async fn transcribe(
        &self,
        clip: &AudioClip,
        language: &LanguageTag,
    ) -> Result<Vec<String>, TranscriptionError>;

    fn is_configured(&self) -> bool {
        true
    }
}

/// Speech backend exposing several recognition-mode endpoints.
#[async_trait]
pub trait ModalTranscriptionEngine: Send + Sync {
    async fn transcribe_mode(
        &self,
        clip: &AudioClip,
        language: &LanguageTag,
        mode: RecognitionMode,
    ) -> Result<Vec<String>, TranscriptionError>;

    fn is_configured(&self) -> bool {
        true
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("upstream returned status {status}: {message}")]
    Upstream { status: u16, message: String },
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("missing credentials: {0}")]
    MissingCredentials(&'static str),
}

impl TranscriptionError {
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}
