use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{AudioClip, LanguageTag};

/// Structured pronunciation scoring on a percentage scale.
#[async_trait]
pub trait PronunciationAssessor: Send + Sync {
    async fn assess(
        &self,
        clip: &AudioClip,
        reference_text: &str,
        language: &LanguageTag,
    ) -> Result<Value, AssessmentError>;

    fn is_configured(&self) -> bool {
        true
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error("upstream returned status {status}: {message}")]
    Upstream { status: u16, message: String },
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("missing credentials: {0}")]
    MissingCredentials(&'static str),
}

impl AssessmentError {
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}
