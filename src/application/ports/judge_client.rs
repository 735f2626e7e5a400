use async_trait::async_trait;

/// Prompt pair sent to an LLM judge, optionally with the recording attached.
#[derive(Debug, Clone)]
pub struct JudgePrompt {
    pub system: String,
    pub user: String,
    pub audio: Option<InputAudio>,
}

#[derive(Debug, Clone)]
pub struct InputAudio {
    pub base64_data: String,
    pub format: &'static str,
}

#[async_trait]
pub trait JudgeClient: Send + Sync {
    /// Returns the judge's raw message content, expected to be JSON.
    async fn complete_json(&self, prompt: &JudgePrompt) -> Result<String, JudgeError>;

    fn is_configured(&self) -> bool {
        true
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JudgeError {
    #[error("upstream returned status {status}: {message}")]
    Upstream { status: u16, message: String },
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("missing credentials: {0}")]
    MissingCredentials(&'static str),
}

impl JudgeError {
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            Self::RateLimited => Some(429),
            _ => None,
        }
    }
}
