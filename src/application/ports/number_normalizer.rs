use async_trait::async_trait;

/// Digit and word spellings of the same number, e.g. `7` / `seven`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberForms {
    pub digit_form: Option<String>,
    pub word_form: Option<String>,
}

#[async_trait]
pub trait NumberNormalizer: Send + Sync {
    async fn forms(&self, token: &str) -> Result<NumberForms, NumberNormalizerError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NumberNormalizerError {
    #[error("number normalization failed: {0}")]
    Failed(String),
}
