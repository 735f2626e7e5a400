use async_trait::async_trait;

#[async_trait]
pub trait HomophoneLookup: Send + Sync {
    async fn homophones(&self, word: &str, max: usize)
    -> Result<Vec<String>, HomophoneLookupError>;
}

#[derive(Debug, thiserror::Error)]
pub enum HomophoneLookupError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("upstream returned status {0}")]
    Status(u16),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
