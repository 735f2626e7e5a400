use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::Reading;

pub type ReadingMap = HashMap<String, Vec<Reading>>;

/// Character readings and the reverse homophone index, sharded by toneless
/// syllable.
#[async_trait]
pub trait PhoneticDataSource: Send + Sync {
    async fn load_readings(&self) -> Result<ReadingMap, LookupError>;

    async fn fetch_homophone_shard(&self, base: &str) -> Result<Vec<String>, LookupError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum LookupError {
    #[error("lookup source not configured: {0}")]
    NotConfigured(&'static str),
    #[error("lookup request failed: {0}")]
    RequestFailed(String),
    #[error("lookup returned status {0}")]
    Status(u16),
    #[error("malformed lookup data: {0}")]
    Malformed(String),
}
