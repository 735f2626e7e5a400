use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{HomophoneLookup, HomophoneLookupError};

pub const DEFAULT_DATAMUSE_URL: &str = "https://api.datamuse.com";

pub struct DatamuseClient {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct DatamuseWord {
    word: String,
}

impl DatamuseClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("reqwest client build never fails with valid TLS config");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl HomophoneLookup for DatamuseClient {
    async fn homophones(
        &self,
        word: &str,
        max: usize,
    ) -> Result<Vec<String>, HomophoneLookupError> {
        let response = self
            .client
            .get(format!("{}/words", self.base_url))
            .query(&[("rel_hom", word.to_string()), ("max", max.to_string())])
            .send()
            .await
            .map_err(|e| HomophoneLookupError::ApiRequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(HomophoneLookupError::Status(response.status().as_u16()));
        }

        let words: Vec<DatamuseWord> = response
            .json()
            .await
            .map_err(|e| HomophoneLookupError::InvalidResponse(e.to_string()))?;

        tracing::debug!(word = %word, results = words.len(), "Datamuse homophones fetched");

        Ok(words.into_iter().map(|w| w.word).take(max).collect())
    }
}
