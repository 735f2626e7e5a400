use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::application::ports::{LookupError, PhoneticDataSource, ReadingMap};
use crate::domain::{PinyinSyllable, Reading};

/// Fetches the reading map from one JSON document and homophone shards
/// from `{shards_base_url}/{base}.json`.
pub struct HttpPhoneticDataSource {
    client: Client,
    readings_url: String,
    shards_base_url: String,
}

impl HttpPhoneticDataSource {
    pub fn new(readings_url: &str, shards_base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("reqwest client build never fails with valid TLS config");
        Self {
            client,
            readings_url: readings_url.to_string(),
            shards_base_url: shards_base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn fetch_json(&self, url: &str) -> Result<Value, LookupError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LookupError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(LookupError::Status(response.status().as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| LookupError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl PhoneticDataSource for HttpPhoneticDataSource {
    async fn load_readings(&self) -> Result<ReadingMap, LookupError> {
        if self.readings_url.is_empty() {
            return Err(LookupError::NotConfigured("phonetics.readings_url"));
        }
        let document = self.fetch_json(&self.readings_url).await?;
        let map = parse_reading_map(&document)?;
        tracing::info!(characters = map.len(), "Reading map loaded");
        Ok(map)
    }

    async fn fetch_homophone_shard(&self, base: &str) -> Result<Vec<String>, LookupError> {
        if self.shards_base_url.is_empty() {
            return Err(LookupError::NotConfigured("phonetics.shards_base_url"));
        }
        let url = format!("{}/{}.json", self.shards_base_url, base);
        let document = self.fetch_json(&url).await?;
        let shard = parse_shard(&document)?;
        tracing::debug!(base = %base, homophones = shard.len(), "Homophone shard loaded");
        Ok(shard)
    }
}

/// `{"马": [{"sound": "ma", "tone": "3"}]}` or the compact `{"马": ["ma3"]}`.
pub fn parse_reading_map(document: &Value) -> Result<ReadingMap, LookupError> {
    let object = document
        .as_object()
        .ok_or_else(|| LookupError::Malformed("reading map is not an object".to_string()))?;

    Ok(object
        .iter()
        .map(|(character, entries)| {
            let readings = entries
                .as_array()
                .map(|list| list.iter().filter_map(parse_reading).collect())
                .unwrap_or_default();
            (character.clone(), readings)
        })
        .collect())
}

fn parse_reading(entry: &Value) -> Option<Reading> {
    match entry {
        Value::String(compact) => {
            let syllable = PinyinSyllable::parse(compact)?;
            Some(Reading {
                sound: syllable.base,
                tone: syllable.tone.unwrap_or_else(|| "5".to_string()),
            })
        }
        Value::Object(fields) => {
            let mut fields = fields.clone();
            if let Some(Value::Number(tone)) = fields.get("tone") {
                let tone = Value::String(tone.to_string());
                fields.insert("tone".to_string(), tone);
            }
            serde_json::from_value(Value::Object(fields)).ok()
        }
        _ => None,
    }
}

/// A shard is either a list of characters/words or one string of characters.
pub fn parse_shard(document: &Value) -> Result<Vec<String>, LookupError> {
    match document {
        Value::Array(items) => Ok(items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()),
        Value::String(characters) => Ok(characters.chars().map(String::from).collect()),
        _ => Err(LookupError::Malformed(
            "homophone shard is neither a list nor a string".to_string(),
        )),
    }
}
