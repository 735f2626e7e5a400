use std::time::Duration;

use config::{Config, ConfigError, Environment as EnvSource, File};
use serde::Deserialize;

use super::Environment;
use crate::infrastructure::audio::{DEFAULT_OPENAI_BASE_URL, DEFAULT_TRANSCRIPTION_MODEL};
use crate::infrastructure::lexicon::DEFAULT_DATAMUSE_URL;
use crate::infrastructure::llm::{DEFAULT_AUDIO_JUDGE_MODEL, DEFAULT_JUDGE_MODEL};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub environment: String,
    pub server: ServerSettings,
    pub openai: OpenAiSettings,
    pub azure_speech: AzureSpeechSettings,
    pub phonetics: PhoneticsSettings,
    pub homophones: HomophoneSettings,
    pub timeouts: TimeoutSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiSettings {
    pub api_key: String,
    pub base_url: String,
    pub transcription_model: String,
    pub judge_model: String,
    pub audio_judge_model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AzureSpeechSettings {
    pub key: String,
    pub region: String,
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhoneticsSettings {
    pub readings_url: String,
    pub shards_base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HomophoneSettings {
    pub datamuse_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimeoutSettings {
    pub recognition_secs: u64,
    pub judge_secs: u64,
    pub lookup_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Settings {
    /// Layered load: optional `config/default` and `config/local` files,
    /// `RELAY__SECTION__KEY` variables, then the conventional bare
    /// credential variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("environment", "local")?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.max_upload_bytes", 10 * 1024 * 1024)?
            .set_default("openai.api_key", "")?
            .set_default("openai.base_url", DEFAULT_OPENAI_BASE_URL)?
            .set_default("openai.transcription_model", DEFAULT_TRANSCRIPTION_MODEL)?
            .set_default("openai.judge_model", DEFAULT_JUDGE_MODEL)?
            .set_default("openai.audio_judge_model", DEFAULT_AUDIO_JUDGE_MODEL)?
            .set_default("azure_speech.key", "")?
            .set_default("azure_speech.region", "eastus")?
            .set_default("phonetics.readings_url", "")?
            .set_default("phonetics.shards_base_url", "")?
            .set_default("homophones.datamuse_url", DEFAULT_DATAMUSE_URL)?
            .set_default("timeouts.recognition_secs", 15)?
            .set_default("timeouts.judge_secs", 25)?
            .set_default("timeouts.lookup_secs", 5)?
            .set_default("logging.level", "info")?
            .set_default("logging.enable_json", false)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(EnvSource::with_prefix("RELAY").separator("__"))
            .set_override_option("openai.api_key", std::env::var("OPENAI_API_KEY").ok())?
            .set_override_option("azure_speech.key", std::env::var("AZURE_SPEECH_KEY").ok())?
            .set_override_option(
                "azure_speech.region",
                std::env::var("AZURE_SPEECH_REGION").ok(),
            )?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("environment", std::env::var("APP_ENV").ok())?
            .build()?;

        config.try_deserialize()
    }

    pub fn environment(&self) -> Result<Environment, String> {
        Environment::try_from(self.environment.clone())
    }
}

impl TimeoutSettings {
    pub fn recognition(&self) -> Duration {
        Duration::from_secs(self.recognition_secs)
    }

    pub fn judge(&self) -> Duration {
        Duration::from_secs(self.judge_secs)
    }

    pub fn lookup(&self) -> Duration {
        Duration::from_secs(self.lookup_secs)
    }
}
