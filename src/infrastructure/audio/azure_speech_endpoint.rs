use crate::domain::{LanguageTag, RecognitionMode};

/// Base URL of an Azure Speech short-audio REST deployment.
#[derive(Debug, Clone)]
pub struct AzureSpeechEndpoint {
    base_url: String,
}

impl AzureSpeechEndpoint {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn for_region(region: &str) -> Self {
        Self::new(&format!("https://{}.stt.speech.microsoft.com", region.trim()))
    }

    pub fn recognition_url(&self, mode: RecognitionMode, language: &LanguageTag) -> String {
        format!(
            "{}/speech/recognition/{}/cognitiveservices/v1?language={}&format=detailed",
            self.base_url,
            mode,
            language.as_str(),
        )
    }
}
