use std::sync::Arc;

use crate::application::ports::{ModalTranscriptionEngine, TranscriptionEngine, TranscriptionError};
use crate::domain::{
    AudioClip, CandidateList, LanguageTag, Recognition, RecognitionMode, RecognitionProvider,
};

pub struct RecognitionService {
    primary: Arc<dyn TranscriptionEngine>,
    secondary: Arc<dyn ModalTranscriptionEngine>,
}

impl RecognitionService {
    pub fn new(
        primary: Arc<dyn TranscriptionEngine>,
        secondary: Arc<dyn ModalTranscriptionEngine>,
    ) -> Self {
        Self { primary, secondary }
    }

    pub fn is_configured(&self, provider: RecognitionProvider) -> bool {
        match provider {
            RecognitionProvider::Primary => self.primary.is_configured(),
            RecognitionProvider::Secondary => self.secondary.is_configured(),
        }
    }

    pub async fn recognize(
        &self,
        clip: &AudioClip,
        language: &LanguageTag,
        provider: RecognitionProvider,
    ) -> Result<Recognition, RecognitionError> {
        match provider {
            RecognitionProvider::Primary => self.recognize_primary(clip, language).await,
            RecognitionProvider::Secondary => self.recognize_secondary(clip, language).await,
        }
    }

    async fn recognize_primary(
        &self,
        clip: &AudioClip,
        language: &LanguageTag,
    ) -> Result<Recognition, RecognitionError> {
        let raw = self
            .primary
            .transcribe(clip, language)
            .await
            .map_err(|source| RecognitionError {
                provider: RecognitionProvider::Primary,
                source,
            })?;

        let candidates = CandidateList::normalize(raw).filter_for_language(language);
        tracing::debug!(
            provider = %RecognitionProvider::Primary,
            candidates = candidates.len(),
            "Recognition completed"
        );

        Ok(Recognition {
            candidates,
            provider_used: RecognitionProvider::Primary,
        })
    }

    /// Walks the mode endpoints in order and stops at the first one that
    /// yields a usable candidate. Exhausting the list is "no speech", not an error.
    async fn recognize_secondary(
        &self,
        clip: &AudioClip,
        language: &LanguageTag,
    ) -> Result<Recognition, RecognitionError> {
        if !self.secondary.is_configured() {
            return Err(RecognitionError {
                provider: RecognitionProvider::Secondary,
                source: TranscriptionError::MissingCredentials("AZURE_SPEECH_KEY"),
            });
        }

        for mode in RecognitionMode::FALLBACK_ORDER {
            match self.secondary.transcribe_mode(clip, language, mode).await {
                Ok(raw) => {
                    let candidates = CandidateList::normalize(raw).filter_for_language(language);
                    if !candidates.is_empty() {
                        tracing::debug!(
                            mode = %mode,
                            candidates = candidates.len(),
                            "Recognition mode produced candidates"
                        );
                        return Ok(Recognition {
                            candidates,
                            provider_used: RecognitionProvider::Secondary,
                        });
                    }
                    tracing::debug!(mode = %mode, "Recognition mode produced no usable candidates");
                }
                Err(e) => {
                    tracing::warn!(mode = %mode, error = %e, "Recognition mode failed, trying next");
                }
            }
        }

        tracing::info!(language = %language, "No speech recognized by any mode");
        Ok(Recognition::no_speech(RecognitionProvider::Secondary))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("recognition via {provider} failed: {source}")]
pub struct RecognitionError {
    pub provider: RecognitionProvider,
    #[source]
    pub source: TranscriptionError,
}
