mod azure_pronunciation_assessor;
mod azure_speech_endpoint;
mod azure_speech_engine;
mod openai_whisper_engine;

pub use azure_pronunciation_assessor::{AzurePronunciationAssessor, assessment_header};
pub use azure_speech_endpoint::AzureSpeechEndpoint;
pub use azure_speech_engine::{AzureSpeechEngine, extract_nbest};
pub use openai_whisper_engine::{
    DEFAULT_OPENAI_BASE_URL, DEFAULT_TRANSCRIPTION_MODEL, OpenAiWhisperEngine,
    extract_transcripts,
};
