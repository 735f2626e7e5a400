mod homophone_lookup;
mod judge_client;
mod lookup_cache;
mod number_normalizer;
mod phonetic_data_source;
mod pronunciation_assessor;
mod transcription_engine;

pub use homophone_lookup::{HomophoneLookup, HomophoneLookupError};
pub use judge_client::{InputAudio, JudgeClient, JudgeError, JudgePrompt};
pub use lookup_cache::LookupCache;
pub use number_normalizer::{NumberForms, NumberNormalizer, NumberNormalizerError};
pub use phonetic_data_source::{LookupError, PhoneticDataSource, ReadingMap};
pub use pronunciation_assessor::{AssessmentError, PronunciationAssessor};
pub use transcription_engine::{ModalTranscriptionEngine, TranscriptionEngine, TranscriptionError};
